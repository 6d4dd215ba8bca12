//! Plain-text seed patterns and grid snapshots
//!
//! One line per row. `1`, `O` and `#` are alive, `0` and `.` are dead.
//! Blank lines are skipped and lines starting with `!` are comments.

use super::AutomatonGrid;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern contains no rows")]
    Empty,
    #[error("row {row} has length {found}, expected {expected} (all rows must have the same length)")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("invalid character '{ch}' at row {row}, column {col}")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("unknown built-in pattern '{0}'")]
    UnknownName(String),
    #[error("failed to read pattern file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const BUILTIN: &[(&str, &str)] = &[
    ("glider", ".O.\n..O\nOOO\n"),
    ("blinker", "OOO\n"),
    ("block", "OO\nOO\n"),
    ("beacon", "OO..\nOO..\n..OO\n..OO\n"),
    ("r-pentomino", ".OO\nOO.\n.O.\n"),
];

/// A rectangle of cells that can be stamped onto a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl Pattern {
    /// Parse a pattern from its text form
    pub fn parse(content: &str) -> Result<Self, PatternError> {
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('!'))
            .collect();

        let width = lines.first().map(|l| l.chars().count()).ok_or(PatternError::Empty)?;
        let mut cells = Vec::with_capacity(width * lines.len());

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(PatternError::RaggedRow {
                    row,
                    found,
                    expected: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '1' | 'O' | '#' => cells.push(true),
                    '0' | '.' => cells.push(false),
                    _ => return Err(PatternError::InvalidCharacter { ch, row, col }),
                }
            }
        }

        Ok(Self {
            width,
            height: lines.len(),
            cells,
        })
    }

    /// Load a pattern from a text file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Look up one of the built-in patterns by name
    pub fn named(name: &str) -> Result<Self, PatternError> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, text)| Self::parse(text))
            .unwrap_or_else(|| Err(PatternError::UnknownName(name.to_string())))
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Stamp the living cells onto a grid with the pattern's top-left corner
    /// at `(origin_x, origin_y)`. Returns how many cells landed on the grid.
    pub fn place(&self, grid: &mut AutomatonGrid, origin_x: i64, origin_y: i64) -> usize {
        let mut placed = 0;
        for (i, _) in self.cells.iter().enumerate().filter(|(_, alive)| **alive) {
            let x = origin_x + (i % self.width) as i64;
            let y = origin_y + (i / self.width) as i64;
            if grid.contains(x, y) {
                placed += 1;
            }
            grid.set_alive(x, y);
        }
        placed
    }

    /// Origin that centres this pattern on the grid
    pub fn centered_origin(&self, grid: &AutomatonGrid) -> (i64, i64) {
        (
            (grid.width() as i64 - self.width as i64) / 2,
            (grid.height() as i64 - self.height as i64) / 2,
        )
    }
}

/// Current generation of a grid in pattern text form
pub fn snapshot(grid: &AutomatonGrid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));
    for row in grid.cells().chunks(grid.width().max(1)) {
        result.extend(row.iter().map(|&cell| if cell { 'O' } else { '.' }));
        result.push('\n');
    }
    result
}

/// Save the current generation of a grid to a text file
pub fn save_snapshot<P: AsRef<Path>>(grid: &AutomatonGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = format!("! generation {}\n{}", grid.generation(), snapshot(grid));
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write snapshot to file: {}", path.display()))?;

    Ok(())
}

/// Write the built-in patterns as text files into a directory
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, text) in BUILTIN {
        let path = dir.join(format!("{}.txt", name));
        std::fs::write(&path, format!("! {}\n{}", name, text))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_pattern() {
        let pattern = Pattern::parse("! a comment\n010\n\n101\n.O.\n").unwrap();
        assert_eq!(pattern.width, 3);
        assert_eq!(pattern.height, 3);
        assert_eq!(pattern.living_count(), 4);
        assert_eq!(
            pattern.cells,
            vec![false, true, false, true, false, true, false, true, false]
        );
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            Pattern::parse("010\n1X1\n"),
            Err(PatternError::InvalidCharacter { ch: 'X', row: 1, col: 1 })
        ));
        assert!(matches!(
            Pattern::parse("010\n11\n"),
            Err(PatternError::RaggedRow { row: 1, found: 2, expected: 3 })
        ));
        assert!(matches!(Pattern::parse("! only a comment\n"), Err(PatternError::Empty)));
        assert!(matches!(Pattern::named("spaceship"), Err(PatternError::UnknownName(_))));
        assert!(matches!(
            Pattern::load("/definitely/missing/pattern.txt"),
            Err(PatternError::Io { .. })
        ));
    }

    #[test]
    fn test_builtin_patterns_parse() {
        for name in Pattern::builtin_names() {
            assert!(Pattern::named(name).is_ok(), "{} should parse", name);
        }
        assert_eq!(Pattern::named("glider").unwrap().living_count(), 5);
    }

    #[test]
    fn test_place_clips_to_grid() {
        let block = Pattern::named("block").unwrap();
        let mut grid = AutomatonGrid::new(4, 4);

        assert_eq!(block.place(&mut grid, 1, 1), 4);
        assert_eq!(grid.live_cell_count(), 4);

        let mut grid = AutomatonGrid::new(4, 4);
        assert_eq!(block.place(&mut grid, 3, -1), 1);
        assert!(grid.is_alive(3, 0));
        assert_eq!(grid.live_cell_count(), 1);
    }

    #[test]
    fn test_centered_origin() {
        let glider = Pattern::named("glider").unwrap();
        let grid = AutomatonGrid::new(400, 400);
        assert_eq!(glider.centered_origin(&grid), (198, 198));
    }

    #[test]
    fn test_snapshot_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out/snapshot.txt");

        let mut grid = AutomatonGrid::new(5, 5);
        Pattern::named("blinker").unwrap().place(&mut grid, 1, 2);
        grid.step();
        save_snapshot(&grid, &path).unwrap();

        let loaded = Pattern::load(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (5, 5));
        assert_eq!(loaded.cells, grid.cells());
        assert_eq!(snapshot(&grid).lines().nth(1), Some("..O.."));
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in ["glider", "blinker", "block", "beacon"] {
            assert!(temp_dir.path().join(format!("{}.txt", name)).exists());
        }

        let beacon = Pattern::load(temp_dir.path().join("beacon.txt")).unwrap();
        assert_eq!(beacon.living_count(), 8);
    }
}
