//! Display and output formatting utilities

use crate::game_of_life::AutomatonGrid;
use crate::report::RunReport;
use itertools::Itertools;

/// Format grids for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a whole grid in compact form
    pub fn format_grid_compact(grid: &AutomatonGrid) -> String {
        Self::format_window(grid, 0, 0, grid.width(), grid.height())
    }

    /// Format a `w` x `h` viewport whose top-left cell is `(x, y)`.
    /// Cells past the grid edge are left out.
    pub fn format_window(grid: &AutomatonGrid, x: usize, y: usize, w: usize, h: usize) -> String {
        let x_end = (x + w).min(grid.width());
        let y_end = (y + h).min(grid.height());

        let mut output = String::new();
        for row in y..y_end {
            for col in x..x_end {
                output.push(if grid.is_alive(col as i64, row as i64) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Viewport of at most `max_w` x `max_h` cells around the living cells,
    /// with a one cell margin. Falls back to the top-left corner when empty.
    pub fn format_around_life(grid: &AutomatonGrid, max_w: usize, max_h: usize) -> String {
        let (x, y, w, h) = match grid.bounding_box() {
            Some((min_x, min_y, max_x, max_y)) => {
                let x = min_x.saturating_sub(1);
                let y = min_y.saturating_sub(1);
                (x, y, (max_x + 2 - x).min(max_w), (max_y + 2 - y).min(max_h))
            }
            None => (0, 0, max_w, max_h),
        };
        Self::format_window(grid, x, y, w, h)
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &AutomatonGrid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        output.push_str(&(0..grid.width()).map(|x| format!("{:2}", x % 10)).join(""));
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width().max(1)).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Living-cell counts as a one line sparkline
    pub fn format_history(report: &RunReport) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let peak = report.peak_living.max(1);
        report
            .live_history
            .iter()
            .map(|&n| BARS[(n * (BARS.len() - 1)) / peak])
            .collect()
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(true)
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RunRecorder;

    fn sample_grid() -> AutomatonGrid {
        let mut grid = AutomatonGrid::new(3, 3);
        for (x, y) in [(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)] {
            grid.set_alive(x, y);
        }
        grid
    }

    #[test]
    fn test_grid_formatting() {
        let grid = sample_grid();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
        assert_eq!(with_coords.lines().count(), 4);
    }

    #[test]
    fn test_window_clips_to_grid() {
        let grid = sample_grid();
        assert_eq!(GridFormatter::format_window(&grid, 1, 1, 5, 5), "█·\n·█\n");
    }

    #[test]
    fn test_format_around_life() {
        let mut grid = AutomatonGrid::new(100, 100);
        grid.set_alive(50, 50);
        grid.set_alive(51, 50);
        assert_eq!(GridFormatter::format_around_life(&grid, 80, 40), "····\n·██·\n····\n");

        let empty = AutomatonGrid::new(100, 100);
        let text = GridFormatter::format_around_life(&empty, 4, 2);
        assert_eq!(text, "····\n····\n");
    }

    #[test]
    fn test_history_sparkline() {
        let mut grid = AutomatonGrid::new(8, 8);
        grid.set_alive(3, 3);
        let mut recorder = RunRecorder::new(&grid);
        grid.step();
        recorder.record(&grid);
        let report = recorder.finish(&grid);
        assert_eq!(GridFormatter::format_history(&report), "▁");
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Blue);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::warning("careful").contains("careful"));
    }
}
