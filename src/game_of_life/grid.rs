//! Double-buffered automaton grid

use super::LifeRules;
use crate::config::BorderPolicy;
use itertools::Itertools;
use rayon::prelude::*;
use std::fmt;

/// A fixed-size Game of Life grid with a current buffer and a scratch buffer.
///
/// Consumers only ever see the current buffer. [`AutomatonGrid::step`] reads
/// the current buffer, writes the next generation into scratch and then flips
/// which buffer is current, so no cell is updated from a partially advanced
/// neighbourhood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonGrid {
    width: usize,
    height: usize,
    buffers: [Vec<bool>; 2],
    current: usize,
    generation: u64,
    border_policy: BorderPolicy,
}

impl AutomatonGrid {
    /// Create an all-dead grid with a frozen border
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_border_policy(width, height, BorderPolicy::Frozen)
    }

    /// Create an all-dead grid with the given border policy
    pub fn with_border_policy(width: usize, height: usize, border_policy: BorderPolicy) -> Self {
        Self {
            width,
            height,
            buffers: [vec![false; width * height], vec![false; width * height]],
            current: 0,
            generation: 0,
            border_policy,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn border_policy(&self) -> BorderPolicy {
        self.border_policy
    }

    /// Cells of the current generation in row-major order
    pub fn cells(&self) -> &[bool] {
        &self.buffers[self.current]
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Check whether signed coordinates fall inside the grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Mark a cell alive in the current generation. Out of range is a no-op.
    pub fn set_alive(&mut self, x: i64, y: i64) {
        self.write(x, y, true);
    }

    /// Mark a cell dead in the current generation. Out of range is a no-op.
    pub fn set_dead(&mut self, x: i64, y: i64) {
        self.write(x, y, false);
    }

    fn write(&mut self, x: i64, y: i64, value: bool) {
        if !self.contains(x, y) {
            return;
        }
        let idx = self.index(x as usize, y as usize);
        self.buffers[self.current][idx] = value;
    }

    /// Read a cell of the current generation; anything off the grid is dead
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.contains(x, y) && self.cells()[self.index(x as usize, y as usize)]
    }

    /// Count living Moore neighbours of a cell in the current generation
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        let wrap = self.border_policy == BorderPolicy::Wrap;
        count_neighbors_in(self.cells(), self.width, self.height, x, y, wrap)
    }

    /// Advance the whole grid by exactly one generation
    pub fn step(&mut self) {
        let width = self.width;
        let height = self.height;
        let policy = self.border_policy;

        let (front, back) = self.buffers.split_at_mut(1);
        let (current, scratch) = if self.current == 0 {
            (&front[0], &mut back[0])
        } else {
            (&back[0], &mut front[0])
        };

        scratch
            .par_chunks_mut(width.max(1))
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let alive = current[y * width + x];
                    let interior = x >= 1 && x + 1 < width && y >= 1 && y + 1 < height;

                    *cell = match policy {
                        BorderPolicy::Wrap => {
                            let n = count_neighbors_in(current, width, height, x, y, true);
                            LifeRules::next_state(alive, n)
                        }
                        _ if interior => {
                            let n = count_neighbors_in(current, width, height, x, y, false);
                            LifeRules::next_state(alive, n)
                        }
                        BorderPolicy::Frozen => alive,
                        BorderPolicy::Dead => false,
                    };
                }
            });

        self.current ^= 1;
        self.generation += 1;
    }

    /// Count living cells in the current generation
    pub fn live_cell_count(&self) -> usize {
        self.cells().iter().filter(|&&cell| cell).count()
    }

    /// Coordinates `(x, y)` of every living cell, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .iter()
            .positions(|&cell| cell)
            .map(|i| (i % self.width, i / self.width))
            .collect()
    }

    /// Smallest `(min_x, min_y, max_x, max_y)` box holding every living cell
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let living = self.living_cells();
        let (min_x, max_x) = living.iter().map(|&(x, _)| x).minmax().into_option()?;
        let (min_y, max_y) = living.iter().map(|&(_, y)| y).minmax().into_option()?;
        Some((min_x, min_y, max_x, max_y))
    }

    /// Kill every cell in both buffers. The generation counter is kept.
    pub fn clear(&mut self) {
        for buffer in self.buffers.iter_mut() {
            buffer.fill(false);
        }
    }
}

fn count_neighbors_in(
    cells: &[bool],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    wrap: bool,
) -> u8 {
    let mut count = 0;

    for dy in [-1isize, 0, 1] {
        for dx in [-1isize, 0, 1] {
            if dx == 0 && dy == 0 {
                continue;
            }

            let nx = x as isize + dx;
            let ny = y as isize + dy;

            let (nx, ny) = if wrap {
                (
                    nx.rem_euclid(width as isize) as usize,
                    ny.rem_euclid(height as isize) as usize,
                )
            } else if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            } else {
                (nx as usize, ny as usize)
            };

            if cells[ny * width + nx] {
                count += 1;
            }
        }
    }

    count
}

impl fmt::Display for AutomatonGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells().chunks(self.width.max(1)) {
            let line: String = row.iter().map(|&c| if c { '█' } else { '·' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
