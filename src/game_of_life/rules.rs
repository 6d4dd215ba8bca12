//! Conway's B3/S23 rule

use super::AutomatonGrid;

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Next state of a cell given its current state and living neighbour count.
    ///
    /// A dead cell with exactly three neighbours is born, fewer than two or
    /// more than three neighbours kill the cell, anything else keeps its state.
    pub fn next_state(alive: bool, neighbors: u8) -> bool {
        match (alive, neighbors) {
            (false, 3) => true,
            (_, n) if n < 2 || n > 3 => false,
            (state, _) => state,
        }
    }

    /// Step a grid forward a number of generations
    pub fn advance(grid: &mut AutomatonGrid, generations: u64) {
        for _ in 0..generations {
            grid.step();
        }
    }

    /// Neighbour counts that bring a dead cell to life
    pub fn birth_neighbor_counts() -> Vec<u8> {
        vec![3]
    }

    /// Neighbour counts that keep a living cell alive
    pub fn survival_neighbor_counts() -> Vec<u8> {
        vec![2, 3]
    }

    /// Maximum neighbour count in the Moore neighbourhood
    pub fn max_neighbor_count() -> u8 {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert!(LifeRules::next_state(true, 2));
        assert!(LifeRules::next_state(true, 3));
        assert!(LifeRules::next_state(false, 3));
        assert!(!LifeRules::next_state(true, 1));
        assert!(!LifeRules::next_state(true, 4));
        assert!(!LifeRules::next_state(false, 2));
        assert!(!LifeRules::next_state(false, 0));
    }

    #[test]
    fn test_rule_matches_count_tables() {
        for n in 0..=LifeRules::max_neighbor_count() {
            assert_eq!(
                LifeRules::next_state(false, n),
                LifeRules::birth_neighbor_counts().contains(&n)
            );
            assert_eq!(
                LifeRules::next_state(true, n),
                LifeRules::survival_neighbor_counts().contains(&n)
            );
        }
    }

    #[test]
    fn test_advance_counts_generations() {
        let mut grid = AutomatonGrid::new(8, 8);
        for (x, y) in [(3, 4), (4, 4), (5, 4)] {
            grid.set_alive(x, y);
        }
        let start = grid.living_cells();

        LifeRules::advance(&mut grid, 4);
        assert_eq!(grid.generation(), 4);
        assert_eq!(grid.living_cells(), start);

        LifeRules::advance(&mut grid, 0);
        assert_eq!(grid.generation(), 4);
    }
}
