//! Detection of runs that have stopped changing

use crate::game_of_life::AutomatonGrid;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Longest oscillator period that is recognised
pub const MAX_PERIOD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stability {
    Extinct,
    StillLife,
    Oscillator { period: usize },
    Evolving,
}

impl Stability {
    /// Classify the newest of a sequence of generation fingerprints.
    ///
    /// `fingerprints` is ordered oldest first. Stepping is deterministic, so a
    /// single repeat of the newest fingerprint `p` generations back means the
    /// grid cycles with period `p` from then on.
    pub fn classify(fingerprints: &[u64], living: usize) -> Self {
        if living == 0 {
            return Stability::Extinct;
        }

        let Some((&newest, older)) = fingerprints.split_last() else {
            return Stability::Evolving;
        };

        older
            .iter()
            .rev()
            .take(MAX_PERIOD)
            .position(|&f| f == newest)
            .map(|i| match i + 1 {
                1 => Stability::StillLife,
                period => Stability::Oscillator { period },
            })
            .unwrap_or(Stability::Evolving)
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Stability::Evolving)
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Extinct => write!(f, "extinct"),
            Stability::StillLife => write!(f, "still life"),
            Stability::Oscillator { period } => write!(f, "oscillator (period {})", period),
            Stability::Evolving => write!(f, "evolving"),
        }
    }
}

/// Hash of the current generation's cells
pub fn fingerprint(grid: &AutomatonGrid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.cells().hash(&mut hasher);
    grid.width().hash(&mut hasher);
    hasher.finish()
}
