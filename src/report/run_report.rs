//! Summary of a simulation run

use super::stability::{fingerprint, Stability, MAX_PERIOD};
use crate::config::BorderPolicy;
use crate::game_of_life::AutomatonGrid;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// Serialisable record of how a run went
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub width: usize,
    pub height: usize,
    pub border_policy: BorderPolicy,
    pub start_generation: u64,
    pub final_generation: u64,
    pub initial_living: usize,
    pub final_living: usize,
    pub peak_living: usize,
    /// Living cells after each recorded step
    pub live_history: Vec<usize>,
    pub stability: Stability,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Collects per-generation observations while a grid is being driven
#[derive(Debug)]
pub struct RunRecorder {
    started: Instant,
    start_generation: u64,
    initial_living: usize,
    live_history: Vec<usize>,
    fingerprints: VecDeque<u64>,
    stability: Stability,
}

impl RunRecorder {
    pub fn new(grid: &AutomatonGrid) -> Self {
        let living = grid.live_cell_count();
        Self {
            started: Instant::now(),
            start_generation: grid.generation(),
            initial_living: living,
            live_history: Vec::new(),
            fingerprints: VecDeque::from([fingerprint(grid)]),
            stability: Stability::classify(&[], living),
        }
    }

    /// Record the grid after a step
    pub fn record(&mut self, grid: &AutomatonGrid) {
        let living = grid.live_cell_count();
        self.live_history.push(living);

        if self.fingerprints.len() > MAX_PERIOD {
            self.fingerprints.pop_front();
        }
        self.fingerprints.push_back(fingerprint(grid));
        self.stability = Stability::classify(self.fingerprints.make_contiguous(), living);
    }

    pub fn generations_recorded(&self) -> u64 {
        self.live_history.len() as u64
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    pub fn finish(self, grid: &AutomatonGrid) -> RunReport {
        RunReport {
            width: grid.width(),
            height: grid.height(),
            border_policy: grid.border_policy(),
            start_generation: self.start_generation,
            final_generation: grid.generation(),
            initial_living: self.initial_living,
            final_living: grid.live_cell_count(),
            peak_living: self
                .live_history
                .iter()
                .copied()
                .chain(std::iter::once(self.initial_living))
                .max()
                .unwrap_or_default(),
            live_history: self.live_history,
            stability: self.stability,
            elapsed: self.started.elapsed(),
        }
    }
}

impl RunReport {
    pub fn generations_run(&self) -> u64 {
        self.final_generation - self.start_generation
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = self.to_json().context("Failed to serialize run report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to file: {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse report file: {}", path.display()))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Report:")?;
        writeln!(f, "  Grid: {}x{} ({:?} border)", self.width, self.height, self.border_policy)?;
        writeln!(
            f,
            "  Generations: {} -> {} ({} run)",
            self.start_generation,
            self.final_generation,
            self.generations_run()
        )?;
        writeln!(
            f,
            "  Living cells: {} -> {} (peak {})",
            self.initial_living, self.final_living, self.peak_living
        )?;
        writeln!(f, "  Outcome: {}", self.stability)?;
        write!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())
    }
}
