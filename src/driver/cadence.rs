//! Step pacing policy

use crate::config::{CadenceConfig, CadenceMode};
use std::fmt;
use std::time::{Duration, Instant};

/// How often the frame driver advances the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CadencePolicy {
    /// Step once `interval` has elapsed since the previous step
    WallClock {
        interval: Duration,
        min: Duration,
        max: Duration,
        adjust: Duration,
    },
    /// Step on every `every`-th frame
    FrameCount { every: u32, max_every: u32 },
}

#[derive(Debug, Clone)]
pub struct StepCadence {
    policy: CadencePolicy,
    last_step: Option<Instant>,
    frames_since_step: u32,
}

impl StepCadence {
    pub fn new(policy: CadencePolicy) -> Self {
        Self {
            policy,
            last_step: None,
            frames_since_step: 0,
        }
    }

    pub fn wall_clock(interval: Duration) -> Self {
        Self::new(CadencePolicy::WallClock {
            interval,
            min: Duration::from_millis(200),
            max: Duration::from_millis(4900),
            adjust: Duration::from_millis(100),
        })
    }

    pub fn frame_count(every: u32) -> Self {
        Self::new(CadencePolicy::FrameCount {
            every: every.max(1),
            max_every: u32::MAX,
        })
    }

    pub fn from_config(config: &CadenceConfig) -> Self {
        let policy = match config.mode {
            CadenceMode::WallClock => {
                let min = Duration::from_millis(config.min_interval_ms);
                let max = Duration::from_millis(config.max_interval_ms).max(min);
                CadencePolicy::WallClock {
                    interval: Duration::from_millis(config.interval_ms).max(min).min(max),
                    min,
                    max,
                    adjust: Duration::from_millis(config.adjust_ms),
                }
            }
            CadenceMode::FrameCount => {
                let max_every = config.max_frames_per_step.max(1);
                CadencePolicy::FrameCount {
                    every: config.frames_per_step.max(1).min(max_every),
                    max_every,
                }
            }
        };
        Self::new(policy)
    }

    pub fn policy(&self) -> &CadencePolicy {
        &self.policy
    }

    /// Register a running frame and report whether a step is due.
    ///
    /// The first frame seen only anchors the wall clock, so the first step
    /// comes one full interval after the driver starts running.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.policy {
            CadencePolicy::WallClock { interval, .. } => {
                let anchor = *self.last_step.get_or_insert(now);
                now.saturating_duration_since(anchor) >= interval
            }
            CadencePolicy::FrameCount { every, .. } => {
                self.frames_since_step = self.frames_since_step.saturating_add(1);
                self.frames_since_step >= every
            }
        }
    }

    /// Reset the pacing state after the grid was stepped
    pub fn mark_stepped(&mut self, now: Instant) {
        self.last_step = Some(now);
        self.frames_since_step = 0;
    }

    /// Shorten the wait between steps, clamped to the configured bounds
    pub fn faster(&mut self) {
        match &mut self.policy {
            CadencePolicy::WallClock {
                interval,
                min,
                adjust,
                ..
            } => *interval = interval.saturating_sub(*adjust).max(*min),
            CadencePolicy::FrameCount { every, .. } => *every = every.saturating_sub(1).max(1),
        }
    }

    /// Lengthen the wait between steps, clamped to the configured bounds
    pub fn slower(&mut self) {
        match &mut self.policy {
            CadencePolicy::WallClock {
                interval,
                max,
                adjust,
                ..
            } => *interval = interval.saturating_add(*adjust).min(*max),
            CadencePolicy::FrameCount { every, max_every } => {
                *every = every.saturating_add(1).min(*max_every)
            }
        }
    }
}

impl fmt::Display for StepCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.policy {
            CadencePolicy::WallClock { interval, .. } => {
                write!(f, "every {}ms", interval.as_millis())
            }
            CadencePolicy::FrameCount { every, .. } => write!(f, "every {} frames", every),
        }
    }
}
