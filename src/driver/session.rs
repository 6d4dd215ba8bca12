//! Frame driver that owns a grid and turns input into grid edits and steps

use super::StepCadence;
use crate::config::Settings;
use crate::game_of_life::AutomatonGrid;
use std::time::Instant;
use tracing::{debug, info};

/// Input already decoded by whatever windowing or terminal layer sits on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary pointer button held at pixel coordinates
    PointerPressed { px: i64, py: i64 },
    TogglePause,
    Faster,
    Slower,
    ZoomIn,
    ZoomOut,
    Clear,
}

/// What happened during a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub stepped: bool,
    pub generation: u64,
    pub live_cells: usize,
}

/// Pixels per cell edge, kept inside `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    value: u32,
    min: u32,
    max: u32,
}

impl Scale {
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    fn zoom_in(&mut self) {
        self.value = self.value.saturating_add(1).min(self.max);
    }

    fn zoom_out(&mut self) {
        self.value = self.value.saturating_sub(1).max(self.min);
    }

    /// Grid cell under a pixel
    pub fn to_cell(&self, px: i64, py: i64) -> (i64, i64) {
        let s = self.value as i64;
        (px.div_euclid(s), py.div_euclid(s))
    }
}

pub struct Session {
    grid: AutomatonGrid,
    cadence: StepCadence,
    scale: Scale,
    paused: bool,
}

impl Session {
    /// Create a paused session around a grid
    pub fn new(grid: AutomatonGrid, cadence: StepCadence, scale: Scale) -> Self {
        Self {
            grid,
            cadence,
            scale,
            paused: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let grid = AutomatonGrid::with_border_policy(
            settings.grid.width,
            settings.grid.height,
            settings.grid.border_policy,
        );
        let display = &settings.display;
        Self::new(
            grid,
            StepCadence::from_config(&settings.cadence),
            Scale::new(display.scale, display.min_scale, display.max_scale),
        )
    }

    pub fn grid(&self) -> &AutomatonGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut AutomatonGrid {
        &mut self.grid
    }

    pub fn cadence(&self) -> &StepCadence {
        &self.cadence
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn scale(&self) -> u32 {
        self.scale.value()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPressed { px, py } => {
                let (x, y) = self.scale.to_cell(px, py);
                self.grid.set_alive(x, y);
            }
            InputEvent::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "toggled pause");
            }
            InputEvent::Faster => {
                self.cadence.faster();
                debug!(cadence = %self.cadence, "cadence changed");
            }
            InputEvent::Slower => {
                self.cadence.slower();
                debug!(cadence = %self.cadence, "cadence changed");
            }
            InputEvent::ZoomIn => self.scale.zoom_in(),
            InputEvent::ZoomOut => self.scale.zoom_out(),
            InputEvent::Clear => {
                self.grid.clear();
                debug!(generation = self.grid.generation(), "grid cleared");
            }
        }
    }

    /// Run one frame: step the grid if running and the cadence says so
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        if self.paused || !self.cadence.tick(now) {
            return self.outcome(false);
        }
        self.advance(now)
    }

    /// Step immediately, ignoring pause state and cadence
    pub fn step_now(&mut self, now: Instant) -> FrameOutcome {
        self.advance(now)
    }

    fn advance(&mut self, now: Instant) -> FrameOutcome {
        self.grid.step();
        self.cadence.mark_stepped(now);

        let outcome = self.outcome(true);
        info!(
            generation = outcome.generation,
            living_cells = outcome.live_cells,
            cadence = %self.cadence,
            "generation advanced"
        );
        outcome
    }

    fn outcome(&self, stepped: bool) -> FrameOutcome {
        FrameOutcome {
            stepped,
            generation: self.grid.generation(),
            live_cells: self.grid.live_cell_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session(width: usize, height: usize, scale: u32) -> Session {
        Session::new(
            AutomatonGrid::new(width, height),
            StepCadence::wall_clock(Duration::from_millis(200)),
            Scale::new(scale, 1, 16),
        )
    }

    #[test]
    fn test_starts_paused_and_does_not_step() {
        let mut s = session(8, 8, 4);
        let now = Instant::now();
        assert!(s.is_paused());

        let outcome = s.frame(now + Duration::from_secs(10));
        assert!(!outcome.stepped);
        assert_eq!(s.grid().generation(), 0);
    }

    #[test]
    fn test_pointer_translates_by_scale() {
        let mut s = session(8, 8, 4);
        s.handle(InputEvent::PointerPressed { px: 9, py: 13 });
        assert!(s.grid().is_alive(2, 3));

        s.handle(InputEvent::PointerPressed { px: -1, py: 0 });
        s.handle(InputEvent::PointerPressed { px: 32, py: 0 });
        assert_eq!(s.grid().live_cell_count(), 1);
    }

    #[test]
    fn test_runs_on_cadence() {
        let mut s = session(8, 8, 4);
        for (px, py) in [(8, 12), (12, 12), (16, 12)] {
            s.handle(InputEvent::PointerPressed { px, py });
        }
        s.handle(InputEvent::TogglePause);

        let start = Instant::now();
        assert!(!s.frame(start).stepped);
        assert!(!s.frame(start + Duration::from_millis(100)).stepped);

        let outcome = s.frame(start + Duration::from_millis(200));
        assert!(outcome.stepped);
        assert_eq!(outcome.generation, 1);
        assert_eq!(outcome.live_cells, 3);
        assert!(s.grid().is_alive(3, 2) && s.grid().is_alive(3, 4));

        s.handle(InputEvent::TogglePause);
        assert!(!s.frame(start + Duration::from_secs(5)).stepped);
    }

    #[test]
    fn test_step_now_ignores_pause() {
        let mut s = session(8, 8, 4);
        let outcome = s.step_now(Instant::now());
        assert!(outcome.stepped);
        assert_eq!(outcome.generation, 1);
        assert!(s.is_paused());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut s = session(8, 8, 2);
        s.handle(InputEvent::ZoomOut);
        s.handle(InputEvent::ZoomOut);
        assert_eq!(s.scale(), 1);

        for _ in 0..40 {
            s.handle(InputEvent::ZoomIn);
        }
        assert_eq!(s.scale(), 16);
    }

    #[test]
    fn test_speed_and_clear_events() {
        let mut s = session(8, 8, 1);
        s.handle(InputEvent::Slower);
        assert_eq!(s.cadence().to_string(), "every 300ms");
        s.handle(InputEvent::Faster);
        s.handle(InputEvent::Faster);
        assert_eq!(s.cadence().to_string(), "every 200ms");

        s.handle(InputEvent::PointerPressed { px: 3, py: 3 });
        s.handle(InputEvent::Clear);
        assert_eq!(s.grid().live_cell_count(), 0);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.grid.width = 32;
        settings.grid.height = 16;
        let s = Session::from_settings(&settings);
        assert_eq!((s.grid().width(), s.grid().height()), (32, 16));
        assert_eq!(s.scale(), 8);
        assert_eq!(s.cadence().to_string(), "every 2000ms");
    }

    #[test]
    fn test_zoom_in_at_largest_scale() {
        let mut scale = Scale::new(u32::MAX, 1, u32::MAX);
        scale.zoom_in();
        assert_eq!(scale.value(), u32::MAX);
        assert_eq!(scale.to_cell(u32::MAX as i64, 0), (1, 0));
    }

    #[test]
    fn test_scale_new_sanitises_bounds() {
        let scale = Scale::new(0, 0, 0);
        assert_eq!(scale.value(), 1);
        assert_eq!(scale.to_cell(5, -1), (5, -1));
    }
}
