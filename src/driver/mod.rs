//! Frame driving: pacing policy and the session that feeds input into a grid

pub mod cadence;
pub mod session;

pub use cadence::{CadencePolicy, StepCadence};
pub use session::{FrameOutcome, InputEvent, Scale, Session};
