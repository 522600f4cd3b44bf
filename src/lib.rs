//! Squat repetition counting from a stream of pose landmarks.
//!
//! Each frame runs through a visibility gate, a metric strategy, a standing-baseline
//! calibrator and a four-stage hysteresis machine. [`RepDetector::process`] is pure: callers
//! thread the returned [`LogicState`] into the next call, or let a [`Session`] do it.

pub mod calibration;
pub mod config;
pub mod detector;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod metric;
pub mod pose;
pub mod record;
pub mod session;
pub mod stage;

pub use config::Config;
pub use detector::{LogicState, Outcome, RepDetector};
pub use error::Error;
pub use feedback::Feedback;
pub use pose::{Landmark, LandmarkKind, PoseFrame};
pub use session::Session;
pub use stage::{Phase, Stage};
