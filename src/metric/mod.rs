use crate::pose::{LandmarkKind, PoseFrame};
use ordered_float::NotNan;
use serde::Deserialize;

mod head_height;
mod knee_angle;
mod leg_torso;
mod point;

pub use head_height::HeadHeight;
pub use knee_angle::KneeAngle;
pub use leg_torso::LegTorsoRatio;

/// Landmarks a metric needs to be confidently observed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// Every one of these must be visible.
    pub all: &'static [LandmarkKind],
    /// At least one of these groups must be fully visible, unless empty.
    pub any: &'static [&'static [LandmarkKind]],
}

pub trait Metric {
    /// Reduce a frame to a scalar that is high when standing and low when squatting.
    ///
    /// Returns `None` when the geometry is too degenerate to produce a meaningful value.
    fn measure(&self, frame: &PoseFrame, min_visibility: f32) -> Option<NotNan<f32>>;

    /// A value must exceed this to be accepted as a standing baseline.
    fn standing_floor(&self) -> f32;

    /// Landmarks the gate must see before `measure` is trusted.
    fn requirements(&self) -> Requirements;
}

#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Strategy {
    /// Vertical leg length relative to vertical torso length
    LegTorsoRatio(LegTorsoRatio),
    /// Hip-knee-ankle angle in degrees
    KneeAngle(KneeAngle),
    /// Nose height above a reference line
    HeadHeight(HeadHeight),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::LegTorsoRatio(LegTorsoRatio::default())
    }
}

impl Metric for Strategy {
    fn measure(&self, frame: &PoseFrame, min_visibility: f32) -> Option<NotNan<f32>> {
        match self {
            Self::LegTorsoRatio(m) => m.measure(frame, min_visibility),
            Self::KneeAngle(m) => m.measure(frame, min_visibility),
            Self::HeadHeight(m) => m.measure(frame, min_visibility),
        }
    }

    fn standing_floor(&self) -> f32 {
        match self {
            Self::LegTorsoRatio(m) => m.standing_floor(),
            Self::KneeAngle(m) => m.standing_floor(),
            Self::HeadHeight(m) => m.standing_floor(),
        }
    }

    fn requirements(&self) -> Requirements {
        match self {
            Self::LegTorsoRatio(m) => m.requirements(),
            Self::KneeAngle(m) => m.requirements(),
            Self::HeadHeight(m) => m.requirements(),
        }
    }
}
