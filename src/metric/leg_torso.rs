use crate::{
    metric::{Metric, Requirements},
    pose::{LandmarkKind::*, PoseFrame},
};
use ordered_float::NotNan;
use serde::Deserialize;

const DEFAULT_MIN_TORSO_LENGTH: &str = "0.05";
const DEFAULT_STANDING_FLOOR: &str = "1.2";

#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegTorsoRatio {
    /// Torso lengths below this (normalized units) are treated as degenerate.
    #[structopt(long, default_value = DEFAULT_MIN_TORSO_LENGTH)]
    pub min_torso_length: f32,
    /// Ratios must exceed this to calibrate the standing baseline.
    #[structopt(long, default_value = DEFAULT_STANDING_FLOOR)]
    pub standing_floor: f32,
}

impl Default for LegTorsoRatio {
    fn default() -> Self {
        Self {
            min_torso_length: DEFAULT_MIN_TORSO_LENGTH.parse().unwrap(),
            standing_floor: DEFAULT_STANDING_FLOOR.parse().unwrap(),
        }
    }
}

#[inline]
fn mean(a: f32, b: f32) -> f32 {
    0.5 * (a + b)
}

impl Metric for LegTorsoRatio {
    fn measure(&self, frame: &PoseFrame, min_visibility: f32) -> Option<NotNan<f32>> {
        let shoulder_y = mean(frame.get(LeftShoulder).y(), frame.get(RightShoulder).y());
        let hip_y = mean(frame.get(LeftHip).y(), frame.get(RightHip).y());

        let left_ankle = frame.get(LeftAnkle);
        let right_ankle = frame.get(RightAnkle);
        let ankle_y = match (
            left_ankle.is_visible(min_visibility),
            right_ankle.is_visible(min_visibility),
        ) {
            (true, true) => mean(left_ankle.y(), right_ankle.y()),
            (true, false) => left_ankle.y(),
            (false, true) => right_ankle.y(),
            (false, false) => return None,
        };

        let torso = (hip_y - shoulder_y).abs();
        if torso < self.min_torso_length {
            return None;
        }
        let leg = (ankle_y - hip_y).abs();
        NotNan::new(leg / torso).ok()
    }

    fn standing_floor(&self) -> f32 {
        self.standing_floor
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            all: &[LeftShoulder, RightShoulder, LeftHip, RightHip],
            any: &[&[LeftAnkle], &[RightAnkle]],
        }
    }
}
