use crate::{
    metric::{point::Point, Metric, Requirements},
    pose::{LandmarkKind, LandmarkKind::*, PoseFrame},
};
use ordered_float::NotNan;
use serde::Deserialize;

const DEFAULT_MIN_SEGMENT_LENGTH: &str = "0.02";
const DEFAULT_STANDING_FLOOR: &str = "160";

const LEGS: [[LandmarkKind; 3]; 2] = [
    [LeftHip, LeftKnee, LeftAnkle],
    [RightHip, RightKnee, RightAnkle],
];
const LEG_GROUPS: [&[LandmarkKind]; 2] = [&LEGS[0], &LEGS[1]];

#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KneeAngle {
    /// Thigh or shin segments shorter than this (normalized units) are ignored.
    #[structopt(long, default_value = DEFAULT_MIN_SEGMENT_LENGTH)]
    pub min_segment_length: f32,
    /// Angles (degrees) must exceed this to calibrate the standing baseline.
    #[structopt(long, default_value = DEFAULT_STANDING_FLOOR)]
    pub standing_floor: f32,
}

impl Default for KneeAngle {
    fn default() -> Self {
        Self {
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH.parse().unwrap(),
            standing_floor: DEFAULT_STANDING_FLOOR.parse().unwrap(),
        }
    }
}

impl KneeAngle {
    fn leg_angle(
        &self,
        frame: &PoseFrame,
        leg: &[LandmarkKind; 3],
        min_visibility: f32,
    ) -> Option<f32> {
        let [hip, knee, ankle] = *leg;
        if !leg.iter().all(|&kind| frame.get(kind).is_visible(min_visibility)) {
            return None;
        }
        let hip = Point::from(frame.get(hip));
        let knee = Point::from(frame.get(knee));
        let ankle = Point::from(frame.get(ankle));

        let min_squared = self.min_segment_length.powi(2);
        if knee.squared_distance(hip) < min_squared || knee.squared_distance(ankle) < min_squared {
            return None;
        }
        Some(knee.angle_between(hip, ankle))
    }
}

impl Metric for KneeAngle {
    fn measure(&self, frame: &PoseFrame, min_visibility: f32) -> Option<NotNan<f32>> {
        let (sum, count) = LEGS
            .iter()
            .filter_map(|leg| self.leg_angle(frame, leg, min_visibility))
            .fold((0.0, 0_u8), |(sum, count), angle| (sum + angle, count + 1));
        if count == 0 {
            None
        } else {
            NotNan::new(sum / f32::from(count)).ok()
        }
    }

    fn standing_floor(&self) -> f32 {
        self.standing_floor
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            all: &[],
            any: &LEG_GROUPS,
        }
    }
}
