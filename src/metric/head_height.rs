use crate::{
    metric::{Metric, Requirements},
    pose::{LandmarkKind::Nose, PoseFrame},
};
use ordered_float::NotNan;
use serde::Deserialize;

const DEFAULT_LINE: &str = "1.0";
const DEFAULT_MIN_HEIGHT: &str = "0.05";
const DEFAULT_STANDING_FLOOR: &str = "0.5";

#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadHeight {
    /// Normalized y of the reference line; 1.0 is the bottom edge of the frame.
    #[structopt(long, default_value = DEFAULT_LINE)]
    pub line: f32,
    /// Heights below this are treated as degenerate.
    #[structopt(long, default_value = DEFAULT_MIN_HEIGHT)]
    pub min_height: f32,
    /// Heights must exceed this to calibrate the standing baseline.
    #[structopt(long, default_value = DEFAULT_STANDING_FLOOR)]
    pub standing_floor: f32,
}

impl Default for HeadHeight {
    fn default() -> Self {
        Self {
            line: DEFAULT_LINE.parse().unwrap(),
            min_height: DEFAULT_MIN_HEIGHT.parse().unwrap(),
            standing_floor: DEFAULT_STANDING_FLOOR.parse().unwrap(),
        }
    }
}

impl Metric for HeadHeight {
    fn measure(&self, frame: &PoseFrame, _min_visibility: f32) -> Option<NotNan<f32>> {
        let height = self.line - frame.get(Nose).y();
        if height < self.min_height {
            None
        } else {
            NotNan::new(height).ok()
        }
    }

    fn standing_floor(&self) -> f32 {
        self.standing_floor
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            all: &[Nose],
            any: &[],
        }
    }
}
