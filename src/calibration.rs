use crate::error::Error;
use ordered_float::NotNan;

/// Result of feeding one metric value to the calibrator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Calibration {
    /// No baseline yet and the pose is not clearly standing.
    Uncalibrated,
    /// First baseline accepted on this frame.
    Established(NotNan<f32>),
    /// Baseline already known; holds the (possibly raised) value.
    Tracking(NotNan<f32>),
}

impl Calibration {
    pub fn baseline(self) -> Option<NotNan<f32>> {
        match self {
            Self::Uncalibrated => None,
            Self::Established(baseline) | Self::Tracking(baseline) => Some(baseline),
        }
    }
}

/// Tracks the tallest observed standing metric for a session.
///
/// The baseline only grows. An optional ceiling keeps a single implausible reading from
/// raising it; without one, a spurious high value persists until calibration is reset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibrator {
    standing_floor: f32,
    ceiling: Option<f32>,
}

impl Calibrator {
    pub fn new(standing_floor: f32, ceiling: Option<f32>) -> Result<Self, Error> {
        // baselines strictly exceed the floor, so they stay positive
        if !(standing_floor >= 0.0) {
            return Err(Error::InvalidStandingFloor(standing_floor));
        }
        match ceiling {
            Some(ceiling) if ceiling.is_nan() || ceiling <= standing_floor => {
                Err(Error::InvalidBaselineCeiling {
                    ceiling,
                    floor: standing_floor,
                })
            }
            _ => Ok(Self {
                standing_floor,
                ceiling,
            }),
        }
    }

    #[inline]
    pub fn standing_floor(&self) -> f32 {
        self.standing_floor
    }

    #[inline]
    pub fn ceiling(&self) -> Option<f32> {
        self.ceiling
    }

    fn is_plausible(&self, metric: NotNan<f32>) -> bool {
        self.ceiling.map_or(true, |ceiling| *metric <= ceiling)
    }

    pub fn calibrate(&self, metric: NotNan<f32>, baseline: Option<NotNan<f32>>) -> Calibration {
        let plausible = self.is_plausible(metric);
        match baseline {
            None if plausible && *metric > self.standing_floor => Calibration::Established(metric),
            None => Calibration::Uncalibrated,
            Some(baseline) if plausible => Calibration::Tracking(baseline.max(metric)),
            Some(baseline) => Calibration::Tracking(baseline),
        }
    }
}
