use crate::{
    calibration::{Calibration, Calibrator},
    config::Config,
    error::Error,
    feedback::Feedback,
    gate::VisibilityGate,
    metric::{Metric, Strategy},
    pose::PoseFrame,
    stage::{Stage, Thresholds},
};
use ordered_float::NotNan;
use tracing::{debug, info, trace};

/// Per-session state threaded through [`RepDetector::process`] by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LogicState {
    pub stage: Stage,
    pub baseline: Option<NotNan<f32>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: LogicState,
    pub is_rep: bool,
    pub feedback: Feedback,
}

impl Outcome {
    fn degraded(state: LogicState, feedback: Feedback) -> Self {
        Self {
            state,
            is_rep: false,
            feedback,
        }
    }
}

/// Turns pose frames into stage transitions and repetition events.
///
/// The detector holds configuration only; every call to [`process`](Self::process) is a pure
/// function of the frame and the prior [`LogicState`].
#[derive(Debug, Clone)]
pub struct RepDetector<M = Strategy> {
    metric: M,
    gate: VisibilityGate,
    calibrator: Calibrator,
    thresholds: Thresholds,
}

impl RepDetector<Strategy> {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(
            config.metric,
            VisibilityGate::new(config.min_visibility)?,
            config.thresholds,
            config.calibration.baseline_ceiling,
        )
    }
}

impl<M> RepDetector<M>
where
    M: Metric,
{
    pub fn new(
        metric: M,
        gate: VisibilityGate,
        thresholds: Thresholds,
        baseline_ceiling: Option<f32>,
    ) -> Result<Self, Error> {
        let calibrator = Calibrator::new(metric.standing_floor(), baseline_ceiling)?;
        Ok(Self {
            metric,
            gate,
            calibrator,
            thresholds: thresholds.validate()?,
        })
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn process(&self, frame: &PoseFrame, state: LogicState) -> Outcome {
        let requirements = self.metric.requirements();
        if !self.gate.passes(frame, &requirements) {
            debug!(
                missing = ?self.gate.missing(frame, &requirements),
                stage = %state.stage,
                "required landmarks not visible, resetting calibration"
            );
            return Outcome::degraded(LogicState::default(), Feedback::ShowFullBody);
        }

        let metric = match self.metric.measure(frame, self.gate.min_visibility()) {
            Some(metric) => metric,
            None => {
                debug!(stage = %state.stage, "degenerate pose geometry");
                return Outcome::degraded(state, Feedback::AdjustCamera);
            }
        };
        trace!(metric = metric.into_inner());

        // no stage survives without a baseline
        let from = match state.baseline {
            Some(_) => state.stage,
            None => Stage::Idle,
        };
        let baseline = match self.calibrator.calibrate(metric, state.baseline) {
            Calibration::Uncalibrated => {
                return Outcome::degraded(
                    LogicState {
                        stage: Stage::Idle,
                        baseline: None,
                    },
                    Feedback::StandUpToCalibrate,
                );
            }
            Calibration::Established(baseline) => {
                info!(baseline = baseline.into_inner(), "calibrated standing baseline");
                baseline
            }
            Calibration::Tracking(baseline) => {
                if state.baseline != Some(baseline) {
                    debug!(baseline = baseline.into_inner(), "raised standing baseline");
                }
                baseline
            }
        };

        let ratio = metric.into_inner() / baseline.into_inner();
        let transition = from.step(ratio, &self.thresholds);
        if transition.stage != from {
            debug!(from = %from, to = %transition.stage, ratio, "stage transition");
        }
        if transition.is_rep {
            info!(ratio, "repetition completed");
        }

        Outcome {
            state: LogicState {
                stage: transition.stage,
                baseline: Some(baseline),
            },
            is_rep: transition.is_rep,
            feedback: transition.feedback,
        }
    }
}
