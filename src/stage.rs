use crate::{error::Error, feedback::Feedback};
use serde::Deserialize;
use std::fmt;

/// Hysteresis band edges, as fractions of the calibrated baseline.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub descend: f32,
    pub bottom: f32,
    pub ascend: f32,
    pub reset: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            descend: 0.85,
            bottom: 0.70,
            ascend: 0.85,
            reset: 0.95,
        }
    }
}

impl Thresholds {
    pub fn validate(self) -> Result<Self, Error> {
        let Self {
            descend,
            bottom,
            ascend,
            reset,
        } = self;
        if 0.0 < bottom && bottom < descend && descend < reset && bottom < ascend && ascend < reset
        {
            Ok(self)
        } else {
            Err(Error::InvalidThresholds {
                descend,
                bottom,
                ascend,
                reset,
            })
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Descending,
    Bottom,
    Ascending,
}

/// Coarse two-state view of [`Stage`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Up,
    Down,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transition {
    pub stage: Stage,
    pub is_rep: bool,
    pub feedback: Feedback,
}

impl Transition {
    fn to(stage: Stage, feedback: Feedback) -> Self {
        Self {
            stage,
            is_rep: false,
            feedback,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Idle
    }
}

impl Stage {
    /// Advance the machine given the current metric as a fraction of the baseline.
    ///
    /// A repetition is reported only on the `Ascending` to `Idle` edge.
    pub fn step(self, ratio: f32, thresholds: &Thresholds) -> Transition {
        use Feedback::*;
        use Stage::*;

        match self {
            Idle if ratio < thresholds.descend => Transition::to(Descending, GoingDown),
            Idle => Transition::to(Idle, Ready),
            Descending if ratio < thresholds.bottom => Transition::to(Bottom, GoodDepth),
            Descending if ratio > thresholds.reset => Transition::to(Idle, Reset),
            Descending => Transition::to(Descending, GoLower),
            Bottom if ratio > thresholds.ascend => Transition::to(Ascending, ComingUp),
            Bottom => Transition::to(Bottom, Hold),
            Ascending if ratio > thresholds.reset => Transition {
                stage: Idle,
                is_rep: true,
                feedback: RepCompleted,
            },
            Ascending if ratio < thresholds.bottom => Transition::to(Bottom, GoodDepth),
            Ascending => Transition::to(Ascending, PushUp),
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            Self::Idle | Self::Ascending => Phase::Up,
            Self::Descending | Self::Bottom => Phase::Down,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "IDLE",
            Self::Descending => "DESCENDING",
            Self::Bottom => "BOTTOM",
            Self::Ascending => "ASCENDING",
        })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(stage: Stage, ratio: f32) -> Transition {
        stage.step(ratio, &Thresholds::default())
    }

    mod step_tests {
        use super::*;
        use Feedback::*;
        use Stage::*;

        #[test]
        fn idle() {
            assert_eq!(step(Idle, 0.84), Transition::to(Descending, GoingDown));
            assert_eq!(step(Idle, 0.85), Transition::to(Idle, Ready));
            assert_eq!(step(Idle, 1.0), Transition::to(Idle, Ready));
        }

        #[test]
        fn descending() {
            assert_eq!(step(Descending, 0.69), Transition::to(Bottom, GoodDepth));
            assert_eq!(step(Descending, 0.96), Transition::to(Idle, Reset));
            assert_eq!(step(Descending, 0.95), Transition::to(Descending, GoLower));
            assert_eq!(step(Descending, 0.70), Transition::to(Descending, GoLower));
        }

        #[test]
        fn bottom() {
            assert_eq!(step(Bottom, 0.86), Transition::to(Ascending, ComingUp));
            assert_eq!(step(Bottom, 0.85), Transition::to(Bottom, Hold));
            assert_eq!(step(Bottom, 0.5), Transition::to(Bottom, Hold));
        }

        #[test]
        fn ascending() {
            assert_eq!(
                step(Ascending, 0.96),
                Transition {
                    stage: Idle,
                    is_rep: true,
                    feedback: RepCompleted
                }
            );
            assert_eq!(step(Ascending, 0.69), Transition::to(Bottom, GoodDepth));
            assert_eq!(step(Ascending, 0.95), Transition::to(Ascending, PushUp));
            assert_eq!(step(Ascending, 0.70), Transition::to(Ascending, PushUp));
        }

        #[test]
        fn only_ascending_to_idle_counts() {
            let ratios = [0.0, 0.5, 0.7, 0.8, 0.85, 0.9, 0.95, 1.0, 1.2];
            for &stage in &[Idle, Descending, Bottom, Ascending] {
                for &ratio in &ratios {
                    let transition = step(stage, ratio);
                    assert_eq!(
                        transition.is_rep,
                        stage == Ascending && transition.stage == Idle,
                        "{:?} at {}",
                        stage,
                        ratio
                    );
                }
            }
        }
    }

    #[test]
    fn jitter_inside_band_never_counts() {
        let mut stage = Stage::Idle;
        let mut reps = 0;
        for i in 0..500 {
            // oscillate between 0.72 and 0.94, never crossing bottom or reset
            let ratio = 0.83 + 0.11 * (i as f32 * 0.7).sin();
            let transition = step(stage, ratio);
            reps += usize::from(transition.is_rep);
            stage = transition.stage;
        }
        assert_eq!(stage, Stage::Descending);
        assert_eq!(reps, 0);
    }

    #[test]
    fn phase_projection() {
        assert_eq!(Stage::Idle.phase(), Phase::Up);
        assert_eq!(Stage::Descending.phase(), Phase::Down);
        assert_eq!(Stage::Bottom.phase(), Phase::Down);
        assert_eq!(Stage::Ascending.phase(), Phase::Up);
    }

    mod thresholds_tests {
        use super::*;

        #[test]
        fn defaults_are_valid() {
            assert!(Thresholds::default().validate().is_ok());
        }

        #[test]
        fn rejects_inverted_bands() {
            let thresholds = Thresholds {
                bottom: 0.9,
                ..Default::default()
            };
            assert!(matches!(
                thresholds.validate(),
                Err(Error::InvalidThresholds { .. })
            ));

            let thresholds = Thresholds {
                reset: 0.8,
                ..Default::default()
            };
            assert!(thresholds.validate().is_err());
        }

        #[test]
        fn deserializes_partial_table() {
            let thresholds: Thresholds = toml::from_str("bottom = 0.6").unwrap();
            assert_eq!(thresholds.bottom, 0.6);
            assert_eq!(thresholds.reset, 0.95);
        }
    }
}
