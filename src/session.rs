use crate::{
    detector::{LogicState, Outcome, RepDetector},
    feedback::Feedback,
    metric::{Metric, Strategy},
    pose::PoseFrame,
    stage::{Phase, Stage},
};

/// Caller-side bookkeeping for one tracked person.
///
/// Owns the [`LogicState`] threaded through the detector, the repetition count, and the last
/// feedback shown to the user.
#[derive(Debug, Clone)]
pub struct Session<M = Strategy> {
    detector: RepDetector<M>,
    state: LogicState,
    reps: usize,
    frames: usize,
    feedback: Feedback,
}

impl<M> Session<M>
where
    M: Metric,
{
    pub fn new(detector: RepDetector<M>) -> Self {
        Self {
            detector,
            state: LogicState::default(),
            reps: 0,
            frames: 0,
            feedback: Feedback::GetReady,
        }
    }

    /// Feed one frame. Frames without a detected pose leave the session untouched.
    pub fn observe(&mut self, frame: Option<&PoseFrame>) -> Option<Outcome> {
        let frame = frame?;
        let outcome = self.detector.process(frame, self.state);
        self.frames += 1;
        self.state = outcome.state;
        self.reps += usize::from(outcome.is_rep);
        self.feedback = outcome.feedback;
        Some(outcome)
    }

    /// Start over with a fresh state and count.
    pub fn reset(&mut self) {
        self.state = LogicState::default();
        self.reps = 0;
        self.frames = 0;
        self.feedback = Feedback::GetReady;
    }

    pub fn reps(&self) -> usize {
        self.reps
    }

    /// Number of frames that contained a pose.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn state(&self) -> LogicState {
        self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn phase(&self) -> Phase {
        self.state.stage.phase()
    }

    pub fn detector(&self) -> &RepDetector<M> {
        &self.detector
    }
}
