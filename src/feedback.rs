use std::fmt;

/// User-facing status labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Feedback {
    GetReady,
    ShowFullBody,
    AdjustCamera,
    StandUpToCalibrate,
    Ready,
    GoingDown,
    GoodDepth,
    Reset,
    GoLower,
    ComingUp,
    Hold,
    RepCompleted,
    PushUp,
}

impl Feedback {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetReady => "Get Ready",
            Self::ShowFullBody => "Show Full Body",
            Self::AdjustCamera => "Adjust Camera",
            Self::StandUpToCalibrate => "Stand Up to Calibrate",
            Self::Ready => "Ready",
            Self::GoingDown => "Going Down...",
            Self::GoodDepth => "Good Depth!",
            Self::Reset => "Reset",
            Self::GoLower => "Go Lower",
            Self::ComingUp => "Coming Up...",
            Self::Hold => "Hold...",
            Self::RepCompleted => "Rep Completed",
            Self::PushUp => "Push Up",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
