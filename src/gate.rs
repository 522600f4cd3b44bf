use crate::{
    error::Error,
    metric::Requirements,
    pose::{LandmarkKind, PoseFrame},
};

pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Rejects frames whose required landmarks are not confidently observed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisibilityGate {
    min_visibility: f32,
}

impl VisibilityGate {
    pub fn new(min_visibility: f32) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&min_visibility) {
            return Err(Error::InvalidVisibility(min_visibility));
        }
        Ok(Self { min_visibility })
    }

    #[inline]
    pub fn min_visibility(&self) -> f32 {
        self.min_visibility
    }

    fn is_visible(&self, frame: &PoseFrame, kind: LandmarkKind) -> bool {
        frame.get(kind).is_visible(self.min_visibility)
    }

    /// Whether every landmark in `all`, and at least one full group in `any`, is visible.
    pub fn passes(&self, frame: &PoseFrame, requirements: &Requirements) -> bool {
        let all_visible = requirements
            .all
            .iter()
            .all(|&kind| self.is_visible(frame, kind));
        let any_visible = requirements.any.is_empty()
            || requirements
                .any
                .iter()
                .any(|group| group.iter().all(|&kind| self.is_visible(frame, kind)));
        all_visible && any_visible
    }

    /// Required landmarks that are below the visibility threshold.
    pub fn missing(&self, frame: &PoseFrame, requirements: &Requirements) -> Vec<LandmarkKind> {
        let mut missing: Vec<_> = requirements
            .all
            .iter()
            .chain(requirements.any.iter().flat_map(|group| group.iter()))
            .copied()
            .filter(|&kind| !self.is_visible(frame, kind))
            .collect();
        missing.dedup();
        missing
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}
