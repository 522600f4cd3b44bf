use crate::error::Error;
use num_traits::FromPrimitive;
use ordered_float::NotNan;
use serde::Deserialize;
use std::convert::TryFrom;

/// Body points in the order the pose model emits them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive)]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

pub const NUM_LANDMARKS: usize = LandmarkKind::RightFootIndex as usize + 1;

impl LandmarkKind {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToLandmarkKind(index))
    }
}

/// A single tracked body point in normalized image coordinates.
///
/// JSON cannot encode NaN, so deserialized landmarks skip the check in [`Landmark::new`].
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct Landmark {
    x: f32,
    y: f32,
    visibility: f32,
}

fn not_nan(value: f32) -> Result<f32, Error> {
    Ok(NotNan::new(value)
        .map_err(|e| Error::ConstructNotNan(e, value))?
        .into_inner())
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Result<Self, Error> {
        Ok(Self {
            x: not_nan(x)?,
            y: not_nan(y)?,
            visibility: not_nan(visibility)?,
        })
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Upstream rounding can push visibility slightly outside of [0, 1].
    #[inline]
    pub fn visibility(&self) -> f32 {
        self.visibility.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_visible(&self, min_visibility: f32) -> bool {
        self.visibility() >= min_visibility
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visibility: 0.0,
        }
    }
}

pub type Landmarks = [Landmark; NUM_LANDMARKS];

/// All landmarks for a single instant.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Landmark>")]
pub struct PoseFrame {
    landmarks: Landmarks,
}

impl PoseFrame {
    pub fn new(landmarks: Landmarks) -> Self {
        Self { landmarks }
    }

    #[inline]
    pub fn get(&self, kind: LandmarkKind) -> &Landmark {
        &self.landmarks[kind.idx()]
    }
}

impl TryFrom<Vec<Landmark>> for PoseFrame {
    type Error = Error;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        let len = landmarks.len();
        Landmarks::try_from(landmarks)
            .map(Self::new)
            .map_err(|_| Error::FrameLength(NUM_LANDMARKS, len))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    mod landmark_kind_tests {
        use super::*;

        #[test]
        fn fixed_indices() {
            assert_eq!(NUM_LANDMARKS, 33);
            assert_eq!(LandmarkKind::Nose.idx(), 0);
            assert_eq!(LandmarkKind::LeftShoulder.idx(), 11);
            assert_eq!(LandmarkKind::RightShoulder.idx(), 12);
            assert_eq!(LandmarkKind::LeftHip.idx(), 23);
            assert_eq!(LandmarkKind::RightHip.idx(), 24);
            assert_eq!(LandmarkKind::LeftAnkle.idx(), 27);
            assert_eq!(LandmarkKind::RightAnkle.idx(), 28);
        }

        #[test]
        fn round_trips_through_index() {
            for i in 0..NUM_LANDMARKS {
                assert_eq!(LandmarkKind::from_idx(i).unwrap().idx(), i);
            }
        }

        #[test]
        fn out_of_range_index() {
            assert!(matches!(
                LandmarkKind::from_idx(NUM_LANDMARKS),
                Err(Error::ConvertUSizeToLandmarkKind(33))
            ));
        }
    }

    mod landmark_tests {
        use super::*;

        #[test]
        fn rejects_nan() {
            assert!(matches!(
                Landmark::new(f32::NAN, 0.5, 1.0),
                Err(Error::ConstructNotNan(..))
            ));
        }

        #[test]
        fn clamps_visibility() {
            assert_eq!(Landmark::new(0.5, 0.5, 1.0001).unwrap().visibility(), 1.0);
            assert_eq!(Landmark::new(0.5, 0.5, -0.01).unwrap().visibility(), 0.0);
        }

        #[test]
        fn visibility_threshold_is_inclusive() {
            let landmark = Landmark::new(0.5, 0.5, 0.5).unwrap();
            assert!(landmark.is_visible(0.5));
            assert!(!landmark.is_visible(0.51));
        }
    }

    mod pose_frame_tests {
        use super::*;

        fn landmark_json(n: usize) -> String {
            let entries = vec![r#"{"x": 0.5, "y": 0.25, "z": -0.1, "visibility": 0.9}"#; n];
            format!("[{}]", entries.join(","))
        }

        #[test]
        fn deserializes_full_frame() {
            let frame: PoseFrame = serde_json::from_str(&landmark_json(NUM_LANDMARKS)).unwrap();
            let nose = frame.get(LandmarkKind::Nose);
            assert_eq!(nose.y(), 0.25);
            assert_eq!(nose.visibility(), 0.9);
        }

        #[test]
        fn rejects_short_frame() {
            assert!(serde_json::from_str::<PoseFrame>(&landmark_json(17)).is_err());
            assert!(matches!(
                PoseFrame::try_from(vec![Landmark::default(); 17]),
                Err(Error::FrameLength(33, 17))
            ));
        }
    }
}
