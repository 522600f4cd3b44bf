use crate::{error::Error, pose::PoseFrame};
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// One line of recorded pose-model output.
///
/// Accepts either a bare landmark array or a results object carrying `poseLandmarks`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FrameRecord {
    Landmarks(PoseFrame),
    /// `pose_landmarks` is `None` when the key is absent and `Some(None)` when it is `null`.
    Results {
        #[serde(rename = "poseLandmarks", default, deserialize_with = "present")]
        pose_landmarks: Option<Option<PoseFrame>>,
    },
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<PoseFrame>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl FrameRecord {
    /// Parse a single line; `null` and results without a pose yield `None`.
    pub fn parse(line: &str, line_num: usize) -> Result<Option<PoseFrame>, Error> {
        let record: Option<Self> =
            serde_json::from_str(line).map_err(|e| Error::ParseFrame(e, line_num))?;
        if let Some(Self::Results {
            pose_landmarks: None,
        }) = &record
        {
            debug!(line_num, "results object has no poseLandmarks key");
        }
        Ok(record.and_then(Self::into_frame))
    }

    pub fn into_frame(self) -> Option<PoseFrame> {
        match self {
            Self::Landmarks(frame) => Some(frame),
            Self::Results { pose_landmarks } => pose_landmarks.flatten(),
        }
    }
}
