use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {0} landmarks per frame, got {1}")]
    FrameLength(usize, usize),

    #[error("failed to convert usize value to landmark kind: {0}")]
    ConvertUSizeToLandmarkKind(usize),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("failed to convert value to f64")]
    ConvertToF64,

    #[error(
        "invalid thresholds: need 0 < bottom ({bottom}) < descend ({descend}) < reset ({reset}) \
         and bottom < ascend ({ascend}) < reset"
    )]
    InvalidThresholds {
        descend: f32,
        bottom: f32,
        ascend: f32,
        reset: f32,
    },

    #[error("standing floor must be a non-negative number, got {0}")]
    InvalidStandingFloor(f32),

    #[error("baseline ceiling {ceiling} must exceed the standing floor {floor}")]
    InvalidBaselineCeiling { ceiling: f32, floor: f32 },

    #[error("minimum visibility must be within [0, 1], got {0}")]
    InvalidVisibility(f32),

    #[error("failed to read config file: {1:?}")]
    ReadConfig(#[source] std::io::Error, PathBuf),

    #[error("failed to parse config file: {1:?}")]
    ParseConfig(#[source] toml::de::Error, PathBuf),

    #[error("failed to read frame input")]
    ReadFrame(#[source] std::io::Error),

    #[error("failed to parse pose frame on line {1}")]
    ParseFrame(#[source] serde_json::Error, usize),
}
