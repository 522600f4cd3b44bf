use crate::{error::Error, gate::DEFAULT_MIN_VISIBILITY, metric::Strategy, stage::Thresholds};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Landmarks below this visibility count as not observed.
    pub min_visibility: f32,
    pub thresholds: Thresholds,
    pub calibration: CalibrationConfig,
    pub metric: Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalibrationConfig {
    /// Metric values above this never set or raise the standing baseline.
    pub baseline_ceiling: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
            thresholds: Thresholds::default(),
            calibration: CalibrationConfig::default(),
            metric: Strategy::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| Error::ReadConfig(e, path.to_path_buf()))?;
        toml::from_str(&content).map_err(|e| Error::ParseConfig(e, path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{KneeAngle, LegTorsoRatio};

    #[test]
    fn empty_file_is_default() {
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }

    #[test]
    fn parses_full_file() {
        let config: Config = toml::from_str(
            r#"
            min_visibility = 0.6

            [thresholds]
            descend = 0.8
            reset = 0.97

            [calibration]
            baseline_ceiling = 3.0

            [metric]
            kind = "knee-angle"
            standing_floor = 150.0
            "#,
        )
        .unwrap();
        assert_eq!(config.min_visibility, 0.6);
        assert_eq!(config.thresholds.descend, 0.8);
        assert_eq!(config.thresholds.bottom, 0.7);
        assert_eq!(config.thresholds.reset, 0.97);
        assert_eq!(config.calibration.baseline_ceiling, Some(3.0));
        assert_eq!(
            config.metric,
            Strategy::KneeAngle(KneeAngle {
                standing_floor: 150.0,
                ..Default::default()
            })
        );
    }

    #[test]
    fn metric_defaults_to_leg_torso_ratio() {
        let config: Config = toml::from_str("min_visibility = 0.4").unwrap();
        assert_eq!(
            config.metric,
            Strategy::LegTorsoRatio(LegTorsoRatio::default())
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Config>("min_visiblity = 0.4").is_err());
        assert!(toml::from_str::<Config>("[thresholds]\nbotom = 0.6").is_err());
        assert!(toml::from_str::<Config>(
            r#"
            [metric]
            kind = "leg-torso-ratio"
            standing_flor = 2.0
            "#
        )
        .is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/squat-counter.toml"),
            Err(Error::ReadConfig(..))
        ));
    }
}
