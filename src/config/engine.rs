use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::TutorError;

/// How prior mastery ages between practice sessions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecayPolicy {
    /// Deltas are added to the stored mastery as-is.
    #[default]
    None,
    /// Prior mastery is halved every `half_life_days` since it was last practiced,
    /// before the attempt's delta is applied.
    HalfLife { half_life_days: f64 },
}

/// Tunable constants of the mastery, readiness and recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub correct_delta: f64,
    pub incorrect_delta: f64,
    pub related_correct_delta: f64,
    pub related_incorrect_delta: f64,
    pub decay: DecayPolicy,
    /// Mastery at or above this counts as mastered in progress reports.
    pub mastered_threshold: f64,
    /// Prerequisites at or above this are treated as learned by the path generator.
    pub path_mastery_threshold: f64,
    /// Prerequisite gaps at or below this are noise.
    pub gap_noise_threshold: f64,
    pub low_mastery_threshold: f64,
    pub forgotten_after_days: i64,
    pub recent_practice_hours: i64,
    /// Minimum readiness for a topic to be suggested without a target.
    pub recommend_readiness_floor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            correct_delta: 0.1,
            incorrect_delta: -0.05,
            related_correct_delta: 0.02,
            related_incorrect_delta: -0.01,
            decay: DecayPolicy::None,
            mastered_threshold: 0.8,
            path_mastery_threshold: 0.9,
            gap_noise_threshold: 0.05,
            low_mastery_threshold: 0.3,
            forgotten_after_days: 30,
            recent_practice_hours: 24,
            recommend_readiness_floor: 0.7,
        }
    }
}

impl EngineConfig {
    /// Longest accepted "forgotten" window.
    pub const MAX_FORGOTTEN_DAYS: i64 = 36_500;
    /// Longest accepted "recently practiced" window.
    pub const MAX_RECENT_HOURS: i64 = 24 * 36_500;

    /// Parse a config from TOML text; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, TutorError> {
        let config = toml::from_str::<EngineConfig>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honor: deltas pointing the wrong way,
    /// thresholds outside [0, 1] and time windows chrono cannot represent.
    pub fn validate(&self) -> Result<(), TutorError> {
        let signed = [
            ("correct_delta", self.correct_delta, 0.0, 1.0),
            ("incorrect_delta", self.incorrect_delta, -1.0, 0.0),
            ("related_correct_delta", self.related_correct_delta, 0.0, 1.0),
            ("related_incorrect_delta", self.related_incorrect_delta, -1.0, 0.0),
        ];
        for (field, value, min, max) in signed {
            check_range(field, value, min, max)?;
        }

        let thresholds = [
            ("mastered_threshold", self.mastered_threshold),
            ("path_mastery_threshold", self.path_mastery_threshold),
            ("gap_noise_threshold", self.gap_noise_threshold),
            ("low_mastery_threshold", self.low_mastery_threshold),
            ("recommend_readiness_floor", self.recommend_readiness_floor),
        ];
        for (field, value) in thresholds {
            check_range(field, value, 0.0, 1.0)?;
        }

        if !(0..=Self::MAX_FORGOTTEN_DAYS).contains(&self.forgotten_after_days) {
            return Err(TutorError::new(
                format!("forgotten_after_days must be within 0..={}", Self::MAX_FORGOTTEN_DAYS),
                "config"
            ).with_context(format!("value: {}", self.forgotten_after_days)));
        }
        if !(0..=Self::MAX_RECENT_HOURS).contains(&self.recent_practice_hours) {
            return Err(TutorError::new(
                format!("recent_practice_hours must be within 0..={}", Self::MAX_RECENT_HOURS),
                "config"
            ).with_context(format!("value: {}", self.recent_practice_hours)));
        }

        if let DecayPolicy::HalfLife { half_life_days } = self.decay {
            if !(half_life_days.is_finite() && half_life_days > 0.0) {
                return Err(TutorError::new(
                    "decay.half_life_days must be a positive number",
                    "config"
                ).with_context(format!("value: {}", half_life_days)));
            }
        }
        Ok(())
    }

    /// Load a config file, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::info!(path = ?path, "Loaded engine config");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Invalid tutor.toml, using defaults");
                    EngineConfig::default()
                }
            },
            Err(e) => {
                tracing::debug!(path = ?path, error = %e, "No tutor.toml found, using defaults");
                EngineConfig::default()
            }
        }
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), TutorError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TutorError::new(
            format!("{} must be within [{}, {}]", field, min, max),
            "config"
        ).with_context(format!("value: {}", value)))
    }
}

fn get_config_path() -> PathBuf {
    crate::config::app_data_dir().join("tutor.toml")
}

lazy_static! {
    static ref ENGINE_CONFIG: EngineConfig = EngineConfig::load_or_default(&get_config_path());
}

/// Get the cached engine configuration (loaded once per process)
pub fn get_engine_config() -> &'static EngineConfig {
    &ENGINE_CONFIG
}
