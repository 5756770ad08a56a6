//! vetnlp Configuration Management
//!
//! Handles configuration from environment variables and TOML files with
//! sensible defaults. The scoring increments and question weights are policy
//! choices, not domain truth, so they live here rather than in code.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    /// Text extraction tunables
    pub extraction: ExtractionConfig,

    /// Disease matcher tunables
    pub matcher: MatcherConfig,

    /// Follow-up question tunables
    pub questions: QuestionConfig,
}

impl AnalyzerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(window) = std::env::var("VETNLP_CONTEXT_WINDOW") {
            config.extraction.context_window =
                window.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "VETNLP_CONTEXT_WINDOW".to_string(),
                    value: window,
                })?;
        }
        if let Ok(inc) = std::env::var("VETNLP_SYMPTOM_INCREMENT") {
            config.matcher.symptom_increment =
                inc.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "VETNLP_SYMPTOM_INCREMENT".to_string(),
                    value: inc,
                })?;
        }
        if let Ok(max) = std::env::var("VETNLP_MAX_QUESTIONS") {
            config.questions.max_questions =
                max.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "VETNLP_MAX_QUESTIONS".to_string(),
                    value: max,
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break scoring invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.context_window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "extraction.context_window".to_string(),
                value: "0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.matcher.symptom_increment) {
            return Err(ConfigError::InvalidValue {
                key: "matcher.symptom_increment".to_string(),
                value: self.matcher.symptom_increment.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.questions.visibility_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "questions.visibility_threshold".to_string(),
                value: self.questions.visibility_threshold.to_string(),
            });
        }
        if self.questions.max_questions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "questions.max_questions".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Text extraction tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Bytes of context kept on each side of a symptom match
    pub context_window: usize,

    /// Words scanned before a match for negation cues
    pub negation_window: usize,

    /// Maximum key phrases reported per analysis
    pub key_phrase_cap: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: 100,
            negation_window: 3,
            key_phrase_cap: 10,
        }
    }
}

/// Disease matcher tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Confidence added per matched symptom, on top of the disease's base
    /// offset; the sum is clamped into [0, 1]
    pub symptom_increment: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            symptom_increment: 0.1,
        }
    }
}

/// Follow-up question tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    /// Hard cap on emitted questions
    pub max_questions: usize,

    /// Weight of the missing field's criticality score
    pub criticality_weight: i32,

    /// Weight of the associated disease's severity
    pub disease_severity_weight: i32,

    /// Weight of the associated symptom's severity
    pub symptom_severity_weight: i32,

    /// Minimum confidence for a disease to receive confirmation questions
    pub visibility_threshold: f32,

    /// Disease matches considered for confirmation questions
    pub max_diseases: usize,
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            max_questions: 8,
            criticality_weight: 2,
            disease_severity_weight: 1,
            symptom_severity_weight: 1,
            visibility_threshold: 0.4,
            max_diseases: 3,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Malformed pattern for {key}: {pattern} ({message})")]
    InvalidPattern {
        key: String,
        pattern: String,
        message: String,
    },
}
