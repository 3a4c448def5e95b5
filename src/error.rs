use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

/// Unified error type for the tutoring engine.
/// Fallible edges (catalog loading, config, persistence) return Result<T, TutorError>.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl TutorError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        TutorError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for TutorError {}

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        TutorError::new(
            format!("I/O error: {}", err),
            "io"
        ).with_source("std::io")
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::new(
            format!("JSON error: {}", err),
            "json_parse"
        ).with_source("serde_json")
    }
}

impl From<toml::de::Error> for TutorError {
    fn from(err: toml::de::Error) -> Self {
        TutorError::new(
            format!("TOML error: {}", err),
            "config"
        ).with_source("toml")
    }
}

impl From<CatalogError> for TutorError {
    fn from(err: CatalogError) -> Self {
        TutorError::new(err.to_string(), "catalog").with_source("catalog validation")
    }
}

/// Structural problems found while validating a topic/problem catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate topic id '{0}'")]
    DuplicateTopic(String),

    #[error("duplicate problem id '{0}'")]
    DuplicateProblem(String),

    #[error("topic '{topic}' lists unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { topic: String, prerequisite: String },

    #[error("topic '{0}' lists itself as a prerequisite")]
    SelfPrerequisite(String),

    #[error("topic '{topic}': {field} must be within [0, 1], got {value}")]
    OutOfRange {
        topic: String,
        field: &'static str,
        value: f64,
    },

    #[error("problem '{problem}' references unknown topic '{topic}'")]
    UnknownProblemTopic { problem: String, topic: String },

    #[error("prerequisite cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}
