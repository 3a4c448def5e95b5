pub mod error;
pub mod logging;
pub mod config;
pub mod catalog;
pub mod mastery;
pub mod readiness;
pub mod paths;
pub mod recommend;
pub mod engine;
pub mod preferences;
pub mod persistence;
pub mod state;
pub mod analytics;
pub mod plan;

pub use catalog::{Catalog, Difficulty, Prerequisite, Problem, Topic};
pub use engine::LearningEngine;
pub use error::{CatalogError, TutorError};
pub use paths::{LearningPath, Strategy};
pub use state::AppState;

// Crate-internal test modules
#[cfg(test)]
#[path = "../tests/error_handling_test.rs"]
mod error_handling_test;
#[cfg(test)]
#[path = "../tests/config_test.rs"]
mod config_test;
