use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use crate::catalog::{Catalog, Problem};
use crate::config::engine::EngineConfig;
use crate::engine::LearningEngine;
use crate::error::TutorError;
use crate::persistence::{self, KeyValueStore};
use crate::preferences::{PreferencesUpdate, UserPreferences};

/// Application-wide state container.
/// Built once at startup and cloned into every component that needs the engine;
/// clones share the same engine, preferences and store.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<LearningEngine>>,
    preferences: Arc<RwLock<UserPreferences>>,
    store: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl AppState {
    pub fn new(engine: LearningEngine, store: Box<dyn KeyValueStore>) -> Self {
        AppState {
            engine: Arc::new(RwLock::new(engine)),
            preferences: Arc::new(RwLock::new(UserPreferences::default())),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Rebuild state from whatever the store holds, starting fresh where it holds nothing.
    pub fn restore(
        catalog: Arc<Catalog>,
        config: EngineConfig,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, TutorError> {
        let snapshot = persistence::load_mastery(&*store)?;
        let preferences = persistence::load_preferences(&*store)?.unwrap_or_default();

        let engine = match snapshot {
            Some(snapshot) => {
                tracing::info!(records = snapshot.records.len(), "Restored mastery snapshot");
                LearningEngine::from_snapshot(catalog, config, snapshot)
            }
            None => LearningEngine::new(catalog, config),
        };

        Ok(AppState {
            engine: Arc::new(RwLock::new(engine)),
            preferences: Arc::new(RwLock::new(preferences)),
            store: Arc::new(Mutex::new(store)),
        })
    }

    /// Run a read-only query against the engine.
    pub fn with_engine<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&LearningEngine) -> R,
    {
        f(&self.engine.read())
    }

    /// Grade an attempt and persist the updated mastery.
    pub fn submit_attempt(
        &self,
        problem: &Problem,
        is_correct: bool,
        time_spent_seconds: u32,
    ) -> Result<(), TutorError> {
        let snapshot = {
            let mut engine = self.engine.write();
            engine.process_response(problem, is_correct, time_spent_seconds);
            engine.snapshot()
        };
        persistence::save_mastery(&mut **self.store.lock(), &snapshot)
    }

    /// Look up a problem by id and grade it.
    pub fn submit_attempt_by_id(
        &self,
        problem_id: &str,
        is_correct: bool,
        time_spent_seconds: u32,
    ) -> Result<(), TutorError> {
        let problem = self
            .with_engine(|engine| engine.catalog().problem(problem_id).cloned())
            .ok_or_else(|| TutorError::new(
                format!("Unknown problem '{}'", problem_id),
                "state"
            ))?;
        self.submit_attempt(&problem, is_correct, time_spent_seconds)
    }

    pub fn get_preferences(&self) -> UserPreferences {
        self.preferences.read().clone()
    }

    /// Merge a partial update and persist the result.
    pub fn update_preferences(&self, update: PreferencesUpdate) -> Result<UserPreferences, TutorError> {
        let updated = {
            let mut prefs = self.preferences.write();
            prefs.apply(update);
            prefs.clone()
        };
        persistence::save_preferences(&mut **self.store.lock(), &updated)?;
        Ok(updated)
    }
}
