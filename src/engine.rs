use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::catalog::{Catalog, Problem};
use crate::config::engine::EngineConfig;
use crate::mastery::{MasterySnapshot, MasteryStore, Progress};
use crate::paths::{self, LearningPath};
use crate::readiness::{self, TopicReadiness};
use crate::recommend::{self, KnowledgeGap, ProblemRecommendation, TopicRecommendation};

/// The tutoring engine: one instance per app load, handed to whatever needs it.
///
/// `process_response` is the only mutator; every other operation is a fresh read
/// of the current mastery state.
#[derive(Debug, Clone)]
pub struct LearningEngine {
    catalog: Arc<Catalog>,
    mastery: MasteryStore,
    config: EngineConfig,
}

impl LearningEngine {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let mastery = MasteryStore::new(&catalog);
        tracing::info!(topics = catalog.topics().len(), decay = ?config.decay, "Learning engine created");
        Self {
            catalog,
            mastery,
            config,
        }
    }

    /// Engine using the process-wide config from `tutor.toml`.
    pub fn with_default_config(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, crate::config::engine::get_engine_config().clone())
    }

    pub fn from_snapshot(catalog: Arc<Catalog>, config: EngineConfig, snapshot: MasterySnapshot) -> Self {
        let mastery = MasteryStore::restore(&catalog, snapshot);
        Self {
            catalog,
            mastery,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mastery_store(&self) -> &MasteryStore {
        &self.mastery
    }

    pub fn snapshot(&self) -> MasterySnapshot {
        self.mastery.snapshot()
    }

    pub fn process_response(&mut self, problem: &Problem, is_correct: bool, time_spent_seconds: u32) {
        self.process_response_at(problem, is_correct, time_spent_seconds, Utc::now());
    }

    pub fn process_response_at(
        &mut self,
        problem: &Problem,
        is_correct: bool,
        time_spent_seconds: u32,
        now: DateTime<Utc>,
    ) {
        tracing::info!(
            problem_id = %problem.id,
            is_correct = is_correct,
            time_spent_seconds = time_spent_seconds,
            "Processing response"
        );
        self.mastery
            .process_response_at(problem, is_correct, time_spent_seconds, now, &self.config);
    }

    pub fn topic_mastery(&self, topic_id: &str) -> f64 {
        self.mastery.mastery(topic_id)
    }

    pub fn progress(&self) -> Progress {
        self.mastery.progress(self.config.mastered_threshold)
    }

    pub fn analyze_topic_readiness(&self, topic_id: &str) -> Option<TopicReadiness> {
        readiness::analyze_topic_readiness(&self.catalog, &self.mastery, &self.config, topic_id)
    }

    pub fn generate_learning_paths(&self, target_topic_id: &str, available_time_minutes: u32) -> Vec<LearningPath> {
        paths::generate_learning_paths(
            &self.catalog,
            &self.mastery,
            &self.config,
            target_topic_id,
            available_time_minutes,
        )
    }

    pub fn identify_knowledge_gaps(&self, problem: &Problem) -> Vec<KnowledgeGap> {
        self.identify_knowledge_gaps_at(problem, Utc::now())
    }

    pub fn identify_knowledge_gaps_at(&self, problem: &Problem, now: DateTime<Utc>) -> Vec<KnowledgeGap> {
        recommend::identify_knowledge_gaps(&self.catalog, &self.mastery, &self.config, problem, now)
    }

    pub fn recommended_problems(&self, limit: usize) -> Vec<ProblemRecommendation> {
        self.recommended_problems_at(limit, Utc::now())
    }

    pub fn recommended_problems_at(&self, limit: usize, now: DateTime<Utc>) -> Vec<ProblemRecommendation> {
        recommend::recommended_problems(&self.catalog, &self.mastery, &self.config, limit, now)
    }

    pub fn recommended_topics(&self, limit: usize, target_topic_id: Option<&str>) -> Vec<TopicRecommendation> {
        self.recommended_topics_at(limit, target_topic_id, Utc::now())
    }

    pub fn recommended_topics_at(
        &self,
        limit: usize,
        target_topic_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<TopicRecommendation> {
        recommend::recommended_topics(&self.catalog, &self.mastery, &self.config, limit, target_topic_id, now)
    }
}
