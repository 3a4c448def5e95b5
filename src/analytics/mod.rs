use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::engine::LearningEngine;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub avg_time_seconds: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    pub topics: BTreeMap<String, TopicStats>,
    pub total_attempts: usize,
    pub total_correct: usize,
    pub overall_accuracy: f64,
}

/// Summarize the attempt log per required topic.
pub fn compute_analytics(engine: &LearningEngine) -> AnalyticsPayload {
    let catalog = engine.catalog();
    let attempts = engine.mastery_store().attempts();

    let mut topics: BTreeMap<String, TopicStats> = BTreeMap::new();
    let mut time_sums: BTreeMap<String, u64> = BTreeMap::new();

    for attempt in attempts {
        // Problems removed from the catalog since the attempt still count toward totals
        let Some(problem) = catalog.problem(&attempt.problem_id) else { continue };
        for topic_id in &problem.required_topics {
            let stats = topics.entry(topic_id.clone()).or_default();
            stats.attempts += 1;
            if attempt.is_correct {
                stats.correct += 1;
            }
            *time_sums.entry(topic_id.clone()).or_insert(0) += u64::from(attempt.time_spent_seconds);
        }
    }

    for (topic_id, stats) in topics.iter_mut() {
        if stats.attempts > 0 {
            stats.accuracy = stats.correct as f64 / stats.attempts as f64;
            let total_time = time_sums.get(topic_id).copied().unwrap_or(0);
            stats.avg_time_seconds = total_time as f64 / stats.attempts as f64;
        }
    }

    let total_attempts = attempts.len();
    let total_correct = attempts.iter().filter(|a| a.is_correct).count();
    let overall_accuracy = if total_attempts > 0 {
        total_correct as f64 / total_attempts as f64
    } else {
        0.0
    };

    AnalyticsPayload {
        topics,
        total_attempts,
        total_correct,
        overall_accuracy,
    }
}
