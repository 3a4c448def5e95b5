#![allow(dead_code)]

use std::sync::Arc;
use mathtutor_lib::catalog::{Catalog, Difficulty, Prerequisite, Problem, Topic};
use mathtutor_lib::config::engine::EngineConfig;
use mathtutor_lib::mastery::{MasteryRecord, MasterySnapshot};
use mathtutor_lib::LearningEngine;

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn topic(
    id: &str,
    prereqs: &[(&str, f64, f64)],
    difficulty: Difficulty,
    minutes: u32,
    impact: f64,
) -> Topic {
    Topic {
        id: id.to_string(),
        name: id.to_uppercase(),
        prerequisites: prereqs
            .iter()
            .map(|&(topic_id, weight, required_mastery)| Prerequisite {
                topic_id: topic_id.to_string(),
                weight,
                required_mastery,
            })
            .collect(),
        difficulty,
        estimated_time_minutes: minutes,
        impact_score: impact,
    }
}

pub fn problem(id: &str, required: &[&str], related: &[&str], difficulty: Difficulty) -> Problem {
    Problem {
        id: id.to_string(),
        question: format!("question {}", id),
        answer: "42".to_string(),
        solution: "work it out".to_string(),
        required_topics: required.iter().map(|s| s.to_string()).collect(),
        related_topics: related.iter().map(|s| s.to_string()).collect(),
        difficulty,
        hints: vec![],
    }
}

/// `A` has no prerequisites (30 minutes); `B` requires `A` with weight 0.8 and
/// required mastery 0.7 (20 minutes).
pub fn ab_catalog() -> Arc<Catalog> {
    let topics = vec![
        topic("A", &[], Difficulty::Easy, 30, 0.5),
        topic("B", &[("A", 0.8, 0.7)], Difficulty::Medium, 20, 0.6),
    ];
    let problems = vec![
        problem("pA", &["A"], &[], Difficulty::Easy),
        problem("pB", &["B"], &["A"], Difficulty::Hard),
    ];
    Arc::new(Catalog::new(topics, problems).unwrap())
}

pub fn engine(catalog: Arc<Catalog>) -> LearningEngine {
    LearningEngine::new(catalog, EngineConfig::default())
}

/// Engine whose mastery starts from the given values.
pub fn engine_with(catalog: Arc<Catalog>, mastery: &[(&str, f64)]) -> LearningEngine {
    let snapshot = MasterySnapshot {
        records: mastery
            .iter()
            .map(|&(id, m)| {
                (
                    id.to_string(),
                    MasteryRecord {
                        mastery: m,
                        last_practiced_at: None,
                    },
                )
            })
            .collect(),
        attempts: vec![],
    };
    LearningEngine::from_snapshot(catalog, EngineConfig::default(), snapshot)
}

pub fn practice(engine: &mut LearningEngine, problem_id: &str, correct: bool, times: usize) {
    let problem = engine.catalog().problem(problem_id).cloned().unwrap();
    for _ in 0..times {
        engine.process_response(&problem, correct, 60);
    }
}
