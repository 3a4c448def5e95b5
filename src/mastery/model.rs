use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, HashMap};
use chrono::{DateTime, Utc};
use crate::catalog::{Catalog, Problem};
use crate::config::engine::{DecayPolicy, EngineConfig};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    pub mastery: f64,
    pub last_practiced_at: Option<DateTime<Utc>>,
}

/// One graded attempt, kept for analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub problem_id: String,
    pub is_correct: bool,
    pub time_spent_seconds: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub mastered: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub total: usize,
}

/// Serializable copy of the store's state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterySnapshot {
    pub records: BTreeMap<String, MasteryRecord>,
    #[serde(default)]
    pub attempts: Vec<AttemptRecord>,
}

/// Per-topic mastery scores. Only `process_response*` and `restore` change them.
#[derive(Debug, Clone, Default)]
pub struct MasteryStore {
    records: HashMap<String, MasteryRecord>,
    attempts: Vec<AttemptRecord>,
}

impl MasteryStore {
    /// A zeroed record for every topic in the catalog.
    pub fn new(catalog: &Catalog) -> Self {
        let records = catalog
            .topics()
            .iter()
            .map(|t| (t.id.clone(), MasteryRecord::default()))
            .collect();
        Self {
            records,
            attempts: Vec::new(),
        }
    }

    /// Rebuild a store from a snapshot. Values are clamped, ids the catalog doesn't know are
    /// dropped and topics missing from the snapshot start at zero.
    pub fn restore(catalog: &Catalog, snapshot: MasterySnapshot) -> Self {
        let mut store = Self::new(catalog);
        for (topic_id, record) in snapshot.records {
            match store.records.get_mut(&topic_id) {
                Some(slot) => {
                    *slot = MasteryRecord {
                        mastery: clamp_unit(record.mastery),
                        last_practiced_at: record.last_practiced_at,
                    };
                }
                None => {
                    tracing::warn!(topic_id = %topic_id, "Dropping mastery for unknown topic");
                }
            }
        }
        store.attempts = snapshot.attempts;
        store
    }

    pub fn snapshot(&self) -> MasterySnapshot {
        MasterySnapshot {
            records: self
                .records
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            attempts: self.attempts.clone(),
        }
    }

    pub fn process_response(
        &mut self,
        problem: &Problem,
        is_correct: bool,
        time_spent_seconds: u32,
        config: &EngineConfig,
    ) {
        self.process_response_at(problem, is_correct, time_spent_seconds, Utc::now(), config);
    }

    /// Apply a graded attempt as of `now`.
    pub fn process_response_at(
        &mut self,
        problem: &Problem,
        is_correct: bool,
        time_spent_seconds: u32,
        now: DateTime<Utc>,
        config: &EngineConfig,
    ) {
        self.attempts.push(AttemptRecord {
            problem_id: problem.id.clone(),
            is_correct,
            time_spent_seconds,
            at: now,
        });

        let delta = if is_correct { config.correct_delta } else { config.incorrect_delta };
        for topic_id in &problem.required_topics {
            let Some(record) = self.records.get_mut(topic_id) else {
                tracing::warn!(topic_id = %topic_id, problem_id = %problem.id, "Ignoring unknown required topic");
                continue;
            };
            let prior = match (config.decay, record.last_practiced_at) {
                (DecayPolicy::HalfLife { half_life_days }, Some(last)) if half_life_days > 0.0 => {
                    let elapsed_days = ((now - last).num_seconds() as f64 / 86_400.0).max(0.0);
                    record.mastery * 0.5_f64.powf(elapsed_days / half_life_days)
                }
                _ => record.mastery,
            };
            record.mastery = clamp_unit(prior + delta);
            record.last_practiced_at = Some(now);
            tracing::debug!(topic_id = %topic_id, delta = delta, mastery = record.mastery, "Updated mastery");
        }

        let related_delta = if is_correct {
            config.related_correct_delta
        } else {
            config.related_incorrect_delta
        };
        for topic_id in &problem.related_topics {
            if let Some(record) = self.records.get_mut(topic_id) {
                record.mastery = clamp_unit(record.mastery + related_delta);
            }
        }
    }

    /// Stored mastery, or 0 for topics that were never initialized.
    pub fn mastery(&self, topic_id: &str) -> f64 {
        self.records.get(topic_id).map(|r| r.mastery).unwrap_or(0.0)
    }

    pub fn last_practiced_at(&self, topic_id: &str) -> Option<DateTime<Utc>> {
        self.records.get(topic_id).and_then(|r| r.last_practiced_at)
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn progress(&self, mastered_threshold: f64) -> Progress {
        let mut progress = Progress {
            total: self.records.len(),
            ..Progress::default()
        };
        for record in self.records.values() {
            if record.mastery >= mastered_threshold {
                progress.mastered += 1;
            } else if record.mastery > 0.0 {
                progress.in_progress += 1;
            } else {
                progress.not_started += 1;
            }
        }
        progress
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
