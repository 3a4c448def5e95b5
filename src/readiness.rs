use serde::{Serialize, Deserialize};
use crate::catalog::Catalog;
use crate::config::engine::EngineConfig;
use crate::mastery::MasteryStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPrerequisite {
    pub topic_id: String,
    pub weight: f64,
    pub required_mastery: f64,
    pub current_mastery: f64,
    pub gap: f64,
}

impl MissingPrerequisite {
    /// How much this prerequisite holds the dependent topic back.
    pub fn severity(&self) -> f64 {
        self.weight * self.gap
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicReadiness {
    pub topic_id: String,
    pub readiness: f64,
    pub missing_prerequisites: Vec<MissingPrerequisite>,
    pub total_readiness_impact: f64,
}

/// Weighted prerequisite gap for a topic. `None` when the topic is unknown.
///
/// The impact is normalized by the weight of every prerequisite, satisfied or not.
pub fn analyze_topic_readiness(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    topic_id: &str,
) -> Option<TopicReadiness> {
    let topic = catalog.topic(topic_id)?;

    let mut total_weight = 0.0;
    let mut weighted_gap_sum = 0.0;
    let mut missing_prerequisites = Vec::new();

    for prereq in &topic.prerequisites {
        let current_mastery = mastery.mastery(&prereq.topic_id);
        let gap = (prereq.required_mastery - current_mastery).max(0.0);
        total_weight += prereq.weight;

        if gap > config.gap_noise_threshold {
            weighted_gap_sum += gap * prereq.weight;
            missing_prerequisites.push(MissingPrerequisite {
                topic_id: prereq.topic_id.clone(),
                weight: prereq.weight,
                required_mastery: prereq.required_mastery,
                current_mastery,
                gap,
            });
        }
    }

    let total_readiness_impact = if total_weight > 0.0 {
        (weighted_gap_sum / total_weight).min(1.0)
    } else {
        0.0
    };

    Some(TopicReadiness {
        topic_id: topic.id.clone(),
        readiness: 1.0 - total_readiness_impact,
        missing_prerequisites,
        total_readiness_impact,
    })
}
