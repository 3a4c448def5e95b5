use serde::{Deserialize, Serialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Weight used when ranking practice problems.
    pub fn problem_weight(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 2.0,
            Difficulty::Hard => 3.0,
        }
    }

    /// Multiplier used by the thorough path strategy.
    pub fn thorough_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.2,
            Difficulty::Hard => 1.5,
        }
    }
}

/// Weighted edge from a topic to one of its prerequisites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerequisite {
    pub topic_id: String,
    pub weight: f64,
    pub required_mastery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    pub difficulty: Difficulty,
    pub estimated_time_minutes: u32,
    pub impact_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "deserialize_solution")]
    pub solution: String,
    pub required_topics: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hints: Vec<String>,
}

// Solutions are authored either as one string or as a list of steps
fn deserialize_solution<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct SolutionVisitor;

    impl<'de> Visitor<'de> for SolutionVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an array of solution steps")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut steps = Vec::new();
            while let Some(step) = seq.next_element::<String>()? {
                steps.push(step);
            }
            Ok(steps.join("\n"))
        }
    }

    deserializer.deserialize_any(SolutionVisitor)
}
