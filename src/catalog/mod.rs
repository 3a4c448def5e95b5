pub mod model;
pub mod builtin;

pub use model::{Difficulty, Prerequisite, Problem, Topic};

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use serde::Deserialize;
use crate::error::{CatalogError, TutorError};

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    topics: Vec<Topic>,
    #[serde(default)]
    problems: Vec<Problem>,
}

/// Validated, immutable topic graph and problem bank.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
    problems: Vec<Problem>,
    topic_index: HashMap<String, usize>,
    problem_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting dangling references, out-of-range weights and cycles.
    pub fn new(topics: Vec<Topic>, problems: Vec<Problem>) -> Result<Self, CatalogError> {
        let mut topic_index = HashMap::with_capacity(topics.len());
        for (i, topic) in topics.iter().enumerate() {
            if topic_index.insert(topic.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateTopic(topic.id.clone()));
            }
        }

        for topic in &topics {
            check_unit(&topic.id, "impactScore", topic.impact_score)?;
            for prereq in &topic.prerequisites {
                if prereq.topic_id == topic.id {
                    return Err(CatalogError::SelfPrerequisite(topic.id.clone()));
                }
                if !topic_index.contains_key(&prereq.topic_id) {
                    return Err(CatalogError::UnknownPrerequisite {
                        topic: topic.id.clone(),
                        prerequisite: prereq.topic_id.clone(),
                    });
                }
                check_unit(&topic.id, "weight", prereq.weight)?;
                check_unit(&topic.id, "requiredMastery", prereq.required_mastery)?;
            }
        }

        let mut problem_index = HashMap::with_capacity(problems.len());
        for (i, problem) in problems.iter().enumerate() {
            if problem_index.insert(problem.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateProblem(problem.id.clone()));
            }
            for topic_id in problem.required_topics.iter().chain(problem.related_topics.iter()) {
                if !topic_index.contains_key(topic_id) {
                    return Err(CatalogError::UnknownProblemTopic {
                        problem: problem.id.clone(),
                        topic: topic_id.clone(),
                    });
                }
            }
        }

        let catalog = Catalog {
            topics,
            problems,
            topic_index,
            problem_index,
        };
        if let Some(cycle) = catalog.find_cycle() {
            return Err(CatalogError::Cycle(cycle));
        }
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json(content: &str) -> Result<Self, TutorError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let catalog = Catalog::new(file.topics, file.problems)?;
        tracing::debug!(
            topics = catalog.topics.len(),
            problems = catalog.problems.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a JSON catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, TutorError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TutorError::new(
                format!("Failed to read catalog: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))?;
        Self::from_json(&content)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topic_index.get(id).map(|&i| &self.topics[i])
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problem_index.get(id).map(|&i| &self.problems[i])
    }

    /// All topics the given topic depends on, directly or indirectly, in breadth-first order.
    /// The topic itself is never included. Unknown ids yield an empty list.
    pub fn transitive_prerequisites(&self, id: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(id);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            let Some(topic) = self.topic(current) else { continue };
            for prereq in &topic.prerequisites {
                if seen.insert(prereq.topic_id.as_str()) {
                    order.push(prereq.topic_id.clone());
                    queue.push_back(prereq.topic_id.as_str());
                }
            }
        }
        order
    }

    /// Problems that list the topic as required.
    pub fn problems_for_topic<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Problem> + 'a {
        self.problems
            .iter()
            .filter(move |p| p.required_topics.iter().any(|t| t == id))
    }

    fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.topics.len()];
        for start in 0..self.topics.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (topic index, next prerequisite to visit)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            marks[start] = Mark::InProgress;

            while let Some(&(node, next)) = stack.last() {
                let prereqs = &self.topics[node].prerequisites;
                if next < prereqs.len() {
                    let child = self.topic_index[&prereqs[next].topic_id];
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    match marks[child] {
                        Mark::Unvisited => {
                            marks[child] = Mark::InProgress;
                            stack.push((child, 0));
                        }
                        Mark::InProgress => {
                            let from = stack.iter().position(|&(n, _)| n == child).unwrap_or(0);
                            let mut cycle: Vec<String> = stack[from..]
                                .iter()
                                .map(|&(n, _)| self.topics[n].id.clone())
                                .collect();
                            cycle.push(self.topics[child].id.clone());
                            return Some(cycle);
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
        None
    }
}

fn check_unit(topic: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::OutOfRange {
            topic: topic.to_string(),
            field,
            value,
        })
    }
}
