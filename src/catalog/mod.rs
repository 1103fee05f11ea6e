//! Example flows mined from sample documents.

use ahash::AHashSet;
use itertools::Itertools;

mod record;

pub use record::{Complexity, ExampleFlowRecord};

/// A scored match from [`FlowCatalog::find_similar`].
#[derive(Debug, Clone)]
pub struct SimilarFlow<'a> {
    pub flow: &'a ExampleFlowRecord,
    pub score: u32,
    pub reason: String,
}

/// Read-only collection of example flows, kept sorted by name.
#[derive(Debug, Default, Clone)]
pub struct FlowCatalog {
    flows: Vec<ExampleFlowRecord>,
}

impl FlowCatalog {
    /// The first record with a given name wins.
    pub fn new<I>(flows: I) -> Self
    where
        I: IntoIterator<Item = ExampleFlowRecord>,
    {
        let mut seen = AHashSet::new();
        let flows = flows
            .into_iter()
            .filter(|f| seen.insert(f.name.clone()))
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect();
        Self { flows }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExampleFlowRecord> {
        self.flows.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ExampleFlowRecord> {
        self.flows.iter().find(|f| f.name == name)
    }

    pub fn by_flow_type(&self, flow_type: &str) -> Vec<&ExampleFlowRecord> {
        self.flows.iter().filter(|f| f.flow_type == flow_type).collect()
    }

    pub fn by_use_case(&self, use_case: &str) -> Vec<&ExampleFlowRecord> {
        self.flows.iter().filter(|f| f.use_case == use_case).collect()
    }

    /// Ranks example flows against a free-text description.
    ///
    /// Scoring: 2 per word shared with the example's description, 5 when the
    /// example's use-case label occurs in the text, 3 per referenced component
    /// named in the text. Zero scores are dropped; ties sort by name.
    pub fn find_similar(&self, description: &str, limit: usize) -> Vec<SimilarFlow<'_>> {
        let text = description.to_lowercase();
        let words: AHashSet<&str> = text.split_whitespace().collect();

        self.flows
            .iter()
            .filter_map(|flow| {
                let flow_desc = flow.description.to_lowercase();
                let common = flow_desc
                    .split_whitespace()
                    .unique()
                    .filter(|w| words.contains(w))
                    .count() as u32;
                let mut score = common * 2;
                if text.contains(&flow.use_case) {
                    score += 5;
                }
                score += 3 * flow
                    .components_used
                    .iter()
                    .filter(|c| text.contains(&c.to_lowercase()))
                    .count() as u32;
                (score > 0).then(|| SimilarFlow {
                    flow,
                    score,
                    reason: format!(
                        "Matched {} keywords, use case: {}",
                        common, flow.use_case
                    ),
                })
            })
            .sorted_by(|a, b| b.score.cmp(&a.score).then_with(|| a.flow.name.cmp(&b.flow.name)))
            .take(limit)
            .collect()
    }
}
