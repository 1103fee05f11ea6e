//! Typed flow graph synthesis.
//!
//! Given an ordered list of component names, the synthesizer creates one node
//! per resolvable name and wires each adjacent pair of nodes with at most one
//! type-compatible edge. Names that do not resolve are skipped, and pairs
//! without a compatible slot are left disconnected; neither is an error.
//!
//! Node ids are `<name>-<suffix>`. Suffixes come from a generator seeded with
//! the generation index and the name sequence, so the same request replayed
//! with the same index yields the same ids.

use crate::registry::{ComponentRecord, ComponentTable};
use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::sync::Arc;

mod defaults;
mod graph;
mod layout;
mod wiring;

pub use defaults::{default_value, field_values};
pub use graph::{FieldValue, FlowEdge, FlowGraph, FlowNode, Position};
pub use layout::grid_position;
pub use wiring::{connect, edge_id};

pub const TRACING_TARGET: &str = "kumitate::synth";

const SUFFIX_LEN: usize = 5;
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Builds flow graphs against one registry table snapshot.
#[derive(Debug, Clone)]
pub struct FlowSynthesizer<'a> {
    table: &'a ComponentTable,
    generation: u64,
}

impl<'a> FlowSynthesizer<'a> {
    pub fn new(table: &'a ComponentTable) -> Self {
        Self {
            table,
            generation: 0,
        }
    }

    /// Sets the generation index that, with the names, seeds the id suffixes.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn synthesize<S: AsRef<str>>(&self, names: &[S]) -> FlowGraph {
        let mut rng = StdRng::from_seed(self.seed(names));
        let mut taken = AHashSet::with_capacity(names.len());
        let mut stages: Vec<(FlowNode, Arc<ComponentRecord>)> = Vec::with_capacity(names.len());

        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let record = match self.table.get(name) {
                Ok(record) => record,
                Err(error) => {
                    tracing::debug!(target: TRACING_TARGET, %error, "Skipping stage");
                    continue;
                }
            };

            let id = loop {
                let candidate = format!("{}-{}", name, suffix(&mut rng));
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            };
            let node = FlowNode {
                id,
                component_name: record.name.clone(),
                position: grid_position(index),
                field_values: field_values(&record),
            };
            stages.push((node, record));
        }

        let edges = wiring::wire(stages.iter().map(|(node, record)| (node, record.as_ref())));
        let nodes: Vec<FlowNode> = stages.into_iter().map(|(node, _)| node).collect();

        tracing::debug!(
            target: TRACING_TARGET,
            requested = names.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            generation = self.generation,
            "Flow graph synthesized"
        );
        FlowGraph { nodes, edges }
    }

    fn seed<S: AsRef<str>>(&self, names: &[S]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.generation.to_le_bytes());
        for name in names {
            hasher.update(name.as_ref().as_bytes());
            hasher.update([0u8]);
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hasher.finalize());
        seed
    }
}

fn suffix(rng: &mut StdRng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())]))
        .collect()
}
