//! Flow document assembly.
//!
//! Wraps a synthesized [`FlowGraph`] in the document the visual editor imports:
//! rendered nodes and edges, a fixed viewport, descriptive text and generation
//! metadata. Assembly is a pure function of its inputs.

use crate::catalog::Complexity;
use crate::error::GenerationError;
use crate::registry::ComponentTable;
use crate::synth::FlowGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

mod render;

pub use render::{
    EdgeHandles, NodeData, NodeTemplate, RenderedEdge, RenderedNode, SourceHandle, TargetHandle,
    TemplateField, render_edge, render_node, template_type,
};

pub const LAST_TESTED_VERSION: &str = "1.0.0";
pub const GENERATED_BY: &str = "kumitate";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    pub nodes: Vec<RenderedNode>,
    pub edges: Vec<RenderedEdge>,
    #[serde(default)]
    pub viewport: Viewport,
}

/// How a document came to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub generated_by: String,
    pub use_case: String,
    pub complexity: Complexity,
    pub capabilities: BTreeSet<String>,
    /// Pipeline as requested, including names that did not resolve.
    pub components: Vec<String>,
    pub generation_index: u64,
    pub classifier: String,
}

impl DocumentMetadata {
    pub fn new(use_case: &str, generation_index: u64) -> Self {
        Self {
            generated_by: GENERATED_BY.to_string(),
            use_case: use_case.to_string(),
            complexity: Complexity::default(),
            capabilities: BTreeSet::new(),
            components: Vec::new(),
            generation_index,
            classifier: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub name: String,
    pub description: String,
    pub data: FlowData,
    pub metadata: DocumentMetadata,
    pub last_tested_version: String,
}

impl FlowDocument {
    /// Renders `graph` against the table it was synthesized from.
    ///
    /// Nodes whose component is missing from `table` are dropped together with
    /// their edges, so the document never holds a dangling reference.
    pub fn assemble(
        graph: &FlowGraph,
        table: &ComponentTable,
        request: &str,
        metadata: DocumentMetadata,
    ) -> Self {
        let nodes: Vec<RenderedNode> = graph
            .nodes
            .iter()
            .filter_map(|node| {
                table
                    .get(&node.component_name)
                    .ok()
                    .map(|record| render_node(node, &record))
            })
            .collect();
        let component_of = |id: &str| {
            nodes
                .iter()
                .find(|n| n.id == id)
                .map(|n| n.data.component_type.as_str())
        };
        let edges = graph
            .edges
            .iter()
            .filter(|e| component_of(&e.target_node_id).is_some())
            .filter_map(|e| component_of(&e.source_node_id).map(|source| render_edge(e, source)))
            .collect();

        Self {
            name: format!("Generated Flow - {}", title_case(&metadata.use_case)),
            description: format!("Generated flow: {}", request.trim()),
            data: FlowData {
                nodes,
                edges,
                viewport: Viewport::default(),
            },
            metadata,
            last_tested_version: LAST_TESTED_VERSION.to_string(),
        }
    }

    /// Reads the synthesizer view back out of the rendered nodes and edges.
    pub fn graph(&self) -> FlowGraph {
        FlowGraph {
            nodes: self.data.nodes.iter().map(RenderedNode::to_flow_node).collect(),
            edges: self.data.edges.iter().map(RenderedEdge::to_flow_edge).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.data.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.data.edges.len()
    }

    pub fn to_json(&self) -> Result<String, GenerationError> {
        serde_json::to_string_pretty(self).map_err(|e| GenerationError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(json).map_err(|e| GenerationError::Serialization(e.to_string()))
    }
}

/// `document_qa` -> `Document Qa`.
fn title_case(label: &str) -> String {
    label
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
