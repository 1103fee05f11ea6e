use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse size/complexity tier shared by example flows and classified requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    #[default]
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// simple: <=3 nodes and <=2 edges; medium: <=7 nodes and <=6 edges; else complex.
    pub fn from_counts(node_count: usize, edge_count: usize) -> Self {
        if node_count <= 3 && edge_count <= 2 {
            Complexity::Simple
        } else if node_count <= 7 && edge_count <= 6 {
            Complexity::Medium
        } else {
            Complexity::Complex
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Complexity::Simple),
            "medium" => Some(Complexity::Medium),
            "complex" => Some(Complexity::Complex),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one example flow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleFlowRecord {
    pub name: String,
    pub description: String,
    pub components_used: BTreeSet<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub complexity: Complexity,
    pub flow_type: String,
    pub use_case: String,
    pub source_path: String,
    pub fingerprint: String,
}

impl ExampleFlowRecord {
    /// Builds a record and derives complexity, flow type and use case from the counts and text.
    pub fn new(
        name: &str,
        description: &str,
        components_used: BTreeSet<String>,
        node_count: usize,
        edge_count: usize,
    ) -> Self {
        let flow_type = flow_type(&components_used, description).to_string();
        let use_case = use_case(name, description).to_string();
        Self {
            name: name.to_string(),
            description: description.to_string(),
            complexity: Complexity::from_counts(node_count, edge_count),
            components_used,
            node_count,
            edge_count,
            flow_type,
            use_case,
            source_path: String::new(),
            fingerprint: String::new(),
        }
    }

    pub fn with_source(mut self, source_path: &str, fingerprint: &str) -> Self {
        self.source_path = source_path.to_string();
        self.fingerprint = fingerprint.to_string();
        self
    }
}

fn flow_type(components: &BTreeSet<String>, description: &str) -> &'static str {
    let desc = description.to_lowercase();
    if components.iter().any(|c| c.contains("Agent")) {
        "agent_workflow"
    } else if components
        .iter()
        .any(|c| c.contains("Embedding") || c.contains("Vector"))
    {
        "rag_system"
    } else if desc.contains("document") || desc.contains("pdf") {
        "document_qa"
    } else if desc.contains("chat") {
        "basic_chat"
    } else {
        "general_workflow"
    }
}

fn use_case(name: &str, description: &str) -> &'static str {
    let text = format!("{} {}", name, description).to_lowercase();
    if text.contains("document") || text.contains("pdf") {
        "document_processing"
    } else if text.contains("agent") {
        "autonomous_agent"
    } else if text.contains("chat") {
        "conversational_ai"
    } else if text.contains("search") {
        "information_retrieval"
    } else {
        "general_ai"
    }
}
