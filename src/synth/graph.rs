use crate::error::GraphError;
use crate::registry::{ComponentTable, types_match};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Default value of one input slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub component_name: String,
    pub position: Position,
    /// One entry per declared input slot, in declaration order.
    pub field_values: Vec<FieldValue>,
}

impl FlowNode {
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.field_values
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    pub source_output_name: String,
    pub source_output_type: String,
    pub target_input_name: String,
}

/// Synthesizer output: nodes in pipeline order plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.component_name.as_str())
    }

    /// Checks the structural invariants: unique node ids, edges that point
    /// forward between existing nodes, and slots the components declare.
    ///
    /// Missing edges are never an error.
    pub fn validate(&self, table: &ComponentTable) -> Result<(), GraphError> {
        let mut order: AHashMap<&str, usize> = AHashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if order.insert(node.id.as_str(), i).is_some() {
                return Err(GraphError::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }

        for edge in &self.edges {
            let position = |id: &str| {
                order.get(id).copied().ok_or_else(|| GraphError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: id.to_string(),
                })
            };
            let source = position(edge.source_node_id.as_str())?;
            let target = position(edge.target_node_id.as_str())?;
            if source >= target {
                return Err(GraphError::BackwardEdge {
                    edge: edge.id.clone(),
                });
            }

            let undeclared = |slot: String| GraphError::UndeclaredSlot {
                edge: edge.id.clone(),
                slot,
            };
            let source_record = table
                .get(&self.nodes[source].component_name)
                .map_err(|e| undeclared(e.to_string()))?;
            if !source_record.outputs.iter().any(|o| {
                o.name == edge.source_output_name && o.type_name == edge.source_output_type
            }) {
                return Err(undeclared(format!(
                    "output {}:{}",
                    edge.source_output_name, edge.source_output_type
                )));
            }
            let target_record = table
                .get(&self.nodes[target].component_name)
                .map_err(|e| undeclared(e.to_string()))?;
            match target_record.input(&edge.target_input_name) {
                Some(slot) if types_match(&edge.source_output_type, &slot.type_name) => {}
                _ => return Err(undeclared(format!("input {}", edge.target_input_name))),
            }
        }
        Ok(())
    }
}
