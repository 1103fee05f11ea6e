//! Node and edge shapes of the downstream visual editor.

use crate::registry::{ComponentRecord, canonical_type};
use crate::synth::{FieldValue, FlowEdge, FlowNode, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs the editor marks as required regardless of the record.
const ALWAYS_REQUIRED: [&str; 3] = ["input_value", "llm", "documents"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub show: bool,
    pub name: String,
    pub display_name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub template: BTreeMap<String, TemplateField>,
    pub description: String,
    pub base_classes: Vec<String>,
    pub display_name: String,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    pub output_types: Vec<String>,
    pub field_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(rename = "type")]
    pub component_type: String,
    pub node: NodeTemplate,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedNode {
    pub data: NodeData,
    pub id: String,
    pub position: Position,
    #[serde(rename = "type")]
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceHandle {
    pub data_type: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "output_types")]
    pub output_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetHandle {
    pub field_name: String,
    pub id: String,
    pub input_types: Vec<String>,
    #[serde(rename = "type")]
    pub handle_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHandles {
    pub source_handle: SourceHandle,
    pub target_handle: TargetHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
    pub data: EdgeHandles,
}

/// Editor field type: lower-cased, with messages shown as plain strings.
pub fn template_type(type_name: &str) -> String {
    canonical_type(type_name)
}

pub fn render_node(node: &FlowNode, record: &ComponentRecord) -> RenderedNode {
    let template = record
        .inputs
        .iter()
        .map(|slot| {
            let value = node
                .field(&slot.name)
                .cloned()
                .unwrap_or(serde_json::Value::String(String::new()));
            let field = TemplateField {
                field_type: template_type(&slot.type_name),
                required: slot.required || ALWAYS_REQUIRED.contains(&slot.name.as_str()),
                show: true,
                name: slot.name.clone(),
                display_name: slot.display_name.clone(),
                value,
            };
            (slot.name.clone(), field)
        })
        .collect();

    RenderedNode {
        data: NodeData {
            component_type: record.name.clone(),
            node: NodeTemplate {
                template,
                description: record.description.clone(),
                base_classes: vec!["Component".to_string()],
                display_name: record.display_name.clone(),
                custom_fields: BTreeMap::new(),
                output_types: record.outputs.iter().map(|o| o.type_name.clone()).collect(),
                field_order: record.inputs.iter().map(|s| s.name.clone()).collect(),
            },
            id: node.id.clone(),
        },
        id: node.id.clone(),
        position: node.position,
        node_type: "genericNode".to_string(),
    }
}

pub fn render_edge(edge: &FlowEdge, source_component: &str) -> RenderedEdge {
    RenderedEdge {
        id: edge.id.clone(),
        source: edge.source_node_id.clone(),
        target: edge.target_node_id.clone(),
        animated: false,
        data: EdgeHandles {
            source_handle: SourceHandle {
                data_type: source_component.to_string(),
                id: edge.source_node_id.clone(),
                name: edge.source_output_name.clone(),
                output_types: vec![edge.source_output_type.clone()],
            },
            target_handle: TargetHandle {
                field_name: edge.target_input_name.clone(),
                id: edge.target_node_id.clone(),
                input_types: vec![edge.source_output_type.clone()],
                handle_type: edge.source_output_type.to_lowercase(),
            },
        },
    }
}

impl RenderedNode {
    /// The synthesizer view of this node. Field values follow `field_order`.
    pub fn to_flow_node(&self) -> FlowNode {
        let template = &self.data.node.template;
        FlowNode {
            id: self.id.clone(),
            component_name: self.data.component_type.clone(),
            position: self.position,
            field_values: self
                .data
                .node
                .field_order
                .iter()
                .filter_map(|name| {
                    template.get(name).map(|field| FieldValue {
                        name: name.clone(),
                        value: field.value.clone(),
                    })
                })
                .collect(),
        }
    }
}

impl RenderedEdge {
    pub fn to_flow_edge(&self) -> FlowEdge {
        let handles = &self.data;
        FlowEdge {
            id: self.id.clone(),
            source_node_id: self.source.clone(),
            target_node_id: self.target.clone(),
            source_output_name: handles.source_handle.name.clone(),
            source_output_type: handles
                .source_handle
                .output_types
                .first()
                .cloned()
                .unwrap_or_default(),
            target_input_name: handles.target_handle.field_name.clone(),
        }
    }
}
