use super::fingerprint::fingerprint;
use crate::catalog::ExampleFlowRecord;
use crate::error::SkipReason;
use serde_json::Value;
use std::collections::BTreeSet;

/// Summarizes one example flow document.
///
/// `fallback_name` is used when the document carries no `name` of its own.
pub(super) fn analyze_example(
    content: &str,
    source_path: &str,
    fallback_name: &str,
) -> Result<ExampleFlowRecord, SkipReason> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| SkipReason::InvalidDocument(e.to_string()))?;
    if !document.is_object() {
        return Err(SkipReason::InvalidDocument(
            "top-level value is not an object".to_string(),
        ));
    }

    let nodes = document
        .pointer("/data/nodes")
        .and_then(Value::as_array)
        .ok_or(SkipReason::MissingGraph)?;
    let edge_count = document
        .pointer("/data/edges")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let name = document
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback_name);
    let description = document
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");

    let components: BTreeSet<String> = nodes.iter().filter_map(node_component).collect();

    Ok(
        ExampleFlowRecord::new(name, description, components, nodes.len(), edge_count)
            .with_source(source_path, &fingerprint(content.as_bytes())),
    )
}

/// The component a node instantiates: `data.type`, then the prefix of
/// `data.id`, then the node's own `type` unless it is the generic wrapper.
fn node_component(node: &Value) -> Option<String> {
    let data = node.get("data");
    if let Some(kind) = data.and_then(|d| d.get("type")).and_then(Value::as_str) {
        if !kind.is_empty() {
            return Some(kind.to_string());
        }
    }
    if let Some(id) = data.and_then(|d| d.get("id")).and_then(Value::as_str) {
        let prefix = id.split('-').next().unwrap_or(id);
        if !prefix.is_empty() {
            return Some(prefix.to_string());
        }
    }
    node.get("type")
        .and_then(Value::as_str)
        .filter(|kind| !kind.is_empty() && *kind != "genericNode")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Complexity;

    #[test]
    fn reads_components_and_counts() {
        let doc = r#"{
            "name": "Basic Prompting",
            "description": "Simple chat with a model",
            "data": {
                "nodes": [
                    {"id": "a", "type": "genericNode", "data": {"type": "ChatInput"}},
                    {"id": "b", "type": "genericNode", "data": {"id": "OpenAIModel-x1y2z"}},
                    {"id": "c", "type": "ChatOutput"},
                    {"id": "d", "type": "genericNode", "data": {}}
                ],
                "edges": [{}, {}]
            }
        }"#;
        let record = analyze_example(doc, "basic.json", "basic").unwrap();
        assert_eq!(record.name, "Basic Prompting");
        assert_eq!(record.node_count, 4);
        assert_eq!(record.edge_count, 2);
        assert_eq!(record.complexity, Complexity::Medium);
        let used: Vec<&str> = record.components_used.iter().map(String::as_str).collect();
        assert_eq!(used, ["ChatInput", "ChatOutput", "OpenAIModel"]);
        assert_eq!(record.flow_type, "basic_chat");
        assert_eq!(record.fingerprint.len(), 64);
    }

    #[test]
    fn missing_edges_count_as_zero_and_name_falls_back() {
        let record = analyze_example(r#"{"data": {"nodes": []}}"#, "x.json", "x").unwrap();
        assert_eq!(record.name, "x");
        assert_eq!(record.edge_count, 0);
    }

    #[test]
    fn malformed_documents_are_skipped_with_reason() {
        assert!(matches!(
            analyze_example("{not json", "bad.json", "bad"),
            Err(SkipReason::InvalidDocument(_))
        ));
        assert_eq!(
            analyze_example(r#"{"data": {}}"#, "empty.json", "empty").unwrap_err(),
            SkipReason::MissingGraph
        );
        assert!(matches!(
            analyze_example("[1, 2]", "list.json", "list"),
            Err(SkipReason::InvalidDocument(_))
        ));
    }
}
