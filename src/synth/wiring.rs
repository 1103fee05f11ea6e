use super::graph::{FlowEdge, FlowNode};
use crate::registry::{ComponentRecord, types_match};
use itertools::Itertools;

pub fn edge_id(source_id: &str, target_id: &str) -> String {
    format!("reactflow__edge-{}-{}", source_id, target_id)
}

/// Greedy first match between two adjacent stages.
///
/// Outputs are tried in declaration order; for each one the target's inputs
/// are scanned in declaration order and the first type-compatible slot wins.
/// At most one edge is produced.
pub fn connect(
    source: &FlowNode,
    source_record: &ComponentRecord,
    target: &FlowNode,
    target_record: &ComponentRecord,
) -> Option<FlowEdge> {
    source_record.outputs.iter().find_map(|output| {
        target_record
            .inputs
            .iter()
            .find(|input| types_match(&output.type_name, &input.type_name))
            .map(|input| FlowEdge {
                id: edge_id(&source.id, &target.id),
                source_node_id: source.id.clone(),
                target_node_id: target.id.clone(),
                source_output_name: output.name.clone(),
                source_output_type: output.type_name.clone(),
                target_input_name: input.name.clone(),
            })
    })
}

/// Connects every adjacent pair of `stages`, skipping pairs without a match.
pub fn wire<'a, I>(stages: I) -> Vec<FlowEdge>
where
    I: IntoIterator<Item = (&'a FlowNode, &'a ComponentRecord)>,
{
    stages
        .into_iter()
        .tuple_windows()
        .filter_map(|((source, source_record), (target, target_record))| {
            connect(source, source_record, target, target_record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;
    use crate::synth::graph::Position;

    fn node(id: &str) -> FlowNode {
        FlowNode {
            id: id.to_string(),
            component_name: id.to_string(),
            position: Position { x: 0.0, y: 0.0 },
            field_values: Vec::new(),
        }
    }

    #[test]
    fn first_declared_matching_input_wins() {
        let source = ComponentRecord::new("Src", Category::Logic).with_output("out", "Message", "Out");
        let target = ComponentRecord::new("Dst", Category::Logic)
            .with_input("count", "int", "Count")
            .with_input("first_text", "str", "First")
            .with_input("second_text", "Message", "Second");
        let edge = connect(&node("a"), &source, &node("b"), &target).unwrap();
        assert_eq!(edge.target_input_name, "first_text");
        assert_eq!(edge.source_output_type, "Message");
        assert_eq!(edge.id, "reactflow__edge-a-b");
    }

    #[test]
    fn later_output_is_tried_when_first_has_no_match() {
        let source = ComponentRecord::new("Src", Category::Logic)
            .with_output("data", "Data", "Data")
            .with_output("text", "str", "Text");
        let target = ComponentRecord::new("Dst", Category::Logic).with_input("prompt", "Message", "Prompt");
        let edge = connect(&node("a"), &source, &node("b"), &target).unwrap();
        assert_eq!(edge.source_output_name, "text");
    }

    #[test]
    fn sink_source_pair_has_no_edge() {
        let sink = ComponentRecord::new("Sink", Category::Logic).with_input("x", "str", "X");
        let next = ComponentRecord::new("Next", Category::Logic).with_input("y", "str", "Y");
        assert!(connect(&node("a"), &sink, &node("b"), &next).is_none());

        let (a, b) = (node("a"), node("b"));
        assert!(wire([(&a, &sink), (&b, &next)]).is_empty());
    }
}
