use super::graph::FieldValue;
use crate::registry::ComponentRecord;
use serde_json::{Value, json};

/// Default value for an input slot, keyed by slot name only.
pub fn default_value(input_name: &str) -> Value {
    match input_name {
        "model_name" => json!("gpt-3.5-turbo"),
        "temperature" => json!(0.7),
        "max_tokens" => json!(1000),
        "chunk_size" => json!(1000),
        "chunk_overlap" => json!(200),
        "collection_name" => json!("documents"),
        "should_store_message" => json!(true),
        "sender" => json!("User"),
        _ => json!(""),
    }
}

pub fn field_values(record: &ComponentRecord) -> Vec<FieldValue> {
    record
        .inputs
        .iter()
        .map(|slot| FieldValue {
            name: slot.name.clone(),
            value: default_value(&slot.name),
        })
        .collect()
}
