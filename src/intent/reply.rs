//! Parsing of free-form oracle replies.
//!
//! Language-model replies often wrap their JSON in a Markdown code fence or
//! surround it with prose. These helpers cut out the JSON value and map it onto
//! the crate's types.

use super::IntentRecord;
use crate::catalog::Complexity;
use crate::error::ClassificationError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct IntentReply {
    #[serde(alias = "use_case")]
    primary_use_case: String,
    #[serde(default)]
    capabilities: Vec<Value>,
    #[serde(default)]
    complexity: Option<String>,
}

/// Parses `{"primary_use_case": ..., "capabilities": [...], "complexity": ...}`.
///
/// The use case is lower-cased. An unknown complexity becomes `medium`; the
/// label itself is passed through and resolved by the selector.
pub fn parse_intent_reply(content: &str) -> Result<IntentRecord, ClassificationError> {
    let json = json_slice(content, '{', '}')?;
    let reply: IntentReply = serde_json::from_str(json)
        .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))?;

    let use_case = reply.primary_use_case.trim().to_lowercase();
    if use_case.is_empty() {
        return Err(ClassificationError::InvalidResponse(
            "empty primary_use_case".to_string(),
        ));
    }

    Ok(IntentRecord {
        use_case,
        complexity: reply
            .complexity
            .as_deref()
            .and_then(Complexity::parse)
            .unwrap_or(Complexity::Medium),
        capabilities: reply
            .capabilities
            .iter()
            .filter_map(Value::as_str)
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect(),
    })
}

/// Parses a JSON array of component names. Non-string entries are dropped.
pub fn parse_selection_reply(content: &str) -> Result<Vec<String>, ClassificationError> {
    let json = json_slice(content, '[', ']')?;
    let names: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))?;
    Ok(names
        .iter()
        .filter_map(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn json_slice(content: &str, open: char, close: char) -> Result<&str, ClassificationError> {
    match (content.find(open), content.rfind(close)) {
        (Some(start), Some(end)) if start < end => Ok(&content[start..=end]),
        _ => Err(ClassificationError::InvalidResponse(format!(
            "no JSON value delimited by '{}' and '{}'",
            open, close
        ))),
    }
}
