use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of component categories. Anything unrecognized lands in `Processing`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InputOutput,
    Models,
    Agents,
    Data,
    Embeddings,
    VectorStores,
    Tools,
    Logic,
    #[default]
    Processing,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::InputOutput,
        Category::Models,
        Category::Agents,
        Category::Data,
        Category::Embeddings,
        Category::VectorStores,
        Category::Tools,
        Category::Logic,
        Category::Processing,
    ];

    /// Maps a free-form label (usually a directory name) onto a category.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "input_output" | "inputs" | "outputs" | "io" | "input" | "output" => {
                Category::InputOutput
            }
            "models" | "model" | "llms" | "language_models" => Category::Models,
            "agents" | "agent" => Category::Agents,
            "data" | "loaders" | "document_loaders" => Category::Data,
            "embeddings" | "embedding" => Category::Embeddings,
            "vectorstores" | "vector_stores" | "vectorstore" | "vector_store" => {
                Category::VectorStores
            }
            "tools" | "tool" => Category::Tools,
            "logic" | "flow_controls" => Category::Logic,
            _ => Category::Processing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::InputOutput => "input_output",
            Category::Models => "models",
            Category::Agents => "agents",
            Category::Data => "data",
            Category::Embeddings => "embeddings",
            Category::VectorStores => "vectorstores",
            Category::Tools => "tools",
            Category::Logic => "logic",
            Category::Processing => "processing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A declared input slot on a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSlot {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
}

/// A declared output slot on a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Where an extracted record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source_path: String,
    pub fingerprint: String,
    pub dependencies: Vec<String>,
}

/// Metadata describing one known component.
///
/// A record without outputs is a valid sink, one without inputs a valid source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub display_name: String,
    pub category: Category,
    pub description: String,
    pub inputs: Vec<InputSlot>,
    pub outputs: Vec<OutputSlot>,
    pub use_cases: BTreeSet<String>,
    pub common_connections: Vec<String>,
    pub provenance: Option<Provenance>,
}

impl ComponentRecord {
    /// Creates an empty record. Display name and description get their defaults.
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            display_name: spaced_name(name),
            category,
            description: format!("{} component", name),
            inputs: Vec::new(),
            outputs: Vec::new(),
            use_cases: BTreeSet::new(),
            common_connections: Vec::new(),
            provenance: None,
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Appends an input slot. A slot whose name is already declared is ignored.
    pub fn with_input(mut self, name: &str, type_name: &str, display_name: &str) -> Self {
        self.push_input(InputSlot {
            name: name.to_string(),
            display_name: display_name.to_string(),
            type_name: type_name.to_string(),
            required: false,
        });
        self
    }

    pub fn with_required_input(mut self, name: &str, type_name: &str, display_name: &str) -> Self {
        self.push_input(InputSlot {
            name: name.to_string(),
            display_name: display_name.to_string(),
            type_name: type_name.to_string(),
            required: true,
        });
        self
    }

    pub fn with_output(mut self, name: &str, type_name: &str, display_name: &str) -> Self {
        self.outputs.push(OutputSlot {
            name: name.to_string(),
            display_name: display_name.to_string(),
            type_name: type_name.to_string(),
        });
        self
    }

    pub fn with_use_cases<I, S>(mut self, use_cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.use_cases.extend(use_cases.into_iter().map(Into::into));
        self
    }

    pub fn with_connections<I, S>(mut self, connections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_connections
            .extend(connections.into_iter().map(Into::into));
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub(crate) fn push_input(&mut self, slot: InputSlot) -> bool {
        if self.inputs.iter().any(|s| s.name == slot.name) {
            return false;
        }
        self.inputs.push(slot);
        true
    }

    pub fn input(&self, name: &str) -> Option<&InputSlot> {
        self.inputs.iter().find(|s| s.name == name)
    }

    pub fn is_source(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn is_sink(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Case-insensitive substring match over name, description and use cases.
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .use_cases
                .iter()
                .any(|u| u.to_lowercase().contains(needle))
    }
}

/// Splits an identifier on capitalization boundaries: `ChatInput` -> `Chat Input`.
pub fn spaced_name(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_name_splits_on_capitals() {
        assert_eq!(spaced_name("ChatInput"), "Chat Input");
        assert_eq!(spaced_name("Agent"), "Agent");
        assert_eq!(spaced_name("webSearch"), "web Search");
    }

    #[test]
    fn unknown_category_maps_to_processing() {
        assert_eq!(Category::from_label("vector_stores"), Category::VectorStores);
        assert_eq!(Category::from_label("Agents"), Category::Agents);
        assert_eq!(Category::from_label("prototypes"), Category::Processing);
    }

    #[test]
    fn duplicate_input_names_are_ignored() {
        let record = ComponentRecord::new("Dup", Category::Logic)
            .with_input("value", "str", "Value")
            .with_input("value", "int", "Value again");
        assert_eq!(record.inputs.len(), 1);
        assert_eq!(record.inputs[0].type_name, "str");
    }

    #[test]
    fn defaults_follow_the_name() {
        let record = ComponentRecord::new("TextSplitter", Category::Processing);
        assert_eq!(record.display_name, "Text Splitter");
        assert_eq!(record.description, "TextSplitter component");
        assert!(record.is_source());
        assert!(record.is_sink());
    }
}
