//! Common test utilities: registries, component sources and example flows.
use kumitate::prelude::*;
use std::fs;
use std::path::Path;

/// A component source with literal metadata, typed inputs and one output.
#[allow(dead_code)]
pub const PROMPT_COMPONENT: &str = r#"
from axiestudio.custom import Component
from axiestudio.io import MessageTextInput, Output
from axiestudio.schema.message import Message


class PromptBuilder(Component):
    display_name = "Prompt Builder"
    description = "Fill a prompt template with the incoming message."

    inputs = [
        MultilineInput(name="template", display_name="Template"),
        MessageTextInput(name="user_message", display_name="User Message", required=True),
    ]

    outputs = [
        Output(display_name="Prompt", name="prompt", method="build_prompt"),
    ]

    def build_prompt(self) -> Message:
        return Message(text=self.template)
"#;

/// Shares its name with a built-in record.
#[allow(dead_code)]
pub const SHADOWING_COMPONENT: &str = r#"
from axiestudio.custom import Component

class ChatInput(Component):
    display_name = "Shadow Chat Input"
    description = "Should never replace the built-in record."
"#;

/// Decorator-marked component without a Component base class.
#[allow(dead_code)]
pub const DECORATED_COMPONENT: &str = r#"
import requests

@component
class WeatherLookup:
    """Look up the current weather for a city."""

    city = StrInput(name="city", display_name="City")
"#;

#[allow(dead_code)]
pub const HELPER_MODULE: &str = r#"
def helper(x):
    return x * 2
"#;

#[allow(dead_code)]
pub const BASIC_EXAMPLE_FLOW: &str = r#"{
    "name": "Basic Prompting",
    "description": "Simple chat with an OpenAI model",
    "data": {
        "nodes": [
            {"id": "ChatInput-a1b2c", "type": "genericNode", "data": {"type": "ChatInput", "id": "ChatInput-a1b2c"}},
            {"id": "OpenAIModel-d3e4f", "type": "genericNode", "data": {"type": "OpenAIModel", "id": "OpenAIModel-d3e4f"}},
            {"id": "ChatOutput-g5h6i", "type": "genericNode", "data": {"type": "ChatOutput", "id": "ChatOutput-g5h6i"}}
        ],
        "edges": [
            {"source": "ChatInput-a1b2c", "target": "OpenAIModel-d3e4f"},
            {"source": "OpenAIModel-d3e4f", "target": "ChatOutput-g5h6i"}
        ]
    }
}"#;

#[allow(dead_code)]
pub const RAG_EXAMPLE_FLOW: &str = r#"{
    "name": "Vector Store RAG",
    "description": "Answer questions about uploaded documents",
    "data": {
        "nodes": [
            {"id": "1", "data": {"type": "File"}},
            {"id": "2", "data": {"type": "SplitText"}},
            {"id": "3", "data": {"type": "OpenAIEmbeddings"}},
            {"id": "4", "data": {"type": "Chroma"}},
            {"id": "5", "data": {"type": "ChatInput"}},
            {"id": "6", "data": {"type": "OpenAIModel"}},
            {"id": "7", "data": {"type": "ChatOutput"}},
            {"id": "8", "data": {"type": "Prompt"}}
        ],
        "edges": [{}, {}, {}, {}, {}, {}, {}]
    }
}"#;

/// Writes `content` to `root/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Lays out a small component tree:
///
/// - `processing/prompt_builder.py`: a component
/// - `input_output/chat_input.py`: shadows a built-in
/// - `tools/weather.py`: decorator-marked component
/// - `tools/helpers.py`: not a component
/// - `tools/__init__.py` and `__pycache__/cached.py`: ignored
#[allow(dead_code)]
pub fn create_component_tree(root: &Path) {
    write_file(root, "processing/prompt_builder.py", PROMPT_COMPONENT);
    write_file(root, "input_output/chat_input.py", SHADOWING_COMPONENT);
    write_file(root, "tools/weather.py", DECORATED_COMPONENT);
    write_file(root, "tools/helpers.py", HELPER_MODULE);
    write_file(root, "tools/__init__.py", PROMPT_COMPONENT);
    write_file(root, "__pycache__/cached.py", PROMPT_COMPONENT);
}

/// Two valid example flows, one broken document and one non-JSON file.
#[allow(dead_code)]
pub fn create_example_dir(root: &Path) {
    write_file(root, "basic_prompting.json", BASIC_EXAMPLE_FLOW);
    write_file(root, "vector_store_rag.json", RAG_EXAMPLE_FLOW);
    write_file(root, "broken.json", "{\"name\": \"Broken\", \"data\": ");
    write_file(root, "README.md", "# examples");
}

#[allow(dead_code)]
pub fn builtin_table() -> ComponentTable {
    ComponentTable::new(kumitate::registry::builtin_records())
}

/// Builds a record with the given typed inputs and outputs.
#[allow(dead_code)]
pub fn record(name: &str, inputs: &[(&str, &str)], outputs: &[(&str, &str)]) -> ComponentRecord {
    let mut record = ComponentRecord::new(name, Category::Logic);
    for (slot, type_name) in inputs {
        record = record.with_input(slot, type_name, slot);
    }
    for (slot, type_name) in outputs {
        record = record.with_output(slot, type_name, slot);
    }
    record
}
