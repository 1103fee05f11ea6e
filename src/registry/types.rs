//! Slot type comparison.
//!
//! Types compare case-insensitively, and the text-message type is
//! interchangeable with the primitive string type.

const MESSAGE_TYPE: &str = "message";
const STRING_TYPE: &str = "str";

/// Canonical form of a slot type: lower-cased, with `Message` folded into `str`.
///
/// This is also the form the visual tool expects in a node template.
pub fn canonical_type(type_name: &str) -> String {
    let lowered = type_name.trim().to_lowercase();
    if lowered == MESSAGE_TYPE {
        STRING_TYPE.to_string()
    } else {
        lowered
    }
}

/// Returns `true` if an output of type `output` can feed an input of type `input`.
pub fn types_match(output: &str, input: &str) -> bool {
    canonical_type(output) == canonical_type(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case() {
        assert!(types_match("Data", "data"));
        assert!(types_match("EMBEDDINGS", "Embeddings"));
        assert!(!types_match("Data", "Embeddings"));
    }

    #[test]
    fn message_and_str_are_interchangeable() {
        assert!(types_match("Message", "str"));
        assert!(types_match("str", "Message"));
        assert!(types_match("message", "MESSAGE"));
        assert!(!types_match("Message", "int"));
    }

    #[test]
    fn canonical_form() {
        assert_eq!(canonical_type("Message"), "str");
        assert_eq!(canonical_type("LanguageModel"), "languagemodel");
        assert_eq!(canonical_type(" Float "), "float");
    }
}
