use super::{IntentOracle, IntentRecord, UseCase};
use crate::catalog::Complexity;
use crate::error::ClassificationError;

/// Ordered keyword rules. The first rule with any keyword present in the
/// lower-cased text decides the use case.
const RULES: [(UseCase, &[&str]); 3] = [
    (
        UseCase::DocumentQa,
        &["document", "pdf", "file", "q&a", "question"],
    ),
    (UseCase::AgentTools, &["agent", "tool", "search", "autonomous"]),
    (UseCase::RagSystem, &["rag", "retrieval", "vector", "embedding"]),
];

/// Deterministic rule-based classifier. Always available, never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn use_case(&self, text: &str) -> UseCase {
        let text = text.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(use_case, _)| *use_case)
            .unwrap_or(UseCase::BasicChat)
    }

    pub fn intent(&self, text: &str) -> IntentRecord {
        let use_case = self.use_case(text);
        IntentRecord {
            use_case: use_case.as_str().to_string(),
            complexity: match use_case {
                UseCase::BasicChat => Complexity::Simple,
                _ => Complexity::Medium,
            },
            capabilities: use_case
                .capabilities()
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl IntentOracle for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn classify(&self, text: &str) -> Result<IntentRecord, ClassificationError> {
        Ok(self.intent(text))
    }
}
