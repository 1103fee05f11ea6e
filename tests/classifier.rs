//! Classification and component selection with and without an oracle.
mod common;
use common::*;
use kumitate::intent::IntentSource;
use kumitate::prelude::*;
use kumitate::selector::SelectionSource;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Answers every request with a fixed label.
struct LabelOracle(&'static str);

impl IntentOracle for LabelOracle {
    fn name(&self) -> &str {
        "label"
    }

    fn classify(&self, _text: &str) -> Result<IntentRecord, ClassificationError> {
        Ok(IntentRecord {
            use_case: self.0.to_string(),
            complexity: Complexity::Complex,
            capabilities: BTreeSet::from(["custom".to_string()]),
        })
    }
}

struct Unreachable;

impl IntentOracle for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn classify(&self, _text: &str) -> Result<IntentRecord, ClassificationError> {
        Err(ClassificationError::Transport("connection refused".to_string()))
    }
}

/// Proposes a fixed pipeline, possibly with names the registry does not know.
struct ProposingOracle(Vec<&'static str>);

impl SelectionOracle for ProposingOracle {
    fn name(&self) -> &str {
        "proposer"
    }

    fn select(
        &self,
        _description: &str,
        _intent: &IntentRecord,
        _table: &ComponentTable,
    ) -> Result<Vec<String>, ClassificationError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

struct SlowSelector;

impl SelectionOracle for SlowSelector {
    fn name(&self) -> &str {
        "slow"
    }

    fn select(
        &self,
        _description: &str,
        _intent: &IntentRecord,
        _table: &ComponentTable,
    ) -> Result<Vec<String>, ClassificationError> {
        thread::sleep(Duration::from_millis(500));
        Ok(vec!["ChatOutput".to_string()])
    }
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_pdf_request_is_document_qa() {
        let classifier = IntentClassifier::keyword_only();
        let result = classifier.classify("Create a chatbot that can answer questions about PDF documents");

        assert_eq!(result.source, IntentSource::Fallback);
        assert_eq!(result.intent.use_case, "document_qa");
        assert_eq!(result.intent.complexity, Complexity::Medium);
        assert!(result.intent.capabilities.contains("document_processing"));

        let selection = ComponentSelector::recipes_only().select(&result.intent.use_case);
        assert_eq!(
            selection,
            [
                "ChatInput",
                "FileLoader",
                "TextSplitter",
                "Embeddings",
                "VectorStore",
                "LanguageModel",
                "ChatOutput",
            ]
        );
    }

    #[test]
    fn test_keyword_classification_is_deterministic() {
        let classifier = IntentClassifier::keyword_only();
        let requests = [
            "An autonomous agent that books meetings",
            "Semantic retrieval over a vector database",
            "Tell me a joke",
            "",
        ];
        for request in requests {
            let first = classifier.classify(request);
            let second = classifier.classify(request);
            assert_eq!(first.intent, second.intent, "{request:?}");
        }
        assert_eq!(classifier.classify("Tell me a joke").intent.complexity, Complexity::Simple);
    }

    #[test]
    fn test_unknown_label_resolves_to_basic_chat_recipe() {
        let selector = ComponentSelector::recipes_only();
        assert_eq!(selector.select("xyz"), ["ChatInput", "LanguageModel", "ChatOutput"]);
        assert_eq!(ComponentSelector::resolve("data_processing"), UseCase::BasicChat);
        assert_eq!(ComponentSelector::recipe_count(), 4);
    }

    #[test]
    fn test_every_recipe_resolves_against_builtins() {
        let table = builtin_table();
        for use_case in UseCase::ALL {
            for name in ComponentSelector::recipe(use_case) {
                assert!(table.contains(name), "{use_case} needs {name}");
            }
        }
    }

    #[test]
    fn test_oracle_label_flows_into_selection() {
        let classifier = IntentClassifier::with_oracle(Arc::new(LabelOracle("agent_tools")));
        let result = classifier.classify("anything at all");
        assert_eq!(result.source, IntentSource::Oracle("label".to_string()));
        assert_eq!(result.source.label(), "label");

        let table = Arc::new(builtin_table());
        let selection = ComponentSelector::recipes_only().select_for("anything at all", &result.intent, &table);
        assert_eq!(selection.use_case, UseCase::AgentTools);
        assert_eq!(selection.source, SelectionSource::Recipe);
        assert_eq!(selection.components[1], "Agent");
    }

    #[test]
    fn test_failing_oracle_matches_keyword_rules() {
        let request = "Search the web and summarize results";
        let with_oracle = IntentClassifier::with_oracle(Arc::new(Unreachable)).classify(request);
        let keyword_only = IntentClassifier::keyword_only().classify(request);
        assert_eq!(with_oracle.source, IntentSource::Fallback);
        assert_eq!(with_oracle.intent, keyword_only.intent);
        assert_eq!(with_oracle.intent.use_case, "agent_tools");
    }

    #[test]
    fn test_selection_oracle_is_validated() {
        let table = Arc::new(builtin_table());
        let intent = KeywordClassifier::new().intent("hello");

        let selector = ComponentSelector::with_oracle(Arc::new(ProposingOracle(vec![
            "TextInput",
            "NotAComponent",
            "AnthropicModel",
            "ChatOutput",
        ])));
        let selection = selector.select_for("hello", &intent, &table);
        assert_eq!(selection.source, SelectionSource::Oracle("proposer".to_string()));
        assert_eq!(selection.components, ["TextInput", "AnthropicModel", "ChatOutput"]);

        let hopeless = ComponentSelector::with_oracle(Arc::new(ProposingOracle(vec!["Nope"])));
        let selection = hopeless.select_for("hello", &intent, &table);
        assert_eq!(selection.source, SelectionSource::Recipe);
        assert_eq!(selection.components, ["ChatInput", "LanguageModel", "ChatOutput"]);
    }

    #[test]
    fn test_slow_selection_oracle_uses_recipe() {
        let table = Arc::new(builtin_table());
        let intent = KeywordClassifier::new().intent("build a rag index");
        let selector = ComponentSelector::with_oracle(Arc::new(SlowSelector))
            .with_timeout(Duration::from_millis(20));

        let selection = selector.select_for("build a rag index", &intent, &table);
        assert_eq!(selection.use_case, UseCase::RagSystem);
        assert_eq!(selection.source, SelectionSource::Recipe);
        assert_eq!(selection.components[0], "FileLoader");
    }
}
