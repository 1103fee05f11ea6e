//! Integration tests for Kumitate
//!
//! End-to-end tests that run the full generator: indexing, classification,
//! selection, synthesis and document assembly.
//!
mod common;
use common::*;
use kumitate::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::thread;

const PDF_REQUEST: &str = "Create a chatbot that can answer questions about PDF documents";

struct RagOracle;

impl IntentOracle for RagOracle {
    fn name(&self) -> &str {
        "stub-model"
    }

    fn classify(&self, _text: &str) -> Result<IntentRecord, ClassificationError> {
        Ok(IntentRecord {
            use_case: "rag_system".to_string(),
            complexity: Complexity::Complex,
            capabilities: BTreeSet::from(["embeddings".to_string()]),
        })
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_pdf_request_end_to_end() {
        let generator = FlowGenerator::new();
        let outcome = generator
            .generate(&GenerationRequest::new(PDF_REQUEST))
            .expect("Failed to generate flow");

        assert_eq!(outcome.classification.intent.use_case, "document_qa");
        assert_eq!(outcome.graph.nodes.len(), 7);
        assert_eq!(outcome.graph.edges.len(), 4);
        assert!(outcome.graph.validate(&builtin_table()).is_ok());

        let document = &outcome.document;
        assert_eq!(document.name, "Generated Flow - Document Qa");
        assert_eq!(document.description, format!("Generated flow: {PDF_REQUEST}"));
        assert_eq!(document.node_count(), 7);
        assert_eq!(document.edge_count(), 4);
        assert_eq!(document.metadata.classifier, "keyword");
        assert_eq!(document.metadata.generation_index, 0);
        assert_eq!(document.metadata.components.len(), 7);
        assert_eq!(document.metadata.complexity, Complexity::Medium);

        let second = generator
            .generate(&GenerationRequest::new(PDF_REQUEST))
            .expect("Failed to generate flow");
        assert_eq!(second.document.metadata.generation_index, 1);
        assert_eq!(generator.stats().generations, 2);
    }

    #[test]
    fn test_document_json_round_trip() {
        let generator = FlowGenerator::new();
        let outcome = generator
            .generate(&GenerationRequest::new("A research agent with web search tools"))
            .expect("Failed to generate flow");

        let json = outcome.document.to_json().expect("Failed to serialize document");
        let parsed = FlowDocument::from_json(&json).expect("Failed to parse document");
        assert_eq!(parsed, outcome.document);
        assert_eq!(parsed.node_count(), outcome.graph.nodes.len());
        assert_eq!(parsed.edge_count(), outcome.graph.edges.len());
        assert_eq!(parsed.graph(), outcome.graph);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first_edge = &value["data"]["edges"][0];
        assert!(
            first_edge["id"]
                .as_str()
                .unwrap()
                .starts_with("reactflow__edge-ChatInput-")
        );
        assert_eq!(value["data"]["nodes"][0]["type"], "genericNode");
    }

    #[test]
    fn test_use_case_override() {
        let generator = FlowGenerator::new();
        let outcome = generator
            .generate(&GenerationRequest::new(PDF_REQUEST).with_use_case("agent_tools"))
            .expect("Failed to generate flow");

        assert_eq!(outcome.selection.use_case, UseCase::AgentTools);
        assert_eq!(outcome.document.metadata.classifier, "override");
        assert_eq!(outcome.document.name, "Generated Flow - Agent Tools");
        assert!(outcome.graph.nodes[1].id.starts_with("Agent-"));
    }

    #[test]
    fn test_configured_oracle_labels_document() {
        let generator = FlowGenerator::builder(GeneratorConfig::default())
            .with_intent_oracle(Arc::new(RagOracle))
            .build();
        let outcome = generator
            .generate(&GenerationRequest::new("hello there"))
            .expect("Failed to generate flow");

        assert_eq!(outcome.document.metadata.classifier, "stub-model");
        assert_eq!(outcome.document.metadata.complexity, Complexity::Complex);
        assert_eq!(outcome.selection.use_case, UseCase::RagSystem);
        assert!(outcome.graph.nodes[0].id.starts_with("FileLoader-"));
    }

    #[test]
    fn test_description_validation() {
        let generator = FlowGenerator::new();
        assert_eq!(
            generator.generate(&GenerationRequest::new("  \n\t ")).unwrap_err(),
            GenerationError::EmptyDescription
        );

        let long = "a".repeat(501);
        assert_eq!(
            generator.generate(&GenerationRequest::new(long)).unwrap_err(),
            GenerationError::DescriptionTooLong { len: 501, max: 500 }
        );
        assert_eq!(generator.stats().generations, 0);
    }

    #[test]
    fn test_selection_is_truncated_to_max_components() {
        let generator =
            FlowGenerator::builder(GeneratorConfig::default().with_max_components(2)).build();
        let outcome = generator
            .generate(&GenerationRequest::new(PDF_REQUEST))
            .expect("Failed to generate flow");

        assert_eq!(outcome.selection.components, ["ChatInput", "FileLoader"]);
        assert_eq!(outcome.graph.nodes.len(), 2);
        assert_eq!(outcome.graph.edges.len(), 1);
        assert_eq!(outcome.document.metadata.components.len(), 2);
    }

    #[test]
    fn test_basic_chat_fallback_respects_max_components() {
        let basic_chat = ["ChatInput", "LanguageModel", "ChatOutput"];
        let records = kumitate::registry::builtin_records()
            .into_iter()
            .filter(|r| basic_chat.contains(&r.name.as_str()));
        let generator = FlowGenerator::builder(GeneratorConfig::default().with_max_components(2))
            .with_registry(ComponentRegistry::new(ComponentTable::new(records)))
            .build();

        let outcome = generator
            .generate(&GenerationRequest::new("index my notes").with_use_case("rag_system"))
            .expect("Failed to generate flow");
        assert_eq!(outcome.selection.use_case, UseCase::BasicChat);
        assert_eq!(outcome.selection.components, ["ChatInput", "LanguageModel"]);
        assert_eq!(outcome.graph.nodes.len(), 2);
        assert_eq!(outcome.graph.edges.len(), 1);
        assert_eq!(outcome.document.node_count(), 2);
    }

    #[test]
    fn test_unresolvable_pipeline_is_an_error() {
        let registry = ComponentRegistry::new(ComponentTable::new(vec![record(
            "Lonely",
            &[("value", "str")],
            &[],
        )]));
        let generator = FlowGenerator::builder(GeneratorConfig::default())
            .with_registry(registry)
            .build();

        let error = generator
            .generate(&GenerationRequest::new("just chat"))
            .unwrap_err();
        assert_eq!(
            error,
            GenerationError::EmptyPipeline {
                use_case: "basic_chat".to_string()
            }
        );
    }

    #[test]
    fn test_reindex_from_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let components = dir.path().join("components");
        let examples = dir.path().join("flows");
        create_component_tree(&components);
        create_example_dir(&examples);

        let config = GeneratorConfig::default()
            .with_components_dir(&components)
            .with_examples_dir(&examples)
            .with_cache_path(dir.path().join("cache/index.bin"));
        let generator = FlowGenerator::builder(config).build();

        let report = generator.reindex();
        let builtins = kumitate::registry::builtin_records().len();
        assert_eq!(report.extracted, 3);
        assert_eq!(report.components, builtins + 2);
        assert_eq!(report.examples, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.reused, 0);
        assert!(report.cache_saved);

        // The built-in record wins over the extracted one with the same name.
        let chat_input = generator.registry().get("ChatInput").unwrap();
        assert_eq!(chat_input.description, "Get chat inputs from the Playground");
        assert!(generator.registry().contains("PromptBuilder"));
        assert!(generator.registry().contains("WeatherLookup"));

        let stats = generator.stats();
        assert_eq!(stats.components, builtins + 2);
        assert_eq!(stats.example_flows, 2);
        assert_eq!(stats.recipes, 4);

        let outcome = generator
            .generate(&GenerationRequest::new(PDF_REQUEST))
            .expect("Failed to generate flow");
        assert_eq!(outcome.similar_examples, ["Vector Store RAG"]);

        let again = generator.reindex();
        assert_eq!(again.reused, 5);
        assert_eq!(again.components, report.components);
    }

    #[test]
    fn test_reindex_publishes_components_and_examples_together() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let components = dir.path().join("components");
        let examples = dir.path().join("flows");
        create_component_tree(&components);
        create_example_dir(&examples);

        let seeded = FlowCatalog::new(vec![ExampleFlowRecord::new(
            "Seed Chat",
            "A simple chat",
            Default::default(),
            3,
            2,
        )]);
        let config = GeneratorConfig::default()
            .with_components_dir(&components)
            .with_examples_dir(&examples);
        let generator = FlowGenerator::builder(config).with_catalog(seeded).build();
        let builtins = kumitate::registry::builtin_records().len();

        let before = generator.registry().state();
        assert_eq!(before.components.len(), builtins);
        assert_eq!(before.examples.len(), 1);
        assert_eq!(generator.stats().example_flows, 1);

        generator.reindex();
        let after = generator.registry().state();
        assert_eq!(after.components.len(), builtins + 2);
        assert_eq!(after.examples.len(), 2);
        assert!(after.examples.get("Seed Chat").is_none());
        // A state taken earlier still pairs the old table with the old catalog.
        assert_eq!(before.components.len(), builtins);
        assert!(before.examples.get("Seed Chat").is_some());
    }

    #[test]
    fn test_reindex_without_directories_keeps_builtins() {
        let generator = FlowGenerator::new();
        let report = generator.reindex();
        assert_eq!(report.extracted, 0);
        assert_eq!(report.components, kumitate::registry::builtin_records().len());
        assert!(!report.cache_saved);
        assert!(generator.catalog().is_empty());
    }

    #[test]
    fn test_concurrent_generation_during_reindex() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let components = dir.path().join("components");
        create_component_tree(&components);
        let generator = Arc::new(
            FlowGenerator::builder(GeneratorConfig::default().with_components_dir(&components))
                .build(),
        );
        let requests = [
            PDF_REQUEST,
            "An autonomous agent with tools",
            "Build a RAG pipeline over my notes",
            "Say hello",
        ];

        let workers: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || {
                    (0..10)
                        .map(|_| {
                            generator
                                .generate(&GenerationRequest::new(request))
                                .expect("Failed to generate flow")
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for _ in 0..5 {
            generator.reindex();
        }

        let table = builtin_table();
        let mut indices = HashSet::new();
        for worker in workers {
            for outcome in worker.join().expect("Worker panicked") {
                assert!(outcome.graph.validate(&table).is_ok());
                assert_eq!(outcome.document.node_count(), outcome.graph.nodes.len());
                assert!(indices.insert(outcome.document.metadata.generation_index));
            }
        }
        assert_eq!(indices.len(), 40);
        assert_eq!(generator.stats().generations, 40);
        assert!(generator.registry().contains("PromptBuilder"));
    }
}
