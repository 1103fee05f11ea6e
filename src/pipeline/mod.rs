//! The generation pipeline: classify, select, synthesize, assemble.
//!
//! A [`FlowGenerator`] is shared across threads. Every request works against
//! one registry state (components and example flows) taken at its start, so a
//! concurrent [`reindex`](FlowGenerator::reindex) never changes a request half-way.

use crate::catalog::FlowCatalog;
use crate::config::GeneratorConfig;
use crate::document::{DocumentMetadata, FlowDocument};
use crate::error::GenerationError;
use crate::extractor::StaticExtractor;
use crate::index::IndexSnapshot;
use crate::intent::{
    Classification, IntentClassifier, IntentRecord, IntentSource, KeywordClassifier, UseCase,
};
use crate::registry::{ComponentRegistry, ComponentTable, builtin_records};
use crate::selector::{ComponentSelector, Selection, SelectionSource};
use crate::synth::{FlowGraph, FlowSynthesizer};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

mod builder;

pub use builder::GeneratorBuilder;

pub const TRACING_TARGET: &str = "kumitate::pipeline";

const SIMILAR_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    /// Skips classification when set.
    pub use_case: Option<String>,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            use_case: None,
        }
    }

    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_case = Some(use_case.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub document: FlowDocument,
    pub graph: FlowGraph,
    pub classification: Classification,
    pub selection: Selection,
    /// Names of the closest example flows, best first.
    pub similar_examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorStats {
    pub components: usize,
    pub example_flows: usize,
    pub recipes: usize,
    pub generations: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexReport {
    pub components: usize,
    pub extracted: usize,
    pub examples: usize,
    pub reused: usize,
    pub skipped: usize,
    pub cache_saved: bool,
}

pub struct FlowGenerator {
    registry: ComponentRegistry,
    classifier: IntentClassifier,
    selector: ComponentSelector,
    config: GeneratorConfig,
    generations: AtomicU64,
}

impl FlowGenerator {
    pub fn builder(config: GeneratorConfig) -> GeneratorBuilder {
        GeneratorBuilder::new(config)
    }

    /// Built-in records, keyword rules and fixed recipes.
    pub fn new() -> Self {
        Self::builder(GeneratorConfig::default()).build()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> Arc<FlowCatalog> {
        self.registry.catalog()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn stats(&self) -> GeneratorStats {
        let state = self.registry.state();
        GeneratorStats {
            components: state.components.len(),
            example_flows: state.examples.len(),
            recipes: ComponentSelector::recipe_count(),
            generations: self.generations.load(Ordering::Relaxed),
        }
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, GenerationError> {
        let description = self.validate_description(&request.description)?;
        let state = self.registry.state();
        let table = &state.components;

        let classification = match &request.use_case {
            Some(label) => overridden(description, label),
            None => self.classifier.classify(description),
        };
        let mut selection = self
            .selector
            .select_for(description, &classification.intent, table);
        if selection.components.len() > self.config.max_components {
            tracing::warn!(
                target: TRACING_TARGET,
                selected = selection.components.len(),
                max = self.config.max_components,
                "Selection truncated"
            );
            selection.components.truncate(self.config.max_components);
        }

        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let synthesizer = FlowSynthesizer::new(table).with_generation(generation);
        let mut graph = synthesizer.synthesize(&selection.components);
        if graph.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                use_case = %classification.intent.use_case,
                "No component resolved, falling back to basic_chat"
            );
            let recipe = ComponentSelector::recipe(UseCase::BasicChat);
            let fallback = &recipe[..recipe.len().min(self.config.max_components)];
            graph = synthesizer.synthesize(fallback);
            if graph.is_empty() {
                return Err(GenerationError::EmptyPipeline {
                    use_case: classification.intent.use_case.clone(),
                });
            }
            selection = Selection {
                use_case: UseCase::BasicChat,
                components: fallback.iter().map(|s| s.to_string()).collect(),
                source: SelectionSource::Recipe,
            };
        }

        let metadata = DocumentMetadata {
            complexity: classification.intent.complexity,
            capabilities: classification.intent.capabilities.clone(),
            components: selection.components.clone(),
            classifier: classification.source.label().to_string(),
            ..DocumentMetadata::new(&classification.intent.use_case, generation)
        };
        let document = FlowDocument::assemble(&graph, table, description, metadata);
        let similar_examples = state
            .examples
            .find_similar(description, SIMILAR_EXAMPLES)
            .into_iter()
            .map(|s| s.flow.name.clone())
            .collect();

        tracing::info!(
            target: TRACING_TARGET,
            generation,
            use_case = %classification.intent.use_case,
            classifier = classification.source.label(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Flow generated"
        );

        Ok(GenerationOutcome {
            document,
            graph,
            classification,
            selection,
            similar_examples,
        })
    }

    /// Re-extracts the configured directories and publishes the result.
    ///
    /// Hand-authored records take precedence over extracted ones with the same
    /// name. Extraction problems are logged and counted, never returned.
    pub fn reindex(&self) -> ReindexReport {
        let extractor = self.load_cache();
        let output = extractor.extract_all(
            self.config.components_dir.as_deref(),
            self.config.examples_dir.as_deref(),
        );

        let table = ComponentTable::new(
            builtin_records()
                .into_iter()
                .chain(output.components.extracted.iter().cloned()),
        );
        let catalog = FlowCatalog::new(output.examples.extracted.iter().cloned());
        let mut report = ReindexReport {
            components: table.len(),
            extracted: output.components.extracted.len(),
            examples: catalog.len(),
            reused: output.components.reused + output.examples.reused,
            skipped: output.components.skipped.len() + output.examples.skipped.len(),
            cache_saved: false,
        };

        self.registry.publish(table, catalog);

        if let Some(path) = &self.config.cache_path {
            match output.to_snapshot().save(path) {
                Ok(()) => report.cache_saved = true,
                Err(error) => tracing::warn!(
                    target: TRACING_TARGET,
                    %error,
                    "Index cache not saved"
                ),
            }
        }
        report
    }

    fn load_cache(&self) -> StaticExtractor {
        let Some(path) = self.config.cache_path.as_deref().filter(|p| p.exists()) else {
            return StaticExtractor::new();
        };
        match IndexSnapshot::from_file(path) {
            Ok(snapshot) => StaticExtractor::from_snapshot(&snapshot),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    %error,
                    "Ignoring unreadable index cache"
                );
                StaticExtractor::new()
            }
        }
    }

    fn validate_description<'a>(&self, description: &'a str) -> Result<&'a str, GenerationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::EmptyDescription);
        }
        let len = trimmed.chars().count();
        if len > self.config.max_description_len {
            return Err(GenerationError::DescriptionTooLong {
                len,
                max: self.config.max_description_len,
            });
        }
        Ok(trimmed)
    }
}

impl Default for FlowGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// An explicit use case. Complexity comes from the keyword rules; capabilities
/// from the label's recipe when it has one.
fn overridden(description: &str, label: &str) -> Classification {
    let keyword = KeywordClassifier::new().intent(description);
    let label = label.trim().to_lowercase();
    let capabilities = match UseCase::from_label(&label) {
        Some(use_case) => use_case.capabilities().iter().map(|c| c.to_string()).collect(),
        None => keyword.capabilities,
    };
    Classification {
        intent: IntentRecord {
            use_case: label,
            complexity: keyword.complexity,
            capabilities,
        },
        source: IntentSource::Override,
    }
}
