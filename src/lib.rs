//! # Kumitate - Component Knowledge Indexing and Flow Graph Synthesis
//!
//! **Kumitate** turns a plain-language description into a flow document for a
//! node-based visual editor: typed components as nodes, compatible
//! output-to-input pairings as edges.
//!
//! ## Core Workflow
//!
//! 1.  **Index**: The [`extractor`] mines component sources and example flow
//!     documents for metadata without executing them. Records land in a
//!     [`registry::ComponentRegistry`] (built-in records always take precedence)
//!     and a [`catalog::FlowCatalog`].
//! 2.  **Classify**: An [`intent::IntentClassifier`] labels the request. Any
//!     oracle can back it; the keyword rules answer whenever the oracle fails
//!     or times out.
//! 3.  **Select**: The [`selector::ComponentSelector`] maps the label to an
//!     ordered pipeline of component names.
//! 4.  **Synthesize**: The [`synth::FlowSynthesizer`] creates one node per
//!     component on a grid and wires adjacent stages by slot type.
//! 5.  **Assemble**: [`document::FlowDocument`] renders the graph in the
//!     editor's import format.
//!
//! [`pipeline::FlowGenerator`] runs all five steps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::default().with_components_dir("components");
//!     let generator = FlowGenerator::builder(config).build();
//!     generator.reindex();
//!
//!     let request = GenerationRequest::new("A chatbot that answers questions about PDF documents");
//!     let outcome = generator.generate(&request)?;
//!
//!     println!("{}", outcome.document.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! Graphs can also be synthesized directly from a component list:
//!
//! ```rust
//! use kumitate::prelude::*;
//!
//! let registry = ComponentRegistry::with_builtins();
//! let table = registry.snapshot();
//! let graph = FlowSynthesizer::new(&table).synthesize(&["ChatInput", "LanguageModel", "ChatOutput"]);
//! assert_eq!(graph.nodes.len(), 3);
//! assert_eq!(graph.edges.len(), 2);
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod index;
pub mod intent;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod selector;
pub mod synth;
