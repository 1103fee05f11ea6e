//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to index components and generate flows.

// Pipeline
pub use crate::config::{GeneratorConfig, OracleConfig, OracleKind};
pub use crate::pipeline::{
    FlowGenerator, GenerationOutcome, GenerationRequest, GeneratorStats, ReindexReport,
};

// Knowledge
pub use crate::catalog::{Complexity, ExampleFlowRecord, FlowCatalog};
pub use crate::extractor::{ExtractionReport, StaticExtractor};
pub use crate::index::IndexSnapshot;
pub use crate::registry::{Category, ComponentRecord, ComponentRegistry, ComponentTable};

// Classification and selection
pub use crate::intent::{IntentClassifier, IntentOracle, IntentRecord, KeywordClassifier, UseCase};
pub use crate::selector::{ComponentSelector, SelectionOracle};

// Graphs and documents
pub use crate::document::{DocumentMetadata, FlowDocument};
pub use crate::synth::{FlowEdge, FlowGraph, FlowNode, FlowSynthesizer};

// Error types
pub use crate::error::{
    ClassificationError, ConfigError, GenerationError, GraphError, IndexError, RegistryError,
    SkipReason,
};
