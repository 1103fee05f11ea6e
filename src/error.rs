use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by registry lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Component '{name}' is not registered")]
    NotFound { name: String },
}

/// Why a single artifact was left out of an extraction batch.
///
/// A skip is never fatal: the extractor records it next to the path and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("Could not read artifact: {0}")]
    Unreadable(String),

    #[error("No component marker found")]
    NotAComponent,

    #[error("Invalid flow document: {0}")]
    InvalidDocument(String),

    #[error("Flow document has no 'data.nodes' graph")]
    MissingGraph,
}

/// Failures of the external classification/selection oracle.
///
/// These are absorbed by the fallback path and only ever reach logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Oracle did not answer within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Oracle transport failure: {0}")]
    Transport(String),

    #[error("Oracle returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("Oracle is not configured: {0}")]
    Disabled(String),
}

/// Errors that surface from a generation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Flow description is empty")]
    EmptyDescription,

    #[error("Flow description is {len} characters long, the limit is {max}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("No registered component could be resolved for use case '{use_case}'")]
    EmptyPipeline { use_case: String },

    #[error("Failed to serialize flow document: {0}")]
    Serialization(String),
}

/// Errors from saving, loading or exporting the extracted index.
#[derive(Error, Debug, Clone)]
pub enum IndexError {
    #[error("Could not access index file '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Index encoding failed: {0}")]
    Encode(String),

    #[error("Index decoding failed: {0}")]
    Decode(String),
}

/// Errors from loading a configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),
}

/// Structural defects found by `FlowGraph::validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node id '{id}' is used more than once")]
    DuplicateNodeId { id: String },

    #[error("Edge '{edge}' references unknown node '{node}'")]
    DanglingEdge { edge: String, node: String },

    #[error("Edge '{edge}' does not point forward in pipeline order")]
    BackwardEdge { edge: String },

    #[error("Edge '{edge}' uses a slot its component does not declare: {slot}")]
    UndeclaredSlot { edge: String, slot: String },
}
