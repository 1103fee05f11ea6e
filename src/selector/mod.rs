//! Use case to ordered component pipeline.
//!
//! The fixed recipe table is the canonical answer. An optional
//! [`SelectionOracle`] may propose a different pipeline; its proposal is
//! validated against the registry table before it is accepted.

use crate::error::ClassificationError;
use crate::intent::{IntentRecord, UseCase, call_with_timeout};
use crate::registry::ComponentTable;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const TRACING_TARGET: &str = "kumitate::selector";

const BASIC_CHAT: &[&str] = &["ChatInput", "LanguageModel", "ChatOutput"];
const DOCUMENT_QA: &[&str] = &[
    "ChatInput",
    "FileLoader",
    "TextSplitter",
    "Embeddings",
    "VectorStore",
    "LanguageModel",
    "ChatOutput",
];
const AGENT_TOOLS: &[&str] = &[
    "ChatInput",
    "Agent",
    "LanguageModel",
    "WebSearchTool",
    "ChatOutput",
];
const RAG_SYSTEM: &[&str] = &[
    "FileLoader",
    "TextSplitter",
    "Embeddings",
    "VectorStore",
    "ChatInput",
    "LanguageModel",
    "ChatOutput",
];

/// Proposes a pipeline for a request. May be slow, wrong or unavailable.
pub trait SelectionOracle: Send + Sync {
    fn name(&self) -> &str;

    fn select(
        &self,
        description: &str,
        intent: &IntentRecord,
        table: &ComponentTable,
    ) -> Result<Vec<String>, ClassificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSource {
    Recipe,
    Oracle(String),
}

/// An ordered pipeline and the recipe it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub use_case: UseCase,
    pub components: Vec<String>,
    pub source: SelectionSource,
}

#[derive(Clone)]
pub struct ComponentSelector {
    oracle: Option<Arc<dyn SelectionOracle>>,
    timeout: Duration,
}

impl fmt::Debug for ComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSelector")
            .field("oracle", &self.oracle.as_ref().map(|o| o.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ComponentSelector {
    fn default() -> Self {
        Self::recipes_only()
    }
}

impl ComponentSelector {
    pub fn recipes_only() -> Self {
        Self {
            oracle: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_oracle(oracle: Arc<dyn SelectionOracle>) -> Self {
        Self {
            oracle: Some(oracle),
            ..Self::recipes_only()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The fixed pipeline for a use case.
    pub fn recipe(use_case: UseCase) -> &'static [&'static str] {
        match use_case {
            UseCase::BasicChat => BASIC_CHAT,
            UseCase::DocumentQa => DOCUMENT_QA,
            UseCase::AgentTools => AGENT_TOOLS,
            UseCase::RagSystem => RAG_SYSTEM,
        }
    }

    pub fn recipe_count() -> usize {
        UseCase::ALL.len()
    }

    /// Resolves a label to a use case with a recipe. Unknown labels become `basic_chat`.
    pub fn resolve(label: &str) -> UseCase {
        UseCase::from_label(label).unwrap_or_else(|| {
            tracing::debug!(
                target: TRACING_TARGET,
                label,
                "No recipe for use case, using basic_chat"
            );
            UseCase::BasicChat
        })
    }

    /// Fixed-table lookup.
    pub fn select(&self, label: &str) -> Vec<String> {
        Self::recipe(Self::resolve(label))
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Asks the oracle, if any, and validates its answer against `table`.
    ///
    /// Unresolvable names are dropped. When nothing survives, or the oracle
    /// fails, the fixed recipe is returned.
    pub fn select_for(
        &self,
        description: &str,
        intent: &IntentRecord,
        table: &Arc<ComponentTable>,
    ) -> Selection {
        let use_case = Self::resolve(&intent.use_case);
        let recipe = Selection {
            use_case,
            components: self.select(use_case.as_str()),
            source: SelectionSource::Recipe,
        };
        let Some(oracle) = &self.oracle else {
            return recipe;
        };

        let name = oracle.name().to_string();
        let worker = Arc::clone(oracle);
        let (text, owned_intent, snapshot) =
            (description.to_string(), intent.clone(), Arc::clone(table));
        let proposed = call_with_timeout(self.timeout, move || {
            worker.select(&text, &owned_intent, &snapshot)
        });

        match proposed {
            Ok(names) => {
                let proposed_len = names.len();
                let components = Self::validate(names, table);
                if components.is_empty() {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        oracle = %name,
                        proposed = proposed_len,
                        "No proposed component resolved, using recipe"
                    );
                    return recipe;
                }
                Selection {
                    use_case,
                    components,
                    source: SelectionSource::Oracle(name),
                }
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    oracle = %name,
                    %error,
                    "Component selection unavailable, using recipe"
                );
                recipe
            }
        }
    }

    /// Keeps the names that resolve in `table`, in order.
    pub fn validate(names: Vec<String>, table: &ComponentTable) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| {
                let known = table.contains(name);
                if !known {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        name = %name,
                        "Dropping unregistered component from selection"
                    );
                }
                known
            })
            .collect()
    }
}
