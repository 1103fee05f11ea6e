//! Use-case classification.
//!
//! The generator only needs a label, a complexity tier and a capability set for
//! a request. Where that comes from is pluggable through [`IntentOracle`]; the
//! [`IntentClassifier`] wraps any oracle with a deadline and the deterministic
//! [`KeywordClassifier`], so a slow or failing oracle never blocks generation.

use crate::catalog::Complexity;
use crate::error::ClassificationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

mod keyword;
mod reply;
#[cfg(feature = "remote-oracle")]
pub mod remote;

pub use keyword::KeywordClassifier;
pub use reply::{parse_intent_reply, parse_selection_reply};

pub const TRACING_TARGET: &str = "kumitate::intent";

/// The use cases with a fixed recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    BasicChat,
    DocumentQa,
    AgentTools,
    RagSystem,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::BasicChat,
        UseCase::DocumentQa,
        UseCase::AgentTools,
        UseCase::RagSystem,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "basic_chat" => Some(UseCase::BasicChat),
            "document_qa" => Some(UseCase::DocumentQa),
            "agent_tools" => Some(UseCase::AgentTools),
            "rag_system" => Some(UseCase::RagSystem),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::BasicChat => "basic_chat",
            UseCase::DocumentQa => "document_qa",
            UseCase::AgentTools => "agent_tools",
            UseCase::RagSystem => "rag_system",
        }
    }

    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            UseCase::BasicChat => &["chat"],
            UseCase::DocumentQa => &["document_processing", "embeddings"],
            UseCase::AgentTools => &["agents", "tools"],
            UseCase::RagSystem => &["embeddings", "vectorstore"],
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a classifier learned about a request.
///
/// `use_case` is a free label; labels without a recipe are resolved by the
/// selector's fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub use_case: String,
    pub complexity: Complexity,
    pub capabilities: BTreeSet<String>,
}

/// A source of intent records, possibly remote and unreliable.
pub trait IntentOracle: Send + Sync {
    /// Short name used in logs and document metadata.
    fn name(&self) -> &str;

    fn classify(&self, text: &str) -> Result<IntentRecord, ClassificationError>;
}

/// Which path produced a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentSource {
    Oracle(String),
    Fallback,
    /// The caller supplied the use case explicitly.
    Override,
}

impl IntentSource {
    pub fn label(&self) -> &str {
        match self {
            IntentSource::Oracle(name) => name,
            IntentSource::Fallback => "keyword",
            IntentSource::Override => "override",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub intent: IntentRecord,
    pub source: IntentSource,
}

/// Oracle plus deterministic fallback.
///
/// [`classify`](Self::classify) never fails: oracle errors and timeouts are
/// logged and answered by the keyword rules.
#[derive(Clone)]
pub struct IntentClassifier {
    oracle: Option<Arc<dyn IntentOracle>>,
    fallback: KeywordClassifier,
    timeout: Duration,
}

impl fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("oracle", &self.oracle.as_ref().map(|o| o.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::keyword_only()
    }
}

impl IntentClassifier {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn keyword_only() -> Self {
        Self {
            oracle: None,
            fallback: KeywordClassifier,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_oracle(oracle: Arc<dyn IntentOracle>) -> Self {
        Self {
            oracle: Some(oracle),
            ..Self::keyword_only()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn oracle_name(&self) -> Option<&str> {
        self.oracle.as_ref().map(|o| o.name())
    }

    pub fn classify(&self, text: &str) -> Classification {
        let Some(oracle) = &self.oracle else {
            return self.fallback(text);
        };

        let name = oracle.name().to_string();
        let worker = Arc::clone(oracle);
        let owned = text.to_string();
        match call_with_timeout(self.timeout, move || worker.classify(&owned)) {
            Ok(intent) => Classification {
                intent,
                source: IntentSource::Oracle(name),
            },
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    oracle = %name,
                    %error,
                    "Classification unavailable, using keyword rules"
                );
                self.fallback(text)
            }
        }
    }

    fn fallback(&self, text: &str) -> Classification {
        Classification {
            intent: self.fallback.intent(text),
            source: IntentSource::Fallback,
        }
    }
}

/// Runs `call` on a blocking worker and waits at most `timeout` for it.
///
/// A call that overruns is abandoned; its eventual result is discarded.
pub(crate) fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, ClassificationError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ClassificationError> + Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .thread_name("kumitate-oracle")
        .build()
        .map_err(|e| ClassificationError::Transport(e.to_string()))?;
    let outcome = runtime
        .block_on(async { tokio::time::timeout(timeout, tokio::task::spawn_blocking(call)).await });
    // Dropping the runtime would wait for an abandoned call.
    runtime.shutdown_background();

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(ClassificationError::Transport(format!(
            "oracle worker exited without answering: {join}"
        ))),
        Err(_) => Err(ClassificationError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}
