use super::{FlowGenerator, TRACING_TARGET};
use crate::catalog::FlowCatalog;
use crate::config::{GeneratorConfig, OracleKind};
use crate::intent::{IntentClassifier, IntentOracle};
use crate::registry::ComponentRegistry;
use crate::selector::{ComponentSelector, SelectionOracle};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

pub struct GeneratorBuilder {
    config: GeneratorConfig,
    registry: Option<ComponentRegistry>,
    catalog: Option<FlowCatalog>,
    intent_oracle: Option<Arc<dyn IntentOracle>>,
    selection_oracle: Option<Arc<dyn SelectionOracle>>,
}

impl GeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            registry: None,
            catalog: None,
            intent_oracle: None,
            selection_oracle: None,
        }
    }

    /// Uses `registry` instead of one holding only the built-in records.
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the example catalog of the chosen registry.
    pub fn with_catalog(mut self, catalog: FlowCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Overrides whatever oracle the config selects.
    pub fn with_intent_oracle(mut self, oracle: Arc<dyn IntentOracle>) -> Self {
        self.intent_oracle = Some(oracle);
        self
    }

    pub fn with_selection_oracle(mut self, oracle: Arc<dyn SelectionOracle>) -> Self {
        self.selection_oracle = Some(oracle);
        self
    }

    pub fn build(mut self) -> FlowGenerator {
        if self.intent_oracle.is_none() && self.selection_oracle.is_none() {
            self.install_configured_oracle();
        }

        let timeout = self.config.oracle.timeout();
        let classifier = match self.intent_oracle {
            Some(oracle) => IntentClassifier::with_oracle(oracle),
            None => IntentClassifier::keyword_only(),
        }
        .with_timeout(timeout);
        let selector = match self.selection_oracle {
            Some(oracle) => ComponentSelector::with_oracle(oracle),
            None => ComponentSelector::recipes_only(),
        }
        .with_timeout(timeout);

        let registry = self.registry.unwrap_or_default();
        let registry = match self.catalog {
            Some(catalog) => registry.with_catalog(catalog),
            None => registry,
        };

        FlowGenerator {
            registry,
            classifier,
            selector,
            config: self.config,
            generations: AtomicU64::new(0),
        }
    }

    #[cfg(feature = "remote-oracle")]
    fn install_configured_oracle(&mut self) {
        if self.config.oracle.kind != OracleKind::Remote {
            return;
        }
        match crate::intent::remote::RemoteOracle::from_config(&self.config.oracle) {
            Ok(oracle) => {
                let oracle = Arc::new(oracle);
                self.intent_oracle = Some(oracle.clone());
                self.selection_oracle = Some(oracle);
            }
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                %error,
                "Remote oracle unavailable, using keyword rules and recipes"
            ),
        }
    }

    #[cfg(not(feature = "remote-oracle"))]
    fn install_configured_oracle(&mut self) {
        if self.config.oracle.kind == OracleKind::Remote {
            tracing::warn!(
                target: TRACING_TARGET,
                "Remote oracle requested but the `remote-oracle` feature is disabled"
            );
        }
    }
}
