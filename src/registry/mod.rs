//! The component registry.
//!
//! Lookups run against an immutable [`ComponentTable`]. The registry holds the
//! current table, together with the example catalog indexed alongside it,
//! behind an atomic pointer, so a re-index publishes both in one step and
//! readers never see a half-built or mismatched pair.

use crate::catalog::FlowCatalog;
use crate::error::RegistryError;
use arc_swap::ArcSwap;
use std::sync::Arc;

mod builtin;
mod record;
mod table;
pub mod types;

pub use builtin::builtin_records;
pub use record::{Category, ComponentRecord, InputSlot, OutputSlot, Provenance, spaced_name};
pub use table::ComponentTable;
pub use types::{canonical_type, types_match};

pub const TRACING_TARGET: &str = "kumitate::registry";

/// A component table and the example catalog indexed with it.
#[derive(Debug, Default)]
pub struct RegistryState {
    pub components: Arc<ComponentTable>,
    pub examples: Arc<FlowCatalog>,
}

pub struct ComponentRegistry {
    state: ArcSwap<RegistryState>,
}

impl ComponentRegistry {
    pub fn new(table: ComponentTable) -> Self {
        Self {
            state: ArcSwap::from_pointee(RegistryState {
                components: Arc::new(table),
                examples: Arc::default(),
            }),
        }
    }

    /// A registry holding only the hand-authored records.
    pub fn with_builtins() -> Self {
        Self::new(ComponentTable::new(builtin_records()))
    }

    pub fn with_catalog(self, catalog: FlowCatalog) -> Self {
        let components = self.snapshot();
        Self {
            state: ArcSwap::from_pointee(RegistryState {
                components,
                examples: Arc::new(catalog),
            }),
        }
    }

    /// A consistent view of the current table.
    ///
    /// Hold on to the snapshot for the duration of a request; a concurrent
    /// re-index does not affect it.
    pub fn snapshot(&self) -> Arc<ComponentTable> {
        Arc::clone(&self.state.load().components)
    }

    pub fn catalog(&self) -> Arc<FlowCatalog> {
        Arc::clone(&self.state.load().examples)
    }

    /// The table and catalog as published together.
    pub fn state(&self) -> Arc<RegistryState> {
        self.state.load_full()
    }

    /// Atomically replaces the whole table, keeping the current catalog, and
    /// returns the previous table.
    pub fn reindex(&self, table: ComponentTable) -> Arc<ComponentTable> {
        let table = Arc::new(table);
        let previous = self.state.rcu(|current| RegistryState {
            components: Arc::clone(&table),
            examples: Arc::clone(&current.examples),
        });
        tracing::info!(
            target: TRACING_TARGET,
            previous = previous.components.len(),
            current = table.len(),
            "Component registry re-indexed"
        );
        Arc::clone(&previous.components)
    }

    /// Atomically replaces both the table and the catalog.
    pub fn publish(&self, table: ComponentTable, catalog: FlowCatalog) -> Arc<RegistryState> {
        let state = RegistryState {
            components: Arc::new(table),
            examples: Arc::new(catalog),
        };
        let (components, examples) = (state.components.len(), state.examples.len());
        let previous = self.state.swap(Arc::new(state));
        tracing::info!(
            target: TRACING_TARGET,
            previous = previous.components.len(),
            current = components,
            examples,
            "Component registry re-indexed"
        );
        previous
    }

    pub fn len(&self) -> usize {
        self.state.load().components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.load().components.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.load().components.contains(name)
    }

    pub fn get(&self, name: &str) -> Result<Arc<ComponentRecord>, RegistryError> {
        self.state.load().components.get(name)
    }

    pub fn search(&self, query: &str) -> Vec<Arc<ComponentRecord>> {
        self.state.load().components.search(query)
    }

    pub fn by_category(&self, category: Category) -> Vec<Arc<ComponentRecord>> {
        self.state.load().components.by_category(category)
    }

    pub fn compatible_with(&self, output_type: &str) -> Vec<Arc<ComponentRecord>> {
        self.state.load().components.compatible_with(output_type)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
