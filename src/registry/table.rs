use super::record::{Category, ComponentRecord};
use super::types::types_match;
use super::TRACING_TARGET;
use crate::error::RegistryError;
use ahash::AHashMap;
use std::sync::Arc;

/// An immutable, fully indexed set of component records.
///
/// A table is built once and never edited. Replacing the registry contents
/// means building a new table and publishing it through `ComponentRegistry::reindex`.
#[derive(Debug, Default, Clone)]
pub struct ComponentTable {
    records: Vec<Arc<ComponentRecord>>,
    by_name: AHashMap<String, usize>,
    by_category: AHashMap<Category, Vec<usize>>,
    by_use_case: AHashMap<String, Vec<usize>>,
}

impl ComponentTable {
    /// Builds a table from records in priority order: the first record with a
    /// given name wins, later duplicates are dropped.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ComponentRecord>,
    {
        let mut table = Self::default();
        for record in records {
            if table.by_name.contains_key(&record.name) {
                tracing::debug!(
                    target: TRACING_TARGET,
                    name = %record.name,
                    "Duplicate component record dropped"
                );
                continue;
            }
            let position = table.records.len();
            table.by_name.insert(record.name.clone(), position);
            table
                .by_category
                .entry(record.category)
                .or_default()
                .push(position);
            for use_case in &record.use_cases {
                let bucket = table.by_use_case.entry(use_case.to_lowercase()).or_default();
                if bucket.last() != Some(&position) {
                    bucket.push(position);
                }
            }
            table.records.push(Arc::new(record));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates the records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentRecord>> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Looks up a record by its exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Result<Arc<ComponentRecord>, RegistryError> {
        self.by_name
            .get(name)
            .map(|&i| Arc::clone(&self.records[i]))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Case-insensitive substring search over name, description and use cases.
    ///
    /// Results are ranked: exact name matches first, then name substrings,
    /// then description/use-case hits. Ties keep registration order.
    pub fn search(&self, query: &str) -> Vec<Arc<ComponentRecord>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(u8, usize)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches_query(&needle))
            .map(|(i, r)| {
                let name = r.name.to_lowercase();
                let rank = if name == needle {
                    0
                } else if name.contains(&needle) {
                    1
                } else {
                    2
                };
                (rank, i)
            })
            .collect();
        hits.sort();
        hits.into_iter()
            .map(|(_, i)| Arc::clone(&self.records[i]))
            .collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<Arc<ComponentRecord>> {
        self.collect_positions(self.by_category.get(&category))
    }

    /// Records tagged with the given use case (case-insensitive, exact tag).
    pub fn with_use_case(&self, use_case: &str) -> Vec<Arc<ComponentRecord>> {
        self.collect_positions(self.by_use_case.get(&use_case.to_lowercase()))
    }

    /// Records with at least one input slot accepting `output_type`.
    pub fn compatible_with(&self, output_type: &str) -> Vec<Arc<ComponentRecord>> {
        self.records
            .iter()
            .filter(|r| r.inputs.iter().any(|s| types_match(output_type, &s.type_name)))
            .cloned()
            .collect()
    }

    /// Lower-cased use-case tag to component names, sorted by tag.
    pub fn use_case_index(&self) -> Vec<(&str, Vec<&str>)> {
        let mut index: Vec<(&str, Vec<&str>)> = self
            .by_use_case
            .iter()
            .map(|(tag, positions)| {
                (
                    tag.as_str(),
                    positions
                        .iter()
                        .map(|&i| self.records[i].name.as_str())
                        .collect(),
                )
            })
            .collect();
        index.sort_by(|a, b| a.0.cmp(b.0));
        index
    }

    fn collect_positions(&self, positions: Option<&Vec<usize>>) -> Vec<Arc<ComponentRecord>> {
        positions
            .map(|ps| ps.iter().map(|&i| Arc::clone(&self.records[i])).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<ComponentRecord> for ComponentTable {
    fn from_iter<T: IntoIterator<Item = ComponentRecord>>(iter: T) -> Self {
        Self::new(iter)
    }
}
