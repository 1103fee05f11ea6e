//! Static extraction of component and example-flow records.
//!
//! Artifacts are read as text and mined with pattern heuristics; nothing is
//! executed. Every artifact produces its own outcome, so one unreadable or
//! unrecognized file never stops a batch. Results come back as an
//! [`ExtractionReport`] listing what was extracted and what was skipped, and why.
//!
//! Extraction is idempotent: artifacts are visited in sorted path order and
//! records carry no run-dependent data. An extractor seeded with a previous
//! [`IndexSnapshot`](crate::index::IndexSnapshot) reuses the stored record for
//! any artifact whose fingerprint has not changed.

use crate::catalog::ExampleFlowRecord;
use crate::error::SkipReason;
use crate::index::IndexSnapshot;
use crate::registry::{Category, ComponentRecord};
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

mod component;
mod example;
mod fingerprint;
pub mod patterns;

pub use fingerprint::fingerprint;

pub const TRACING_TARGET: &str = "kumitate::extractor";

/// An artifact left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of one extraction batch.
#[derive(Debug, Clone)]
pub struct ExtractionReport<T> {
    pub extracted: Vec<T>,
    pub skipped: Vec<SkippedArtifact>,
    /// How many of `extracted` were taken from the fingerprint cache.
    pub reused: usize,
}

impl<T> Default for ExtractionReport<T> {
    fn default() -> Self {
        Self {
            extracted: Vec::new(),
            skipped: Vec::new(),
            reused: 0,
        }
    }
}

impl<T> ExtractionReport<T> {
    fn skip(&mut self, path: &Path, reason: SkipReason) {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path.display(),
            %reason,
            "Artifact skipped"
        );
        self.skipped.push(SkippedArtifact {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Skips that indicate a broken artifact rather than an unrelated file.
    pub fn failures(&self) -> impl Iterator<Item = &SkippedArtifact> {
        self.skipped
            .iter()
            .filter(|s| s.reason != SkipReason::NotAComponent)
    }
}

/// Component and example reports from one full extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutput {
    pub components: ExtractionReport<ComponentRecord>,
    pub examples: ExtractionReport<ExampleFlowRecord>,
}

impl ExtractionOutput {
    pub fn to_snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::new(
            self.components.extracted.clone(),
            self.examples.extracted.clone(),
        )
    }
}

/// Pattern-based extractor with a fingerprint cache.
#[derive(Debug, Default, Clone)]
pub struct StaticExtractor {
    components: AHashMap<String, ComponentRecord>,
    examples: AHashMap<String, ExampleFlowRecord>,
}

impl StaticExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the fingerprint cache from a previously saved index.
    pub fn from_snapshot(snapshot: &IndexSnapshot) -> Self {
        let components = snapshot
            .components
            .iter()
            .filter_map(|r| {
                r.provenance
                    .as_ref()
                    .map(|p| (p.source_path.clone(), r.clone()))
            })
            .collect();
        let examples = snapshot
            .examples
            .iter()
            .filter(|e| !e.source_path.is_empty())
            .map(|e| (e.source_path.clone(), e.clone()))
            .collect();
        Self {
            components,
            examples,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.components.len() + self.examples.len()
    }

    /// Runs both batches. A missing directory is simply not scanned.
    pub fn extract_all(
        &self,
        components_dir: Option<&Path>,
        examples_dir: Option<&Path>,
    ) -> ExtractionOutput {
        ExtractionOutput {
            components: components_dir
                .map(|dir| self.extract_components(dir))
                .unwrap_or_default(),
            examples: examples_dir
                .map(|dir| self.extract_examples(dir))
                .unwrap_or_default(),
        }
    }

    /// Recursively scans a component tree.
    ///
    /// The first directory level below `root` names the category. Hidden and
    /// dunder directories are not entered, `__init__.py` files are ignored.
    pub fn extract_components(&self, root: &Path) -> ExtractionReport<ComponentRecord> {
        let mut report = ExtractionReport::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    report.skip(&path, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_component_source(entry.path()) {
                continue;
            }

            let relative = relative_path(root, entry.path());
            let category = category_for(root, entry.path());
            let content = match fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    report.skip(entry.path(), SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };

            let digest = fingerprint(content.as_bytes());
            if let Some(cached) = self.components.get(&relative).filter(|r| {
                r.provenance
                    .as_ref()
                    .is_some_and(|p| p.fingerprint == digest)
            }) {
                report.extracted.push(cached.clone());
                report.reused += 1;
                continue;
            }

            match component::analyze_component(&content, &relative, category) {
                Ok(record) => report.extracted.push(record),
                Err(reason) => report.skip(entry.path(), reason),
            }
        }

        log_report("components", root, &report);
        report
    }

    /// Scans the `*.json` documents directly inside `dir`.
    pub fn extract_examples(&self, dir: &Path) -> ExtractionReport<ExampleFlowRecord> {
        let mut report = ExtractionReport::default();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    report.skip(&path, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }

            let relative = relative_path(dir, path);
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    report.skip(path, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };

            let digest = fingerprint(content.as_bytes());
            if let Some(cached) = self
                .examples
                .get(&relative)
                .filter(|e| e.fingerprint == digest)
            {
                report.extracted.push(cached.clone());
                report.reused += 1;
                continue;
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match example::analyze_example(&content, &relative, &stem) {
                Ok(record) => report.extracted.push(record),
                Err(reason) => report.skip(path, reason),
            }
        }

        log_report("examples", dir, &report);
        report
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && {
        let name = entry.file_name().to_string_lossy();
        name.starts_with("__") || name.starts_with('.')
    }
}

fn is_component_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
        && path.file_name().and_then(|n| n.to_str()) != Some("__init__.py")
}

/// `/`-separated path relative to `root`, stable across machines.
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn category_for(root: &Path, path: &Path) -> Category {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts = relative.components();
    match (parts.next(), parts.next()) {
        (Some(dir), Some(_)) => Category::from_label(&dir.as_os_str().to_string_lossy()),
        _ => Category::default(),
    }
}

fn log_report<T>(kind: &str, root: &Path, report: &ExtractionReport<T>) {
    for failure in report.failures() {
        tracing::warn!(
            target: TRACING_TARGET,
            path = %failure.path.display(),
            reason = %failure.reason,
            "Artifact could not be extracted"
        );
    }
    tracing::info!(
        target: TRACING_TARGET,
        kind,
        root = %root.display(),
        extracted = report.extracted.len(),
        reused = report.reused,
        skipped = report.skipped.len(),
        "Extraction finished"
    );
}
