//! Persisted extraction state.
//!
//! An [`IndexSnapshot`] holds every extracted component and example record,
//! fingerprints included. It is saved with bincode so the next run can skip
//! unchanged artifacts, and can be exported as JSON for inspection.

use crate::catalog::ExampleFlowRecord;
use crate::error::IndexError;
use crate::registry::ComponentRecord;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bumped whenever the record layout changes; older caches are ignored.
pub const INDEX_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub components: Vec<ComponentRecord>,
    pub examples: Vec<ExampleFlowRecord>,
}

impl Default for IndexSnapshot {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl IndexSnapshot {
    pub fn new(components: Vec<ComponentRecord>, examples: Vec<ExampleFlowRecord>) -> Self {
        Self {
            version: INDEX_FORMAT_VERSION,
            components,
            examples,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, IndexError> {
        encode_to_vec(self, standard()).map_err(|e| IndexError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IndexError> {
        let snapshot: Self = decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| IndexError::Decode(e.to_string()))?;
        if snapshot.version != INDEX_FORMAT_VERSION {
            return Err(IndexError::Decode(format!(
                "index format version {} is not supported (expected {})",
                snapshot.version, INDEX_FORMAT_VERSION
            )));
        }
        Ok(snapshot)
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(path, bytes).map_err(|e| io_error(path, e))
    }

    pub fn from_file(path: &Path) -> Result<Self, IndexError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Pretty-printed JSON of the whole snapshot.
    pub fn to_json(&self) -> Result<String, IndexError> {
        serde_json::to_string_pretty(self).map_err(|e| IndexError::Encode(e.to_string()))
    }

    pub fn export_json(&self, path: &Path) -> Result<(), IndexError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> IndexError {
    IndexError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
