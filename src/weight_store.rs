//! # Weight Store
//!
//! Durable key-value mapping from feature name to weight, persisted as a JSON
//! document of `{feature_name, weight_value}` rows.
//!
//! - `replace_all` swaps the *entire* set in one shot: the new document is
//!   written to a sibling temp file and renamed over the old one, so a failed
//!   write leaves the previous configuration fully intact. There is no
//!   per-feature patch operation and no history.
//! - `entries` returns every stored row, empty if never configured.
//! - Unrecognized feature names found in an existing file are kept and
//!   returned as stored; membership in the recognized set is enforced by the
//!   validated configuration type at the API boundary, not here.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::weights::{FeatureWeights, WeightEntry};

#[derive(Debug)]
pub struct WeightStore {
    path: PathBuf,
    entries: RwLock<Vec<WeightEntry>>,
}

impl WeightStore {
    /// Open the store backed by `path`. A missing file means "never
    /// configured" and is not an error; a corrupt file is.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing weight config at {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading weight config at {}", path.display()))
            }
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Every stored entry, in stored order. Empty if never configured.
    pub fn entries(&self) -> Vec<WeightEntry> {
        self.entries.read().expect("weight store lock poisoned").clone()
    }

    /// The configuration the scorer should apply right now: stored entries if
    /// any, the balanced default otherwise.
    pub fn current(&self) -> FeatureWeights {
        let guard = self.entries.read().expect("weight store lock poisoned");
        FeatureWeights::resolve(&guard)
    }

    /// Atomically replace the whole stored set with `config`.
    ///
    /// Every prior entry is dropped; the store afterwards holds exactly one
    /// row per recognized feature. On any failure the previous file (and the
    /// in-memory view) remain unchanged.
    pub fn replace_all(&self, config: &FeatureWeights) -> Result<()> {
        let rows = config.entries();

        // Hold the write lock across the swap so readers never interleave
        // with a half-applied replacement within this process.
        let mut guard = self.entries.write().expect("weight store lock poisoned");

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }

        // Temp file in the same directory, then rename: the old document is
        // only replaced once the new one is fully on disk.
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&rows).context("serializing weight config")?;
        fs::write(&tmp, bytes)
            .with_context(|| format!("writing weight config to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("installing weight config at {}", self.path.display()))?;

        *guard = rows;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
