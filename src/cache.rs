//! Memoized dataset loading
//!
//! Loading and aggregating the source is by far the most expensive step of a
//! render cycle, so a [`DatasetCache`] keeps each loaded [`Dataset`] keyed by
//! the source path. An entry is reused only while the file content still has
//! the fingerprint it was loaded with; otherwise it is loaded again. Entries
//! can also be dropped explicitly, which lets callers force a fresh load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::LoaderConfig;
use crate::error::util::safe_read_file;
use crate::error::{FertilityError, Result};
use crate::loader::{fingerprint, load_dataset};
use crate::models::Dataset;

/// Scoped cache of loaded datasets
#[derive(Debug, Default)]
pub struct DatasetCache {
    /// Loader settings used for every load through this cache
    config: LoaderConfig,
    /// Cached datasets by canonical source path
    entries: RwLock<HashMap<PathBuf, Arc<Dataset>>>,
}

/// Whether a lookup was served from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The cached dataset was reused
    Hit,
    /// The source was loaded because nothing was cached for it
    Miss,
    /// The source was reloaded because its content changed
    Stale,
}

impl DatasetCache {
    /// Create an empty cache with the given loader configuration
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Loader configuration in use
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a dataset, reusing the cached one while the source is unchanged
    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>> {
        self.load_with_outcome(path).map(|(dataset, _)| dataset)
    }

    /// Like [`DatasetCache::load`], also reporting whether the cache was used
    pub fn load_with_outcome(&self, path: &Path) -> Result<(Arc<Dataset>, CacheOutcome)> {
        let key = cache_key(path);
        let current = fingerprint(&safe_read_file(path, "checking the cached dataset")?);

        let outcome = {
            let entries = self.entries.read().map_err(|_| {
                FertilityError::InvalidOperation("Failed to acquire read lock on dataset cache".to_string())
            })?;

            match entries.get(&key) {
                Some(dataset) if dataset.source().fingerprint == current => {
                    log::debug!("Dataset cache hit for {}", key.display());
                    return Ok((Arc::clone(dataset), CacheOutcome::Hit));
                }
                Some(_) => CacheOutcome::Stale,
                None => CacheOutcome::Miss,
            }
        };

        if outcome == CacheOutcome::Stale {
            log::info!("Source {} changed since it was cached, reloading", key.display());
        }

        let dataset = Arc::new(load_dataset(path, &self.config)?);

        self.entries
            .write()
            .map_err(|_| {
                FertilityError::InvalidOperation("Failed to acquire write lock on dataset cache".to_string())
            })?
            .insert(key, Arc::clone(&dataset));

        Ok((dataset, outcome))
    }

    /// Drop the cached dataset for a source; returns whether one was cached
    pub fn invalidate(&self, path: &Path) -> Result<bool> {
        let key = cache_key(path);
        let removed = self
            .entries
            .write()
            .map_err(|_| {
                FertilityError::InvalidOperation("Failed to acquire write lock on dataset cache".to_string())
            })?
            .remove(&key)
            .is_some();

        if removed {
            log::debug!("Invalidated cached dataset for {}", key.display());
        }
        Ok(removed)
    }

    /// Drop every cached dataset
    pub fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| {
                FertilityError::InvalidOperation("Failed to acquire write lock on dataset cache".to_string())
            })?
            .clear();
        Ok(())
    }

    /// Number of cached datasets
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
