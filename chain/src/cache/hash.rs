use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use ledger_common::{
    block::{HashMetaData, HashMetaDataPair, Timestamp},
    config::{DEFAULT_HASH_RETENTION_HOURS, MIN_HASH_RETENTION_HOURS},
    crypto::Hash,
};

use crate::error::ChainError;

/// Cache of confirmed transaction hashes, used for replay detection.
///
/// Entries are inserted when a block is applied and removed again when it is
/// rolled back; pruning drops entries older than the retention window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCache {
    entries: IndexMap<Hash, HashMetaData>,
    /// Retention window in hours; `None` keeps entries forever
    retention_hours: Option<u32>,
}

impl Default for HashCache {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            retention_hours: Some(DEFAULT_HASH_RETENTION_HOURS),
        }
    }
}

impl HashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache with an explicit retention window. Retention below
    /// the protocol minimum is rejected; `None` means unlimited.
    pub fn with_retention(retention_hours: Option<u32>) -> Result<Self, ChainError> {
        if let Some(hours) = retention_hours {
            if hours < MIN_HASH_RETENTION_HOURS {
                return Err(ChainError::RetentionTooShort {
                    minimum: MIN_HASH_RETENTION_HOURS,
                    requested: hours,
                });
            }
        }

        Ok(Self {
            entries: IndexMap::new(),
            retention_hours,
        })
    }

    pub fn retention_hours(&self) -> Option<u32> {
        self.retention_hours
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, hash: &Hash) -> Option<&HashMetaData> {
        self.entries.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn any(&self, hashes: &[Hash]) -> bool {
        hashes.iter().any(|hash| self.contains(hash))
    }

    /// Inserts one pair. A known hash is a consistency violation.
    pub fn put(&mut self, pair: HashMetaDataPair) -> Result<(), ChainError> {
        if self.entries.contains_key(&pair.hash) {
            return Err(ChainError::DuplicateHash(pair.hash));
        }

        self.entries.insert(pair.hash, pair.meta_data);
        Ok(())
    }

    /// Inserts all pairs; fails without modification if any hash is known.
    pub fn put_all(&mut self, pairs: &[HashMetaDataPair]) -> Result<(), ChainError> {
        for pair in pairs {
            if self.entries.contains_key(&pair.hash) {
                return Err(ChainError::DuplicateHash(pair.hash.clone()));
            }
        }

        for pair in pairs {
            self.entries.insert(pair.hash.clone(), pair.meta_data);
        }
        Ok(())
    }

    /// Removes one pair. An unknown hash is a consistency violation.
    pub fn remove(&mut self, hash: &Hash) -> Result<(), ChainError> {
        self.entries
            .shift_remove(hash)
            .ok_or_else(|| ChainError::UnknownHash(hash.clone()))?;
        Ok(())
    }

    /// Removes all pairs; fails without modification if any hash is unknown.
    pub fn remove_all(&mut self, pairs: &[HashMetaDataPair]) -> Result<(), ChainError> {
        for pair in pairs {
            if !self.entries.contains_key(&pair.hash) {
                return Err(ChainError::UnknownHash(pair.hash.clone()));
            }
        }

        for pair in pairs {
            self.entries.shift_remove(&pair.hash);
        }
        Ok(())
    }

    /// Drops all entries with a timestamp strictly older than
    /// `timestamp - retention`. A cache with unlimited retention keeps
    /// everything.
    pub fn prune(&mut self, timestamp: Timestamp) {
        let Some(hours) = self.retention_hours else {
            return;
        };

        let retention_seconds = hours as u64 * 3600;
        let cutoff = timestamp.saturating_sub(retention_seconds);
        self.entries.retain(|_, meta| meta.timestamp >= cutoff);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
