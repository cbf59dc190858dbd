mod account;
mod hash;
mod mosaic;
mod namespace;

pub use account::AccountStateCache;
pub use hash::HashCache;
pub use mosaic::MosaicCache;
pub use namespace::{Mosaics, NamespaceCache, NamespaceEntry};

use serde::{Deserialize, Serialize};

/// The mutable ledger state shared by all observers within one dispatch.
///
/// Dispatch is sequential and single-threaded; callers needing speculative
/// execution clone the cache and discard the copy on failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerCache {
    pub accounts: AccountStateCache,
    pub namespaces: NamespaceCache,
    pub mosaics: MosaicCache,
    pub hashes: HashCache,
}

impl LedgerCache {
    pub fn new() -> Self {
        Self::default()
    }
}
