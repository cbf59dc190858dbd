use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// Height of a block in the chain, starting at 1 for the genesis block.
pub type BlockHeight = u64;

/// Block timestamp in seconds.
pub type Timestamp = u64;

/// Metadata recorded for a confirmed transaction hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashMetaData {
    /// Height of the block that confirmed the transaction
    pub height: BlockHeight,
    /// Timestamp of the block that confirmed the transaction
    pub timestamp: Timestamp,
}

impl HashMetaData {
    pub const fn new(height: BlockHeight, timestamp: Timestamp) -> Self {
        Self { height, timestamp }
    }
}

/// A transaction hash together with its confirmation metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashMetaDataPair {
    pub hash: Hash,
    pub meta_data: HashMetaData,
}

impl HashMetaDataPair {
    pub const fn new(hash: Hash, meta_data: HashMetaData) -> Self {
        Self { hash, meta_data }
    }
}
