use crate::block::BlockHeight;

// 6 decimals numbers
pub const COIN_DECIMALS: u8 = 6;
// 1 000 000 atomic units to represent 1 coin
pub const COIN_VALUE: u64 = 10u64.pow(COIN_DECIMALS as u32);

// Height of the genesis block
pub const GENESIS_HEIGHT: BlockHeight = 1;

// Estimated blocks produced per day, used as the vesting bucket interval
pub const BLOCKS_PER_DAY: u64 = 1440;
// Estimated blocks produced per year
pub const BLOCKS_PER_YEAR: u64 = 365 * BLOCKS_PER_DAY;

// Per-bucket decay applied to the unvested part of a balance:
// unvested' = unvested * 9 / 10 (integer floor)
pub const UNVESTED_DECAY_NUMERATOR: u64 = 9;
pub const UNVESTED_DECAY_DENOMINATOR: u64 = 10;

// A namespace expires this many blocks after its provision height
pub const NAMESPACE_LIFETIME: u64 = BLOCKS_PER_YEAR;

// Weighted balance entries below height - WEIGHTED_BALANCE_HISTORY are
// consolidated away by the pruning observer
pub const WEIGHTED_BALANCE_HISTORY: u64 = BLOCKS_PER_DAY;
// Outlinks below height - OUTLINK_HISTORY are dropped by the pruning observer
pub const OUTLINK_HISTORY: u64 = 31 * BLOCKS_PER_DAY;
// Pruning fires only when height % PRUNE_INTERVAL == 1
pub const PRUNE_INTERVAL: u64 = 360;

// Transaction hashes are kept for replay protection at least this long
pub const MIN_HASH_RETENTION_HOURS: u32 = 36;
pub const DEFAULT_HASH_RETENTION_HOURS: u32 = 36;
