use thiserror::Error;

use crate::block::BlockHeight;

/// Consistency violations raised by the account and asset state containers.
///
/// Every variant marks a broken execute/undo pairing or an arithmetic bound;
/// none of these are recoverable by the dispatch that triggered them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Balance overflow")]
    BalanceOverflow,

    #[error("Balance underflow: need {need}, have {have}")]
    BalanceUnderflow { need: u64, have: u64 },

    #[error("Insufficient weighted balance: sending {amount}, holding {balance}")]
    InsufficientWeightedBalance { amount: u64, balance: u64 },

    #[error("Height {height} is below the latest weighted balance entry")]
    NonMonotonicHeight { height: BlockHeight },

    #[error("No matching weighted balance entry at height {height} to undo")]
    WeightedUndoMismatch { height: BlockHeight },

    #[error("Cannot convert {entries} weighted balance entries to fully vested")]
    NotConvertible { entries: usize },

    #[error("Reference count underflow")]
    ReferenceCountUnderflow,

    #[error("Harvested block count underflow")]
    HarvestedBlocksUnderflow,

    #[error("Account is a cosignatory and cannot become multisig")]
    AlreadyCosignatory,

    #[error("Account is multisig and cannot become a cosignatory")]
    AlreadyMultisig,

    #[error("Cosignatory link not found")]
    UnknownCosignatoryLink,

    #[error("Minimum cosignatories cannot become negative")]
    NegativeMinCosignatories,

    #[error("No matching remote link to remove")]
    RemoteLinkMismatch,

    #[error("No matching outlink to remove")]
    OutlinkMismatch,

    #[error("Supply overflow")]
    SupplyOverflow,

    #[error("Supply underflow: removing {delta}, supply {supply}")]
    SupplyUnderflow { delta: u64, supply: u64 },

    #[error("Quantity overflow for supply {supply} at divisibility {divisibility}")]
    QuantityOverflow { supply: u64, divisibility: u8 },

    #[error("Mosaic balance underflow: need {need}, have {have}")]
    MosaicBalanceUnderflow { need: u64, have: u64 },
}
