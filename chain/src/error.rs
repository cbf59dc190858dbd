use thiserror::Error;

use ledger_common::{
    crypto::{Address, Hash},
    error::StateError,
    mosaic::MosaicId,
    namespace::NamespaceId,
};

/// Errors raised while dispatching notifications against the ledger caches.
///
/// All of these mark a broken execute/undo pairing or an inconsistent cache
/// and abort the enclosing block application; expected negative outcomes
/// (mempool validity) are booleans, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("No cached state for account {0}")]
    UnknownAccount(Address),

    #[error("Account {0} has no recorded first-seen height")]
    MissingAccountHeight(Address),

    #[error("Namespace {0} already exists in cache")]
    DuplicateNamespace(NamespaceId),

    #[error("Namespace {0} not found in cache")]
    UnknownNamespace(NamespaceId),

    #[error("Namespace {0} still owns mosaic definitions")]
    NamespaceNotEmpty(NamespaceId),

    #[error("Mosaic {0} already exists in cache")]
    DuplicateMosaic(MosaicId),

    #[error("Mosaic {0} not found in cache")]
    UnknownMosaic(MosaicId),

    #[error("Transaction hash {0} already known")]
    DuplicateHash(Hash),

    #[error("Transaction hash {0} not found in cache")]
    UnknownHash(Hash),

    #[error("Hash cache retention time must be at least {minimum} hours, got {requested}")]
    RetentionTooShort { minimum: u32, requested: u32 },
}
