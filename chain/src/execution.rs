//! Drivers that replay transaction and block notification sequences against
//! a composed observer.
//!
//! Undo replays the identical sequence in the identical order with the
//! trigger flipped; every observer derives its inverse mutation from the
//! trigger. The caller decides which transactions to apply or roll back and
//! in what order.

use log::trace;

use ledger_common::{
    block::{BlockHeight, HashMetaDataPair, Timestamp},
    crypto::Address,
    notification::{Notification, NotificationContext, NotificationTrigger},
    transaction::Transaction,
};

use crate::{cache::LedgerCache, error::ChainError, observers::BlockObserver};

/// Replays a notification sequence under the given context.
pub fn apply(
    notifications: &[Notification],
    cache: &mut LedgerCache,
    observer: &mut dyn BlockObserver,
    context: &NotificationContext,
) -> Result<(), ChainError> {
    for notification in notifications {
        observer.notify(cache, notification, context)?;
    }
    Ok(())
}

/// Applies a transaction's effects at the given block position.
pub fn execute(
    transaction: &Transaction,
    cache: &mut LedgerCache,
    observer: &mut dyn BlockObserver,
    height: BlockHeight,
    timestamp: Timestamp,
) -> Result<(), ChainError> {
    trace!("executing transaction at height {}", height);
    let context = NotificationContext::new(height, timestamp, NotificationTrigger::Execute);
    apply(&transaction.notifications(), cache, observer, &context)
}

/// Rolls a transaction's effects back during a chain reorganization.
pub fn undo(
    transaction: &Transaction,
    cache: &mut LedgerCache,
    observer: &mut dyn BlockObserver,
    height: BlockHeight,
    timestamp: Timestamp,
) -> Result<(), ChainError> {
    trace!("undoing transaction at height {}", height);
    let context = NotificationContext::new(height, timestamp, NotificationTrigger::Undo);
    apply(&transaction.notifications(), cache, observer, &context)
}

/// The block-level notification sequence: the harvester earns the block
/// reward, the confirmed transaction hashes are recorded, and the harvester
/// account is touched last so a same-order undo releases the reference after
/// the reward rollback.
pub fn block_notifications(
    harvester: &Address,
    total_fees: u64,
    pairs: Vec<HashMetaDataPair>,
) -> Vec<Notification> {
    vec![
        Notification::BlockHarvest {
            harvester: harvester.clone(),
            amount: total_fees,
        },
        Notification::TransactionHashes { pairs },
        Notification::Account {
            account: harvester.clone(),
        },
    ]
}
