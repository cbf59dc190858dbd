use ledger_common::notification::{Notification, NotificationContext};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Records confirmed transaction hashes for replay protection; a rollback
/// removes the same pairs again.
#[derive(Default)]
pub struct TransactionHashesObserver;

impl TransactionHashesObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for TransactionHashesObserver {
    fn name(&self) -> &'static str {
        "TransactionHashesObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::TransactionHashes { pairs } = notification else {
            return Ok(());
        };

        if context.is_execute() {
            cache.hashes.put_all(pairs)
        } else {
            cache.hashes.remove_all(pairs)
        }
    }
}
