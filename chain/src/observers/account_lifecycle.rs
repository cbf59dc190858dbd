use log::debug;

use ledger_common::notification::{Notification, NotificationContext};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Maintains account creation and destruction.
///
/// Every account-touch notification increments the touched account's
/// reference count on execute and decrements it on undo; the account state is
/// destroyed once the count returns to zero. The undo height does not have to
/// match the recorded first-seen height (several touches can land in one
/// block); only the reference count gates removal.
#[derive(Default)]
pub struct AccountLifecycleObserver;

impl AccountLifecycleObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for AccountLifecycleObserver {
    fn name(&self) -> &'static str {
        "AccountLifecycleObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::Account { account } = notification else {
            return Ok(());
        };

        if context.is_execute() {
            let state = cache.accounts.find_state_by_address(account);
            state.set_height(context.height);
            state.info_mut().increment_reference_count();
            return Ok(());
        }

        let state = cache
            .accounts
            .state_mut(account)
            .ok_or_else(|| ChainError::UnknownAccount(account.clone()))?;
        if state.height().is_none() {
            return Err(ChainError::MissingAccountHeight(account.clone()));
        }

        if state.info_mut().decrement_reference_count()? == 0 {
            cache.accounts.remove_from_cache(account)?;
            debug!("account {} released at height {}", account, context.height);
        }
        Ok(())
    }
}
