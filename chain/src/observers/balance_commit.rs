use ledger_common::{
    crypto::Address,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Commits credits, debits, transfers and harvest rewards to the confirmed
/// account balance.
#[derive(Default)]
pub struct BalanceCommitObserver;

impl BalanceCommitObserver {
    pub fn new() -> Self {
        Self
    }

    fn credit(
        cache: &mut LedgerCache,
        account: &Address,
        amount: u64,
    ) -> Result<(), ChainError> {
        cache
            .accounts
            .find_state_by_address(account)
            .info_mut()
            .increment_balance(amount)?;
        Ok(())
    }

    fn debit(cache: &mut LedgerCache, account: &Address, amount: u64) -> Result<(), ChainError> {
        cache
            .accounts
            .find_state_by_address(account)
            .info_mut()
            .decrement_balance(amount)?;
        Ok(())
    }
}

impl BlockObserver for BalanceCommitObserver {
    fn name(&self) -> &'static str {
        "BalanceCommitObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let is_execute = context.is_execute();
        match notification {
            Notification::BalanceCredit { account, amount }
            | Notification::BlockHarvest {
                harvester: account,
                amount,
            } => {
                if is_execute {
                    Self::credit(cache, account, *amount)
                } else {
                    Self::debit(cache, account, *amount)
                }
            }
            Notification::BalanceDebit { account, amount } => {
                if is_execute {
                    Self::debit(cache, account, *amount)
                } else {
                    Self::credit(cache, account, *amount)
                }
            }
            Notification::BalanceTransfer {
                sender,
                recipient,
                amount,
            } => {
                let (from, to) = if is_execute {
                    (sender, recipient)
                } else {
                    (recipient, sender)
                };
                Self::debit(cache, from, *amount)?;
                Self::credit(cache, to, *amount)
            }
            _ => Ok(()),
        }
    }
}
