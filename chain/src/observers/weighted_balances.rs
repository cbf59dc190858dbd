use ledger_common::{
    block::BlockHeight,
    config::GENESIS_HEIGHT,
    crypto::Address,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Feeds credits, debits, transfers and harvest rewards into the vesting
/// engine of the affected accounts.
///
/// Undo replays the identical notification and maps it onto the matching
/// `undo_send`/`undo_receive` calls; those expect exact execute/undo pairing
/// and are not independently validated. Receives in the genesis block vest
/// immediately, except for the genesis account itself.
pub struct WeightedBalancesObserver {
    genesis_address: Option<Address>,
}

impl WeightedBalancesObserver {
    pub fn new(genesis_address: Option<Address>) -> Self {
        Self { genesis_address }
    }

    fn receive(
        &self,
        cache: &mut LedgerCache,
        height: BlockHeight,
        account: &Address,
        amount: u64,
    ) -> Result<(), ChainError> {
        if amount == 0 {
            return Ok(());
        }

        let state = cache.accounts.find_state_by_address(account);
        state.weighted_balances_mut().add_receive(height, amount)?;

        let is_genesis_account = self.genesis_address.as_ref() == Some(account);
        if height == GENESIS_HEIGHT && !is_genesis_account {
            state.weighted_balances_mut().convert_to_fully_vested()?;
        }
        Ok(())
    }

    fn send(
        &self,
        cache: &mut LedgerCache,
        height: BlockHeight,
        account: &Address,
        amount: u64,
    ) -> Result<(), ChainError> {
        if amount == 0 {
            return Ok(());
        }

        cache
            .accounts
            .find_state_by_address(account)
            .weighted_balances_mut()
            .add_send(height, amount)?;
        Ok(())
    }

    fn undo_receive(
        &self,
        cache: &mut LedgerCache,
        height: BlockHeight,
        account: &Address,
        amount: u64,
    ) -> Result<(), ChainError> {
        if amount == 0 {
            return Ok(());
        }

        cache
            .accounts
            .find_state_by_address(account)
            .weighted_balances_mut()
            .undo_receive(height, amount)?;
        Ok(())
    }

    fn undo_send(
        &self,
        cache: &mut LedgerCache,
        height: BlockHeight,
        account: &Address,
        amount: u64,
    ) -> Result<(), ChainError> {
        if amount == 0 {
            return Ok(());
        }

        cache
            .accounts
            .find_state_by_address(account)
            .weighted_balances_mut()
            .undo_send(height, amount)?;
        Ok(())
    }
}

impl BlockObserver for WeightedBalancesObserver {
    fn name(&self) -> &'static str {
        "WeightedBalancesObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let height = context.height;
        let is_execute = context.is_execute();
        match notification {
            Notification::BalanceCredit { account, amount }
            | Notification::BlockHarvest {
                harvester: account,
                amount,
            } => {
                if is_execute {
                    self.receive(cache, height, account, *amount)
                } else {
                    self.undo_receive(cache, height, account, *amount)
                }
            }
            Notification::BalanceDebit { account, amount } => {
                if is_execute {
                    self.send(cache, height, account, *amount)
                } else {
                    self.undo_send(cache, height, account, *amount)
                }
            }
            Notification::BalanceTransfer {
                sender,
                recipient,
                amount,
            } => {
                if is_execute {
                    self.send(cache, height, sender, *amount)?;
                    self.receive(cache, height, recipient, *amount)
                } else {
                    self.undo_receive(cache, height, recipient, *amount)?;
                    self.undo_send(cache, height, sender, *amount)
                }
            }
            _ => Ok(()),
        }
    }
}
