use ledger_common::{
    account::AccountLink,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Records a weighted outlink on the sender of every transfer between two
/// distinct accounts.
///
/// The link weight is the transfer amount capped by the combined
/// vested+unvested balance of the account holding the funds at this point of
/// the dispatch: the recipient after an executed transfer, the sender after a
/// rolled-back one. Like the weighted-balance undo operations, removal
/// assumes exact execute/undo pairing. Self-transfers and pure
/// credits/debits record nothing.
#[derive(Default)]
pub struct OutlinkObserver;

impl OutlinkObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for OutlinkObserver {
    fn name(&self) -> &'static str {
        "OutlinkObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::BalanceTransfer {
            sender,
            recipient,
            amount,
        } = notification
        else {
            return Ok(());
        };

        if sender == recipient {
            return Ok(());
        }

        let holder = if context.is_execute() { recipient } else { sender };
        let holder_balance = cache
            .accounts
            .find_state_by_address(holder)
            .weighted_balances()
            .balance(context.height);
        let weight = (*amount).min(holder_balance);

        let link = AccountLink::new(context.height, weight, recipient.clone());
        let importance = cache
            .accounts
            .find_state_by_address(sender)
            .importance_mut();

        if context.is_execute() {
            importance.add_outlink(link);
            Ok(())
        } else {
            importance.remove_outlink(&link)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::{crypto::Address, notification::NotificationTrigger};

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn context(height: u64, trigger: NotificationTrigger) -> NotificationContext {
        NotificationContext::new(height, 0, trigger)
    }

    fn transfer(sender: u8, recipient: u8, amount: u64) -> Notification {
        Notification::BalanceTransfer {
            sender: address(sender),
            recipient: address(recipient),
            amount,
        }
    }

    fn seed_weighted(cache: &mut LedgerCache, byte: u8, amount: u64) {
        cache
            .accounts
            .find_state_by_address(&address(byte))
            .weighted_balances_mut()
            .add_receive(1, amount)
            .unwrap();
    }

    #[test]
    fn test_execute_records_outlink_on_sender() {
        let mut cache = LedgerCache::new();
        seed_weighted(&mut cache, 1, 1000);
        seed_weighted(&mut cache, 2, 1000);

        OutlinkObserver::new()
            .notify(&mut cache, &transfer(1, 2, 100), &context(10, NotificationTrigger::Execute))
            .unwrap();

        let importance = cache.accounts.state(&address(1)).unwrap().importance();
        let links: Vec<_> = importance.outlinks(10).cloned().collect();
        assert_eq!(links, vec![AccountLink::new(10, 100, address(2))]);

        // the recipient records nothing
        assert_eq!(
            cache
                .accounts
                .state(&address(2))
                .unwrap()
                .importance()
                .outlinks_size(10),
            0
        );
    }

    #[test]
    fn test_weight_is_capped_by_holder_balance() {
        let mut cache = LedgerCache::new();
        seed_weighted(&mut cache, 2, 30);

        OutlinkObserver::new()
            .notify(&mut cache, &transfer(1, 2, 100), &context(10, NotificationTrigger::Execute))
            .unwrap();

        let importance = cache.accounts.state(&address(1)).unwrap().importance();
        let links: Vec<_> = importance.outlinks(10).cloned().collect();
        assert_eq!(links, vec![AccountLink::new(10, 30, address(2))]);
    }

    #[test]
    fn test_undo_removes_the_recorded_outlink() {
        let mut cache = LedgerCache::new();
        seed_weighted(&mut cache, 1, 1000);
        seed_weighted(&mut cache, 2, 1000);
        let mut observer = OutlinkObserver::new();
        let notification = transfer(1, 2, 100);

        observer
            .notify(&mut cache, &notification, &context(10, NotificationTrigger::Execute))
            .unwrap();
        observer
            .notify(&mut cache, &notification, &context(10, NotificationTrigger::Undo))
            .unwrap();

        assert_eq!(
            cache
                .accounts
                .state(&address(1))
                .unwrap()
                .importance()
                .outlinks_size(10),
            0
        );
    }

    #[test]
    fn test_self_transfer_records_nothing() {
        let mut cache = LedgerCache::new();
        seed_weighted(&mut cache, 1, 1000);

        OutlinkObserver::new()
            .notify(&mut cache, &transfer(1, 1, 100), &context(10, NotificationTrigger::Execute))
            .unwrap();

        assert_eq!(
            cache
                .accounts
                .state(&address(1))
                .unwrap()
                .importance()
                .outlinks_size(10),
            0
        );
    }

    #[test]
    fn test_credits_and_debits_record_nothing() {
        let mut cache = LedgerCache::new();
        let mut observer = OutlinkObserver::new();

        observer
            .notify(
                &mut cache,
                &Notification::BalanceCredit {
                    account: address(1),
                    amount: 100,
                },
                &context(10, NotificationTrigger::Execute),
            )
            .unwrap();
        assert_eq!(cache.accounts.size(), 0);
    }
}
