use indexmap::IndexMap;

use ledger_common::{
    crypto::Address,
    mosaic::MosaicId,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError, observers::BlockObserver};

/// Transient per-mosaic deltas layered over the confirmed mosaic balances.
#[derive(Debug, Default)]
pub struct UnconfirmedMosaicBalances {
    deltas: IndexMap<(Address, MosaicId), i128>,
}

impl UnconfirmedMosaicBalances {
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(&mut self, account: &Address, mosaic_id: &MosaicId, amount: i128) {
        *self
            .deltas
            .entry((account.clone(), mosaic_id.clone()))
            .or_insert(0) += amount;
    }

    fn confirmed_balance(cache: &LedgerCache, account: &Address, mosaic_id: &MosaicId) -> i128 {
        cache
            .namespaces
            .mosaic_entry(mosaic_id)
            .map(|entry| entry.balances().balance(account) as i128)
            .unwrap_or(0)
    }

    /// Confirmed mosaic balance adjusted by the tracked delta, clamped at
    /// zero.
    pub fn balance(&self, cache: &LedgerCache, account: &Address, mosaic_id: &MosaicId) -> u64 {
        let delta = self
            .deltas
            .get(&(account.clone(), mosaic_id.clone()))
            .copied()
            .unwrap_or(0);
        let adjusted = Self::confirmed_balance(cache, account, mosaic_id) + delta;
        u64::try_from(adjusted).unwrap_or(0)
    }

    /// True iff every tracked (account, mosaic) pair keeps a non-negative
    /// adjusted balance.
    pub fn balances_are_valid(&self, cache: &LedgerCache) -> bool {
        self.deltas.iter().all(|((account, mosaic_id), delta)| {
            Self::confirmed_balance(cache, account, mosaic_id) + delta >= 0
        })
    }

    /// Resets all deltas; called once per new block.
    pub fn clear(&mut self) {
        self.deltas.clear();
    }
}

impl BlockObserver for UnconfirmedMosaicBalances {
    fn name(&self) -> &'static str {
        "UnconfirmedMosaicBalances"
    }

    fn notify(
        &mut self,
        _cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::MosaicTransfer {
            sender,
            recipient,
            mosaic_id,
            quantity,
        } = notification
        else {
            return Ok(());
        };

        let (from, to) = if context.is_execute() {
            (sender, recipient)
        } else {
            (recipient, sender)
        };
        self.adjust(from, mosaic_id, -(*quantity as i128));
        self.adjust(to, mosaic_id, *quantity as i128);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::{
        mosaic::{MosaicDefinition, MosaicEntry, MosaicProperties},
        namespace::{Namespace, NamespaceId},
        notification::NotificationTrigger,
    };

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn mosaic_id() -> MosaicId {
        MosaicId::new(NamespaceId::new("alice"), "gold")
    }

    fn cache_with_mosaic(initial_supply: u64) -> LedgerCache {
        let mut cache = LedgerCache::new();
        cache
            .namespaces
            .add(Namespace::new(NamespaceId::new("alice"), address(1), 100))
            .unwrap();
        let definition = MosaicDefinition::new(
            address(1),
            mosaic_id(),
            "test",
            MosaicProperties {
                initial_supply,
                divisibility: 0,
                supply_mutable: true,
                transferable: true,
            },
        );
        cache
            .namespaces
            .get_mut(&NamespaceId::new("alice"))
            .unwrap()
            .mosaics_mut()
            .add(MosaicEntry::new(definition).unwrap())
            .unwrap();
        cache
    }

    fn transfer(quantity: u64) -> Notification {
        Notification::MosaicTransfer {
            sender: address(1),
            recipient: address(2),
            mosaic_id: mosaic_id(),
            quantity,
        }
    }

    fn execute() -> NotificationContext {
        NotificationContext::new(10, 0, NotificationTrigger::Execute)
    }

    #[test]
    fn test_transfer_adjusts_both_parties() {
        let mut cache = cache_with_mosaic(100);
        let mut overlay = UnconfirmedMosaicBalances::new();

        overlay.notify(&mut cache, &transfer(30), &execute()).unwrap();
        assert_eq!(overlay.balance(&cache, &address(1), &mosaic_id()), 70);
        assert_eq!(overlay.balance(&cache, &address(2), &mosaic_id()), 30);
        assert!(overlay.balances_are_valid(&cache));
    }

    #[test]
    fn test_overspend_is_invalid_but_not_fatal() {
        let mut cache = cache_with_mosaic(10);
        let mut overlay = UnconfirmedMosaicBalances::new();

        overlay.notify(&mut cache, &transfer(8), &execute()).unwrap();
        overlay.notify(&mut cache, &transfer(8), &execute()).unwrap();
        assert!(!overlay.balances_are_valid(&cache));
        assert_eq!(overlay.balance(&cache, &address(1), &mosaic_id()), 0);
    }

    #[test]
    fn test_clear_resets_all_deltas() {
        let mut cache = cache_with_mosaic(10);
        let mut overlay = UnconfirmedMosaicBalances::new();

        overlay.notify(&mut cache, &transfer(8), &execute()).unwrap();
        overlay.clear();
        assert_eq!(overlay.balance(&cache, &address(1), &mosaic_id()), 10);
        assert!(overlay.balances_are_valid(&cache));
    }

    #[test]
    fn test_unknown_mosaic_has_zero_confirmed_balance() {
        let cache = LedgerCache::new();
        let overlay = UnconfirmedMosaicBalances::new();
        assert_eq!(overlay.balance(&cache, &address(1), &mosaic_id()), 0);
        assert!(overlay.balances_are_valid(&cache));
    }
}
