use log::debug;

use ledger_common::{
    crypto::Address,
    mosaic::MosaicId,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Detaches the mosaics of namespaces expiring at the current height from
/// their holders' subscription sets, and reattaches them on undo.
///
/// The harvest-reward notification serves as the once-per-block height tick;
/// only namespaces whose expiry height equals the context height exactly are
/// touched.
#[derive(Default)]
pub struct ExpiredNamespacesObserver;

impl ExpiredNamespacesObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for ExpiredNamespacesObserver {
    fn name(&self) -> &'static str {
        "ExpiredNamespacesObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        if !matches!(notification, Notification::BlockHarvest { .. }) {
            return Ok(());
        }

        let LedgerCache {
            accounts,
            namespaces,
            ..
        } = cache;

        // (holder, mosaic) pairs affected by namespaces expiring right now
        let mut affected: Vec<(Address, MosaicId)> = Vec::new();
        for (_, entry) in namespaces.iter() {
            if entry.namespace().expiry_height() != context.height {
                continue;
            }

            for (mosaic_id, mosaic_entry) in entry.mosaics().iter() {
                for owner in mosaic_entry.balances().owners() {
                    affected.push((owner.clone(), mosaic_id.clone()));
                }
            }
        }

        if affected.is_empty() {
            return Ok(());
        }

        debug!(
            "{} mosaic holdings affected by namespace expiry at height {}",
            affected.len(),
            context.height
        );

        for (owner, mosaic_id) in affected {
            let info = accounts.find_state_by_address(&owner).info_mut();
            if context.is_execute() {
                info.remove_mosaic_id(&mosaic_id);
            } else {
                info.add_mosaic_id(mosaic_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::{
        config::NAMESPACE_LIFETIME,
        mosaic::{MosaicDefinition, MosaicEntry, MosaicProperties},
        namespace::{Namespace, NamespaceId},
        notification::NotificationTrigger,
    };

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn mosaic_id(namespace: &str, name: &str) -> MosaicId {
        MosaicId::new(NamespaceId::new(namespace), name)
    }

    // namespace provisioned at `height` with one mosaic owned by `creator`
    fn add_namespace(cache: &mut LedgerCache, id: &str, creator: u8, height: u64, names: &[&str]) {
        cache
            .namespaces
            .add(Namespace::new(NamespaceId::new(id), address(creator), height))
            .unwrap();
        for name in names {
            let definition = MosaicDefinition::new(
                address(creator),
                mosaic_id(id, name),
                "test",
                MosaicProperties {
                    initial_supply: 1,
                    divisibility: 0,
                    supply_mutable: true,
                    transferable: true,
                },
            );
            cache
                .namespaces
                .get_mut(&NamespaceId::new(id))
                .unwrap()
                .mosaics_mut()
                .add(MosaicEntry::new(definition).unwrap())
                .unwrap();
            cache
                .accounts
                .find_state_by_address(&address(creator))
                .info_mut()
                .add_mosaic_id(mosaic_id(id, name));
        }
    }

    fn harvest() -> Notification {
        Notification::BlockHarvest {
            harvester: address(9),
            amount: 0,
        }
    }

    fn owns(cache: &LedgerCache, byte: u8, id: &MosaicId) -> bool {
        cache
            .accounts
            .state(&address(byte))
            .map(|s| s.info().mosaic_ids().contains(id))
            .unwrap_or(false)
    }

    #[test]
    fn test_execute_detaches_mosaics_of_expiring_namespace_only() {
        let mut cache = LedgerCache::new();
        // namespace "a" expires at notify height, "b" does not
        add_namespace(&mut cache, "a", 1, 123, &["x", "y"]);
        add_namespace(&mut cache, "b", 2, 321, &["z"]);

        let context = NotificationContext::new(
            123 + NAMESPACE_LIFETIME,
            0,
            NotificationTrigger::Execute,
        );
        ExpiredNamespacesObserver::new()
            .notify(&mut cache, &harvest(), &context)
            .unwrap();

        assert!(!owns(&cache, 1, &mosaic_id("a", "x")));
        assert!(!owns(&cache, 1, &mosaic_id("a", "y")));
        assert!(owns(&cache, 2, &mosaic_id("b", "z")));
    }

    #[test]
    fn test_undo_reattaches_mosaics() {
        let mut cache = LedgerCache::new();
        add_namespace(&mut cache, "a", 1, 123, &["x"]);
        let mut observer = ExpiredNamespacesObserver::new();

        let execute = NotificationContext::new(
            123 + NAMESPACE_LIFETIME,
            0,
            NotificationTrigger::Execute,
        );
        observer.notify(&mut cache, &harvest(), &execute).unwrap();
        assert!(!owns(&cache, 1, &mosaic_id("a", "x")));

        let undo = NotificationContext::new(123 + NAMESPACE_LIFETIME, 0, NotificationTrigger::Undo);
        observer.notify(&mut cache, &harvest(), &undo).unwrap();
        assert!(owns(&cache, 1, &mosaic_id("a", "x")));
    }

    #[test]
    fn test_no_action_away_from_exact_expiry_height() {
        let mut cache = LedgerCache::new();
        add_namespace(&mut cache, "a", 1, 123, &["x"]);
        let mut observer = ExpiredNamespacesObserver::new();

        for offset in [-1i64, 1, 1000] {
            let height = (123 + NAMESPACE_LIFETIME) as i64 + offset;
            let context =
                NotificationContext::new(height as u64, 0, NotificationTrigger::Execute);
            observer.notify(&mut cache, &harvest(), &context).unwrap();
            assert!(owns(&cache, 1, &mosaic_id("a", "x")));
        }
    }

    #[test]
    fn test_only_non_zero_holders_are_affected() {
        let mut cache = LedgerCache::new();
        add_namespace(&mut cache, "a", 1, 123, &["x"]);

        // account 2 subscribed but holds a zero balance
        cache
            .accounts
            .find_state_by_address(&address(2))
            .info_mut()
            .add_mosaic_id(mosaic_id("a", "x"));

        let context = NotificationContext::new(
            123 + NAMESPACE_LIFETIME,
            0,
            NotificationTrigger::Execute,
        );
        ExpiredNamespacesObserver::new()
            .notify(&mut cache, &harvest(), &context)
            .unwrap();

        assert!(!owns(&cache, 1, &mosaic_id("a", "x")));
        assert!(owns(&cache, 2, &mosaic_id("a", "x")));
    }

    #[test]
    fn test_non_harvest_notifications_are_ignored() {
        let mut cache = LedgerCache::new();
        add_namespace(&mut cache, "a", 1, 123, &["x"]);

        let context = NotificationContext::new(
            123 + NAMESPACE_LIFETIME,
            0,
            NotificationTrigger::Execute,
        );
        let notification = Notification::BalanceCredit {
            account: address(1),
            amount: 5,
        };
        ExpiredNamespacesObserver::new()
            .notify(&mut cache, &notification, &context)
            .unwrap();
        assert!(owns(&cache, 1, &mosaic_id("a", "x")));
    }
}
