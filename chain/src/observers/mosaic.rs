use ledger_common::{
    crypto::Address,
    mosaic::{MosaicEntry, MosaicId},
    notification::{Notification, NotificationContext, SupplyChangeType},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Inserts newly defined mosaics into their owning namespace and the flat
/// mosaic index; undo removes them from both.
#[derive(Default)]
pub struct MosaicDefinitionCreationObserver;

impl MosaicDefinitionCreationObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for MosaicDefinitionCreationObserver {
    fn name(&self) -> &'static str {
        "MosaicDefinitionCreationObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::MosaicDefinitionCreation { definition } = notification else {
            return Ok(());
        };

        let namespace_id = definition.id.namespace_id().clone();
        let entry = cache
            .namespaces
            .get_mut(&namespace_id)
            .ok_or(ChainError::UnknownNamespace(namespace_id))?;

        if context.is_execute() {
            entry
                .mosaics_mut()
                .add(MosaicEntry::new(definition.clone())?)?;
            cache.mosaics.add(definition.clone())
        } else {
            entry.mosaics_mut().remove(&definition.id)?;
            cache.mosaics.remove(&definition.id)
        }
    }
}

/// Applies supply changes: creating supply mints the scaled quantity to the
/// creator, deleting supply burns it. The four trigger/type combinations
/// reduce to increase or decrease.
#[derive(Default)]
pub struct MosaicSupplyChangeObserver;

impl MosaicSupplyChangeObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for MosaicSupplyChangeObserver {
    fn name(&self) -> &'static str {
        "MosaicSupplyChangeObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::MosaicSupplyChange {
            mosaic_id,
            supply_type,
            delta,
            ..
        } = notification
        else {
            return Ok(());
        };

        let entry = cache
            .namespaces
            .mosaic_entry_mut(mosaic_id)
            .ok_or_else(|| ChainError::UnknownMosaic(mosaic_id.clone()))?;

        let increase = match supply_type {
            SupplyChangeType::Create => context.is_execute(),
            SupplyChangeType::Delete => !context.is_execute(),
        };

        if increase {
            entry.increase_supply(*delta)?;
        } else {
            entry.decrease_supply(*delta)?;
        }
        Ok(())
    }
}

/// Moves mosaic sub-units between two accounts; undo moves them back. Zero
/// resulting balances stay in the map.
#[derive(Default)]
pub struct MosaicTransferObserver;

impl MosaicTransferObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for MosaicTransferObserver {
    fn name(&self) -> &'static str {
        "MosaicTransferObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
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

        let entry = cache
            .namespaces
            .mosaic_entry_mut(mosaic_id)
            .ok_or_else(|| ChainError::UnknownMosaic(mosaic_id.clone()))?;

        let (from, to) = if context.is_execute() {
            (sender, recipient)
        } else {
            (recipient, sender)
        };

        entry.balances_mut().decrement_balance(from, *quantity)?;
        entry.balances_mut().increment_balance(to, *quantity)?;
        Ok(())
    }
}

/// Keeps each account's mosaic subscription set in sync with its balances.
///
/// Runs after the mutating mosaic observers: on definition creation the
/// creator is subscribed, and after a transfer both parties' subscriptions
/// are resynchronized against the post-mutation balance.
#[derive(Default)]
pub struct AccountMosaicSubscriptionObserver;

impl AccountMosaicSubscriptionObserver {
    pub fn new() -> Self {
        Self
    }

    fn sync_subscription(
        cache: &mut LedgerCache,
        account: &Address,
        mosaic_id: &MosaicId,
    ) -> Result<(), ChainError> {
        let balance = cache
            .namespaces
            .mosaic_entry(mosaic_id)
            .ok_or_else(|| ChainError::UnknownMosaic(mosaic_id.clone()))?
            .balances()
            .balance(account);

        let info = cache.accounts.find_state_by_address(account).info_mut();
        if balance == 0 {
            info.remove_mosaic_id(mosaic_id);
        } else {
            info.add_mosaic_id(mosaic_id.clone());
        }
        Ok(())
    }
}

impl BlockObserver for AccountMosaicSubscriptionObserver {
    fn name(&self) -> &'static str {
        "AccountMosaicSubscriptionObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        match notification {
            Notification::MosaicDefinitionCreation { definition } => {
                let info = cache
                    .accounts
                    .find_state_by_address(&definition.creator)
                    .info_mut();
                if context.is_execute() {
                    info.add_mosaic_id(definition.id.clone());
                } else {
                    info.remove_mosaic_id(&definition.id);
                }
                Ok(())
            }
            Notification::MosaicTransfer {
                sender,
                recipient,
                mosaic_id,
                ..
            } => {
                Self::sync_subscription(cache, sender, mosaic_id)?;
                Self::sync_subscription(cache, recipient, mosaic_id)
            }
            _ => Ok(()),
        }
    }
}
