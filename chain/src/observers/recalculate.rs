use ledger_common::notification::{Notification, NotificationContext};

use crate::{cache::LedgerCache, error::ChainError, importance::ImportanceFacade};

use super::BlockObserver;

/// Triggers a full importance recalculation once per block boundary.
///
/// The harvest-reward notification marks the boundary. Executing a block
/// targets the upcoming height (`height + 1`), undoing targets the height
/// being rolled back to; if the facade already recalculated at the target,
/// nothing happens.
pub struct RecalculateImportancesObserver {
    facade: ImportanceFacade,
}

impl RecalculateImportancesObserver {
    pub fn new(facade: ImportanceFacade) -> Self {
        Self { facade }
    }

    pub fn facade(&self) -> &ImportanceFacade {
        &self.facade
    }
}

impl BlockObserver for RecalculateImportancesObserver {
    fn name(&self) -> &'static str {
        "RecalculateImportancesObserver"
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

        let target = if context.is_execute() {
            context.height + 1
        } else {
            context.height
        };

        if self.facade.last_recalculation() != Some(target) {
            self.facade.recalculate(target, &mut cache.accounts);
        }
        Ok(())
    }
}
