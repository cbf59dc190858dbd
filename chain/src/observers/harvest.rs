use ledger_common::notification::{Notification, NotificationContext};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Tracks how many blocks each account has harvested.
///
/// The reward balance itself flows through the balance observers; this one
/// only maintains the counter.
#[derive(Default)]
pub struct HarvestRewardObserver;

impl HarvestRewardObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for HarvestRewardObserver {
    fn name(&self) -> &'static str {
        "HarvestRewardObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::BlockHarvest { harvester, .. } = notification else {
            return Ok(());
        };

        let info = cache.accounts.find_state_by_address(harvester).info_mut();
        if context.is_execute() {
            info.increment_harvested_blocks();
        } else {
            info.decrement_harvested_blocks()?;
        }
        Ok(())
    }
}
