use log::debug;

use ledger_common::{
    block::BlockHeight,
    config::{OUTLINK_HISTORY, PRUNE_INTERVAL, WEIGHTED_BALANCE_HISTORY},
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Trims historical state that has aged out of its retention window.
///
/// Runs on executed harvest-reward notifications only, once every
/// `PRUNE_INTERVAL` blocks. Weighted balance entries are consolidated below
/// `height - WEIGHTED_BALANCE_HISTORY` (when historical pruning is enabled),
/// outlinks are dropped below `height - OUTLINK_HISTORY`, and the hash cache
/// is pruned by the block timestamp against its retention window. Both
/// height windows clamp to the genesis height.
pub struct PruningObserver {
    prune_historical_data: bool,
}

impl PruningObserver {
    pub fn new(prune_historical_data: bool) -> Self {
        Self {
            prune_historical_data,
        }
    }

    fn prune_height(height: BlockHeight, window: BlockHeight) -> BlockHeight {
        if height > window {
            height - window
        } else {
            1
        }
    }
}

impl BlockObserver for PruningObserver {
    fn name(&self) -> &'static str {
        "PruningObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        if !matches!(notification, Notification::BlockHarvest { .. }) || !context.is_execute() {
            return Ok(());
        }

        if context.height % PRUNE_INTERVAL != 1 {
            return Ok(());
        }

        let weighted_prune_height = Self::prune_height(context.height, WEIGHTED_BALANCE_HISTORY);
        let outlink_prune_height = Self::prune_height(context.height, OUTLINK_HISTORY);
        debug!(
            "pruning at height {}: weighted balances below {}, outlinks below {}",
            context.height, weighted_prune_height, outlink_prune_height
        );

        for state in cache.accounts.states_mut() {
            if self.prune_historical_data {
                state.weighted_balances_mut().prune(weighted_prune_height);
            }
            state.importance_mut().prune_outlinks(outlink_prune_height);
        }

        cache.hashes.prune(context.timestamp);
        Ok(())
    }
}
