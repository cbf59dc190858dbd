//! Unconfirmed (mempool) overlays: transient balance bookkeeping layered on
//! top of confirmed state.
//!
//! The overlays track signed deltas per account so speculative transaction
//! evaluation never mutates confirmed state. Over-spending surfaces as a
//! boolean validity result rather than an error: rejecting the responsible
//! transaction is the caller's decision.

mod balances;
mod mosaics;

pub use balances::UnconfirmedBalances;
pub use mosaics::UnconfirmedMosaicBalances;

use ledger_common::{
    crypto::Address,
    mosaic::MosaicId,
    notification::{Notification, NotificationContext},
};

use crate::{
    cache::LedgerCache,
    error::ChainError,
    observers::{dispatch_transfer, BlockObserver},
};

/// The combined mempool overlay: native currency plus per-mosaic deltas
/// behind one notify/query/clear surface.
#[derive(Debug, Default)]
pub struct UnconfirmedState {
    balances: UnconfirmedBalances,
    mosaics: UnconfirmedMosaicBalances,
}

impl UnconfirmedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, cache: &LedgerCache, account: &Address) -> u64 {
        self.balances.balance(cache, account)
    }

    pub fn mosaic_balance(
        &self,
        cache: &LedgerCache,
        account: &Address,
        mosaic_id: &MosaicId,
    ) -> u64 {
        self.mosaics.balance(cache, account, mosaic_id)
    }

    /// True iff no tracked balance, native or mosaic, is negative.
    pub fn is_valid(&self, cache: &LedgerCache) -> bool {
        self.balances.balances_are_valid(cache) && self.mosaics.balances_are_valid(cache)
    }

    /// Resets all deltas; called once per new block.
    pub fn clear(&mut self) {
        self.balances.clear();
        self.mosaics.clear();
    }
}

impl BlockObserver for UnconfirmedState {
    fn name(&self) -> &'static str {
        "UnconfirmedState"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        dispatch_transfer(&mut self.balances, notification, context);
        self.mosaics.notify(cache, notification, context)
    }
}
