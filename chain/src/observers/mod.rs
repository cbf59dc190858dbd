//! The observer protocol: capabilities, adapters and aggregation.
//!
//! Observers receive every notification of a dispatch in registration order,
//! for execute and undo alike; each observer decides internally how the
//! trigger affects its mutation. Observers that do not recognize a
//! notification ignore it.

mod account_lifecycle;
mod balance_commit;
mod expired_namespaces;
mod factory;
mod harvest;
mod mosaic;
mod multisig;
mod namespace;
mod outlink;
mod pruning;
mod recalculate;
mod remote;
mod transaction_hashes;
mod weighted_balances;

pub use account_lifecycle::AccountLifecycleObserver;
pub use balance_commit::BalanceCommitObserver;
pub use expired_namespaces::ExpiredNamespacesObserver;
pub use factory::{build_commit_observer, ObserverOptions};
pub use harvest::HarvestRewardObserver;
pub use mosaic::{
    AccountMosaicSubscriptionObserver, MosaicDefinitionCreationObserver,
    MosaicSupplyChangeObserver, MosaicTransferObserver,
};
pub use multisig::{MultisigCosignatoryObserver, MultisigMinCosignatoriesObserver};
pub use namespace::ProvisionNamespaceObserver;
pub use outlink::OutlinkObserver;
pub use pruning::PruningObserver;
pub use recalculate::RecalculateImportancesObserver;
pub use remote::RemoteObserver;
pub use transaction_hashes::TransactionHashesObserver;
pub use weighted_balances::WeightedBalancesObserver;

use std::{cell::RefCell, rc::Rc};

use log::trace;

use ledger_common::{
    crypto::Address,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

/// An observer of block-scoped notifications.
///
/// `notify` must be a pure function of the notification, the context and the
/// current cache state; the only ordering dependency is the dispatch order
/// fixed by the aggregate.
pub trait BlockObserver {
    /// Name used for dispatch tracing.
    fn name(&self) -> &'static str;

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError>;
}

/// Narrow capability for plain balance bookkeeping: credits, debits and
/// transfers, without the full notification vocabulary.
pub trait TransferObserver {
    fn notify_credit(&mut self, account: &Address, amount: u64);

    fn notify_debit(&mut self, account: &Address, amount: u64);

    fn notify_transfer(&mut self, sender: &Address, recipient: &Address, amount: u64);
}

/// Context-free observer capability.
pub trait TransactionObserver {
    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
    ) -> Result<(), ChainError>;
}

// Dispatches the balance-moving notifications to a narrow transfer observer,
// swapping the effective direction on undo.
pub(crate) fn dispatch_transfer<T: TransferObserver>(
    observer: &mut T,
    notification: &Notification,
    context: &NotificationContext,
) {
    match notification {
        Notification::BalanceCredit { account, amount }
        | Notification::BlockHarvest {
            harvester: account,
            amount,
        } => {
            if context.is_execute() {
                observer.notify_credit(account, *amount);
            } else {
                observer.notify_debit(account, *amount);
            }
        }
        Notification::BalanceDebit { account, amount } => {
            if context.is_execute() {
                observer.notify_debit(account, *amount);
            } else {
                observer.notify_credit(account, *amount);
            }
        }
        Notification::BalanceTransfer {
            sender,
            recipient,
            amount,
        } => {
            if context.is_execute() {
                observer.notify_transfer(sender, recipient, *amount);
            } else {
                observer.notify_transfer(recipient, sender, *amount);
            }
        }
        _ => {}
    }
}

/// Adapts a narrow [`TransferObserver`] so it can be registered alongside
/// general observers.
pub struct TransferObserverAdapter<T: TransferObserver> {
    inner: T,
    name: &'static str,
}

impl<T: TransferObserver> TransferObserverAdapter<T> {
    pub fn new(inner: T, name: &'static str) -> Self {
        Self { inner, name }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: TransferObserver> BlockObserver for TransferObserverAdapter<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn notify(
        &mut self,
        _cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        dispatch_transfer(&mut self.inner, notification, context);
        Ok(())
    }
}

/// Adapts a context-free [`TransactionObserver`] to the block capability by
/// discarding the block-specific fields.
pub struct TransactionObserverAdapter<T: TransactionObserver> {
    inner: T,
    name: &'static str,
}

impl<T: TransactionObserver> TransactionObserverAdapter<T> {
    pub fn new(inner: T, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<T: TransactionObserver> BlockObserver for TransactionObserverAdapter<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        _context: &NotificationContext,
    ) -> Result<(), ChainError> {
        self.inner.notify(cache, notification)
    }
}

// Lets an observer be registered in an aggregate while the caller keeps a
// query handle to it. Dispatch is single-threaded, so a shared cell is safe.
impl<T: BlockObserver> BlockObserver for Rc<RefCell<T>> {
    fn name(&self) -> &'static str {
        "shared"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        self.borrow_mut().notify(cache, notification, context)
    }
}

/// A composed observer dispatching to its members in registration order.
///
/// The order is identical for execute and undo; direction handling is
/// internal to each member. The first error aborts the dispatch.
pub struct AggregateObserver {
    observers: Vec<Box<dyn BlockObserver>>,
}

impl AggregateObserver {
    pub fn names(&self) -> Vec<&'static str> {
        self.observers.iter().map(|o| o.name()).collect()
    }
}

impl BlockObserver for AggregateObserver {
    fn name(&self) -> &'static str {
        "aggregate"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        trace!(
            "dispatching {} ({}) at height {}",
            notification.kind(),
            context.trigger,
            context.height
        );

        for observer in &mut self.observers {
            observer.notify(cache, notification, context)?;
        }
        Ok(())
    }
}

/// Accumulates observers into an [`AggregateObserver`].
///
/// The dispatch list is fixed once built; there is no runtime mutation after
/// construction.
#[derive(Default)]
pub struct AggregateObserverBuilder {
    observers: Vec<Box<dyn BlockObserver>>,
}

impl AggregateObserverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, observer: Box<dyn BlockObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> AggregateObserver {
        AggregateObserver {
            observers: self.observers,
        }
    }
}
