use ledger_common::crypto::Address;

use crate::importance::ImportanceFacade;

use super::{
    AccountLifecycleObserver, AccountMosaicSubscriptionObserver, AggregateObserver,
    AggregateObserverBuilder, BalanceCommitObserver, ExpiredNamespacesObserver,
    HarvestRewardObserver, MosaicDefinitionCreationObserver, MosaicSupplyChangeObserver,
    MosaicTransferObserver, MultisigCosignatoryObserver, MultisigMinCosignatoriesObserver,
    OutlinkObserver, ProvisionNamespaceObserver, PruningObserver,
    RecalculateImportancesObserver, RemoteObserver, TransactionHashesObserver,
    WeightedBalancesObserver,
};

/// Toggles for the optional members of the standard observer set.
#[derive(Clone, Debug)]
pub struct ObserverOptions {
    /// Run incremental importance recalculation at block boundaries
    pub incremental_importances: bool,
    /// Record outlinks for importance scoring
    pub outlinks: bool,
    /// Consolidate weighted balance history while pruning
    pub historical_pruning: bool,
    /// Address of the genesis account, exempt from immediate vesting of
    /// genesis-block receives
    pub genesis_address: Option<Address>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            incremental_importances: true,
            outlinks: true,
            historical_pruning: true,
            genesis_address: None,
        }
    }
}

/// Assembles the standard observer set in its canonical dispatch order.
///
/// The same composed observer serves execute and undo; direction handling is
/// internal to each member. Mutating observers come first, the
/// subscription/expiry resynchronizers after the mosaic mutators, and the
/// maintenance observers (pruning, recalculation, outlinks) last.
pub fn build_commit_observer(
    options: ObserverOptions,
    importance_facade: ImportanceFacade,
) -> AggregateObserver {
    let mut builder = AggregateObserverBuilder::new()
        .add(Box::new(WeightedBalancesObserver::new(
            options.genesis_address.clone(),
        )))
        .add(Box::new(AccountLifecycleObserver::new()))
        .add(Box::new(BalanceCommitObserver::new()))
        .add(Box::new(HarvestRewardObserver::new()))
        .add(Box::new(RemoteObserver::new()))
        .add(Box::new(MultisigCosignatoryObserver::new()))
        .add(Box::new(MultisigMinCosignatoriesObserver::new()))
        .add(Box::new(TransactionHashesObserver::new()))
        .add(Box::new(ProvisionNamespaceObserver::new()))
        .add(Box::new(MosaicDefinitionCreationObserver::new()))
        .add(Box::new(MosaicSupplyChangeObserver::new()))
        .add(Box::new(MosaicTransferObserver::new()))
        .add(Box::new(AccountMosaicSubscriptionObserver::new()))
        .add(Box::new(ExpiredNamespacesObserver::new()))
        .add(Box::new(PruningObserver::new(options.historical_pruning)));

    if options.incremental_importances {
        builder = builder.add(Box::new(RecalculateImportancesObserver::new(
            importance_facade,
        )));
    }
    if options.outlinks {
        builder = builder.add(Box::new(OutlinkObserver::new()));
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importance::NoOpImportanceCalculator;

    fn facade() -> ImportanceFacade {
        ImportanceFacade::new(Box::new(NoOpImportanceCalculator))
    }

    fn base_names() -> Vec<&'static str> {
        vec![
            "WeightedBalancesObserver",
            "AccountLifecycleObserver",
            "BalanceCommitObserver",
            "HarvestRewardObserver",
            "RemoteObserver",
            "MultisigCosignatoryObserver",
            "MultisigMinCosignatoriesObserver",
            "TransactionHashesObserver",
            "ProvisionNamespaceObserver",
            "MosaicDefinitionCreationObserver",
            "MosaicSupplyChangeObserver",
            "MosaicTransferObserver",
            "AccountMosaicSubscriptionObserver",
            "ExpiredNamespacesObserver",
            "PruningObserver",
        ]
    }

    #[test]
    fn test_default_options_include_all_observers() {
        let observer = build_commit_observer(ObserverOptions::default(), facade());

        let mut expected = base_names();
        expected.push("RecalculateImportancesObserver");
        expected.push("OutlinkObserver");
        assert_eq!(observer.names(), expected);
    }

    #[test]
    fn test_optional_observers_can_be_disabled() {
        let options = ObserverOptions {
            incremental_importances: false,
            outlinks: false,
            ..ObserverOptions::default()
        };
        let observer = build_commit_observer(options, facade());
        assert_eq!(observer.names(), base_names());
    }

    #[test]
    fn test_outlinks_can_be_disabled_independently() {
        let options = ObserverOptions {
            outlinks: false,
            ..ObserverOptions::default()
        };
        let observer = build_commit_observer(options, facade());

        let mut expected = base_names();
        expected.push("RecalculateImportancesObserver");
        assert_eq!(observer.names(), expected);
    }
}
