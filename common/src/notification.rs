//! The notification vocabulary: every effect a transaction or block can have
//! on ledger state, as one tagged union.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    account::ImportanceTransferMode,
    block::{BlockHeight, HashMetaDataPair, Timestamp},
    crypto::Address,
    mosaic::{MosaicDefinition, MosaicId},
    namespace::NamespaceId,
};

/// Direction a notification sequence is being applied in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum NotificationTrigger {
    /// Forward application during block processing
    Execute,
    /// Rollback during a chain reorganization
    Undo,
}

/// Block-scoped context a notification is dispatched under.
///
/// Undo replays the exact execute sequence with the trigger flipped; the
/// height and timestamp are those of the block being applied or rolled back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContext {
    pub height: BlockHeight,
    pub timestamp: Timestamp,
    pub trigger: NotificationTrigger,
}

impl NotificationContext {
    pub const fn new(height: BlockHeight, timestamp: Timestamp, trigger: NotificationTrigger) -> Self {
        Self {
            height,
            timestamp,
            trigger,
        }
    }

    pub fn is_execute(&self) -> bool {
        self.trigger == NotificationTrigger::Execute
    }
}

/// Whether a cosignatory is being added to or removed from a multisig
/// account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum CosignatoryModificationType {
    Add,
    Del,
}

/// Whether a supply change creates or deletes supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SupplyChangeType {
    Create,
    Delete,
}

/// One immutable effect emitted by a transaction or block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// An account participates in the enclosing transaction
    Account { account: Address },
    /// Funds appear on an account
    BalanceCredit { account: Address, amount: u64 },
    /// Funds leave an account
    BalanceDebit { account: Address, amount: u64 },
    /// A block reward is credited to its harvester
    BlockHarvest { harvester: Address, amount: u64 },
    /// Funds move between two accounts
    BalanceTransfer {
        sender: Address,
        recipient: Address,
        amount: u64,
    },
    /// Mosaic sub-units move between two accounts
    MosaicTransfer {
        sender: Address,
        recipient: Address,
        mosaic_id: MosaicId,
        quantity: u64,
    },
    /// A harvesting delegation is activated or deactivated
    ImportanceTransfer {
        lessor: Address,
        lessee: Address,
        mode: ImportanceTransferMode,
    },
    /// A single cosignatory is added to or removed from a multisig account
    CosignatoryModification {
        multisig: Address,
        cosignatory: Address,
        modification: CosignatoryModificationType,
    },
    /// The minimum cosignatories requirement changes by a relative amount
    MinCosignatoriesModification {
        multisig: Address,
        relative_change: i32,
    },
    /// Hashes of the transactions confirmed by the enclosing block
    TransactionHashes { pairs: Vec<HashMetaDataPair> },
    /// A namespace is provisioned
    ProvisionNamespace {
        owner: Address,
        namespace_id: NamespaceId,
    },
    /// A mosaic definition is created
    MosaicDefinitionCreation { definition: MosaicDefinition },
    /// A mosaic's supply changes
    MosaicSupplyChange {
        supplier: Address,
        mosaic_id: MosaicId,
        supply_type: SupplyChangeType,
        delta: u64,
    },
}

/// Discriminant of a [`Notification`], used for dispatch tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum NotificationKind {
    Account,
    BalanceCredit,
    BalanceDebit,
    BlockHarvest,
    BalanceTransfer,
    MosaicTransfer,
    ImportanceTransfer,
    CosignatoryModification,
    MinCosignatoriesModification,
    TransactionHashes,
    ProvisionNamespace,
    MosaicDefinitionCreation,
    MosaicSupplyChange,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Account { .. } => NotificationKind::Account,
            Notification::BalanceCredit { .. } => NotificationKind::BalanceCredit,
            Notification::BalanceDebit { .. } => NotificationKind::BalanceDebit,
            Notification::BlockHarvest { .. } => NotificationKind::BlockHarvest,
            Notification::BalanceTransfer { .. } => NotificationKind::BalanceTransfer,
            Notification::MosaicTransfer { .. } => NotificationKind::MosaicTransfer,
            Notification::ImportanceTransfer { .. } => NotificationKind::ImportanceTransfer,
            Notification::CosignatoryModification { .. } => NotificationKind::CosignatoryModification,
            Notification::MinCosignatoriesModification { .. } => {
                NotificationKind::MinCosignatoriesModification
            }
            Notification::TransactionHashes { .. } => NotificationKind::TransactionHashes,
            Notification::ProvisionNamespace { .. } => NotificationKind::ProvisionNamespace,
            Notification::MosaicDefinitionCreation { .. } => {
                NotificationKind::MosaicDefinitionCreation
            }
            Notification::MosaicSupplyChange { .. } => NotificationKind::MosaicSupplyChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let notification = Notification::BalanceCredit {
            account: Address::zero(),
            amount: 12,
        };
        assert_eq!(notification.kind(), NotificationKind::BalanceCredit);
        assert_eq!(notification.kind().to_string(), "BalanceCredit");
    }

    #[test]
    fn test_context_reports_trigger() {
        let context = NotificationContext::new(7, 1000, NotificationTrigger::Execute);
        assert!(context.is_execute());

        let context = NotificationContext::new(7, 1000, NotificationTrigger::Undo);
        assert!(!context.is_execute());
    }
}
