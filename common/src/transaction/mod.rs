//! The closed set of transaction kinds and the notification sequence each
//! kind emits.
//!
//! A transaction is a pure description; applying or rolling it back means
//! replaying its notification sequence against an observer with the right
//! trigger. The sequence is fixed per kind and identical for execute and
//! undo.

use serde::{Deserialize, Serialize};

use crate::{
    account::ImportanceTransferMode,
    crypto::Address,
    mosaic::{MosaicDefinition, MosaicId},
    namespace::NamespaceId,
    notification::{CosignatoryModificationType, Notification, SupplyChangeType},
};

/// A single cosignatory change inside a multisig modification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignatoryModification {
    pub modification: CosignatoryModificationType,
    pub cosignatory: Address,
}

/// A mosaic attachment carried by a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicAttachment {
    pub mosaic_id: MosaicId,
    pub quantity: u64,
}

/// The transaction kinds understood by the ledger core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transaction {
    /// Moves currency (and optionally mosaics) from the signer to a
    /// recipient
    Transfer {
        signer: Address,
        recipient: Address,
        amount: u64,
        mosaics: Vec<MosaicAttachment>,
        fee: u64,
    },
    /// Activates or deactivates harvesting delegation to a remote account
    ImportanceTransfer {
        signer: Address,
        remote: Address,
        mode: ImportanceTransferMode,
        fee: u64,
    },
    /// Changes the cosignatory set and/or the minimum cosignatories of the
    /// signing multisig account
    MultisigModification {
        signer: Address,
        modifications: Vec<CosignatoryModification>,
        min_cosignatories_change: Option<i32>,
        fee: u64,
    },
    /// Provisions a namespace, paying the rental fee to a sink account
    ProvisionNamespace {
        signer: Address,
        namespace_id: NamespaceId,
        rental_fee: u64,
        rental_fee_sink: Address,
        fee: u64,
    },
    /// Creates a mosaic definition, paying the creation fee to a sink
    /// account
    MosaicDefinitionCreation {
        signer: Address,
        definition: MosaicDefinition,
        creation_fee: u64,
        creation_fee_sink: Address,
        fee: u64,
    },
    /// Creates or deletes supply of an existing mosaic
    MosaicSupplyChange {
        signer: Address,
        mosaic_id: MosaicId,
        supply_type: SupplyChangeType,
        delta: u64,
        fee: u64,
    },
}

impl Transaction {
    pub fn signer(&self) -> &Address {
        match self {
            Transaction::Transfer { signer, .. }
            | Transaction::ImportanceTransfer { signer, .. }
            | Transaction::MultisigModification { signer, .. }
            | Transaction::ProvisionNamespace { signer, .. }
            | Transaction::MosaicDefinitionCreation { signer, .. }
            | Transaction::MosaicSupplyChange { signer, .. } => signer,
        }
    }

    pub fn fee(&self) -> u64 {
        match self {
            Transaction::Transfer { fee, .. }
            | Transaction::ImportanceTransfer { fee, .. }
            | Transaction::MultisigModification { fee, .. }
            | Transaction::ProvisionNamespace { fee, .. }
            | Transaction::MosaicDefinitionCreation { fee, .. }
            | Transaction::MosaicSupplyChange { fee, .. } => *fee,
        }
    }

    /// The ordered notification sequence this transaction emits.
    ///
    /// Effects come first and the fee debit closes them; the account touches
    /// for the signer and every other involved account are emitted last.
    /// Undo replays the identical order, so references are released only
    /// after the effects referencing those accounts have been rolled back.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        let mut touched = vec![self.signer().clone()];

        match self {
            Transaction::Transfer {
                signer,
                recipient,
                amount,
                mosaics,
                ..
            } => {
                touched.push(recipient.clone());
                notifications.push(Notification::BalanceTransfer {
                    sender: signer.clone(),
                    recipient: recipient.clone(),
                    amount: *amount,
                });
                for attachment in mosaics {
                    notifications.push(Notification::MosaicTransfer {
                        sender: signer.clone(),
                        recipient: recipient.clone(),
                        mosaic_id: attachment.mosaic_id.clone(),
                        quantity: attachment.quantity,
                    });
                }
            }
            Transaction::ImportanceTransfer {
                signer,
                remote,
                mode,
                ..
            } => {
                touched.push(remote.clone());
                notifications.push(Notification::ImportanceTransfer {
                    lessor: signer.clone(),
                    lessee: remote.clone(),
                    mode: *mode,
                });
            }
            Transaction::MultisigModification {
                signer,
                modifications,
                min_cosignatories_change,
                ..
            } => {
                for modification in modifications {
                    touched.push(modification.cosignatory.clone());
                    notifications.push(Notification::CosignatoryModification {
                        multisig: signer.clone(),
                        cosignatory: modification.cosignatory.clone(),
                        modification: modification.modification,
                    });
                }
                if let Some(relative_change) = min_cosignatories_change {
                    notifications.push(Notification::MinCosignatoriesModification {
                        multisig: signer.clone(),
                        relative_change: *relative_change,
                    });
                }
            }
            Transaction::ProvisionNamespace {
                signer,
                namespace_id,
                rental_fee,
                rental_fee_sink,
                ..
            } => {
                touched.push(rental_fee_sink.clone());
                notifications.push(Notification::BalanceTransfer {
                    sender: signer.clone(),
                    recipient: rental_fee_sink.clone(),
                    amount: *rental_fee,
                });
                notifications.push(Notification::ProvisionNamespace {
                    owner: signer.clone(),
                    namespace_id: namespace_id.clone(),
                });
            }
            Transaction::MosaicDefinitionCreation {
                signer,
                definition,
                creation_fee,
                creation_fee_sink,
                ..
            } => {
                touched.push(creation_fee_sink.clone());
                notifications.push(Notification::BalanceTransfer {
                    sender: signer.clone(),
                    recipient: creation_fee_sink.clone(),
                    amount: *creation_fee,
                });
                notifications.push(Notification::MosaicDefinitionCreation {
                    definition: definition.clone(),
                });
            }
            Transaction::MosaicSupplyChange {
                signer,
                mosaic_id,
                supply_type,
                delta,
                ..
            } => {
                notifications.push(Notification::MosaicSupplyChange {
                    supplier: signer.clone(),
                    mosaic_id: mosaic_id.clone(),
                    supply_type: *supply_type,
                    delta: *delta,
                });
            }
        }

        notifications.push(Notification::BalanceDebit {
            account: self.signer().clone(),
            amount: self.fee(),
        });
        notifications.extend(
            touched
                .into_iter()
                .map(|account| Notification::Account { account }),
        );
        notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn kinds(transaction: &Transaction) -> Vec<NotificationKind> {
        transaction
            .notifications()
            .iter()
            .map(|n| n.kind())
            .collect()
    }

    #[test]
    fn test_transfer_emits_effects_fee_then_touches() {
        let transaction = Transaction::Transfer {
            signer: address(1),
            recipient: address(2),
            amount: 100,
            mosaics: vec![],
            fee: 10,
        };

        assert_eq!(
            kinds(&transaction),
            vec![
                NotificationKind::BalanceTransfer,
                NotificationKind::BalanceDebit,
                NotificationKind::Account,
                NotificationKind::Account,
            ]
        );
        // the signer is touched first
        assert_eq!(
            transaction.notifications()[2],
            Notification::Account {
                account: address(1)
            }
        );
    }

    #[test]
    fn test_transfer_with_mosaics_emits_mosaic_transfers() {
        let transaction = Transaction::Transfer {
            signer: address(1),
            recipient: address(2),
            amount: 100,
            mosaics: vec![
                MosaicAttachment {
                    mosaic_id: "a:x".parse().unwrap(),
                    quantity: 5,
                },
                MosaicAttachment {
                    mosaic_id: "a:y".parse().unwrap(),
                    quantity: 7,
                },
            ],
            fee: 10,
        };

        assert_eq!(
            kinds(&transaction),
            vec![
                NotificationKind::BalanceTransfer,
                NotificationKind::MosaicTransfer,
                NotificationKind::MosaicTransfer,
                NotificationKind::BalanceDebit,
                NotificationKind::Account,
                NotificationKind::Account,
            ]
        );
    }

    #[test]
    fn test_multisig_modification_touches_each_cosignatory() {
        let transaction = Transaction::MultisigModification {
            signer: address(1),
            modifications: vec![
                CosignatoryModification {
                    modification: CosignatoryModificationType::Add,
                    cosignatory: address(2),
                },
                CosignatoryModification {
                    modification: CosignatoryModificationType::Del,
                    cosignatory: address(3),
                },
            ],
            min_cosignatories_change: Some(1),
            fee: 10,
        };

        assert_eq!(
            kinds(&transaction),
            vec![
                NotificationKind::CosignatoryModification,
                NotificationKind::CosignatoryModification,
                NotificationKind::MinCosignatoriesModification,
                NotificationKind::BalanceDebit,
                NotificationKind::Account,
                NotificationKind::Account,
                NotificationKind::Account,
            ]
        );
    }

    #[test]
    fn test_fee_debit_closes_the_effects() {
        let transaction = Transaction::MosaicSupplyChange {
            signer: address(1),
            mosaic_id: "a:x".parse().unwrap(),
            supply_type: SupplyChangeType::Create,
            delta: 100,
            fee: 42,
        };

        assert_eq!(
            kinds(&transaction),
            vec![
                NotificationKind::MosaicSupplyChange,
                NotificationKind::BalanceDebit,
                NotificationKind::Account,
            ]
        );
        assert_eq!(
            transaction.notifications()[1],
            Notification::BalanceDebit {
                account: address(1),
                amount: 42
            }
        );
    }
}
