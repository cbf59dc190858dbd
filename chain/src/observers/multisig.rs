use ledger_common::{
    crypto::Address,
    notification::{CosignatoryModificationType, Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

// Both halves of the cosignatory relation are always mutated together so the
// pairing invariant cannot drift between accounts.
fn link(cache: &mut LedgerCache, multisig: &Address, cosignatory: &Address) -> Result<(), ChainError> {
    cache
        .accounts
        .find_state_by_address(multisig)
        .multisig_mut()
        .add_cosignatory(cosignatory.clone())?;
    cache
        .accounts
        .find_state_by_address(cosignatory)
        .multisig_mut()
        .add_cosignatory_of(multisig.clone())?;
    Ok(())
}

fn unlink(cache: &mut LedgerCache, multisig: &Address, cosignatory: &Address) -> Result<(), ChainError> {
    cache
        .accounts
        .find_state_by_address(multisig)
        .multisig_mut()
        .remove_cosignatory(cosignatory)?;
    cache
        .accounts
        .find_state_by_address(cosignatory)
        .multisig_mut()
        .remove_cosignatory_of(multisig)?;
    Ok(())
}

/// Applies cosignatory additions and removals to both affected accounts.
#[derive(Default)]
pub struct MultisigCosignatoryObserver;

impl MultisigCosignatoryObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for MultisigCosignatoryObserver {
    fn name(&self) -> &'static str {
        "MultisigCosignatoryObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::CosignatoryModification {
            multisig,
            cosignatory,
            modification,
        } = notification
        else {
            return Ok(());
        };

        let add = match modification {
            CosignatoryModificationType::Add => context.is_execute(),
            CosignatoryModificationType::Del => !context.is_execute(),
        };

        if add {
            link(cache, multisig, cosignatory)
        } else {
            unlink(cache, multisig, cosignatory)
        }
    }
}

/// Applies relative changes of the minimum cosignatories requirement.
#[derive(Default)]
pub struct MultisigMinCosignatoriesObserver;

impl MultisigMinCosignatoriesObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for MultisigMinCosignatoriesObserver {
    fn name(&self) -> &'static str {
        "MultisigMinCosignatoriesObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::MinCosignatoriesModification {
            multisig,
            relative_change,
        } = notification
        else {
            return Ok(());
        };

        let change = if context.is_execute() {
            *relative_change
        } else {
            -relative_change
        };

        cache
            .accounts
            .find_state_by_address(multisig)
            .multisig_mut()
            .increment_min_cosignatories_by(change)?;
        Ok(())
    }
}
