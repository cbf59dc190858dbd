use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{crypto::Address, error::StateError};

/// Multisig relationships of one account.
///
/// Holds both sides of the symmetric relation: the cosignatories authorized
/// to sign for this account, and the multisig accounts this account may sign
/// for. Pairing the two sides across accounts is the observer's job; this
/// container only enforces per-account consistency (an account cannot be
/// multisig and cosignatory at the same time).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigLinks {
    cosignatories: IndexSet<Address>,
    cosignatory_of: IndexSet<Address>,
    min_cosignatories: u32,
}

impl MultisigLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_multisig(&self) -> bool {
        !self.cosignatories.is_empty()
    }

    pub fn is_cosignatory(&self) -> bool {
        !self.cosignatory_of.is_empty()
    }

    pub fn is_cosignatory_of(&self, multisig: &Address) -> bool {
        self.cosignatory_of.contains(multisig)
    }

    pub fn has_cosignatory(&self, cosignatory: &Address) -> bool {
        self.cosignatories.contains(cosignatory)
    }

    pub fn cosignatories(&self) -> &IndexSet<Address> {
        &self.cosignatories
    }

    pub fn cosignatory_of(&self) -> &IndexSet<Address> {
        &self.cosignatory_of
    }

    pub fn min_cosignatories(&self) -> u32 {
        self.min_cosignatories
    }

    /// Registers `cosignatory` as authorized to sign for this account.
    pub fn add_cosignatory(&mut self, cosignatory: Address) -> Result<(), StateError> {
        if self.is_cosignatory() {
            return Err(StateError::AlreadyCosignatory);
        }

        self.cosignatories.insert(cosignatory);
        Ok(())
    }

    pub fn remove_cosignatory(&mut self, cosignatory: &Address) -> Result<(), StateError> {
        if !self.cosignatories.shift_remove(cosignatory) {
            return Err(StateError::UnknownCosignatoryLink);
        }
        Ok(())
    }

    /// Registers this account as a cosignatory of `multisig`.
    pub fn add_cosignatory_of(&mut self, multisig: Address) -> Result<(), StateError> {
        if self.is_multisig() {
            return Err(StateError::AlreadyMultisig);
        }

        self.cosignatory_of.insert(multisig);
        Ok(())
    }

    pub fn remove_cosignatory_of(&mut self, multisig: &Address) -> Result<(), StateError> {
        if !self.cosignatory_of.shift_remove(multisig) {
            return Err(StateError::UnknownCosignatoryLink);
        }
        Ok(())
    }

    /// Applies a relative change to the minimum cosignatories requirement.
    /// The result may exceed the number of cosignatories but never drop
    /// below zero.
    pub fn increment_min_cosignatories_by(&mut self, delta: i32) -> Result<(), StateError> {
        let result = self.min_cosignatories as i64 + delta as i64;
        if result < 0 {
            return Err(StateError::NegativeMinCosignatories);
        }

        self.min_cosignatories = result as u32;
        Ok(())
    }
}
