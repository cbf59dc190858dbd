use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{error::StateError, mosaic::MosaicId};

/// Basic bookkeeping for one account: confirmed balance, lifecycle reference
/// count, harvested block counter and the set of mosaics the account holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    balance: u64,
    reference_count: u64,
    harvested_blocks: u64,
    mosaic_ids: IndexSet<MosaicId>,
}

impl AccountInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn increment_balance(&mut self, amount: u64) -> Result<(), StateError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(StateError::BalanceOverflow)?;
        Ok(())
    }

    pub fn decrement_balance(&mut self, amount: u64) -> Result<(), StateError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(StateError::BalanceUnderflow {
                need: amount,
                have: self.balance,
            })?;
        Ok(())
    }

    pub fn reference_count(&self) -> u64 {
        self.reference_count
    }

    pub fn increment_reference_count(&mut self) -> u64 {
        self.reference_count += 1;
        self.reference_count
    }

    /// Decrements the reference count, returning the new value.
    /// Underflow below zero marks a broken execute/undo pairing.
    pub fn decrement_reference_count(&mut self) -> Result<u64, StateError> {
        self.reference_count = self
            .reference_count
            .checked_sub(1)
            .ok_or(StateError::ReferenceCountUnderflow)?;
        Ok(self.reference_count)
    }

    pub fn harvested_blocks(&self) -> u64 {
        self.harvested_blocks
    }

    pub fn increment_harvested_blocks(&mut self) {
        self.harvested_blocks += 1;
    }

    pub fn decrement_harvested_blocks(&mut self) -> Result<(), StateError> {
        self.harvested_blocks = self
            .harvested_blocks
            .checked_sub(1)
            .ok_or(StateError::HarvestedBlocksUnderflow)?;
        Ok(())
    }

    /// Mosaic ids the account currently subscribes to.
    pub fn mosaic_ids(&self) -> &IndexSet<MosaicId> {
        &self.mosaic_ids
    }

    pub fn add_mosaic_id(&mut self, id: MosaicId) {
        self.mosaic_ids.insert(id);
    }

    pub fn remove_mosaic_id(&mut self, id: &MosaicId) {
        self.mosaic_ids.shift_remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceId;

    #[test]
    fn test_balance_arithmetic_is_checked() {
        let mut info = AccountInfo::new();
        info.increment_balance(100).unwrap();
        assert_eq!(info.balance(), 100);

        assert_eq!(
            info.decrement_balance(101),
            Err(StateError::BalanceUnderflow {
                need: 101,
                have: 100
            })
        );
        info.decrement_balance(100).unwrap();
        assert_eq!(info.balance(), 0);
    }

    #[test]
    fn test_reference_count_cannot_underflow() {
        let mut info = AccountInfo::new();
        assert_eq!(info.increment_reference_count(), 1);
        assert_eq!(info.decrement_reference_count(), Ok(0));
        assert_eq!(
            info.decrement_reference_count(),
            Err(StateError::ReferenceCountUnderflow)
        );
    }

    #[test]
    fn test_mosaic_id_set_is_deduplicated() {
        let mut info = AccountInfo::new();
        let id = MosaicId::new(NamespaceId::new("alice.tokens"), "gold");
        info.add_mosaic_id(id.clone());
        info.add_mosaic_id(id.clone());
        assert_eq!(info.mosaic_ids().len(), 1);

        info.remove_mosaic_id(&id);
        assert!(info.mosaic_ids().is_empty());
    }
}
