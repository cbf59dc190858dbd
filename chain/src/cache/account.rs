use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use ledger_common::{account::AccountState, crypto::Address};

use crate::error::ChainError;

/// In-memory index of all cached account states.
///
/// Lookup by address creates the state on demand; removal is driven by the
/// account lifecycle observer once an account's reference count drops to
/// zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStateCache {
    states: IndexMap<Address, AccountState>,
}

impl AccountStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.states.len()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.states.contains_key(address)
    }

    /// Finds the state for an address, creating it if the account was never
    /// seen before.
    pub fn find_state_by_address(&mut self, address: &Address) -> &mut AccountState {
        if !self.states.contains_key(address) {
            debug!("creating account state for {}", address);
        }
        self.states
            .entry(address.clone())
            .or_insert_with(|| AccountState::new(address.clone()))
    }

    /// Non-creating lookup.
    pub fn state(&self, address: &Address) -> Option<&AccountState> {
        self.states.get(address)
    }

    /// Non-creating mutable lookup.
    pub fn state_mut(&mut self, address: &Address) -> Option<&mut AccountState> {
        self.states.get_mut(address)
    }

    /// Removes an account from the cache.
    pub fn remove_from_cache(&mut self, address: &Address) -> Result<(), ChainError> {
        self.states
            .shift_remove(address)
            .ok_or_else(|| ChainError::UnknownAccount(address.clone()))?;
        debug!("removed account state for {}", address);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &AccountState)> {
        self.states.iter()
    }

    /// Mutable view over all cached states, used by pruning and importance
    /// recalculation passes.
    pub fn states_mut(&mut self) -> impl Iterator<Item = &mut AccountState> {
        self.states.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[test]
    fn test_find_creates_on_demand() {
        let mut cache = AccountStateCache::new();
        assert!(!cache.contains(&address(1)));

        cache.find_state_by_address(&address(1));
        assert!(cache.contains(&address(1)));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_state_does_not_create() {
        let cache = AccountStateCache::new();
        assert!(cache.state(&address(1)).is_none());
    }

    #[test]
    fn test_remove_unknown_account_fails() {
        let mut cache = AccountStateCache::new();
        assert_eq!(
            cache.remove_from_cache(&address(1)),
            Err(ChainError::UnknownAccount(address(1)))
        );
    }

    #[test]
    fn test_remove_drops_state() {
        let mut cache = AccountStateCache::new();
        cache.find_state_by_address(&address(1));
        cache.remove_from_cache(&address(1)).unwrap();
        assert_eq!(cache.size(), 0);
    }
}
