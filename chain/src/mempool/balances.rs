use indexmap::IndexMap;

use ledger_common::crypto::Address;

use crate::{cache::LedgerCache, observers::TransferObserver};

/// Transient native-currency deltas layered over confirmed balances.
///
/// Tracks the net effect of unconfirmed transactions per account; never
/// touches confirmed state and is cleared wholesale once a new block lands.
#[derive(Debug, Default)]
pub struct UnconfirmedBalances {
    deltas: IndexMap<Address, i128>,
}

impl UnconfirmedBalances {
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(&mut self, account: &Address, amount: i128) {
        *self.deltas.entry(account.clone()).or_insert(0) += amount;
    }

    fn confirmed_balance(cache: &LedgerCache, account: &Address) -> i128 {
        cache
            .accounts
            .state(account)
            .map(|state| state.info().balance() as i128)
            .unwrap_or(0)
    }

    /// Confirmed balance adjusted by the tracked delta, clamped at zero.
    /// A clamped result always implies `balances_are_valid` is false.
    pub fn balance(&self, cache: &LedgerCache, account: &Address) -> u64 {
        let delta = self.deltas.get(account).copied().unwrap_or(0);
        let adjusted = Self::confirmed_balance(cache, account) + delta;
        u64::try_from(adjusted).unwrap_or(0)
    }

    /// True iff every tracked account keeps a non-negative adjusted balance.
    pub fn balances_are_valid(&self, cache: &LedgerCache) -> bool {
        self.deltas
            .iter()
            .all(|(account, delta)| Self::confirmed_balance(cache, account) + delta >= 0)
    }

    /// Resets all deltas; called once per new block.
    pub fn clear(&mut self) {
        self.deltas.clear();
    }
}

impl TransferObserver for UnconfirmedBalances {
    fn notify_credit(&mut self, account: &Address, amount: u64) {
        self.adjust(account, amount as i128);
    }

    fn notify_debit(&mut self, account: &Address, amount: u64) {
        self.adjust(account, -(amount as i128));
    }

    fn notify_transfer(&mut self, sender: &Address, recipient: &Address, amount: u64) {
        self.notify_debit(sender, amount);
        self.notify_credit(recipient, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn cache_with_balance(byte: u8, amount: u64) -> LedgerCache {
        let mut cache = LedgerCache::new();
        cache
            .accounts
            .find_state_by_address(&address(byte))
            .info_mut()
            .increment_balance(amount)
            .unwrap();
        cache
    }

    #[test]
    fn test_balance_is_confirmed_plus_delta() {
        let cache = cache_with_balance(1, 100);
        let mut overlay = UnconfirmedBalances::new();

        overlay.notify_debit(&address(1), 30);
        assert_eq!(overlay.balance(&cache, &address(1)), 70);

        overlay.notify_credit(&address(1), 10);
        assert_eq!(overlay.balance(&cache, &address(1)), 80);
    }

    #[test]
    fn test_transfer_debits_sender_and_credits_recipient() {
        let cache = cache_with_balance(1, 100);
        let mut overlay = UnconfirmedBalances::new();

        overlay.notify_transfer(&address(1), &address(2), 40);
        assert_eq!(overlay.balance(&cache, &address(1)), 60);
        assert_eq!(overlay.balance(&cache, &address(2)), 40);
        assert!(overlay.balances_are_valid(&cache));
    }

    #[test]
    fn test_double_debit_beyond_confirmed_balance_is_invalid() {
        let cache = cache_with_balance(1, 10);
        let mut overlay = UnconfirmedBalances::new();

        overlay.notify_debit(&address(1), 8);
        assert!(overlay.balances_are_valid(&cache));

        overlay.notify_debit(&address(1), 8);
        assert!(!overlay.balances_are_valid(&cache));
        assert_eq!(overlay.balance(&cache, &address(1)), 0);
    }

    #[test]
    fn test_clear_resets_all_deltas() {
        let cache = cache_with_balance(1, 10);
        let mut overlay = UnconfirmedBalances::new();

        overlay.notify_debit(&address(1), 100);
        assert!(!overlay.balances_are_valid(&cache));

        overlay.clear();
        assert!(overlay.balances_are_valid(&cache));
        assert_eq!(overlay.balance(&cache, &address(1)), 10);
    }
}
