//! Time-based vesting of account balances.
//!
//! A balance is split into a vested and an unvested part. Funds are received
//! unvested and decay toward vested once per day-bucket of blocks. The entry
//! list is append-only and height-ordered so that every receive/send can be
//! undone exactly during a chain rollback.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    block::BlockHeight,
    config::{BLOCKS_PER_DAY, UNVESTED_DECAY_DENOMINATOR, UNVESTED_DECAY_NUMERATOR},
    error::StateError,
};

/// A single weighted balance entry.
///
/// `amount` is the operation amount that produced the entry; `vested` and
/// `unvested` are the account totals after the operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBalance {
    height: BlockHeight,
    amount: u64,
    vested: u64,
    unvested: u64,
}

impl WeightedBalance {
    pub const fn new(height: BlockHeight, vested: u64, unvested: u64) -> Self {
        Self {
            height,
            amount: vested.saturating_add(unvested),
            vested,
            unvested,
        }
    }

    pub const fn zero() -> Self {
        Self {
            height: 1,
            amount: 0,
            vested: 0,
            unvested: 0,
        }
    }

    /// Creates a fully vested entry.
    pub const fn vested(height: BlockHeight, amount: u64) -> Self {
        Self {
            height,
            amount,
            vested: amount,
            unvested: 0,
        }
    }

    /// Creates a fully unvested entry.
    pub const fn unvested(height: BlockHeight, amount: u64) -> Self {
        Self {
            height,
            amount,
            vested: 0,
            unvested: amount,
        }
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn vested_balance(&self) -> u64 {
        self.vested
    }

    pub fn unvested_balance(&self) -> u64 {
        self.unvested
    }

    /// Total balance carried by this entry.
    pub fn balance(&self) -> u64 {
        self.vested + self.unvested
    }

    /// Advances the entry to the next day boundary, decaying the unvested
    /// part. The total balance is preserved exactly: whatever the decay
    /// truncates away moves to the vested part.
    pub fn next(&self) -> WeightedBalance {
        let total = self.balance();
        let decayed = (self.unvested as u128 * UNVESTED_DECAY_NUMERATOR as u128
            / UNVESTED_DECAY_DENOMINATOR as u128) as u64;

        WeightedBalance {
            height: self.height.div_ceil(BLOCKS_PER_DAY) * BLOCKS_PER_DAY + 1,
            amount: 0,
            vested: total - decayed,
            unvested: decayed,
        }
    }

    /// Derives a new entry with `amount` received at `height`.
    /// Receives are entirely unvested.
    pub fn create_receive(&self, height: BlockHeight, amount: u64) -> Result<Self, StateError> {
        let unvested = self
            .unvested
            .checked_add(amount)
            .ok_or(StateError::BalanceOverflow)?;

        Ok(WeightedBalance {
            height,
            amount,
            vested: self.vested,
            unvested,
        })
    }

    /// Derives a new entry with `amount` sent at `height`.
    ///
    /// The amount is taken proportionally from both parts; the unvested share
    /// is truncated, and a vested deficit caused by the truncation folds back
    /// into the unvested part so both components stay non-negative.
    pub fn create_send(&self, height: BlockHeight, amount: u64) -> Result<Self, StateError> {
        let balance = self.balance();
        if amount > balance {
            return Err(StateError::InsufficientWeightedBalance { amount, balance });
        }

        if balance == 0 {
            return Ok(WeightedBalance {
                height,
                amount,
                vested: 0,
                unvested: 0,
            });
        }

        let unvested_ratio = self.unvested as f64 / balance as f64;
        let send_unvested = ((unvested_ratio * amount as f64) as u64)
            .min(self.unvested)
            .min(amount);
        let send_vested = amount - send_unvested;

        let mut new_unvested = self.unvested - send_unvested;
        let new_vested = if send_vested > self.vested {
            new_unvested = new_unvested.saturating_sub(send_vested - self.vested);
            0
        } else {
            self.vested - send_vested
        };

        Ok(WeightedBalance {
            height,
            amount,
            vested: new_vested,
            unvested: new_unvested,
        })
    }
}

/// Height-ordered container of weighted balance entries.
///
/// Operations assume they are called in paired execute/undo order; an undo
/// with no matching recorded entry at its height is rejected. Beyond that,
/// undo arguments are not independently validated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedBalances {
    balances: Vec<WeightedBalance>,
}

impl WeightedBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Adds a fully vested amount at the given height.
    pub fn add_fully_vested(&mut self, height: BlockHeight, amount: u64) {
        self.balances.push(WeightedBalance::vested(height, amount));
    }

    /// Adds a receive operation of `amount` at `height`.
    pub fn add_receive(&mut self, height: BlockHeight, amount: u64) -> Result<(), StateError> {
        if let Some(last) = self.balances.last() {
            if height < last.height {
                return Err(StateError::NonMonotonicHeight { height });
            }
            self.iterate_balances(height);
        }

        let prev = match self.balances.last() {
            Some(last) => last.clone(),
            None => WeightedBalance::zero(),
        };
        self.balances.push(prev.create_receive(height, amount)?);
        Ok(())
    }

    /// Undoes a receive operation of `amount` at `height`.
    pub fn undo_receive(&mut self, height: BlockHeight, amount: u64) -> Result<(), StateError> {
        self.undo_last(height, amount)
    }

    /// Adds a send operation of `amount` at `height`.
    pub fn add_send(&mut self, height: BlockHeight, amount: u64) -> Result<(), StateError> {
        if let Some(last) = self.balances.last() {
            if height < last.height {
                return Err(StateError::NonMonotonicHeight { height });
            }
            self.iterate_balances(height);
        }

        let prev = match self.balances.last() {
            Some(last) => last.clone(),
            None => WeightedBalance::zero(),
        };
        self.balances.push(prev.create_send(height, amount)?);
        Ok(())
    }

    /// Undoes a send operation of `amount` at `height`.
    pub fn undo_send(&mut self, height: BlockHeight, amount: u64) -> Result<(), StateError> {
        self.undo_last(height, amount)
    }

    // Receives and sends both append exactly one entry, so undoing either
    // removes the latest entry recorded for (height, amount) after rewinding
    // decay buckets past the target height. The search is not limited to the
    // top entry: a rollback replays a transaction's notifications in their
    // original order, so the first effect undone sits below entries appended
    // by the later effects of the same transaction. Once the full sequence
    // is undone the list is exactly the pre-execute list; intermediate
    // states are transient.
    fn undo_last(&mut self, height: BlockHeight, amount: u64) -> Result<(), StateError> {
        self.undo_chain(height);
        match self
            .balances
            .iter()
            .rposition(|b| b.height == height && b.amount == amount)
        {
            Some(index) => {
                self.balances.remove(index);
                Ok(())
            }
            None => Err(StateError::WeightedUndoMismatch { height }),
        }
    }

    /// Gets the vested amount at the specified height.
    pub fn vested(&self, height: BlockHeight) -> u64 {
        self.entry_at(height)
            .map(|entry| entry.vested_balance())
            .unwrap_or(0)
    }

    /// Gets the unvested amount at the specified height.
    pub fn unvested(&self, height: BlockHeight) -> u64 {
        self.entry_at(height)
            .map(|entry| entry.unvested_balance())
            .unwrap_or(0)
    }

    /// Gets the combined vested + unvested amount at the specified height.
    pub fn balance(&self, height: BlockHeight) -> u64 {
        self.entry_at(height)
            .map(|entry| entry.balance())
            .unwrap_or(0)
    }

    // State at `height`: the latest stored entry at or before it, decayed
    // forward across any day boundaries not yet materialized by a later
    // operation.
    fn entry_at(&self, height: BlockHeight) -> Option<WeightedBalance> {
        let index = self.balances.iter().rposition(|b| b.height <= height)?;
        let mut entry = self.balances[index].clone();

        if index == self.balances.len() - 1 {
            let mut multiple = entry.height.div_ceil(BLOCKS_PER_DAY) * BLOCKS_PER_DAY;
            while height > multiple {
                entry = entry.next();
                multiple += BLOCKS_PER_DAY;
            }
        }

        Some(entry)
    }

    // Materializes decay buckets between the last entry and `height` so the
    // next appended operation chains off the decayed state.
    // Requires a non-empty entry list.
    fn iterate_balances(&mut self, height: BlockHeight) {
        let mut multiple = self
            .balances
            .last()
            .map(|last| last.height.div_ceil(BLOCKS_PER_DAY) * BLOCKS_PER_DAY)
            .unwrap_or(0);

        while height > multiple {
            let next = self.balances.last().map(|last| last.next());
            if let Some(next) = next {
                self.balances.push(next);
            }
            multiple += BLOCKS_PER_DAY;
        }
    }

    /// Reverts all entries recorded after the specified height. At least one
    /// entry is always retained so past receives stay undoable.
    pub fn undo_chain(&mut self, height: BlockHeight) {
        while self.balances.len() > 1 {
            match self.balances.last() {
                Some(last) if last.height > height => {
                    self.balances.pop();
                }
                _ => break,
            }
        }
    }

    /// Consolidates all entries below `min_height` into a single entry
    /// carrying the state at `min_height`.
    pub fn prune(&mut self, min_height: BlockHeight) {
        if self.balances.iter().all(|b| b.height >= min_height) {
            return;
        }

        let vested = self.vested(min_height);
        let unvested = self.unvested(min_height);
        let before = self.balances.len();
        self.balances.retain(|b| b.height >= min_height);
        trace!(
            "consolidated {} weighted balance entries below height {}",
            before - self.balances.len(),
            min_height
        );
        self.balances
            .insert(0, WeightedBalance::new(min_height, vested, unvested));
    }

    /// Replaces a single received entry by its fully vested equivalent.
    /// Used for accounts funded in the genesis block.
    pub fn convert_to_fully_vested(&mut self) -> Result<(), StateError> {
        if self.balances.len() != 1 {
            return Err(StateError::NotConvertible {
                entries: self.balances.len(),
            });
        }

        let entry = &self.balances[0];
        let height = entry.height();
        let total = entry.balance();
        self.balances.clear();
        self.add_fully_vested(height, total);
        Ok(())
    }
}
