use serde::{Deserialize, Serialize};

use crate::{block::BlockHeight, crypto::Address, error::StateError};

/// A weighted edge from one account to another, recorded against the sender
/// of a transfer and consumed by importance scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountLink {
    pub height: BlockHeight,
    pub amount: u64,
    pub other_address: Address,
}

impl AccountLink {
    pub const fn new(height: BlockHeight, amount: u64, other_address: Address) -> Self {
        Self {
            height,
            amount,
            other_address,
        }
    }
}

/// Importance information for one account: the latest computed score plus the
/// height-ordered outlink history feeding the next recalculation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountImportance {
    importance: Option<(BlockHeight, f64)>,
    outlinks: Vec<AccountLink>,
}

impl AccountImportance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_importance(&mut self, height: BlockHeight, importance: f64) {
        self.importance = Some((height, importance));
    }

    /// The latest computed importance, if it was computed at `height`.
    pub fn importance(&self, height: BlockHeight) -> Option<f64> {
        match self.importance {
            Some((h, value)) if h == height => Some(value),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.importance.is_some()
    }

    pub fn add_outlink(&mut self, link: AccountLink) {
        self.outlinks.push(link);
    }

    /// Removes the most recent outlink equal to `link`.
    pub fn remove_outlink(&mut self, link: &AccountLink) -> Result<(), StateError> {
        match self.outlinks.iter().rposition(|l| l == link) {
            Some(index) => {
                self.outlinks.remove(index);
                Ok(())
            }
            None => Err(StateError::OutlinkMismatch),
        }
    }

    /// Outlinks recorded at or below the given height.
    pub fn outlinks(&self, height: BlockHeight) -> impl Iterator<Item = &AccountLink> {
        self.outlinks.iter().filter(move |l| l.height <= height)
    }

    pub fn outlinks_size(&self, height: BlockHeight) -> usize {
        self.outlinks(height).count()
    }

    /// Drops outlinks recorded strictly below `min_height`.
    pub fn prune_outlinks(&mut self, min_height: BlockHeight) {
        self.outlinks.retain(|l| l.height >= min_height);
    }
}
