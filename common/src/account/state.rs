use serde::{Deserialize, Serialize};

use crate::{block::BlockHeight, crypto::Address};

use super::{AccountImportance, AccountInfo, MultisigLinks, RemoteLinks, WeightedBalances};

/// Complete cached state of one account.
///
/// Created lazily the first time an account is referenced; destroyed again
/// when its reference count drops back to zero during a rollback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    address: Address,
    height: Option<BlockHeight>,
    info: AccountInfo,
    weighted_balances: WeightedBalances,
    importance: AccountImportance,
    multisig: MultisigLinks,
    remotes: RemoteLinks,
}

impl AccountState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            height: None,
            info: AccountInfo::new(),
            weighted_balances: WeightedBalances::new(),
            importance: AccountImportance::new(),
            multisig: MultisigLinks::new(),
            remotes: RemoteLinks::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Height at which the account was first seen, if stamped.
    pub fn height(&self) -> Option<BlockHeight> {
        self.height
    }

    /// Stamps the first-seen height. Later calls are ignored; the first
    /// sighting wins.
    pub fn set_height(&mut self, height: BlockHeight) {
        if self.height.is_none() {
            self.height = Some(height);
        }
    }

    pub fn info(&self) -> &AccountInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut AccountInfo {
        &mut self.info
    }

    pub fn weighted_balances(&self) -> &WeightedBalances {
        &self.weighted_balances
    }

    pub fn weighted_balances_mut(&mut self) -> &mut WeightedBalances {
        &mut self.weighted_balances
    }

    pub fn importance(&self) -> &AccountImportance {
        &self.importance
    }

    pub fn importance_mut(&mut self) -> &mut AccountImportance {
        &mut self.importance
    }

    pub fn multisig(&self) -> &MultisigLinks {
        &self.multisig
    }

    pub fn multisig_mut(&mut self) -> &mut MultisigLinks {
        &mut self.multisig
    }

    pub fn remotes(&self) -> &RemoteLinks {
        &self.remotes
    }

    pub fn remotes_mut(&mut self) -> &mut RemoteLinks {
        &mut self.remotes
    }
}
