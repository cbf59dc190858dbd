use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::{block::BlockHeight, config::NAMESPACE_LIFETIME, crypto::Address};

/// Identifier of a namespace, e.g. `alice.tokens`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(String);

impl NamespaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NamespaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NamespaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An ownership domain for mosaics.
///
/// A namespace is provisioned at a height and stays active for a fixed
/// lifetime; past its expiry height its mosaics are detached from holder
/// accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    id: NamespaceId,
    owner: Address,
    height: BlockHeight,
}

impl Namespace {
    pub const fn new(id: NamespaceId, owner: Address, height: BlockHeight) -> Self {
        Self { id, owner, height }
    }

    pub fn id(&self) -> &NamespaceId {
        &self.id
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Height at which the namespace was provisioned.
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn expiry_height(&self) -> BlockHeight {
        self.height.saturating_add(NAMESPACE_LIFETIME)
    }

    pub fn is_active(&self, height: BlockHeight) -> bool {
        self.height <= height && height < self.expiry_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_is_active_until_expiry() {
        let namespace = Namespace::new(NamespaceId::new("alice"), Address::zero(), 100);
        assert_eq!(namespace.expiry_height(), 100 + NAMESPACE_LIFETIME);

        assert!(!namespace.is_active(99));
        assert!(namespace.is_active(100));
        assert!(namespace.is_active(100 + NAMESPACE_LIFETIME - 1));
        assert!(!namespace.is_active(100 + NAMESPACE_LIFETIME));
    }
}
