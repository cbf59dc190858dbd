use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{block::BlockHeight, crypto::Address, error::StateError};

/// Direction of an importance transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ImportanceTransferMode {
    Activate,
    Deactivate,
}

/// Which side of a harvesting delegation a link describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RemoteRole {
    /// The lessor: an account that delegated its harvesting elsewhere
    HarvestingRemotely,
    /// The lessee: an account harvesting on behalf of another
    RemoteHarvester,
}

/// One half of a harvesting-delegation pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLink {
    pub address: Address,
    pub height: BlockHeight,
    pub mode: ImportanceTransferMode,
    pub role: RemoteRole,
}

impl RemoteLink {
    pub const fn new(
        address: Address,
        height: BlockHeight,
        mode: ImportanceTransferMode,
        role: RemoteRole,
    ) -> Self {
        Self {
            address,
            height,
            mode,
            role,
        }
    }
}

/// Stack of harvesting-delegation links for one account.
///
/// Links are pushed on execute and popped on undo; a pop that does not match
/// the top entry exactly marks a broken execute/undo pairing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLinks {
    links: Vec<RemoteLink>,
}

impl RemoteLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The most recent link, if any.
    pub fn current(&self) -> Option<&RemoteLink> {
        self.links.last()
    }

    pub fn add_link(&mut self, link: RemoteLink) {
        self.links.push(link);
    }

    pub fn remove_link(&mut self, link: &RemoteLink) -> Result<(), StateError> {
        match self.links.last() {
            Some(last) if last == link => {
                self.links.pop();
                Ok(())
            }
            _ => Err(StateError::RemoteLinkMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(byte: u8, height: BlockHeight) -> RemoteLink {
        RemoteLink::new(
            Address::new([byte; 32]),
            height,
            ImportanceTransferMode::Activate,
            RemoteRole::HarvestingRemotely,
        )
    }

    #[test]
    fn test_links_form_a_stack() {
        let mut links = RemoteLinks::new();
        assert!(links.is_empty());

        links.add_link(link(1, 7));
        links.add_link(link(2, 9));
        assert_eq!(links.current(), Some(&link(2, 9)));

        links.remove_link(&link(2, 9)).unwrap();
        assert_eq!(links.current(), Some(&link(1, 7)));
    }

    #[test]
    fn test_remove_requires_exact_top_match() {
        let mut links = RemoteLinks::new();
        links.add_link(link(1, 7));
        assert_eq!(
            links.remove_link(&link(1, 8)),
            Err(StateError::RemoteLinkMismatch)
        );
    }

    #[test]
    fn test_remove_from_empty_fails() {
        let mut links = RemoteLinks::new();
        assert_eq!(
            links.remove_link(&link(1, 7)),
            Err(StateError::RemoteLinkMismatch)
        );
    }
}
