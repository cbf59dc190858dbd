use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use ledger_common::{
    mosaic::{MosaicEntry, MosaicId},
    namespace::{Namespace, NamespaceId},
};

use crate::error::ChainError;

/// The mosaic entries owned by one namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosaics {
    entries: IndexMap<MosaicId, MosaicEntry>,
}

impl Mosaics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &MosaicId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &MosaicId) -> Option<&MosaicEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &MosaicId) -> Option<&mut MosaicEntry> {
        self.entries.get_mut(id)
    }

    pub fn mosaic_ids(&self) -> impl Iterator<Item = &MosaicId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MosaicId, &MosaicEntry)> {
        self.entries.iter()
    }

    /// Adds a mosaic entry. Re-creating an existing id is a consistency
    /// violation.
    pub fn add(&mut self, entry: MosaicEntry) -> Result<(), ChainError> {
        let id = entry.id().clone();
        if self.entries.contains_key(&id) {
            return Err(ChainError::DuplicateMosaic(id));
        }

        self.entries.insert(id, entry);
        Ok(())
    }

    /// Removes a mosaic entry by id.
    pub fn remove(&mut self, id: &MosaicId) -> Result<MosaicEntry, ChainError> {
        self.entries
            .shift_remove(id)
            .ok_or_else(|| ChainError::UnknownMosaic(id.clone()))
    }
}

/// A namespace together with its owned mosaic entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    namespace: Namespace,
    mosaics: Mosaics,
}

impl NamespaceEntry {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            mosaics: Mosaics::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn mosaics(&self) -> &Mosaics {
        &self.mosaics
    }

    pub fn mosaics_mut(&mut self) -> &mut Mosaics {
        &mut self.mosaics
    }
}

/// In-memory index of provisioned namespaces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceCache {
    entries: IndexMap<NamespaceId, NamespaceEntry>,
}

impl NamespaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &NamespaceId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &NamespaceId) -> Option<&NamespaceEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &NamespaceId) -> Option<&mut NamespaceEntry> {
        self.entries.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NamespaceId, &NamespaceEntry)> {
        self.entries.iter()
    }

    pub fn namespace_ids(&self) -> impl Iterator<Item = &NamespaceId> {
        self.entries.keys()
    }

    /// Looks up the entry owning a mosaic id.
    pub fn mosaic_entry(&self, id: &MosaicId) -> Option<&MosaicEntry> {
        self.entries.get(id.namespace_id())?.mosaics().get(id)
    }

    pub fn mosaic_entry_mut(&mut self, id: &MosaicId) -> Option<&mut MosaicEntry> {
        self.entries
            .get_mut(id.namespace_id())?
            .mosaics_mut()
            .get_mut(id)
    }

    /// Adds a provisioned namespace. Provisioning an existing id is a
    /// consistency violation.
    pub fn add(&mut self, namespace: Namespace) -> Result<(), ChainError> {
        let id = namespace.id().clone();
        if self.entries.contains_key(&id) {
            return Err(ChainError::DuplicateNamespace(id));
        }

        debug!("namespace {} provisioned at height {}", id, namespace.height());
        self.entries.insert(id, NamespaceEntry::new(namespace));
        Ok(())
    }

    /// Removes a namespace. The namespace must exist and own no mosaic
    /// definitions; anything else marks a broken undo ordering.
    pub fn remove(&mut self, id: &NamespaceId) -> Result<(), ChainError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ChainError::UnknownNamespace(id.clone()))?;
        if !entry.mosaics().is_empty() {
            return Err(ChainError::NamespaceNotEmpty(id.clone()));
        }

        self.entries.shift_remove(id);
        debug!("namespace {} removed", id);
        Ok(())
    }
}
