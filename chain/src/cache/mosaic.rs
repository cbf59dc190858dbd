use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use ledger_common::mosaic::{MosaicDefinition, MosaicId};

use crate::error::ChainError;

/// Flat global index of mosaic definitions, independent of namespace
/// ownership. Kept for the legacy mosaic-creation path; the authoritative
/// supply and balances live in the namespace cache.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicCache {
    definitions: IndexMap<MosaicId, MosaicDefinition>,
}

impl MosaicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.definitions.len()
    }

    pub fn contains(&self, id: &MosaicId) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn get(&self, id: &MosaicId) -> Option<&MosaicDefinition> {
        self.definitions.get(id)
    }

    pub fn add(&mut self, definition: MosaicDefinition) -> Result<(), ChainError> {
        let id = definition.id.clone();
        if self.definitions.contains_key(&id) {
            return Err(ChainError::DuplicateMosaic(id));
        }

        self.definitions.insert(id, definition);
        Ok(())
    }

    pub fn remove(&mut self, id: &MosaicId) -> Result<(), ChainError> {
        self.definitions
            .shift_remove(id)
            .ok_or_else(|| ChainError::UnknownMosaic(id.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::{crypto::Address, mosaic::MosaicProperties, namespace::NamespaceId};

    fn definition(name: &str) -> MosaicDefinition {
        MosaicDefinition::new(
            Address::zero(),
            MosaicId::new(NamespaceId::new("alice"), name),
            "test",
            MosaicProperties::default(),
        )
    }

    #[test]
    fn test_add_and_remove_round_trip() {
        let mut cache = MosaicCache::new();
        let definition = definition("gold");
        cache.add(definition.clone()).unwrap();
        assert!(cache.contains(&definition.id));

        cache.remove(&definition.id).unwrap();
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_duplicate_add_fails() {
        let mut cache = MosaicCache::new();
        cache.add(definition("gold")).unwrap();
        assert!(matches!(
            cache.add(definition("gold")),
            Err(ChainError::DuplicateMosaic(_))
        ));
    }

    #[test]
    fn test_remove_unknown_fails() {
        let mut cache = MosaicCache::new();
        assert!(matches!(
            cache.remove(&definition("gold").id),
            Err(ChainError::UnknownMosaic(_))
        ));
    }
}
