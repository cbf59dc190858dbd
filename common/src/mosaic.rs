//! Mosaic model: typed, namespaced assets with their own supply and
//! per-account balances.

use indexmap::IndexMap;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{crypto::Address, error::StateError, namespace::NamespaceId};

/// Identifier of a mosaic inside its namespace, rendered as
/// `namespace:name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MosaicId {
    namespace_id: NamespaceId,
    name: String,
}

impl MosaicId {
    pub fn new(namespace_id: NamespaceId, name: impl Into<String>) -> Self {
        Self {
            namespace_id,
            name: name.into(),
        }
    }

    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for MosaicId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace_id, self.name)
    }
}

impl FromStr for MosaicId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s.split_once(':').ok_or("Invalid mosaic id")?;
        if namespace.is_empty() || name.is_empty() {
            return Err("Invalid mosaic id");
        }

        Ok(MosaicId::new(NamespaceId::new(namespace), name))
    }
}

impl Serialize for MosaicId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'a> Deserialize<'a> for MosaicId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let raw = String::deserialize(deserializer)?;
        MosaicId::from_str(&raw).map_err(SerdeError::custom)
    }
}

/// Fixed properties of a mosaic, chosen at definition time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicProperties {
    /// Supply in whole units at creation
    pub initial_supply: u64,
    /// Number of decimal places carried by balances
    pub divisibility: u8,
    /// Whether supply change transactions are allowed
    pub supply_mutable: bool,
    /// Whether the mosaic can be transferred between arbitrary accounts
    pub transferable: bool,
}

impl Default for MosaicProperties {
    fn default() -> Self {
        Self {
            initial_supply: 1_000,
            divisibility: 0,
            supply_mutable: true,
            transferable: true,
        }
    }
}

/// Full definition of a mosaic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicDefinition {
    pub creator: Address,
    pub id: MosaicId,
    pub description: String,
    pub properties: MosaicProperties,
}

impl MosaicDefinition {
    pub fn new(
        creator: Address,
        id: MosaicId,
        description: impl Into<String>,
        properties: MosaicProperties,
    ) -> Self {
        Self {
            creator,
            id,
            description: description.into(),
            properties,
        }
    }
}

/// Converts a supply in whole units to a quantity in atomic sub-units.
pub fn to_quantity(supply: u64, divisibility: u8) -> Result<u64, StateError> {
    let multiplier = 10u128.pow(divisibility as u32);
    let quantity = supply as u128 * multiplier;
    u64::try_from(quantity).map_err(|_| StateError::QuantityOverflow {
        supply,
        divisibility,
    })
}

/// Per-account balances of one mosaic, in atomic sub-units.
///
/// Entries are retained when they reach zero; `owners` exposes only accounts
/// holding a non-zero balance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicBalances {
    balances: IndexMap<Address, u64>,
}

impl MosaicBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, address: &Address) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Accounts currently holding a non-zero balance.
    pub fn owners(&self) -> impl Iterator<Item = &Address> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(address, _)| address)
    }

    pub fn size(&self) -> usize {
        self.balances.len()
    }

    pub fn increment_balance(&mut self, address: &Address, quantity: u64) -> Result<(), StateError> {
        let balance = self.balances.entry(address.clone()).or_insert(0);
        *balance = balance
            .checked_add(quantity)
            .ok_or(StateError::BalanceOverflow)?;
        Ok(())
    }

    pub fn decrement_balance(&mut self, address: &Address, quantity: u64) -> Result<(), StateError> {
        let balance = self.balances.entry(address.clone()).or_insert(0);
        match balance.checked_sub(quantity) {
            Some(value) => {
                *balance = value;
                Ok(())
            }
            None => Err(StateError::MosaicBalanceUnderflow {
                need: quantity,
                have: *balance,
            }),
        }
    }
}

/// A mosaic definition together with its live supply and balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicEntry {
    definition: MosaicDefinition,
    supply: u64,
    balances: MosaicBalances,
}

impl MosaicEntry {
    /// Creates an entry for a freshly defined mosaic: the initial supply is
    /// minted entirely to the creator.
    pub fn new(definition: MosaicDefinition) -> Result<Self, StateError> {
        let initial_quantity = to_quantity(
            definition.properties.initial_supply,
            definition.properties.divisibility,
        )?;

        let mut balances = MosaicBalances::new();
        if initial_quantity > 0 {
            balances.increment_balance(&definition.creator, initial_quantity)?;
        }

        Ok(Self {
            supply: definition.properties.initial_supply,
            definition,
            balances,
        })
    }

    pub fn definition(&self) -> &MosaicDefinition {
        &self.definition
    }

    pub fn id(&self) -> &MosaicId {
        &self.definition.id
    }

    /// Current total supply in whole units.
    pub fn supply(&self) -> u64 {
        self.supply
    }

    pub fn balances(&self) -> &MosaicBalances {
        &self.balances
    }

    pub fn balances_mut(&mut self) -> &mut MosaicBalances {
        &mut self.balances
    }

    /// Increases the supply, crediting the creator with the equivalent
    /// quantity.
    pub fn increase_supply(&mut self, delta: u64) -> Result<(), StateError> {
        let quantity = to_quantity(delta, self.definition.properties.divisibility)?;
        let supply = self
            .supply
            .checked_add(delta)
            .ok_or(StateError::SupplyOverflow)?;

        self.balances
            .increment_balance(&self.definition.creator, quantity)?;
        self.supply = supply;
        Ok(())
    }

    /// Decreases the supply, debiting the creator by the equivalent
    /// quantity.
    pub fn decrease_supply(&mut self, delta: u64) -> Result<(), StateError> {
        let quantity = to_quantity(delta, self.definition.properties.divisibility)?;
        let supply = self
            .supply
            .checked_sub(delta)
            .ok_or(StateError::SupplyUnderflow {
                delta,
                supply: self.supply,
            })?;

        self.balances
            .decrement_balance(&self.definition.creator, quantity)?;
        self.supply = supply;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn definition(divisibility: u8, initial_supply: u64) -> MosaicDefinition {
        MosaicDefinition::new(
            address(1),
            MosaicId::new(NamespaceId::new("alice.tokens"), "gold"),
            "test mosaic",
            MosaicProperties {
                initial_supply,
                divisibility,
                supply_mutable: true,
                transferable: true,
            },
        )
    }

    #[test]
    fn test_mosaic_id_string_round_trip() {
        let id = MosaicId::new(NamespaceId::new("alice.tokens"), "gold");
        assert_eq!(id.to_string(), "alice.tokens:gold");
        assert_eq!(MosaicId::from_str("alice.tokens:gold").unwrap(), id);
        assert!(MosaicId::from_str("no-separator").is_err());
    }

    #[test]
    fn test_to_quantity_scales_by_divisibility() {
        assert_eq!(to_quantity(1000, 0).unwrap(), 1000);
        assert_eq!(to_quantity(1000, 4).unwrap(), 10_000_000);
        assert!(matches!(
            to_quantity(u64::MAX, 4),
            Err(StateError::QuantityOverflow { .. })
        ));
    }

    #[test]
    fn test_new_entry_mints_initial_supply_to_creator() {
        let entry = MosaicEntry::new(definition(4, 1000)).unwrap();
        assert_eq!(entry.supply(), 1000);
        assert_eq!(entry.balances().balance(&address(1)), 10_000_000);
    }

    #[test]
    fn test_supply_change_keeps_creator_balance_in_sync() {
        let mut entry = MosaicEntry::new(definition(2, 100)).unwrap();

        entry.increase_supply(50).unwrap();
        assert_eq!(entry.supply(), 150);
        assert_eq!(entry.balances().balance(&address(1)), 15_000);

        entry.decrease_supply(150).unwrap();
        assert_eq!(entry.supply(), 0);
        assert_eq!(entry.balances().balance(&address(1)), 0);
    }

    #[test]
    fn test_supply_cannot_go_negative() {
        let mut entry = MosaicEntry::new(definition(0, 10)).unwrap();
        assert_eq!(
            entry.decrease_supply(11),
            Err(StateError::SupplyUnderflow {
                delta: 11,
                supply: 10
            })
        );
    }

    #[test]
    fn test_zero_balances_are_retained() {
        let mut balances = MosaicBalances::new();
        balances.increment_balance(&address(1), 100).unwrap();
        balances.decrement_balance(&address(1), 100).unwrap();

        assert_eq!(balances.size(), 1);
        assert_eq!(balances.owners().count(), 0);
        assert_eq!(balances.balance(&address(1)), 0);
    }

    #[test]
    fn test_balance_cannot_go_negative() {
        let mut balances = MosaicBalances::new();
        balances.increment_balance(&address(1), 5).unwrap();
        assert_eq!(
            balances.decrement_balance(&address(1), 6),
            Err(StateError::MosaicBalanceUnderflow { need: 6, have: 5 })
        );
    }
}
