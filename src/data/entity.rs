//! Common view over normalized weapons, abilities and pickups.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::pickup::{LootPool, PickupTag, PickupType};
use crate::data::rarity::Rarity;
use crate::data::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Weapon,
    Ability,
    Pickup,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Weapon, EntityKind::Ability, EntityKind::Pickup];

    /// Directory name under the data, images and public roots.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Weapon => "weapons",
            Self::Ability => "abilities",
            Self::Pickup => "pickups",
        }
    }

    /// Directory name under the export's `Content/Blueprint`.
    pub fn blueprint_dir(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Ability => "Ability",
            Self::Pickup => "Pickup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Ability => "ability",
            Self::Pickup => "pickup",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| lowered == kind.label() || lowered == kind.dir_name())
            .ok_or_else(|| UnknownVariant {
                kind: "entity kind",
                value: s.to_string(),
            })
    }
}

/// A normalized record as written to `<id>.json` and read back at serve time.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn rarity(&self) -> Rarity;
    fn requires_unlock(&self) -> bool;
    /// Resolved icon asset name, if the source referenced one.
    fn icon_asset(&self) -> Option<&str>;

    fn pickup_type(&self) -> Option<PickupType> {
        None
    }

    fn loot_pool(&self) -> Option<LootPool> {
        None
    }

    fn pickup_tag(&self) -> Option<PickupTag> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_singular_and_plural() {
        assert_eq!("weapons".parse::<EntityKind>(), Ok(EntityKind::Weapon));
        assert_eq!("Ability".parse::<EntityKind>(), Ok(EntityKind::Ability));
        assert_eq!(" pickups ".parse::<EntityKind>(), Ok(EntityKind::Pickup));
        assert!("relics".parse::<EntityKind>().is_err());
    }
}
