//! Read-side entry point: merged, sorted, optionally filtered records per kind.

use serde_json::Value;

use crate::config::Config;
use crate::data::ability::Ability;
use crate::data::entity::{Entity, EntityKind};
use crate::data::filter::CatalogFilter;
use crate::data::loader::{load_entities, load_entity, load_record, load_records, KindDirs, LoadError, Loaded};
use crate::data::pickup::Pickup;
use crate::data::weapon::Weapon;

#[derive(Debug, Clone)]
pub struct Catalog {
    weapons: KindDirs,
    abilities: KindDirs,
    pickups: KindDirs,
}

impl Catalog {
    pub fn from_config(config: &Config) -> Self {
        Self {
            weapons: config.layout(EntityKind::Weapon).kind_dirs(),
            abilities: config.layout(EntityKind::Ability).kind_dirs(),
            pickups: config.layout(EntityKind::Pickup).kind_dirs(),
        }
    }

    pub fn dirs(&self, kind: EntityKind) -> &KindDirs {
        match kind {
            EntityKind::Weapon => &self.weapons,
            EntityKind::Ability => &self.abilities,
            EntityKind::Pickup => &self.pickups,
        }
    }

    pub fn weapons(&self) -> Result<Vec<Weapon>, LoadError> {
        load_entities(&self.weapons)
    }

    pub fn weapon(&self, id: &str) -> Option<Weapon> {
        load_entity(&self.weapons, id)
    }

    pub fn abilities(&self) -> Result<Vec<Ability>, LoadError> {
        load_entities(&self.abilities)
    }

    pub fn ability(&self, id: &str) -> Option<Ability> {
        load_entity(&self.abilities, id)
    }

    pub fn pickups(&self) -> Result<Vec<Pickup>, LoadError> {
        load_entities(&self.pickups)
    }

    pub fn pickup(&self, id: &str) -> Option<Pickup> {
        load_entity(&self.pickups, id)
    }

    /// Filtered list of merged JSON records, for callers that only know the kind
    /// at runtime. Override keys the record types do not declare are kept.
    pub fn list_json(&self, kind: EntityKind, filter: &CatalogFilter) -> Result<Vec<Value>, LoadError> {
        match kind {
            EntityKind::Weapon => Ok(matching_values(load_records::<Weapon>(&self.weapons)?, filter)),
            EntityKind::Ability => Ok(matching_values(load_records::<Ability>(&self.abilities)?, filter)),
            EntityKind::Pickup => Ok(matching_values(load_records::<Pickup>(&self.pickups)?, filter)),
        }
    }

    pub fn get_json(&self, kind: EntityKind, id: &str) -> Option<Value> {
        match kind {
            EntityKind::Weapon => load_record::<Weapon>(&self.weapons, id).map(|r| r.value),
            EntityKind::Ability => load_record::<Ability>(&self.abilities, id).map(|r| r.value),
            EntityKind::Pickup => load_record::<Pickup>(&self.pickups, id).map(|r| r.value),
        }
    }
}

fn matching_values<E: Entity>(records: Vec<Loaded<E>>, filter: &CatalogFilter) -> Vec<Value> {
    let keep_all = filter.is_empty();
    records
        .into_iter()
        .filter(|record| keep_all || filter.matches(&record.entity))
        .map(|record| record.value)
        .collect()
}
