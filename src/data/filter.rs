//! Search and facet filtering over loaded entity lists.

use crate::data::entity::Entity;
use crate::data::pickup::{LootPool, PickupTag, PickupType};
use crate::data::rarity::Rarity;

/// All criteria are optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub rarity: Option<Rarity>,
    pub pickup_type: Option<PickupType>,
    pub loot_pool: Option<LootPool>,
    /// Pickup element tag.
    pub element: Option<PickupTag>,
    pub requires_unlock: Option<bool>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self == &CatalogFilter::default()
    }

    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !entity.name().to_lowercase().contains(&needle)
                && !entity.description().to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.rarity.is_some_and(|r| entity.rarity() != r) {
            return false;
        }
        if self.requires_unlock.is_some_and(|u| entity.requires_unlock() != u) {
            return false;
        }
        if self.pickup_type.is_some() && entity.pickup_type() != self.pickup_type {
            return false;
        }
        if self.loot_pool.is_some() && entity.loot_pool() != self.loot_pool {
            return false;
        }
        if self.element.is_some() && entity.pickup_tag() != self.element {
            return false;
        }
        true
    }
}

/// `yes`/`true` and `no`/`false`, case-insensitive.
pub fn parse_unlock(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ability::Ability;
    use crate::data::pickup::Pickup;

    fn ability(name: &str, description: &str, unlock: bool) -> Ability {
        Ability {
            id: name.replace(' ', ""),
            game_id: String::new(),
            name: name.to_string(),
            description: description.to_string(),
            rarity: Rarity::Epic,
            cooldown: 5.0,
            spawn_type: None,
            spawn_delay: None,
            hitmarker_type: None,
            projectile_id: None,
            requires_unlock: unlock,
            icon_path: None,
        }
    }

    fn matching_names<'a>(abilities: &'a [Ability], filter: &CatalogFilter) -> Vec<&'a str> {
        abilities
            .iter()
            .filter(|a| filter.matches(*a))
            .map(|a| a.name.as_str())
            .collect()
    }

    fn pickup(id: &str, pickup_type: PickupType, tag: Option<PickupTag>) -> Pickup {
        Pickup {
            id: id.to_string(),
            game_id: String::new(),
            pickup_type,
            name: id.to_string(),
            description: String::new(),
            rarity: Rarity::Common,
            loot_pool: Some(LootPool::Elemental),
            pickup_tag: tag,
            spawn_weight: None,
            level_description: None,
            icon_path: None,
            requires_unlock: false,
            cooldown: None,
            base_buff: None,
            get_buff_as_multiplier: false,
            hyperbolic_buff: false,
            base_debuff: None,
            get_debuff_as_multiplier: false,
        }
    }

    #[test]
    fn search_matches_name_or_description() {
        let abilities = vec![
            ability("Black Hole", "Pulls enemies in", false),
            ability("Grenade", "Explodes on impact", false),
        ];
        let filter = CatalogFilter {
            search: Some("IMPACT".into()),
            ..CatalogFilter::default()
        };
        assert_eq!(matching_names(&abilities, &filter), vec!["Grenade"]);
    }

    #[test]
    fn unlock_filter_and_parsing() {
        let abilities = vec![ability("A", "", true), ability("B", "", false)];
        let filter = CatalogFilter {
            requires_unlock: parse_unlock("No"),
            ..CatalogFilter::default()
        };
        assert_eq!(matching_names(&abilities, &filter), vec!["B"]);
        assert_eq!(parse_unlock("maybe"), None);
    }

    #[test]
    fn pickup_facets_exclude_entities_without_them() {
        let filter = CatalogFilter {
            element: Some(PickupTag::Fire),
            ..CatalogFilter::default()
        };
        assert!(!filter.matches(&ability("A", "", false)));
        assert!(filter.matches(&pickup("Flame", PickupType::Perk, Some(PickupTag::Fire))));
        assert!(!filter.matches(&pickup("Frost", PickupType::Perk, Some(PickupTag::Ice))));

        let by_type = CatalogFilter {
            pickup_type: Some(PickupType::Relic),
            ..CatalogFilter::default()
        };
        assert!(!by_type.matches(&pickup("Flame", PickupType::Perk, None)));
    }

    #[test]
    fn empty_filter_keeps_order() {
        let abilities = vec![ability("Z", "", false), ability("A", "", false)];
        let filter = CatalogFilter::default();
        assert!(filter.is_empty());
        assert_eq!(matching_names(&abilities, &filter), vec!["Z", "A"]);
    }
}
