//! Normalized pickup record (mods, perks, relics, consumables) and its normalizer.
//! Pickups have no mapping table: the id is the game ID minus its type prefix.

use serde::{Deserialize, Serialize};

use crate::data::entity::{Entity, EntityKind};
use crate::data::rarity::Rarity;
use crate::data::raw::{RawPickupProperties, RawRecord};
use crate::data::validate::{
    asset_name, decode_optional, require_core_fields, require_game_id, require_safe_id, EnumToken,
    NormalizeError,
};

string_enum! {
    pub enum PickupType {
        AbilityMod,
        WeaponMod,
        MeleeMod,
        Perk,
        Relic,
        Consumable,
    }
}

string_enum! {
    pub enum LootPool {
        Damage,
        Critical,
        Elemental,
        Health,
        Regeneration,
        Speed,
        Skill,
        Economy,
        Luck,
    }
}

string_enum! {
    /// Elemental tag carried by a pickup.
    pub enum PickupTag {
        Fire,
        Ice,
        Lightning,
        Poison,
        Critical,
        None,
    }
}

impl PickupType {
    /// Export `Type` tag, e.g. `CrabPerkDA`.
    pub fn type_tag(self) -> String {
        format!("Crab{}DA", self.as_str())
    }

    /// Game ID prefix stripped to form the site id, e.g. `DA_Perk_`.
    pub fn id_prefix(self) -> String {
        format!("DA_{}_", self.as_str())
    }

    pub fn from_type_tag(tag: &str) -> Option<Self> {
        let inner = tag.strip_prefix("Crab")?.strip_suffix("DA")?;
        Self::from_token(inner)
    }

    /// Source directories are named after the type (`Pickup/Perk/...`).
    pub fn from_dir_name(dir: &str) -> Option<Self> {
        Self::from_token(dir)
    }
}

/// The record's own `Type` tag wins over the directory it was found in;
/// with neither recognized the pickup is treated as a perk.
pub fn resolve_pickup_type(type_tag: &str, dir_hint: Option<&str>) -> PickupType {
    PickupType::from_type_tag(type_tag)
        .or_else(|| dir_hint.and_then(PickupType::from_dir_name))
        .unwrap_or(PickupType::Perk)
}

/// `DA_Perk_Banana` + `Perk` -> `Banana`. When the type prefix does not match,
/// strips `DA_` and then one leading all-caps segment (`DA_GM_Foo` -> `Foo`).
pub fn pickup_id(game_id: &str, pickup_type: PickupType) -> String {
    if let Some(id) = game_id.strip_prefix(&pickup_type.id_prefix()) {
        return id.to_string();
    }
    let rest = game_id.strip_prefix("DA_").unwrap_or(game_id);
    let caps = rest.bytes().take_while(u8::is_ascii_uppercase).count();
    if caps > 0 && rest.as_bytes().get(caps) == Some(&b'_') {
        return rest[caps + 1..].to_string();
    }
    rest.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(rename = "type")]
    pub pickup_type: PickupType,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot_pool: Option<LootPool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_tag: Option<PickupTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub requires_unlock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_buff: Option<f64>,
    #[serde(default)]
    pub get_buff_as_multiplier: bool,
    #[serde(default)]
    pub hyperbolic_buff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_debuff: Option<f64>,
    #[serde(default)]
    pub get_debuff_as_multiplier: bool,
}

impl Entity for Pickup {
    const KIND: EntityKind = EntityKind::Pickup;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn requires_unlock(&self) -> bool {
        self.requires_unlock
    }

    fn icon_asset(&self) -> Option<&str> {
        self.icon_path.as_deref()
    }

    fn pickup_type(&self) -> Option<PickupType> {
        Some(self.pickup_type)
    }

    fn loot_pool(&self) -> Option<LootPool> {
        self.loot_pool
    }

    fn pickup_tag(&self) -> Option<PickupTag> {
        self.pickup_tag
    }
}

pub fn normalize_pickup(
    raw: &RawRecord<RawPickupProperties>,
    file: &str,
    dir_hint: Option<&str>,
) -> Result<Pickup, NormalizeError> {
    let props = &raw.properties;
    let core = require_core_fields(props, file)?;

    let pickup_type = resolve_pickup_type(&raw.type_tag, dir_hint);
    let game_id = require_game_id(&raw.name, file)?.to_string();
    let id = require_safe_id(pickup_id(&game_id, pickup_type), file)?;

    Ok(Pickup {
        id,
        game_id,
        pickup_type,
        name: core.name,
        description: core.description,
        rarity: core.rarity,
        loot_pool: decode_optional(props.loot_pool.as_deref()),
        pickup_tag: decode_optional(props.pickup_tag.as_deref()),
        spawn_weight: props.spawn_weight,
        level_description: props.level_description.clone(),
        icon_path: asset_name(
            props
                .core
                .icon
                .as_ref()
                .and_then(|icon| icon.object_path.as_deref()),
        ),
        requires_unlock: props.core.requires_unlock.unwrap_or(false),
        cooldown: props.cooldown,
        base_buff: props.base_buff,
        get_buff_as_multiplier: props.buff_as_multiplier.unwrap_or(false),
        hyperbolic_buff: props.hyperbolic_buff.unwrap_or(false),
        base_debuff: props.base_debuff,
        get_debuff_as_multiplier: props.debuff_as_multiplier.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::validate::ValidationError;
    use serde_json::json;

    #[test]
    fn id_strips_type_prefix() {
        assert_eq!(pickup_id("DA_Perk_Banana", PickupType::Perk), "Banana");
        assert_eq!(pickup_id("DA_Relic_StarFragment", PickupType::Relic), "StarFragment");
        assert_eq!(pickup_id("DA_MeleeMod_Spiky", PickupType::MeleeMod), "Spiky");
    }

    #[test]
    fn id_falls_back_to_generic_prefix() {
        assert_eq!(pickup_id("DA_GM_Sticky", PickupType::AbilityMod), "Sticky");
        assert_eq!(pickup_id("DA_Perk_Banana", PickupType::Relic), "Perk_Banana");
        assert_eq!(pickup_id("Loose", PickupType::Perk), "Loose");
    }

    #[test]
    fn type_tag_wins_over_directory() {
        assert_eq!(resolve_pickup_type("CrabRelicDA", Some("Perk")), PickupType::Relic);
        assert_eq!(resolve_pickup_type("", Some("WeaponMod")), PickupType::WeaponMod);
        assert_eq!(resolve_pickup_type("Unknown", Some("Misc")), PickupType::Perk);
        assert_eq!(PickupType::MeleeMod.type_tag(), "CrabMeleeModDA");
    }

    #[test]
    fn normalizes_pickup_with_flags() {
        let raw: RawRecord<RawPickupProperties> = RawRecord::from_value(json!({
            "Type": "CrabPerkDA",
            "Name": "DA_Perk_Banana",
            "Properties": {
                "Name": "Banana",
                "Description": "Slippery",
                "Icon": { "ObjectPath": "/Game/UI/Icon/Perk/T_Perk_Banana.T_Perk_Banana" },
                "Rarity": "ECrabRarity::Greed",
                "LootPool": "ECrabLootPool::Luck",
                "PickupTag": "ECrabPickupTag::None",
                "SpawnWeight": 2.0,
                "BaseBuff": 10.0,
                "bGetBuffAsMultiplier": true
            }
        }))
        .unwrap();

        let pickup = normalize_pickup(&raw, "DA_Perk_Banana.json", Some("Relic")).unwrap();
        assert_eq!(pickup.id, "Banana");
        assert_eq!(pickup.pickup_type, PickupType::Perk);
        assert_eq!(pickup.rarity, Rarity::Greed);
        assert_eq!(pickup.loot_pool, Some(LootPool::Luck));
        assert_eq!(pickup.pickup_tag, Some(PickupTag::None));
        assert_eq!(pickup.base_buff, Some(10.0));
        assert!(pickup.get_buff_as_multiplier);
        assert!(!pickup.hyperbolic_buff);
        assert!(!pickup.get_debuff_as_multiplier);
        assert_eq!(pickup.icon_path.as_deref(), Some("T_Perk_Banana"));

        let json = serde_json::to_value(&pickup).unwrap();
        assert_eq!(json["type"], "Perk");
        assert_eq!(json["pickupTag"], "None");
        assert!(json.get("cooldown").is_none());
    }

    fn banana_named(name: Option<&str>) -> RawRecord<RawPickupProperties> {
        let mut record = json!({
            "Type": "CrabPerkDA",
            "Properties": {
                "Name": "Banana",
                "Description": "Slippery",
                "Icon": { "ObjectPath": "/Game/UI/Icon/Perk/T_Perk_Banana.T_Perk_Banana" },
                "Rarity": "ECrabRarity::Common"
            }
        });
        if let Some(name) = name {
            record["Name"] = json!(name);
        }
        RawRecord::from_value(record).unwrap()
    }

    #[test]
    fn missing_or_unusable_ids_are_rejected() {
        let err = normalize_pickup(&banana_named(None), "Banana.json", Some("Perk")).unwrap_err();
        assert_eq!(err.to_string(), "Missing record Name in Banana.json");

        for name in ["DA_Perk_../../../escaped", "DA_Perk_", "DA_Perk_Ba nana"] {
            let err = normalize_pickup(&banana_named(Some(name)), "Banana.json", Some("Perk")).unwrap_err();
            assert!(
                matches!(err, NormalizeError::Validation(ValidationError::InvalidId { .. })),
                "{name}: {err}"
            );
        }
    }
}
