//! Normalized ability record and its normalizer.

use serde::{Deserialize, Serialize};

use crate::data::entity::{Entity, EntityKind};
use crate::data::mappings::IdMappingTable;
use crate::data::rarity::Rarity;
use crate::data::raw::{RawAbilityProperties, RawRecord};
use crate::data::validate::{
    asset_name, decode_optional, reference_id, require_core_fields, require_game_id, require_safe_id,
    NormalizeError,
};

string_enum! {
    pub enum HitmarkerType {
        Quiet,
        Loud,
    }
}

string_enum! {
    pub enum SpawnType {
        AboveCrosshair,
        AtCrosshair,
        AtFeet,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: String,
    #[serde(default)]
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub cooldown: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_type: Option<SpawnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitmarker_type: Option<HitmarkerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectile_id: Option<String>,
    #[serde(default)]
    pub requires_unlock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl Entity for Ability {
    const KIND: EntityKind = EntityKind::Ability;

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
}

pub fn normalize_ability(
    raw: &RawRecord<RawAbilityProperties>,
    file: &str,
    mappings: &IdMappingTable,
) -> Result<Ability, NormalizeError> {
    let props = &raw.properties;
    let core = require_core_fields(props, file)?;

    let game_id = require_game_id(&raw.name, file)?.to_string();
    let Some(id) = mappings.custom_id_for(&game_id) else {
        return Err(NormalizeError::NoMapping { game_id });
    };
    let id = require_safe_id(id.to_string(), file)?;

    Ok(Ability {
        id,
        game_id,
        name: core.name,
        description: core.description,
        rarity: core.rarity,
        cooldown: props.cooldown.unwrap_or(0.0),
        spawn_type: decode_optional(props.spawn_type.as_deref()),
        spawn_delay: props.spawn_delay,
        hitmarker_type: decode_optional(props.hitmarker_type.as_deref()),
        projectile_id: reference_id(props.projectile.as_ref()),
        requires_unlock: props.core.requires_unlock.unwrap_or(false),
        icon_path: asset_name(
            props
                .core
                .icon
                .as_ref()
                .and_then(|icon| icon.object_path.as_deref()),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mappings::ability_mappings;
    use serde_json::json;

    fn record(name: &str, properties: serde_json::Value) -> RawRecord<RawAbilityProperties> {
        RawRecord::from_value(json!({
            "Type": "CrabAbilityDA",
            "Name": name,
            "Properties": properties,
        }))
        .unwrap()
    }

    #[test]
    fn normalizes_air_strike() {
        let raw = record(
            "DA_Ability_AirStrike",
            json!({
                "Name": "Air Strike",
                "Description": "Rockets from above",
                "Icon": { "ObjectPath": "/Game/UI/Icon/Ability/T_Icon_AirStrike.T_Icon_AirStrike" },
                "Rarity": "ECrabRarity::Legendary",
                "Cooldown": 12.0,
                "AbilitySpawnType": "ECrabAbilitySpawnType::AboveCrosshair",
                "AbilitySpawnDelay": 0.25,
                "HitmarkerType": "ECrabHitmarkerType::Loud",
                "ProjectileDA": { "ObjectName": "CrabProjectileDA'DA_Projectile_AirStrike'" },
                "bRequiresUnlock": true
            }),
        );

        let ability = normalize_ability(&raw, "DA_Ability_AirStrike.json", ability_mappings()).unwrap();
        assert_eq!(ability.id, "AirStrike");
        assert_eq!(ability.rarity, Rarity::Legendary);
        assert_eq!(ability.cooldown, 12.0);
        assert_eq!(ability.spawn_type, Some(SpawnType::AboveCrosshair));
        assert_eq!(ability.spawn_delay, Some(0.25));
        assert_eq!(ability.hitmarker_type, Some(HitmarkerType::Loud));
        assert_eq!(ability.projectile_id.as_deref(), Some("DA_Projectile_AirStrike"));
        assert_eq!(ability.icon_path.as_deref(), Some("T_Icon_AirStrike"));
        assert!(ability.requires_unlock);
    }

    #[test]
    fn cooldown_and_unlock_default_when_absent() {
        let raw = record(
            "DA_Ability_Grenade",
            json!({
                "Name": "Grenade",
                "Description": "Boom",
                "Icon": { "ObjectPath": "/Game/T_Icon_Grenade.T_Icon_Grenade" },
                "Rarity": "ECrabRarity::Common",
                "AbilitySpawnType": "ECrabAbilitySpawnType::Sideways"
            }),
        );
        let ability = normalize_ability(&raw, "g.json", ability_mappings()).unwrap();
        assert_eq!(ability.cooldown, 0.0);
        assert!(!ability.requires_unlock);
        assert_eq!(ability.spawn_type, None);
    }

    #[test]
    fn unmapped_ability_is_rejected() {
        let raw = record(
            "DA_Ability_Teleport",
            json!({
                "Name": "Teleport",
                "Description": "Blink",
                "Icon": { "ObjectPath": "/Game/T.T" },
                "Rarity": "ECrabRarity::Epic"
            }),
        );
        let err = normalize_ability(&raw, "t.json", ability_mappings()).unwrap_err();
        assert_eq!(err.to_string(), "No mapping found for game ID: DA_Ability_Teleport");
    }

    #[test]
    fn unknown_rarity_is_fatal_for_the_record() {
        let raw = record(
            "DA_Ability_Grenade",
            json!({
                "Name": "Grenade",
                "Description": "Boom",
                "Icon": { "ObjectPath": "/Game/T.T" },
                "Rarity": "ECrabRarity::Mythic"
            }),
        );
        assert!(matches!(
            normalize_ability(&raw, "g.json", ability_mappings()),
            Err(NormalizeError::Validation(_))
        ));
    }
}
