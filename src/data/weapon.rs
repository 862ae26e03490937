//! Normalized weapon record and its normalizer.

use serde::{Deserialize, Serialize};

use crate::data::entity::{Entity, EntityKind};
use crate::data::mappings::IdMappingTable;
use crate::data::rarity::Rarity;
use crate::data::raw::{RawRecord, RawWeaponProperties};
use crate::data::validate::{
    asset_name, decode_optional, hex_to_rgb, reference_id, require_core_fields, require_game_id,
    require_safe_id, NormalizeError,
};

string_enum! {
    pub enum CrosshairType {
        Dot,
        Cross,
        Circle,
    }
}

string_enum! {
    pub enum FormationType {
        Single,
        SmallArc,
        LargeArc,
        Line,
        Spread,
    }
}

string_enum! {
    pub enum FireMode {
        SemiAuto,
        FullAuto,
        Burst,
        Charge,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_rate: Option<f64>,
    #[serde(default)]
    pub clip_size: u32,
    #[serde(default)]
    pub reload_duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread_recovery: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aiming_spread_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_recoil: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_recoil: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoil_interp_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    #[serde(default)]
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub stats: WeaponStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosshair_type: Option<CrosshairType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_type: Option<FormationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_expansion_dampening: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_mode: Option<FireMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_weapon_mod: Option<String>,
    #[serde(default)]
    pub dual_wield: bool,
    #[serde(default)]
    pub requires_unlock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint_color: Option<String>,
}

impl Entity for Weapon {
    const KIND: EntityKind = EntityKind::Weapon;

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

pub fn normalize_weapon(
    raw: &RawRecord<RawWeaponProperties>,
    file: &str,
    mappings: &IdMappingTable,
) -> Result<Weapon, NormalizeError> {
    let props = &raw.properties;
    let core = require_core_fields(props, file)?;

    let game_id = require_game_id(&raw.name, file)?.to_string();
    let id = mappings
        .custom_id_for(&game_id)
        .ok_or_else(|| NormalizeError::NoMapping {
            game_id: game_id.clone(),
        })?
        .to_string();
    let id = require_safe_id(id, file)?;

    let stats = WeaponStats {
        fire_rate: props.base_fire_rate,
        clip_size: props.base_clip_size.unwrap_or(0),
        reload_duration: props.reload_duration.unwrap_or(0.0),
        base_spread: props.base_spread,
        max_spread: props.max_spread,
        spread_recovery: props.spread_recovery,
        aiming_spread_multiplier: props.aiming_spread_multiplier,
        vertical_recoil: props.vertical_recoil,
        horizontal_recoil: props.horizontal_recoil,
        recoil_interp_speed: props.recoil_interp_speed,
    };

    Ok(Weapon {
        id,
        game_id,
        name: core.name,
        description: core.description,
        rarity: core.rarity,
        stats,
        crosshair_type: decode_optional(props.crosshair_type.as_deref()),
        formation_type: decode_optional(props.formation_type.as_deref()),
        formation_spacing: props.formation_spacing,
        formation_expansion_dampening: props.formation_expansion_dampening,
        fire_mode: decode_optional(props.fire_mode.as_deref()),
        projectile_id: reference_id(props.projectile.as_ref()),
        starting_weapon_mod: reference_id(props.starting_weapon_mod.as_ref()),
        dual_wield: props.dual_wield.unwrap_or(false),
        requires_unlock: props.core.requires_unlock.unwrap_or(false),
        icon_path: asset_name(
            props
                .core
                .icon
                .as_ref()
                .and_then(|icon| icon.object_path.as_deref()),
        ),
        tint_color: hex_to_rgb(props.tint.as_ref().and_then(|tint| tint.hex.as_deref())),
    })
}
