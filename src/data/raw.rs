//! Raw records as exported from the game (one per source file, first array element).
//! Field names follow the export; everything is optional so that missing required
//! fields surface as labeled validation errors instead of serde errors.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::data::validate::NormalizeError;

/// `{ "Type": ..., "Name": ..., "Properties": { ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord<P> {
    #[serde(rename = "Type", default)]
    pub type_tag: String,
    /// Raw game identifier, e.g. `DA_Weapon_Sniper`.
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Class", default)]
    pub class: Option<String>,
    #[serde(rename = "Properties")]
    pub properties: P,
}

impl<P: DeserializeOwned> RawRecord<P> {
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        serde_json::from_value(value).map_err(NormalizeError::Shape)
    }
}

/// Object reference: `ObjectName` is `Class'Identifier'`, `ObjectPath` is a package path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectReference {
    #[serde(rename = "ObjectName", default)]
    pub object_name: Option<String>,
    #[serde(rename = "ObjectPath", default)]
    pub object_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawColor {
    #[serde(rename = "R", default)]
    pub r: f64,
    #[serde(rename = "G", default)]
    pub g: f64,
    #[serde(rename = "B", default)]
    pub b: f64,
    #[serde(rename = "A", default)]
    pub a: f64,
    #[serde(rename = "Hex", default)]
    pub hex: Option<String>,
}

/// Properties every pickup-able data asset carries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreProperties {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Icon", default)]
    pub icon: Option<ObjectReference>,
    #[serde(rename = "Rarity", default)]
    pub rarity: Option<String>,
    #[serde(rename = "bRequiresUnlock", default)]
    pub requires_unlock: Option<bool>,
}

/// Kind-specific property bags expose their shared core and any extra
/// fields that are required for that kind.
pub trait RawProperties {
    fn core(&self) -> &CoreProperties;

    /// Name of the first kind-specific required field that is missing.
    fn missing_required(&self) -> Option<&'static str> {
        None
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeaponProperties {
    #[serde(flatten)]
    pub core: CoreProperties,
    #[serde(rename = "ProjectileDA", default)]
    pub projectile: Option<ObjectReference>,
    #[serde(rename = "CrosshairType", default)]
    pub crosshair_type: Option<String>,
    #[serde(rename = "FormationType", default)]
    pub formation_type: Option<String>,
    #[serde(rename = "FormationSpacing", default)]
    pub formation_spacing: Option<f64>,
    #[serde(rename = "FormationExpansionDampening", default)]
    pub formation_expansion_dampening: Option<f64>,
    #[serde(rename = "FireMode", default)]
    pub fire_mode: Option<String>,
    #[serde(rename = "BaseFireRate", default)]
    pub base_fire_rate: Option<f64>,
    #[serde(rename = "BaseSpread", default)]
    pub base_spread: Option<f64>,
    #[serde(rename = "MaxSpread", default)]
    pub max_spread: Option<f64>,
    #[serde(rename = "SpreadRecovery", default)]
    pub spread_recovery: Option<f64>,
    #[serde(rename = "AimingSpreadMultiplier", default)]
    pub aiming_spread_multiplier: Option<f64>,
    #[serde(rename = "VerticalRecoil", default)]
    pub vertical_recoil: Option<f64>,
    #[serde(rename = "HorizontalRecoil", default)]
    pub horizontal_recoil: Option<f64>,
    #[serde(rename = "RecoilInterpSpeed", default)]
    pub recoil_interp_speed: Option<f64>,
    #[serde(rename = "BaseClipSize", default)]
    pub base_clip_size: Option<u32>,
    #[serde(rename = "ReloadDuration", default)]
    pub reload_duration: Option<f64>,
    #[serde(rename = "Tint", default)]
    pub tint: Option<RawColor>,
    #[serde(rename = "StartingWeaponModDA", default)]
    pub starting_weapon_mod: Option<ObjectReference>,
    #[serde(rename = "bDualWield", default)]
    pub dual_wield: Option<bool>,
}

impl RawProperties for RawWeaponProperties {
    fn core(&self) -> &CoreProperties {
        &self.core
    }

    fn missing_required(&self) -> Option<&'static str> {
        self.base_clip_size.is_none().then_some("BaseClipSize")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAbilityProperties {
    #[serde(flatten)]
    pub core: CoreProperties,
    #[serde(rename = "ProjectileDA", default)]
    pub projectile: Option<ObjectReference>,
    #[serde(rename = "HitmarkerType", default)]
    pub hitmarker_type: Option<String>,
    #[serde(rename = "AbilitySpawnType", default)]
    pub spawn_type: Option<String>,
    #[serde(rename = "AbilitySpawnDelay", default)]
    pub spawn_delay: Option<f64>,
    #[serde(rename = "Cooldown", default)]
    pub cooldown: Option<f64>,
}

impl RawProperties for RawAbilityProperties {
    fn core(&self) -> &CoreProperties {
        &self.core
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPickupProperties {
    #[serde(flatten)]
    pub core: CoreProperties,
    #[serde(rename = "LootPool", default)]
    pub loot_pool: Option<String>,
    #[serde(rename = "PickupTag", default)]
    pub pickup_tag: Option<String>,
    #[serde(rename = "SpawnWeight", default)]
    pub spawn_weight: Option<f64>,
    #[serde(rename = "LevelDescription", default)]
    pub level_description: Option<String>,
    #[serde(rename = "Cooldown", default)]
    pub cooldown: Option<f64>,
    #[serde(rename = "BaseBuff", default)]
    pub base_buff: Option<f64>,
    #[serde(rename = "bGetBuffAsMultiplier", default)]
    pub buff_as_multiplier: Option<bool>,
    #[serde(rename = "bHyperbolicBuff", default)]
    pub hyperbolic_buff: Option<bool>,
    #[serde(rename = "BaseDebuff", default)]
    pub base_debuff: Option<f64>,
    #[serde(rename = "bGetDebuffAsMultiplier", default)]
    pub debuff_as_multiplier: Option<bool>,
}

impl RawProperties for RawPickupProperties {
    fn core(&self) -> &CoreProperties {
        &self.core
    }
}
