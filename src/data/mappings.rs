//! Static ID mapping tables: stable site identifier <-> raw game identifier.
//! Weapons and abilities must appear here to be normalized; pickups derive
//! their identifier from the game ID instead.

use std::collections::BTreeMap;
use std::sync::LazyLock;

const WEAPON_IDS: &[(&str, &str)] = &[
    ("ArcaneWand", "DA_Weapon_ArcaneWand"),
    ("AutoRifle", "DA_Weapon_AutoRifle"),
    ("AutoShotgun", "DA_Weapon_AutoShotgun"),
    ("BladeLauncher", "DA_Weapon_BladeLauncher"),
    ("BurstPistol", "DA_Weapon_BurstPistol"),
    ("BurstRifle", "DA_Weapon_BurstRifle"),
    ("ClusterLauncher", "DA_Weapon_ClusterLauncher"),
    ("Crossbow", "DA_Weapon_Crossbow"),
    ("DualPistols", "DA_Weapon_DualPistols"),
    ("DualShotguns", "DA_Weapon_DualShotguns"),
    ("Flamethrower", "DA_Weapon_Flamethrower"),
    ("IceStaff", "DA_Weapon_IceStaff"),
    ("LaserCannons", "DA_Weapon_LaserCannons"),
    ("LightningScepter", "DA_Weapon_LightningScepter"),
    ("LMG", "DA_Weapon_LMG"),
    ("MarksmanRifle", "DA_Weapon_MarksmanRifle"),
    ("Minigun", "DA_Weapon_Minigun"),
    ("OrbLauncher", "DA_Weapon_OrbLauncher"),
    ("PoisonCannon", "DA_Weapon_PoisonCannon"),
    ("ProcGenerator", "DA_Weapon_ProcGenerator"),
    ("RocketLauncher", "DA_Weapon_RocketLauncher"),
    ("Seagle", "DA_Weapon_Seagle"),
    ("SMG", "DA_Weapon_SMG"),
    ("Sniper", "DA_Weapon_Sniper"),
];

const ABILITY_IDS: &[(&str, &str)] = &[
    ("AirStrike", "DA_Ability_AirStrike"),
    ("BlackHole", "DA_Ability_BlackHole"),
    ("ElectroGlobe", "DA_Ability_ElectroGlobe"),
    ("GrapplingHook", "DA_Ability_GrapplingHook"),
    ("Grenade", "DA_Ability_Grenade"),
    ("IceBlast", "DA_Ability_IceBlast"),
    ("LaserBeam", "DA_Ability_LaserBeam"),
];

static WEAPONS: LazyLock<IdMappingTable> =
    LazyLock::new(|| IdMappingTable::from_pairs(WEAPON_IDS.iter().copied()));
static ABILITIES: LazyLock<IdMappingTable> =
    LazyLock::new(|| IdMappingTable::from_pairs(ABILITY_IDS.iter().copied()));

pub fn weapon_mappings() -> &'static IdMappingTable {
    &WEAPONS
}

pub fn ability_mappings() -> &'static IdMappingTable {
    &ABILITIES
}

/// Immutable two-way lookup built once.
#[derive(Debug, Clone, Default)]
pub struct IdMappingTable {
    by_game_id: BTreeMap<String, String>,
    by_custom_id: BTreeMap<String, String>,
}

impl IdMappingTable {
    /// Builds a table from `(custom_id, game_id)` pairs.
    pub fn from_pairs<C, G>(pairs: impl IntoIterator<Item = (C, G)>) -> Self
    where
        C: Into<String>,
        G: Into<String>,
    {
        let mut table = IdMappingTable::default();
        for (custom_id, game_id) in pairs {
            let (custom_id, game_id) = (custom_id.into(), game_id.into());
            table.by_game_id.insert(game_id.clone(), custom_id.clone());
            table.by_custom_id.insert(custom_id, game_id);
        }
        table
    }

    pub fn custom_id_for(&self, game_id: &str) -> Option<&str> {
        self.by_game_id.get(game_id).map(String::as_str)
    }

    pub fn game_id_for(&self, custom_id: &str) -> Option<&str> {
        self.by_custom_id.get(custom_id).map(String::as_str)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = &str> {
        self.by_game_id.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_custom_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_custom_id.is_empty()
    }
}
