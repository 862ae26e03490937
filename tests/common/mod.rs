#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use crabtools::config::Config;
use crabtools::data::EntityKind;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary project root with the default layout.
pub struct Project {
    pub dir: TempDir,
    pub config: Config,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::with_root(dir.path());
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_dir(&self, kind: EntityKind) -> PathBuf {
        self.config.layout(kind).source
    }

    pub fn write_source(&self, kind: EntityKind, relative: &str, record: &Value) -> PathBuf {
        let path = self.source_dir(kind).join(relative);
        write_json(&path, &json!([record]));
        path
    }

    pub fn write_raw_source(&self, kind: EntityKind, relative: &str, contents: &str) -> PathBuf {
        let path = self.source_dir(kind).join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, contents).expect("write");
        path
    }

    pub fn write_icon(&self, subdir: &str, asset: &str) -> PathBuf {
        let path = self.config.icon_source_dir().join(subdir).join(format!("{asset}.png"));
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, format!("png:{asset}")).expect("write icon");
        path
    }

    pub fn write_override(&self, kind: EntityKind, id: &str, value: &Value) {
        let path = self.config.layout(kind).overrides.join(format!("{id}.json"));
        write_json(&path, value);
    }

    pub fn generated(&self, kind: EntityKind, id: &str) -> PathBuf {
        self.config.layout(kind).generated.join(format!("{id}.json"))
    }

    pub fn read_generated(&self, kind: EntityKind, id: &str) -> Value {
        let raw = fs::read_to_string(self.generated(kind, id)).expect("generated record");
        serde_json::from_str(&raw).expect("generated json")
    }
}

pub fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, serde_json::to_string_pretty(value).expect("json")).expect("write");
}

fn icon(asset: &str) -> Value {
    json!({
        "ObjectName": format!("Texture2D'{asset}'"),
        "ObjectPath": format!("/Game/UI/Icon/{asset}.{asset}")
    })
}

pub fn weapon(game_id: &str, name: &str, rarity: &str, clip_size: u32, reload: f64) -> Value {
    json!({
        "Type": "CrabWeaponDA",
        "Name": game_id,
        "Properties": {
            "Name": name,
            "Description": format!("{name} description"),
            "Icon": icon(&format!("T_{}", game_id.trim_start_matches("DA_"))),
            "Rarity": format!("ECrabRarity::{rarity}"),
            "BaseClipSize": clip_size,
            "ReloadDuration": reload,
            "FireMode": "ECrabFireMode::FullAuto"
        }
    })
}

pub fn ability(game_id: &str, name: &str, rarity: &str, cooldown: f64) -> Value {
    json!({
        "Type": "CrabAbilityDA",
        "Name": game_id,
        "Properties": {
            "Name": name,
            "Description": format!("{name} description"),
            "Icon": icon(&format!("T_{}", game_id.trim_start_matches("DA_"))),
            "Rarity": format!("ECrabRarity::{rarity}"),
            "Cooldown": cooldown
        }
    })
}

pub fn pickup(type_tag: &str, game_id: &str, name: &str, rarity: &str) -> Value {
    json!({
        "Type": type_tag,
        "Name": game_id,
        "Properties": {
            "Name": name,
            "Description": format!("{name} description"),
            "Icon": icon(&format!("T_{}", game_id.trim_start_matches("DA_"))),
            "Rarity": format!("ECrabRarity::{rarity}"),
            "LootPool": "ECrabLootPool::Elemental",
            "PickupTag": "ECrabPickupTag::Fire"
        }
    })
}
