//! Project layout and runtime settings.
//!
//! Loaded from an optional `crabtools.yaml` in the project root. Every field has a
//! default, so a missing file yields the standard layout:
//!
//! ```text
//! game-assets/Content/Blueprint/{Weapon,Ability,Pickup}   raw exports
//! game-assets/Content/UI/Icon/<subdir>/<asset>.png        icon sources
//! data/<kind>/generated/<id>.json                         pipeline output
//! data/<kind>/overrides/<id>.json                         hand-authored patches
//! data/<kind>/images/<id>.png                             copied icons
//! public/<kind>/<id>.png                                  copied icons (served)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::loader::KindDirs;
use crate::data::pickup::PickupType;
use crate::data::EntityKind;

pub const CONFIG_FILE_NAME: &str = "crabtools.yaml";
pub const ROOT_ENV: &str = "CRABTOOLS_ROOT";
pub const BIND_ENV: &str = "CRABTOOLS_BIND";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory every relative path resolves against. Never read from YAML.
    #[serde(skip)]
    pub root: PathBuf,
    pub sources: SourceConfig,
    pub output: OutputConfig,
    pub icons: IconConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Holds one subdirectory per kind (`Weapon`, `Ability`, `Pickup`).
    pub blueprint_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
}

/// Icon subdirectories are tried in order; the first existing file wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub source_dir: PathBuf,
    pub extension: String,
    pub weapon: Vec<String>,
    pub ability: Vec<String>,
    /// Keyed by pickup type name (`Perk`, `MeleeMod`, ...).
    pub pickup: BTreeMap<String, Vec<String>>,
    /// Tried after the type-specific list for every pickup.
    pub pickup_fallbacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

/// Every directory the pipeline and loader touch for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindLayout {
    pub source: PathBuf,
    pub generated: PathBuf,
    pub overrides: PathBuf,
    pub images: PathBuf,
    pub public: PathBuf,
}

impl KindLayout {
    pub fn kind_dirs(&self) -> KindDirs {
        KindDirs {
            generated: self.generated.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            sources: SourceConfig::default(),
            output: OutputConfig::default(),
            icons: IconConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            blueprint_dir: PathBuf::from("game-assets/Content/Blueprint"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        let pickup = PickupType::ALL
            .iter()
            .map(|t| {
                let subdir = match t {
                    PickupType::MeleeMod => "Melee",
                    other => other.as_str(),
                };
                (t.as_str().to_string(), vec![subdir.to_string()])
            })
            .collect();
        Self {
            source_dir: PathBuf::from("game-assets/Content/UI/Icon"),
            extension: "png".to_string(),
            weapon: vec!["Weapon".to_string()],
            ability: vec!["Ability".to_string()],
            pickup,
            pickup_fallbacks: vec!["GrenadeMod".to_string(), "Enhancement".to_string()],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// `--root`, then `CRABTOOLS_ROOT`, then the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    match std::env::var_os(ROOT_ENV) {
        Some(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from("."),
    }
}

impl Config {
    /// Reads `explicit` if given (it must exist), otherwise `<root>/crabtools.yaml`
    /// when present, otherwise defaults. `CRABTOOLS_BIND` overrides the bind address.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(root.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.root = root.to_path_buf();

        if let Ok(bind) = std::env::var(BIND_ENV) {
            if !bind.trim().is_empty() {
                config.server.bind = bind.trim().to_string();
            }
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Config {
        Config {
            root: root.into(),
            ..Config::default()
        }
    }

    /// Joins relative paths onto the project root; absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn layout(&self, kind: EntityKind) -> KindLayout {
        let data = self.resolve(&self.output.data_dir).join(kind.dir_name());
        KindLayout {
            source: self
                .resolve(&self.sources.blueprint_dir)
                .join(kind.blueprint_dir()),
            generated: data.join("generated"),
            overrides: data.join("overrides"),
            images: data.join("images"),
            public: self.resolve(&self.output.public_dir).join(kind.dir_name()),
        }
    }

    pub fn icon_source_dir(&self) -> PathBuf {
        self.resolve(&self.icons.source_dir)
    }

    /// Ordered icon subdirectories for one entity.
    pub fn icon_candidates(&self, kind: EntityKind, pickup_type: Option<PickupType>) -> Vec<String> {
        self.icons.candidates(kind, pickup_type)
    }
}

impl IconConfig {
    pub fn candidates(&self, kind: EntityKind, pickup_type: Option<PickupType>) -> Vec<String> {
        match kind {
            EntityKind::Weapon => self.weapon.clone(),
            EntityKind::Ability => self.ability.clone(),
            EntityKind::Pickup => {
                let mut dirs = pickup_type
                    .and_then(|t| self.pickup.get(t.as_str()))
                    .cloned()
                    .unwrap_or_default();
                for fallback in &self.pickup_fallbacks {
                    if !dirs.contains(fallback) {
                        dirs.push(fallback.clone());
                    }
                }
                dirs
            }
        }
    }
}
