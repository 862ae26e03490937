//! Merge-on-load: generated records overlaid with optional hand-authored overrides.
//! Overrides are only ever read. Any problem with an override is logged and the
//! generated record is used unchanged.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::data::entity::Entity;
use crate::data::validate::is_safe_id;

/// Where one kind's generated records and overrides live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDirs {
    pub generated: PathBuf,
    pub overrides: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("generated directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Field-by-field overlay: keys in `overlay` replace keys in `base`. Non-object
/// inputs leave `base` untouched.
pub fn shallow_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (base, _) => base,
    }
}

fn read_json(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_override(path: &Path) -> Option<Value> {
    if !path.is_file() {
        return None;
    }
    match read_json(path) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            warn!(path = %path.display(), "override is not a JSON object; ignoring");
            None
        }
        Err(err) => {
            warn!("failed to load override data: {err}");
            None
        }
    }
}

/// A merged record: the typed view used for sorting and filtering, and the
/// merged JSON object itself, which keeps every override and generated key.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<E> {
    pub entity: E,
    pub value: Value,
}

/// Reads one generated record and applies its override, if any.
pub fn load_merged<E: Entity>(generated_path: &Path, override_path: &Path) -> Result<Loaded<E>, LoadError> {
    let generated = read_json(generated_path)?;

    if let Some(overlay) = read_override(override_path) {
        let merged = shallow_merge(generated.clone(), overlay);
        match serde_json::from_value::<E>(merged.clone()) {
            Ok(entity) => {
                debug!(path = %override_path.display(), "applied override");
                return Ok(Loaded { entity, value: merged });
            }
            Err(err) => warn!(
                path = %override_path.display(),
                "override produces an invalid {} record, using generated data: {err}",
                E::KIND.label()
            ),
        }
    }

    let entity = serde_json::from_value(generated.clone()).map_err(|source| LoadError::Parse {
        path: generated_path.to_path_buf(),
        source,
    })?;
    Ok(Loaded {
        entity,
        value: generated,
    })
}

/// Rarity rank first, then display name (case-insensitive, then exact).
pub fn compare_entities<E: Entity>(a: &E, b: &E) -> Ordering {
    a.rarity()
        .cmp(&b.rarity())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Stable sort by [`compare_entities`].
pub fn sort_entities<E: Entity>(entities: &mut [E]) {
    entities.sort_by(compare_entities);
}

/// Every generated record of one kind, merged and sorted.
pub fn load_records<E: Entity>(dirs: &KindDirs) -> Result<Vec<Loaded<E>>, LoadError> {
    if !dirs.generated.is_dir() {
        return Err(LoadError::MissingDirectory(dirs.generated.clone()));
    }

    let read_err = |source| LoadError::Read {
        path: dirs.generated.clone(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(&dirs.generated).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let override_path = dirs.overrides.join(file_name);
        records.push(load_merged::<E>(&path, &override_path)?);
    }

    records.sort_by(|a, b| compare_entities(&a.entity, &b.entity));
    Ok(records)
}

/// One merged record by id, or `None` when it does not exist or cannot be read.
pub fn load_record<E: Entity>(dirs: &KindDirs, id: &str) -> Option<Loaded<E>> {
    if !is_safe_id(id) {
        return None;
    }
    let file_name = format!("{id}.json");
    let generated_path = dirs.generated.join(&file_name);
    if !generated_path.is_file() {
        return None;
    }
    match load_merged(&generated_path, &dirs.overrides.join(&file_name)) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::error!("failed to load {} {id}: {err}", E::KIND.label());
            None
        }
    }
}

pub fn load_entities<E: Entity>(dirs: &KindDirs) -> Result<Vec<E>, LoadError> {
    Ok(load_records(dirs)?.into_iter().map(|r| r.entity).collect())
}

pub fn load_entity<E: Entity>(dirs: &KindDirs, id: &str) -> Option<E> {
    load_record(dirs, id).map(|r| r.entity)
}
