//! Validators and decoders for raw export fields.
//!
//! Required checks return `Result` with an error naming the source file.
//! Optional decoders return `Option`: an absent or unrecognized value is not fatal.

use crate::data::rarity::Rarity;
use crate::data::raw::{ObjectReference, RawProperties};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {field} in {file}")]
    MissingField { field: &'static str, file: String },
    #[error("Missing rarity in {file}")]
    MissingRarity { file: String },
    #[error("Invalid rarity format: {value} in {file}")]
    InvalidRarityFormat { value: String, file: String },
    #[error("Unknown rarity: {value} in {file}")]
    UnknownRarity { value: String, file: String },
    #[error("Missing record Name in {file}")]
    MissingGameId { file: String },
    #[error("Invalid ID {id:?} in {file}")]
    InvalidId { id: String, file: String },
}

/// Failure to turn one raw record into a normalized entity.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No mapping found for game ID: {game_id}")]
    NoMapping { game_id: String },
    #[error("Invalid record shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Closed enumerations that can be decoded from an export token's value.
pub trait EnumToken: Sized + Copy {
    fn from_token(value: &str) -> Option<Self>;
}

/// `"ECrabRarity::Greed"` -> `Some("Greed")`; `None` when there is no `::`.
pub fn decode_enum_token(token: &str) -> Option<&str> {
    token.rsplit_once("::").map(|(_, value)| value)
}

/// Decodes an optional enum-typed field. Absent, malformed or unknown values yield `None`.
pub fn decode_optional<T: EnumToken>(raw: Option<&str>) -> Option<T> {
    let value = decode_enum_token(raw?)?;
    T::from_token(value)
}

pub fn require_rarity(raw: Option<&str>, file: &str) -> Result<Rarity, ValidationError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(ValidationError::MissingRarity {
                file: file.to_string(),
            })
        }
    };

    let value = match decode_enum_token(raw) {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(ValidationError::InvalidRarityFormat {
                value: raw.to_string(),
                file: file.to_string(),
            })
        }
    };

    Rarity::from_token(value).ok_or_else(|| ValidationError::UnknownRarity {
        value: value.to_string(),
        file: file.to_string(),
    })
}

/// Display name, description and rarity of a record that passed the required checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreFields {
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
}

/// Name, Description and Icon must be present (plus any kind-specific required
/// field), then the rarity must decode.
pub fn require_core_fields<P: RawProperties>(
    properties: &P,
    file: &str,
) -> Result<CoreFields, ValidationError> {
    let core = properties.core();
    let missing = |field: &'static str| ValidationError::MissingField {
        field,
        file: file.to_string(),
    };

    let name = non_empty(core.name.as_deref()).ok_or_else(|| missing("Name"))?;
    let description = non_empty(core.description.as_deref()).ok_or_else(|| missing("Description"))?;
    if core.icon.is_none() {
        return Err(missing("Icon"));
    }
    if let Some(field) = properties.missing_required() {
        return Err(missing(field));
    }
    let rarity = require_rarity(core.rarity.as_deref(), file)?;

    Ok(CoreFields {
        name: name.to_string(),
        description: description.to_string(),
        rarity,
    })
}

/// The record's top-level game id, which must be present.
pub fn require_game_id<'a>(name: &'a str, file: &str) -> Result<&'a str, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingGameId {
            file: file.to_string(),
        });
    }
    Ok(name)
}

/// Ids name output files, so only `[A-Za-z0-9_-]` is allowed.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub fn require_safe_id(id: String, file: &str) -> Result<String, ValidationError> {
    if !is_safe_id(&id) {
        return Err(ValidationError::InvalidId {
            id,
            file: file.to_string(),
        });
    }
    Ok(id)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Final path segment without its extension:
/// `/Game/UI/Icon/T_Icon_AirStrike.T_Icon_AirStrike` -> `T_Icon_AirStrike`.
pub fn asset_name(object_path: Option<&str>) -> Option<String> {
    let object_path = non_empty(object_path)?;
    let file_name = object_path.rsplit('/').next().unwrap_or(object_path);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    Some(stem.to_string())
}

/// `CrabProjectileDA'DA_Projectile_Rocket'` -> `DA_Projectile_Rocket`.
pub fn reference_id(reference: Option<&ObjectReference>) -> Option<String> {
    let object_name = reference?.object_name.as_deref()?;
    let (_, rest) = object_name.split_once('\'')?;
    let (identifier, _) = rest.split_once('\'')?;
    if identifier.is_empty() {
        return None;
    }
    Some(identifier.to_string())
}

/// `"BC0000"` -> `"rgb(188, 0, 0)"`. A leading `#` is tolerated; anything that is
/// not six hex digits yields `None`.
pub fn hex_to_rgb(hex: Option<&str>) -> Option<String> {
    let hex = hex?.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;
    Some(format!("rgb({r}, {g}, {b})"))
}
