use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::data::filter::{parse_unlock, CatalogFilter};
use crate::data::loader::LoadError;
use crate::data::{Catalog, EntityKind};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown kind '{0}'")]
    UnknownKind(String),
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid query parameter {param}: '{value}'")]
    BadQuery { param: &'static str, value: String },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Query string accepted by `GET /api/{kind}`. Values stay strings here so a bad
/// value becomes a 400 with the parameter name instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub rarity: Option<String>,
    #[serde(rename = "type")]
    pub pickup_type: Option<String>,
    pub loot_pool: Option<String>,
    pub element: Option<String>,
    pub requires_unlock: Option<String>,
}

fn parse_param<T: std::str::FromStr>(
    param: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| ApiError::BadQuery {
            param,
            value: v.to_string(),
        }),
    }
}

impl ListQuery {
    pub fn to_filter(&self) -> Result<CatalogFilter, ApiError> {
        let requires_unlock = match self.requires_unlock.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(parse_unlock(v).ok_or_else(|| ApiError::BadQuery {
                param: "requires_unlock",
                value: v.to_string(),
            })?),
        };
        Ok(CatalogFilter {
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            rarity: parse_param("rarity", self.rarity.as_deref())?,
            pickup_type: parse_param("type", self.pickup_type.as_deref())?,
            loot_pool: parse_param("loot_pool", self.loot_pool.as_deref())?,
            element: parse_param("element", self.element.as_deref())?,
            requires_unlock,
        })
    }
}

pub fn health_payload() -> Value {
    json!({
        "status": "ok",
        "service": "crabtools-api",
        "version": env!("CARGO_PKG_VERSION")
    })
}

pub fn parse_kind(kind: &str) -> Result<EntityKind, ApiError> {
    kind.parse()
        .map_err(|_| ApiError::UnknownKind(kind.to_string()))
}

/// `{ "<kind>": [...] }`, merged, sorted and filtered.
pub fn list_payload(catalog: &Catalog, kind: &str, query: &ListQuery) -> Result<Value, ApiError> {
    let kind = parse_kind(kind)?;
    let filter = query.to_filter()?;
    let items = catalog.list_json(kind, &filter)?;
    let mut payload = Map::new();
    payload.insert(kind.dir_name().to_string(), Value::Array(items));
    Ok(Value::Object(payload))
}

pub fn entity_payload(catalog: &Catalog, kind: &str, id: &str) -> Result<Value, ApiError> {
    let kind = parse_kind(kind)?;
    catalog.get_json(kind, id).ok_or_else(|| ApiError::NotFound {
        kind: kind.label(),
        id: id.to_string(),
    })
}
