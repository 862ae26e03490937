//! Entity types, validators, ID mappings and the merge-on-load reader.

/// Declares a closed set of game enum values that serialize as their bare
/// names (`"Epic"`, `"AtFeet"`). `from_token` is the exact-match lookup used
/// on decoded export tokens; `FromStr` is case-insensitive for user input.
macro_rules! string_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl $crate::data::validate::EnumToken for $name {
            fn from_token(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::data::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::data::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub mod ability;
pub mod catalog;
pub mod entity;
pub mod filter;
pub mod loader;
pub mod mappings;
pub mod pickup;
pub mod rarity;
pub mod raw;
pub mod validate;
pub mod weapon;

pub use ability::Ability;
pub use catalog::Catalog;
pub use entity::{Entity, EntityKind};
pub use pickup::Pickup;
pub use rarity::Rarity;
pub use weapon::Weapon;

/// A string did not name any member of a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
