//! Offline normalization pipeline: raw game exports to `data/<kind>/generated`.

pub mod batch;
pub mod clean;
pub mod discover;
pub mod icons;

use crate::config::Config;
use crate::data::ability::normalize_ability;
use crate::data::mappings::{ability_mappings, weapon_mappings};
use crate::data::pickup::normalize_pickup;
use crate::data::raw::RawRecord;
use crate::data::weapon::normalize_weapon;
use crate::data::EntityKind;

pub use batch::{run_batch, BatchReport, FileError, FileFailure, PipelineError, SourceFile};
pub use clean::{clean, CleanReport};
pub use icons::{IconCopier, IconOutcome};

pub struct Pipeline<'a> {
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn process(&self, kind: EntityKind) -> Result<BatchReport, PipelineError> {
        let layout = self.config.layout(kind);
        let icons = IconCopier::new(self.config, &layout);

        match kind {
            EntityKind::Weapon => run_batch(kind, &layout, &icons, discover::weapon_sources, |value, source| {
                let raw = RawRecord::from_value(value)?;
                normalize_weapon(&raw, &source.file_label(), weapon_mappings())
            }),
            EntityKind::Ability => run_batch(kind, &layout, &icons, discover::ability_sources, |value, source| {
                let raw = RawRecord::from_value(value)?;
                normalize_ability(&raw, &source.file_label(), ability_mappings())
            }),
            EntityKind::Pickup => run_batch(kind, &layout, &icons, discover::pickup_sources, |value, source| {
                let raw = RawRecord::from_value(value)?;
                normalize_pickup(&raw, &source.file_label(), source.type_hint.as_deref())
            }),
        }
    }

    /// Every kind in order; one kind failing does not stop the others.
    pub fn process_all(&self) -> Vec<(EntityKind, Result<BatchReport, PipelineError>)> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, self.process(kind)))
            .collect()
    }
}
