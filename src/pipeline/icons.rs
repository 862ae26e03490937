//! Copies an entity's icon from the export tree into the pipeline images
//! directory and the public assets directory, both named `<id>.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{Config, IconConfig, KindLayout};
use crate::data::pickup::PickupType;
use crate::data::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    Copied { source: PathBuf },
    Missing,
}

#[derive(Debug, Clone)]
pub struct IconCopier {
    source_dir: PathBuf,
    icons: IconConfig,
    images_dir: PathBuf,
    public_dir: PathBuf,
}

impl IconCopier {
    pub fn new(config: &Config, layout: &KindLayout) -> Self {
        Self {
            source_dir: config.icon_source_dir(),
            icons: config.icons.clone(),
            images_dir: layout.images.clone(),
            public_dir: layout.public.clone(),
        }
    }

    /// First candidate `<source_dir>/<subdir>/<asset>.<ext>` that exists.
    pub fn locate(&self, kind: EntityKind, pickup_type: Option<PickupType>, asset: &str) -> Option<PathBuf> {
        let file_name = format!("{asset}.{}", self.icons.extension);
        self.icons
            .candidates(kind, pickup_type)
            .iter()
            .map(|subdir| self.source_dir.join(subdir).join(&file_name))
            .find(|path| path.is_file())
    }

    pub fn copy(
        &self,
        kind: EntityKind,
        pickup_type: Option<PickupType>,
        asset: &str,
        id: &str,
    ) -> IconOutcome {
        let Some(source) = self.locate(kind, pickup_type, asset) else {
            return IconOutcome::Missing;
        };

        let file_name = format!("{id}.{}", self.icons.extension);
        let mut written = Vec::with_capacity(2);
        for dest_dir in [&self.images_dir, &self.public_dir] {
            match copy_into(&source, dest_dir, &file_name) {
                Ok(dest) => written.push(dest),
                Err(err) => {
                    warn!("Failed to copy icon for {id}: {err}");
                    // Both copies or neither.
                    for partial in written {
                        if let Err(err) = fs::remove_file(&partial) {
                            warn!(path = %partial.display(), "failed to remove partial icon copy: {err}");
                        }
                    }
                    return IconOutcome::Missing;
                }
            }
        }
        debug!(id, source = %source.display(), "copied icon");
        IconOutcome::Copied { source }
    }
}

fn copy_into(source: &Path, dest_dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(file_name);
    fs::copy(source, &dest)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_through_pickup_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let layout = config.layout(EntityKind::Pickup);
        let icon = config.icon_source_dir().join("Enhancement/T_Perk_Banana.png");
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        let copier = IconCopier::new(&config, &layout);
        let outcome = copier.copy(EntityKind::Pickup, Some(PickupType::Perk), "T_Perk_Banana", "Banana");
        assert_eq!(outcome, IconOutcome::Copied { source: icon });
        assert!(layout.images.join("Banana.png").is_file());
        assert!(layout.public.join("Banana.png").is_file());

        assert_eq!(
            copier.copy(EntityKind::Pickup, Some(PickupType::Perk), "T_Missing", "Missing"),
            IconOutcome::Missing
        );
    }

    #[test]
    fn failed_public_copy_leaves_no_partial_image() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let layout = config.layout(EntityKind::Ability);
        let icon = config.icon_source_dir().join("Ability/T_Ability_Grenade.png");
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();
        // A plain file where the public directory should be.
        fs::create_dir_all(layout.public.parent().unwrap()).unwrap();
        fs::write(&layout.public, b"not a dir").unwrap();

        let copier = IconCopier::new(&config, &layout);
        let outcome = copier.copy(EntityKind::Ability, None, "T_Ability_Grenade", "Grenade");
        assert_eq!(outcome, IconOutcome::Missing);
        assert!(!layout.images.join("Grenade.png").exists());
    }
}
