//! Removes pipeline output (generated records, copied icons). Overrides are kept.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::data::EntityKind;

#[derive(Debug, Default)]
pub struct CleanReport {
    /// `(directory, files removed)` in visit order.
    pub dirs: Vec<(PathBuf, usize)>,
}

impl CleanReport {
    pub fn total(&self) -> usize {
        self.dirs.iter().map(|(_, n)| n).sum()
    }

    pub fn print_summary(&self) {
        for (dir, removed) in &self.dirs {
            println!("Cleaned {removed} file(s) from {}", dir.display());
        }
        println!("Total files removed: {}", self.total());
    }
}

/// Deletes the files directly inside `dir`. Missing directories count as zero.
fn clean_dir(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => warn!("Failed to remove {}: {err}", path.display()),
        }
    }
    removed
}

pub fn clean(config: &Config) -> CleanReport {
    let mut report = CleanReport::default();
    for kind in EntityKind::ALL {
        let layout = config.layout(kind);
        for dir in [layout.generated, layout.images, layout.public] {
            let removed = clean_dir(&dir);
            info!(dir = %dir.display(), removed, "cleaned");
            report.dirs.push((dir, removed));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_output_but_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let layout = config.layout(EntityKind::Ability);
        for d in [&layout.generated, &layout.overrides, &layout.public] {
            fs::create_dir_all(d).unwrap();
        }
        fs::write(layout.generated.join("Grenade.json"), "{}").unwrap();
        fs::write(layout.generated.join("AirStrike.json"), "{}").unwrap();
        fs::write(layout.public.join("Grenade.png"), "png").unwrap();
        fs::write(layout.overrides.join("Grenade.json"), "{}").unwrap();

        let report = clean(&config);
        assert_eq!(report.total(), 3);
        assert_eq!(report.dirs.len(), 9);
        assert!(layout.overrides.join("Grenade.json").is_file());
        assert!(layout.generated.is_dir());
    }
}
