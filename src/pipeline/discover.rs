//! Source file discovery. Each kind lays its exports out differently:
//! weapons one level down, abilities flat, pickups by type and optionally rarity.
//! Results are sorted by path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::pipeline::batch::SourceFile;

const WEAPON_FILE_PREFIX: &str = "DA_Weapon_";
const PICKUP_FILE_PREFIX: &str = "DA_";

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

fn has_prefix(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with(prefix))
}

fn subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn json_files(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_json(&path) && has_prefix(&path, prefix) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn plain(paths: Vec<PathBuf>) -> Vec<SourceFile> {
    paths.into_iter().map(SourceFile::new).collect()
}

/// `Weapon/<group>/DA_Weapon_*.json`
pub fn weapon_sources(root: &Path) -> io::Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for dir in subdirectories(root)? {
        files.extend(json_files(&dir, WEAPON_FILE_PREFIX)?);
    }
    files.sort();
    Ok(plain(files))
}

/// `Ability/*.json`
pub fn ability_sources(root: &Path) -> io::Result<Vec<SourceFile>> {
    Ok(plain(json_files(root, "")?))
}

/// `Pickup/<Type>/<Rarity>/DA_*.json`, or `Pickup/<Type>/DA_*.json` when the type
/// directory has no subdirectories. The type directory name becomes the type hint.
pub fn pickup_sources(root: &Path) -> io::Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for type_dir in subdirectories(root)? {
        let hint = type_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        let rarity_dirs = subdirectories(&type_dir)?;
        let files = if rarity_dirs.is_empty() {
            json_files(&type_dir, PICKUP_FILE_PREFIX)?
        } else {
            let mut files = Vec::new();
            for dir in rarity_dirs {
                files.extend(json_files(&dir, PICKUP_FILE_PREFIX)?);
            }
            files
        };

        sources.extend(files.into_iter().map(|path| SourceFile {
            path,
            type_hint: hint.clone(),
        }));
    }
    sources.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "[]").unwrap();
    }

    #[test]
    fn weapons_are_one_level_down_and_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Rifle/DA_Weapon_AutoRifle.json"));
        touch(&dir.path().join("Rifle/DA_Projectile_Bullet.json"));
        touch(&dir.path().join("Pistol/DA_Weapon_Seagle.json"));
        touch(&dir.path().join("DA_Weapon_TopLevel.json"));

        let names: Vec<String> = weapon_sources(dir.path())
            .unwrap()
            .iter()
            .map(|s| s.file_label())
            .collect();
        assert_eq!(names, vec!["DA_Weapon_Seagle.json", "DA_Weapon_AutoRifle.json"]);
    }

    #[test]
    fn abilities_are_flat() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("DA_Ability_Grenade.json"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("Nested/DA_Ability_Hidden.json"));

        let sources = ability_sources(dir.path()).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].type_hint, None);
    }

    #[test]
    fn pickups_descend_into_rarity_dirs_when_present() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Perk/Common/DA_Perk_Banana.json"));
        touch(&dir.path().join("Perk/Epic/DA_Perk_Glass.json"));
        touch(&dir.path().join("Perk/DA_Perk_Ignored.json"));
        touch(&dir.path().join("Relic/DA_Relic_StarFragment.json"));
        touch(&dir.path().join("Relic/Readme.json"));

        let sources = pickup_sources(dir.path()).unwrap();
        let found: Vec<(String, Option<String>)> = sources
            .iter()
            .map(|s| (s.file_label(), s.type_hint.clone()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("DA_Perk_Banana.json".to_string(), Some("Perk".to_string())),
                ("DA_Perk_Glass.json".to_string(), Some("Perk".to_string())),
                ("DA_Relic_StarFragment.json".to_string(), Some("Relic".to_string())),
            ]
        );
    }
}
