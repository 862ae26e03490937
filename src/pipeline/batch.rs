//! Generic batch driver: discover, normalize, write `<id>.json`, copy icons, report.
//! A bad file is recorded and skipped; the run only fails when nothing succeeded.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::KindLayout;
use crate::data::pickup::PickupType;
use crate::data::validate::NormalizeError;
use crate::data::{Entity, EntityKind};
use crate::pipeline::icons::{IconCopier, IconOutcome};

/// One discovered export file. Pickups carry their type directory as a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub type_hint: Option<String>,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            type_hint: None,
        }
    }

    /// File name used in validation messages.
    pub fn file_label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read file: {0}")]
    Read(#[source] io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Invalid format: expected non-empty array")]
    InvalidFormat,
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("duplicate id '{id}', already produced by {}", .first.display())]
    DuplicateId { id: String, first: PathBuf },
    #[error("failed to encode {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error processing {}: {}", self.path.display(), self.error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{kind} directory not found: {}", .path.display())]
    SourceDirMissing { kind: EntityKind, path: PathBuf },
    #[error("No {kind} JSON files found in {}", .path.display())]
    NoSourceFiles { kind: EntityKind, path: PathBuf },
    #[error("No {kind} were successfully processed ({} file(s) had errors)", .errors.len())]
    NoSuccesses {
        kind: EntityKind,
        errors: Vec<FileFailure>,
    },
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> PipelineError + '_ {
        move |source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub kind: EntityKind,
    pub output_dir: PathBuf,
    /// Sorted.
    pub processed: Vec<String>,
    pub errors: Vec<FileFailure>,
    pub icons_copied: Vec<String>,
    pub icons_missing: Vec<String>,
    /// Pickups only; empty for other kinds.
    pub type_counts: BTreeMap<PickupType, usize>,
}

impl BatchReport {
    fn new(kind: EntityKind, output_dir: PathBuf) -> Self {
        Self {
            kind,
            output_dir,
            processed: Vec::new(),
            errors: Vec::new(),
            icons_copied: Vec::new(),
            icons_missing: Vec::new(),
            type_counts: BTreeMap::new(),
        }
    }

    pub fn print_summary(&self) {
        println!("\nSuccessfully processed {} {}", self.processed.len(), self.kind);
        println!("Output written to: {}", self.output_dir.display());
        if !self.processed.is_empty() {
            println!("IDs: {}", self.processed.join(", "));
        }
        if !self.type_counts.is_empty() {
            println!("Breakdown by type:");
            for (pickup_type, count) in &self.type_counts {
                println!("  - {pickup_type}: {count}");
            }
        }
        if !self.icons_copied.is_empty() {
            println!("Copied {} icon(s)", self.icons_copied.len());
        }
        if !self.icons_missing.is_empty() {
            eprintln!(
                "warning: {} icon(s) not found: {}",
                self.icons_missing.len(),
                self.icons_missing.join(", ")
            );
        }
        if !self.errors.is_empty() {
            eprintln!("warning: {} file(s) had errors:", self.errors.len());
            for failure in &self.errors {
                eprintln!("  - {failure}");
            }
        }
    }
}

/// First element of the file's top-level array.
pub fn read_first_record(path: &Path) -> Result<Value, FileError> {
    let raw = fs::read_to_string(path).map_err(FileError::Read)?;
    match serde_json::from_str::<Value>(&raw).map_err(FileError::Parse)? {
        Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
        _ => Err(FileError::InvalidFormat),
    }
}

fn write_record<E: Entity>(dir: &Path, entity: &E) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(entity).map_err(|source| FileError::Encode {
        id: entity.id().to_string(),
        source,
    })?;
    let path = dir.join(format!("{}.json", entity.id()));
    fs::write(&path, json).map_err(|source| FileError::Write { path, source })
}

/// Runs one kind end to end. `discover` lists the source files under
/// `layout.source`; `normalize` turns one raw record into an entity.
pub fn run_batch<E, D, N>(
    kind: EntityKind,
    layout: &KindLayout,
    icons: &IconCopier,
    discover: D,
    normalize: N,
) -> Result<BatchReport, PipelineError>
where
    E: Entity,
    D: FnOnce(&Path) -> io::Result<Vec<SourceFile>>,
    N: Fn(Value, &SourceFile) -> Result<E, NormalizeError>,
{
    info!("Processing {kind}...");
    info!("Reading from: {}", layout.source.display());

    if !layout.source.is_dir() {
        return Err(PipelineError::SourceDirMissing {
            kind,
            path: layout.source.clone(),
        });
    }

    let sources = discover(&layout.source).map_err(PipelineError::io(&layout.source))?;
    if sources.is_empty() {
        return Err(PipelineError::NoSourceFiles {
            kind,
            path: layout.source.clone(),
        });
    }
    info!("Found {} {kind} files", sources.len());

    for dir in [&layout.generated, &layout.images, &layout.public] {
        fs::create_dir_all(dir).map_err(PipelineError::io(dir))?;
    }

    let mut report = BatchReport::new(kind, layout.generated.clone());
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for source in &sources {
        let result = read_first_record(&source.path)
            .and_then(|value| normalize(value, source).map_err(FileError::from))
            .and_then(|entity| match seen.get(entity.id()) {
                Some(first) => Err(FileError::DuplicateId {
                    id: entity.id().to_string(),
                    first: first.clone(),
                }),
                None => Ok(entity),
            })
            .and_then(|entity| write_record(&layout.generated, &entity).map(|()| entity));

        let entity = match result {
            Ok(entity) => entity,
            Err(error) => {
                let failure = FileFailure {
                    path: source.path.clone(),
                    error,
                };
                error!("{failure}");
                report.errors.push(failure);
                continue;
            }
        };

        let id = entity.id().to_string();
        seen.insert(id.clone(), source.path.clone());
        if let Some(pickup_type) = entity.pickup_type() {
            *report.type_counts.entry(pickup_type).or_insert(0) += 1;
        }
        if let Some(asset) = entity.icon_asset() {
            match icons.copy(kind, entity.pickup_type(), asset, &id) {
                IconOutcome::Copied { .. } => report.icons_copied.push(id.clone()),
                IconOutcome::Missing => {
                    warn!("Icon not found for {id}: {asset}");
                    report.icons_missing.push(id.clone());
                }
            }
        }
        report.processed.push(id);
    }

    if report.processed.is_empty() {
        return Err(PipelineError::NoSuccesses {
            kind,
            errors: report.errors,
        });
    }

    report.processed.sort();
    report.icons_copied.sort();
    report.icons_missing.sort();
    Ok(report)
}
