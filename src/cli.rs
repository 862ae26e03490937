use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{resolve_root, Config};
use crate::data::filter::{parse_unlock, CatalogFilter};
use crate::data::pickup::{LootPool, PickupTag, PickupType};
use crate::data::{Catalog, EntityKind, Rarity};
use crate::pipeline::{clean, Pipeline, PipelineError};
use crate::server;

#[derive(Parser, Debug)]
#[command(name = "crabtools")]
#[command(about = "Crab Champions game data pipeline and API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project root (defaults to $CRABTOOLS_ROOT, then the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/crabtools.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize raw exports into data/<kind>/generated
    Process {
        #[arg(value_enum, default_value_t = ProcessTarget::All)]
        target: ProcessTarget,
    },

    /// Remove generated records and copied icons (overrides are kept)
    Clean,

    /// Print the merged, sorted records of one kind as JSON
    List {
        kind: EntityKind,

        /// Case-insensitive match on name or description
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        rarity: Option<Rarity>,

        /// Pickup type (AbilityMod, WeaponMod, MeleeMod, Perk, Relic, Consumable)
        #[arg(long = "type")]
        pickup_type: Option<PickupType>,

        #[arg(long)]
        loot_pool: Option<LootPool>,

        /// Pickup element tag
        #[arg(long)]
        element: Option<PickupTag>,

        /// yes|no
        #[arg(long, value_parser = parse_unlock_arg)]
        requires_unlock: Option<bool>,
    },

    /// Print one merged record as JSON
    Show { kind: EntityKind, id: String },

    /// Serve the read API and copied icons over HTTP
    Serve {
        /// Bind address (overrides config and $CRABTOOLS_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessTarget {
    Weapons,
    Abilities,
    Pickups,
    All,
}

impl ProcessTarget {
    fn kinds(self) -> Vec<EntityKind> {
        match self {
            Self::Weapons => vec![EntityKind::Weapon],
            Self::Abilities => vec![EntityKind::Ability],
            Self::Pickups => vec![EntityKind::Pickup],
            Self::All => EntityKind::ALL.to_vec(),
        }
    }
}

fn parse_unlock_arg(value: &str) -> Result<bool, String> {
    parse_unlock(value).ok_or_else(|| format!("expected yes or no, got '{value}'"))
}

/// Parses `args` (including the program name) and runs the command.
/// Returns the process exit code: 0 success, 1 failure, 2 usage.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let root = resolve_root(cli.root.as_deref());
    let mut config = match Config::load(&root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    match cli.command {
        Command::Process { target } => handle_process(&config, target),
        Command::Clean => {
            clean(&config).print_summary();
            0
        }
        Command::List {
            kind,
            search,
            rarity,
            pickup_type,
            loot_pool,
            element,
            requires_unlock,
        } => {
            let filter = CatalogFilter {
                search,
                rarity,
                pickup_type,
                loot_pool,
                element,
                requires_unlock,
            };
            handle_list(&config, kind, &filter)
        }
        Command::Show { kind, id } => handle_show(&config, kind, &id),
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            match server::run_server(&config) {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("server error: {err}");
                    1
                }
            }
        }
    }
}

fn handle_process(config: &Config, target: ProcessTarget) -> i32 {
    let pipeline = Pipeline::new(config);
    let mut failed = false;

    for kind in target.kinds() {
        match pipeline.process(kind) {
            Ok(report) => report.print_summary(),
            Err(err) => {
                failed = true;
                eprintln!("Fatal error processing {kind}: {err}");
                if let PipelineError::NoSuccesses { errors, .. } = &err {
                    for failure in errors {
                        eprintln!("  - {failure}");
                    }
                }
            }
        }
    }

    if failed {
        1
    } else {
        0
    }
}

fn handle_list(config: &Config, kind: EntityKind, filter: &CatalogFilter) -> i32 {
    let catalog = Catalog::from_config(config);
    let items = match catalog.list_json(kind, filter) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    print_json(&items)
}

fn handle_show(config: &Config, kind: EntityKind, id: &str) -> i32 {
    let catalog = Catalog::from_config(config);
    match catalog.get_json(kind, id) {
        Some(value) => print_json(&value),
        None => {
            eprintln!("{} '{id}' not found", kind.label());
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn process_defaults_to_all() {
        let cli = Cli::try_parse_from(args(&["crabtools", "process"])).unwrap();
        assert!(matches!(
            cli.command,
            Command::Process {
                target: ProcessTarget::All
            }
        ));
    }

    #[test]
    fn list_parses_filters() {
        let cli = Cli::try_parse_from(args(&[
            "crabtools",
            "list",
            "pickups",
            "--type",
            "relic",
            "--requires-unlock",
            "no",
        ]))
        .unwrap();
        match cli.command {
            Command::List {
                kind,
                pickup_type,
                requires_unlock,
                ..
            } => {
                assert_eq!(kind, EntityKind::Pickup);
                assert_eq!(pickup_type, Some(PickupType::Relic));
                assert_eq!(requires_unlock, Some(false));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["crabtools", "frobnicate"])), 2);
    }
}
