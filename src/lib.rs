//! Crab Champions catalog tooling.
//!
//! `pipeline` turns raw game-export JSON into one normalized JSON file per
//! weapon, ability and pickup (plus copied icons). `data` holds the entity
//! types, validators and the merge-on-load reader used by the CLI and the
//! HTTP `server`.

pub mod cli;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod server;
