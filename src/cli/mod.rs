// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the bitfuse command-line interface.
//!
//! Three subcommands: `search` to query a JSON array (or a saved snapshot),
//! `index` to build a snapshot, and `inspect` to examine one. Keys can come
//! from `--key` flags, a `--config` file, or both; flags are appended to the
//! config's keys.

pub mod display;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use bitfuse::{Config, KeySpec};

#[derive(Parser)]
#[command(
    name = "bitfuse",
    about = "Fuzzy search over JSON collections",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that builds an index.
#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Key to search, as `name` or `name:weight` (repeatable)
    ///
    /// Dotted names walk nested objects: `author.firstName`.
    #[arg(short, long = "key", value_name = "NAME[:WEIGHT]")]
    pub keys: Vec<String>,

    /// JSON config file (camelCase fields, all optional)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum match score, 0 (exact) to 1 (anything)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Parse queries with the extended operator syntax
    #[arg(short, long)]
    pub extended: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a JSON array file or a .bfse snapshot
    Search {
        /// JSON array of strings or objects, or a .bfse snapshot
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        index: IndexArgs,
    },

    /// Build a .bfse snapshot from a JSON array file
    Index {
        /// JSON array of strings or objects
        file: PathBuf,

        /// Output snapshot path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        index: IndexArgs,
    },

    /// Inspect a .bfse snapshot
    Inspect {
        /// Path to .bfse file
        file: PathBuf,
    },
}

/// Parse `name` or `name:weight`. The weight is split at the last colon.
pub fn parse_key(raw: &str) -> Result<KeySpec> {
    match raw.rsplit_once(':') {
        Some((name, weight)) => {
            let weight: f64 = weight
                .parse()
                .with_context(|| format!("invalid weight in key {:?}", raw))?;
            if name.is_empty() {
                bail!("key {:?} has no name", raw);
            }
            Ok(KeySpec::weighted(name, weight))
        }
        None => Ok(KeySpec::from(raw)),
    }
}

impl IndexArgs {
    /// Merge the config file (if any) with command-line overrides.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        for raw in &self.keys {
            config.keys.push(parse_key(raw)?);
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.extended {
            config.use_extended_search = true;
        }

        config.validate().context("invalid search options")?;
        Ok(config)
    }

    /// True when any flag would change an index's config.
    pub fn has_overrides(&self) -> bool {
        !self.keys.is_empty() || self.config.is_some() || self.threshold.is_some() || self.extended
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Config::from_json_str(&text).with_context(|| format!("invalid config {}", path.display()))
}
