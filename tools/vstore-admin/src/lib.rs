//! # vstore-admin
//!
//! Operator CLI over a versioned store directory. Opening the store runs the
//! version gate exactly as any embedding application would, so pointing this
//! tool at a higher `--schema-version` performs the upgrade wipe.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use versioned_store::adapters::{DirectoryResolver, StorageLayout};
use versioned_store::{GateDecision, PersistenceApi, PersistenceConfig, StorageType, VersionedStore};

/// vstore-admin: inspect and edit a versioned store
#[derive(Parser, Debug)]
#[command(name = "vstore-admin")]
#[command(about = "Inspect and edit a versioned store directory")]
pub struct Args {
    /// Private container directory (default: $VSTORE_ROOT or ./data)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Parent directory of shared containers (default: $VSTORE_SHARED_ROOT)
    #[arg(long)]
    pub shared_root: Option<PathBuf>,

    /// Shared container identifier
    #[arg(short, long)]
    pub group: Option<String>,

    /// Schema version to open the store at
    #[arg(short = 'v', long)]
    pub schema_version: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the accepted version and every registered key
    Info,
    /// Print a stored value (UTF-8 if possible, hex otherwise)
    Get {
        key: String,
        #[arg(short, long, value_enum, default_value_t = StorageArg::Settings)]
        storage: StorageArg,
    },
    /// Store a UTF-8 value
    Put {
        key: String,
        value: String,
        #[arg(short, long, value_enum, default_value_t = StorageArg::Settings)]
        storage: StorageArg,
    },
    /// Remove a key from one backend
    Delete {
        key: String,
        #[arg(short, long, value_enum, default_value_t = StorageArg::Settings)]
        storage: StorageArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArg {
    Settings,
    File,
}

impl From<StorageArg> for StorageType {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Settings => StorageType::Settings,
            StorageArg::File => StorageType::File,
        }
    }
}

impl Args {
    /// Layout from flags, falling back to the environment.
    pub fn layout(&self) -> StorageLayout {
        let mut layout = StorageLayout::from_env();
        if let Some(root) = &self.root {
            layout.root_dir = root.clone();
        }
        if let Some(shared) = &self.shared_root {
            layout.shared_root = Some(shared.clone());
        }
        layout
    }

    pub fn config(&self) -> PersistenceConfig {
        let config = PersistenceConfig::new(self.schema_version);
        match &self.group {
            Some(group) => config.with_group_identifier(group.clone()),
            None => config,
        }
    }
}

/// Execute one command and return what should be printed.
pub fn run(args: &Args) -> Result<String> {
    let resolver = DirectoryResolver::new(args.layout());
    let mut store = VersionedStore::open(&args.config(), &resolver).with_context(|| {
        format!(
            "failed to open store in {} at schema version {}",
            resolver.layout().root_dir.display(),
            args.schema_version
        )
    })?;

    let mut out = String::new();
    match &args.command {
        Command::Info => {
            let gate = match store.gate_decision() {
                GateDecision::FirstRun { .. } => "first run".to_string(),
                GateDecision::Unchanged { .. } => "unchanged".to_string(),
                GateDecision::Upgrade { from, to } => format!("upgraded from v{} to {}", from, to),
            };
            let keys: Vec<&str> = store.registered_keys().collect();

            writeln!(out, "schema: {} ({})", store.version(), gate)?;
            writeln!(out, "registered keys: {}", keys.len())?;
            for key in keys {
                writeln!(out, "  {}", key)?;
            }
        }
        Command::Get { key, storage } => {
            let data = store
                .load_data(key, (*storage).into())
                .with_context(|| format!("failed to read '{}'", key))?;
            match String::from_utf8(data) {
                Ok(text) => writeln!(out, "{}", text)?,
                Err(e) => writeln!(out, "0x{}", hex::encode(e.as_bytes()))?,
            }
        }
        Command::Put {
            key,
            value,
            storage,
        } => {
            store
                .save_data(value.as_bytes(), key, (*storage).into())
                .with_context(|| format!("failed to write '{}'", key))?;
            writeln!(out, "saved '{}' ({} bytes)", key, value.len())?;
        }
        Command::Delete { key, storage } => {
            store
                .delete(key, (*storage).into())
                .with_context(|| format!("failed to delete '{}'", key))?;
            writeln!(out, "deleted '{}'", key)?;
        }
    }

    Ok(out)
}
