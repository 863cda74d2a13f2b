//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use acente_core::models::config::AcenteConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, e.g. "forecast.history_months"
    Get { key: String },

    /// Change one value; JSON literals are parsed, anything else is a string
    Set { key: String, value: String },

    /// Print where the configuration file lives
    Path,
}

/// The configuration file every command reads, either given with
/// `--config` or the per-user default location.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    explicit: bool,
}

impl ConfigFile {
    pub fn resolve(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => Self {
                path: path.to_path_buf(),
                explicit: true,
            },
            None => Self {
                path: dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("acente")
                    .join("config.json"),
                explicit: false,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration for the other commands. A missing default file means
    /// defaults; a missing `--config` file is an error.
    pub fn load(&self) -> anyhow::Result<AcenteConfig> {
        if self.explicit || self.path.exists() {
            debug!("Using config file {}", self.path.display());
            AcenteConfig::from_file(&self.path)
                .with_context(|| format!("Failed to load config {}", self.path.display()))
        } else {
            Ok(AcenteConfig::default())
        }
    }

    /// Like [`ConfigFile::load`], but an absent file is never an error.
    fn load_or_default(&self) -> anyhow::Result<AcenteConfig> {
        if self.path.exists() {
            Ok(AcenteConfig::from_file(&self.path)?)
        } else {
            Ok(AcenteConfig::default())
        }
    }

    fn save(&self, config: &AcenteConfig) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        config.save(&self.path)?;
        Ok(())
    }
}

pub async fn run(args: ConfigArgs, file: &ConfigFile) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            if !file.path().exists() {
                eprintln!(
                    "{} {} does not exist, showing defaults.",
                    style("ℹ").blue(),
                    file.path().display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&file.load_or_default()?)?);
        }
        ConfigCommand::Init { force } => {
            if file.path().exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    file.path().display()
                );
            }
            file.save(&AcenteConfig::default())?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                file.path().display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(file.load_or_default()?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let value: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));
            let updated = apply(&file.load_or_default()?, &key, value.clone())?;
            file.save(&updated)?;
            println!("{} {} = {} in {}", style("✓").green(), key, value, file.path().display());
        }
        ConfigCommand::Path => {
            let status = if file.path().exists() {
                style("exists").green()
            } else {
                style("not created, run 'acente config init'").yellow()
            };
            println!("{} ({})", file.path().display(), status);
        }
    }

    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.')
        .try_fold(json, |node, part| node.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
}

/// Set `key` (dot separated) to `value`. Only existing keys can be set, and
/// the result must still deserialize as an [`AcenteConfig`].
fn apply(config: &AcenteConfig, key: &str, value: Value) -> anyhow::Result<AcenteConfig> {
    let mut json = serde_json::to_value(config)?;

    let slot = key
        .split('.')
        .try_fold(&mut json, |node, part| node.get_mut(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }
    *slot = value;

    serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}
