//! Settings for the application, read from `config/notaspese.toml` with
//! command-line overrides. No environment variables are consulted.

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/notaspese.toml";

/// Where the expenses blob lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Storage {
    /// Nothing survives the process; useful for trying the app out.
    Memory,
    /// JSON blob inside the given directory.
    Json { data_dir: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: Storage,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: Storage::Json {
                data_dir: "data".to_string(),
            },
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "notaspese", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the directory holding the expenses blob.
    #[arg(long)]
    data_dir: Option<String>,
    /// Keep the ledger in memory only, skipping the disk entirely.
    #[arg(long)]
    memory: bool,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let builder =
        config::Config::builder().add_source(config::File::with_name(config_path).required(false));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = args.data_dir {
        settings.storage = Storage::Json { data_dir };
    }
    if args.memory {
        settings.storage = Storage::Memory;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
