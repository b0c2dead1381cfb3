//! Handles settings for the application. Configuration is read from a TOML
//! file (`settings.toml` by default) and from `VAQUITA__*` environment
//! variables, the latter taking precedence.
//!
//! ```toml
//! [app]
//! level = "debug"
//!
//! [telegram]
//! token = "123456:ABC..."
//! ```
//!
//! `VAQUITA__TELEGRAM__TOKEN` overrides `telegram.token`.
use std::path::{Path, PathBuf};

use clap::Parser;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "settings.toml";
const ENV_PREFIX: &str = "VAQUITA";

#[derive(Debug, Parser)]
#[command(name = "vaquita", about = "Shared expenses bot for Telegram chats")]
pub struct Args {
    /// Settings file path (TOML). A missing file is not an error.
    #[arg(long, env = "VAQUITA_SETTINGS", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub telegram: Telegram,
}

impl Settings {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("app.level", "info")
}
