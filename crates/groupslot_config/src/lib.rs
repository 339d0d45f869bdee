//! Configuration loading for groupslot.
//!
//! Sources are layered, later ones winning:
//!
//! 1. `config/default.toml`
//! 2. `config/{RUN_ENV}.toml` (`RUN_ENV` defaults to `debug`)
//! 3. environment variables `GROUPSLOT__<SECTION>__<KEY>`
//!
//! The config directory is `./config` unless `GROUPSLOT_CONFIG_DIR` is set.
//! Every file is optional; missing values fall back to the defaults in
//! [`models`].

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
#[cfg(test)]
mod lib_test;

pub use models::*;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GROUPSLOT";

/// Loads the configuration from the default config directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let dir = env::var("GROUPSLOT_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));
    load_config_from(&dir)
}

/// Loads the configuration from `dir`, applying the environment on top.
pub fn load_config_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = dir.join("default");
    let env_path = dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads `.env` (or the file named by `DOTENV_OVERRIDE`) exactly once.
///
/// Returns the path that was attempted.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
