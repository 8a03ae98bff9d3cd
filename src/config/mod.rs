mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variables that only make sense for a networked database server.
const SERVER_ONLY_DB_VARS: &[&str] = &["DB_HOST", "DB_USER", "DB_PASS"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./schooldir.toml",
        "~/.config/schooldir/config.toml",
        "/etc/schooldir/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Load config and apply overrides from the process environment.
pub fn load_runtime_config(custom_path: Option<&Path>) -> Result<Config> {
    let mut config = load_config_or_default(custom_path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Recognized variables: `DB_NAME`, `DB_DIR`, `SCHOOLDIR_IMAGE_DIR`.
/// `DB_HOST`, `DB_USER` and `DB_PASS` are accepted but have no effect on
/// the embedded database, which is reported as a warning.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(name) = non_empty("DB_NAME") {
        config.database.name = name;
    }

    if let Some(dir) = non_empty("DB_DIR") {
        config.database.dir = PathBuf::from(dir);
    }

    if let Some(dir) = non_empty("SCHOOLDIR_IMAGE_DIR") {
        config.images.dir = PathBuf::from(dir);
    }

    for key in SERVER_ONLY_DB_VARS {
        if lookup(key).is_some() {
            tracing::warn!(
                "{} is set but ignored: the database is an embedded SQLite file at {:?}",
                key,
                config.database.path()
            );
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let name = &config.database.name;
    if name.trim().is_empty() {
        anyhow::bail!("Database name cannot be empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        anyhow::bail!("Database name '{}' must not contain path separators", name);
    }

    if config.database.pool_size == 0 {
        anyhow::bail!("Database pool size must be at least 1");
    }

    let prefix = &config.images.url_prefix;
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        anyhow::bail!(
            "Image url_prefix '{}' must start with '/' and name a sub-path without a trailing '/'",
            prefix
        );
    }
    if prefix == "/api" || prefix.starts_with("/api/") {
        anyhow::bail!("Image url_prefix '{}' collides with the API routes", prefix);
    }

    if let Some(ref dir) = config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}
