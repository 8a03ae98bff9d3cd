use schooldir_common::validation::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with a built front-end, served with SPA fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file
    #[serde(default = "default_db_dir")]
    pub dir: PathBuf,

    /// Database name; the file is `{dir}/{name}.sqlite`
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Create the schools table at startup instead of waiting for `init-db`
    #[serde(default)]
    pub bootstrap_on_start: bool,
}

fn default_db_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_db_name() -> String {
    "school_db".to_string()
}
fn default_pool_size() -> u32 {
    4
}

impl DatabaseConfig {
    /// Full path of the SQLite database file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.sqlite", self.name))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dir: default_db_dir(),
            name: default_db_name(),
            pool_size: default_pool_size(),
            bootstrap_on_start: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Directory uploaded images are written to and served from
    #[serde(default = "default_image_dir")]
    pub dir: PathBuf,

    /// URL path the image directory is served under
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("public/schoolImages")
}
fn default_url_prefix() -> String {
    "/schoolImages".to_string()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_image_dir(),
            url_prefix: default_url_prefix(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Largest accepted image in bytes (0 = no limit)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Only accept states from the known list
    #[serde(default = "default_restrict_states")]
    pub restrict_states: bool,
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}
fn default_restrict_states() -> bool {
    true
}

impl ValidationConfig {
    /// Image ceiling as a byte count, `None` when disabled.
    pub fn max_image_bytes(&self) -> Option<usize> {
        match self.max_image_bytes {
            0 => None,
            n => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            max_image_bytes: self.max_image_bytes(),
            restrict_states: self.restrict_states,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            restrict_states: default_restrict_states(),
        }
    }
}
