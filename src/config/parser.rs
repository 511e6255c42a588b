use crate::config::types::{Config, HttpConfig};
use crate::config::validation::{validate, validate_http_config};
use crate::ConfigResult;
use serde::Deserialize;
use std::path::Path;

/// On-disk layout accepted by `--config`; only the HTTP table is read, the
/// crawl bounds always come from the command line.
#[derive(Debug, Default, Deserialize)]
struct HttpConfigFile {
    #[serde(default)]
    http: HttpConfig,
}

/// Loads and parses a full configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to a TOML file with `[crawl]` and optional `[http]` tables
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_tally::config::load_config;
///
/// let config = load_config(Path::new("tally.toml")).unwrap();
/// println!("Max pages: {}", config.crawl.max_pages);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads only the `[http]` table from a TOML file
///
/// Missing keys fall back to their defaults, so an empty file is valid.
pub fn load_http_config(path: &Path) -> ConfigResult<HttpConfig> {
    let content = std::fs::read_to_string(path)?;
    let file: HttpConfigFile = toml::from_str(&content)?;
    validate_http_config(&file.http)?;
    Ok(file.http)
}
