//! Configuration module for Site-Tally
//!
//! Crawl bounds come from the command line; HTTP client settings may be read
//! from a TOML file. Both are validated before any network activity.
//!
//! # Example
//!
//! ```
//! use site_tally::config::{validate, Config};
//!
//! let config = Config::new("https://example.com/", 4, 100);
//! assert!(validate(&config).is_ok());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig};

pub use parser::{load_config, load_http_config};
pub use validation::validate;
