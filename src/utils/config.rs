use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::args::Args;
use crate::utils::formatting::ListingOrder;

pub const DEFAULT_CATALOG_PATH: &str = "products.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("STORE_CATALOG_PATH must not be empty")]
    EmptyCatalogPath,

    #[error("STORE_LISTING_ORDER is invalid: {0}")]
    ListingOrder(#[from] crate::utils::formatting::UnknownListingOrder),

    #[error("{key} must be true or false, got '{value}'")]
    NotABool { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub listing_order: ListingOrder,
    pub require_catalog: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            listing_order: ListingOrder::default(),
            require_catalog: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            catalog_path: lookup("STORE_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            listing_order: match lookup("STORE_LISTING_ORDER") {
                Some(value) => value.parse()?,
                None => defaults.listing_order,
            },
            require_catalog: match lookup("STORE_REQUIRE_CATALOG") {
                Some(value) => parse_bool("STORE_REQUIRE_CATALOG", &value)?,
                None => defaults.require_catalog,
            },
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Command line flags win over the environment.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(path) = &args.catalog {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(order) = args.order {
            self.listing_order = order.into();
        }
        if args.require_catalog {
            self.require_catalog = true;
        }
        if args.verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCatalogPath);
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::NotABool {
            key,
            value: value.to_string(),
        }),
    }
}
