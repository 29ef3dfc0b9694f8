use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "2024-07";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound Shopify accepts for `first:` on a connection.
pub const MAX_PAGE_SIZE: u32 = 250;

#[derive(Debug, Clone)]
pub struct Config {
    pub store: String,
    pub access_token: String,
    pub api_version: String,
    pub page_size: u32,
    pub graphql_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let store = required(&env_map, "SHOPIFY_STORE")?;
        let access_token = required(&env_map, "SHOPIFY_ACCESS_TOKEN")?;

        let api_version = env_map
            .get("SHOPIFY_API_VERSION")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_VERSION)
            .to_string();

        let page_size = match env_map.get("PAYOUT_PAGE_SIZE") {
            Some(raw) => parse_page_size(raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let graphql_url = env_map
            .get("SHOPIFY_GRAPHQL_URL")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| admin_graphql_url(&store, &api_version));

        Ok(Config {
            store,
            access_token,
            api_version,
            page_size,
            graphql_url,
        })
    }
}

/// Admin API endpoint for a store and API version.
pub fn admin_graphql_url(store: &str, api_version: &str) -> String {
    format!(
        "https://{}.myshopify.com/admin/api/{}/graphql.json",
        store, api_version
    )
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let size = raw.trim().parse::<u32>().map_err(|_| {
        ConfigError::InvalidValue(
            "PAYOUT_PAGE_SIZE".to_string(),
            "must be a positive integer".to_string(),
        )
    })?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidValue(
            "PAYOUT_PAGE_SIZE".to_string(),
            format!("must be between 1 and {}, got {}", MAX_PAGE_SIZE, size),
        ));
    }
    Ok(size)
}
