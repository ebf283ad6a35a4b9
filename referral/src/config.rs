//! Configuration management for the referral client.

use crate::error::ConfigError;
use std::env;

/// Host used when `URP_HOST` is not set.
pub const DEFAULT_HOST: &str = "https://laptop-updates.brave.com";

/// Referral client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Referral API base URL
    pub host: String,
    /// API key sent with every request
    pub api_key: String,
    /// Download id to check for grant authorization, if any
    pub download_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("URP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let api_key = env::var("URP_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let download_id = env::var("URP_DOWNLOAD_ID").ok();

        Ok(Self {
            host,
            api_key,
            download_id,
        })
    }
}
