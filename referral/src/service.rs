//! Referral program endpoints.

use crate::{
    config::Config,
    error::{ConfigError, UrpError},
    headers::CustomHeaderData,
    transport::{Method, Request, Transport},
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const API_KEY_PARAM: &str = "api_key";
const DOWNLOAD_ID_PARAM: &str = "download_id";

const REFERRAL_LOOKUP_PATH: &str = "promo/initialize/ua";
const ACTIVITY_PATH: &str = "promo/activity";
const CUSTOM_HEADERS_PATH: &str = "promo/custom-headers";

/// Referral code assigned to this install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralData {
    pub download_id: String,
    pub referral_code: String,
    #[serde(default)]
    pub offer_page_url: Option<String>,
}

/// Client for the user referral program API.
#[derive(Debug, Clone)]
pub struct ReferralService<T> {
    host: Url,
    api_key: String,
    transport: T,
}

impl<T: Transport> ReferralService<T> {
    /// Create a service for `host`, which must be an absolute URL with a
    /// host name.
    pub fn new(host: &str, api_key: impl Into<String>, transport: T) -> Result<Self, ConfigError> {
        let url = Url::parse(host).map_err(|_| ConfigError::InvalidHost(host.to_string()))?;
        if url.host_str().is_none() || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidHost(host.to_string()));
        }

        Ok(Self {
            host: url,
            api_key: api_key.into(),
            transport,
        })
    }

    pub fn from_config(config: &Config, transport: T) -> Result<Self, ConfigError> {
        Self::new(&config.host, config.api_key.clone(), transport)
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.host.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url
    }

    /// Look up the referral code for this install.
    pub async fn referral_code_lookup(&self) -> Result<ReferralData, UrpError> {
        let request = Request::new(Method::Put, self.endpoint(REFERRAL_LOOKUP_PATH))
            .param(API_KEY_PARAM, self.api_key.as_str());

        let data = self.transport.fetch(request).await.map_err(|e| {
            tracing::error!("Referral code lookup failed: {}", e);
            UrpError::from(e)
        })?;
        tracing::debug!(
            "Referral code lookup response: {}",
            String::from_utf8_lossy(&data)
        );

        serde_json::from_slice(&data).map_err(|e| {
            tracing::error!("Unable to deserialize ReferralData from json: {}", e);
            UrpError::Endpoint
        })
    }

    /// Ask whether the referral for `download_id` has been finalized.
    ///
    /// Any parsable response without a boolean `finalized` flag counts as
    /// not authorized.
    pub async fn check_if_authorized_for_grant(&self, download_id: &str) -> Result<bool, UrpError> {
        let request = Request::new(Method::Put, self.endpoint(ACTIVITY_PATH))
            .param(API_KEY_PARAM, self.api_key.as_str())
            .param(DOWNLOAD_ID_PARAM, download_id);

        let data = self.transport.fetch(request).await.map_err(|e| {
            tracing::error!("Check if authorized for grant failed: {}", e);
            UrpError::from(e)
        })?;
        tracing::debug!(
            "Check if authorized for grant response: {}",
            String::from_utf8_lossy(&data)
        );

        let response: Value = serde_json::from_slice(&data).map_err(|e| {
            tracing::error!("Check if authorized for grant response: {}", e);
            UrpError::Endpoint
        })?;
        Ok(response
            .get("finalized")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Fetch the partner headers this install should send.
    pub async fn fetch_custom_headers(&self) -> Result<Vec<CustomHeaderData>, UrpError> {
        let request = Request::new(Method::Get, self.endpoint(CUSTOM_HEADERS_PATH))
            .param(API_KEY_PARAM, self.api_key.as_str());

        let data = self.transport.fetch(request).await.map_err(|e| {
            tracing::error!("Fetching custom headers failed: {}", e);
            UrpError::from(e)
        })?;

        Ok(CustomHeaderData::parse_list(&data))
    }
}
