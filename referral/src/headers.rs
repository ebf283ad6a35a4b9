//! Partner custom-header data.
//!
//! The referral service tells partner builds which domains should receive a
//! partner header. The client turns each entry into secure cookies so the
//! value reaches those domains and their subdomains.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The only header field the client honors.
pub const PARTNER_HEADER_KEY: &str = "X-Brave-Partner";

const SECURE_PREFIX: &str = "__Secure-";
const COOKIE_LIFETIME_DAYS: i64 = 7;

/// A partner header and the domains it applies to.
///
/// Serialized under the keys the app persisted it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHeaderData {
    #[serde(rename = "customHeaderDataDomain")]
    pub domain_list: Vec<String>,
    #[serde(rename = "customHeaderDataHeaderKey")]
    pub header_field: String,
    #[serde(rename = "customHeaderDataHeaderValue")]
    pub header_value: String,
}

/// A cookie carrying a partner header value to one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCookie {
    pub domain: String,
    pub path: String,
    pub name: String,
    pub value: String,
    pub secure: bool,
    pub expires: DateTime<Utc>,
}

#[derive(Deserialize)]
struct HeaderEntry {
    domains: Vec<String>,
    headers: BTreeMap<String, String>,
}

impl CustomHeaderData {
    pub fn new(
        domain_list: Vec<String>,
        header_field: impl Into<String>,
        header_value: impl Into<String>,
    ) -> Self {
        Self {
            domain_list,
            header_field: header_field.into(),
            header_value: header_value.into(),
        }
    }

    /// Parse the custom-headers response body.
    ///
    /// Entries without the partner header are skipped, and other headers of
    /// an entry are ignored. A body that does not parse yields no headers.
    pub fn parse_list(json: &[u8]) -> Vec<Self> {
        let entries: Vec<HeaderEntry> = match serde_json::from_slice(json) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Unable to parse custom headers: {}", e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|mut entry| {
                let value = entry.headers.remove(PARTNER_HEADER_KEY)?;
                Some(Self::new(entry.domains, PARTNER_HEADER_KEY, value))
            })
            .collect()
    }

    /// Name of the cookie carrying this header.
    pub fn cookie_name(&self) -> String {
        format!("{}{}", SECURE_PREFIX, self.header_field)
    }

    /// Secure cookies for every domain, expiring a week after `now`.
    ///
    /// Domains get a leading `.` so subdomains receive the cookie too.
    pub fn cookies(&self, now: DateTime<Utc>) -> Vec<PartnerCookie> {
        let name = self.cookie_name();
        if name != format!("{}{}", SECURE_PREFIX, PARTNER_HEADER_KEY) {
            tracing::warn!("Invalid partner cookie name: {}", name);
            return Vec::new();
        }

        let expires = now + Duration::days(COOKIE_LIFETIME_DAYS);
        self.domain_list
            .iter()
            .map(|domain| domain.trim())
            .filter(|domain| !domain.is_empty() && !domain.contains(char::is_whitespace))
            .map(|domain| PartnerCookie {
                domain: format!(".{}", domain),
                path: "/".to_string(),
                name: name.clone(),
                value: self.header_value.clone(),
                secure: true,
                expires,
            })
            .collect()
    }
}
