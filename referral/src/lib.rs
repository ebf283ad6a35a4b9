//! Referral program client.
//!
//! Talks to the user referral program API: referral code lookup, grant
//! authorization checks and the partner custom headers an install should
//! send. Network access goes through the [`Transport`] trait; [`HttpTransport`]
//! is the `reqwest` implementation.

pub mod config;
pub mod error;
pub mod headers;
pub mod service;
pub mod transport;

pub use config::Config;
pub use error::{ConfigError, TransportError, UrpError};
pub use headers::{CustomHeaderData, PartnerCookie, PARTNER_HEADER_KEY};
pub use service::{ReferralData, ReferralService};
pub use transport::{HttpTransport, Method, Request, Transport};
