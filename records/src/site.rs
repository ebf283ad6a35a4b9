//! Page metadata carried by a bookmark record.

use crate::{
    error::Result,
    wire::{self, WireObject, WireValue},
    UnixSeconds,
};
use chrono::{DateTime, Utc};

mod keys {
    pub const CUSTOM_TITLE: &str = "customTitle";
    pub const TITLE: &str = "title";
    pub const FAVICON: &str = "favicon";
    pub const LOCATION: &str = "location";
    pub const CREATION_TIME: &str = "creationTime";
    pub const LAST_ACCESSED_TIME: &str = "lastAccessedTime";
}

/// Display and location metadata of a bookmarked page.
///
/// A site has no identity of its own; it always belongs to one bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pub custom_title: Option<String>,
    pub title: Option<String>,
    pub favicon: Option<String>,
    pub location: Option<String>,
    /// Unix seconds
    pub creation_time: Option<UnixSeconds>,
    /// Unix seconds
    pub last_accessed_time: Option<UnixSeconds>,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creation time as a native date, derived on every call.
    pub fn creation_native_date(&self) -> Option<DateTime<Utc>> {
        wire::native_time(self.creation_time)
    }

    /// Last access time as a native date, derived on every call.
    pub fn last_accessed_native_date(&self) -> Option<DateTime<Utc>> {
        wire::native_time(self.last_accessed_time)
    }

    /// Decode a site object. Every field is optional.
    pub fn decode(value: &WireValue) -> Result<Self> {
        Self::decode_object(wire::as_object(value, "site")?)
    }

    pub(crate) fn decode_object(obj: &WireObject) -> Result<Self> {
        Ok(Self {
            custom_title: wire::optional_string(obj, keys::CUSTOM_TITLE)?,
            title: wire::optional_string(obj, keys::TITLE)?,
            favicon: wire::optional_string(obj, keys::FAVICON)?,
            location: wire::optional_string(obj, keys::LOCATION)?,
            creation_time: wire::optional_i64(obj, keys::CREATION_TIME)?,
            last_accessed_time: wire::optional_i64(obj, keys::LAST_ACCESSED_TIME)?,
        })
    }

    /// Encode to a wire object, omitting absent fields.
    pub fn encode(&self) -> WireValue {
        let mut obj = WireObject::new();
        wire::put(&mut obj, keys::CUSTOM_TITLE, self.custom_title.clone());
        wire::put(&mut obj, keys::TITLE, self.title.clone());
        wire::put(&mut obj, keys::FAVICON, self.favicon.clone());
        wire::put(&mut obj, keys::LOCATION, self.location.clone());
        wire::put(&mut obj, keys::CREATION_TIME, self.creation_time);
        wire::put(&mut obj, keys::LAST_ACCESSED_TIME, self.last_accessed_time);
        WireValue::Object(obj)
    }

    /// Key-value projection for logging and export.
    pub fn dictionary_representation(&self) -> WireObject {
        match self.encode() {
            WireValue::Object(obj) => obj,
            _ => WireObject::new(),
        }
    }
}
