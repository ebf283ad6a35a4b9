//! Bookmark sync records.

use crate::{
    base::{BaseRecord, SyncAction, Syncable},
    error::Result,
    wire::{self, WireObject, WireValue},
    RecordKind, Site,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod keys {
    pub const IS_FOLDER: &str = "isFolder";
    pub const PARENT_FOLDER_OBJECT_ID: &str = "parentFolderObjectId";
    pub const SITE: &str = "site";
    pub const SYNC_ORDER: &str = "syncOrder";
}

/// A bookmark or bookmark folder as stored on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBookmark {
    pub sync_uuid: Option<Vec<i64>>,
    pub title: Option<String>,
    pub custom_title: Option<String>,
    pub url: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: bool,
    pub is_folder: Option<bool>,
    pub sync_parent_uuid: Option<Vec<i64>>,
    pub sync_order: Option<String>,
}

impl Syncable for LocalBookmark {
    fn sync_uuid(&self) -> Option<&[i64]> {
        self.sync_uuid.as_deref()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

/// A synced bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub base: BaseRecord,
    /// Local UI state; never part of the wire form
    pub is_favorite: bool,
    pub is_folder: Option<bool>,
    pub parent_folder_object_id: Option<Vec<i64>>,
    pub site: Option<Site>,
    pub sync_order: Option<String>,
}

impl Default for BookmarkRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkRecord {
    /// An empty bookmark record.
    pub fn new() -> Self {
        Self {
            base: BaseRecord::new(RecordKind::Bookmark),
            is_favorite: false,
            is_folder: None,
            parent_folder_object_id: None,
            site: None,
            sync_order: None,
        }
    }

    /// Prepare an outbound record for a local bookmark.
    pub fn from_local(
        bookmark: &LocalBookmark,
        device_id: Option<Vec<i64>>,
        action: Option<SyncAction>,
        now: DateTime<Utc>,
    ) -> Self {
        let site = Site {
            custom_title: bookmark.custom_title.clone(),
            title: bookmark.title.clone(),
            favicon: None,
            location: bookmark.url.clone(),
            creation_time: bookmark.created.map(|t| t.timestamp()),
            last_accessed_time: bookmark.last_visited.map(|t| t.timestamp()),
        };

        Self {
            base: BaseRecord::from_local(bookmark, RecordKind::Bookmark, device_id, action, now),
            is_favorite: bookmark.is_favorite,
            is_folder: bookmark.is_folder,
            parent_folder_object_id: bookmark.sync_parent_uuid.clone(),
            site: Some(site),
            sync_order: bookmark.sync_order.clone(),
        }
    }

    /// Decode a bookmark payload.
    ///
    /// Bookmark fields are read from the object under the `Bookmark` key.
    /// Payloads without that key are read in the legacy flat layout, where
    /// the bookmark fields sit next to the base fields.
    pub fn decode(value: &WireValue) -> Result<Self> {
        let obj = wire::as_object(value, "payload")?;
        let base = BaseRecord::decode_object(obj, RecordKind::Bookmark)?;
        let fields = wire::optional_object(obj, RecordKind::Bookmark.nesting_key())?.unwrap_or(obj);

        Ok(Self {
            base,
            is_favorite: false,
            is_folder: wire::optional_bool(fields, keys::IS_FOLDER)?,
            parent_folder_object_id: wire::optional_int_seq(fields, keys::PARENT_FOLDER_OBJECT_ID)?,
            site: wire::optional_object(fields, keys::SITE)?
                .map(Site::decode_object)
                .transpose()?,
            sync_order: wire::optional_string(fields, keys::SYNC_ORDER)?,
        })
    }

    /// Encode to the wire form: base fields at the top level, bookmark
    /// fields nested under the `Bookmark` key.
    pub fn encode(&self) -> WireValue {
        WireValue::Object(self.dictionary_representation())
    }

    /// Encode in the legacy flat layout, with the bookmark fields beside the
    /// base fields. [`BookmarkRecord::decode`] still accepts this form.
    pub fn encode_flat(&self) -> WireValue {
        let mut obj = self.own_fields();
        self.base.encode_into(&mut obj);
        WireValue::Object(obj)
    }

    /// Key-value projection for logging and export, in the wire layout.
    pub fn dictionary_representation(&self) -> WireObject {
        let mut dictionary = WireObject::new();
        self.base.encode_into(&mut dictionary);
        dictionary.insert(
            RecordKind::Bookmark.nesting_key().to_string(),
            WireValue::Object(self.own_fields()),
        );
        dictionary
    }

    fn own_fields(&self) -> WireObject {
        let mut obj = WireObject::new();
        wire::put(&mut obj, keys::IS_FOLDER, self.is_folder);
        wire::put(&mut obj, keys::SYNC_ORDER, self.sync_order.clone());
        wire::put(
            &mut obj,
            keys::PARENT_FOLDER_OBJECT_ID,
            self.parent_folder_object_id.clone(),
        );
        wire::put(&mut obj, keys::SITE, self.site.as_ref().map(Site::encode));
        obj
    }
}
