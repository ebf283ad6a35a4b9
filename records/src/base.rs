//! Fields shared by every sync record.

use crate::{
    error::Result,
    wire::{self, WireObject},
    DecodeError, RecordKind, UnixSeconds,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) mod keys {
    pub const OBJECT_ID: &str = "objectId";
    pub const DEVICE_ID: &str = "deviceId";
    pub const ACTION: &str = "action";
    pub const OBJECT_DATA: &str = "objectData";
    pub const SYNC_TIMESTAMP: &str = "syncTimestamp";
}

/// What a record asks the sync service to do with the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Update,
    Delete,
}

impl SyncAction {
    /// Integer code used on the wire.
    pub fn code(&self) -> i64 {
        match self {
            SyncAction::Create => 0,
            SyncAction::Update => 1,
            SyncAction::Delete => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SyncAction::Create),
            1 => Some(SyncAction::Update),
            2 => Some(SyncAction::Delete),
            _ => None,
        }
    }
}

/// A local domain object that can be turned into an outbound sync record.
pub trait Syncable {
    /// Sync identity of the object, as UUID bytes.
    fn sync_uuid(&self) -> Option<&[i64]>;

    /// When the object was created locally.
    fn created(&self) -> Option<DateTime<Utc>>;
}

/// The envelope every sync record carries.
///
/// The kind is fixed when the record is built and cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRecord {
    pub object_id: Option<Vec<i64>>,
    pub device_id: Option<Vec<i64>>,
    /// Raw action code; see [`SyncAction`]
    pub action: Option<i64>,
    /// Last known sync time in unix seconds
    pub sync_timestamp: Option<UnixSeconds>,
    kind: RecordKind,
}

impl BaseRecord {
    /// Create an empty record of the given kind.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            object_id: None,
            device_id: None,
            action: None,
            sync_timestamp: None,
            kind,
        }
    }

    /// Build the envelope for an outbound change to a local object.
    ///
    /// The initial sync timestamp is the object's creation time, or `now`
    /// when it has none. It is replaced later by [`BaseRecord::resolve`].
    pub fn from_local(
        record: &impl Syncable,
        kind: RecordKind,
        device_id: Option<Vec<i64>>,
        action: Option<SyncAction>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            object_id: record.sync_uuid().map(<[i64]>::to_vec),
            device_id,
            action: action.map(|a| a.code()),
            sync_timestamp: Some(record.created().unwrap_or(now).timestamp()),
            kind,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The action as a known [`SyncAction`], if the code is one.
    pub fn sync_action(&self) -> Option<SyncAction> {
        self.action.and_then(SyncAction::from_code)
    }

    /// Sync timestamp as a native date.
    pub fn sync_native_timestamp(&self) -> Option<DateTime<Utc>> {
        wire::native_time(self.sync_timestamp)
    }

    /// Apply the timestamp the sync service resolved this record at.
    pub fn resolve(&mut self, sync_timestamp: UnixSeconds) {
        self.sync_timestamp = Some(sync_timestamp);
    }

    /// Decode the shared fields of a payload as a record of `kind`.
    ///
    /// An `objectData` tag must name a known kind but is not checked
    /// against `kind`; the caller's kind wins.
    pub(crate) fn decode_object(obj: &WireObject, kind: RecordKind) -> Result<Self> {
        object_data_kind(obj)?;

        Ok(Self {
            object_id: wire::legacy_int_seq(obj, keys::OBJECT_ID),
            device_id: wire::optional_int_seq(obj, keys::DEVICE_ID)?,
            action: wire::optional_i64(obj, keys::ACTION)?,
            sync_timestamp: wire::optional_i64(obj, keys::SYNC_TIMESTAMP)?,
            kind,
        })
    }

    /// Write the shared fields at the top level of `obj`.
    pub(crate) fn encode_into(&self, obj: &mut WireObject) {
        wire::put(obj, keys::OBJECT_ID, self.object_id.clone());
        wire::put(obj, keys::DEVICE_ID, self.device_id.clone());
        wire::put(obj, keys::ACTION, self.action);
        wire::put(obj, keys::OBJECT_DATA, self.kind.object_data_tag());
        wire::put(obj, keys::SYNC_TIMESTAMP, self.sync_timestamp);
    }
}

/// Read the `objectData` discriminator of a payload, if it has one.
pub(crate) fn object_data_kind(obj: &WireObject) -> Result<Option<RecordKind>> {
    wire::optional_string(obj, keys::OBJECT_DATA)?
        .map(|tag| tag.parse())
        .transpose()
}
