//! Device sync records.
//!
//! Devices are synced as preferences. Unlike bookmarks they never carry the
//! generic `objectData` tag; their fields live under a private `Device` key.

use crate::{
    base::{BaseRecord, SyncAction, Syncable},
    error::Result,
    wire::{self, WireObject, WireValue},
    RecordKind,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod keys {
    pub const NAME: &str = "name";
}

/// A device registered in the sync chain, as stored on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDevice {
    pub sync_uuid: Option<Vec<i64>>,
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl Syncable for LocalDevice {
    fn sync_uuid(&self) -> Option<&[i64]> {
        self.sync_uuid.as_deref()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

/// A synced device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub base: BaseRecord,
    pub name: Option<String>,
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRecord {
    pub fn new() -> Self {
        Self {
            base: BaseRecord::new(RecordKind::Device),
            name: None,
        }
    }

    pub fn from_local(
        device: &LocalDevice,
        device_id: Option<Vec<i64>>,
        action: Option<SyncAction>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            base: BaseRecord::from_local(device, RecordKind::Device, device_id, action, now),
            name: device.name.clone(),
        }
    }

    pub fn decode(value: &WireValue) -> Result<Self> {
        let obj = wire::as_object(value, "payload")?;
        let base = BaseRecord::decode_object(obj, RecordKind::Device)?;
        let name = match wire::optional_object(obj, RecordKind::Device.nesting_key())? {
            Some(device) => wire::optional_string(device, keys::NAME)?,
            None => None,
        };

        Ok(Self { base, name })
    }

    pub fn encode(&self) -> WireValue {
        WireValue::Object(self.dictionary_representation())
    }

    /// Key-value projection for logging and export.
    pub fn dictionary_representation(&self) -> WireObject {
        let mut device = WireObject::new();
        wire::put(&mut device, keys::NAME, self.name.clone());

        let mut dictionary = WireObject::new();
        self.base.encode_into(&mut dictionary);
        dictionary.insert(
            RecordKind::Device.nesting_key().to_string(),
            WireValue::Object(device),
        );
        dictionary
    }
}
