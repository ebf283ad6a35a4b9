//! The sync record sum type and its codec entry points.

use crate::{
    base::{self, BaseRecord},
    error::Result,
    wire::{self, WireObject, WireValue},
    BookmarkRecord, DecodeError, DeviceRecord, RecordKind,
};

/// Any sync record the codec understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRecord {
    Bookmark(BookmarkRecord),
    Device(DeviceRecord),
}

impl SyncRecord {
    /// An empty record of `kind`, or `None` if the kind has no record variant.
    pub fn empty(kind: RecordKind) -> Option<Self> {
        match kind {
            RecordKind::Bookmark => Some(SyncRecord::Bookmark(BookmarkRecord::new())),
            RecordKind::Device => Some(SyncRecord::Device(DeviceRecord::new())),
            RecordKind::Site => None,
        }
    }

    /// Decode a payload known to hold a record of `kind`.
    pub fn decode(payload: &WireValue, kind: RecordKind) -> Result<Self> {
        match kind {
            RecordKind::Bookmark => BookmarkRecord::decode(payload).map(SyncRecord::Bookmark),
            RecordKind::Device => DeviceRecord::decode(payload).map(SyncRecord::Device),
            RecordKind::Site => Err(DecodeError::UnsupportedKind(kind)),
        }
    }

    /// Decode a payload, taking the kind from the payload itself.
    ///
    /// The `objectData` tag decides. Untagged payloads with a `Device`
    /// object are devices, since devices never carry the tag.
    pub fn decode_any(payload: &WireValue) -> Result<Self> {
        let obj = wire::as_object(payload, "payload")?;
        let kind = match base::object_data_kind(obj)? {
            Some(kind) => kind,
            None if obj.contains_key(RecordKind::Device.nesting_key()) => RecordKind::Device,
            None => return Err(DecodeError::MissingKind),
        };
        Self::decode(payload, kind)
    }

    pub fn encode(&self) -> WireValue {
        match self {
            SyncRecord::Bookmark(bookmark) => bookmark.encode(),
            SyncRecord::Device(device) => device.encode(),
        }
    }

    /// Key-value projection for logging and export.
    pub fn dictionary_representation(&self) -> WireObject {
        match self {
            SyncRecord::Bookmark(bookmark) => bookmark.dictionary_representation(),
            SyncRecord::Device(device) => device.dictionary_representation(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.base().kind()
    }

    pub fn base(&self) -> &BaseRecord {
        match self {
            SyncRecord::Bookmark(bookmark) => &bookmark.base,
            SyncRecord::Device(device) => &device.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseRecord {
        match self {
            SyncRecord::Bookmark(bookmark) => &mut bookmark.base,
            SyncRecord::Device(device) => &mut device.base,
        }
    }

    pub fn as_bookmark(&self) -> Option<&BookmarkRecord> {
        match self {
            SyncRecord::Bookmark(bookmark) => Some(bookmark),
            SyncRecord::Device(_) => None,
        }
    }

    pub fn as_device(&self) -> Option<&DeviceRecord> {
        match self {
            SyncRecord::Device(device) => Some(device),
            SyncRecord::Bookmark(_) => None,
        }
    }

    /// Whether the record carries no data at all, as a degraded batch
    /// element does.
    pub fn is_empty(&self) -> bool {
        Self::empty(self.kind()).as_ref() == Some(self)
    }
}

impl From<BookmarkRecord> for SyncRecord {
    fn from(bookmark: BookmarkRecord) -> Self {
        SyncRecord::Bookmark(bookmark)
    }
}

impl From<DeviceRecord> for SyncRecord {
    fn from(device: DeviceRecord) -> Self {
        SyncRecord::Device(device)
    }
}
