//! Record kind discriminator.

use crate::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which concrete sync entity a payload represents.
///
/// The wire name doubles as the key the variant nests its own fields under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Bookmark,
    Device,
    Site,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Bookmark, RecordKind::Device, RecordKind::Site];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Bookmark => "Bookmark",
            RecordKind::Device => "Device",
            RecordKind::Site => "Site",
        }
    }

    /// Key under which a record of this kind nests its variant fields.
    pub fn nesting_key(&self) -> &'static str {
        self.as_str()
    }

    /// Value written to the generic `objectData` tag, if this kind emits one.
    ///
    /// Devices are synced as preferences and use their private nesting key
    /// only, so they never carry the generic tag.
    pub fn object_data_tag(&self) -> Option<&'static str> {
        match self {
            RecordKind::Device => None,
            RecordKind::Bookmark | RecordKind::Site => Some(self.as_str()),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownKind(s.to_string()))
    }
}
