//! Response envelope returned by sync fetch calls.
//!
//! The sync service reuses one callback shape for every call, so most keys
//! are positional (`arg1`..`arg4`). They are mapped to descriptive names
//! where their meaning is fixed.

use crate::{
    batch::{self, OnElementError},
    error::Result,
    wire::{self, WireObject, WireValue},
    RecordKind, SyncRecord,
};

mod keys {
    pub const ROOT_ELEMENTS: &str = "arg2";
    pub const MESSAGE: &str = "message";
    pub const ARG1: &str = "arg1";
    pub const LAST_FETCHED_TIMESTAMP: &str = "arg3";
    pub const IS_TRUNCATED: &str = "arg4";
}

/// A batch of raw record payloads plus pagination metadata.
///
/// Construction never fails: anything that is not the expected shape reads
/// as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    root_elements: Option<Vec<WireValue>>,
    message: Option<String>,
    arg1: Option<String>,
    last_fetched_timestamp: Option<i64>,
    is_truncated: Option<bool>,
}

impl ResponseEnvelope {
    /// Parse a raw response string.
    pub fn parse(raw: &str) -> Self {
        let value = serde_json::from_str::<WireValue>(raw).ok();
        Self::from_object(value.as_ref())
    }

    /// Build from an already decoded response.
    pub fn from_object(object: Option<&WireValue>) -> Self {
        let Some(obj) = object.and_then(WireValue::as_object) else {
            return Self::default();
        };

        Self {
            root_elements: obj
                .get(keys::ROOT_ELEMENTS)
                .and_then(WireValue::as_array)
                .filter(|elements| elements.iter().all(WireValue::is_object))
                .cloned(),
            message: string_field(obj, keys::MESSAGE),
            arg1: string_field(obj, keys::ARG1),
            last_fetched_timestamp: obj
                .get(keys::LAST_FETCHED_TIMESTAMP)
                .and_then(WireValue::as_i64),
            is_truncated: obj.get(keys::IS_TRUNCATED).and_then(WireValue::as_bool),
        }
    }

    /// Record payloads, each guaranteed to be an object.
    pub fn root_elements(&self) -> Option<&[WireValue]> {
        self.root_elements.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn arg1(&self) -> Option<&str> {
        self.arg1.as_deref()
    }

    pub fn last_fetched_timestamp(&self) -> Option<i64> {
        self.last_fetched_timestamp
    }

    pub fn is_truncated(&self) -> Option<bool> {
        self.is_truncated
    }

    /// Decode the root elements as records of `kind`.
    ///
    /// An envelope without root elements yields no records.
    pub fn records(&self, kind: RecordKind, policy: OnElementError) -> Result<Vec<SyncRecord>> {
        batch::decode_batch(self.root_elements().unwrap_or_default(), kind, policy)
    }

    /// Project back onto the positional wire keys.
    pub fn to_wire(&self) -> WireValue {
        let mut obj = WireObject::new();
        wire::put(&mut obj, keys::ROOT_ELEMENTS, self.root_elements.clone());
        wire::put(&mut obj, keys::MESSAGE, self.message.clone());
        wire::put(&mut obj, keys::ARG1, self.arg1.clone());
        wire::put(&mut obj, keys::LAST_FETCHED_TIMESTAMP, self.last_fetched_timestamp);
        wire::put(&mut obj, keys::IS_TRUNCATED, self.is_truncated);
        WireValue::Object(obj)
    }
}

fn string_field(obj: &WireObject, key: &str) -> Option<String> {
    obj.get(key).and_then(WireValue::as_str).map(str::to_string)
}
