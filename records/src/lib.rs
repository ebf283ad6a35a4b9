//! # Sync Records
//!
//! Codec for the records exchanged with a remote bookmark/device sync
//! service.
//!
//! The sync service speaks a loosely-typed JSON format. This crate turns its
//! payloads into typed records and back, reconciling the historical shapes
//! older clients still send.
//!
//! ## Design Principles
//!
//! - **No IO**: the codec never touches network, disk or platform
//! - **Stateless**: every call is a pure function of its input, safe from any thread
//! - **Tolerant**: absent optional fields are never errors, and batch decode
//!   degrades per element instead of failing the whole response
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! Every record embeds a [`BaseRecord`] (object id, device id, action, sync
//! timestamp and a fixed [`RecordKind`]) and adds its own fields:
//! - [`BookmarkRecord`] - folder flag, parent folder, ordering and a [`Site`]
//! - [`DeviceRecord`] - display name
//!
//! [`SyncRecord`] is the sum of the two and the main codec entry point.
//!
//! ### Wire layout
//!
//! Base fields sit at the top level of a payload. Variant fields nest under
//! a key named after the kind (`"Bookmark"`, `"Device"`). Bookmarks also
//! carry the generic `"objectData"` tag; devices never do.
//!
//! ### Responses
//!
//! A fetch call returns a [`ResponseEnvelope`]: a batch of raw payloads plus
//! pagination metadata. [`decode_batch`] turns the batch into records,
//! handling failing elements per [`OnElementError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sync_records::{OnElementError, RecordKind, ResponseEnvelope, SyncRecord};
//!
//! let envelope = ResponseEnvelope::parse(r#"{
//!     "arg2": [{
//!         "objectId": ["1", "2"],
//!         "objectData": "Bookmark",
//!         "syncTimestamp": 1600000000,
//!         "Bookmark": {"syncOrder": "1.1", "site": {"title": "Rust"}}
//!     }],
//!     "arg4": false
//! }"#);
//!
//! let records = envelope
//!     .records(RecordKind::Bookmark, OnElementError::Default)
//!     .unwrap();
//! let bookmark = records[0].as_bookmark().unwrap();
//! assert_eq!(bookmark.base.object_id, Some(vec![1, 2]));
//!
//! // Re-encode in canonical form
//! let payload = records[0].encode();
//! assert_eq!(payload["objectId"], serde_json::json!([1, 2]));
//! assert_eq!(SyncRecord::decode_any(&payload).unwrap(), records[0]);
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module provides C-compatible functions for native app shells.
//! All data is exchanged as JSON strings.

pub mod base;
pub mod batch;
pub mod bookmark;
pub mod device;
pub mod error;
pub mod ffi;
pub mod kind;
pub mod record;
pub mod response;
pub mod site;
pub mod wire;

// Re-export main types at crate root
pub use base::{BaseRecord, SyncAction, Syncable};
pub use batch::{decode_batch, decode_each, decode_single, OnElementError};
pub use bookmark::{BookmarkRecord, LocalBookmark};
pub use device::{DeviceRecord, LocalDevice};
pub use error::DecodeError;
pub use kind::RecordKind;
pub use record::SyncRecord;
pub use response::ResponseEnvelope;
pub use site::Site;
pub use wire::{WireObject, WireValue};

/// Wire timestamps are whole seconds since the unix epoch.
pub type UnixSeconds = i64;
