//! FFI layer for native app shells.
//!
//! This module provides C-compatible functions that can be called from
//! Swift, Kotlin or Dart. All data crosses the boundary as JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `sync_*` functions are allocated by Rust
//! - Caller must free them with `sync_string_free`
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure

use crate::{OnElementError, RecordKind, ResponseEnvelope, SyncRecord, WireValue};
use serde::Serialize;
use std::ffi::{c_char, CStr, CString};

/// Result wrapper for FFI responses.
#[derive(Serialize)]
#[serde(untagged)]
enum FfiResult<T: Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

/// A decoded fetch response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodedResponse {
    records: Vec<WireValue>,
    message: Option<String>,
    arg1: Option<String>,
    last_fetched_timestamp: Option<i64>,
    is_truncated: Option<bool>,
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `sync_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => {
            // String contained null bytes - return error JSON
            let error = CString::new(r#"{"error":"string contained null bytes"}"#).unwrap();
            error.into_raw()
        }
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn error_string(message: impl Into<String>) -> *mut c_char {
    to_c_string(FfiResult::<()>::err(message).to_json())
}

/// Free a string allocated by this library.
///
/// # Safety
/// - `s` must be a valid pointer from a `sync_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn sync_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a raw fetch response into records of one kind.
///
/// # Arguments
/// - `raw`: the response body as received from the sync service
/// - `kind`: record kind wire name (`"Bookmark"` or `"Device"`)
/// - `policy`: `"skip"`, `"default"` or `"abort"`; null means `"default"`
///
/// # Returns
/// JSON string: `{"ok": {"records": [...], "message": ..., "arg1": ...,
/// "lastFetchedTimestamp": ..., "isTruncated": ...}}` or `{"error": "message"}`.
/// Records are in canonical wire form.
///
/// # Safety
/// - `raw`, `kind` and `policy` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `sync_string_free`
#[no_mangle]
pub unsafe extern "C" fn sync_response_decode(
    raw: *const c_char,
    kind: *const c_char,
    policy: *const c_char,
) -> *mut c_char {
    let raw = from_c_string(raw).unwrap_or_default();

    let kind: RecordKind = match from_c_string(kind).map(|k| k.parse::<RecordKind>()) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => return error_string(e.to_string()),
        None => return error_string("invalid kind"),
    };

    let policy = match from_c_string(policy) {
        Some(p) => match p.parse::<OnElementError>() {
            Ok(policy) => policy,
            Err(e) => return error_string(e),
        },
        None => OnElementError::default(),
    };

    let envelope = ResponseEnvelope::parse(&raw);
    let records = match envelope.records(kind, policy) {
        Ok(records) => records,
        Err(e) => return error_string(e.to_string()),
    };

    let response = DecodedResponse {
        records: records.iter().map(SyncRecord::encode).collect(),
        message: envelope.message().map(str::to_string),
        arg1: envelope.arg1().map(str::to_string),
        last_fetched_timestamp: envelope.last_fetched_timestamp(),
        is_truncated: envelope.is_truncated(),
    };
    to_c_string(FfiResult::ok(response).to_json())
}

/// Decode and re-encode one record payload.
///
/// This rewrites legacy shapes (string object ids, flat bookmark fields)
/// into the canonical wire form.
///
/// # Returns
/// JSON string: `{"ok": <payload>}` or `{"error": "message"}`
///
/// # Safety
/// - `payload` and `kind` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `sync_string_free`
#[no_mangle]
pub unsafe extern "C" fn sync_record_normalize(
    payload: *const c_char,
    kind: *const c_char,
) -> *mut c_char {
    let payload = match parse_payload(payload) {
        Ok(p) => p,
        Err(e) => return error_string(e),
    };

    let kind: RecordKind = match from_c_string(kind).map(|k| k.parse::<RecordKind>()) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => return error_string(e.to_string()),
        None => return error_string("invalid kind"),
    };

    match SyncRecord::decode(&payload, kind) {
        Ok(record) => to_c_string(FfiResult::ok(record.encode()).to_json()),
        Err(e) => error_string(e.to_string()),
    }
}

/// Apply the timestamp the sync service resolved a record at.
///
/// The record kind is read from the payload itself.
///
/// # Returns
/// JSON string: `{"ok": <payload>}` or `{"error": "message"}`
///
/// # Safety
/// - `payload` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `sync_string_free`
#[no_mangle]
pub unsafe extern "C" fn sync_record_resolve(
    payload: *const c_char,
    sync_timestamp: i64,
) -> *mut c_char {
    let payload = match parse_payload(payload) {
        Ok(p) => p,
        Err(e) => return error_string(e),
    };

    match SyncRecord::decode_any(&payload) {
        Ok(mut record) => {
            record.base_mut().resolve(sync_timestamp);
            to_c_string(FfiResult::ok(record.encode()).to_json())
        }
        Err(e) => error_string(e.to_string()),
    }
}

unsafe fn parse_payload(ptr: *const c_char) -> Result<WireValue, String> {
    let json = from_c_string(ptr).ok_or_else(|| "invalid payload JSON".to_string())?;
    serde_json::from_str(&json).map_err(|e| format!("parse error: {}", e))
}

/// Get the library version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn sync_records_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    unsafe fn take(result: *mut c_char) -> serde_json::Value {
        let json = CStr::from_ptr(result).to_str().unwrap().to_string();
        sync_string_free(result);
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn ffi_response_decode() {
        unsafe {
            let raw = CString::new(
                r#"{
                    "arg2": [
                        {"objectId": ["1", "2"], "objectData": "Bookmark", "Bookmark": {"syncOrder": "1"}},
                        {"objectId": [3], "Bookmark": {"site": "nope"}}
                    ],
                    "arg3": 1000,
                    "arg4": false
                }"#,
            )
            .unwrap();
            let kind = CString::new("Bookmark").unwrap();

            let result = take(sync_response_decode(raw.as_ptr(), kind.as_ptr(), ptr::null()));
            let ok = &result["ok"];

            assert_eq!(ok["records"].as_array().unwrap().len(), 2);
            assert_eq!(ok["records"][0]["objectId"], serde_json::json!([1, 2]));
            assert_eq!(
                ok["records"][1],
                serde_json::json!({"objectData": "Bookmark", "Bookmark": {}})
            );
            assert_eq!(ok["lastFetchedTimestamp"], 1000);
            assert_eq!(ok["isTruncated"], false);
        }
    }

    #[test]
    fn ffi_response_decode_abort() {
        unsafe {
            let raw = CString::new(r#"{"arg2": [{"Device": 1}]}"#).unwrap();
            let kind = CString::new("Device").unwrap();
            let policy = CString::new("abort").unwrap();

            let result = take(sync_response_decode(raw.as_ptr(), kind.as_ptr(), policy.as_ptr()));
            assert!(result["error"].as_str().unwrap().contains("Device"));
        }
    }

    #[test]
    fn ffi_record_normalize_flat_bookmark() {
        unsafe {
            let payload = CString::new(r#"{"objectId": ["7"], "isFolder": true}"#).unwrap();
            let kind = CString::new("Bookmark").unwrap();

            let result = take(sync_record_normalize(payload.as_ptr(), kind.as_ptr()));
            assert_eq!(
                result["ok"],
                serde_json::json!({
                    "objectId": [7],
                    "objectData": "Bookmark",
                    "Bookmark": {"isFolder": true}
                })
            );
        }
    }

    #[test]
    fn ffi_record_resolve() {
        unsafe {
            let payload =
                CString::new(r#"{"syncTimestamp": 1, "Device": {"name": "Phone"}}"#).unwrap();

            let result = take(sync_record_resolve(payload.as_ptr(), 500));
            assert_eq!(
                result["ok"],
                serde_json::json!({"syncTimestamp": 500, "Device": {"name": "Phone"}})
            );
        }
    }

    #[test]
    fn ffi_version() {
        unsafe {
            let version = sync_records_version();
            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
        }
    }

    #[test]
    fn ffi_error_handling() {
        unsafe {
            let kind = CString::new("Tab").unwrap();
            let raw = CString::new("{}").unwrap();
            let result = take(sync_response_decode(raw.as_ptr(), kind.as_ptr(), ptr::null()));
            assert!(result.get("error").is_some());

            let result = take(sync_record_normalize(ptr::null(), ptr::null()));
            assert!(result.get("error").is_some());

            let invalid = CString::new("not valid json").unwrap();
            let result = take(sync_record_resolve(invalid.as_ptr(), 1));
            assert!(result.get("error").is_some());
        }
    }
}
