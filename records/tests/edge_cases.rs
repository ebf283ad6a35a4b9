//! Edge case tests for sync-records
//!
//! These tests cover legacy wire shapes, partial payloads and degraded
//! batches as the sync service actually delivers them.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use sync_records::{
    decode_batch, decode_each, BookmarkRecord, DecodeError, DeviceRecord, LocalBookmark,
    LocalDevice, OnElementError, RecordKind, ResponseEnvelope, Site, SyncAction, SyncRecord,
    WireValue,
};

fn full_bookmark() -> BookmarkRecord {
    let mut bookmark = BookmarkRecord::new();
    bookmark.base.object_id = Some(vec![12, 200, 3, 45]);
    bookmark.base.device_id = Some(vec![2]);
    bookmark.base.action = Some(SyncAction::Update.code());
    bookmark.base.sync_timestamp = Some(1_600_000_000);
    bookmark.is_folder = Some(false);
    bookmark.parent_folder_object_id = Some(vec![7, 7, 7]);
    bookmark.sync_order = Some("1.0.4".into());
    bookmark.site = Some(Site {
        custom_title: Some("Docs".into()),
        title: Some("The Rust Programming Language".into()),
        favicon: Some("https://doc.rust-lang.org/favicon.ico".into()),
        location: Some("https://doc.rust-lang.org/book/".into()),
        creation_time: Some(1_500_000_000),
        last_accessed_time: Some(1_550_000_000),
    });
    bookmark
}

fn full_device() -> DeviceRecord {
    let mut device = DeviceRecord::new();
    device.base.object_id = Some(vec![1, 2, 3]);
    device.base.device_id = Some(vec![0]);
    device.base.action = Some(SyncAction::Create.code());
    device.base.sync_timestamp = Some(1_600_000_123);
    device.name = Some("Work laptop".into());
    device
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn bookmark_round_trip_ignores_favorite() {
    let mut bookmark = full_bookmark();
    bookmark.is_favorite = true;

    let decoded = BookmarkRecord::decode(&bookmark.encode()).unwrap();

    assert!(!decoded.is_favorite);
    bookmark.is_favorite = false;
    assert_eq!(decoded, bookmark);
}

#[test]
fn device_round_trip() {
    let device = full_device();
    let decoded = SyncRecord::decode(&device.encode(), RecordKind::Device).unwrap();
    assert_eq!(decoded, SyncRecord::Device(device));
}

#[test]
fn outbound_record_round_trip() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let local = LocalBookmark {
        sync_uuid: Some(vec![4, 4]),
        title: Some("News".into()),
        url: Some("https://news.example/".into()),
        created: Some(Utc.timestamp_opt(1_600_000_000, 0).unwrap()),
        is_folder: Some(false),
        ..LocalBookmark::default()
    };

    let record = BookmarkRecord::from_local(&local, Some(vec![1]), Some(SyncAction::Create), now);
    let decoded = BookmarkRecord::decode(&record.encode()).unwrap();

    assert_eq!(decoded, record);
    assert_eq!(decoded.base.sync_timestamp, Some(1_600_000_000));
}

// ============================================================================
// Legacy Shapes
// ============================================================================

#[test]
fn string_object_ids_match_integer_object_ids() {
    let strings = json!({"objectId": ["1", "2", "3"], "Bookmark": {}});
    let integers = json!({"objectId": [1, 2, 3], "Bookmark": {}});

    assert_eq!(
        SyncRecord::decode(&strings, RecordKind::Bookmark).unwrap(),
        SyncRecord::decode(&integers, RecordKind::Bookmark).unwrap()
    );
    assert_eq!(
        SyncRecord::decode(&strings, RecordKind::Device).unwrap(),
        SyncRecord::decode(&integers, RecordKind::Device).unwrap()
    );
}

#[test]
fn unusable_object_id_is_absent_not_an_error() {
    for object_id in [json!("123"), json!({"a": 1}), json!([1, "2"]), json!(true)] {
        let record =
            SyncRecord::decode(&json!({"objectId": object_id}), RecordKind::Bookmark).unwrap();
        assert_eq!(record.base().object_id, None);
    }
}

#[test]
fn flat_bookmark_payload() {
    let flat = json!({
        "objectId": [5],
        "objectData": "Bookmark",
        "isFolder": true,
        "syncOrder": "2",
        "site": {"title": "Folder"}
    });

    let bookmark = BookmarkRecord::decode(&flat).unwrap();
    assert_eq!(bookmark.is_folder, Some(true));
    assert_eq!(bookmark.site.unwrap().title.as_deref(), Some("Folder"));
}

#[test]
fn full_bookmark_flat_form_decodes_identically() {
    let bookmark = full_bookmark();
    assert_eq!(BookmarkRecord::decode(&bookmark.encode_flat()).unwrap(), bookmark);
}

// ============================================================================
// Partial Payloads
// ============================================================================

#[test]
fn empty_payload_for_every_variant() {
    let bookmark = BookmarkRecord::decode(&json!({})).unwrap();
    assert_eq!(bookmark, BookmarkRecord::new());
    assert_eq!(bookmark.base.object_id, None);
    assert_eq!(bookmark.base.sync_timestamp, None);
    assert_eq!(bookmark.site, None);

    let device = DeviceRecord::decode(&json!({})).unwrap();
    assert_eq!(device, DeviceRecord::new());
    assert_eq!(device.name, None);
}

#[test]
fn null_fields_are_absent() {
    let record = SyncRecord::decode(
        &json!({
            "objectId": null,
            "deviceId": null,
            "action": null,
            "objectData": null,
            "syncTimestamp": null,
            "Bookmark": {"site": null, "isFolder": null}
        }),
        RecordKind::Bookmark,
    )
    .unwrap();
    assert!(record.is_empty());
}

#[test]
fn wrong_type_for_nested_object_fails() {
    let err = SyncRecord::decode(&json!({"Bookmark": 3}), RecordKind::Bookmark).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed { .. }));

    let err = SyncRecord::decode(&json!({"Device": []}), RecordKind::Device).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Malformed {
            field: "Device".into(),
            expected: "object",
            got: "array",
        }
    );
}

// ============================================================================
// Kind Tag
// ============================================================================

#[test]
fn device_never_emits_kind_tag() {
    let encoded = full_device().encode();
    assert!(encoded.get("objectData").is_none());
    assert_eq!(encoded["Device"]["name"], "Work laptop");

    let empty = DeviceRecord::new().encode();
    assert!(empty.get("objectData").is_none());
}

#[test]
fn bookmark_always_emits_kind_tag() {
    assert_eq!(full_bookmark().encode()["objectData"], "Bookmark");
    assert_eq!(BookmarkRecord::new().encode()["objectData"], "Bookmark");
    assert_eq!(
        BookmarkRecord::new().encode(),
        json!({"objectData": "Bookmark", "Bookmark": {}})
    );
}

#[test]
fn dictionary_representation_matches_wire_form() {
    let record = SyncRecord::Bookmark(full_bookmark());
    assert_eq!(
        WireValue::Object(record.dictionary_representation()),
        record.encode()
    );
}

// ============================================================================
// Batches
// ============================================================================

#[test]
fn batch_degrades_malformed_element() {
    let payloads = vec![
        full_bookmark().encode(),
        json!({"objectId": [9], "syncTimestamp": "soon"}),
        json!({"objectId": [10], "Bookmark": {"syncOrder": "3"}}),
    ];

    let records = decode_batch(&payloads, RecordKind::Bookmark, OnElementError::Default).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], SyncRecord::Bookmark(full_bookmark()));
    assert_eq!(records[1], SyncRecord::Bookmark(BookmarkRecord::new()));
    assert_eq!(records[2].base().object_id, Some(vec![10]));
}

#[test]
fn batch_of_devices_with_foreign_element() {
    let payloads = vec![
        full_device().encode(),
        full_bookmark().encode(),
        json!("not an object"),
    ];

    let results = decode_each(&payloads, RecordKind::Device);
    assert!(results[0].is_ok());
    assert!(results[2].is_err());

    // The requested kind wins over the tag; only the shared fields survive.
    let foreign = results[1].as_ref().unwrap().as_device().unwrap();
    assert_eq!(foreign.base.object_id, Some(vec![12, 200, 3, 45]));
    assert_eq!(foreign.base.sync_timestamp, Some(1_600_000_000));
    assert_eq!(foreign.name, None);

    let kept = decode_batch(&payloads, RecordKind::Device, OnElementError::Skip).unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0], SyncRecord::Device(full_device()));
    assert_eq!(kept[1].kind(), RecordKind::Device);
}

// ============================================================================
// Envelope
// ============================================================================

#[test]
fn envelope_from_garbage() {
    for raw in ["not json", "", "null", "42", "\"text\"", "{\"arg2\": 5}"] {
        let envelope = ResponseEnvelope::parse(raw);
        assert_eq!(envelope.root_elements(), None, "for {:?}", raw);
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.arg1(), None);
        assert_eq!(envelope.last_fetched_timestamp(), None);
        assert_eq!(envelope.is_truncated(), None);
    }
}

#[test]
fn envelope_to_records() {
    let raw = json!({
        "message": "fetch-sync-devices",
        "arg2": [full_device().encode(), {"Device": {"name": ["x"]}}],
        "arg3": 1_600_000_500,
        "arg4": true
    })
    .to_string();

    let envelope = ResponseEnvelope::parse(&raw);
    let records = envelope
        .records(RecordKind::Device, OnElementError::Default)
        .unwrap();

    assert_eq!(envelope.is_truncated(), Some(true));
    assert_eq!(envelope.last_fetched_timestamp(), Some(1_600_000_500));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], SyncRecord::Device(full_device()));
    assert!(records[1].is_empty());
}

// ============================================================================
// Timestamps
// ============================================================================

#[test]
fn native_dates() {
    let site = Site {
        creation_time: Some(1000),
        ..Site::default()
    };
    assert_eq!(site.creation_native_date(), DateTime::from_timestamp(1000, 0));
    assert_eq!(site.last_accessed_native_date(), None);
    assert_eq!(Site::default().creation_native_date(), None);
}

#[test]
fn resolve_updates_sync_timestamp_only() {
    let now = Utc.timestamp_opt(1_000, 0).unwrap();
    let local = LocalDevice {
        sync_uuid: Some(vec![3]),
        name: Some("Phone".into()),
        created: None,
    };
    let mut record = SyncRecord::from(DeviceRecord::from_local(&local, None, None, now));
    let before = record.clone();

    record.base_mut().resolve(2_000);

    assert_eq!(record.base().sync_timestamp, Some(2_000));
    assert_eq!(
        record.base().sync_native_timestamp(),
        DateTime::from_timestamp(2_000, 0)
    );
    assert_eq!(record.as_device().unwrap().name, before.as_device().unwrap().name);
    assert_eq!(record.base().object_id, before.base().object_id);
}

// ============================================================================
// Value Edge Cases
// ============================================================================

#[test]
fn unicode_strings() {
    let names = ["日本語テスト", "Привет мир", "🎉🚀💯", "Hello\nWorld\tTab", ""];

    for name in names {
        let mut device = DeviceRecord::new();
        device.name = Some(name.to_string());
        let decoded = DeviceRecord::decode(&device.encode()).unwrap();
        assert_eq!(decoded.name.as_deref(), Some(name));
    }
}

#[test]
fn integer_boundaries() {
    for value in [i64::MIN, i64::MAX, 0, -1] {
        let record = SyncRecord::decode(
            &json!({"syncTimestamp": value, "action": value}),
            RecordKind::Device,
        )
        .unwrap();
        assert_eq!(record.base().sync_timestamp, Some(value));
        assert_eq!(record.base().action, Some(value));
        assert_eq!(record.base().sync_action(), SyncAction::from_code(value));
    }
}

#[test]
fn float_timestamp_is_malformed() {
    let err = SyncRecord::decode(&json!({"syncTimestamp": 1.5}), RecordKind::Device).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Malformed {
            field: "syncTimestamp".into(),
            expected: "integer",
            got: "number",
        }
    );
}
