//! Decoding batches of record payloads.

use crate::{error::Result, DecodeError, RecordKind, SyncRecord, WireValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a batch decode does with an element that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnElementError {
    /// Drop the element.
    Skip,
    /// Replace the element with an empty record of the batch's kind.
    ///
    /// The output keeps the input's length, but a replaced element cannot be
    /// told apart from a genuinely empty record. Use [`decode_each`] when
    /// that matters.
    #[default]
    Default,
    /// Fail the whole batch with the first element error.
    Abort,
}

impl FromStr for OnElementError {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "skip" => Ok(OnElementError::Skip),
            "default" => Ok(OnElementError::Default),
            "abort" => Ok(OnElementError::Abort),
            other => Err(format!("unknown element error policy: {}", other)),
        }
    }
}

/// Decode every payload as a record of `kind`, one result per payload.
pub fn decode_each(payloads: &[WireValue], kind: RecordKind) -> Vec<Result<SyncRecord>> {
    payloads
        .iter()
        .map(|payload| SyncRecord::decode(payload, kind))
        .collect()
}

/// Decode a batch of payloads as records of `kind`.
///
/// Elements decode independently; output order follows input order.
/// Failing elements are handled according to `policy`. A kind without a
/// record variant fails up front, whatever the policy.
pub fn decode_batch(
    payloads: &[WireValue],
    kind: RecordKind,
    policy: OnElementError,
) -> Result<Vec<SyncRecord>> {
    let empty = SyncRecord::empty(kind).ok_or(DecodeError::UnsupportedKind(kind))?;
    let mut records = Vec::with_capacity(payloads.len());

    for (index, result) in decode_each(payloads, kind).into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => match policy {
                OnElementError::Abort => return Err(err),
                OnElementError::Skip => {
                    tracing::debug!(index, %kind, error = %err, "dropping undecodable sync record");
                }
                OnElementError::Default => {
                    tracing::debug!(index, %kind, error = %err, "replacing undecodable sync record with empty record");
                    records.push(empty.clone());
                }
            },
        }
    }

    Ok(records)
}

/// Decode a single payload through the batch rules.
pub fn decode_single(
    payload: &WireValue,
    kind: RecordKind,
    policy: OnElementError,
) -> Result<Vec<SyncRecord>> {
    decode_batch(std::slice::from_ref(payload), kind, policy)
}
