//! JSON wire format for diffs and events.

use crate::{CodecError, Diff, Event};

pub fn encode_diff(diff: &Diff) -> Result<String, CodecError> {
    Ok(serde_json::to_string(diff)?)
}

pub fn decode_diff(json: &str) -> Result<Diff, CodecError> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_event(event: &Event) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

pub fn decode_event(json: &str) -> Result<Event, CodecError> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_diff_bytes(diff: &Diff) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(diff)?)
}

pub fn decode_diff_bytes(bytes: &[u8]) -> Result<Diff, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}
