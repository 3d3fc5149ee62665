//! Event kind vocabulary and push frame decoding.
//!
//! Single source of truth for the `kind` strings the server pushes and for
//! how raw text frames are normalized before fan-out.

use serde::{Deserialize, Serialize};

/// Event kinds used by the store relevance tables.
pub mod kinds {
    pub const JOB_CREATED: &str = "job.created";
    pub const JOB_UPDATED: &str = "job.updated";
    pub const DRIVER_UPDATED: &str = "driver.updated";
    pub const VEHICLE_UPDATED: &str = "vehicle.updated";
    /// Global catch-all: every consumer should re-derive its state.
    pub const OPS_REFRESH: &str = "ops.refresh";
}

/// Normalized push message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// What subscribers receive: a decoded envelope, or the raw frame text when
/// the payload is not a recognizable event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelMessage {
    Event(Envelope),
    Raw(String),
}

impl ChannelMessage {
    /// Event kind, if this is a decoded event. Raw frames (keep-alive echoes
    /// included) have no kind and can never match a relevance table.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ChannelMessage::Event(envelope) => Some(&envelope.kind),
            ChannelMessage::Raw(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct WireEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Decode one inbound text frame. Non-JSON text and JSON without a `type`
/// field degrade to [`ChannelMessage::Raw`]; decoding itself never fails.
pub fn decode_frame(text: &str) -> ChannelMessage {
    match serde_json::from_str::<WireEvent>(text) {
        Ok(wire) => ChannelMessage::Event(Envelope {
            kind: wire.kind,
            payload: wire.payload,
        }),
        Err(_) => ChannelMessage::Raw(text.to_string()),
    }
}
