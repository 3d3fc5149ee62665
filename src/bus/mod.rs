//! Live event channel: one push connection fanned out process-wide.
//!
//! Events flow server → socket → [`LiveChannel`] → subscribers:
//! - `envelope`: frame decoding and the event kind vocabulary
//! - `channel`: the connection owner — keep-alive, normalization, broadcast
//!
//! The channel introduces no reordering; every subscriber sees every inbound
//! frame exactly once, in receipt order.

mod channel;
pub mod envelope;

pub use channel::{LiveChannel, PushConnector, PushSocket, WsConnector};
pub use envelope::{ChannelMessage, Envelope};
