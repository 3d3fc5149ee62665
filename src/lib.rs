//! Live synchronization core for a dispatch operations console.
//!
//! The console lists and edits jobs, drivers, vehicles, alerts, and an audit
//! trail, and reflects server-pushed events without a full reload. This crate
//! is the state layer underneath those screens:
//!
//! - `transport`: thin request/response wrapper over the ops REST API
//! - `bus`: the live event channel — one push connection, normalized
//!   envelopes, process-wide fan-out
//! - `store`: per-resource paginated query stores with table-driven push
//!   relevance and latest-wins response handling
//! - `commands`: one-shot write paths (job assignment, alert ack/resolve)
//! - `views`: derived read-only aggregations (overview tiles, jobs report)
//! - `model`: typed resource snapshots returned by the API
//!
//! Rendering, navigation, and authentication live elsewhere; everything here
//! is plain state that a frontend can poll or observe.

pub mod bus;
pub mod commands;
pub mod config;
pub mod model;
pub mod store;
pub mod telemetry;
pub mod transport;
pub mod views;

pub use bus::{ChannelMessage, Envelope, LiveChannel};
pub use config::Config;
pub use store::ResourceStore;
pub use transport::{ApiClient, TransportError};
