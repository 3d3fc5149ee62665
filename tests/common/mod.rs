//! Shared fixtures for the integration tests: canned API payloads in the
//! server's wire shape, and a scripted push connector for driving the live
//! channel without a real websocket.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use opsdeck::bus::{PushConnector, PushSocket};
use opsdeck::{LiveChannel, TransportError};

pub fn job_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "job_code": format!("JOB-{id}"),
        "priority": "normal",
        "customer": "Acme Freight",
        "pickup_site": "Depot North",
        "status": status,
        "sla_minutes_total": 240,
        "last_update_at": "2026-03-01T08:30:00Z"
    })
}

pub fn job_detail_json(id: &str, status: &str) -> Value {
    json!({ "job": job_json(id, status), "driver": null, "vehicle": null })
}

pub fn alert_json(id: &str) -> Value {
    json!({
        "id": id,
        "severity": "high",
        "alert_type": "sla_risk",
        "entity_type": "job",
        "entity_id": "j1",
        "description": "SLA at risk",
        "status": "open",
        "created_at": "2026-03-01T08:00:00Z"
    })
}

pub fn page_json(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "total": total,
        "page": 1,
        "page_size": 50
    })
}

// ---------------------------------------------------------------------------
// Scripted push connection
// ---------------------------------------------------------------------------

struct ScriptedSocket {
    inbound: mpsc::UnboundedReceiver<String>,
}

#[async_trait]
impl PushSocket for ScriptedSocket {
    async fn send_text(&mut self, _text: &str) -> Result<(), TransportError> {
        // Keep-alive probes are irrelevant to these tests.
        Ok(())
    }

    async fn recv_text(&mut self) -> Option<String> {
        self.inbound.recv().await
    }
}

struct ScriptedConnector {
    socket: Mutex<Option<ScriptedSocket>>,
}

#[async_trait]
impl PushConnector for ScriptedConnector {
    async fn open(&self) -> Result<Box<dyn PushSocket>, TransportError> {
        let socket = self
            .socket
            .lock()
            .expect("connector mutex poisoned")
            .take()
            .ok_or_else(|| TransportError::Request("already open".to_string()))?;
        Ok(Box::new(socket))
    }
}

/// A live channel whose "server" is the returned sender: every string sent
/// arrives as one inbound text frame.
pub fn scripted_channel() -> (LiveChannel, mpsc::UnboundedSender<String>) {
    let (server_tx, inbound) = mpsc::unbounded_channel();
    let channel = LiveChannel::new(Box::new(ScriptedConnector {
        socket: Mutex::new(Some(ScriptedSocket { inbound })),
    }));
    (channel, server_tx)
}
