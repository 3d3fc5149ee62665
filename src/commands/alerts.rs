//! Alert acknowledge / resolve commands.

use serde::{Deserialize, Serialize};

use crate::model::Alert;
use crate::transport::{ApiClient, TransportError};

#[derive(Serialize)]
struct ResolveBody<'a> {
    reason_code: &'a str,
}

#[derive(Deserialize)]
struct AlertResponse {
    alert: Alert,
}

pub struct AlertCommand {
    client: ApiClient,
}

impl AlertCommand {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Mark an open alert acknowledged.
    pub async fn acknowledge(&self, alert_id: &str) -> Result<Alert, TransportError> {
        let path = format!("/alerts/{alert_id}/ack");
        let response: AlertResponse = self.client.post_json(&path, &serde_json::json!({})).await?;
        Ok(response.alert)
    }

    /// Resolve an alert with a reason code for the audit trail.
    pub async fn resolve(
        &self,
        alert_id: &str,
        reason_code: &str,
    ) -> Result<Alert, TransportError> {
        let path = format!("/alerts/{alert_id}/resolve");
        let response: AlertResponse = self
            .client
            .post_json(&path, &ResolveBody { reason_code })
            .await?;
        Ok(response.alert)
    }
}
