//! Job driver/vehicle (re)assignment.
//!
//! The one write path with business-rule consequences: the server gates
//! assignments on driver/vehicle compliance, and a manager override bypasses
//! the gate only with an audited reason. The reason requirement is enforced
//! here, before anything goes on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Job;
use crate::store::kinds::JobsStore;
use crate::transport::{ApiClient, TransportError};

/// Assignment payload. Driver/vehicle identifiers pass through opaquely —
/// compliance is a server-side policy decision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentRequest {
    pub driver_id: Option<String>,
    pub vehicle_id: Option<String>,
    #[serde(rename = "override")]
    pub manager_override: bool,
    pub override_reason: Option<String>,
}

impl AssignmentRequest {
    /// Local pre-flight check: an override without a non-empty reason must
    /// never reach the server.
    fn validate(&self) -> Result<(), AssignError> {
        if self.manager_override
            && self
                .override_reason
                .as_deref()
                .map_or(true, |reason| reason.trim().is_empty())
        {
            return Err(AssignError::OverrideReasonRequired);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AssignError {
    /// Local validation failure; no request was sent.
    #[error("override reason is required when manager override is set")]
    OverrideReasonRequired,
    /// Server rejection (conflict, policy block, unknown job). The message
    /// is the server's, unmodified.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(TransportError),
}

#[derive(Deserialize)]
struct AssignResponse {
    job: Job,
}

pub struct AssignmentCommand {
    client: ApiClient,
}

impl AssignmentCommand {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Validate locally, then POST the assignment. Exactly one request goes
    /// out on a valid payload, none on an invalid one.
    pub async fn submit(
        &self,
        job_id: &str,
        request: &AssignmentRequest,
    ) -> Result<Job, AssignError> {
        request.validate()?;
        let path = format!("/jobs/{job_id}/assign");
        match self.client.post_json::<AssignResponse, _>(&path, request).await {
            Ok(response) => {
                tracing::info!(job_id, "assignment accepted");
                Ok(response.job)
            }
            Err(TransportError::Status { body, .. }) => Err(AssignError::Rejected(body)),
            Err(error) => Err(AssignError::Transport(error)),
        }
    }

    /// Submit, then re-pull the list and detail the assignment affected.
    /// Nothing is refreshed on failure — the store keeps whatever it showed
    /// before the call.
    pub async fn submit_and_refresh(
        &self,
        job_id: &str,
        request: &AssignmentRequest,
        store: &mut JobsStore,
    ) -> Result<Job, AssignError> {
        let job = self.submit(job_id, request).await?;
        store.refresh_list().await;
        store.refresh_detail().await;
        Ok(job)
    }
}
