//! Assignment command flow against a mock ops API: local override
//! validation, server rejection, and the success-path refetch.

mod common;

use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use opsdeck::commands::{AssignError, AssignmentCommand, AssignmentRequest};
use opsdeck::store::kinds::JobsStore;
use opsdeck::{ApiClient, ResourceStore};

use common::{job_detail_json, job_json, page_json};

/// An override without a reason fails locally; the server never hears about
/// it.
#[tokio::test]
async fn invalid_override_sends_nothing() {
    let server = MockServer::start();
    let assign = server.mock(|when, then| {
        when.method(POST).path("/jobs/j1/assign");
        then.status(200).json_body(json!({ "job": job_json("j1", "assigned") }));
    });

    let command = AssignmentCommand::new(ApiClient::new(server.base_url()));
    let request = AssignmentRequest {
        driver_id: Some("d-2".to_string()),
        manager_override: true,
        override_reason: None,
        ..Default::default()
    };

    let result = command.submit("j1", &request).await;
    assert!(matches!(result, Err(AssignError::OverrideReasonRequired)));
    assign.assert_hits(0);
}

/// A valid payload goes out exactly once, with the wire field names the
/// server expects.
#[tokio::test]
async fn valid_assignment_posts_exactly_once() {
    let server = MockServer::start();
    let assign = server.mock(|when, then| {
        when.method(POST).path("/jobs/j1/assign").json_body(json!({
            "driver_id": "d-2",
            "vehicle_id": null,
            "override": true,
            "override_reason": "customer escalation"
        }));
        then.status(200).json_body(json!({ "job": job_json("j1", "assigned") }));
    });

    let command = AssignmentCommand::new(ApiClient::new(server.base_url()));
    let request = AssignmentRequest {
        driver_id: Some("d-2".to_string()),
        vehicle_id: None,
        manager_override: true,
        override_reason: Some("customer escalation".to_string()),
    };

    let job = command.submit("j1", &request).await.expect("assignment accepted");
    assert_eq!(job.id, "j1");
    assign.assert_hits(1);
}

/// A server rejection surfaces its message verbatim and leaves the store
/// exactly as it was: no refetch, same detail.
#[tokio::test]
async fn rejection_leaves_the_store_untouched() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/jobs");
        then.status(200)
            .json_body(page_json(vec![job_json("j1", "unassigned")]));
    });
    let detail = server.mock(|when, then| {
        when.method(GET).path("/jobs/j1");
        then.status(200).json_body(job_detail_json("j1", "unassigned"));
    });
    server.mock(|when, then| {
        when.method(POST).path("/jobs/j1/assign");
        then.status(409).body("Driver is not compliant");
    });

    let mut store: JobsStore = ResourceStore::new(ApiClient::new(server.base_url()));
    store.refresh_list().await;
    let before = store.detail().cloned().expect("detail loaded");

    let command = AssignmentCommand::new(ApiClient::new(server.base_url()));
    let request = AssignmentRequest {
        driver_id: Some("d-9".to_string()),
        ..Default::default()
    };

    let result = command.submit_and_refresh("j1", &request, &mut store).await;
    match result {
        Err(AssignError::Rejected(message)) => {
            assert_eq!(message, "Driver is not compliant");
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    assert_eq!(store.detail(), Some(&before));
    list.assert_hits(1);
    detail.assert_hits(1);
}

/// An accepted assignment re-pulls the list and the selected detail so the
/// operator sees the post-assignment state.
#[tokio::test]
async fn accepted_assignment_refreshes_list_and_detail() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/jobs");
        then.status(200)
            .json_body(page_json(vec![job_json("j1", "assigned")]));
    });
    let detail = server.mock(|when, then| {
        when.method(GET).path("/jobs/j1");
        then.status(200).json_body(job_detail_json("j1", "assigned"));
    });
    server.mock(|when, then| {
        when.method(POST).path("/jobs/j1/assign");
        then.status(200).json_body(json!({ "job": job_json("j1", "assigned") }));
    });

    let mut store: JobsStore = ResourceStore::new(ApiClient::new(server.base_url()));
    store.refresh_list().await;
    list.assert_hits(1);
    detail.assert_hits(1);

    let command = AssignmentCommand::new(ApiClient::new(server.base_url()));
    let request = AssignmentRequest {
        driver_id: Some("d-2".to_string()),
        ..Default::default()
    };

    let job = command
        .submit_and_refresh("j1", &request, &mut store)
        .await
        .expect("assignment accepted");

    assert_eq!(job.status, opsdeck::model::JobStatus::Assigned);
    list.assert_hits(2);
    detail.assert_hits(2);
}
