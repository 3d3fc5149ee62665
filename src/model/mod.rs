//! Typed resource snapshots returned by the ops API.
//!
//! Resources are immutable snapshots: stores replace them wholesale on
//! refetch and never patch individual fields from push payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    /// Total page count, clamped to at least one page.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size).max(1)
    }
}

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Unassigned,
    Assigned,
    InProgress,
    Late,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    Normal,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    OnDuty,
    OnJob,
    Idle,
    OffDuty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InUse,
    DueService,
    OutOfService,
}

/// Compliance gate consulted by the assignment rules. Advisory on the client
/// side; the server is the enforcement point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    Ok,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_code: String,
    pub priority: JobPriority,
    pub customer: String,
    #[serde(default)]
    pub pickup_site: Option<String>,
    #[serde(default)]
    pub drop_site: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub eta_at: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub sla_minutes_total: i64,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub exceptions: Option<String>,
    #[serde(default)]
    pub owner_user_id: Option<String>,
    pub last_update_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub depot: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub status: DriverStatus,
    pub hours_today: i64,
    pub hours_week: i64,
    pub compliance_state: ComplianceState,
    pub last_update_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub registration: String,
    #[serde(default)]
    pub fleet_id: Option<String>,
    #[serde(default)]
    pub vehicle_class: Option<String>,
    #[serde(default)]
    pub depot: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub status: VehicleStatus,
    #[serde(default)]
    pub next_service_date: Option<NaiveDate>,
    pub faults_open: i64,
    pub compliance_state: ComplianceState,
    pub last_update_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub severity: AlertSeverity,
    pub alert_type: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub owner_user_id: Option<String>,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_by: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    #[serde(default)]
    pub actor_user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub before_json: Option<String>,
    #[serde(default)]
    pub after_json: Option<String>,
    pub source: String,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Detail records
// ---------------------------------------------------------------------------

/// Job detail pane: the job plus its assigned driver/vehicle snapshots.
/// Owned by the jobs store and superseded wholesale on refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub job: Job,
    #[serde(default)]
    pub driver: Option<Driver>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDetail {
    pub driver: Driver,
    #[serde(default)]
    pub current_job: Option<Job>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    #[serde(default)]
    pub current_job: Option<Job>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ComplianceState, Job, JobStatus, Page};

    #[test]
    fn page_count_is_ceil_and_at_least_one() {
        let page = Page::<()> {
            items: vec![],
            total: 0,
            page: 1,
            page_size: 50,
        };
        assert_eq!(page.page_count(), 1);

        let page = Page::<()> {
            items: vec![(), ()],
            total: 101,
            page: 1,
            page_size: 50,
        };
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn job_deserializes_from_server_shape() {
        let job: Job = serde_json::from_value(json!({
            "id": "7b2d",
            "job_code": "JOB-1001",
            "priority": "critical",
            "customer": "Acme Freight",
            "pickup_site": "Depot North",
            "drop_site": null,
            "status": "in_progress",
            "sla_minutes_total": 240,
            "driver_id": "d-1",
            "exceptions": "temp_excursion",
            "last_update_at": "2026-03-01T08:30:00Z"
        }))
        .expect("job should deserialize");

        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.drop_site, None);
        assert_eq!(job.vehicle_id, None);
        assert_eq!(job.exceptions.as_deref(), Some("temp_excursion"));
    }

    #[test]
    fn compliance_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ComplianceState::Blocked).expect("serialize"),
            "\"blocked\""
        );
    }
}
