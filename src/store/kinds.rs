//! Relevance tables and list geometry, one row per resource type.
//!
//! These are the only places resource-specific push semantics live. A jobs
//! assignment also flips driver/vehicle status server-side, which is why the
//! fleet tables list `job.updated`; the alerts and audit feeds only move on
//! the global refresh.

use super::{ResourceKind, ResourceStore};
use crate::bus::envelope::kinds;
use crate::model::{
    Alert, AuditEntry, Driver, DriverDetail, Job, JobDetail, Vehicle, VehicleDetail,
};

/// Jobs board.
pub struct Jobs;

impl ResourceKind for Jobs {
    type Item = Job;
    type Detail = JobDetail;

    const PATH: &'static str = "/jobs";
    const PAGE_SIZE: u64 = 50;
    const RELEVANT_KINDS: &'static [&'static str] =
        &[kinds::JOB_CREATED, kinds::JOB_UPDATED, kinds::OPS_REFRESH];

    fn item_id(item: &Job) -> &str {
        &item.id
    }
}

/// Driver roster.
pub struct Drivers;

impl ResourceKind for Drivers {
    type Item = Driver;
    type Detail = DriverDetail;

    const PATH: &'static str = "/drivers";
    const PAGE_SIZE: u64 = 80;
    const RELEVANT_KINDS: &'static [&'static str] = &[
        kinds::DRIVER_UPDATED,
        kinds::JOB_UPDATED,
        kinds::OPS_REFRESH,
    ];

    fn item_id(item: &Driver) -> &str {
        &item.id
    }
}

/// Vehicle fleet.
pub struct Vehicles;

impl ResourceKind for Vehicles {
    type Item = Vehicle;
    type Detail = VehicleDetail;

    const PATH: &'static str = "/vehicles";
    const PAGE_SIZE: u64 = 80;
    const RELEVANT_KINDS: &'static [&'static str] = &[
        kinds::VEHICLE_UPDATED,
        kinds::JOB_UPDATED,
        kinds::OPS_REFRESH,
    ];

    fn item_id(item: &Vehicle) -> &str {
        &item.id
    }
}

/// Alert queue.
pub struct Alerts;

impl ResourceKind for Alerts {
    type Item = Alert;
    type Detail = Alert;

    const PATH: &'static str = "/alerts";
    const PAGE_SIZE: u64 = 80;
    const RELEVANT_KINDS: &'static [&'static str] = &[kinds::OPS_REFRESH];

    fn item_id(item: &Alert) -> &str {
        &item.id
    }
}

/// Audit trail.
pub struct Audit;

impl ResourceKind for Audit {
    type Item = AuditEntry;
    type Detail = AuditEntry;

    const PATH: &'static str = "/audit";
    const PAGE_SIZE: u64 = 100;
    const RELEVANT_KINDS: &'static [&'static str] = &[kinds::OPS_REFRESH];

    fn item_id(item: &AuditEntry) -> &str {
        &item.id
    }
}

pub type JobsStore = ResourceStore<Jobs>;
pub type DriversStore = ResourceStore<Drivers>;
pub type VehiclesStore = ResourceStore<Vehicles>;
pub type AlertsStore = ResourceStore<Alerts>;
pub type AuditStore = ResourceStore<Audit>;
