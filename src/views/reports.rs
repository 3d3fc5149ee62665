//! Jobs report snapshot.
//!
//! All bucketing (daily/monthly volume, top customers) is precomputed
//! server-side; this view fetches the snapshot and renders it as-is. Date
//! and month labels stay strings — nothing here does calendar math.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::bus::ChannelMessage;
use crate::transport::ApiClient;

pub const MIN_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 730;
const DEFAULT_WINDOW_DAYS: u32 = 180;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportTotals {
    pub all_jobs: u64,
    pub jobs_in_window: u64,
    pub open_jobs: u64,
    pub completed_jobs: u64,
    #[serde(default)]
    pub avg_resolution_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyVolume {
    pub date: String,
    pub created: u64,
    pub completed: u64,
    pub failed: u64,
    pub late: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub created: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerVolume {
    pub customer: String,
    pub jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobsReport {
    pub window_days: u32,
    pub generated_at: String,
    pub totals: ReportTotals,
    pub status_counts: BTreeMap<String, u64>,
    pub priority_counts_window: BTreeMap<String, u64>,
    pub daily_volume: Vec<DailyVolume>,
    pub monthly_volume: Vec<MonthlyVolume>,
    pub top_customers_window: Vec<CustomerVolume>,
}

pub struct Reports {
    client: ApiClient,
    window_days: u32,
    report: Option<JobsReport>,
    last_error: Option<String>,
}

impl Reports {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            window_days: DEFAULT_WINDOW_DAYS,
            report: None,
            last_error: None,
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn report(&self) -> Option<&JobsReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Change the reporting window (clamped to the server's accepted range)
    /// and fetch a fresh snapshot.
    pub async fn set_window_days(&mut self, days: u32) {
        self.window_days = days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS);
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        let query = vec![("days".to_string(), self.window_days.to_string())];
        match self
            .client
            .get_json::<JobsReport>("/reports/jobs", &query)
            .await
        {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// Same coarse event set as the overview tiles.
    pub async fn on_message(&mut self, message: &ChannelMessage) {
        let Some(kind) = message.kind() else {
            return;
        };
        if super::is_coarse_refresh(kind) {
            self.refresh().await;
        }
    }
}
