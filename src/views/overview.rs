//! Overview tiles: coarse existence counts.

use crate::bus::ChannelMessage;
use crate::model::Page;
use crate::transport::{ApiClient, TransportError};

/// The four "today" tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewCounts {
    pub total_jobs: u64,
    pub unassigned_jobs: u64,
    pub late_jobs: u64,
    pub open_alerts: u64,
}

pub struct Overview {
    client: ApiClient,
    counts: OverviewCounts,
    last_error: Option<String>,
}

impl Overview {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            counts: OverviewCounts::default(),
            last_error: None,
        }
    }

    pub fn counts(&self) -> OverviewCounts {
        self.counts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Count-only query: a one-item page where only `total` matters.
    async fn count(
        &self,
        path: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<u64, TransportError> {
        let mut query = vec![
            ("page".to_string(), "1".to_string()),
            ("page_size".to_string(), "1".to_string()),
        ];
        if let Some((name, value)) = filter {
            query.push((name.to_string(), value.to_string()));
        }
        let page: Page<serde_json::Value> = self.client.get_json(path, &query).await?;
        Ok(page.total)
    }

    /// Re-issue every count. On failure the prior tiles stay up with the
    /// error alongside, same as the list stores.
    pub async fn refresh(&mut self) {
        let fetched = async {
            Ok::<_, TransportError>(OverviewCounts {
                total_jobs: self.count("/jobs", None).await?,
                unassigned_jobs: self.count("/jobs", Some(("status", "unassigned"))).await?,
                late_jobs: self.count("/jobs", Some(("status", "late"))).await?,
                open_alerts: self.count("/alerts", Some(("status", "open"))).await?,
            })
        }
        .await;
        match fetched {
            Ok(counts) => {
                self.counts = counts;
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// Any entity event or the global refresh re-derives all tiles.
    pub async fn on_message(&mut self, message: &ChannelMessage) {
        let Some(kind) = message.kind() else {
            return;
        };
        if super::is_coarse_refresh(kind) {
            self.refresh().await;
        }
    }
}
