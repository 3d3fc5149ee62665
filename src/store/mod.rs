//! Per-resource query stores.
//!
//! One [`ResourceStore`] instance backs one mounted view. It owns that view's
//! paginated list, selection, and detail state exclusively; cross-store
//! effects only ever happen through the shared push channel. Push relevance
//! is table-driven: each resource declares its event kinds once in
//! [`kinds`], and one generic check decides refetch-vs-ignore.

pub mod kinds;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::bus::ChannelMessage;
use crate::model::Page;
use crate::transport::{ApiClient, TransportError};

/// Table row describing one resource type: where its list lives, how big a
/// page is, and which push event kinds invalidate it. Adding a resource type
/// adds one impl, not a new branch in shared dispatch code.
pub trait ResourceKind {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;
    type Detail: DeserializeOwned + Clone + Send + Sync + 'static;

    const PATH: &'static str;
    const PAGE_SIZE: u64;
    /// Event kinds that trigger a refetch. Everything else is ignored.
    const RELEVANT_KINDS: &'static [&'static str];

    fn item_id(item: &Self::Item) -> &str;
}

/// Sequence ticket for an in-flight list query. Responses must come back
/// through [`ResourceStore::apply_list`] so a newer query wins the race.
#[derive(Debug, Clone)]
pub struct ListTicket {
    seq: u64,
    pub path: &'static str,
    pub query: Vec<(String, String)>,
}

/// Sequence ticket for an in-flight detail query.
#[derive(Debug, Clone)]
pub struct DetailTicket {
    seq: u64,
    pub id: String,
    pub path: String,
}

pub struct ResourceStore<R: ResourceKind> {
    client: ApiClient,
    filters: BTreeMap<String, String>,
    page: u64,
    page_size: u64,
    items: Vec<R::Item>,
    total: u64,
    selected_id: Option<String>,
    detail: Option<R::Detail>,
    last_error: Option<String>,
    list_seq: u64,
    detail_seq: u64,
    // Set once the user explicitly clears the selection; auto-select-first
    // never fires again for this store's lifetime.
    selection_cleared: bool,
}

impl<R: ResourceKind> ResourceStore<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            filters: BTreeMap::new(),
            page: 1,
            page_size: R::PAGE_SIZE,
            items: Vec::new(),
            total: 0,
            selected_id: None,
            detail: None,
            last_error: None,
            list_seq: 0,
            detail_seq: 0,
            selection_cleared: false,
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Page count derived from the current total, clamped to at least one.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn detail(&self) -> Option<&R::Detail> {
        self.detail.as_ref()
    }

    /// Last recoverable error, cleared by the next successful operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether `kind` is in this resource's relevance table.
    pub fn is_relevant(kind: &str) -> bool {
        R::RELEVANT_KINDS.contains(&kind)
    }

    // -- query intent -------------------------------------------------------

    /// Set (or with `None`/empty, remove) a filter and re-issue the list
    /// query with the latest complete filter set.
    pub async fn set_filter(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.filters.insert(name.to_string(), value.to_string());
            }
            _ => {
                self.filters.remove(name);
            }
        }
        self.refresh_list().await;
    }

    pub async fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
        self.refresh_list().await;
    }

    /// Change the selection. `Some(id)` issues a detail fetch; `None` clears
    /// the detail pane without a request and suppresses auto-select from
    /// here on.
    pub async fn select(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.selected_id = Some(id.to_string());
                self.refresh_detail().await;
            }
            None => {
                self.selected_id = None;
                self.detail = None;
                self.selection_cleared = true;
            }
        }
    }

    // -- list queries -------------------------------------------------------

    /// Issue the current list query. Callers that drive their own fetches
    /// (spawned tasks, tests) pair this with [`apply_list`]; everyone else
    /// uses [`refresh_list`].
    ///
    /// [`apply_list`]: ResourceStore::apply_list
    /// [`refresh_list`]: ResourceStore::refresh_list
    pub fn begin_list(&mut self) -> ListTicket {
        self.list_seq += 1;
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        for (name, value) in &self.filters {
            query.push((name.clone(), value.clone()));
        }
        ListTicket {
            seq: self.list_seq,
            path: R::PATH,
            query,
        }
    }

    /// Apply a list response. Returns `false` when the ticket was superseded
    /// by a newer query — the response is dropped silently, success or not,
    /// and the store is left ready for the newer response.
    pub fn apply_list(
        &mut self,
        ticket: &ListTicket,
        result: Result<Page<R::Item>, TransportError>,
    ) -> bool {
        if ticket.seq != self.list_seq {
            tracing::debug!(resource = R::PATH, seq = ticket.seq, "stale list response dropped");
            return false;
        }
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.last_error = None;
                if self.selected_id.is_none() && !self.selection_cleared {
                    if let Some(first) = self.items.first() {
                        self.selected_id = Some(R::item_id(first).to_string());
                    }
                }
            }
            Err(error) => {
                // Prior items stay on screen; the error rides alongside.
                self.last_error = Some(error.to_string());
            }
        }
        true
    }

    /// Re-issue the current list query with unchanged filters/page. Used by
    /// manual refresh actions and by event-triggered refetch.
    pub async fn refresh_list(&mut self) {
        let ticket = self.begin_list();
        let result = self
            .client
            .get_json::<Page<R::Item>>(ticket.path, &ticket.query)
            .await;
        let had_selection = self.selected_id.is_some();
        self.apply_list(&ticket, result);
        // Auto-select-first establishes the initial detail pane.
        if !had_selection && self.selected_id.is_some() {
            self.refresh_detail().await;
        }
    }

    // -- detail queries -----------------------------------------------------

    /// Issue a detail query for the current selection, if any.
    pub fn begin_detail(&mut self) -> Option<DetailTicket> {
        let id = self.selected_id.clone()?;
        self.detail_seq += 1;
        Some(DetailTicket {
            seq: self.detail_seq,
            path: format!("{}/{}", R::PATH, id),
            id,
        })
    }

    /// Apply a detail response. Dropped when a newer detail query was issued
    /// or the id is no longer selected (changing the selection to `None` is
    /// the user-visible cancel of an in-flight fetch's effect).
    pub fn apply_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<R::Detail, TransportError>,
    ) -> bool {
        if ticket.seq != self.detail_seq || self.selected_id.as_deref() != Some(ticket.id.as_str())
        {
            tracing::debug!(resource = R::PATH, id = %ticket.id, "stale detail response dropped");
            return false;
        }
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
        true
    }

    /// Re-issue the detail query for the current selection; no-op if none.
    pub async fn refresh_detail(&mut self) {
        let Some(ticket) = self.begin_detail() else {
            return;
        };
        let result = self.client.get_json::<R::Detail>(&ticket.path, &[]).await;
        self.apply_detail(&ticket, result);
    }

    // -- push relevance -----------------------------------------------------

    /// React to one channel message: refetch the list (and the detail, if a
    /// selection exists) for relevant event kinds, ignore everything else.
    /// Raw frames have no kind and are always ignored.
    pub async fn on_message(&mut self, message: &ChannelMessage) {
        let Some(kind) = message.kind() else {
            return;
        };
        if !Self::is_relevant(kind) {
            return;
        }
        let had_selection = self.selected_id.is_some();
        self.refresh_list().await;
        if had_selection {
            self.refresh_detail().await;
        }
    }
}
