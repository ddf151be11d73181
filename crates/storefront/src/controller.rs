//! View state controller for product listing pages.
//!
//! Drives `Idle -> Loading -> Ready | Error` for one listing view. Fetches are
//! split into a ticket (issued when a fetch is needed) and a resolution (when
//! the source answers), so the caller owns the await point. Only the most
//! recently issued ticket can commit: older answers are discarded as stale.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shopfront_catalog::{FilterCriteria, PageRequest, ProductRecord, SortKey, discover};
use shopfront_core::{DomainError, DomainResult};

use crate::config::StorefrontConfig;
use crate::source::{CatalogQuery, CatalogSource, FetchFailure};

/// Identifies one issued fetch. Later tokens compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl core::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the caller must perform and hand back via [`DiscoveryController::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub query: CatalogQuery,
}

/// What a criteria change does once a list has been fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Ask the source again on every criteria change.
    Refetch,
    /// Re-filter the list already fetched for the current query (search page).
    #[default]
    Rederive,
}

impl FromStr for FetchPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refetch" => Ok(FetchPolicy::Refetch),
            "rederive" => Ok(FetchPolicy::Rederive),
            other => Err(DomainError::validation(format!(
                "unknown fetch policy `{other}` (expected refetch or rederive)"
            ))),
        }
    }
}

/// Listing view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready {
        items: Vec<ProductRecord>,
        total_count: usize,
        page_count: u32,
    },
    Error(String),
}

impl ViewState {
    pub fn status(&self) -> ViewStatus {
        match self {
            ViewState::Idle => ViewStatus::Idle,
            ViewState::Loading => ViewStatus::Loading,
            ViewState::Ready { total_count: 0, .. } => ViewStatus::Empty,
            ViewState::Ready { .. } => ViewStatus::Ready,
            ViewState::Error(_) => ViewStatus::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Coarse state for the presentation layer; `Empty` is a ready view with no matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Empty,
    Error,
}

/// Outcome of handing a fetch result back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result was current and the view moved to `Ready` or `Error`.
    Committed,
    /// A newer fetch superseded this one; the result was dropped.
    Stale,
}

/// Everything a listing page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub items: Vec<ProductRecord>,
    pub current_page: u32,
    pub page_count: u32,
    pub total_count: usize,
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Controller for one listing view instance.
#[derive(Debug, Clone)]
pub struct DiscoveryController {
    policy: FetchPolicy,
    query: CatalogQuery,
    criteria: FilterCriteria,
    sort_key: SortKey,
    page: PageRequest,
    state: ViewState,
    /// Full unfiltered list last committed for `query`.
    catalog: Option<Vec<ProductRecord>>,
    pending: Option<RequestToken>,
    issued: u64,
}

impl DiscoveryController {
    pub fn new(policy: FetchPolicy, page_size: u32) -> DomainResult<Self> {
        Ok(Self {
            policy,
            query: CatalogQuery::All,
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            page: PageRequest::first(page_size)?,
            state: ViewState::Idle,
            catalog: None,
            pending: None,
            issued: 0,
        })
    }

    pub fn from_config(config: &StorefrontConfig) -> DomainResult<Self> {
        let mut controller = Self::new(config.fetch_policy, config.page_size)?;
        controller.sort_key = config.sort_key;
        Ok(controller)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn current_page(&self) -> u32 {
        self.page.page_number()
    }

    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending
    }

    /// Start loading `query`. A different query drops the cached list and
    /// resets to page 1. Any fetch still in flight becomes stale.
    pub fn request_fetch(&mut self, query: CatalogQuery) -> FetchTicket {
        if query != self.query {
            self.query = query;
            self.catalog = None;
            self.page = self.page.with_page(1);
        }
        self.issue()
    }

    /// Fetch the current query again (e.g. from the error view).
    pub fn retry(&mut self) -> FetchTicket {
        tracing::debug!(query = %self.query, "retrying catalog fetch");
        self.issue()
    }

    /// Replace filter and sort criteria.
    ///
    /// Returns a ticket when the change needs a fetch. With
    /// [`FetchPolicy::Rederive`] and a cached list, the view passes through
    /// `Loading` and lands on the re-derived `Ready` state synchronously. An
    /// unchanged pair is a no-op.
    pub fn set_criteria(&mut self, criteria: FilterCriteria, sort_key: SortKey) -> Option<FetchTicket> {
        if criteria == self.criteria && sort_key == self.sort_key {
            return None;
        }
        self.criteria = criteria;
        self.sort_key = sort_key;
        self.page = self.page.with_page(1);

        match self.policy {
            FetchPolicy::Refetch => Some(self.issue()),
            FetchPolicy::Rederive => {
                if self.pending.is_some() {
                    // The in-flight fetch is for the same query; it derives with
                    // the new criteria when it lands.
                    return None;
                }
                if self.catalog.is_some() {
                    self.state = ViewState::Loading;
                    self.derive();
                    tracing::debug!(sort = %self.sort_key, "re-derived listing from cached catalog");
                    None
                } else {
                    Some(self.issue())
                }
            }
        }
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) -> Option<FetchTicket> {
        let sort_key = self.sort_key;
        self.set_criteria(criteria, sort_key)
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> Option<FetchTicket> {
        let criteria = self.criteria.clone();
        self.set_criteria(criteria, sort_key)
    }

    /// Move to page `page_number` (`0` is treated as 1). Re-slices the cached
    /// list when the view is ready; otherwise applies once data arrives.
    pub fn go_to_page(&mut self, page_number: u32) {
        self.page = self.page.with_page(page_number);
        if matches!(self.state, ViewState::Ready { .. }) {
            self.derive();
        }
    }

    /// Hand back the result of a fetch issued under `token`.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<ProductRecord>, FetchFailure>,
    ) -> Resolution {
        if self.pending != Some(token) {
            tracing::debug!(
                %token,
                current = ?self.pending,
                "discarding stale catalog response"
            );
            return Resolution::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(records) => {
                tracing::info!(
                    %token,
                    query = %self.query,
                    fetched = records.len(),
                    "catalog fetch committed"
                );
                self.catalog = Some(records);
                self.derive();
            }
            Err(failure) => {
                tracing::warn!(%token, query = %self.query, error = %failure, "catalog fetch failed");
                self.catalog = None;
                self.state = ViewState::Error(failure.to_string());
            }
        }
        Resolution::Committed
    }

    /// Perform `ticket` against `source` and resolve it.
    pub async fn fulfil<S>(&mut self, source: &S, ticket: FetchTicket) -> Resolution
    where
        S: CatalogSource + ?Sized,
    {
        let outcome = source.fetch(&ticket.query).await;
        self.resolve(ticket.token, outcome)
    }

    /// Issue a fetch for `query`, await `source`, and resolve.
    pub async fn load<S>(&mut self, source: &S, query: CatalogQuery) -> Resolution
    where
        S: CatalogSource + ?Sized,
    {
        let ticket = self.request_fetch(query);
        self.fulfil(source, ticket).await
    }

    /// Apply new criteria, fetching from `source` only when the policy needs it.
    pub async fn apply_criteria<S>(
        &mut self,
        source: &S,
        criteria: FilterCriteria,
        sort_key: SortKey,
    ) -> Option<Resolution>
    where
        S: CatalogSource + ?Sized,
    {
        let ticket = self.set_criteria(criteria, sort_key)?;
        Some(self.fulfil(source, ticket).await)
    }

    pub fn render(&self) -> RenderModel {
        let (items, total_count, page_count) = match &self.state {
            ViewState::Ready {
                items,
                total_count,
                page_count,
            } => (items.clone(), *total_count, *page_count),
            _ => (Vec::new(), 0, 1),
        };
        let error = match &self.state {
            ViewState::Error(message) => Some(message.clone()),
            _ => None,
        };

        RenderModel {
            items,
            current_page: self.page.page_number(),
            page_count,
            total_count,
            status: self.state.status(),
            error,
        }
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        let token = RequestToken(self.issued);
        if let Some(previous) = self.pending.replace(token) {
            tracing::debug!(%previous, %token, "superseding in-flight catalog fetch");
        }
        self.state = ViewState::Loading;
        FetchTicket {
            token,
            query: self.query.clone(),
        }
    }

    fn derive(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let page = discover(catalog, &self.criteria, self.sort_key, &self.page);
        self.state = ViewState::Ready {
            items: page.items,
            total_count: page.total_count,
            page_count: page.page_count,
        };
    }
}
