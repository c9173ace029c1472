//! Infinite-scroll pagination.
//!
//! [`InfiniteScroll`] is a small state machine that decides when the next
//! catalog page may be requested. It does no I/O itself:
//! [`begin_fetch`](InfiniteScroll::begin_fetch) hands out the request to make
//! and [`complete_fetch`](InfiniteScroll::complete_fetch) applies the result.
//! [`on_sentinel_visible`](InfiniteScroll::on_sentinel_visible) wires the two
//! to a [`Catalog`] for callers that just want the next page.
//!
//! ```text
//! Idle --begin--> LoadingFirstPage --ok--> Loaded { page } --begin--> LoadingNextPage { page }
//!   ^                  |                      ^                           |
//!   +------ error -----+                      +---------- error ----------+
//!
//! any loading state --ok, nothing left--> Exhausted { page }
//! ```

use shopfront_core::{Page, PageRequest, Product};
use tracing::{debug, error, warn};

use crate::catalog::{Catalog, CatalogError};

/// Where the controller is in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// Nothing fetched yet.
    Idle,
    LoadingFirstPage,
    /// `page` is the last page received; more remain.
    Loaded { page: u32 },
    /// `page` is being fetched.
    LoadingNextPage { page: u32 },
    /// `page` was the last page; no further fetches happen.
    Exhausted { page: u32 },
}

impl ScrollState {
    /// The page last received, or being fetched after the first.
    #[must_use]
    pub const fn page(self) -> Option<u32> {
        match self {
            Self::Idle | Self::LoadingFirstPage => None,
            Self::Loaded { page } | Self::LoadingNextPage { page } | Self::Exhausted { page } => {
                Some(page)
            }
        }
    }

    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::LoadingFirstPage | Self::LoadingNextPage { .. })
    }
}

/// Accumulates catalog pages as the shopper scrolls.
#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    page_size: u32,
    state: ScrollState,
    items: Vec<Product>,
    fetches_issued: u32,
}

impl InfiniteScroll {
    /// Create a controller fetching `page_size` products per page (at least 1).
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            state: ScrollState::Idle,
            items: Vec::new(),
            fetches_issued: 0,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// Products received so far, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of page requests handed out.
    #[must_use]
    pub const fn fetches_issued(&self) -> u32 {
        self.fetches_issued
    }

    /// Whether the end-of-list sentinel should still be watched.
    #[must_use]
    pub const fn is_observing(&self) -> bool {
        !matches!(self.state, ScrollState::Exhausted { .. })
    }

    /// Start over from the first page.
    ///
    /// Items already shown stay until the first page replaces them. Ignored
    /// while a fetch is in flight.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            warn!("Ignoring reset while a page is loading");
            return;
        }
        self.state = ScrollState::Idle;
    }

    /// Claim the next page to fetch.
    ///
    /// Returns `None` while a fetch is in flight or once the listing is
    /// exhausted; at most one request is outstanding at a time.
    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        let request = match self.state {
            ScrollState::Idle => {
                self.state = ScrollState::LoadingFirstPage;
                PageRequest::first(self.page_size)
            }
            ScrollState::Loaded { page } => {
                let next = PageRequest::new(page, self.page_size).next();
                self.state = ScrollState::LoadingNextPage { page: next.page };
                next
            }
            ScrollState::LoadingFirstPage
            | ScrollState::LoadingNextPage { .. }
            | ScrollState::Exhausted { .. } => return None,
        };

        self.fetches_issued += 1;
        debug!(page = request.page, "Fetching catalog page");
        Some(request)
    }

    /// Apply the outcome of a request from [`begin_fetch`](Self::begin_fetch).
    ///
    /// A failed fetch is logged and returns the controller to where it was
    /// before; the page is not retried until the next trigger.
    pub fn complete_fetch(
        &mut self,
        request: PageRequest,
        result: Result<Page<Product>, CatalogError>,
    ) {
        let expected = match self.state {
            ScrollState::LoadingFirstPage => 1,
            ScrollState::LoadingNextPage { page } => page,
            _ => {
                warn!(page = request.page, "Ignoring page that was not requested");
                return;
            }
        };
        if request.page != expected || request.page_size != self.page_size {
            warn!(page = request.page, expected, "Ignoring stale page");
            return;
        }

        match result {
            Ok(page) => {
                let has_more = request.has_more(page.total);
                if request.page == 1 {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }

                self.state = if has_more {
                    ScrollState::Loaded { page: request.page }
                } else {
                    ScrollState::Exhausted { page: request.page }
                };
                debug!(
                    page = request.page,
                    items = self.items.len(),
                    total = page.total,
                    has_more,
                    "Catalog page loaded"
                );
            }
            Err(e) => {
                error!(page = request.page, error = %e, "Failed to load catalog page");
                self.state = if request.page == 1 {
                    ScrollState::Idle
                } else {
                    ScrollState::Loaded {
                        page: request.page - 1,
                    }
                };
            }
        }
    }

    /// The sentinel came into view: fetch the next page if one may be
    /// fetched now. Returns whether a request was made.
    pub async fn on_sentinel_visible<C: Catalog>(&mut self, catalog: &C) -> bool {
        let Some(request) = self.begin_fetch() else {
            return false;
        };
        let result = catalog.list(request).await;
        self.complete_fetch(request, result);
        true
    }
}
