//! Listing view state machine
//!
//! The single source of truth for the listing view: current page, current
//! filter criteria, the loaded page of results and the fetch lifecycle.
//! State transitions follow `Idle -> Loading -> {Loaded, Failed}` with both
//! outcomes re-enterable on the next navigation.
//!
//! Each fetch intent is tagged with a monotonically increasing sequence
//! number. Responses are applied through [`ListingViewState::resolve_ok`] /
//! [`ListingViewState::resolve_err`], which discard anything but the latest
//! issued sequence so an out-of-order response can never clobber newer state.

use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;
use crate::listing::{plan_request, ListingPage, ListingRequest};
use crate::window::{self, PageWindow};

/// Lifecycle phase of the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A fetch the view has committed to: the sequence number identifying it and
/// the planned backend request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: ListingRequest,
}

/// The listing view's owned state. Updated only via whole-record replacement
/// of the loaded page, so it stays consistent under out-of-order response
/// arrival.
#[derive(Debug, Clone)]
pub struct ListingViewState {
    phase: Phase,
    ui_page: u32,
    criteria: Option<FilterCriteria>,
    listing: Option<ListingPage>,
    last_error: Option<String>,
    latest_seq: u64,
}

impl Default for ListingViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingViewState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            ui_page: 1,
            criteria: None,
            listing: None,
            last_error: None,
            latest_seq: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui_page(&self) -> u32 {
        self.ui_page
    }

    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    /// The currently displayed page, if any. Preserved across failed fetches.
    pub fn listing(&self) -> Option<&ListingPage> {
        self.listing.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Navigate to a UI page under the current criteria.
    pub fn change_page(&mut self, ui_page: u32) -> FetchTicket {
        self.ui_page = ui_page.max(1);
        self.issue()
    }

    /// Apply new filter criteria wholesale. The page resets to 1: page
    /// numbers from the previous result set are not valid against the
    /// filtered set's page count.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> FetchTicket {
        self.criteria = Some(criteria);
        self.ui_page = 1;
        self.issue()
    }

    /// Drop all filters and return to page 1 of the plain listing.
    pub fn clear_filters(&mut self) -> FetchTicket {
        self.criteria = None;
        self.ui_page = 1;
        self.issue()
    }

    /// Re-issue the current page and criteria, e.g. after a failure.
    pub fn retry(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.phase = Phase::Loading;
        FetchTicket {
            seq: self.latest_seq,
            request: plan_request(self.ui_page, self.criteria.as_ref()),
        }
    }

    /// Apply a successful response. Returns false and changes nothing when
    /// the sequence is stale (a newer fetch has been issued since).
    pub fn resolve_ok(&mut self, seq: u64, page: ListingPage) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.listing = Some(page);
        self.last_error = None;
        self.phase = Phase::Loaded;
        true
    }

    /// Apply a failed response. The previously loaded listing, the page
    /// number and the criteria all stay in place so a retry reattempts the
    /// same query. Stale failures are discarded like stale successes.
    pub fn resolve_err(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.last_error = Some(message.into());
        self.phase = Phase::Failed;
        true
    }

    /// Pagination window for the current state. A view with nothing loaded
    /// yet renders a single-page window.
    pub fn window(&self) -> PageWindow {
        let total_pages = self.listing.as_ref().map_or(1, |l| l.total_pages);
        window::build_default(self.ui_page, total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PostType;
    use crate::listing::{FILTERED_PATH, SUMMARY_PATH};

    fn page_of(total_pages: u32) -> ListingPage {
        ListingPage {
            items: vec![],
            total_pages,
        }
    }

    fn sale_criteria() -> FilterCriteria {
        FilterCriteria {
            post_type: Some(PostType::Sale),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_is_idle_on_page_one() {
        let state = ListingViewState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.ui_page(), 1);
        assert!(state.listing().is_none());
    }

    #[test]
    fn test_change_page_issues_zero_based_request() {
        let mut state = ListingViewState::new();
        let ticket = state.change_page(3);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(ticket.request.path, SUMMARY_PATH);
        assert_eq!(
            ticket.request.params[0],
            ("page".to_string(), "2".to_string())
        );
    }

    #[test]
    fn test_apply_filters_routes_to_filtered_endpoint_at_page_one() {
        let mut state = ListingViewState::new();
        state.change_page(4);
        let ticket = state.apply_filters(sale_criteria());
        assert_eq!(state.ui_page(), 1);
        assert_eq!(ticket.request.path, FILTERED_PATH);
        assert_eq!(
            ticket.request.params[0],
            ("page".to_string(), "0".to_string())
        );
    }

    #[test]
    fn test_clear_filters_resets_to_page_one_unfiltered() {
        let mut state = ListingViewState::new();
        state.apply_filters(sale_criteria());
        let ticket = state.change_page(4);
        state.resolve_ok(ticket.seq, page_of(9));

        let ticket = state.clear_filters();
        assert_eq!(state.ui_page(), 1);
        assert!(state.criteria().is_none());
        assert_eq!(ticket.request.path, SUMMARY_PATH);
        assert_eq!(
            ticket.request.params[0],
            ("page".to_string(), "0".to_string())
        );
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ListingViewState::new();
        let page_two = state.change_page(2);
        let page_three = state.change_page(3);

        // Page 3 resolves first, then page 2 arrives late.
        assert!(state.resolve_ok(page_three.seq, page_of(10)));
        assert!(!state.resolve_ok(page_two.seq, page_of(777)));

        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.listing().unwrap().total_pages, 10);
        assert_eq!(state.ui_page(), 3);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = ListingViewState::new();
        let first = state.change_page(2);
        let second = state.change_page(3);

        assert!(state.resolve_ok(second.seq, page_of(10)));
        assert!(!state.resolve_err(first.seq, "timed out"));
        assert_eq!(state.phase(), Phase::Loaded);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_failure_preserves_previous_listing_and_criteria() {
        let mut state = ListingViewState::new();
        let ticket = state.apply_filters(sale_criteria());
        state.resolve_ok(ticket.seq, page_of(7));

        let ticket = state.change_page(2);
        assert!(state.resolve_err(ticket.seq, "server error"));

        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.listing().unwrap().total_pages, 7);
        assert_eq!(state.criteria(), Some(&sale_criteria()));
        assert_eq!(state.last_error(), Some("server error"));

        // A retry reattempts the same filtered query, same page.
        let retry = state.retry();
        assert_eq!(retry.request.path, FILTERED_PATH);
        assert_eq!(
            retry.request.params[0],
            ("page".to_string(), "1".to_string())
        );
    }

    #[test]
    fn test_failed_view_is_reenterable() {
        let mut state = ListingViewState::new();
        let ticket = state.change_page(2);
        state.resolve_err(ticket.seq, "connection refused");
        assert_eq!(state.phase(), Phase::Failed);

        let ticket = state.change_page(1);
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.resolve_ok(ticket.seq, page_of(3)));
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn test_window_follows_loaded_total_pages() {
        let mut state = ListingViewState::new();
        assert_eq!(state.window().pages, vec![1]);

        let ticket = state.change_page(6);
        state.resolve_ok(ticket.seq, page_of(12));
        assert_eq!(state.window().pages, vec![4, 5, 6, 7, 8]);
    }
}
