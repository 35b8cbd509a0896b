use std::fmt::Display;
use std::time::Duration;

use log::{debug, warn};

use crate::dto::search::{FilterUpdate, SearchParams};
use crate::models::replay::Replay;

use super::session::{RequestTicket, SearchSession};
use super::timer::{DebounceTimer, TimerToken};

/// Quiet period between the last trigger and the search going out.
pub const SEARCH_DELAY: Duration = Duration::from_millis(200);

/// A search the platform must now send to the replay store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDispatch {
    pub ticket: RequestTicket,
    pub params: SearchParams,
}

/// What [`SearchCoordinator::apply_response`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Replays were appended; more pages may exist.
    Appended(usize),
    /// Empty page; no further pages for this epoch.
    Exhausted,
    /// The call failed; the session shows whatever it had.
    Failed,
    /// The response belongs to a superseded request and was dropped.
    Stale,
}

pub struct SearchCoordinator<T: DebounceTimer> {
    session: SearchSession,
    timer: T,
    delay: Duration,
    next_token: TimerToken,
}

impl<T: DebounceTimer> SearchCoordinator<T> {
    pub fn new(timer: T) -> Self {
        Self::with_delay(timer, SEARCH_DELAY)
    }

    pub fn with_delay(timer: T, delay: Duration) -> Self {
        Self {
            session: SearchSession::new(),
            timer,
            delay,
            next_token: TimerToken::FIRST,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Mount: runs the reset for the initial (empty) filters and arms the
    /// first search.
    pub fn start(&mut self) {
        self.reset_and_schedule();
    }

    /// Applies a filter edit. Returns `false` when the edit changed nothing,
    /// in which case the session is left alone.
    pub fn on_filter_changed(&mut self, update: FilterUpdate) -> bool {
        if !self.session.filters.apply(update) {
            return false;
        }
        debug!("Filters changed to {:?}", self.session.filters);
        self.reset_and_schedule();
        true
    }

    /// Scroll-driven load more. Safe to call at any rate: it does nothing
    /// while a load is pending or once the epoch is exhausted.
    pub fn request_next_page(&mut self) -> bool {
        if self.session.is_loading || !self.session.has_more {
            return false;
        }
        self.session.page += 1;
        debug!("Requesting page {}", self.session.page);
        self.schedule();
        true
    }

    /// Timer callback. Returns the search to send, or `None` when `token`
    /// was superseded or cancelled.
    pub fn on_timer_fired(&mut self, token: TimerToken) -> Option<SearchDispatch> {
        if self.session.pending_timer != Some(token) {
            debug!("Ignoring superseded timer {}", token.value());
            return None;
        }
        self.session.pending_timer = None;
        self.session.is_loading = true;

        let ticket = RequestTicket {
            epoch: self.session.epoch,
            page: self.session.page,
        };
        self.session.in_flight = Some(ticket);

        let params = SearchParams::for_page(&self.session.filters, ticket.page);
        debug!("Dispatching search {:?} for epoch {}", params, ticket.epoch.value());
        Some(SearchDispatch { ticket, params })
    }

    /// Folds a store response into the session.
    ///
    /// Only the ticket of the current in-flight request is accepted; anything
    /// else was issued before a reset and is dropped without touching state.
    pub fn apply_response<E: Display>(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<Replay>, E>,
    ) -> ApplyOutcome {
        if self.session.in_flight != Some(ticket) {
            debug!(
                "Dropping stale response for epoch {} page {} (current epoch {})",
                ticket.epoch.value(),
                ticket.page,
                self.session.epoch.value()
            );
            return ApplyOutcome::Stale;
        }
        self.session.in_flight = None;
        self.session.is_loading = false;

        match outcome {
            Ok(replays) if replays.is_empty() => {
                debug!("No replays on page {}, results exhausted", ticket.page);
                self.session.has_more = false;
                ApplyOutcome::Exhausted
            }
            Ok(replays) => {
                let count = replays.len();
                self.session.results.extend(replays);
                ApplyOutcome::Appended(count)
            }
            Err(e) => {
                warn!("Replay search for page {} failed: {}", ticket.page, e);
                ApplyOutcome::Failed
            }
        }
    }

    fn reset_and_schedule(&mut self) {
        self.timer.cancel();
        self.session.reset();
        self.schedule();
    }

    /// Arms the debounce timer for the current page. Marks the session as
    /// loading straight away so page requests stay gated until it resolves.
    fn schedule(&mut self) {
        self.session.has_more = true;
        self.session.is_loading = true;

        let token = self.next_token;
        self.next_token = token.next();
        self.session.pending_timer = Some(token);
        self.timer.arm(token, self.delay);
    }
}
