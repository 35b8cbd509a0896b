use crate::dto::search::SearchFilters;
use crate::models::replay::Replay;

use super::timer::TimerToken;

/// Counts filter resets. Every reset starts a new epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Tags a dispatched search with the epoch and page it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub epoch: Epoch,
    pub page: u32,
}

/// State of one search UI session.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub(crate) filters: SearchFilters,
    pub(crate) page: u32,
    pub(crate) results: Vec<Replay>,
    pub(crate) is_loading: bool,
    pub(crate) has_more: bool,
    pub(crate) epoch: Epoch,
    pub(crate) pending_timer: Option<TimerToken>,
    pub(crate) in_flight: Option<RequestTicket>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            filters: SearchFilters::default(),
            page: 1,
            results: Vec::new(),
            is_loading: false,
            has_more: false,
            epoch: Epoch::default(),
            pending_timer: None,
            in_flight: None,
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[Replay] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending_timer
    }

    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Whether the loading indicator (and scroll sentinel) should show.
    pub fn show_sentinel(&self) -> bool {
        self.is_loading || self.has_more
    }

    /// Hard reset for a new filter epoch. Forgets the pending timer and the
    /// in-flight ticket so nothing issued before this point can land.
    pub(crate) fn reset(&mut self) {
        self.epoch = self.epoch.next();
        self.page = 1;
        self.results.clear();
        self.has_more = true;
        self.is_loading = false;
        self.pending_timer = None;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_session_state() {
        let session = SearchSession::new();
        assert_eq!(session.page(), 1);
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
        assert!(!session.has_more());
        assert!(!session.show_sentinel());
        assert_eq!(session.epoch().value(), 0);
    }

    #[test]
    fn test_reset_starts_new_epoch() {
        let mut session = SearchSession::new();
        session.page = 4;
        session.is_loading = true;
        session.pending_timer = Some(TimerToken::FIRST);
        session.in_flight = Some(RequestTicket { epoch: session.epoch, page: 4 });

        session.reset();

        assert_eq!(session.epoch().value(), 1);
        assert_eq!(session.page(), 1);
        assert!(session.has_more());
        assert!(!session.is_loading());
        assert_eq!(session.pending_timer(), None);
        assert_eq!(session.in_flight(), None);
    }
}
