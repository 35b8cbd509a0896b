//! Browser bindings for the shared search coordinator.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::Timeout;
use log::debug;
use shared::search::{ApplyOutcome, DebounceTimer, SearchCoordinator, SearchSession, TimerToken};
use shared::FilterUpdate;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use crate::api::replays::search_replays;
use crate::config::Config;

/// Debounce timer on top of `setTimeout`. Dropping a [`Timeout`] clears it,
/// so re-arming replaces the previous one.
pub struct GlooDebounceTimer {
    pending: Option<Timeout>,
    on_fire: Rc<dyn Fn(TimerToken)>,
}

impl GlooDebounceTimer {
    pub fn new(on_fire: impl Fn(TimerToken) + 'static) -> Self {
        Self {
            pending: None,
            on_fire: Rc::new(on_fire),
        }
    }
}

impl DebounceTimer for GlooDebounceTimer {
    fn arm(&mut self, token: TimerToken, delay: Duration) {
        let on_fire = self.on_fire.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.pending = Some(Timeout::new(millis, move || on_fire(token)));
    }

    fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}

type SharedCoordinator = Rc<RefCell<SearchCoordinator<GlooDebounceTimer>>>;

/// Cloneable handle a component holds on the coordinator.
///
/// Every transition borrows the coordinator mutably for its synchronous part
/// only; `notify` runs after the borrow is released so a re-render can read
/// the session.
#[derive(Clone)]
pub struct SearchHandle {
    coordinator: SharedCoordinator,
    notify: Callback<()>,
}

impl PartialEq for SearchHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.coordinator, &other.coordinator)
    }
}

impl SearchHandle {
    pub fn new(notify: Callback<()>) -> Self {
        let timer_notify = notify.clone();
        let coordinator = Rc::new_cyclic(|weak: &Weak<RefCell<_>>| {
            let weak = weak.clone();
            RefCell::new(SearchCoordinator::new(GlooDebounceTimer::new(move |token| {
                if let Some(coordinator) = weak.upgrade() {
                    Self::timer_fired(coordinator, timer_notify.clone(), token);
                }
            })))
        });
        Self { coordinator, notify }
    }

    pub fn start(&self) {
        self.coordinator.borrow_mut().start();
        self.notify.emit(());
    }

    pub fn filter_changed(&self, update: FilterUpdate) {
        let changed = self.coordinator.borrow_mut().on_filter_changed(update);
        if changed {
            self.notify.emit(());
        }
    }

    pub fn request_next_page(&self) {
        let requested = self.coordinator.borrow_mut().request_next_page();
        if requested {
            self.notify.emit(());
        }
    }

    /// Runs `f` against the current session.
    pub fn with_session<R>(&self, f: impl FnOnce(&SearchSession) -> R) -> R {
        f(self.coordinator.borrow().session())
    }

    fn timer_fired(coordinator: SharedCoordinator, notify: Callback<()>, token: TimerToken) {
        let dispatch = coordinator.borrow_mut().on_timer_fired(token);
        let Some(dispatch) = dispatch else {
            return;
        };
        notify.emit(());

        let weak = Rc::downgrade(&coordinator);
        drop(coordinator);
        spawn_local(async move {
            let result = search_replays(&dispatch.params).await;
            let Some(coordinator) = weak.upgrade() else {
                debug!("Search page closed before page {} arrived", dispatch.ticket.page);
                return;
            };
            let outcome = coordinator
                .borrow_mut()
                .apply_response(dispatch.ticket, result);
            debug!("Page {} applied: {:?}", dispatch.ticket.page, outcome);

            if should_advance(outcome, viewport_near_bottom) {
                coordinator.borrow_mut().request_next_page();
            }
            notify.emit(());
        });
    }
}

/// Whether an applied page should immediately ask for the next one.
///
/// A short page may leave the sentinel on screen without any scroll event to
/// trigger the next request. `near_bottom` is only consulted after an append.
pub fn should_advance(outcome: ApplyOutcome, near_bottom: impl FnOnce() -> bool) -> bool {
    matches!(outcome, ApplyOutcome::Appended(_)) && near_bottom()
}

/// Whether the viewport bottom is within the scroll threshold of the
/// document bottom.
pub fn viewport_near_bottom() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or_default();
    let scroll_y = window.scroll_y().unwrap_or_default();
    let document_height = window
        .document()
        .and_then(|document| document.document_element())
        .map(|element| f64::from(element.scroll_height()))
        .unwrap_or_default();

    is_near_bottom(scroll_y, viewport_height, document_height, Config::scroll_threshold_px())
}

pub fn is_near_bottom(scroll_y: f64, viewport_height: f64, document_height: f64, threshold: f64) -> bool {
    scroll_y + viewport_height >= document_height - threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_near_bottom() {
        assert_eq!(is_near_bottom(0.0, 800.0, 2000.0, 200.0), false);
        assert_eq!(is_near_bottom(1000.0, 800.0, 2000.0, 200.0), true);
        assert_eq!(is_near_bottom(1199.0, 800.0, 2000.0, 0.0), false);
        // A page shorter than the viewport is always at the bottom
        assert_eq!(is_near_bottom(0.0, 800.0, 500.0, 200.0), true);
    }

    #[test]
    fn test_should_advance_only_after_append_near_bottom() {
        assert!(should_advance(ApplyOutcome::Appended(3), || true));
        assert!(!should_advance(ApplyOutcome::Appended(3), || false));
        assert!(!should_advance(ApplyOutcome::Exhausted, || true));
        assert!(!should_advance(ApplyOutcome::Failed, || true));
        assert!(!should_advance(ApplyOutcome::Stale, || true));
    }

    #[test]
    fn test_should_advance_skips_layout_read_when_not_appended() {
        let should_not_run = || -> bool { panic!("layout read for a page that appended nothing") };
        assert!(!should_advance(ApplyOutcome::Exhausted, should_not_run));
    }
}
