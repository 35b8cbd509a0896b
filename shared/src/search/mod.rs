//! Incremental search and pagination over the replay store.
//!
//! [`SearchCoordinator`] owns the [`SearchSession`] and is the only thing that
//! mutates it. The platform drives it from the outside:
//!
//! 1. filter edits go to [`SearchCoordinator::on_filter_changed`],
//! 2. scroll proximity goes to [`SearchCoordinator::request_next_page`],
//! 3. the [`DebounceTimer`] calls back [`SearchCoordinator::on_timer_fired`],
//!    which hands out a [`SearchDispatch`] to send over the network,
//! 4. the network result comes back through [`SearchCoordinator::apply_response`].
//!
//! All transitions are synchronous; none of them suspends halfway.

pub mod coordinator;
pub mod session;
pub mod timer;


pub use coordinator::{ApplyOutcome, SearchCoordinator, SearchDispatch, SEARCH_DELAY};
pub use session::{Epoch, RequestTicket, SearchSession};
pub use timer::{DebounceTimer, ManualTimer, TimerToken};
