use gloo::events::EventListener;
use shared::FilterUpdate;
use yew::prelude::*;

use crate::components::replay_card::ReplayCard;
use crate::components::search_filters::SearchFiltersForm;
use crate::search::{viewport_near_bottom, SearchHandle};

#[function_component(ReplaySearch)]
pub fn replay_search() -> Html {
    let force_update = use_force_update();
    let handle = use_memo((), move |_| {
        SearchHandle::new(Callback::from(move |_| force_update.force_update()))
    });

    // Mount runs the first search
    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.start();
            || ()
        });
    }

    // Scroll and resize both move the viewport relative to the sentinel
    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            let listeners = web_sys::window().map(|window| {
                let on_move = {
                    let handle = handle.clone();
                    move |_: &Event| {
                        if viewport_near_bottom() {
                            handle.request_next_page();
                        }
                    }
                };
                (
                    EventListener::new(&window, "scroll", on_move.clone()),
                    EventListener::new(&window, "resize", on_move),
                )
            });
            move || drop(listeners)
        });
    }

    let on_filter_change = {
        let handle = handle.clone();
        Callback::from(move |update: FilterUpdate| handle.filter_changed(update))
    };

    let (filters, results, show_sentinel) = handle.with_session(|session| {
        (
            session.filters().clone(),
            session.results().to_vec(),
            session.show_sentinel(),
        )
    });

    html! {
        <div class="replay-search">
            <h1>{"Search replays"}</h1>
            <SearchFiltersForm filters={filters} on_change={on_filter_change} />
            if results.is_empty() && !show_sentinel {
                <p class="replay-search-empty">{"No replays found."}</p>
            } else {
                <ul class="replay-list">
                    { for results.into_iter().map(|replay| html! {
                        <ReplayCard key={replay.id.clone()} replay={replay.clone()} />
                    }) }
                </ul>
            }
            if show_sentinel {
                <div class="replay-search-sentinel">
                    <span class="spinner" aria-label="Loading more replays"></span>
                </div>
            }
        </div>
    }
}
