use shared::{FilterUpdate, SearchFilters, SortOrder};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchFiltersProps {
    pub filters: SearchFilters,
    pub on_change: Callback<FilterUpdate>,
}

/// Text inputs for format and players plus the sort order select. Every
/// keystroke is forwarded; debouncing happens downstream.
#[function_component(SearchFiltersForm)]
pub fn search_filters(props: &SearchFiltersProps) -> Html {
    let text_input = |update: fn(String) -> FilterUpdate| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(update(input.value()));
        })
    };

    let on_order = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<SortOrder>() {
                Ok(order) => on_change.emit(FilterUpdate::order(order)),
                Err(e) => log::warn!("{}", e),
            }
        })
    };

    let filters = &props.filters;
    html! {
        <form class="replay-search-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <label>
                {"Format: "}
                <input
                    type="search"
                    name="format"
                    placeholder="gen9ou"
                    value={filters.format.clone()}
                    oninput={text_input(|value| FilterUpdate::format(value))}
                />
            </label>
            <label>
                {"Player: "}
                <input
                    type="search"
                    name="username1"
                    placeholder="username"
                    value={filters.username1.clone()}
                    oninput={text_input(|value| FilterUpdate::username1(value))}
                />
            </label>
            <label>
                {"Versus: "}
                <input
                    type="search"
                    name="username2"
                    placeholder="opponent"
                    value={filters.username2.clone()}
                    oninput={text_input(|value| FilterUpdate::username2(value))}
                />
            </label>
            <label>
                {"Order: "}
                <select name="order" onchange={on_order}>
                    <option value="desc" selected={filters.order == SortOrder::Descending}>{"Newest first"}</option>
                    <option value="asc" selected={filters.order == SortOrder::Ascending}>{"Oldest first"}</option>
                </select>
            </label>
        </form>
    }
}
