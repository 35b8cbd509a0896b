use shared::Replay;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReplayCardProps {
    pub replay: Replay,
}

#[function_component(ReplayCard)]
pub fn replay_card(props: &ReplayCardProps) -> Html {
    let replay = &props.replay;
    let rating = (replay.rating > 0.0).then(|| format!("Rating: {}", replay.rating.round()));

    html! {
        <li class="replay-card">
            <a href={replay.page_path()} class="replay-link">
                <small class="replay-summary">{ replay.summary_label() }</small>
                <br />
                <strong class="replay-matchup">{ replay.matchup_label() }</strong>
                if let Some(rating) = rating {
                    <small class="replay-rating">{ format!(" ({})", rating) }</small>
                }
            </a>
        </li>
    }
}
