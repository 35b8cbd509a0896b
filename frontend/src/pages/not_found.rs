use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found-page">
            <h1>{"404 - Page Not Found"}</h1>
            <p>
                {"The page you're looking for doesn't exist. "}
                <Link<Route> to={Route::Search}>{"Back to replay search"}</Link<Route>>
            </p>
        </div>
    }
}
