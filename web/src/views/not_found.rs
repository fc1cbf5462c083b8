use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist. The resource map is on the home page."</p>
            <A href="/" attr:class="not-found__link">"Back to the map"</A>
        </div>
    }
}
