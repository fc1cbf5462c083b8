use directory::LoadState;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent, Spinner, SpinnerSize};

#[component]
pub fn LoadingView(message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading-container">
            <Spinner size=SpinnerSize::Large />
            <p class="loading-message">
                {message.unwrap_or_else(|| "Loading, please wait...".to_string())}
            </p>
        </div>
    }
}

#[component]
pub fn ErrorView(message: Option<String>) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
        </MessageBar>
    }
}

/// Banner for the directory load lifecycle. Renders nothing once data is in.
#[component]
pub fn LoadStatus<F>(state: RwSignal<LoadState>, on_retry: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    move || match state.get() {
        LoadState::Idle | LoadState::Loading => view! {
            <LoadingView message=Some("Fetching food resources...".to_string()) />
        }
        .into_any(),
        LoadState::Failed(reason) => view! {
            <div class="load-failed">
                <ErrorView message=Some(format!("Could not load the directory. {}", reason)) />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_retry()>
                    "Try again"
                </Button>
            </div>
        }
        .into_any(),
        LoadState::Ready { .. } => view! {}.into_any(),
    }
}
