use directory::LoadState;
use leptos::prelude::*;
use shared_types::ResourceRecord;

use super::{map_marker::marker_icon_url, surface::{ControllerHandle, SidebarSignals}};

/// Scrollable list of the filtered resources. More rows are revealed as the
/// list scrolls.
#[component]
pub fn ResultsSidebar(controller: ControllerHandle, signals: SidebarSignals) -> impl IntoView {
    let list_ref = NodeRef::<leptos::html::Div>::new();

    // Each new result set starts at the top of the list.
    Effect::new(move |_| {
        signals.scroll_resets.track();
        if let Some(list) = list_ref.get_untracked() {
            list.set_scroll_top(0);
        }
    });

    let on_scroll = move |ev: web_sys::Event| {
        let list = event_target::<web_sys::Element>(&ev);
        let scroll_top = list.scroll_top() as f64;
        controller.update_value(|c| c.on_scroll(scroll_top));
    };

    view! {
        <aside class="results-sidebar">
            <div class="results-header">
                <h2>"Resources"</h2>
                <span class="results-count">
                    {move || format!("Showing {} of {}", signals.rows.with(Vec::len), signals.total.get())}
                </span>
                <div class="filter-badges">
                    {move || signals.badges.get().into_iter().map(|badge| view! {
                        <span class="filter-badge" title=badge.field.name()>{badge.label}</span>
                    }).collect_view()}
                </div>
            </div>
            <div class="results-list" node_ref=list_ref on:scroll=on_scroll>
                <For
                    each=move || signals.rows.get()
                    key=|record| record.id.clone()
                    children=move |record| view! { <ResourceRow record=record /> }
                />
                {move || {
                    let ready = matches!(signals.load_state.get(), LoadState::Ready { .. });
                    (ready && signals.total.get() == 0).then(|| view! {
                        <p class="results-empty">"No resources match the current filters."</p>
                    })
                }}
            </div>
        </aside>
    }
}

#[component]
fn ResourceRow(record: ResourceRecord) -> impl IntoView {
    let hours = record.hours_for_display().to_string();
    let location = match (record.address.is_empty(), record.town.is_empty()) {
        (false, false) => format!("{}, {}", record.address, record.town),
        (false, true) => record.address.clone(),
        _ => record.town.clone(),
    };
    let links: Vec<String> = std::iter::once(record.web_link.clone())
        .chain(record.web_link2.clone())
        .filter(|link| !link.is_empty())
        .collect();

    view! {
        <div class="result-row">
            <div class="result-title">
                <img class="result-icon" src=marker_icon_url(record.icon) alt="" width="14" height="21" />
                <span class="result-name">{record.name}</span>
            </div>
            <span class="result-category">{record.category.to_string()}</span>
            {(!location.is_empty()).then(|| view! { <p class="result-address">{location}</p> })}
            {(!record.phone.is_empty()).then(|| {
                let tel = format!("tel:{}", record.phone);
                view! { <p class="result-phone"><a href=tel>{record.phone}</a></p> }
            })}
            {(!hours.is_empty()).then(|| view! { <p class="result-hours">{hours}</p> })}
            {(!record.operational_notes.is_empty()).then(|| view! {
                <p class="result-notes">{record.operational_notes}</p>
            })}
            {record.special_notes.filter(|n| !n.is_empty()).map(|notes| view! {
                <p class="result-notes special">{notes}</p>
            })}
            {links.into_iter().map(|link| view! {
                <a class="result-link" href=link.clone() target="_blank" rel="noopener">"Website"</a>
            }).collect_view()}
            {(!record.last_updated.is_empty()).then(|| view! {
                <p class="result-updated">{format!("Updated {}", record.last_updated)}</p>
            })}
        </div>
    }
}
