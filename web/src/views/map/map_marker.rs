use directory::{MapMarker, MarkerEntry};
use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::MarkerIcon;
use thaw::{Label, LabelSize};

fn fill_color(icon: MarkerIcon) -> &'static str {
    match icon {
        MarkerIcon::Grocery => "%2316a34a",
        MarkerIcon::Restaurant => "%23ea580c",
        MarkerIcon::Utensils => "%232563eb",
        MarkerIcon::Star => "%235b21b6",
    }
}

/// Inner glyph drawn on the pin, as an url-encoded SVG path.
fn glyph(icon: MarkerIcon) -> &'static str {
    match icon {
        // basket
        MarkerIcon::Grocery => "%3Cpath fill='%23ffffff' d='M9 10h10l-1.5 6h-7z'/%3E",
        // plate
        MarkerIcon::Restaurant => "%3Ccircle cx='14' cy='13' r='4.5' fill='%23ffffff'/%3E",
        // fork and knife
        MarkerIcon::Utensils => "%3Cpath fill='%23ffffff' d='M11 8h1.2v10H11zM15.8 8h1.2v10h-1.2z'/%3E",
        MarkerIcon::Star => "%3Cpath fill='%23ffffff' d='M14 7.5l1.6 3.4 3.7.4-2.8 2.5.8 3.6-3.3-1.9-3.3 1.9.8-3.6-2.8-2.5 3.7-.4z'/%3E",
    }
}

pub fn marker_icon_url(icon: MarkerIcon) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cdefs%3E%3Cfilter id='shadow' x='-50%25' y='-50%25' width='200%25' height='200%25'%3E%3CfeDropShadow dx='0' dy='1' stdDeviation='1.5' flood-color='%23000' flood-opacity='0.25'/%3E%3C/filter%3E%3C/defs%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='1.5' filter='url(%23shadow)' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10z'/%3E{}%3C/svg%3E",
        fill_color(icon),
        glyph(icon)
    )
}

#[component]
pub fn ResourceMarker(marker: MapMarker) -> impl IntoView {
    view! {
        <Marker
            position=Position::new(marker.position.lat, marker.position.long)
            draggable=false
            icon_url=Some(marker_icon_url(marker.icon))
            icon_size=Some((28.0, 42.0))
            icon_anchor=Some((14.0, 42.0))
        >
            <Popup>
                <MarkerPopup address=marker.address entries=marker.entries />
            </Popup>
        </Marker>
    }
}

#[component]
fn MarkerPopup(address: String, entries: Vec<MarkerEntry>) -> impl IntoView {
    view! {
        <div class="location-popup">
            <p class="popup-address">{address}</p>
            {entries.into_iter().map(|entry| view! { <PopupEntry entry=entry /> }).collect_view()}
        </div>
    }
}

#[component]
fn PopupEntry(entry: MarkerEntry) -> impl IntoView {
    view! {
        <div class="popup-entry">
            <Label size=LabelSize::Large>{entry.name}</Label>
            <span class="popup-category">{entry.category}</span>
            {(!entry.hours.is_empty()).then(|| view! { <p class="popup-hours">{entry.hours}</p> })}
            {(!entry.phone.is_empty()).then(|| {
                let href = format!("tel:{}", entry.phone);
                view! { <a class="popup-phone" href=href>{entry.phone}</a> }
            })}
            {(!entry.web_link.is_empty()).then(|| view! {
                <a class="popup-cta" href=entry.web_link target="_blank" rel="noopener">"Visit Website"</a>
            })}
        </div>
    }
}
