use directory::LegendEntry;
use leptos::prelude::*;

use super::map_marker::marker_icon_url;

#[component]
pub fn MapLegend(entries: RwSignal<Vec<LegendEntry>>) -> impl IntoView {
    view! {
        <div class="map-legend">
            <h4>"Map Legend"</h4>
            <div class="legend-items">
                {move || entries.get().into_iter().map(|entry| {
                    view! {
                        <div class="legend-item">
                            <img class="legend-marker" src=marker_icon_url(entry.icon) alt="" />
                            <span>{entry.label}</span>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}
