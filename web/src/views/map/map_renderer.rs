use leptos::prelude::*;
use leptos_leaflet::{
    leaflet::{LatLng, LatLngBounds, Map},
    prelude::*,
};
use shared_types::GeoPoint;

use super::{map_marker::ResourceMarker, surface::MapSignals};

#[component]
pub fn MapRenderer(signals: MapSignals, center: GeoPoint, zoom: f64) -> impl IntoView {
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);

    // Tracks the map too, so a fit requested before the map mounted still lands.
    Effect::new(move |_| {
        let Some(bounds) = signals.fit_request.get() else {
            return;
        };
        let Some(map) = map.get() else {
            return;
        };
        let north_east = LatLng::new(bounds.north_east.lat, bounds.north_east.long);
        let south_west = LatLng::new(bounds.south_west.lat, bounds.south_west.long);
        map.fit_bounds(&LatLngBounds::new(&south_west, &north_east));
    });

    view! {
        <MapContainer
            style="height: 100%; width: 100%; flex: 1"
            center=Position::new(center.lat, center.long)
            zoom=zoom
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            <For
                each=move || signals.markers.get()
                key=|marker| (marker.key.clone(), marker.entries.len())
                children=move |marker| view! { <ResourceMarker marker=marker /> }
            />
        </MapContainer>
    }
}
