use directory::{fetch_directory, DirectoryConfig, MapViewController};
use leptos::{
    logging::{error, log},
    prelude::*,
    task::spawn_local,
};

use super::{
    filter_panel::FilterPanel,
    legend::MapLegend,
    map_renderer::MapRenderer,
    results_sidebar::ResultsSidebar,
    surface::{
        ControllerHandle, LeafletMapSurface, MapSignals, ResultsSidebarSurface, ServerDataService,
        SidebarSignals,
    },
};
use crate::components::LoadStatus;

#[component]
pub fn ResourceDirectory() -> impl IntoView {
    let config = DirectoryConfig::default();
    let map_signals = MapSignals::new();
    let sidebar_signals = SidebarSignals::new();
    let towns = RwSignal::new(Vec::<String>::new());
    let sidebar_collapsed = RwSignal::new(false);

    let controller: ControllerHandle = StoredValue::new_local(MapViewController::new(
        ServerDataService,
        LeafletMapSurface::new(map_signals),
        ResultsSidebarSurface::new(sidebar_signals),
        &config,
    ));

    let load = move || {
        spawn_local(async move {
            let result = fetch_directory(&ServerDataService).await;
            controller.update_value(|c| c.complete_load(result));
            towns.set(controller.with_value(|c| c.cities().to_vec()));
        });
    };

    // Effects only run in the browser, so the fetch never happens during SSR.
    Effect::new(move |_| {
        controller.update_value(|c| {
            c.begin_load(|result| match result {
                Ok(summary) => log!(
                    "Loaded {} of {} resources, {} on the map",
                    summary.active,
                    summary.total,
                    summary.placeable
                ),
                Err(e) => error!("Directory load failed: {}", e),
            })
        });
        load();
    });

    let retry = move || {
        controller.update_value(|c| c.mark_loading());
        load();
    };

    view! {
        <div class="explore-container">
            <div class="explore-header">
                <div class="header-content">
                    <h1>"Find Food Assistance"</h1>
                    <div class="location-stats">
                        <span class="stat-item">
                            <span class="stat-value">{move || sidebar_signals.total.get()}</span>
                            <span class="stat-label">" resources"</span>
                        </span>
                        <span class="stat-item">
                            <span class="stat-value">{move || towns.with(Vec::len)}</span>
                            <span class="stat-label">" towns"</span>
                        </span>
                    </div>
                </div>
            </div>

            <LoadStatus state=sidebar_signals.load_state on_retry=retry />

            <div class="explore-content">
                <div class="explore-sidebar" class:collapsed=move || sidebar_collapsed.get()>
                    <button
                        class="sidebar-toggle"
                        on:click=move |_| sidebar_collapsed.update(|c| *c = !*c)
                    >
                        {move || if sidebar_collapsed.get() { "›" } else { "‹" }}
                    </button>
                    <div style:display=move || if sidebar_collapsed.get() { "none" } else { "block" }>
                        <FilterPanel controller=controller towns=towns />
                    </div>
                </div>

                <div class="explore-map-wrapper">
                    <MapRenderer
                        signals=map_signals
                        center=config.default_center
                        zoom=config.default_zoom
                    />
                    <MapLegend entries=map_signals.legend />
                </div>

                <ResultsSidebar controller=controller signals=sidebar_signals />
            </div>
        </div>
    }
}
