use directory::RadiusFilter;
use leptos::{logging::error, prelude::*, task::spawn_local};
use shared_types::Category;
use thaw::{Button, ButtonAppearance, Input, Slider};

use super::{drop_down_towns::DropDownTowns, surface::ControllerHandle};
use crate::server::locate_postal_code;

const DEFAULT_RADIUS_MILES: f64 = 10.0;

#[component]
pub fn FilterPanel(controller: ControllerHandle, towns: RwSignal<Vec<String>>) -> impl IntoView {
    let selected_categories = RwSignal::new(Vec::<String>::new());
    let selected_town = RwSignal::new(None::<String>);
    let zip_code = RwSignal::new(String::new());
    let radius_miles = RwSignal::new(DEFAULT_RADIUS_MILES);
    let locating = RwSignal::new(false);
    let radius_error = RwSignal::new(None::<String>);

    let toggle_category = move |label: String, checked: bool| {
        selected_categories.update(|selected| {
            if checked {
                if !selected.contains(&label) {
                    selected.push(label);
                }
            } else {
                selected.retain(|l| l != &label);
            }
        });
        let selected = selected_categories.get_untracked();
        controller.update_value(|c| {
            if selected.is_empty() {
                c.clear_category_filter();
            } else {
                c.set_category_filter(selected);
            }
        });
    };

    let apply_radius = move || {
        let zip = zip_code.get_untracked().trim().to_string();
        if zip.is_empty() {
            radius_error.set(Some("Enter a ZIP code".to_string()));
            return;
        }
        let miles = radius_miles.get_untracked();
        locating.set(true);
        radius_error.set(None);

        spawn_local(async move {
            match locate_postal_code(zip.clone()).await {
                Ok(center) => controller.update_value(|c| {
                    c.set_radius_filter(RadiusFilter {
                        zip_code: Some(zip),
                        center,
                        radius_miles: miles,
                    })
                }),
                Err(e) => {
                    error!("Radius lookup failed: {}", e);
                    radius_error.set(Some(e.to_string()));
                }
            }
            locating.set(false);
        });
    };

    // Moving the slider re-applies an active radius without geocoding again.
    Effect::new(move |_| {
        let miles = radius_miles.get();
        controller.update_value(|c| {
            if let Some(current) = c.get_radius_filter().cloned() {
                if current.radius_miles != miles {
                    c.set_radius_filter(RadiusFilter {
                        radius_miles: miles,
                        ..current
                    });
                }
            }
        });
    });

    let clear_radius = move |_| {
        zip_code.set(String::new());
        radius_error.set(None);
        controller.update_value(|c| c.clear_radius_filter());
    };

    let clear_filters = move |_ev: web_sys::MouseEvent| {
        selected_categories.set(Vec::new());
        selected_town.set(None);
        zip_code.set(String::new());
        radius_miles.set(DEFAULT_RADIUS_MILES);
        radius_error.set(None);
        controller.update_value(|c| c.clear_filters());
    };

    view! {
        <div class="sidebar-content">
            <div class="filter-section category-filters">
                <h3>"Type of Help"</h3>
                <div class="category-checkbox-grid">
                    {Category::KNOWN.into_iter().map(|category| {
                        let label = category.to_string();
                        let checked_label = label.clone();
                        let change_label = label.clone();
                        view! {
                            <label class="category-checkbox-label">
                                <input
                                    type="checkbox"
                                    class="category-checkbox"
                                    on:change=move |ev| {
                                        toggle_category(change_label.clone(), event_target_checked(&ev));
                                    }
                                    prop:checked=move || selected_categories.with(|s| s.contains(&checked_label))
                                />
                                <span class="category-name">{label}</span>
                            </label>
                        }
                    }).collect_view()}
                </div>
            </div>

            <div class="filter-section">
                <DropDownTowns controller=controller towns=towns selected=selected_town />
            </div>

            <div class="filter-section distance-filter">
                <h3>"Distance"</h3>
                <div class="distance-container">
                    <Input value=zip_code placeholder="ZIP code" />
                    <div class="distance-display">
                        <span class="distance-value">{move || radius_miles.get() as i32}</span>
                        <span class="distance-unit">" miles"</span>
                    </div>
                    <Slider value=radius_miles min=1.0 max=50.0 step=1.0 />
                    <div class="distance-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || locating.get())
                            on_click=move |_| apply_radius()
                        >
                            {move || if locating.get() { "Locating..." } else { "Search nearby" }}
                        </Button>
                        <button class="preset-btn" on:click=clear_radius>"Any distance"</button>
                    </div>
                    {move || radius_error.get().map(|message| view! {
                        <p class="filter-error">{message}</p>
                    })}
                </div>
            </div>

            <button class="clear-filters" on:click=clear_filters>
                "Clear All Filters"
            </button>
        </div>
    }
}
