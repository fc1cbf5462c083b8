use leptos::prelude::*;
use thaw::{Combobox, ComboboxOption, Flex, FlexAlign, Label};

use super::surface::ControllerHandle;

/// Town picker fed by the city list. Picking "All towns" clears the filter.
#[component]
pub fn DropDownTowns(
    controller: ControllerHandle,
    towns: RwSignal<Vec<String>>,
    selected: RwSignal<Option<String>>,
) -> impl IntoView {
    Effect::new(move |_| {
        let town = selected.get().filter(|t| !t.is_empty());
        controller.update_value(|c| match town {
            Some(town) => c.set_town_filter(town),
            None => c.clear_town_filter(),
        });
    });

    view! {
        <Flex vertical=true align=FlexAlign::Start>
            <Label>"Town"</Label>
            <Combobox selected_options=selected placeholder="All towns">
                <ComboboxOption value="" text="All towns" />
                {move || towns.get().into_iter().map(|town| {
                    view! {
                        <ComboboxOption value=town.clone() text=town />
                    }
                }).collect_view()}
            </Combobox>
        </Flex>
    }
}
