use std::rc::Rc;

use shared::DistinctVisitedPlace;
use yew::prelude::*;

use crate::page::Page;
use crate::services::date_utils::format_date_for_display;

#[derive(Properties, PartialEq)]
pub struct VisitedPlacesProps {
    pub places: Rc<Vec<DistinctVisitedPlace>>,
    pub on_navigate: Callback<Page>,
}

/// Places the user has been to, most recent visit first
#[function_component(VisitedPlaces)]
pub fn visited_places(props: &VisitedPlacesProps) -> Html {
    if props.places.is_empty() {
        return html! {};
    }

    html! {
        <section class="visited-places">
            <h2>{format!("📍 Lieux visités ({})", props.places.len())}</h2>
            <ul class="visited-list">
                {for props.places.iter().map(|visited| {
                    let place_id = visited.place.id;
                    let on_navigate = props.on_navigate.clone();
                    html! {
                        <li key={place_id.to_string()} onclick={move |_| on_navigate.emit(Page::PlaceDetail(place_id))}>
                            <strong>{visited.place.label()}</strong>
                            <span class="visit-count">
                                {if visited.visit_count > 1 {
                                    format!("{} visites", visited.visit_count)
                                } else {
                                    "1 visite".to_string()
                                }}
                            </span>
                            <small>{format!("Dernière visite : {}", format_date_for_display(&visited.last_visit))}</small>
                        </li>
                    }
                })}
            </ul>
        </section>
    }
}
