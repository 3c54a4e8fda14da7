use std::rc::Rc;

use gloo::dialogs::confirm;
use shared::paging::DisplayWindow;
use shared::Trip;
use uuid::Uuid;
use yew::prelude::*;

use crate::page::Page;
use crate::services::date_utils::{format_date_range, stars};

#[derive(Properties, PartialEq)]
pub struct TripListProps {
    pub trips: Rc<Vec<Trip>>,
    pub loading: bool,
    pub on_delete: Callback<Uuid>,
    pub on_navigate: Callback<Page>,
}

#[function_component(TripList)]
pub fn trip_list(props: &TripListProps) -> Html {
    let window = use_state(DisplayWindow::default);

    if props.loading && props.trips.is_empty() {
        return html! { <div class="loading">{"Chargement des voyages..."}</div> };
    }

    if props.trips.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{"Aucun voyage pour l'instant. Ajoutez votre première destination !"}</p>
            </div>
        };
    }

    let on_more = {
        let window = window.clone();
        Callback::from(move |_: MouseEvent| window.set(window.more()))
    };
    let on_less = {
        let window = window.clone();
        Callback::from(move |_: MouseEvent| window.set(window.less()))
    };

    html! {
        <section class="trip-list">
            
            <div class="trip-cards">
                {for window.slice(props.trips.as_slice()).iter().map(|trip| {
                    let trip_id = trip.id;
                    let on_open = {
                        let on_navigate = props.on_navigate.clone();
                        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::TripDetail(trip_id)))
                    };
                    let on_delete = {
                        let on_delete = props.on_delete.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.stop_propagation();
                            if confirm("Êtes-vous sûr de vouloir supprimer ce voyage ?") {
                                on_delete.emit(trip_id);
                            }
                        })
                    };
                    html! {
                        <div class="trip-card" key={trip_id.to_string()} onclick={on_open}>
                            <div class="trip-card-header">
                                <h3>{trip.lieu.label()}</h3>
                                <button type="button" class="btn-delete" title="Supprimer" onclick={on_delete}>{"🗑️"}</button>
                            </div>
                            <p class="trip-dates">{format_date_range(&trip.date_debut, trip.date_fin.as_deref())}</p>
                            {if let Some(note) = trip.note {
                                html! { <p class="trip-rating">{stars(note)}</p> }
                            } else { html! {} }}
                            {if !trip.commentaire.is_empty() {
                                html! { <p class="trip-comment">{&trip.commentaire}</p> }
                            } else { html! {} }}
                            {if !trip.medias.is_empty() {
                                html! { <small class="trip-media-count">{format!("📷 {} média(s)", trip.medias.len())}</small> }
                            } else { html! {} }}
                        </div>
                    }
                })}
            </div>
            <div class="list-paging">
                {if window.can_show_more(props.trips.len()) {
                    html! { <button type="button" class="btn btn-secondary" onclick={on_more}>{"Voir plus"}</button> }
                } else { html! {} }}
                {if window.can_show_less() {
                    html! { <button type="button" class="btn btn-secondary" onclick={on_less}>{"Voir moins"}</button> }
                } else { html! {} }}
            </div>
        </section>
    }
}
