use shared::{ApiError, Trip};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::media_gallery::MediaGallery;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::date_utils::{format_date_range, stars};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TripDetailProps {
    pub api_client: ApiClient,
    pub trip_id: Uuid,
    pub on_navigate: Callback<Page>,
}

#[function_component(TripDetail)]
pub fn trip_detail(props: &TripDetailProps) -> Html {
    let trip = use_state(|| Option::<Trip>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);

    use_effect_with((props.api_client.clone(), props.trip_id), {
        let trip = trip.clone();
        let loading = loading.clone();
        let error = error.clone();
        move |(api_client, trip_id): &(ApiClient, Uuid)| {
            let api_client = api_client.clone();
            let trip_id = *trip_id;
            spawn_local(async move {
                loading.set(true);
                match api_client.get_trip(trip_id).await {
                    Ok(data) => {
                        error.set(None);
                        trip.set(Some(data));
                    }
                    Err(e) => {
                        Logger::error_with_component("trip_detail", &format!("Failed to load trip {}: {}", trip_id, e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    if *loading {
        return html! { <div class="loading">{"Chargement du voyage..."}</div> };
    }

    let Some(trip) = (*trip).clone() else {
        return html! { <ErrorBanner error={(*error).clone()} /> };
    };

    let on_place = {
        let on_navigate = props.on_navigate.clone();
        let place_id = trip.lieu.id;
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::PlaceDetail(place_id)))
    };

    html! {
        <div class="trip-detail card">
            <h1>
                <a class="link" onclick={on_place}>{trip.lieu.label()}</a>
            </h1>
            <p class="trip-dates">{format_date_range(&trip.date_debut, trip.date_fin.as_deref())}</p>
            {if let Some(user) = &trip.utilisateur {
                let on_navigate = props.on_navigate.clone();
                let user_id = user.id;
                html! {
                    <p class="trip-author">
                        {"Par "}
                        <a class="link" onclick={move |_| on_navigate.emit(Page::PublicProfile(user_id))}>{user.display_name()}</a>
                    </p>
                }
            } else { html! {} }}
            {if let Some(note) = trip.note {
                html! { <p class="trip-rating">{stars(note)}</p> }
            } else { html! {} }}
            {if !trip.commentaire.is_empty() {
                html! { <blockquote class="trip-comment">{&trip.commentaire}</blockquote> }
            } else { html! {} }}
            <MediaGallery medias={trip.medias.clone()} media_root={props.api_client.config().media_root.clone()} />
        </div>
    }
}
