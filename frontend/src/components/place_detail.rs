use shared::{ApiError, PlaceDetail};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::error_page::ErrorPage;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::date_utils::{format_date_range, stars};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct PlaceDetailProps {
    pub api_client: ApiClient,
    pub place_id: Uuid,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
}

/// Adds the place to favorites, or removes the favorite that points at it.
/// Returns the new favorite state.
async fn toggle_favorite(api_client: &ApiClient, place_id: Uuid, currently: bool) -> Result<bool, ApiError> {
    if !currently {
        api_client.add_favorite(place_id).await?;
        return Ok(true);
    }
    let favorites = api_client.list_favorites().await?;
    match favorites.iter().find(|f| f.lieu.id == place_id) {
        Some(favorite) => api_client.remove_favorite(favorite.id).await?,
        None => Logger::warn_with_component("place_detail", "Favorite flag set but no matching favorite found"),
    }
    Ok(false)
}

#[function_component(PlaceDetailView)]
pub fn place_detail_view(props: &PlaceDetailProps) -> Html {
    let detail = use_state(|| Option::<PlaceDetail>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);
    let toggling = use_state(|| false);

    use_effect_with((props.api_client.clone(), props.place_id), {
        let detail = detail.clone();
        let loading = loading.clone();
        let error = error.clone();
        move |(api_client, place_id): &(ApiClient, Uuid)| {
            let api_client = api_client.clone();
            let place_id = *place_id;
            spawn_local(async move {
                loading.set(true);
                match api_client.get_place_detail(place_id).await {
                    Ok(data) => {
                        error.set(None);
                        detail.set(Some(data));
                    }
                    Err(e) => {
                        Logger::error_with_component("place_detail", &format!("Failed to load place {}: {}", place_id, e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let on_toggle_favorite = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let place_id = props.place_id;
        let detail = detail.clone();
        let error = error.clone();
        let toggling = toggling.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*detail).clone() else {
                return;
            };
            if *toggling {
                return;
            }
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let detail = detail.clone();
            let error = error.clone();
            let toggling = toggling.clone();
            spawn_local(async move {
                toggling.set(true);
                match toggle_favorite(&api_client, place_id, current.is_favori).await {
                    Ok(is_favori) => {
                        error.set(None);
                        Logger::info_with_component("place_detail", if is_favori { "❤️ Added to favorites" } else { "🤍 Removed from favorites" });
                        detail.set(Some(PlaceDetail { is_favori, ..current }));
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => error.set(Some(e)),
                }
                toggling.set(false);
            });
        })
    };

    if *loading {
        return html! { <div class="loading">{"Chargement du lieu..."}</div> };
    }

    let Some(detail) = (*detail).clone() else {
        return match &*error {
            Some(ApiError::NotFound) => html! {
                <ErrorPage code={404} title={Some("Lieu introuvable".to_string())} on_navigate={props.on_navigate.clone()} />
            },
            other => html! { <ErrorBanner error={other.clone()} /> },
        };
    };

    let place = &detail.place;
    let on_back = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Home))
    };

    html! {
        <div class="place-detail">
            <button type="button" class="btn btn-secondary" onclick={on_back}>{"← Retour à l'accueil"}</button>

            <header class="place-header">
                <h1>{&place.nom_ville}</h1>
                <p class="place-country">{&place.pays.nom}</p>
                <p class="place-coords">{format!("📍 {:.4}, {:.4}", place.latitude, place.longitude)}</p>
                {if let Some(average) = place.note_moyenne {
                    html! { <p class="place-rating">{format!("⭐ {:.1} / 5", average)}</p> }
                } else { html! {} }}
                {if props.api_client.is_authenticated() {
                    html! {
                        <button type="button" class="btn favorite-toggle" onclick={on_toggle_favorite} disabled={*toggling}>
                            {if detail.is_favori { "❤️ Lieu favori" } else { "🤍 Ajouter aux favoris" }}
                        </button>
                    }
                } else { html! {} }}
            </header>

            <ErrorBanner error={(*error).clone()} />

            <section class="place-trips">
                <h2>{format!("🧳 Voyages à {} ({})", place.nom_ville, detail.total_voyages)}</h2>
                {if detail.user_voyages.is_empty() {
                    html! { <p class="empty-state">{"Aucun voyage enregistré ici pour l'instant."}</p> }
                } else {
                    html! {
                        <div class="trip-cards">
                            {for detail.user_voyages.iter().map(|trip| {
                                let trip_id = trip.id;
                                let on_navigate = props.on_navigate.clone();
                                html! {
                                    <div class="trip-card" key={trip_id.to_string()} onclick={move |_| on_navigate.emit(Page::TripDetail(trip_id))}>
                                        <strong>
                                            {trip.utilisateur.as_ref().map(|u| u.display_name()).unwrap_or_else(|| "Voyageur".to_string())}
                                        </strong>
                                        <p class="trip-dates">{format_date_range(&trip.date_debut, trip.date_fin.as_deref())}</p>
                                        {if let Some(note) = trip.note {
                                            html! { <p class="trip-rating">{stars(note)}</p> }
                                        } else { html! {} }}
                                        {if !trip.commentaire.is_empty() {
                                            html! { <p class="trip-comment">{&trip.commentaire}</p> }
                                        } else { html! {} }}
                                    </div>
                                }
                            })}
                        </div>
                    }
                }}
            </section>
        </div>
    }
}
