use std::rc::Rc;

use gloo::dialogs::alert;
use shared::search::PlaceCandidate;
use shared::validation::{parse_rating, validate_trip_dates};
use shared::{ApiError, CreateTripRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::media_picker::MediaPicker;
use crate::hooks::use_debounced_search::{use_debounced_search, SearchFn, SearchFuture};
use crate::hooks::use_media_selection::use_media_selection;
use crate::services::api::ApiClient;
use crate::services::date_utils::get_current_date;
use crate::services::geonames;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TripFormProps {
    pub api_client: ApiClient,
    /// Fired once the server accepted the trip; the list must be reloaded
    pub on_created: Callback<()>,
    pub on_cancel: Callback<()>,
    pub on_unauthorized: Callback<()>,
}

#[function_component(TripForm)]
pub fn trip_form(props: &TripFormProps) -> Html {
    let selected_place = use_state(|| Option::<PlaceCandidate>::None);
    let date_debut = use_state(String::new);
    let date_fin = use_state(String::new);
    let note = use_state(String::new);
    let commentaire = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);
    let media = use_media_selection();

    let search: SearchFn<Vec<PlaceCandidate>> = {
        let config = props.api_client.config().clone();
        Rc::new(move |query: String| -> SearchFuture<Vec<PlaceCandidate>> {
            let config = config.clone();
            Box::pin(async move { geonames::search_places(&config, &query).await })
        })
    };
    let place_search = use_debounced_search(props.api_client.config().search_debounce_ms, search);

    let on_place_input = {
        let set_query = place_search.actions.set_query.clone();
        let selected_place = selected_place.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // Typing again invalidates a previous pick
            selected_place.set(None);
            set_query.emit(input.value());
        })
    };

    let on_place_pick = {
        let selected_place = selected_place.clone();
        let clear = place_search.actions.clear.clone();
        move |candidate: PlaceCandidate| {
            let selected_place = selected_place.clone();
            let clear = clear.clone();
            Callback::from(move |_: MouseEvent| {
                Logger::debug_with_component("trip_form", &format!("📍 Picked {}", candidate.label()));
                clear.emit(());
                selected_place.set(Some(candidate.clone()));
            })
        }
    };

    let text_setter = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_note_change = {
        let note = note.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            note.set(select.value());
        })
    };

    let on_comment_change = {
        let commentaire = commentaire.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            commentaire.set(area.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_created = props.on_created.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let selected_place = selected_place.clone();
        let date_debut = date_debut.clone();
        let date_fin = date_fin.clone();
        let note = note.clone();
        let commentaire = commentaire.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let files = media.files();
        let clear_media = media.actions.clear.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let Some(candidate) = (*selected_place).clone() else {
                error.set(Some(ApiError::invalid("lieu_id", "Veuillez sélectionner un lieu dans la liste")));
                return;
            };
            let end = Some((*date_fin).clone()).filter(|d| !d.is_empty());
            if let Err(e) = validate_trip_dates(&date_debut, end.as_deref()) {
                error.set(Some(e));
                return;
            }
            let rating = match parse_rating(&note) {
                Ok(rating) => rating,
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            };

            let api_client = api_client.clone();
            let on_created = on_created.clone();
            let on_unauthorized = on_unauthorized.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let files = files.clone();
            let clear_media = clear_media.clone();
            let date_debut = (*date_debut).clone();
            let commentaire = Some((*commentaire).clone()).filter(|c| !c.trim().is_empty());

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let label = candidate.label();
                let created: Result<(), ApiError> = async {
                    let lieu_id = api_client.ensure_place(&candidate).await?;
                    let request = CreateTripRequest {
                        lieu_id,
                        date_debut,
                        date_fin: end,
                        note: rating,
                        commentaire,
                    };
                    api_client.create_trip(&request, &files).await
                }
                .await;

                match created {
                    Ok(()) => {
                        Logger::info_with_component("trip_form", &format!("✈️ Trip created: {}", label));
                        clear_media.emit(());
                        alert("Voyage créé avec succès !");
                        on_created.emit(());
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("trip_form", &format!("Failed to create trip: {}", e));
                        error.set(Some(e));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let today = get_current_date();
    let place_value = match &*selected_place {
        Some(candidate) => candidate.label(),
        None => place_search.state.query.clone(),
    };

    html! {
        <section class="trip-form-section">
            <h2>{"✈️ Nouveau voyage"}</h2>
            <ErrorBanner error={(*error).clone()} />
            <form class="trip-form" onsubmit={on_submit}>
                <div class="form-group place-autocomplete">
                    <label for="trip-place" class="form-label">{"Destination"}</label>
                    <input
                        id="trip-place"
                        type="text"
                        class="input"
                        placeholder="Paris, Tokyo, Marrakech..."
                        value={place_value}
                        oninput={on_place_input}
                        disabled={*submitting}
                        autocomplete="off"
                    />
                    {if place_search.state.loading {
                        html! { <small class="hint">{"Recherche..."}</small> }
                    } else { html! {} }}
                    {match &place_search.state.results {
                        Some(candidates) if !candidates.is_empty() && selected_place.is_none() => html! {
                            <div class="tm-dropdown">
                                {for candidates.iter().cloned().map(|candidate| html! {
                                    <div class="tm-item" onclick={on_place_pick(candidate.clone())}>
                                        <strong>{&candidate.name}</strong>
                                        <small>{&candidate.country_name}</small>
                                    </div>
                                })}
                            </div>
                        },
                        Some(_) if selected_place.is_none() => html! {
                            <div class="tm-dropdown tm-empty">{"Aucun lieu trouvé"}</div>
                        },
                        _ => html! {},
                    }}
                    <ErrorBanner error={place_search.state.error.clone()} />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="date-debut" class="form-label">{"Date de début"}</label>
                        <input
                            id="date-debut"
                            type="date"
                            class="input"
                            max={today.clone()}
                            value={(*date_debut).clone()}
                            onchange={text_setter(&date_debut)}
                            disabled={*submitting}
                            required=true
                        />
                    </div>
                    <div class="form-group">
                        <label for="date-fin" class="form-label">{"Date de fin"}</label>
                        <input
                            id="date-fin"
                            type="date"
                            class="input"
                            min={(*date_debut).clone()}
                            value={(*date_fin).clone()}
                            onchange={text_setter(&date_fin)}
                            disabled={*submitting}
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="trip-note" class="form-label">{"Note"}</label>
                    <select id="trip-note" class="input" onchange={on_note_change} disabled={*submitting}>
                        <option value="" selected={note.is_empty()}>{"Pas de note"}</option>
                        {for (1..=5u8).map(|n| html! {
                            <option value={n.to_string()} selected={*note == n.to_string()}>
                                {format!("{} ★", n)}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="trip-comment" class="form-label">{"Commentaire"}</label>
                    <textarea
                        id="trip-comment"
                        class="input"
                        rows="3"
                        value={(*commentaire).clone()}
                        onchange={on_comment_change}
                        disabled={*submitting}
                    />
                </div>

                <MediaPicker
                    items={media.items.clone()}
                    on_select={media.actions.select.clone()}
                    on_remove={media.actions.remove.clone()}
                    disabled={*submitting}
                />

                <div class="form-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Enregistrement..." } else { "Créer le voyage" }}
                    </button>
                    <button type="button" class="btn btn-secondary cancel" onclick={on_cancel}>
                        {"Annuler"}
                    </button>
                </div>
            </form>
        </section>
    }
}
