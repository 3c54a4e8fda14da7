use std::rc::Rc;

use gloo::dialogs::alert;
use shared::validation::validate_activity_form;
use shared::{Activity, ActivityKind, ApiError, CreateActivityRequest, DistinctVisitedPlace};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::media_picker::MediaPicker;
use crate::hooks::use_media_selection::use_media_selection;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ActivityFormProps {
    pub api_client: ApiClient,
    /// Activities can only be attached to places the user has visited
    pub visited_places: Rc<Vec<DistinctVisitedPlace>>,
    /// Activity being edited; `None` shows the creation form
    #[prop_or_default]
    pub editing: Option<Activity>,
    /// Fired after a successful create or update; the list must be reloaded
    pub on_saved: Callback<()>,
    pub on_cancel: Callback<()>,
    pub on_unauthorized: Callback<()>,
}

#[derive(Clone, Copy)]
enum TextField {
    Titre,
    Prix,
    Age,
    Adresse,
}

#[function_component(ActivityForm)]
pub fn activity_form(props: &ActivityFormProps) -> Html {
    let initial = props
        .editing
        .as_ref()
        .map(CreateActivityRequest::from_activity)
        .unwrap_or_default();
    let form = use_state(move || initial);
    let editing_id = props.editing.as_ref().map(|a| a.id);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);
    let media = use_media_selection();

    let update = {
        let form = form.clone();
        move |apply: Box<dyn Fn(&mut CreateActivityRequest)>| {
            let mut next = (*form).clone();
            apply(&mut next);
            form.set(next);
        }
    };

    let on_text = |field: TextField| {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            update(Box::new(move |form: &mut CreateActivityRequest| match field {
                TextField::Titre => form.titre = value.clone(),
                TextField::Prix => form.prix_estime = Some(value.clone()),
                TextField::Age => form.age_minimum = Some(value.clone()),
                TextField::Adresse => form.adresse_precise = value.clone(),
            }));
        })
    };

    let on_description = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            update(Box::new(move |form: &mut CreateActivityRequest| form.description = value.clone()));
        })
    };

    let on_place = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let lieu_id = Uuid::parse_str(&e.target_unchecked_into::<HtmlSelectElement>().value()).ok();
            update(Box::new(move |form: &mut CreateActivityRequest| form.lieu_id = lieu_id));
        })
    };

    let on_kind = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let kind = ActivityKind::from_str_lossy(&e.target_unchecked_into::<HtmlSelectElement>().value());
            update(Box::new(move |form: &mut CreateActivityRequest| form.type_activite = kind));
        })
    };

    let on_transport = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            update(Box::new(move |form: &mut CreateActivityRequest| form.transport_public = checked));
        })
    };

    let on_booking = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            update(Box::new(move |form: &mut CreateActivityRequest| form.reservation_requise = checked));
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_saved = props.on_saved.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let form = form.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let files = media.files();
        let clear_media = media.actions.clear.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let request = (*form).clone();
            if let Err(e) = validate_activity_form(&request.titre, &request.description, request.lieu_id.is_some()) {
                error.set(Some(e));
                return;
            }
            let update = match editing_id {
                Some(activity_id) => match request.update_request() {
                    Ok(body) => Some((activity_id, body)),
                    Err(e) => {
                        error.set(Some(e));
                        return;
                    }
                },
                None => None,
            };

            let api_client = api_client.clone();
            let on_saved = on_saved.clone();
            let on_unauthorized = on_unauthorized.clone();
            let form = form.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let files = files.clone();
            let clear_media = clear_media.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let saved = match &update {
                    Some((activity_id, body)) => api_client.update_activity(*activity_id, body).await,
                    None => api_client.create_activity(&request, &files).await,
                };

                match saved {
                    Ok(()) => {
                        let verb = if update.is_some() { "updated" } else { "created" };
                        Logger::info_with_component("activity_form", &format!("🎯 Activity {}: {}", verb, request.titre.trim()));
                        form.set(CreateActivityRequest::default());
                        clear_media.emit(());
                        alert(if update.is_some() { "Activité modifiée avec succès !" } else { "Activité créée avec succès !" });
                        on_saved.emit(());
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("activity_form", &format!("Failed to save activity: {}", e));
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

    if props.visited_places.is_empty() && props.editing.is_none() {
        return html! {
            <div class="form-message info">
                {"Ajoutez d'abord un voyage : les activités se créent sur les lieux que vous avez visités."}
            </div>
        };
    }

    html! {
        <section class="activity-form-section">
            <h2>{if props.editing.is_some() { "✏️ Modifier l'activité" } else { "🎯 Nouvelle activité" }}</h2>
            <ErrorBanner error={(*error).clone()} />
            <form class="activity-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="activity-place" class="form-label">{"Lieu visité"}</label>
                    {match &props.editing {
                        // The place of an existing activity cannot change
                        Some(activity) => html! {
                            <input id="activity-place" type="text" class="input" value={activity.lieu.label()} disabled=true />
                        },
                        None => html! {
                            <select id="activity-place" class="input" onchange={on_place} disabled={*submitting} required=true>
                                <option value="" selected={form.lieu_id.is_none()}>{"Choisissez un lieu"}</option>
                                {for props.visited_places.iter().map(|visited| {
                                    let id = visited.place.id;
                                    html! {
                                        <option value={id.to_string()} selected={form.lieu_id == Some(id)}>
                                            {visited.place.label()}
                                        </option>
                                    }
                                })}
                            </select>
                        },
                    }}
                </div>

                <div class="form-group">
                    <label for="activity-title" class="form-label">{"Titre"}</label>
                    <input id="activity-title" type="text" class="input" value={form.titre.clone()}
                        onchange={on_text(TextField::Titre)} disabled={*submitting} required=true />
                </div>

                <div class="form-group">
                    <label for="activity-description" class="form-label">{"Description"}</label>
                    <textarea id="activity-description" class="input" rows="4" value={form.description.clone()}
                        onchange={on_description} disabled={*submitting} />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="activity-kind" class="form-label">{"Catégorie"}</label>
                        <select id="activity-kind" class="input" onchange={on_kind} disabled={*submitting}>
                            {for ActivityKind::ALL.iter().map(|kind| html! {
                                <option value={kind.as_str()} selected={form.type_activite == *kind}>{kind.to_string()}</option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="activity-price" class="form-label">{"Prix estimé (€)"}</label>
                        <input id="activity-price" type="number" min="0" step="0.01" class="input"
                            value={form.prix_estime.clone().unwrap_or_default()}
                            onchange={on_text(TextField::Prix)} disabled={*submitting} />
                    </div>
                    <div class="form-group">
                        <label for="activity-age" class="form-label">{"Âge minimum"}</label>
                        <input id="activity-age" type="number" min="0" class="input"
                            value={form.age_minimum.clone().unwrap_or_default()}
                            onchange={on_text(TextField::Age)} disabled={*submitting} />
                    </div>
                </div>

                <div class="form-group">
                    <label for="activity-address" class="form-label">{"Adresse précise"}</label>
                    <input id="activity-address" type="text" class="input" value={form.adresse_precise.clone()}
                        onchange={on_text(TextField::Adresse)} disabled={*submitting} />
                </div>

                <div class="form-row checkboxes">
                    <label>
                        <input type="checkbox" checked={form.transport_public} onchange={on_transport} disabled={*submitting} />
                        {" 🚇 Accessible en transports publics"}
                    </label>
                    <label>
                        <input type="checkbox" checked={form.reservation_requise} onchange={on_booking} disabled={*submitting} />
                        {" 📅 Réservation requise"}
                    </label>
                </div>

                {if props.editing.is_none() {
                    html! {
                        <MediaPicker
                            items={media.items.clone()}
                            on_select={media.actions.select.clone()}
                            on_remove={media.actions.remove.clone()}
                            disabled={*submitting}
                        />
                    }
                } else { html! {} }}

                <div class="form-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {match (*submitting, props.editing.is_some()) {
                            (true, _) => "Enregistrement...",
                            (false, true) => "Enregistrer les modifications",
                            (false, false) => "Créer l'activité",
                        }}
                    </button>
                    <button type="button" class="btn btn-secondary cancel" onclick={on_cancel}>{"Annuler"}</button>
                </div>
            </form>
        </section>
    }
}
