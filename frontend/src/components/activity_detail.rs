use gloo::dialogs::{alert, confirm};
use shared::rating::{rating_eligibility, RatingEligibility};
use shared::{Activity, ApiError, RatingRequest, User};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::media_gallery::MediaGallery;
use super::rating_form::RatingForm;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::date_utils::{format_date_for_display, stars};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ActivityDetailProps {
    pub api_client: ApiClient,
    pub activity_id: Uuid,
    pub user: Option<User>,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
}

#[function_component(ActivityDetail)]
pub fn activity_detail(props: &ActivityDetailProps) -> Html {
    let activity = use_state(|| Option::<Activity>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);
    let show_form = use_state(|| false);
    let submitting = use_state(|| false);
    let reload = use_state(|| 0u32);

    use_effect_with((props.api_client.clone(), props.activity_id, *reload), {
        let activity = activity.clone();
        let loading = loading.clone();
        let error = error.clone();
        move |(api_client, activity_id, _): &(ApiClient, Uuid, u32)| {
            let api_client = api_client.clone();
            let activity_id = *activity_id;
            spawn_local(async move {
                match api_client.get_activity(activity_id).await {
                    Ok(data) => {
                        error.set(None);
                        activity.set(Some(data));
                    }
                    Err(e) => {
                        Logger::error_with_component("activity_detail", &format!("Failed to load activity {}: {}", activity_id, e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let eligibility = match (&*activity, props.user.as_ref()) {
        (Some(activity), viewer) => rating_eligibility(activity, viewer),
        (None, _) => RatingEligibility::Anonymous,
    };
    let existing = match &eligibility {
        RatingEligibility::AlreadyRated(rating) => Some(rating.clone()),
        _ => None,
    };

    let on_rating_submit = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let activity_id = props.activity_id;
        let existing = existing.clone();
        let show_form = show_form.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |(note, commentaire): (u8, String)| {
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let existing = existing.clone();
            let show_form = show_form.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let reload = reload.clone();
            let request = RatingRequest {
                activite: activity_id,
                note,
                commentaire,
            };
            spawn_local(async move {
                submitting.set(true);
                let saved = match &existing {
                    Some(rating) => api_client.update_rating(rating.id, &request).await,
                    None => api_client.create_rating(&request).await,
                };
                match saved {
                    Ok(()) => {
                        Logger::info_with_component("activity_detail", &format!("⭐ Rating saved: {}", request.note));
                        show_form.set(false);
                        reload.set(*reload + 1);
                        alert(if existing.is_some() { "Avis mis à jour avec succès !" } else { "Note ajoutée avec succès !" });
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => error.set(Some(e)),
                }
                submitting.set(false);
            });
        })
    };

    let on_rating_delete = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let existing = existing.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(rating) = existing.clone() else {
                return;
            };
            if !confirm("Êtes-vous sûr de vouloir supprimer votre avis ?") {
                return;
            }
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                submitting.set(true);
                match api_client.delete_rating(rating.id).await {
                    Ok(()) => {
                        reload.set(*reload + 1);
                        alert("Avis supprimé avec succès !");
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => error.set(Some(e)),
                }
                submitting.set(false);
            });
        })
    };

    let open_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(true))
    };
    let close_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };

    if *loading {
        return html! { <div class="loading-message">{"Chargement des détails de l'activité..."}</div> };
    }

    let Some(activity) = (*activity).clone() else {
        return match &*error {
            Some(e) => html! { <ErrorBanner error={Some(e.clone())} /> },
            None => html! { <div class="error-message">{"Activité non trouvée"}</div> },
        };
    };

    let open_user = {
        let on_navigate = props.on_navigate.clone();
        let viewer_id = props.user.as_ref().map(|u| u.id);
        move |user_id: i64| {
            let on_navigate = on_navigate.clone();
            Callback::from(move |_: MouseEvent| {
                if viewer_id == Some(user_id) {
                    on_navigate.emit(Page::Profile);
                } else {
                    on_navigate.emit(Page::PublicProfile(user_id));
                }
            })
        }
    };

    let on_place = {
        let on_navigate = props.on_navigate.clone();
        let place_id = activity.lieu.id;
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::PlaceDetail(place_id)))
    };

    let rating_section = match &eligibility {
        RatingEligibility::Anonymous => {
            let on_navigate = props.on_navigate.clone();
            html! {
                <div class="info-message">
                    <a class="link" onclick={move |_| on_navigate.emit(Page::Login)}>{"Connectez-vous"}</a>
                    {" pour noter cette activité."}
                </div>
            }
        }
        RatingEligibility::AlreadyRated(rating) if !*show_form => html! {
            <div class="user-rating">
                <h3>{"Votre avis"}</h3>
                <p>{stars(rating.note)}</p>
                <p>{&rating.commentaire}</p>
                <button type="button" class="btn btn-secondary" onclick={open_form.clone()} disabled={*submitting}>{"✏️ Modifier"}</button>
                <button type="button" class="btn btn-danger" onclick={on_rating_delete} disabled={*submitting}>{"🗑️ Supprimer"}</button>
            </div>
        },
        RatingEligibility::AlreadyRated(_) | RatingEligibility::CanRate if *show_form => html! {
            <RatingForm
                existing={existing.clone()}
                submitting={*submitting}
                on_submit={on_rating_submit}
                on_cancel={close_form}
            />
        },
        RatingEligibility::CanRate => html! {
            <button type="button" class="btn btn-primary" onclick={open_form}>{"⭐ Noter cette activité"}</button>
        },
        RatingEligibility::NotAllowed(reason) => html! {
            <div class="info-message">{format!("ℹ️ {}", reason.message())}</div>
        },
        RatingEligibility::AlreadyRated(_) => html! {},
    };

    html! {
        <div class="activity-detail card">
            <h1>{&activity.titre}</h1>
            <p class="activity-place"><a class="link" onclick={on_place}>{format!("📍 {}", activity.lieu.label())}</a></p>
            <p class="activity-meta">
                <span class="badge">{activity.type_activite.to_string()}</span>
                <span>{activity.price_label()}</span>
                {if let Some(age) = activity.age_minimum {
                    html! { <span>{format!("{} ans et +", age)}</span> }
                } else { html! {} }}
                {if activity.transport_public { html! { <span>{"🚇 Transports publics"}</span> } } else { html! {} }}
                {if activity.reservation_requise { html! { <span>{"📅 Sur réservation"}</span> } } else { html! {} }}
            </p>
            {if !activity.adresse_precise.is_empty() {
                html! { <p class="activity-address">{format!("🏠 {}", activity.adresse_precise)}</p> }
            } else { html! {} }}
            {if let Some(creator) = &activity.cree_par {
                html! {
                    <p class="activity-author">
                        {"Proposée par "}
                        <a class="link" onclick={open_user(creator.id)}>{&creator.username}</a>
                    </p>
                }
            } else { html! {} }}
            <p class="activity-description">{&activity.description}</p>
            <MediaGallery medias={activity.medias.clone()} media_root={props.api_client.config().media_root.clone()} />

            <ErrorBanner error={(*error).clone()} />

            <section class="activity-ratings">
                <h2>
                    {match activity.note_moyenne {
                        Some(average) => format!("⭐ {:.1} / 5 ({} avis)", average, activity.nombre_notes),
                        None => "Aucun avis pour l'instant".to_string(),
                    }}
                </h2>
                {rating_section}
                <ul class="rating-list">
                    {for activity.notes.iter().map(|rating| html! {
                        <li key={rating.id.to_string()} class="rating-item">
                            {if let Some(author) = &rating.utilisateur {
                                html! { <a class="link" onclick={open_user(author.id)}>{&author.username}</a> }
                            } else { html! {} }}
                            <span class="rating-stars">{stars(rating.note)}</span>
                            {if let Some(date) = &rating.date_creation {
                                html! { <small>{format_date_for_display(date)}</small> }
                            } else { html! {} }}
                            <p>{&rating.commentaire}</p>
                        </li>
                    })}
                </ul>
            </section>
        </div>
    }
}
