use gloo::dialogs::alert;
use shared::media::{resolve_media_url, MediaKind};
use shared::{ApiError, ProfileDetail, User, UserStats};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::visited_countries::VisitedCountriesPanel;
use crate::page::Page;
use crate::services::api::{ApiClient, ProfileUpdate};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ProfileProps {
    pub api_client: ApiClient,
    pub user: User,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
    /// Receives the avatar path after a profile fetch or an upload
    pub on_avatar: Callback<String>,
}

#[function_component(Profile)]
pub fn profile(props: &ProfileProps) -> Html {
    let stats = use_state(|| Option::<UserStats>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);
    let detail = use_state(ProfileDetail::default);
    let bio_draft = use_state(|| Option::<String>::None);
    let saving = use_state(|| false);

    use_effect_with((props.api_client.clone(), props.user.id), {
        let stats = stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        let detail = detail.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let on_avatar = props.on_avatar.clone();
        move |(api_client, _): &(ApiClient, i64)| {
            let api_client = api_client.clone();
            spawn_local(async move {
                loading.set(true);
                match api_client.get_profile().await {
                    Ok(data) => {
                        error.set(None);
                        stats.set(Some(data));
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("profile", &format!("Failed to load stats: {}", e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);

                match api_client.get_profile_detail().await {
                    Ok(data) => {
                        if let Some(path) = data.avatar_path() {
                            on_avatar.emit(path.to_string());
                        }
                        detail.set(data);
                    }
                    Err(e) => Logger::debug_with_component("profile", &format!("No profile detail: {}", e)),
                }
            });
            || ()
        }
    });

    let on_edit_bio = {
        let bio_draft = bio_draft.clone();
        let current = detail.bio.clone().unwrap_or_default();
        Callback::from(move |_: MouseEvent| bio_draft.set(Some(current.clone())))
    };

    let on_bio_input = {
        let bio_draft = bio_draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            bio_draft.set(Some(area.value()));
        })
    };

    let on_cancel_bio = {
        let bio_draft = bio_draft.clone();
        Callback::from(move |_: MouseEvent| bio_draft.set(None))
    };

    let on_save_bio = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let bio_draft = bio_draft.clone();
        let detail = detail.clone();
        let saving = saving.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(bio) = (*bio_draft).clone() else {
                return;
            };
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let bio_draft = bio_draft.clone();
            let detail = detail.clone();
            let saving = saving.clone();
            let error = error.clone();
            spawn_local(async move {
                saving.set(true);
                let bio = bio.trim().to_string();
                match api_client.update_profile(ProfileUpdate::Bio(bio.clone())).await {
                    Ok(_) => {
                        Logger::info_with_component("profile", "📝 Bio updated");
                        error.set(None);
                        detail.set(ProfileDetail { bio: Some(bio), ..(*detail).clone() });
                        bio_draft.set(None);
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => error.set(Some(e)),
                }
                saving.set(false);
            });
        })
    };

    let on_avatar_pick = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let on_avatar = props.on_avatar.clone();
        let saving = saving.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            if MediaKind::from_mime(&file.type_()) != Some(MediaKind::Image) {
                error.set(Some(ApiError::invalid("profile_image", "Veuillez choisir une image")));
                return;
            }
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let on_avatar = on_avatar.clone();
            let saving = saving.clone();
            let error = error.clone();
            spawn_local(async move {
                saving.set(true);
                match api_client.update_profile(ProfileUpdate::Image(file)).await {
                    Ok(updated) => match updated.avatar_path() {
                        Some(path) => {
                            // Bust the browser cache, the file name is reused
                            let separator = if path.contains('?') { '&' } else { '?' };
                            on_avatar.emit(format!("{}{}t={}", path, separator, js_sys::Date::now() as u64));
                            error.set(None);
                            alert("Photo de profil enregistrée avec succès !");
                        }
                        None => alert("Photo uploadée mais URL non reçue"),
                    },
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("profile", &format!("Avatar upload failed: {}", e));
                        error.set(Some(e));
                    }
                }
                saving.set(false);
            });
        })
    };

    let avatar = resolve_media_url(&props.api_client.config().media_root, props.user.profile_image.as_deref());

    html! {
        <div class="profile">
            <header class="profile-header card">
                <div class="profile-avatar-wrapper">
                    <img class="profile-avatar" src={avatar} alt={props.user.username.clone()} />
                    <label class="btn btn-secondary avatar-upload">
                        {"📷 Changer la photo"}
                        <input type="file" accept="image/*" hidden=true onchange={on_avatar_pick} disabled={*saving} />
                    </label>
                </div>
                <div>
                    <h1>{props.user.display_name()}</h1>
                    <p class="profile-username">{format!("@{}", props.user.username)}</p>
                    {if !props.user.email.is_empty() {
                        html! { <p class="profile-email">{&props.user.email}</p> }
                    } else { html! {} }}
                    {match &*bio_draft {
                        Some(draft) => html! {
                            <div class="bio-editor">
                                <textarea class="input" rows="3" maxlength="500" value={draft.clone()}
                                    oninput={on_bio_input} disabled={*saving} />
                                <div class="form-buttons">
                                    <button type="button" class="btn btn-primary" onclick={on_save_bio} disabled={*saving}>
                                        {if *saving { "Enregistrement..." } else { "Enregistrer" }}
                                    </button>
                                    <button type="button" class="btn btn-secondary" onclick={on_cancel_bio}>{"Annuler"}</button>
                                </div>
                            </div>
                        },
                        None => html! {
                            <p class="profile-bio">
                                {detail.bio.clone().filter(|b| !b.trim().is_empty()).unwrap_or_else(|| "Aucune bio pour le moment.".to_string())}
                                <button type="button" class="btn-link" onclick={on_edit_bio}>{"✏️ Modifier"}</button>
                            </p>
                        },
                    }}
                </div>
            </header>

            <ErrorBanner error={(*error).clone()} />

            {if *loading {
                html! { <div class="loading">{"Chargement du profil..."}</div> }
            } else if let Some(stats) = &*stats {
                html! {
                    <>
                        <div class="profile-stats">
                            <div class="stat"><strong>{stats.score_total}</strong><span>{"Score"}</span></div>
                            <div class="stat"><strong>{stats.nombre_voyages}</strong><span>{"Voyages"}</span></div>
                            <div class="stat"><strong>{stats.lieux_visites.len()}</strong><span>{"Lieux"}</span></div>
                            <div class="stat"><strong>{stats.nombre_favoris}</strong><span>{"Favoris"}</span></div>
                        </div>
                        <VisitedCountriesPanel countries={stats.pays_visites.clone()} />
                        {if !stats.lieux_visites.is_empty() {
                            html! {
                                <section class="profile-places">
                                    <h2>{"📍 Lieux visités"}</h2>
                                    <ul>
                                        {for stats.lieux_visites.iter().map(|place| {
                                            let place_id = place.id;
                                            let on_navigate = props.on_navigate.clone();
                                            html! {
                                                <li key={place_id.to_string()} onclick={move |_| on_navigate.emit(Page::PlaceDetail(place_id))}>
                                                    {place.label()}
                                                </li>
                                            }
                                        })}
                                    </ul>
                                </section>
                            }
                        } else { html! {} }}
                    </>
                }
            } else { html! {} }}
        </div>
    }
}
