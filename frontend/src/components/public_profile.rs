use shared::media::resolve_media_url;
use shared::{ApiError, PublicProfile};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_page::ErrorPage;
use super::visited_countries::VisitedCountriesPanel;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_date_for_display;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct PublicProfileProps {
    pub api_client: ApiClient,
    pub user_id: i64,
    pub on_navigate: Callback<Page>,
}

#[function_component(PublicProfileView)]
pub fn public_profile_view(props: &PublicProfileProps) -> Html {
    let profile = use_state(|| Option::<PublicProfile>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);

    use_effect_with((props.api_client.clone(), props.user_id), {
        let profile = profile.clone();
        let loading = loading.clone();
        let error = error.clone();
        move |(api_client, user_id): &(ApiClient, i64)| {
            let api_client = api_client.clone();
            let user_id = *user_id;
            spawn_local(async move {
                loading.set(true);
                match api_client.get_public_profile(user_id).await {
                    Ok(data) => {
                        error.set(None);
                        profile.set(Some(data));
                    }
                    Err(e) => {
                        Logger::warn_with_component("public_profile", &format!("Failed to load profile {}: {}", user_id, e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    if *loading {
        return html! { <div class="loading">{"Chargement du profil..."}</div> };
    }

    let Some(profile) = (*profile).clone() else {
        let hint = (*error).as_ref().map(|e| e.to_string());
        return html! {
            <ErrorPage code={404} title={Some("Profil non trouvé".to_string())} {hint} on_navigate={props.on_navigate.clone()} />
        };
    };

    let avatar = resolve_media_url(&props.api_client.config().media_root, profile.profile_image_url.as_deref());
    let full_name = format!("{} {}", profile.first_name, profile.last_name).trim().to_string();
    let on_back = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Home))
    };

    html! {
        <div class="public-profile">
            <button type="button" class="btn btn-secondary" onclick={on_back}>{"← Retour"}</button>
            <header class="profile-header card">
                <img class="profile-avatar" src={avatar} alt={profile.username.clone()} />
                <div>
                    <h1>{if full_name.is_empty() { profile.username.clone() } else { full_name }}</h1>
                    <p class="profile-username">{format!("@{}", profile.username)}</p>
                    {if let Some(bio) = profile.bio.as_ref().filter(|b| !b.is_empty()) {
                        html! { <p class="profile-bio">{bio}</p> }
                    } else { html! {} }}
                    {if let Some(joined) = &profile.date_joined {
                        html! { <small>{format!("Membre depuis le {}", format_date_for_display(joined))}</small> }
                    } else { html! {} }}
                </div>
            </header>
            <div class="profile-stats">
                <div class="stat"><strong>{profile.score_total}</strong><span>{"Score"}</span></div>
                <div class="stat"><strong>{profile.nombre_voyages}</strong><span>{"Voyages"}</span></div>
                <div class="stat"><strong>{profile.nombre_activites_creees}</strong><span>{"Activités créées"}</span></div>
            </div>
            <VisitedCountriesPanel countries={profile.pays_visites.clone()} />
        </div>
    }
}
