use gloo::dialogs::confirm;
use shared::{ApiError, Favorite};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_date_for_display;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FavoritesProps {
    pub api_client: ApiClient,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
}

#[function_component(Favorites)]
pub fn favorites(props: &FavoritesProps) -> Html {
    let favorites = use_state(Vec::<Favorite>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);

    use_effect_with(props.api_client.clone(), {
        let favorites = favorites.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        move |api_client: &ApiClient| {
            let api_client = api_client.clone();
            spawn_local(async move {
                loading.set(true);
                match api_client.list_favorites().await {
                    Ok(data) => {
                        error.set(None);
                        favorites.set(data);
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("favorites", &format!("Failed to load favorites: {}", e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let on_remove = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let favorites = favorites.clone();
        let error = error.clone();
        move |favorite_id: i64| {
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let favorites = favorites.clone();
            let error = error.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                if !confirm("Retirer ce lieu de vos favoris ?") {
                    return;
                }
                let api_client = api_client.clone();
                let on_unauthorized = on_unauthorized.clone();
                let favorites = favorites.clone();
                let error = error.clone();
                spawn_local(async move {
                    match api_client.remove_favorite(favorite_id).await {
                        Ok(()) => {
                            let remaining: Vec<Favorite> = favorites.iter().filter(|f| f.id != favorite_id).cloned().collect();
                            favorites.set(remaining);
                        }
                        Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                        Err(e) => error.set(Some(e)),
                    }
                });
            })
        }
    };

    html! {
        <div class="favorites">
            <h1>{"❤️ Mes lieux favoris"}</h1>
            <ErrorBanner error={(*error).clone()} />
            {if *loading {
                html! { <div class="loading">{"Chargement des favoris..."}</div> }
            } else if favorites.is_empty() {
                html! { <p class="empty-state">{"Vous n'avez pas encore de lieu favori."}</p> }
            } else {
                html! {
                    <ul class="favorite-list">
                        {for favorites.iter().map(|favorite| {
                            let place_id = favorite.lieu.id;
                            let on_navigate = props.on_navigate.clone();
                            html! {
                                <li key={favorite.id} class="favorite-item" onclick={move |_| on_navigate.emit(Page::PlaceDetail(place_id))}>
                                    <div>
                                        <strong>{favorite.lieu.label()}</strong>
                                        {if let Some(added) = &favorite.date_ajout {
                                            html! { <small>{format!("Ajouté le {}", format_date_for_display(added))}</small> }
                                        } else { html! {} }}
                                    </div>
                                    <button type="button" class="btn-delete" onclick={on_remove(favorite.id)}>{"Retirer"}</button>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </div>
    }
}
