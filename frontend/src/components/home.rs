use std::rc::Rc;

use shared::search::{ghost_text, RecentKind, RecentSearch, RecentSearches};
use shared::{Country, PlaceSummary, SearchResults};
use uuid::Uuid;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use crate::hooks::use_debounced_search::{use_debounced_search, SearchFn, SearchFuture};
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub api_client: ApiClient,
    pub on_navigate: Callback<Page>,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let recent = use_state(storage::load_recent_searches);

    let search: SearchFn<SearchResults> = {
        let api_client = props.api_client.clone();
        Rc::new(move |query: String| -> SearchFuture<SearchResults> {
            let api_client = api_client.clone();
            Box::pin(async move { api_client.search(&query).await })
        })
    };
    let delay = props.api_client.config().search_debounce_ms;
    let search = use_debounced_search(delay, search);

    let results = search.state.results.clone().unwrap_or_default();
    let ghost = ghost_text(&search.state.query, &results).unwrap_or_default();

    let remember = {
        let recent = recent.clone();
        move |entry: RecentSearch| {
            let mut next: RecentSearches = (*recent).clone();
            next.record(entry);
            storage::save_recent_searches(&next);
            recent.set(next);
        }
    };

    let on_input = {
        let set_query = search.actions.set_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_query.emit(input.value());
        })
    };

    let on_keydown = {
        let set_query = search.actions.set_query.clone();
        let ghost = ghost.clone();
        Callback::from(move |e: KeyboardEvent| {
            let key = e.key();
            if (key == "Tab" || key == "ArrowRight") && !ghost.is_empty() {
                e.prevent_default();
                set_query.emit(ghost.clone());
            }
        })
    };

    let on_place_select = {
        let on_navigate = props.on_navigate.clone();
        let set_query = search.actions.set_query.clone();
        let remember = remember.clone();
        move |place: PlaceSummary| {
            let remember = remember.clone();
            let on_navigate = on_navigate.clone();
            let set_query = set_query.clone();
            Callback::from(move |_: MouseEvent| {
                let label = place.label();
                Logger::debug_with_component("home", &format!("Place selected: {}", label));
                set_query.emit(label.clone());
                remember(RecentSearch {
                    label,
                    kind: Some(RecentKind::Lieu),
                    id: Some(place.id.to_string()),
                });
                on_navigate.emit(Page::PlaceDetail(place.id));
            })
        }
    };

    let on_country_select = {
        let set_query = search.actions.set_query.clone();
        let remember = remember.clone();
        move |country: Country| {
            let remember = remember.clone();
            let set_query = set_query.clone();
            Callback::from(move |_: MouseEvent| {
                set_query.emit(country.nom.clone());
                remember(RecentSearch {
                    label: country.nom.clone(),
                    kind: Some(RecentKind::Pays),
                    id: Some(country.code_iso.clone()),
                });
            })
        }
    };

    let on_recent_select = {
        let on_navigate = props.on_navigate.clone();
        let set_query = search.actions.set_query.clone();
        move |item: RecentSearch| {
            let on_navigate = on_navigate.clone();
            let set_query = set_query.clone();
            Callback::from(move |_: MouseEvent| {
                let place_id = match (item.kind, item.id.as_deref()) {
                    (Some(RecentKind::Lieu), Some(id)) => Uuid::parse_str(id).ok(),
                    _ => None,
                };
                match place_id {
                    Some(id) => on_navigate.emit(Page::PlaceDetail(id)),
                    // Text-only entries search again
                    None => set_query.emit(item.label.clone()),
                }
            })
        }
    };

    let on_clear_recent = {
        let recent = recent.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*recent).clone();
            next.clear();
            storage::save_recent_searches(&next);
            recent.set(next);
        })
    };

    let on_clear_query = {
        let clear = search.actions.clear.clone();
        Callback::from(move |_: MouseEvent| clear.emit(()))
    };

    let query = search.state.query.clone();
    let show_results = !query.is_empty() && !results.is_empty();

    html! {
        <div class="home">
            <section class="hero">
                <h1>{"🌍 TravelMap"}</h1>
                <p>{"Trouvez une ville ou un pays et découvrez les voyages de la communauté."}</p>
            </section>

            <div class="search-box">
                <div class="search-input-wrapper">
                    <input class="search-ghost" type="text" value={ghost} tabindex="-1" readonly=true aria-hidden="true" />
                    <input
                        class="search-input"
                        type="text"
                        placeholder="Rechercher une ville ou un pays..."
                        value={query.clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                        autocomplete="off"
                    />
                    {if !query.is_empty() {
                        html! { <button type="button" class="search-clear" onclick={on_clear_query}>{"×"}</button> }
                    } else { html! {} }}
                    {if search.state.loading {
                        html! { <span class="search-spinner">{"⏳"}</span> }
                    } else { html! {} }}
                </div>

                {if query.is_empty() && !recent.items().is_empty() {
                    html! {
                        <div class="tm-dropdown">
                            <div class="tm-header">
                                {"Recherches récentes"}
                                <button type="button" class="btn-link" onclick={on_clear_recent}>{"Effacer"}</button>
                            </div>
                            {for recent.items().iter().cloned().map(|item| html! {
                                <div class="tm-item" onclick={on_recent_select(item.clone())}>
                                    <strong>{&item.label}</strong>
                                </div>
                            })}
                        </div>
                    }
                } else { html! {} }}

                {if show_results {
                    html! {
                        <div class="tm-dropdown">
                            {if !results.lieux.is_empty() {
                                html! {
                                    <>
                                        <div class="tm-header">{"📍 Lieux"}</div>
                                        {for results.lieux.iter().cloned().map(|place| html! {
                                            <div class="tm-item" onclick={on_place_select(place.clone())}>
                                                <strong>{&place.nom_ville}</strong>
                                                <small>{&place.pays.nom}</small>
                                            </div>
                                        })}
                                    </>
                                }
                            } else { html! {} }}
                            {if !results.pays.is_empty() {
                                html! {
                                    <>
                                        <div class="tm-header">{"🏳️ Pays"}</div>
                                        {for results.pays.iter().cloned().map(|country| html! {
                                            <div class="tm-item" onclick={on_country_select(country.clone())}>
                                                <strong>{&country.nom}</strong>
                                            </div>
                                        })}
                                    </>
                                }
                            } else { html! {} }}
                        </div>
                    }
                } else if !query.is_empty() && search.state.results.is_some() && results.is_empty() {
                    html! { <div class="tm-dropdown tm-empty">{"Aucun résultat"}</div> }
                } else { html! {} }}

                <ErrorBanner error={search.state.error.clone()} />
            </div>
        </div>
    }
}
