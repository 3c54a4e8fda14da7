use gloo::dialogs::confirm;
use shared::paging::DisplayWindow;
use shared::{Activity, ApiError, User};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::activity_form::ActivityForm;
use super::error_banner::ErrorBanner;
use crate::hooks::use_trips::use_trips;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ActivitiesProps {
    pub api_client: ApiClient,
    pub user: User,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
}

/// The signed-in user's own activities and the form to add one
#[function_component(Activities)]
pub fn activities(props: &ActivitiesProps) -> Html {
    let trips = use_trips(&props.api_client, props.on_unauthorized.clone());
    let activities = use_state(Vec::<Activity>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);
    let show_form = use_state(|| false);
    let editing = use_state(|| Option::<Activity>::None);
    let window = use_state(DisplayWindow::default);
    let reload = use_state(|| 0u32);

    use_effect_with((props.api_client.clone(), props.user.id, *reload), {
        let activities = activities.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        move |(api_client, user_id, _): &(ApiClient, i64, u32)| {
            let api_client = api_client.clone();
            let user_id = *user_id;
            spawn_local(async move {
                loading.set(true);
                match api_client.list_activities().await {
                    Ok(all) => {
                        let own: Vec<Activity> = all.into_iter().filter(|a| a.is_created_by(user_id)).collect();
                        Logger::debug_with_component("activities", &format!("{} own activities", own.len()));
                        error.set(None);
                        activities.set(own);
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("activities", &format!("Failed to load activities: {}", e));
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let on_saved = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            show_form.set(false);
            editing.set(None);
            reload.set(*reload + 1);
        })
    };

    let on_cancel = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            show_form.set(false);
            editing.set(None);
        })
    };

    let on_toggle_form = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            show_form.set(!*show_form);
        })
    };

    let on_edit = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        move |activity: Activity| {
            let show_form = show_form.clone();
            let editing = editing.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                show_form.set(false);
                editing.set(Some(activity.clone()));
            })
        }
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let on_unauthorized = props.on_unauthorized.clone();
        let activities = activities.clone();
        let error = error.clone();
        move |activity_id: Uuid| {
            let api_client = api_client.clone();
            let on_unauthorized = on_unauthorized.clone();
            let activities = activities.clone();
            let error = error.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                if !confirm("Êtes-vous sûr de vouloir supprimer cette activité ?") {
                    return;
                }
                let api_client = api_client.clone();
                let on_unauthorized = on_unauthorized.clone();
                let activities = activities.clone();
                let error = error.clone();
                spawn_local(async move {
                    match api_client.delete_activity(activity_id).await {
                        Ok(()) => {
                            Logger::info_with_component("activities", &format!("🗑️ Deleted activity {}", activity_id));
                            let remaining: Vec<Activity> = activities.iter().filter(|a| a.id != activity_id).cloned().collect();
                            activities.set(remaining);
                        }
                        Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                        Err(e) => error.set(Some(e)),
                    }
                });
            })
        }
    };

    let on_more = {
        let window = window.clone();
        Callback::from(move |_: MouseEvent| window.set(window.more()))
    };
    let on_less = {
        let window = window.clone();
        Callback::from(move |_: MouseEvent| window.set(window.less()))
    };

    html! {
        <div class="activities">
            <div class="section-header">
                <h1>{format!("🎯 Mes activités ({})", activities.len())}</h1>
                <button type="button" class="btn btn-primary" onclick={on_toggle_form}>
                    {if *show_form { "Fermer" } else { "➕ Ajouter une activité" }}
                </button>
            </div>
            <ErrorBanner error={(*error).clone()} />

            {match (&*editing, *show_form) {
                (Some(activity), _) => html! {
                    <ActivityForm
                        key={activity.id.to_string()}
                        api_client={props.api_client.clone()}
                        visited_places={trips.state.visited_places.clone()}
                        editing={Some(activity.clone())}
                        on_saved={on_saved}
                        on_cancel={on_cancel}
                        on_unauthorized={props.on_unauthorized.clone()}
                    />
                },
                (None, true) => html! {
                    <ActivityForm
                        key="new"
                        api_client={props.api_client.clone()}
                        visited_places={trips.state.visited_places.clone()}
                        on_saved={on_saved}
                        on_cancel={on_cancel}
                        on_unauthorized={props.on_unauthorized.clone()}
                    />
                },
                (None, false) => html! {},
            }}

            {if *loading && activities.is_empty() {
                html! { <div class="loading">{"Chargement des activités..."}</div> }
            } else if activities.is_empty() {
                html! { <p class="empty-state">{"Vous n'avez encore créé aucune activité."}</p> }
            } else {
                html! {
                    <>
                        <div class="activity-cards">
                            {for window.slice(activities.as_slice()).iter().map(|activity| {
                                let activity_id = activity.id;
                                let on_navigate = props.on_navigate.clone();
                                html! {
                                    <div class="activity-card" key={activity_id.to_string()}
                                        onclick={move |_| on_navigate.emit(Page::ActivityDetail(activity_id))}>
                                        <div class="activity-card-header">
                                            <h3>{&activity.titre}</h3>
                                            <div class="card-actions">
                                                <button type="button" class="btn-edit" title="Modifier" onclick={on_edit(activity.clone())}>{"✏️"}</button>
                                                <button type="button" class="btn-delete" title="Supprimer" onclick={on_delete(activity_id)}>{"🗑️"}</button>
                                            </div>
                                        </div>
                                        <p class="activity-place">{format!("📍 {}", activity.lieu.label())}</p>
                                        <p class="activity-meta">
                                            <span class="badge">{activity.type_activite.to_string()}</span>
                                            <span>{activity.price_label()}</span>
                                        </p>
                                        <div class="activity-stats">
                                            {match activity.note_moyenne {
                                                Some(average) => format!("⭐ {:.1} ({} avis)", average, activity.nombre_notes),
                                                None => "Pas encore noté".to_string(),
                                            }}
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                        <div class="list-paging">
                            {if window.can_show_more(activities.len()) {
                                html! { <button type="button" class="btn btn-secondary" onclick={on_more}>{"Voir plus"}</button> }
                            } else { html! {} }}
                            {if window.can_show_less() {
                                html! { <button type="button" class="btn btn-secondary" onclick={on_less}>{"Voir moins"}</button> }
                            } else { html! {} }}
                        </div>
                    </>
                }
            }}
        </div>
    }
}
