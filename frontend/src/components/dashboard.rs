use yew::prelude::*;

use super::error_banner::ErrorBanner;
use super::trip_form::TripForm;
use super::trip_list::TripList;
use super::visited_places::VisitedPlaces;
use crate::hooks::use_trips::use_trips;
use crate::page::Page;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub api_client: ApiClient,
    pub on_navigate: Callback<Page>,
    pub on_unauthorized: Callback<()>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let trips = use_trips(&props.api_client, props.on_unauthorized.clone());
    let show_form = use_state(|| false);

    let on_toggle_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(!*show_form))
    };

    let on_cancel = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };

    let on_created = {
        let show_form = show_form.clone();
        let refresh_trips = trips.actions.refresh_trips.clone();
        Callback::from(move |_: ()| {
            show_form.set(false);
            refresh_trips.emit(());
        })
    };

    html! {
        <div class="dashboard">
            <h1>{"Tableau de bord"}</h1>
            <ErrorBanner error={trips.state.error.clone()} />

            <div class="section-header">
                <h2 class="section-title">{format!("✈️ Mes voyages ({})", trips.state.trips.len())}</h2>
                <button type="button" class="btn btn-primary" onclick={on_toggle_form}>
                    {if *show_form { "Fermer" } else { "➕ Ajouter un voyage" }}
                </button>
            </div>

            {if *show_form {
                html! {
                    <TripForm
                        api_client={props.api_client.clone()}
                        on_created={on_created}
                        on_cancel={on_cancel}
                        on_unauthorized={props.on_unauthorized.clone()}
                    />
                }
            } else { html! {} }}

            <div class="dashboard-grid">
                <TripList
                    trips={trips.state.trips.clone()}
                    loading={trips.state.loading}
                    on_delete={trips.actions.delete_trip.clone()}
                    on_navigate={props.on_navigate.clone()}
                />
                <VisitedPlaces
                    places={trips.state.visited_places.clone()}
                    on_navigate={props.on_navigate.clone()}
                />
            </div>
        </div>
    }
}
