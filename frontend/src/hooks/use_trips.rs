use std::rc::Rc;

use shared::{distinct_visited_places, ApiError, DistinctVisitedPlace, Trip};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct TripsState {
    pub trips: Rc<Vec<Trip>>,
    /// Derived from `trips`, rebuilt whenever the list changes
    pub visited_places: Rc<Vec<DistinctVisitedPlace>>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

pub struct UseTripsResult {
    pub state: TripsState,
    pub actions: UseTripsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTripsActions {
    pub refresh_trips: Callback<()>,
    pub delete_trip: Callback<Uuid>,
}

#[hook]
pub fn use_trips(api_client: &ApiClient, on_unauthorized: Callback<()>) -> UseTripsResult {
    let trips = use_state(|| Rc::new(Vec::<Trip>::new()));
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);

    let visited_places = use_memo((*trips).clone(), |trips| distinct_visited_places(trips));

    let refresh_trips = {
        let api_client = api_client.clone();
        let trips = trips.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_unauthorized = on_unauthorized.clone();

        use_callback(api_client.clone(), move |_: (), _| {
            let api_client = api_client.clone();
            let trips = trips.clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_unauthorized = on_unauthorized.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.list_trips().await {
                    Ok(data) => {
                        Logger::debug_with_component("trips", &format!("Loaded {} trips", data.len()));
                        error.set(None);
                        trips.set(Rc::new(data));
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("trips", &format!("Failed to fetch trips: {}", e));
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let delete_trip = {
        let error = error.clone();
        let on_unauthorized = on_unauthorized.clone();

        use_callback((api_client.clone(), trips.clone()), move |trip_id: Uuid, (api_client, trips)| {
            let api_client = api_client.clone();
            let trips = trips.clone();
            let error = error.clone();
            let on_unauthorized = on_unauthorized.clone();

            spawn_local(async move {
                match api_client.delete_trip(trip_id).await {
                    Ok(()) => {
                        Logger::info_with_component("trips", &format!("🗑️ Deleted trip {}", trip_id));
                        let remaining: Vec<Trip> = trips.iter().filter(|t| t.id != trip_id).cloned().collect();
                        trips.set(Rc::new(remaining));
                    }
                    Err(e) if e.is_unauthorized() => on_unauthorized.emit(()),
                    Err(e) => {
                        Logger::error_with_component("trips", &format!("Failed to delete trip: {}", e));
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    // Load trips whenever the client (and so the token) changes
    use_effect_with(api_client.clone(), {
        let refresh_trips = refresh_trips.clone();
        move |_| {
            refresh_trips.emit(());
            || ()
        }
    });

    let state = TripsState {
        trips: (*trips).clone(),
        visited_places,
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseTripsActions {
        refresh_trips,
        delete_trip,
    };

    UseTripsResult { state, actions }
}
