use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::search::{is_searchable, SearchSequencer};
use shared::ApiError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

pub type SearchFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>>>>;

/// Performs one search for an already trimmed query
pub type SearchFn<T> = Rc<dyn Fn(String) -> SearchFuture<T>>;

#[derive(Clone, PartialEq)]
pub struct DebouncedSearchState<T> {
    pub query: String,
    pub results: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

pub struct UseDebouncedSearchResult<T> {
    pub state: DebouncedSearchState<T>,
    pub actions: UseDebouncedSearchActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDebouncedSearchActions {
    /// Call on every keystroke
    pub set_query: Callback<String>,
    /// Empties the input and drops any in-flight search
    pub clear: Callback<()>,
}

/// Hook for search-as-you-type with a debounce delay
///
/// # Arguments
/// * `delay_ms` - Quiet period after the last keystroke before searching
/// * `search` - Performs the request; the latest closure passed in is used
///
/// # Behavior
/// - Queries shorter than the minimum length clear the results without a request
/// - A new keystroke restarts the delay
/// - Every search is tagged with a sequence ticket and a response is only
///   applied while its ticket is still the latest, so a slow response for an
///   old query never overwrites newer results
#[hook]
pub fn use_debounced_search<T>(delay_ms: u32, search: SearchFn<T>) -> UseDebouncedSearchResult<T>
where
    T: Clone + 'static,
{
    let query = use_state(String::new);
    let results = use_state(|| Option::<T>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);

    let pending = use_mut_ref(|| Option::<Timeout>::None);
    let sequencer = use_mut_ref(SearchSequencer::new);
    let search_fn = use_mut_ref(|| search.clone());
    *search_fn.borrow_mut() = search;

    let set_query = {
        let query = query.clone();
        let results = results.clone();
        let loading = loading.clone();
        let error = error.clone();
        let pending = pending.clone();
        let sequencer = sequencer.clone();
        let search_fn = search_fn.clone();

        Callback::from(move |value: String| {
            query.set(value.clone());
            // Dropping the previous timeout cancels it
            pending.borrow_mut().take();

            if !is_searchable(&value) {
                sequencer.borrow_mut().cancel_all();
                results.set(None);
                error.set(None);
                loading.set(false);
                return;
            }

            let ticket = sequencer.borrow_mut().issue();
            let results = results.clone();
            let loading = loading.clone();
            let error = error.clone();
            let sequencer = sequencer.clone();
            let search_fn = search_fn.clone();

            let timeout = Timeout::new(delay_ms, move || {
                let request = (*search_fn.borrow())(value.trim().to_string());
                loading.set(true);

                spawn_local(async move {
                    let outcome = request.await;
                    if !sequencer.borrow().is_current(ticket) {
                        Logger::debug_with_component("search", &format!("Discarding stale response for '{}'", value.trim()));
                        return;
                    }

                    match outcome {
                        Ok(data) => {
                            error.set(None);
                            results.set(Some(data));
                        }
                        Err(e) => {
                            Logger::warn_with_component("search", &format!("Search failed: {}", e));
                            results.set(None);
                            error.set(Some(e));
                        }
                    }
                    loading.set(false);
                });
            });
            *pending.borrow_mut() = Some(timeout);
        })
    };

    let clear = {
        let query = query.clone();
        let results = results.clone();
        let loading = loading.clone();
        let error = error.clone();
        let pending = pending.clone();
        let sequencer = sequencer.clone();

        Callback::from(move |_: ()| {
            pending.borrow_mut().take();
            sequencer.borrow_mut().cancel_all();
            query.set(String::new());
            results.set(None);
            error.set(None);
            loading.set(false);
        })
    };

    let state = DebouncedSearchState {
        query: (*query).clone(),
        results: (*results).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseDebouncedSearchActions { set_query, clear };

    UseDebouncedSearchResult { state, actions }
}
