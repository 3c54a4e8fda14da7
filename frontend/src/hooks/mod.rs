pub mod use_debounced_search;
pub mod use_media_selection;
pub mod use_session;
pub mod use_trips;
