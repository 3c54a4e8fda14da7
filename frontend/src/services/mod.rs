pub mod api;
pub mod date_utils;
pub mod geonames;
pub mod logging;
pub mod storage;
