use gloo::net::http::Request;
use shared::search::{usable_geonames, PlaceCandidate};
use shared::{ApiError, ClientConfig, GeoNamesResponse};

/// Queries GeoNames directly for place autocomplete. Only populated places,
/// administrative areas and terrain features are requested.
pub async fn search_places(config: &ClientConfig, query: &str) -> Result<Vec<PlaceCandidate>, ApiError> {
    let max_rows = config.geonames_max_rows.to_string();
    let response = Request::get(&config.geonames_url)
        .query([
            ("q", query),
            ("maxRows", max_rows.as_str()),
            ("username", config.geonames_username.as_str()),
            ("featureClass", "P"),
            ("featureClass", "A"),
            ("featureClass", "T"),
            ("orderby", "relevance"),
        ])
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, &body));
    }

    let data = response
        .json::<GeoNamesResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(usable_geonames(data.geonames))
}
