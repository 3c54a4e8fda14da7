use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::places::{find_existing_place, new_place_request};
use shared::search::PlaceCandidate;
use shared::{
    Activity, ApiError, AuthResponse, ClientConfig, CreateActivityRequest, CreateFavoriteRequest,
    CreatePlaceRequest, CreateTripRequest, Favorite, LoginRequest, Place, PlaceDetail, ProfileDetail,
    PublicProfile, RatingRequest, RegisterRequest, SearchResults, Trip, UpdateActivityRequest,
    UpdateBioRequest, UserStats,
};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::services::logging::Logger;

/// Edits accepted by `PATCH profile/update/`
pub enum ProfileUpdate {
    Bio(String),
    Image(File),
}

/// API client for communicating with the travel journal backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client from the client configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config, token: None }
    }

    /// Same client, sending `Authorization: Bearer <token>` when a token is set
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Test connection to the backend
    pub async fn ping(&self) -> Result<(), ApiError> {
        let response = Request::get(&self.config.endpoint("ping/"))
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await.map(|_| ())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/login/", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/register/", request).await
    }

    /// Trips of the signed-in user
    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.get_json("voyages/").await
    }

    /// Publicly readable trip, used by the place and profile views
    pub async fn get_trip(&self, trip_id: Uuid) -> Result<Trip, ApiError> {
        self.get_json(&format!("voyages/{}/detail_public/", trip_id)).await
    }

    /// Create a trip with its media files as a multipart form.
    /// The response only echoes the form, so callers reload the list.
    pub async fn create_trip(&self, request: &CreateTripRequest, files: &[File]) -> Result<(), ApiError> {
        let form = multipart(&request.form_fields(), files)?;
        self.send_form(Request::post(&self.config.endpoint("voyages/")), form).await
    }

    pub async fn delete_trip(&self, trip_id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("voyages/{}/", trip_id)).await
    }

    /// Free-text search over places and countries
    pub async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let response = self
            .authorized(Request::get(&self.config.endpoint("search/")))
            .query([("q", query)])
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    pub async fn create_place(&self, request: &CreatePlaceRequest) -> Result<Place, ApiError> {
        self.post_json("lieux/", request).await
    }

    /// Returns the id of the backend place matching a GeoNames pick,
    /// creating the place first when the backend does not know it yet.
    /// A failed lookup is logged and falls through to creation.
    pub async fn ensure_place(&self, candidate: &PlaceCandidate) -> Result<Uuid, ApiError> {
        match self.search(candidate.name.trim()).await {
            Ok(results) => {
                if let Some(place_id) = find_existing_place(&results.lieux, candidate) {
                    Logger::debug_with_component("api", &format!("📍 Existing place found: {}", place_id));
                    return Ok(place_id);
                }
            }
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
            Err(e) => {
                Logger::warn_with_component("api", &format!("Place lookup failed, creating instead: {}", e));
            }
        }

        let request = new_place_request(candidate)?;
        let place = self.create_place(&request).await?;
        Logger::info_with_component("api", &format!("📍 Created place {} ({})", place.nom_ville, place.id));
        Ok(place.id)
    }

    pub async fn get_place_detail(&self, place_id: Uuid) -> Result<PlaceDetail, ApiError> {
        self.get_json(&format!("lieux/{}/detail/", place_id)).await
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.get_json("activites/").await
    }

    pub async fn get_activity(&self, activity_id: Uuid) -> Result<Activity, ApiError> {
        self.get_json(&format!("activites/{}/", activity_id)).await
    }

    pub async fn create_activity(&self, request: &CreateActivityRequest, files: &[File]) -> Result<(), ApiError> {
        let form = multipart(&request.form_fields(), files)?;
        self.send_form(Request::post(&self.config.endpoint("activites/")), form).await
    }

    pub async fn update_activity(&self, activity_id: Uuid, request: &UpdateActivityRequest) -> Result<(), ApiError> {
        let builder = Request::put(&self.config.endpoint(&format!("activites/{}/", activity_id)));
        self.send_json(builder, request).await
    }

    pub async fn delete_activity(&self, activity_id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("activites/{}/", activity_id)).await
    }

    pub async fn create_rating(&self, request: &RatingRequest) -> Result<(), ApiError> {
        self.send_json(Request::post(&self.config.endpoint("notes-activites/")), request).await
    }

    pub async fn update_rating(&self, rating_id: Uuid, request: &RatingRequest) -> Result<(), ApiError> {
        let builder = Request::put(&self.config.endpoint(&format!("notes-activites/{}/", rating_id)));
        self.send_json(builder, request).await
    }

    pub async fn delete_rating(&self, rating_id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("notes-activites/{}/", rating_id)).await
    }

    pub async fn list_favorites(&self) -> Result<Vec<Favorite>, ApiError> {
        self.get_json("favoris/").await
    }

    /// Idempotent on the server; the response body carries nothing usable
    pub async fn add_favorite(&self, place_id: Uuid) -> Result<(), ApiError> {
        let request = CreateFavoriteRequest { lieu_id: place_id };
        self.send_json(Request::post(&self.config.endpoint("favoris/")), &request).await
    }

    pub async fn remove_favorite(&self, favorite_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("favoris/{}/", favorite_id)).await
    }

    /// Statistics of the signed-in user
    pub async fn get_profile(&self) -> Result<UserStats, ApiError> {
        self.get_json("profile/").await
    }

    /// Bio and avatar of the signed-in user
    pub async fn get_profile_detail(&self) -> Result<ProfileDetail, ApiError> {
        self.get_json("profile/detail/").await
    }

    /// Bio goes as JSON, a new avatar as a multipart form
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<ProfileDetail, ApiError> {
        let builder = self.authorized(Request::patch(&self.config.endpoint("profile/update/")));
        let request = match update {
            ProfileUpdate::Bio(bio) => builder
                .json(&UpdateBioRequest { bio })
                .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?,
            ProfileUpdate::Image(file) => {
                let form = FormData::new().map_err(js_error)?;
                form.append_with_blob_and_filename("profile_image", &file, &file.name())
                    .map_err(js_error)?;
                builder
                    .body(form)
                    .map_err(|e| ApiError::Decode(format!("Failed to build form request: {}", e)))?
            }
        };
        let response = request.send().await.map_err(network_error)?;
        read_json(response).await
    }

    pub async fn get_public_profile(&self, user_id: i64) -> Result<PublicProfile, ApiError> {
        self.get_json(&format!("users/{}/profile/", user_id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorized(Request::get(&self.config.endpoint(path)))
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self
            .authorized(Request::post(&self.config.endpoint(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    /// Write whose response body is ignored; only the status matters
    async fn send_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> Result<(), ApiError> {
        let response = self
            .authorized(builder)
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await.map(|_| ())
    }

    /// The browser sets the multipart boundary; no Content-Type header here
    async fn send_form(&self, builder: RequestBuilder, form: FormData) -> Result<(), ApiError> {
        let response = self
            .authorized(builder)
            .body(form)
            .map_err(|e| ApiError::Decode(format!("Failed to build form request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorized(Request::delete(&self.config.endpoint(path)))
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await.map(|_| ())
    }
}

fn network_error(error: gloo::net::Error) -> ApiError {
    ApiError::Network(error.to_string())
}

fn js_error(error: JsValue) -> ApiError {
    ApiError::Decode(format!("{:?}", error))
}

fn multipart(fields: &[(&'static str, String)], files: &[File]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    for file in files {
        form.append_with_blob_and_filename("medias", file, &file.name())
            .map_err(js_error)?;
    }
    Ok(form)
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Logger::warn_with_component("api", &format!("❌ {} {}: {}", status, response.url(), body));
    Err(ApiError::from_response(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
