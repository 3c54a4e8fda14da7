use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod config;
pub mod countries;
pub mod errors;
pub mod media;
pub mod paging;
pub mod places;
pub mod rating;
pub mod search;
pub mod session;
pub mod validation;
pub mod visited;

pub use config::{ClientConfig, ConfigError};
pub use errors::ApiError;
pub use visited::{distinct_visited_places, DistinctVisitedPlace};

/// Accepts a number or a numeric string. The backend serializes decimal
/// columns (coordinates, prices) as strings.
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn flexible_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// An authenticated account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Absolute or media-relative avatar path, filled in after a profile fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Minimal user reference embedded in activities and ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
}

/// A country ("pays"), keyed by ISO code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub code_iso: String,
    pub nom: String,
}

/// Compact place ("lieu") representation used in lists and nested objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub nom_ville: String,
    pub pays: Country,
    #[serde(deserialize_with = "flexible_f64", default)]
    pub latitude: f64,
    #[serde(deserialize_with = "flexible_f64", default)]
    pub longitude: f64,
}

impl PlaceSummary {
    /// "City, Country" label used across the views
    pub fn label(&self) -> String {
        format!("{}, {}", self.nom_ville, self.pays.nom)
    }
}

/// Full place record returned by place creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub nom_ville: String,
    pub pays: Country,
    pub geoname_id: Option<i64>,
    #[serde(deserialize_with = "flexible_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub longitude: f64,
    #[serde(default)]
    pub date_creation: Option<String>,
    /// Average trip rating at this place
    #[serde(default, deserialize_with = "flexible_f64_opt")]
    pub note_moyenne: Option<f64>,
}

/// Place detail view: the place plus every trip logged there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    #[serde(flatten)]
    pub place: Place,
    #[serde(default)]
    pub is_favori: bool,
    #[serde(default)]
    pub user_voyages: Vec<Trip>,
    #[serde(default)]
    pub total_voyages: u32,
}

/// Request body for creating a place that the backend does not know yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlaceRequest {
    pub nom_ville: String,
    /// Uppercase ISO country code
    pub pays_code: String,
    pub geoname_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Image or video attached to a trip or an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Uuid,
    pub type_media: media::MediaKind,
    /// Resolved download URL of the stored file
    #[serde(default)]
    pub fichier_url: Option<String>,
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ordre: u32,
}

/// A recorded visit ("voyage") of a user to a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    #[serde(default)]
    pub utilisateur: Option<User>,
    pub lieu: PlaceSummary,
    /// Start date (YYYY-MM-DD)
    pub date_debut: String,
    /// Optional end date (YYYY-MM-DD)
    #[serde(default)]
    pub date_fin: Option<String>,
    /// Rating from 1 to 5
    #[serde(default)]
    pub note: Option<u8>,
    #[serde(default)]
    pub commentaire: String,
    #[serde(default)]
    pub date_creation: Option<String>,
    #[serde(default)]
    pub medias: Vec<MediaItem>,
}

/// Text fields of the multipart trip creation form. Media files are
/// appended separately by the client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTripRequest {
    pub lieu_id: Uuid,
    pub date_debut: String,
    pub date_fin: Option<String>,
    pub note: Option<u8>,
    pub commentaire: Option<String>,
}

impl CreateTripRequest {
    /// Name/value pairs in form order; empty optionals are omitted
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("lieu_id", self.lieu_id.to_string()),
            ("date_debut", self.date_debut.clone()),
        ];
        if let Some(date_fin) = self.date_fin.as_ref().filter(|d| !d.is_empty()) {
            fields.push(("date_fin", date_fin.clone()));
        }
        if let Some(note) = self.note {
            fields.push(("note", note.to_string()));
        }
        if let Some(commentaire) = self.commentaire.as_ref().filter(|c| !c.trim().is_empty()) {
            fields.push(("commentaire", commentaire.clone()));
        }
        fields
    }
}

/// Category of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Culture,
    Nature,
    Gastronomie,
    RestaurationRapide,
    Sport,
    Divertissement,
    Shopping,
    BienEtre,
    #[default]
    Autre,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 9] = [
        ActivityKind::Culture,
        ActivityKind::Nature,
        ActivityKind::Gastronomie,
        ActivityKind::RestaurationRapide,
        ActivityKind::Sport,
        ActivityKind::Divertissement,
        ActivityKind::Shopping,
        ActivityKind::BienEtre,
        ActivityKind::Autre,
    ];

    /// Wire value used by forms
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Culture => "culture",
            ActivityKind::Nature => "nature",
            ActivityKind::Gastronomie => "gastronomie",
            ActivityKind::RestaurationRapide => "restauration_rapide",
            ActivityKind::Sport => "sport",
            ActivityKind::Divertissement => "divertissement",
            ActivityKind::Shopping => "shopping",
            ActivityKind::BienEtre => "bien_etre",
            ActivityKind::Autre => "autre",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or_default()
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityKind::Culture => "Culture & Patrimoine",
            ActivityKind::Nature => "Nature & Plein air",
            ActivityKind::Gastronomie => "Gastronomie",
            ActivityKind::RestaurationRapide => "Restauration rapide",
            ActivityKind::Sport => "Sport & Aventure",
            ActivityKind::Divertissement => "Divertissement",
            ActivityKind::Shopping => "Shopping",
            ActivityKind::BienEtre => "Bien-être & Spa",
            ActivityKind::Autre => "Autre",
        };
        write!(f, "{}", label)
    }
}

/// A rating ("note") left by a user on an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRating {
    pub id: Uuid,
    /// Rating from 1 to 5
    pub note: u8,
    #[serde(default)]
    pub commentaire: String,
    #[serde(default)]
    pub utilisateur: Option<UserRef>,
    #[serde(default)]
    pub date_creation: Option<String>,
}

/// Body for creating or updating a rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRequest {
    pub activite: Uuid,
    pub note: u8,
    pub commentaire: String,
}

/// A thing to do at a place ("activité")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub titre: String,
    pub description: String,
    pub lieu: PlaceSummary,
    #[serde(default)]
    pub cree_par: Option<UserRef>,
    #[serde(default)]
    pub date_creation: Option<String>,
    /// Estimated price in euros
    #[serde(default, deserialize_with = "flexible_f64_opt")]
    pub prix_estime: Option<f64>,
    #[serde(default)]
    pub age_minimum: Option<u32>,
    #[serde(default)]
    pub type_activite: ActivityKind,
    #[serde(default)]
    pub adresse_precise: String,
    #[serde(default)]
    pub transport_public: bool,
    #[serde(default)]
    pub reservation_requise: bool,
    #[serde(default)]
    pub medias: Vec<MediaItem>,
    #[serde(default)]
    pub notes: Vec<ActivityRating>,
    #[serde(default, deserialize_with = "flexible_f64_opt")]
    pub note_moyenne: Option<f64>,
    #[serde(default)]
    pub nombre_notes: u32,
    /// Server-computed eligibility of the requesting user to rate
    #[serde(default)]
    pub can_rate: Option<bool>,
}

impl Activity {
    /// Price label, "Gratuit" when no price is set
    pub fn price_label(&self) -> String {
        match self.prix_estime {
            Some(price) if price > 0.0 => format!("{:.2}€", price),
            _ => "Gratuit".to_string(),
        }
    }

    pub fn is_created_by(&self, user_id: i64) -> bool {
        self.cree_par.as_ref().is_some_and(|creator| creator.id == user_id)
    }
}

/// Text fields of the multipart activity creation form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateActivityRequest {
    pub titre: String,
    pub description: String,
    pub lieu_id: Option<Uuid>,
    pub prix_estime: Option<String>,
    pub age_minimum: Option<String>,
    pub type_activite: ActivityKind,
    pub adresse_precise: String,
    pub transport_public: bool,
    pub reservation_requise: bool,
}

impl CreateActivityRequest {
    /// Name/value pairs in form order. Optional fields are only sent when
    /// filled, and the default category is left to the server.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("titre", self.titre.trim().to_string()),
            ("description", self.description.trim().to_string()),
        ];
        if let Some(lieu_id) = self.lieu_id {
            fields.push(("lieu_id", lieu_id.to_string()));
        }
        if let Some(prix) = self.prix_estime.as_ref().filter(|p| !p.trim().is_empty()) {
            fields.push(("prix_estime", prix.trim().to_string()));
        }
        if let Some(age) = self.age_minimum.as_ref().filter(|a| !a.trim().is_empty()) {
            fields.push(("age_minimum", age.trim().to_string()));
        }
        if self.type_activite != ActivityKind::Autre {
            fields.push(("type_activite", self.type_activite.as_str().to_string()));
        }
        if !self.adresse_precise.trim().is_empty() {
            fields.push(("adresse_precise", self.adresse_precise.trim().to_string()));
        }
        fields.push(("transport_public", self.transport_public.to_string()));
        fields.push(("reservation_requise", self.reservation_requise.to_string()));
        fields
    }
}

impl CreateActivityRequest {
    /// Form state pre-filled from an existing activity, for the edit form
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            titre: activity.titre.clone(),
            description: activity.description.clone(),
            lieu_id: Some(activity.lieu.id),
            prix_estime: activity.prix_estime.map(|p| p.to_string()),
            age_minimum: activity.age_minimum.map(|a| a.to_string()),
            type_activite: activity.type_activite,
            adresse_precise: activity.adresse_precise.clone(),
            transport_public: activity.transport_public,
            reservation_requise: activity.reservation_requise,
        }
    }

    /// JSON body for a full update. Unlike the creation form, empty
    /// optionals are sent as `null` so that clearing a field sticks.
    pub fn update_request(&self) -> Result<UpdateActivityRequest, ApiError> {
        validation::validate_activity_form(&self.titre, &self.description, self.lieu_id.is_some())?;
        let lieu_id = self
            .lieu_id
            .ok_or_else(|| ApiError::invalid("lieu_id", "Veuillez choisir un lieu visité"))?;

        let age_minimum = match self.age_minimum.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| ApiError::invalid("age_minimum", "L'âge minimum doit être un nombre entier"))?,
            ),
            None => None,
        };
        let prix_estime = match self.prix_estime.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(price) if price >= 0.0 => Some(raw.to_string()),
                _ => return Err(ApiError::invalid("prix_estime", "Le prix doit être un nombre positif")),
            },
            None => None,
        };

        Ok(UpdateActivityRequest {
            titre: self.titre.trim().to_string(),
            description: self.description.trim().to_string(),
            lieu_id,
            prix_estime,
            age_minimum,
            type_activite: self.type_activite,
            adresse_precise: self.adresse_precise.trim().to_string(),
            transport_public: self.transport_public,
            reservation_requise: self.reservation_requise,
        })
    }
}

/// Body of `PUT activites/{id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateActivityRequest {
    pub titre: String,
    pub description: String,
    pub lieu_id: Uuid,
    /// Decimal as text, the way the backend stores it
    pub prix_estime: Option<String>,
    pub age_minimum: Option<u32>,
    pub type_activite: ActivityKind,
    pub adresse_precise: String,
    pub transport_public: bool,
    pub reservation_requise: bool,
}

/// A bookmarked place ("favori")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub lieu: PlaceSummary,
    #[serde(default)]
    pub date_ajout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFavoriteRequest {
    pub lieu_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password2: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Tokens and account returned by login and register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub refresh: String,
    pub access: String,
}

/// Statistics of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserStats {
    #[serde(default)]
    pub lieux_visites: Vec<PlaceSummary>,
    #[serde(default)]
    pub pays_visites: Vec<Country>,
    /// Sum of the user's trip ratings, computed server-side
    #[serde(default)]
    pub score_total: i64,
    #[serde(default)]
    pub nombre_voyages: u32,
    #[serde(default)]
    pub nombre_favoris: u32,
}

/// Publicly visible profile of any user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub score_total: i64,
    #[serde(default)]
    pub nombre_voyages: u32,
    #[serde(default)]
    pub nombre_activites_creees: u32,
    #[serde(default)]
    pub pays_visites: Vec<Country>,
}

/// Editable part of the signed-in user's profile (`profile/detail/`).
/// Profile updates answer with the same shape, sometimes partially, so
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileDetail {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Raw file field, used when no URL is provided
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl ProfileDetail {
    /// Avatar path as sent by the server, preferring the resolved URL
    pub fn avatar_path(&self) -> Option<&str> {
        self.profile_image_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.profile_image.as_deref().filter(|p| !p.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBioRequest {
    pub bio: String,
}

/// Combined place and country search results from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResults {
    #[serde(default)]
    pub lieux: Vec<PlaceSummary>,
    #[serde(default)]
    pub pays: Vec<Country>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.lieux.is_empty() && self.pays.is_empty()
    }
}

/// One raw GeoNames `searchJSON` entry. Every field is optional because
/// GeoNames omits fields freely; see [`search::usable_geonames`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeoNamesPlace {
    #[serde(default)]
    pub geoname_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoNamesResponse {
    #[serde(default)]
    pub geonames: Vec<GeoNamesPlace>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_summary_accepts_string_coordinates() {
        let json = r#"{
            "id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
            "nom_ville": "Paris",
            "pays": {"code_iso": "FR", "nom": "France"},
            "latitude": "48.856600",
            "longitude": 2.3522
        }"#;
        let place: PlaceSummary = serde_json::from_str(json).unwrap();
        assert!((place.latitude - 48.8566).abs() < 1e-9);
        assert!((place.longitude - 2.3522).abs() < 1e-9);
        assert_eq!(place.label(), "Paris, France");
    }

    #[test]
    fn test_activity_defaults_for_missing_fields() {
        let json = r#"{
            "id": "0b8e3bb4-7f7b-4a38-9b51-6f3a4f3d2a10",
            "titre": "Louvre",
            "description": "Musée",
            "lieu": {
                "id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
                "nom_ville": "Paris",
                "pays": {"code_iso": "FR", "nom": "France"},
                "latitude": "48.8566",
                "longitude": "2.3522"
            },
            "prix_estime": "17.00",
            "type_activite": "culture",
            "can_rate": true
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.type_activite, ActivityKind::Culture);
        assert_eq!(activity.prix_estime, Some(17.0));
        assert_eq!(activity.price_label(), "17.00€");
        assert_eq!(activity.can_rate, Some(true));
        assert!(activity.notes.is_empty());
        assert!(!activity.is_created_by(1));

        let owned = Activity {
            cree_par: Some(UserRef { id: 1, username: "ana".to_string() }),
            ..activity
        };
        assert!(owned.is_created_by(1));
        assert!(!owned.is_created_by(2));
    }

    #[test]
    fn test_trip_form_fields_skip_empty_optionals() {
        let request = CreateTripRequest {
            lieu_id: Uuid::nil(),
            date_debut: "2024-01-10".to_string(),
            date_fin: Some(String::new()),
            note: Some(4),
            commentaire: Some("   ".to_string()),
        };
        let names: Vec<&str> = request.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["lieu_id", "date_debut", "note"]);
    }

    #[test]
    fn test_activity_form_fields_omit_default_kind() {
        let request = CreateActivityRequest {
            titre: "  Balade ".to_string(),
            description: "Le long du fleuve".to_string(),
            lieu_id: Some(Uuid::nil()),
            prix_estime: Some(String::new()),
            age_minimum: Some("12".to_string()),
            ..Default::default()
        };
        let fields = request.form_fields();
        assert_eq!(fields[0], ("titre", "Balade".to_string()));
        assert!(fields.iter().all(|(k, _)| *k != "type_activite"));
        assert!(fields.iter().all(|(k, _)| *k != "prix_estime"));
        assert!(fields.contains(&("age_minimum", "12".to_string())));
        assert!(fields.contains(&("transport_public", "false".to_string())));
    }

    #[test]
    fn test_activity_kind_round_trips_wire_names() {
        for kind in ActivityKind::ALL {
            assert_eq!(ActivityKind::from_str_lossy(kind.as_str()), kind);
        }
        assert_eq!(ActivityKind::from_str_lossy("unknown"), ActivityKind::Autre);
        assert_eq!(ActivityKind::BienEtre.to_string(), "Bien-être & Spa");
    }

    #[test]
    fn test_user_display_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "marie".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            profile_image: None,
        };
        assert_eq!(user.display_name(), "marie");
    }
    const PARIS_JSON: &str = r#"{
        "id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
        "nom_ville": "Paris",
        "pays": {"code_iso": "FR", "nom": "France"},
        "latitude": "48.856600",
        "longitude": "2.352200"
    }"#;

    const ANA_JSON: &str = r#"{
        "id": 3,
        "username": "ana",
        "email": "ana@example.org",
        "first_name": "Ana",
        "last_name": "Lopes"
    }"#;

    fn trip_json(id: &str, date_debut: &str) -> String {
        format!(
            r#"{{
                "id": "{}",
                "utilisateur": {},
                "lieu": {},
                "date_debut": "{}",
                "date_fin": null,
                "note": 5,
                "commentaire": "",
                "date_creation": "2024-03-05T10:00:00.123456Z"
            }}"#,
            id, ANA_JSON, PARIS_JSON, date_debut
        )
    }

    #[test]
    fn test_trip_decodes_from_voyage_list_body() {
        let json = format!("[{}]", trip_json("0d9f8a52-5d0e-4f7b-a7d4-3b8f5a1e2c40", "2024-03-01"));
        let trips: Vec<Trip> = serde_json::from_str(&json).unwrap();

        let trip = &trips[0];
        assert_eq!(trip.lieu.label(), "Paris, France");
        assert!((trip.lieu.latitude - 48.8566).abs() < 1e-9);
        assert_eq!(trip.date_fin, None);
        assert_eq!(trip.note, Some(5));
        assert_eq!(trip.utilisateur.as_ref().map(|u| u.id), Some(3));
        assert!(trip.medias.is_empty());
    }

    #[test]
    fn test_favorite_decodes_from_list_body() {
        let json = format!(
            r#"[{{"id": 12, "utilisateur": {}, "lieu": {}, "date_ajout": "2024-04-02T08:30:00Z"}}]"#,
            ANA_JSON, PARIS_JSON
        );
        let favorites: Vec<Favorite> = serde_json::from_str(&json).unwrap();
        assert_eq!(favorites[0].id, 12);
        assert_eq!(favorites[0].lieu.nom_ville, "Paris");
        assert_eq!(favorites[0].date_ajout.as_deref(), Some("2024-04-02T08:30:00Z"));
    }

    #[test]
    fn test_place_detail_decodes_flattened_place_with_extras() {
        let json = format!(
            r#"{{
                "id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
                "nom_ville": "Paris",
                "pays": {{"code_iso": "FR", "nom": "France"}},
                "geoname_id": null,
                "latitude": "48.856600",
                "longitude": "2.352200",
                "date_creation": "2024-01-01T00:00:00Z",
                "note_moyenne": 4.5,
                "is_favori": true,
                "user_voyages": [{}],
                "total_voyages": 1
            }}"#,
            trip_json("0d9f8a52-5d0e-4f7b-a7d4-3b8f5a1e2c40", "2024-01-10")
        );
        let detail: PlaceDetail = serde_json::from_str(&json).unwrap();

        assert_eq!(detail.place.nom_ville, "Paris");
        assert_eq!(detail.place.geoname_id, None);
        assert!((detail.place.longitude - 2.3522).abs() < 1e-9);
        assert_eq!(detail.place.note_moyenne, Some(4.5));
        assert!(detail.is_favori);
        assert_eq!(detail.user_voyages.len(), 1);
        assert_eq!(detail.total_voyages, 1);
    }

    #[test]
    fn test_place_detail_without_rating_or_trips() {
        let json = r#"{
            "id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
            "nom_ville": "Paris",
            "pays": {"code_iso": "FR", "nom": "France"},
            "geoname_id": 2988507,
            "latitude": "48.856600",
            "longitude": "2.352200",
            "note_moyenne": null,
            "is_favori": false
        }"#;
        let detail: PlaceDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.place.geoname_id, Some(2988507));
        assert_eq!(detail.place.note_moyenne, None);
        assert!(detail.user_voyages.is_empty());
    }

    #[test]
    fn test_user_stats_decodes_profile_body() {
        let json = format!(
            r#"{{
                "lieux_visites": [{}],
                "pays_visites": [{{"code_iso": "FR", "nom": "France"}}],
                "score_total": 9,
                "nombre_voyages": 3,
                "nombre_favoris": 1
            }}"#,
            PARIS_JSON
        );
        let stats: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats.lieux_visites[0].pays.code_iso, "FR");
        assert_eq!(stats.pays_visites.len(), 1);
        assert_eq!(stats.score_total, 9);
        assert_eq!(stats.nombre_voyages, 3);
        assert_eq!(stats.nombre_favoris, 1);
    }

    #[test]
    fn test_create_responses_do_not_carry_read_models() {
        // Trip creation answers with the submitted fields, no id or nested place
        let trip_echo = r#"{
            "lieu_id": "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11",
            "date_debut": "2024-01-10",
            "date_fin": null,
            "note": 4,
            "commentaire": ""
        }"#;
        assert!(serde_json::from_str::<Trip>(trip_echo).is_err());

        // Favorite creation answers with an empty object
        assert!(serde_json::from_str::<Favorite>("{}").is_err());
    }

    #[test]
    fn test_profile_detail_accepts_partial_bodies() {
        let empty: ProfileDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.avatar_path(), None);

        let uploaded: ProfileDetail = serde_json::from_str(
            r#"{"message": "ok", "profile_image_url": "/media/profiles/ana.jpg"}"#,
        )
        .unwrap();
        assert_eq!(uploaded.avatar_path(), Some("/media/profiles/ana.jpg"));

        let fallback: ProfileDetail = serde_json::from_str(
            r#"{"bio": "Globe-trotteuse", "profile_image_url": "", "profile_image": "profiles/ana.jpg"}"#,
        )
        .unwrap();
        assert_eq!(fallback.avatar_path(), Some("profiles/ana.jpg"));
        assert_eq!(fallback.bio.as_deref(), Some("Globe-trotteuse"));
    }

    #[test]
    fn test_activity_update_request_prefills_and_nulls_cleared_fields() {
        let json = format!(
            r#"{{
                "id": "0b8e3bb4-7f7b-4a38-9b51-6f3a4f3d2a10",
                "titre": "Louvre",
                "description": "Musée",
                "lieu": {},
                "prix_estime": "17.00",
                "age_minimum": 6,
                "type_activite": "culture"
            }}"#,
            PARIS_JSON
        );
        let activity: Activity = serde_json::from_str(&json).unwrap();

        let mut form = CreateActivityRequest::from_activity(&activity);
        assert_eq!(form.lieu_id, Some(activity.lieu.id));
        assert_eq!(form.age_minimum.as_deref(), Some("6"));
        assert_eq!(form.prix_estime.as_deref(), Some("17"));

        form.titre = " Musée du Louvre ".to_string();
        form.prix_estime = Some(String::new());
        let update = form.update_request().unwrap();
        assert_eq!(update.titre, "Musée du Louvre");
        assert_eq!(update.prix_estime, None);
        assert_eq!(update.age_minimum, Some(6));

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["prix_estime"], serde_json::Value::Null);
        assert_eq!(body["type_activite"], "culture");
        assert_eq!(body["lieu_id"], "6f1c6c4e-2b1a-4d8e-9d55-0c6c1f0b7d11");
    }

    #[test]
    fn test_activity_update_request_rejects_bad_numbers() {
        let form = CreateActivityRequest {
            titre: "Balade".to_string(),
            description: "Le long du fleuve".to_string(),
            lieu_id: Some(Uuid::nil()),
            age_minimum: Some("douze".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.update_request(), Err(ApiError::Validation { .. })));

        let form = CreateActivityRequest {
            age_minimum: None,
            prix_estime: Some("-3".to_string()),
            ..form
        };
        assert!(matches!(form.update_request(), Err(ApiError::Validation { .. })));

        let missing_place = CreateActivityRequest {
            prix_estime: None,
            lieu_id: None,
            ..form
        };
        assert!(missing_place.update_request().is_err());
    }
}
