//! Search-or-create resolution of a GeoNames pick to a backend place.

use uuid::Uuid;

use crate::errors::ApiError;
use crate::search::PlaceCandidate;
use crate::{CreatePlaceRequest, PlaceSummary};

/// Finds a known place with the same city (trimmed, case-insensitive) and
/// the same country code (case-insensitive)
pub fn find_existing_place(known: &[PlaceSummary], candidate: &PlaceCandidate) -> Option<Uuid> {
    let city = candidate.name.trim().to_lowercase();
    let code = candidate.country_code.trim().to_lowercase();
    known
        .iter()
        .find(|place| {
            place.nom_ville.trim().to_lowercase() == city
                && place.pays.code_iso.trim().to_lowercase() == code
        })
        .map(|place| place.id)
}

/// Builds the creation body for a place the backend does not know.
///
/// Fails with a validation error when a required field is blank or a
/// coordinate does not parse or is out of range.
pub fn new_place_request(candidate: &PlaceCandidate) -> Result<CreatePlaceRequest, ApiError> {
    let nom_ville = candidate.name.trim();
    let pays_code = candidate.country_code.trim();
    if nom_ville.is_empty() || pays_code.is_empty() {
        return Err(ApiError::invalid("lieu", "Données de lieu incomplètes pour la création"));
    }

    let latitude = parse_coordinate(&candidate.lat, 90.0, "latitude")?;
    let longitude = parse_coordinate(&candidate.lng, 180.0, "longitude")?;

    Ok(CreatePlaceRequest {
        nom_ville: nom_ville.to_string(),
        pays_code: pays_code.to_uppercase(),
        geoname_id: candidate.geoname_id,
        latitude,
        longitude,
    })
}

fn parse_coordinate(raw: &str, bound: f64, field: &str) -> Result<f64, ApiError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ApiError::invalid(field, "Coordonnée invalide"))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(ApiError::invalid(
            field,
            &format!("{} doit être comprise entre -{} et {}", field, bound, bound),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visited::fixtures::place;

    fn candidate(name: &str, code: &str, lat: &str, lng: &str) -> PlaceCandidate {
        PlaceCandidate {
            geoname_id: Some(1),
            name: name.to_string(),
            country_name: "Somewhere".to_string(),
            country_code: code.to_string(),
            lat: lat.to_string(),
            lng: lng.to_string(),
        }
    }

    #[test]
    fn test_existing_place_matches_case_insensitively() {
        let known = vec![
            place(1, "Paris", "US", "United States"),
            place(2, "Paris ", "FR", "France"),
        ];
        let found = find_existing_place(&known, &candidate(" paris", "fr", "48.8", "2.3"));
        assert_eq!(found, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn test_no_match_when_country_differs() {
        let known = vec![place(1, "Paris", "US", "United States")];
        assert_eq!(
            find_existing_place(&known, &candidate("Paris", "FR", "48.8", "2.3")),
            None
        );
    }

    #[test]
    fn test_new_place_request_is_normalized() {
        let request = new_place_request(&candidate("  Kyoto ", "jp", "35.02107", "135.75385")).unwrap();
        assert_eq!(request.nom_ville, "Kyoto");
        assert_eq!(request.pays_code, "JP");
        assert_eq!(request.geoname_id, Some(1));
        assert!((request.latitude - 35.02107).abs() < 1e-9);
    }

    #[test]
    fn test_new_place_request_rejects_bad_coordinates() {
        assert!(new_place_request(&candidate("Kyoto", "JP", "abc", "135.7")).is_err());
        assert!(new_place_request(&candidate("Kyoto", "JP", "95.0", "135.7")).is_err());
        assert!(new_place_request(&candidate("Kyoto", "JP", "35.0", "-181")).is_err());
        assert!(new_place_request(&candidate(" ", "JP", "35.0", "135.7")).is_err());
    }
}
