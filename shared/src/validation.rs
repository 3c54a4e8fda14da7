//! Client-side checks run before a form is submitted.

use crate::errors::ApiError;
use crate::visited::parse_trip_date;
use crate::RegisterRequest;

/// Start date required; end date, when given, must not precede it
pub fn validate_trip_dates(date_debut: &str, date_fin: Option<&str>) -> Result<(), ApiError> {
    let start = parse_trip_date(date_debut)
        .ok_or_else(|| ApiError::invalid("date_debut", "Veuillez saisir une date de début valide"))?;

    if let Some(raw_end) = date_fin.filter(|d| !d.trim().is_empty()) {
        let end = parse_trip_date(raw_end)
            .ok_or_else(|| ApiError::invalid("date_fin", "Date de fin invalide"))?;
        if end < start {
            return Err(ApiError::invalid(
                "date_fin",
                "La date de fin ne peut pas être antérieure à la date de début",
            ));
        }
    }
    Ok(())
}

/// Parses an optional 1 to 5 rating from a form value
pub fn parse_rating(raw: &str) -> Result<Option<u8>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u8>() {
        Ok(note) if (1..=5).contains(&note) => Ok(Some(note)),
        _ => Err(ApiError::invalid("note", "La note doit être comprise entre 1 et 5")),
    }
}

/// An activity rating needs a value and a comment
pub fn validate_rating_form(note: u8, commentaire: &str) -> Result<(), ApiError> {
    if !(1..=5).contains(&note) || commentaire.trim().is_empty() {
        return Err(ApiError::invalid("commentaire", "Veuillez remplir tous les champs"));
    }
    Ok(())
}

/// Title and description are mandatory, the place must be chosen
pub fn validate_activity_form(titre: &str, description: &str, has_place: bool) -> Result<(), ApiError> {
    if titre.trim().is_empty() || description.trim().is_empty() {
        return Err(ApiError::invalid("titre", "Le titre et la description sont obligatoires"));
    }
    if !has_place {
        return Err(ApiError::invalid("lieu_id", "Veuillez choisir un lieu visité"));
    }
    Ok(())
}

pub fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::invalid("username", "Le nom d'utilisateur est obligatoire"));
    }
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(ApiError::invalid("first_name", "Le prénom et le nom sont obligatoires"));
    }
    if !request.email.contains('@') {
        return Err(ApiError::invalid("email", "Adresse email invalide"));
    }
    if request.password != request.password2 {
        return Err(ApiError::invalid("password", "Les mots de passe ne correspondent pas"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_dates() {
        assert!(validate_trip_dates("2024-01-10", None).is_ok());
        assert!(validate_trip_dates("2024-01-10", Some("")).is_ok());
        assert!(validate_trip_dates("2024-01-10", Some("2024-01-10")).is_ok());
        assert!(validate_trip_dates("2024-01-10", Some("2024-01-09")).is_err());
        assert!(validate_trip_dates("", None).is_err());
        assert!(validate_trip_dates("2024-01-10", Some("soon")).is_err());
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("").unwrap(), None);
        assert_eq!(parse_rating(" 4 ").unwrap(), Some(4));
        assert!(parse_rating("0").is_err());
        assert!(parse_rating("6").is_err());
        assert!(parse_rating("x").is_err());
    }

    #[test]
    fn test_rating_form_requires_comment() {
        assert!(validate_rating_form(5, "Top").is_ok());
        assert!(validate_rating_form(5, "  ").is_err());
        assert!(validate_rating_form(0, "Top").is_err());
    }

    #[test]
    fn test_activity_form() {
        assert!(validate_activity_form("Musée", "Beau", true).is_ok());
        assert!(validate_activity_form("", "Beau", true).is_err());
        assert!(validate_activity_form("Musée", "Beau", false).is_err());
    }

    #[test]
    fn test_registration_password_confirmation() {
        let mut request = RegisterRequest {
            username: "marie".to_string(),
            password: "s3cret!!".to_string(),
            password2: "s3cret!!".to_string(),
            email: "marie@example.org".to_string(),
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
        };
        assert!(validate_registration(&request).is_ok());

        request.password2 = "other".to_string();
        let error = validate_registration(&request).unwrap_err();
        assert_eq!(error.to_string(), "Les mots de passe ne correspondent pas");
    }
}
