use serde_json::Value;
use thiserror::Error;

/// Fallback text when a failure carries nothing readable
pub const GENERIC_MESSAGE: &str = "Une erreur inattendue est survenue";

/// Body fields inspected for a readable message, in priority order
const KNOWN_FIELDS: &[&str] = &[
    "detail",
    "error",
    "message",
    "non_field_errors",
    "username",
    "password",
    "password2",
    "email",
    "first_name",
    "last_name",
    "lieu_id",
    "activite",
    "date_debut",
    "date_fin",
    "note",
    "commentaire",
    "titre",
    "description",
    "nom_ville",
    "pays_code",
];

/// Every failure a view can surface. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Erreur de connexion au serveur: {0}")]
    Network(String),
    #[error("Session expirée, veuillez vous reconnecter")]
    Unauthorized,
    #[error("Accès refusé")]
    Forbidden,
    #[error("Ressource introuvable")]
    NotFound,
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Réponse illisible du serveur: {0}")]
    Decode(String),
    #[error("Stockage local indisponible: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn invalid(field: &str, message: &str) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Maps a non-success HTTP status and its raw body to an error
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => match extract_field_message(body) {
                Some((field, message)) if status == 400 && !is_generic_field(&field) => {
                    ApiError::Validation { field, message }
                }
                Some((_, message)) => ApiError::Server { status, message },
                None => ApiError::Server {
                    status,
                    message: GENERIC_MESSAGE.to_string(),
                },
            },
        }
    }

    /// True when the session must be dropped
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

fn is_generic_field(field: &str) -> bool {
    matches!(field, "detail" | "error" | "message")
}

/// Picks the first readable message from an error body, preferring the
/// fields in [`KNOWN_FIELDS`]. Values may be strings or lists of strings.
pub fn extract_field_message(body: &str) -> Option<(String, String)> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    KNOWN_FIELDS.iter().find_map(|field| {
        object
            .get(*field)
            .and_then(first_text)
            .map(|message| (field.to_string(), message))
    })
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_variants() {
        assert_eq!(ApiError::from_response(401, "{}"), ApiError::Unauthorized);
        assert_eq!(ApiError::from_response(403, ""), ApiError::Forbidden);
        assert_eq!(ApiError::from_response(404, "{\"error\":\"x\"}"), ApiError::NotFound);
        assert!(ApiError::Unauthorized.is_unauthorized());
    }

    #[test]
    fn test_field_errors_become_validation() {
        let body = r#"{"password": ["Password fields didn't match."]}"#;
        assert_eq!(
            ApiError::from_response(400, body),
            ApiError::invalid("password", "Password fields didn't match.")
        );
    }

    #[test]
    fn test_known_fields_are_preferred_in_order() {
        let body = r#"{"foo": "ignored", "lieu_id": ["Ce lieu n'existe pas"], "non_field_errors": ["Déjà noté"]}"#;
        let error = ApiError::from_response(400, body);
        assert_eq!(error.to_string(), "Déjà noté");
    }

    #[test]
    fn test_detail_is_reported_as_server_message() {
        let error = ApiError::from_response(400, r#"{"detail": "Requête invalide"}"#);
        assert_eq!(
            error,
            ApiError::Server {
                status: 400,
                message: "Requête invalide".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_shapes_fall_back_to_generic() {
        assert_eq!(ApiError::from_response(500, "<html>boom</html>").to_string(), GENERIC_MESSAGE);
        assert_eq!(ApiError::from_response(400, r#"{"weird": 1}"#).to_string(), GENERIC_MESSAGE);
        assert_eq!(ApiError::from_response(400, r#"["a"]"#).to_string(), GENERIC_MESSAGE);
    }
}
