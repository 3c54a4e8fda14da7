//! Browser storage layout and the persisted session.

use serde::{Deserialize, Serialize};

use crate::{AuthResponse, User};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";
pub const RECENT_SEARCHES_KEY: &str = "recent";
/// Keys from older clients, removed on startup
pub const LEGACY_KEYS: &[&str] = &["userProfileImage"];

/// Per-user avatar cache key
pub fn avatar_cache_key(user_id: i64) -> String {
    format!("userProfileImage_{}", user_id)
}

/// Tokens plus cached account, as kept in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Session {
    /// A session only counts when both a token and a user are present
    pub fn restore(access_token: Option<String>, refresh_token: Option<String>, user: Option<User>) -> Option<Self> {
        let access_token = access_token.filter(|t| !t.trim().is_empty())?;
        Some(Self {
            access_token,
            refresh_token,
            user: user?,
        })
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access,
            refresh_token: Some(response.refresh),
            user: response.user,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("light") {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 12,
            username: "lea".to_string(),
            email: "lea@example.org".to_string(),
            first_name: "Léa".to_string(),
            last_name: "Martin".to_string(),
            profile_image: None,
        }
    }

    #[test]
    fn test_restore_needs_token_and_user() {
        assert!(Session::restore(Some("tok".into()), None, Some(user())).is_some());
        assert!(Session::restore(None, None, Some(user())).is_none());
        assert!(Session::restore(Some(" ".into()), None, Some(user())).is_none());
        assert!(Session::restore(Some("tok".into()), None, None).is_none());
    }

    #[test]
    fn test_session_from_auth_response() {
        let session = Session::from(AuthResponse {
            user: user(),
            refresh: "r".to_string(),
            access: "a".to_string(),
        });
        assert_eq!(session.bearer(), "Bearer a");
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert_eq!(avatar_cache_key(session.user.id), "userProfileImage_12");
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("LIGHT"), Theme::Light);
        assert_eq!(Theme::parse("garbage"), Theme::Dark);
    }
}
