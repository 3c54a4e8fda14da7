use anyhow::{anyhow, Context};
use gloo::storage::{LocalStorage, Storage};
use shared::search::RecentSearches;
use shared::session::{
    avatar_cache_key, Session, Theme, AUTH_TOKEN_KEY, LEGACY_KEYS, RECENT_SEARCHES_KEY,
    REFRESH_TOKEN_KEY, THEME_KEY, USER_KEY,
};
use shared::{ApiError, User};

use crate::services::logging::Logger;

/// Tokens are stored as bare strings, not JSON, so they go through the raw
/// web storage handle
fn get_raw(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}

fn set_raw(key: &str, value: &str) -> anyhow::Result<()> {
    LocalStorage::raw()
        .set_item(key, value)
        .map_err(|e| anyhow!("{:?}", e))
        .with_context(|| format!("Failed to write {}", key))
}

pub fn load_session() -> Option<Session> {
    let user = match LocalStorage::get::<User>(USER_KEY) {
        Ok(user) => Some(user),
        Err(e) => {
            Logger::debug_with_component("storage", &format!("No cached user: {}", e));
            None
        }
    };
    Session::restore(get_raw(AUTH_TOKEN_KEY), get_raw(REFRESH_TOKEN_KEY), user)
}

pub fn save_session(session: &Session) -> Result<(), ApiError> {
    let stored = (|| -> anyhow::Result<()> {
        set_raw(AUTH_TOKEN_KEY, &session.access_token)?;
        if let Some(refresh) = &session.refresh_token {
            set_raw(REFRESH_TOKEN_KEY, refresh)?;
        }
        LocalStorage::set(USER_KEY, &session.user).context("Failed to cache user")?;
        Ok(())
    })();
    stored.map_err(|e| ApiError::Storage(format!("{:#}", e)))
}

pub fn clear_session() {
    LocalStorage::delete(AUTH_TOKEN_KEY);
    LocalStorage::delete(REFRESH_TOKEN_KEY);
    LocalStorage::delete(USER_KEY);
}

/// Removes keys written by older versions of the client
pub fn purge_legacy_keys() {
    for key in LEGACY_KEYS {
        if get_raw(key).is_some() {
            Logger::info_with_component("storage", &format!("🧹 Removing legacy key: {}", key));
            LocalStorage::delete(key);
        }
    }
}

pub fn load_theme() -> Theme {
    get_raw(THEME_KEY).map(|raw| Theme::parse(&raw)).unwrap_or_default()
}

pub fn save_theme(theme: Theme) {
    if let Err(e) = set_raw(THEME_KEY, theme.as_str()) {
        Logger::warn_with_component("storage", &format!("{:#}", e));
    }
}

pub fn load_recent_searches() -> RecentSearches {
    get_raw(RECENT_SEARCHES_KEY)
        .map(|raw| RecentSearches::from_json(&raw))
        .unwrap_or_default()
}

pub fn save_recent_searches(recent: &RecentSearches) {
    if let Err(e) = set_raw(RECENT_SEARCHES_KEY, &recent.to_json()) {
        Logger::warn_with_component("storage", &format!("{:#}", e));
    }
}

pub fn cached_avatar(user_id: i64) -> Option<String> {
    get_raw(&avatar_cache_key(user_id))
}

pub fn cache_avatar(user_id: i64, url: &str) {
    if let Err(e) = set_raw(&avatar_cache_key(user_id), url) {
        Logger::warn_with_component("storage", &format!("{:#}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            user: User {
                id: 3,
                username: "noa".to_string(),
                email: "noa@example.org".to_string(),
                first_name: "Noa".to_string(),
                last_name: "Levi".to_string(),
                profile_image: None,
            },
        }
    }

    #[wasm_bindgen_test]
    fn test_session_round_trip_and_clear() {
        save_session(&session()).unwrap();
        assert_eq!(get_raw(AUTH_TOKEN_KEY).as_deref(), Some("access"));
        assert_eq!(load_session(), Some(session()));

        clear_session();
        assert_eq!(load_session(), None);
    }

    #[wasm_bindgen_test]
    fn test_theme_defaults_to_dark() {
        LocalStorage::delete(THEME_KEY);
        assert_eq!(load_theme(), Theme::Dark);
        save_theme(Theme::Light);
        assert_eq!(load_theme(), Theme::Light);
    }
}
