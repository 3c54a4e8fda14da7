use shared::session::{Session, Theme};
use shared::AuthResponse;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::storage;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub theme: Theme,
    /// Set when the server rejected the stored token
    pub expired: bool,
}

impl SessionState {
    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }
}

pub struct UseSessionResult {
    pub state: SessionState,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub sign_in: Callback<AuthResponse>,
    pub logout: Callback<()>,
    /// Drops the session after a 401
    pub expire: Callback<()>,
    pub toggle_theme: Callback<()>,
    pub update_avatar: Callback<String>,
}

fn restore_session() -> Option<Session> {
    storage::purge_legacy_keys();
    let mut session = storage::load_session()?;
    if session.user.profile_image.is_none() {
        session.user.profile_image = storage::cached_avatar(session.user.id);
    }
    Logger::info_with_component("session", &format!("🔑 Restored session for {}", session.user.username));
    Some(session)
}

fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            Logger::warn_with_component("session", &format!("Failed to apply theme: {:?}", e));
        }
    }
}

#[hook]
pub fn use_session() -> UseSessionResult {
    let session = use_state(restore_session);
    let theme = use_state(storage::load_theme);
    let expired = use_state(|| false);

    use_effect_with(*theme, |theme| {
        apply_theme(*theme);
        || ()
    });

    let sign_in = {
        let session = session.clone();
        let expired = expired.clone();
        use_callback((), move |response: AuthResponse, _| {
            let mut next = Session::from(response);
            if next.user.profile_image.is_none() {
                next.user.profile_image = storage::cached_avatar(next.user.id);
            }
            if let Err(e) = storage::save_session(&next) {
                Logger::error_with_component("session", &e.to_string());
            }
            Logger::info_with_component("session", &format!("✅ Signed in as {}", next.user.username));
            expired.set(false);
            session.set(Some(next));
        })
    };

    let logout = {
        let session = session.clone();
        let expired = expired.clone();
        use_callback((), move |_: (), _| {
            storage::clear_session();
            Logger::info_with_component("session", "👋 Signed out");
            expired.set(false);
            session.set(None);
        })
    };

    let expire = {
        let session = session.clone();
        let expired = expired.clone();
        use_callback((), move |_: (), _| {
            storage::clear_session();
            Logger::warn_with_component("session", "⏰ Session expired, signing out");
            expired.set(true);
            session.set(None);
        })
    };

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: ()| {
            let next = theme.toggled();
            storage::save_theme(next);
            theme.set(next);
        })
    };

    let update_avatar = {
        let session = session.clone();
        Callback::from(move |url: String| {
            if let Some(current) = (*session).clone() {
                if current.user.profile_image.as_deref() == Some(url.as_str()) {
                    return;
                }
                storage::cache_avatar(current.user.id, &url);
                let mut next = current;
                next.user.profile_image = Some(url);
                if let Err(e) = storage::save_session(&next) {
                    Logger::warn_with_component("session", &e.to_string());
                }
                session.set(Some(next));
            }
        })
    };

    let state = SessionState {
        session: (*session).clone(),
        theme: *theme,
        expired: *expired,
    };

    let actions = UseSessionActions {
        sign_in,
        logout,
        expire,
        toggle_theme,
        update_avatar,
    };

    UseSessionResult { state, actions }
}
