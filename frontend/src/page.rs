use uuid::Uuid;

/// Screens of the app. Navigation is held in memory; there is no URL routing.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Login,
    Register,
    Dashboard,
    Activities,
    ActivityDetail(Uuid),
    PlaceDetail(Uuid),
    TripDetail(Uuid),
    Favorites,
    Profile,
    PublicProfile(i64),
    NotFound,
}

impl Page {
    /// Pages that redirect to the login screen when signed out
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Page::Dashboard | Page::Activities | Page::Favorites | Page::Profile
        )
    }

    /// Top-level entry shown as active in the navbar
    pub fn nav_section(&self) -> Page {
        match self {
            Page::ActivityDetail(_) => Page::Activities,
            Page::TripDetail(_) => Page::Dashboard,
            Page::PlaceDetail(_) | Page::PublicProfile(_) | Page::NotFound => Page::Home,
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_private_pages_require_auth() {
        assert!(Page::Dashboard.requires_auth());
        assert!(Page::Favorites.requires_auth());
        assert!(!Page::Home.requires_auth());
        assert!(!Page::PlaceDetail(Uuid::nil()).requires_auth());
    }

    #[wasm_bindgen_test]
    fn test_detail_pages_highlight_their_section() {
        assert_eq!(Page::ActivityDetail(Uuid::nil()).nav_section(), Page::Activities);
        assert_eq!(Page::TripDetail(Uuid::nil()).nav_section(), Page::Dashboard);
        assert_eq!(Page::Profile.nav_section(), Page::Profile);
    }
}
