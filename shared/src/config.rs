use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https://, got '{0}'")]
    RelativeApiUrl(String),
}

/// Settings the client needs to reach its collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST API root, without a trailing slash
    pub api_base_url: String,
    /// Origin serving uploaded media
    pub media_root: String,
    /// GeoNames `searchJSON` endpoint
    pub geonames_url: String,
    pub geonames_username: String,
    /// Delay between the last keystroke and a search request
    pub search_debounce_ms: u32,
    pub geonames_max_rows: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            media_root: "http://localhost:8000".to_string(),
            geonames_url: "http://api.geonames.org/searchJSON".to_string(),
            geonames_username: "ourouchy".to_string(),
            search_debounce_ms: 300,
            geonames_max_rows: 10,
        }
    }
}

impl ClientConfig {
    /// Applies optional overrides. The media root becomes the origin of the
    /// overridden API URL, which therefore has to be absolute.
    pub fn with_overrides(api_base_url: Option<&str>, geonames_username: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            let url = url.trim_end_matches('/').to_string();
            config.media_root = origin_of(&url).ok_or_else(|| ConfigError::RelativeApiUrl(url.clone()))?;
            config.api_base_url = url;
        }
        if let Some(user) = geonames_username.map(str::trim).filter(|u| !u.is_empty()) {
            config.geonames_username = user.to_string();
        }
        Ok(config)
    }

    /// Full URL of an API path such as `voyages/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// `scheme://host[:port]` of an absolute http(s) URL
fn origin_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host_len = rest.find('/').unwrap_or(rest.len());
    if host_len == 0 {
        return None;
    }
    Some(url[..url.len() - rest.len() + host_len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("voyages/"), "http://localhost:8000/api/voyages/");
        assert_eq!(config.endpoint("/search/"), "http://localhost:8000/api/search/");
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_overrides_derive_media_root() {
        let config = ClientConfig::with_overrides(Some("https://travel.example.org/api/"), Some("demo")).unwrap();
        assert_eq!(config.api_base_url, "https://travel.example.org/api");
        assert_eq!(config.media_root, "https://travel.example.org");
        assert_eq!(config.geonames_username, "demo");

        let untouched = ClientConfig::with_overrides(Some("  "), None).unwrap();
        assert_eq!(untouched, ClientConfig::default());

        let bare_host = ClientConfig::with_overrides(Some("http://10.0.0.5:8000"), None).unwrap();
        assert_eq!(bare_host.media_root, "http://10.0.0.5:8000");
    }

    #[test]
    fn test_relative_api_url_is_rejected() {
        assert_eq!(
            ClientConfig::with_overrides(Some("travel.example.org/api"), None),
            Err(ConfigError::RelativeApiUrl("travel.example.org/api".to_string()))
        );
        assert!(ClientConfig::with_overrides(Some("/api/"), None).is_err());
        assert!(ClientConfig::with_overrides(Some("https:///api"), None).is_err());
    }
}
