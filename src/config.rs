use std::env;

/// Default service address used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the analysis backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config pointing at the given base URL. A trailing slash is
    /// stripped so endpoint paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Reads `ANALYSIS_API_URL` from the environment, falling back to
    /// [`DEFAULT_BASE_URL`] when unset or empty.
    pub fn from_env() -> Self {
        match env::var("ANALYSIS_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::new("http://api.example.com/");
        assert_eq!(config.base_url, "http://api.example.com");

        let config = ApiConfig::new("http://api.example.com//");
        assert_eq!(config.base_url, "http://api.example.com");
    }

    #[test]
    fn explicit_url_is_kept() {
        let config = ApiConfig::new("https://insight.example.com:8443");
        assert_eq!(config.base_url, "https://insight.example.com:8443");
    }
}
