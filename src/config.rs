use std::env;

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:9090/api/courses";
pub const DEFAULT_STORAGE_URL: &str = "sqlite://catalog.db";

const API_URL_VAR: &str = "COURSES_API_URL";
const STORAGE_URL_VAR: &str = "CATALOG_STORAGE_URL";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: Url,
    pub storage_url: String,
}

impl ClientConfig {
    pub fn new(api_url: &str, storage_url: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            storage_url: storage_url.into(),
        })
    }

    /// Reads `COURSES_API_URL` and `CATALOG_STORAGE_URL`, falling back to the
    /// local development defaults. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_url =
            lookup(STORAGE_URL_VAR).unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string());

        Self::new(&api_url, storage_url)
    }

    /// Replaces whichever settings were given explicitly, e.g. from command-line flags.
    pub fn with_overrides(
        self,
        api_url: Option<&str>,
        storage_url: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            api_url: match api_url {
                Some(raw) => parse_api_url(raw)?,
                None => self.api_url,
            },
            storage_url: storage_url.unwrap_or(self.storage_url),
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("invalid API url {}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Config(format!(
            "API url must use http or https, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_base_url() {
        let config = ClientConfig::new("http://localhost:9090/api/courses", "sqlite::memory:")
            .expect("valid config");
        assert_eq!(config.api_url.path(), "/api/courses");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://example.com/courses", "sqlite::memory:").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.storage_url, DEFAULT_STORAGE_URL);
    }

    #[test]
    fn reads_both_variables() {
        let config = ClientConfig::from_lookup(|key| match key {
            "COURSES_API_URL" => Some("https://courses.example.com/api/courses".to_string()),
            "CATALOG_STORAGE_URL" => Some("sqlite::memory:".to_string()),
            _ => None,
        })
        .expect("valid config");
        assert_eq!(config.api_url.host_str(), Some("courses.example.com"));
        assert_eq!(config.storage_url, "sqlite::memory:");
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = ClientConfig::from_lookup(|_| None).expect("defaults");

        let config = base
            .clone()
            .with_overrides(Some("http://127.0.0.1:8080/api/courses"), None)
            .expect("override api url");
        assert_eq!(config.api_url.port(), Some(8080));
        assert_eq!(config.storage_url, DEFAULT_STORAGE_URL);

        let config = base
            .clone()
            .with_overrides(None, Some("sqlite://other.db".to_string()))
            .expect("override storage");
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.storage_url, "sqlite://other.db");

        let err = base.with_overrides(Some("file:///tmp/x"), None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
