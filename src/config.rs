//! Where the backend lives.

/// Read by the CLI's `--api-url` flag.
pub const API_URL_ENV: &str = "PAPERLESS_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8081";

pub const DOCUMENTS_PATH: &str = "/api/documents";
pub const TAGS_PATH: &str = "/api/tags";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn documents_url(&self) -> String {
        format!("{}{}", self.api_url, DOCUMENTS_PATH)
    }

    pub fn tags_url(&self) -> String {
        format!("{}{}", self.api_url, TAGS_PATH)
    }
}
