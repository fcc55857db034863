//! API Base URL
//!
//! The one place the backend location is resolved and validated. Every
//! request URL in the crate is built from an [`ApiBase`].

use reqwest::Url;
use std::fmt;

use crate::config::{Config, ConfigError};

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Validated backend base URL with no trailing slash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    base: String,
}

impl ApiBase {
    /// Parse and normalize a base URL.
    ///
    /// Only absolute `http`/`https` URLs are accepted. A path prefix such as
    /// `https://host/api` is kept; query strings and fragments are not.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty URL"));
        }

        let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(&format!("unsupported scheme '{}'", other))),
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed"));
        }

        let base = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { base })
    }

    /// Resolve the base URL: explicit override first, then the config
    /// (which already carries `FRIENDLOG_API_URL`), then the default.
    pub fn resolve(explicit: Option<&str>, config: &Config) -> Result<Self, ConfigError> {
        let (source, raw) = match explicit.filter(|s| !s.trim().is_empty()) {
            Some(url) => ("flag", url),
            None => ("config", config.api.url.as_str()),
        };

        let base = Self::parse(raw)?;
        tracing::debug!(api_base = %base, source, "Resolved API base URL");
        Ok(base)
    }

    /// Build a request URL for an absolute API path such as `/friends/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_URL.to_string(),
        }
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let base = ApiBase::parse("http://localhost:8000/").unwrap();
        assert_eq!(base.as_str(), "http://localhost:8000");
    }

    #[test]
    fn test_path_prefix_kept() {
        let base = ApiBase::parse(" https://friends.example.com/api/v1/ ").unwrap();
        assert_eq!(base.as_str(), "https://friends.example.com/api/v1");
        assert_eq!(
            base.url("/friends/"),
            "https://friends.example.com/api/v1/friends/"
        );
    }

    #[test]
    fn test_url_join() {
        let base = ApiBase::default();
        assert_eq!(base.url("/auth/login"), "http://localhost:8000/auth/login");
        assert_eq!(base.url("chats"), "http://localhost:8000/chats");
        assert_eq!(base.url("/friends/"), "http://localhost:8000/friends/");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(ApiBase::parse("").is_err());
        assert!(ApiBase::parse("   ").is_err());
        assert!(ApiBase::parse("localhost:8000").is_err());
        assert!(ApiBase::parse("ftp://example.com").is_err());
        assert!(ApiBase::parse("http://example.com/?x=1").is_err());
        assert!(ApiBase::parse("not a url").is_err());
    }

    #[test]
    fn test_resolve_prefers_flag() {
        let mut config = Config::default();
        config.api.url = "http://config.example.com".to_string();

        let base = ApiBase::resolve(Some("http://flag.example.com/"), &config).unwrap();
        assert_eq!(base.as_str(), "http://flag.example.com");

        let base = ApiBase::resolve(None, &config).unwrap();
        assert_eq!(base.as_str(), "http://config.example.com");

        let base = ApiBase::resolve(Some(""), &config).unwrap();
        assert_eq!(base.as_str(), "http://config.example.com");
    }

    #[test]
    fn test_resolve_default() {
        let base = ApiBase::resolve(None, &Config::default()).unwrap();
        assert_eq!(base, ApiBase::default());
    }
}
