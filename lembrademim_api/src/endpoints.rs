//! The ordered list of base URLs the backend may be reached through.

use url::Url;

use crate::Error;

/// Built-in candidates, tried in this order.
pub const DEFAULT_BASE_URLS: &[&str] = &[
    // local development server
    "http://localhost:3000",
    // production
    "https://lembrademim.onrender.com",
    // Android emulator's view of the host machine
    "http://10.0.2.2:3000",
    // LAN address of the development machine
    "http://192.168.1.67:3000",
];

/// Ordered, non-empty list of candidate base URLs.
///
/// Fixed once constructed. The client tries candidates strictly in this
/// order on every call and never reorders or caches a "last good" entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    bases: Vec<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bases: DEFAULT_BASE_URLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Endpoints {
    /// Validates and normalizes the given base URLs. Trailing slashes are
    /// stripped so that paths can be appended verbatim.
    pub fn new<I, S>(bases: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for base in bases {
            let raw = base.as_ref().trim();
            let parsed = Url::parse(raw).map_err(|e| {
                tracing::error!("Invalid endpoint '{}': {}", raw, e);
                Error::InvalidEndpoint(raw.to_string())
            })?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                return Err(Error::InvalidEndpoint(raw.to_string()));
            }
            normalized.push(raw.trim_end_matches('/').to_string());
        }
        if normalized.is_empty() {
            return Err(Error::InvalidEndpoint(
                "at least one endpoint is required".to_string(),
            ));
        }
        Ok(Self { bases: normalized })
    }

    /// A single-candidate list. Used for testing with wiremock.
    pub fn single(base: &str) -> Result<Self, Error> {
        Self::new([base])
    }

    /// Parses a comma-separated list, ignoring blank entries.
    pub fn parse_list(list: &str) -> Result<Self, Error> {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Full URL for `path` on `base`. The path may carry a query string.
    pub fn join(base: &str, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order() {
        let endpoints = Endpoints::default();
        let bases: Vec<&str> = endpoints.iter().collect();
        assert_eq!(bases, DEFAULT_BASE_URLS);
        assert_eq!(endpoints.len(), 4);
    }

    #[test]
    fn trailing_slash_stripped() {
        let endpoints = Endpoints::new(["http://localhost:3000/"]).unwrap();
        assert_eq!(endpoints.iter().next(), Some("http://localhost:3000"));
    }

    #[test]
    fn rejects_empty_list() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Endpoints::new(empty),
            Err(Error::InvalidEndpoint(_))
        ));
        assert!(Endpoints::parse_list(" , ").is_err());
    }

    #[test]
    fn rejects_relative_and_non_http() {
        assert!(Endpoints::new(["localhost:3000/api"]).is_err());
        assert!(Endpoints::new(["/api"]).is_err());
        assert!(Endpoints::new(["ftp://example.com"]).is_err());
    }

    #[test]
    fn parse_list_keeps_order() {
        let endpoints =
            Endpoints::parse_list("http://a.test, https://b.test/ ,http://c.test:8080").unwrap();
        let bases: Vec<&str> = endpoints.iter().collect();
        assert_eq!(
            bases,
            vec!["http://a.test", "https://b.test", "http://c.test:8080"]
        );
    }

    #[test]
    fn join_appends_path() {
        assert_eq!(
            Endpoints::join("http://a.test", "/biography/7"),
            "http://a.test/biography/7"
        );
        assert_eq!(
            Endpoints::join("http://a.test", "health"),
            "http://a.test/health"
        );
        assert_eq!(
            Endpoints::join("http://a.test", "/biography/search?tag=work"),
            "http://a.test/biography/search?tag=work"
        );
    }
}
