//! Runtime configuration read from the environment.
//!
//! | variable                   | meaning                                   |
//! |----------------------------|-------------------------------------------|
//! | `LEMBRADEMIM_API_URLS`     | comma-separated candidate base URLs       |
//! | `LEMBRADEMIM_STORE_PATH`   | credential file location                  |
//! | `LEMBRADEMIM_AUTH_POLICY`  | `fail-open` (default) or `fail-closed`    |
//! | `LEMBRADEMIM_TIMEOUT_SECS` | transport timeout; unset keeps the default|

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lembrademim_api::{AuthPolicy, Client, CredentialStore, Endpoints};

use crate::error::LibError;
use crate::store::FileStore;

pub const ENV_API_URLS: &str = "LEMBRADEMIM_API_URLS";
pub const ENV_STORE_PATH: &str = "LEMBRADEMIM_STORE_PATH";
pub const ENV_AUTH_POLICY: &str = "LEMBRADEMIM_AUTH_POLICY";
pub const ENV_TIMEOUT_SECS: &str = "LEMBRADEMIM_TIMEOUT_SECS";

const STORE_DIR: &str = ".lembrademim";
const STORE_FILE: &str = "credentials.json";

/// Everything needed to build a [`Client`] and its credential store.
#[derive(Clone, Debug)]
pub struct Config {
    pub endpoints: Endpoints,
    pub store_path: PathBuf,
    pub auth_policy: AuthPolicy,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            store_path: default_store_path(None),
            auth_policy: AuthPolicy::default(),
            timeout: None,
        }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, LibError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LibError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoints = match get(ENV_API_URLS) {
            Some(list) => Endpoints::parse_list(&list)?,
            None => Endpoints::default(),
        };

        let store_path = match get(ENV_STORE_PATH) {
            Some(path) => PathBuf::from(path),
            None => default_store_path(get("HOME")),
        };

        let auth_policy = match get(ENV_AUTH_POLICY) {
            Some(policy) => policy
                .parse::<AuthPolicy>()
                .map_err(LibError::InvalidInput)?,
            None => AuthPolicy::default(),
        };

        let timeout = match get(ENV_TIMEOUT_SECS) {
            Some(secs) => {
                let secs = secs.trim().parse::<u64>().map_err(|_| {
                    LibError::InvalidInput(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        ENV_TIMEOUT_SECS, secs
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            endpoints,
            store_path,
            auth_policy,
            timeout,
        })
    }

    /// Opens the configured durable credential store.
    pub fn open_store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    /// Builds a client over the configured candidates.
    pub fn client(&self, store: Arc<dyn CredentialStore>) -> Result<Client, LibError> {
        let mut builder = Client::builder()
            .endpoints(self.endpoints.clone())
            .credentials(store)
            .auth_policy(self.auth_policy);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

fn default_store_path(home: Option<String>) -> PathBuf {
    let base = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    base.join(STORE_DIR).join(STORE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = Config::from_lookup(lookup(&[("HOME", "/home/maria")])).unwrap();
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert_eq!(
            cfg.store_path,
            PathBuf::from("/home/maria/.lembrademim/credentials.json")
        );
        assert_eq!(cfg.auth_policy, AuthPolicy::FailOpen);
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn no_home_falls_back_to_cwd() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.store_path, PathBuf::from("./.lembrademim/credentials.json"));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup(&[
            (ENV_API_URLS, "https://api.test, http://10.0.0.5:3000"),
            (ENV_STORE_PATH, "/tmp/creds.json"),
            (ENV_AUTH_POLICY, "fail-closed"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoints.len(), 2);
        assert_eq!(cfg.endpoints.iter().next(), Some("https://api.test"));
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/creds.json"));
        assert_eq!(cfg.auth_policy, AuthPolicy::FailClosed);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = Config::from_lookup(lookup(&[(ENV_API_URLS, "  "), (ENV_TIMEOUT_SECS, "")]))
            .unwrap();
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[(ENV_API_URLS, "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_AUTH_POLICY, "maybe")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "ten")])).is_err());
    }
}
