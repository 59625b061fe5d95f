//! Connectivity diagnostic: which candidate endpoint answers its health check.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;

use crate::{endpoints::Endpoints, Client};

/// Route probed on each candidate.
pub const HEALTH_PATH: &str = "/health";

/// Outcome of probing the candidates in order.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// First candidate whose health check answered 2xx.
    pub working: Option<String>,
    /// One line per candidate that was tried and failed, in probe order:
    /// `"<base>: HTTP <status>"` or `"<base>: <error>"`.
    pub failures: Vec<String>,
}

impl ConnectivityReport {
    pub fn is_connected(&self) -> bool {
        self.working.is_some()
    }
}

impl Client {
    /// Probes `GET <candidate>/health` on each candidate until one answers
    /// with a success status. Does not change how requests pick candidates.
    pub async fn check_connectivity(&self) -> ConnectivityReport {
        let mut report = ConnectivityReport::default();

        for base in self.endpoints.iter() {
            let url = Endpoints::join(base, HEALTH_PATH);
            let result = self
                .http
                .get(&url)
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("Backend reachable at {}", base);
                    report.working = Some(base.to_string());
                    return report;
                }
                Ok(resp) => {
                    let line = format!("{}: HTTP {}", base, resp.status().as_u16());
                    tracing::debug!("{}", line);
                    report.failures.push(line);
                }
                Err(e) => {
                    let line = format!("{}: {}", base, e);
                    tracing::debug!("{}", line);
                    report.failures.push(line);
                }
            }
        }

        tracing::warn!("No backend reachable ({} candidates)", self.endpoints.len());
        report
    }
}
