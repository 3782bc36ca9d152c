//! Best-effort check that a submitted URL points somewhere.

use crate::config::ProbeConfig;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// How much of a response counts as "reachable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// Any completed request passes; the status is never looked at.
    #[default]
    Opaque,
    /// The request must complete with a 2xx or 3xx status.
    Strict,
    /// No request is made.
    Off,
}

impl std::str::FromStr for ProbeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opaque" => Ok(ProbeMode::Opaque),
            "strict" => Ok(ProbeMode::Strict),
            "off" => Ok(ProbeMode::Off),
            other => Err(format!("unknown probe mode: {other}")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Network(String),

    #[error("server answered {0}")]
    Status(u16),
}

pub trait UrlProbe: Send + Sync {
    /// Resolve to `Ok(())` when `url` looks reachable.
    fn probe(&self, url: &Url) -> impl Future<Output = Result<(), ProbeError>> + Send;
}

/// Issues a `HEAD` request with reqwest.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    mode: ProbeMode,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("bookmarky/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Network(e.to_string()))?;
        Ok(Self {
            client,
            mode: config.mode,
            timeout: config.timeout,
        })
    }

    async fn send(&self, method: reqwest::Method, url: &Url) -> Result<u16, ProbeError> {
        match self.client.request(method, url.clone()).send().await {
            Ok(resp) => Ok(resp.status().as_u16()),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout(self.timeout)),
            Err(e) => Err(ProbeError::Network(e.to_string())),
        }
    }
}

impl UrlProbe for HttpProbe {
    async fn probe(&self, url: &Url) -> Result<(), ProbeError> {
        if self.mode == ProbeMode::Off {
            return Ok(());
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProbeError::UnsupportedScheme(url.scheme().to_string()));
        }

        let status = self.send(reqwest::Method::HEAD, url).await?;
        tracing::debug!("probe HEAD {url} -> {status}");
        if self.mode == ProbeMode::Opaque {
            return Ok(());
        }

        // Some servers refuse HEAD outright; give them one GET.
        let status = if status == 405 || status == 501 {
            self.send(reqwest::Method::GET, url).await?
        } else {
            status
        };
        if (200..400).contains(&status) {
            Ok(())
        } else {
            Err(ProbeError::Status(status))
        }
    }
}
