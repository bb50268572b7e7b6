//! HTTP GET for external scripts.
//!
//! Uses the curl crate (libcurl). One blocking request per call; callers
//! fetch sequentially.

use crate::config::FetchConfig;
use std::time::Duration;
use thiserror::Error;

/// Failure fetching a single URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, body read, etc.).
    #[error("request failed: {0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Source of remote script bodies.
pub trait Fetch {
    /// GET `url` and return the full response body.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking libcurl client built from [`FetchConfig`].
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    connect_timeout: Duration,
    max_redirects: u32,
    user_agent: Option<String>,
}

impl CurlFetcher {
    pub fn new(cfg: &FetchConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.timeout_secs),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

impl Fetch for CurlFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(agent) = &self.user_agent {
            easy.useragent(agent)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        Ok(body)
    }
}
