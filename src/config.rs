// Client configuration. The server location is passed explicitly to the
// client constructor; the binary fills it from `--host` or `TWHOST`.

use crate::error::{Error, Result};
use reqwest::Url;

/// Environment variable holding the wiki server URL.
pub const HOST_ENV: &str = "TWHOST";

/// Environment variable enabling strict status checking.
pub const STRICT_ENV: &str = "TWSTRICT";

/// Settings for a [`WikiClient`](crate::api::WikiClient).
#[derive(Debug, Clone)]
pub struct Config {
    base_url: Url,
    strict_status: bool,
}

impl Config {
    /// Parse `host` once. Only absolute http(s) URLs are accepted.
    pub fn new(host: &str) -> Result<Self> {
        let base_url = Url::parse(host).map_err(|e| Error::InvalidUrl {
            url: host.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl {
                url: host.to_string(),
                reason: format!("unsupported scheme `{}`", base_url.scheme()),
            });
        }
        Ok(Config {
            base_url,
            strict_status: false,
        })
    }

    /// When enabled, unexpected HTTP statuses become
    /// [`Error::UnexpectedStatus`] instead of a logged warning.
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_strict(&self) -> bool {
        self.strict_status
    }
}
