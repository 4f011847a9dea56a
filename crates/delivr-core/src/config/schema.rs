//! Configuration schema for delivr.toml
//!
//! ```toml
//! cdn_host = "cdn.staticdelivr.com"
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::source::ResolveOptions;

/// Root configuration structure for delivr.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelivrConfig {
    /// Target CDN host, without scheme or path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_host: Option<String>,
}

impl DelivrConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CDN host.
    pub fn with_cdn_host(mut self, host: impl Into<String>) -> Self {
        self.cdn_host = Some(host.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(host) = &self.cdn_host {
            validate_cdn_host(host)?;
        }
        Ok(())
    }

    /// Resolver options derived from this configuration.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            cdn_host: self.cdn_host.clone(),
        }
    }
}

/// Check that a CDN host is a bare `host[:port]` with no scheme, path,
/// query, credentials, or whitespace.
pub fn validate_cdn_host(host: &str) -> anyhow::Result<()> {
    if host.is_empty() {
        anyhow::bail!("cdn_host must not be empty");
    }
    if host.contains("://") {
        anyhow::bail!("cdn_host must not include a scheme: '{}'", host);
    }
    if let Some(c) = host
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
        anyhow::bail!("cdn_host contains invalid character {:?}: '{}'", c, host);
    }

    let url = Url::parse(&format!("https://{}/", host))
        .map_err(|e| anyhow::anyhow!("cdn_host is not a valid host: '{}' ({})", host, e))?;
    if url.host_str().is_none_or(str::is_empty) {
        anyhow::bail!("cdn_host is not a valid host: '{}'", host);
    }
    Ok(())
}
