//! Source resolver facade.

use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;

use super::build::{build_canonical_url, normalize_cdn_host};
use super::detect::{self, Detection};
use super::input::SourceInput;
use super::kind::SourceKind;
use super::reference::ParsedReference;

/// CDN host used when none is configured.
pub const DEFAULT_CDN_HOST: &str = "cdn.staticdelivr.com";

/// Outcome of [`resolve`].
pub type ResolutionResult = Result<Resolution, ResolutionError>;

/// Options accepted by [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Target CDN host, e.g. `cdn.staticdelivr.com`. Defaults to
    /// [`DEFAULT_CDN_HOST`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_host: Option<String>,
}

impl ResolveOptions {
    /// Create options targeting the given CDN host.
    pub fn with_cdn_host(host: impl Into<String>) -> Self {
        Self {
            cdn_host: Some(host.into()),
        }
    }

    /// The effective CDN host, normalized.
    pub fn cdn_host(&self) -> &str {
        self.cdn_host
            .as_deref()
            .map(normalize_cdn_host)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_CDN_HOST)
    }
}

/// A successfully resolved input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Format the input was recognized as
    pub kind: SourceKind,
    /// Target CDN URL
    pub canonical_url: String,
    /// Components extracted from the input
    pub reference: ParsedReference,
}

/// Resolves source URLs and shorthands into canonical CDN URLs.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    options: ResolveOptions,
}

impl SourceResolver {
    /// Create a new SourceResolver.
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn cdn_host(&self) -> &str {
        self.options.cdn_host()
    }

    /// Resolve an input string into a canonical CDN URL.
    ///
    /// Handles, in priority order:
    /// - `raw.githubusercontent.com/{owner}/{repo}/{ref}/{path}`
    /// - `github.com/{owner}/{repo}/blob|raw/{ref}/{path}`
    /// - `cdn.jsdelivr.net/gh/...` and `cdn.jsdelivr.net/npm/...`
    /// - `unpkg.com/{pkg}@{version}/{path}`
    /// - `npmjs.com/package/{pkg}` and `registry.npmjs.org/{pkg}`
    /// - `fonts.googleapis.com/css2?...` and `fonts.googleapis.com/css?...`
    /// - bare `owner/repo/ref/path` and `pkg@version/path` shorthands
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let (kind, reference) = self.detect(input)?;
        let canonical_url = build_canonical_url(self.cdn_host(), kind, &reference)?;
        tracing::debug!(%kind, %canonical_url, "resolved source");
        Ok(Resolution {
            kind,
            canonical_url,
            reference,
        })
    }

    /// Detect the format of an input and extract its components without
    /// building a URL.
    pub fn detect(&self, input: &str) -> Result<(SourceKind, ParsedReference), ResolutionError> {
        let source = SourceInput::parse(input).ok_or(ResolutionError::EmptyInput)?;
        match detect::detect(&source) {
            Some((kind, Detection::Matched(reference))) => Ok((kind, reference)),
            Some((kind, Detection::Incomplete(missing))) => {
                Err(ResolutionError::incomplete(kind, missing))
            }
            Some((_, Detection::NoMatch)) | None => {
                Err(ResolutionError::unrecognized(input.trim()))
            }
        }
    }
}

/// Resolve an input string with the given options.
///
/// Pure and deterministic: no I/O, no caching, and the same input and options
/// always produce the same result.
pub fn resolve(input: &str, options: &ResolveOptions) -> ResolutionResult {
    SourceResolver::new(options.clone()).resolve(input)
}
