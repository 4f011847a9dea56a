//! Source kind classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream format an input string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// `github.com/{owner}/{repo}/blob/{ref}/{path}` or bare `owner/repo/ref/path`
    GithubBlob,
    /// `raw.githubusercontent.com/...` or `github.com/{owner}/{repo}/raw/...`
    GithubRaw,
    /// `registry.npmjs.org/{pkg}` or bare `pkg@version/path`
    NpmRegistryShorthand,
    /// `npmjs.com/package/{pkg}`
    NpmjsPage,
    /// `unpkg.com/{pkg}@{version}/{path}`
    UnpkgShorthand,
    /// `cdn.jsdelivr.net/npm/{pkg}@{version}/{path}`
    JsDelivrNpm,
    /// `cdn.jsdelivr.net/gh/{owner}/{repo}@{ref}/{path}`
    JsDelivrGithub,
    /// `fonts.googleapis.com/css?{query}`
    GoogleFontsCss,
    /// `fonts.googleapis.com/css2?{query}`
    GoogleFontsCss2,
    Unknown,
}

/// Group of kinds sharing one URL builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFamily {
    Github,
    Npm,
    GoogleFonts,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::GithubBlob => "github-blob",
            SourceKind::GithubRaw => "github-raw",
            SourceKind::NpmRegistryShorthand => "npm-registry-shorthand",
            SourceKind::NpmjsPage => "npmjs-page",
            SourceKind::UnpkgShorthand => "unpkg-shorthand",
            SourceKind::JsDelivrNpm => "jsdelivr-npm",
            SourceKind::JsDelivrGithub => "jsdelivr-github",
            SourceKind::GoogleFontsCss => "google-fonts-css",
            SourceKind::GoogleFontsCss2 => "google-fonts-css2",
            SourceKind::Unknown => "unknown",
        }
    }

    /// The builder family for this kind. `Unknown` has none.
    pub fn family(self) -> Option<SourceFamily> {
        match self {
            SourceKind::GithubBlob | SourceKind::GithubRaw | SourceKind::JsDelivrGithub => {
                Some(SourceFamily::Github)
            }
            SourceKind::NpmRegistryShorthand
            | SourceKind::NpmjsPage
            | SourceKind::UnpkgShorthand
            | SourceKind::JsDelivrNpm => Some(SourceFamily::Npm),
            SourceKind::GoogleFontsCss | SourceKind::GoogleFontsCss2 => {
                Some(SourceFamily::GoogleFonts)
            }
            SourceKind::Unknown => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
