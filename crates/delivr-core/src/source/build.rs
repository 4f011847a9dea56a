//! Canonical CDN URL templates.

use crate::error::{Component, ResolutionError};

use super::kind::{SourceFamily, SourceKind};
use super::reference::ParsedReference;

/// Assemble the canonical CDN URL for a parsed reference.
///
/// - GitHub family: `https://{host}/gh/{owner}/{repo}/{ref}/{path}`
/// - npm family: `https://{host}/npm/{name}[@{version}][/{path}]`
/// - Google Fonts: `https://{host}/gfonts/{css|css2}?{query}`
///
/// `SourceKind::Unknown` has no template and yields `UnrecognizedFormat`.
pub fn build_canonical_url(
    cdn_host: &str,
    kind: SourceKind,
    reference: &ParsedReference,
) -> Result<String, ResolutionError> {
    match kind.family() {
        Some(SourceFamily::Github) => {
            let owner = required(&reference.owner, kind, Component::Owner)?;
            let repo = required(&reference.repo, kind, Component::Repo)?;
            let git_ref = required(&reference.git_ref, kind, Component::Ref)?;
            let file_path = required(&reference.file_path, kind, Component::FilePath)?;
            Ok(format!(
                "https://{}/gh/{}/{}/{}/{}",
                cdn_host, owner, repo, git_ref, file_path
            ))
        }
        Some(SourceFamily::Npm) => {
            let name = required(&reference.package_name, kind, Component::PackageName)?;
            let mut url = format!("https://{}/npm/{}", cdn_host, name);
            if let Some(version) = reference.package_version.as_deref() {
                url.push('@');
                url.push_str(version);
            }
            if let Some(path) = reference.file_path.as_deref().filter(|p| !p.is_empty()) {
                url.push('/');
                url.push_str(path);
            }
            Ok(url)
        }
        Some(SourceFamily::GoogleFonts) => {
            let query = required(&reference.query, kind, Component::Query)?;
            let endpoint = if kind == SourceKind::GoogleFontsCss2 {
                "css2"
            } else {
                "css"
            };
            Ok(format!("https://{}/gfonts/{}?{}", cdn_host, endpoint, query))
        }
        None => Err(ResolutionError::unrecognized("")),
    }
}

fn required(
    value: &Option<String>,
    kind: SourceKind,
    missing: Component,
) -> Result<&str, ResolutionError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ResolutionError::incomplete(kind, missing))
}

/// Normalize a configured CDN host: trim whitespace, drop an `http(s)://`
/// prefix and trailing slashes.
pub fn normalize_cdn_host(host: &str) -> &str {
    let host = host.trim();
    let host = ["https://", "http://"]
        .into_iter()
        .find_map(|scheme| strip_prefix_ignore_case(host, scheme))
        .unwrap_or(host);
    host.trim_end_matches('/')
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}
