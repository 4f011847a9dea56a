//! Component extraction for each source family.
//!
//! Extractors work on the normalized path of a [`SourceInput`]. They return
//! the missing [`Component`] rather than a half-filled reference when the
//! input stops short of a required part.
//!
//! [`SourceInput`]: super::input::SourceInput

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Component;

use super::reference::ParsedReference;

/// GitHub login: alphanumerics and single hyphens, at most 39 characters.
static GITHUB_OWNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,38})$").expect("valid owner regex")
});

static GITHUB_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid repo regex"));

/// Package name as it may appear in an explicit `name@version` spec.
/// Legacy registry names may contain capitals.
static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[A-Za-z0-9][A-Za-z0-9._~-]*/)?[A-Za-z0-9][A-Za-z0-9._~-]*$")
        .expect("valid package name regex")
});

/// Package name accepted as a bare token with no version.
static LOWERCASE_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9][a-z0-9._~-]*/)?[a-z0-9][a-z0-9._~-]*$")
        .expect("valid lowercase package name regex")
});

static PACKAGE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@/?#]+$").expect("valid version regex"));

/// Ref and file path segments in a bare `owner/repo/ref/path` shorthand.
static PLAIN_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s?#]+$").expect("valid segment regex"));

pub(crate) type Extracted = Result<ParsedReference, Component>;

/// A package spec split into name, version and path, borrowing the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PackageSpec<'a> {
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub path: Option<&'a str>,
}

impl<'a> PackageSpec<'a> {
    /// Split `name[@version][/path]`.
    ///
    /// For a scoped name (`@scope/name`) the version separator is the second
    /// `@`; otherwise it is the first. The version ends at the next `/`.
    pub fn split(spec: &'a str) -> Result<Self, Component> {
        let name_start = if spec.starts_with('@') {
            let slash = spec.find('/').ok_or(Component::PackageName)?;
            if slash == 1 {
                return Err(Component::PackageName);
            }
            slash + 1
        } else {
            0
        };

        let name_end = spec[name_start..]
            .find(['@', '/'])
            .map_or(spec.len(), |idx| name_start + idx);
        if name_end == name_start {
            return Err(Component::PackageName);
        }
        let name = &spec[..name_end];
        let rest = &spec[name_end..];

        let (version, rest) = match rest.strip_prefix('@') {
            Some(after_at) => {
                let (version, rest) = after_at.split_once('/').unwrap_or((after_at, ""));
                if version.is_empty() {
                    return Err(Component::PackageVersion);
                }
                (Some(version), rest)
            }
            None => (None, rest.strip_prefix('/').unwrap_or(rest)),
        };

        let path = Some(rest.trim_start_matches('/')).filter(|p| !p.is_empty());
        Ok(Self {
            name,
            version,
            path,
        })
    }

    pub fn has_valid_name(&self) -> bool {
        PACKAGE_NAME.is_match(self.name)
    }

    pub fn has_valid_version(&self) -> bool {
        self.version.is_none_or(|v| PACKAGE_VERSION.is_match(v))
    }

    pub fn into_reference(self) -> ParsedReference {
        let mut reference = ParsedReference::package(self.name);
        if let Some(version) = self.version {
            reference = reference.with_version(version);
        }
        if let Some(path) = self.path {
            reference = reference.with_file_path(path);
        }
        reference
    }
}

/// Extract `{owner}/{repo}/{ref}/{path}`, keeping the path verbatim.
pub(crate) fn github_path(path: &str) -> Extracted {
    let mut parts = path.splitn(4, '/');
    let owner = non_empty(parts.next(), Component::Owner)?;
    let repo = non_empty(parts.next(), Component::Repo)?;
    let git_ref = non_empty(parts.next(), Component::Ref)?;
    let file_path = non_empty(parts.next(), Component::FilePath)?;
    Ok(ParsedReference::github(owner, repo, git_ref, file_path))
}

/// Extract a `raw.githubusercontent.com` path. Newer raw URLs spell the ref
/// as `refs/heads/{ref}` or `refs/tags/{ref}`. Any other `refs/...` form is
/// kept as is, with `refs` as the ref.
pub(crate) fn raw_github_path(path: &str) -> Extracted {
    let mut reference = github_path(path)?;
    if reference.git_ref.as_deref() == Some("refs") {
        let rest = reference.file_path.as_deref().unwrap_or_default();
        let Some(unwrapped) = rest
            .strip_prefix("heads/")
            .or_else(|| rest.strip_prefix("tags/"))
        else {
            return Ok(reference);
        };
        let (git_ref, file_path) = match unwrapped.split_once('/') {
            Some((git_ref, file_path)) => (git_ref, file_path),
            None => (unwrapped, ""),
        };
        reference.git_ref = Some(non_empty(Some(git_ref), Component::Ref)?.to_string());
        reference.file_path = Some(non_empty(Some(file_path), Component::FilePath)?.to_string());
    }
    Ok(reference)
}

/// Extract `{owner}/{repo}/{route}/{ref}/{path}` from a github.com path when
/// `route` is `expected`. Returns `None` if the route differs.
///
/// A path that stops at `{owner}/{repo}` is reported incomplete only for the
/// `blob` route, which owns bare repository URLs.
pub(crate) fn github_route_path(path: &str, expected: &str) -> Option<Extracted> {
    let mut parts = path.splitn(4, '/');
    let owner = parts.next().filter(|s| !s.is_empty());
    let repo = parts.next().filter(|s| !s.is_empty());
    let route = parts.next();
    let rest = parts.next().unwrap_or("");

    match route {
        Some(route) if route == expected => {}
        Some(_) => return None,
        None if expected == "blob" => {}
        None => return None,
    }

    let Some(owner) = owner else {
        return Some(Err(Component::Owner));
    };
    let Some(repo) = repo else {
        return Some(Err(Component::Repo));
    };
    let (git_ref, file_path) = rest.split_once('/').unwrap_or((rest, ""));
    Some(
        non_empty(Some(git_ref), Component::Ref)
            .and_then(|git_ref| {
                non_empty(Some(file_path), Component::FilePath).map(|p| (git_ref, p))
            })
            .map(|(git_ref, file_path)| ParsedReference::github(owner, repo, git_ref, file_path)),
    )
}

/// Extract `{owner}/{repo}@{ref}/{path}` from a jsDelivr `gh/` route.
pub(crate) fn jsdelivr_github_path(path: &str) -> Extracted {
    let mut parts = path.splitn(3, '/');
    let owner = non_empty(parts.next(), Component::Owner)?;
    let repo_and_ref = non_empty(parts.next(), Component::Repo)?;
    let (repo, git_ref) = repo_and_ref.split_once('@').ok_or(Component::Ref)?;
    let repo = non_empty(Some(repo), Component::Repo)?;
    let git_ref = non_empty(Some(git_ref), Component::Ref)?;
    let file_path = non_empty(parts.next(), Component::FilePath)?;
    Ok(ParsedReference::github(owner, repo, git_ref, file_path))
}

/// Extract a pass-through package spec (jsDelivr `npm/`, unpkg). No default
/// version is injected. `Ok(None)` means the name is not package-shaped.
pub(crate) fn package_passthrough(path: &str) -> Result<Option<ParsedReference>, Component> {
    let spec = PackageSpec::split(path)?;
    if !spec.has_valid_name() || !spec.has_valid_version() {
        return Ok(None);
    }
    Ok(Some(spec.into_reference()))
}

/// Extract an npmjs.com package page path (`{pkg}` or `{pkg}/v/{version}`).
pub(crate) fn npmjs_page_path(path: &str) -> Result<Option<ParsedReference>, Component> {
    let (name, rest) = split_package_segments(path)?;
    let mut reference = ParsedReference::package(name);
    match rest {
        "" => {}
        "v" => return Err(Component::PackageVersion),
        _ => match rest.strip_prefix("v/") {
            Some(version) if PACKAGE_VERSION.is_match(version) => {
                reference = reference.with_version(version);
            }
            Some("") => return Err(Component::PackageVersion),
            _ => return Ok(None),
        },
    }
    if !PACKAGE_NAME.is_match(name) {
        return Ok(None);
    }
    Ok(Some(reference.with_default_version()))
}

/// Extract a registry.npmjs.org path: `{pkg}`, `{pkg}/{version}` or the
/// tarball form `{pkg}/-/{basename}-{version}.tgz`. Scopes may be encoded
/// as `@scope%2Fname`.
pub(crate) fn registry_path(path: &str) -> Result<Option<ParsedReference>, Component> {
    let decoded = decode_scope_separator(path);
    let (name, rest) = split_package_segments(&decoded)?;
    if !PACKAGE_NAME.is_match(name) {
        return Ok(None);
    }

    let reference = ParsedReference::package(name);
    let version = match rest.split_once('/') {
        None if rest.is_empty() => None,
        None if PACKAGE_VERSION.is_match(rest) => Some(rest.to_string()),
        Some(("-", tarball)) => match tarball_version(name, tarball) {
            Some(version) => Some(version.to_string()),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    Ok(Some(match version {
        Some(version) => reference.with_version(version),
        None => reference.with_default_version(),
    }))
}

/// Extract a bare package shorthand: `name@version[/path]`, or a plain
/// lowercase name with neither version nor path.
pub(crate) fn bare_package(text: &str) -> Option<ParsedReference> {
    if text.chars().any(char::is_whitespace) {
        return None;
    }
    let spec = PackageSpec::split(text).ok()?;
    let accepted = match spec.version {
        Some(_) => spec.has_valid_name() && spec.has_valid_version(),
        None => spec.path.is_none() && LOWERCASE_PACKAGE_NAME.is_match(spec.name),
    };
    accepted.then(|| spec.into_reference().with_default_version())
}

/// Extract a bare `owner/repo/ref/path` shorthand of exactly four segments.
pub(crate) fn bare_github(text: &str) -> Option<ParsedReference> {
    let segments: Vec<&str> = text.split('/').collect();
    let [owner, repo, git_ref, file] = segments.as_slice() else {
        return None;
    };
    let shaped = GITHUB_OWNER.is_match(owner)
        && GITHUB_REPO.is_match(repo)
        && PLAIN_SEGMENT.is_match(git_ref)
        && PLAIN_SEGMENT.is_match(file);
    shaped.then(|| ParsedReference::github(*owner, *repo, *git_ref, *file))
}

/// Split `{name}/{rest}` where a scoped name spans two segments.
fn split_package_segments(path: &str) -> Result<(&str, &str), Component> {
    let name_end = if path.starts_with('@') {
        let slash = path.find('/').ok_or(Component::PackageName)?;
        path[slash + 1..]
            .find('/')
            .map_or(path.len(), |idx| slash + 1 + idx)
    } else {
        path.find('/').unwrap_or(path.len())
    };
    let name = &path[..name_end];
    if name.is_empty() || name.ends_with('/') {
        return Err(Component::PackageName);
    }
    let rest = path[name_end..].trim_start_matches('/');
    Ok((name, rest))
}

fn decode_scope_separator(path: &str) -> String {
    if !path.starts_with('@') {
        return path.to_string();
    }
    let first_slash = path.find('/').unwrap_or(path.len());
    let scope_part = &path[..first_slash];
    match scope_part.find("%2F").or_else(|| scope_part.find("%2f")) {
        Some(idx) => format!("{}/{}", &path[..idx], &path[idx + 3..]),
        None => path.to_string(),
    }
}

/// Version out of a `{basename}-{version}.tgz` tarball file name.
fn tarball_version<'a>(name: &str, tarball: &'a str) -> Option<&'a str> {
    let basename = name.rsplit('/').next().unwrap_or(name);
    let version = tarball
        .strip_prefix(basename)?
        .strip_prefix('-')?
        .strip_suffix(".tgz")?;
    PACKAGE_VERSION.is_match(version).then_some(version)
}

fn non_empty(part: Option<&str>, component: Component) -> Result<&str, Component> {
    part.filter(|s| !s.is_empty()).ok_or(component)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_scoped_spec_uses_second_at() {
        let spec = PackageSpec::split("@babel/core@7.20.0/lib/index.js").unwrap();
        assert_eq!(spec.name, "@babel/core");
        assert_eq!(spec.version, Some("7.20.0"));
        assert_eq!(spec.path, Some("lib/index.js"));
    }

    #[test]
    fn split_unscoped_spec_uses_first_at() {
        let spec = PackageSpec::split("react@18.2.0/umd/react.production.min.js").unwrap();
        assert_eq!(spec.name, "react");
        assert_eq!(spec.version, Some("18.2.0"));
        assert_eq!(spec.path, Some("umd/react.production.min.js"));
    }

    #[test]
    fn split_ignores_at_inside_path() {
        let spec = PackageSpec::split("pkg/dist/file@2x.png").unwrap();
        assert_eq!(spec.name, "pkg");
        assert_eq!(spec.version, None);
        assert_eq!(spec.path, Some("dist/file@2x.png"));
    }

    #[test]
    fn split_rejects_scope_without_name() {
        assert_eq!(PackageSpec::split("@babel"), Err(Component::PackageName));
        assert_eq!(PackageSpec::split("@/core"), Err(Component::PackageName));
        assert_eq!(PackageSpec::split("@babel/"), Err(Component::PackageName));
    }

    #[test]
    fn split_rejects_empty_version() {
        assert_eq!(
            PackageSpec::split("react@/index.js"),
            Err(Component::PackageVersion)
        );
    }

    #[test]
    fn github_path_keeps_deep_paths() {
        let reference = github_path("o/r/main/a/b/c.js").unwrap();
        assert_eq!(reference.file_path.as_deref(), Some("a/b/c.js"));
    }

    #[test]
    fn github_path_reports_first_missing_component() {
        assert_eq!(github_path("o/r/main"), Err(Component::FilePath));
        assert_eq!(github_path("o/r"), Err(Component::Ref));
        assert_eq!(github_path("o"), Err(Component::Repo));
        assert_eq!(github_path(""), Err(Component::Owner));
    }

    #[test]
    fn raw_path_unwraps_refs_heads() {
        let reference = raw_github_path("o/r/refs/heads/dev/dist/x.js").unwrap();
        assert_eq!(reference.git_ref.as_deref(), Some("dev"));
        assert_eq!(reference.file_path.as_deref(), Some("dist/x.js"));
        assert_eq!(
            raw_github_path("o/r/refs/tags/v1"),
            Err(Component::FilePath)
        );
    }

    #[test]
    fn raw_path_keeps_other_refs_forms() {
        let reference = raw_github_path("o/r/refs/pull/12/head/a.js").unwrap();
        assert_eq!(reference.git_ref.as_deref(), Some("refs"));
        assert_eq!(reference.file_path.as_deref(), Some("pull/12/head/a.js"));
    }

    #[test]
    fn github_route_ignores_other_routes() {
        assert!(github_route_path("o/r/tree/main/src", "blob").is_none());
        assert!(github_route_path("o/r/blob/main/src", "raw").is_none());
        assert_eq!(github_route_path("o/r", "blob"), Some(Err(Component::Ref)));
        assert!(github_route_path("o/r", "raw").is_none());
    }

    #[test]
    fn jsdelivr_github_requires_ref() {
        assert_eq!(jsdelivr_github_path("o/r/dist/x.js"), Err(Component::Ref));
        assert_eq!(jsdelivr_github_path("o/r@v1"), Err(Component::FilePath));
        let reference = jsdelivr_github_path("o/r@v1/dist/x.js").unwrap();
        assert_eq!(reference.repo.as_deref(), Some("r"));
        assert_eq!(reference.git_ref.as_deref(), Some("v1"));
    }

    #[test]
    fn registry_tarball_version() {
        let reference = registry_path("@babel%2Fcore/-/core-7.20.0.tgz")
            .unwrap()
            .unwrap();
        assert_eq!(reference.package_name.as_deref(), Some("@babel/core"));
        assert_eq!(reference.package_version.as_deref(), Some("7.20.0"));
    }

    #[test]
    fn npmjs_page_version_segment() {
        let reference = npmjs_page_path("react/v/18.2.0").unwrap().unwrap();
        assert_eq!(reference.package_version.as_deref(), Some("18.2.0"));
        assert_eq!(npmjs_page_path("react/v"), Err(Component::PackageVersion));
        assert_eq!(npmjs_page_path("react/dependents"), Ok(None));
    }

    #[test]
    fn bare_package_plain_token_must_be_lowercase() {
        assert!(bare_package("lodash").is_some());
        assert!(bare_package("Lodash").is_none());
        assert!(bare_package("lodash/fp.js").is_none());
        assert!(bare_package("JSONStream@1.3.5").is_some());
    }

    #[test]
    fn bare_github_rejects_scoped_owner() {
        assert!(bare_github("@babel/core@7.20.0/lib").is_none());
        assert!(bare_github("twbs/bootstrap/v5.3.0/dist").is_some());
        assert!(bare_github("a/b/c/d/e").is_none());
        assert!(bare_github("twbs/bootstrap/main/logo@2x.png").is_some());
    }
}
