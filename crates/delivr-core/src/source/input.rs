//! Input normalization ahead of format detection.

/// Hosts with a dedicated detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KnownHost {
    RawGithub,
    Github,
    JsDelivr,
    Unpkg,
    Npmjs,
    NpmRegistry,
    GoogleFonts,
}

impl KnownHost {
    /// Match a lower-cased host (port already removed).
    fn from_host(host: &str) -> Option<Self> {
        match host {
            "raw.githubusercontent.com" => Some(Self::RawGithub),
            "github.com" | "www.github.com" => Some(Self::Github),
            "cdn.jsdelivr.net" | "fastly.jsdelivr.net" | "gcore.jsdelivr.net" => {
                Some(Self::JsDelivr)
            }
            "unpkg.com" => Some(Self::Unpkg),
            "npmjs.com" | "www.npmjs.com" => Some(Self::Npmjs),
            "registry.npmjs.org" => Some(Self::NpmRegistry),
            "fonts.googleapis.com" => Some(Self::GoogleFonts),
            _ => None,
        }
    }
}

/// A trimmed input split into the parts detectors look at.
///
/// Path and query keep their original bytes; only the host is compared
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceInput<'a> {
    /// Trimmed input with fragment and trailing slashes removed
    pub text: &'a str,
    /// Whether an `http://`, `https://` or `//` prefix was present
    pub has_scheme: bool,
    /// Recognized host, if any
    pub host: Option<KnownHost>,
    /// Text after the host (or the whole scheme-less input when no host
    /// was recognized), without leading/trailing slashes or query
    pub path: &'a str,
    /// Text after the first `?`, if any
    pub query: Option<&'a str>,
}

impl<'a> SourceInput<'a> {
    /// Normalize a raw input. Returns `None` when nothing is left after
    /// trimming whitespace.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let text = trimmed
            .split_once('#')
            .map_or(trimmed, |(before, _)| before)
            .trim_end_matches('/');

        let (body, has_scheme) = strip_scheme(text);

        let host_end = body.find(['/', '?']).unwrap_or(body.len());
        let host_part = &body[..host_end];
        let host = KnownHost::from_host(&normalize_host(host_part));

        let after_host = if host.is_some() {
            &body[host_end..]
        } else {
            body
        };
        let (path, query) = match after_host.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (after_host, None),
        };

        Some(Self {
            text,
            has_scheme,
            host,
            path: path.trim_matches('/'),
            query,
        })
    }

    /// Whether shorthand (host-less) rules may look at this input.
    pub fn is_shorthand_candidate(&self) -> bool {
        !self.has_scheme && self.host.is_none()
    }

    /// The path with its first segment removed when that segment equals
    /// `prefix`; `Some("")` when the path is exactly `prefix`.
    pub fn route(&self, prefix: &str) -> Option<&'a str> {
        let path: &'a str = self.path;
        match path.split_once('/') {
            Some((first, rest)) if first == prefix => Some(rest.trim_start_matches('/')),
            None if path == prefix => Some(""),
            _ => None,
        }
    }
}

fn strip_scheme(text: &str) -> (&str, bool) {
    for scheme in ["https://", "http://"] {
        if text.len() >= scheme.len()
            && text.is_char_boundary(scheme.len())
            && text[..scheme.len()].eq_ignore_ascii_case(scheme)
        {
            return (&text[scheme.len()..], true);
        }
    }
    match text.strip_prefix("//") {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}

fn normalize_host(host: &str) -> String {
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    };
    host.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert!(SourceInput::parse("").is_none());
        assert!(SourceInput::parse(" \t\n ").is_none());
    }

    #[test]
    fn host_is_case_insensitive_but_path_is_not() {
        let input = SourceInput::parse("  HTTPS://GitHub.com/Owner/Repo/blob/Main/A.js/ ").unwrap();
        assert!(input.has_scheme);
        assert_eq!(input.host, Some(KnownHost::Github));
        assert_eq!(input.path, "Owner/Repo/blob/Main/A.js");
    }

    #[test]
    fn query_and_fragment_are_split() {
        let input = SourceInput::parse("//unpkg.com/react@18/index.js?module#top").unwrap();
        assert_eq!(input.host, Some(KnownHost::Unpkg));
        assert_eq!(input.path, "react@18/index.js");
        assert_eq!(input.query, Some("module"));
    }

    #[test]
    fn port_is_ignored_for_host_matching() {
        let input = SourceInput::parse("http://cdn.jsdelivr.net:443/npm/vue").unwrap();
        assert_eq!(input.host, Some(KnownHost::JsDelivr));
        assert_eq!(input.route("npm"), Some("vue"));
    }

    #[test]
    fn scheme_less_unknown_host_is_shorthand_candidate() {
        let input = SourceInput::parse("@babel/core@7.20.0/lib/index.js").unwrap();
        assert!(input.is_shorthand_candidate());
        assert_eq!(input.path, "@babel/core@7.20.0/lib/index.js");
    }

    #[test]
    fn unknown_host_with_scheme_is_not_shorthand() {
        let input = SourceInput::parse("https://example.com/a/b/c").unwrap();
        assert!(input.host.is_none());
        assert!(!input.is_shorthand_candidate());
    }

    #[test]
    fn route_matches_whole_first_segment_only() {
        let input = SourceInput::parse("cdn.jsdelivr.net/npmx/vue").unwrap();
        assert_eq!(input.route("npm"), None);
        let input = SourceInput::parse("cdn.jsdelivr.net/npm").unwrap();
        assert_eq!(input.route("npm"), Some(""));
    }
}
