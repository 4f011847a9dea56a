//! Ordered format detectors.
//!
//! Each detector pairs a [`SourceKind`] with a matcher over a normalized
//! [`SourceInput`]. [`DETECTORS`] is walked in order and the first detector
//! that does not answer [`Detection::NoMatch`] decides the outcome.

use crate::error::Component;

use super::extract;
use super::input::{KnownHost, SourceInput};
use super::kind::SourceKind;
use super::reference::ParsedReference;

/// Outcome of a single detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Detection {
    /// The input is not this detector's format; try the next one.
    NoMatch,
    /// The input is this format and every required component was extracted.
    Matched(ParsedReference),
    /// The input is this format but a required component is missing.
    Incomplete(Component),
}

impl Detection {
    fn from_extracted(extracted: extract::Extracted) -> Self {
        match extracted {
            Ok(reference) => Self::Matched(reference),
            Err(missing) => Self::Incomplete(missing),
        }
    }

    fn from_optional(extracted: Result<Option<ParsedReference>, Component>) -> Self {
        match extracted {
            Ok(Some(reference)) => Self::Matched(reference),
            Ok(None) => Self::NoMatch,
            Err(missing) => Self::Incomplete(missing),
        }
    }
}

pub(crate) struct Detector {
    pub name: &'static str,
    pub kind: SourceKind,
    pub detect: fn(&SourceInput<'_>) -> Detection,
}

/// Detectors in priority order.
pub(crate) static DETECTORS: [Detector; 12] = [
    Detector {
        name: "raw-githubusercontent",
        kind: SourceKind::GithubRaw,
        detect: detect_raw_githubusercontent,
    },
    Detector {
        name: "github-blob",
        kind: SourceKind::GithubBlob,
        detect: detect_github_blob,
    },
    Detector {
        name: "github-raw",
        kind: SourceKind::GithubRaw,
        detect: detect_github_raw,
    },
    Detector {
        name: "jsdelivr-gh",
        kind: SourceKind::JsDelivrGithub,
        detect: detect_jsdelivr_github,
    },
    Detector {
        name: "jsdelivr-npm",
        kind: SourceKind::JsDelivrNpm,
        detect: detect_jsdelivr_npm,
    },
    Detector {
        name: "unpkg",
        kind: SourceKind::UnpkgShorthand,
        detect: detect_unpkg,
    },
    Detector {
        name: "npmjs-page",
        kind: SourceKind::NpmjsPage,
        detect: detect_npmjs_page,
    },
    Detector {
        name: "npm-registry",
        kind: SourceKind::NpmRegistryShorthand,
        detect: detect_npm_registry,
    },
    Detector {
        name: "google-fonts-css2",
        kind: SourceKind::GoogleFontsCss2,
        detect: detect_google_fonts_css2,
    },
    Detector {
        name: "google-fonts-css",
        kind: SourceKind::GoogleFontsCss,
        detect: detect_google_fonts_css,
    },
    Detector {
        name: "bare-github",
        kind: SourceKind::GithubBlob,
        detect: detect_bare_github,
    },
    Detector {
        name: "bare-package",
        kind: SourceKind::NpmRegistryShorthand,
        detect: detect_bare_package,
    },
];

/// Run the detectors in order. Returns the deciding detector's kind and
/// outcome, or `None` when every detector declined.
pub(crate) fn detect(input: &SourceInput<'_>) -> Option<(SourceKind, Detection)> {
    for detector in &DETECTORS {
        let detection = (detector.detect)(input);
        tracing::trace!(detector = detector.name, ?detection, "detector attempted");
        if detection != Detection::NoMatch {
            tracing::debug!(detector = detector.name, kind = %detector.kind, "detector matched");
            return Some((detector.kind, detection));
        }
    }
    None
}

fn detect_raw_githubusercontent(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::RawGithub) {
        return Detection::NoMatch;
    }
    Detection::from_extracted(extract::raw_github_path(input.path))
}

fn detect_github_blob(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::Github) {
        return Detection::NoMatch;
    }
    extract::github_route_path(input.path, "blob")
        .map_or(Detection::NoMatch, Detection::from_extracted)
}

fn detect_github_raw(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::Github) {
        return Detection::NoMatch;
    }
    extract::github_route_path(input.path, "raw")
        .map_or(Detection::NoMatch, Detection::from_extracted)
}

fn detect_jsdelivr_github(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::JsDelivr) {
        return Detection::NoMatch;
    }
    match input.route("gh") {
        Some(rest) => Detection::from_extracted(extract::jsdelivr_github_path(rest)),
        None => Detection::NoMatch,
    }
}

fn detect_jsdelivr_npm(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::JsDelivr) {
        return Detection::NoMatch;
    }
    match input.route("npm") {
        Some(rest) => Detection::from_optional(extract::package_passthrough(rest)),
        None => Detection::NoMatch,
    }
}

fn detect_unpkg(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::Unpkg) {
        return Detection::NoMatch;
    }
    Detection::from_optional(extract::package_passthrough(input.path))
}

fn detect_npmjs_page(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::Npmjs) {
        return Detection::NoMatch;
    }
    match input.route("package") {
        Some(rest) => Detection::from_optional(extract::npmjs_page_path(rest)),
        None => Detection::NoMatch,
    }
}

fn detect_npm_registry(input: &SourceInput<'_>) -> Detection {
    if input.host != Some(KnownHost::NpmRegistry) {
        return Detection::NoMatch;
    }
    Detection::from_optional(extract::registry_path(input.path))
}

fn detect_google_fonts_css2(input: &SourceInput<'_>) -> Detection {
    detect_google_fonts(input, "css2")
}

fn detect_google_fonts_css(input: &SourceInput<'_>) -> Detection {
    detect_google_fonts(input, "css")
}

fn detect_google_fonts(input: &SourceInput<'_>, endpoint: &str) -> Detection {
    if input.host != Some(KnownHost::GoogleFonts) || input.path != endpoint {
        return Detection::NoMatch;
    }
    match input.query {
        Some(query) if !query.is_empty() => Detection::Matched(ParsedReference::fonts(query)),
        _ => Detection::Incomplete(Component::Query),
    }
}

fn detect_bare_github(input: &SourceInput<'_>) -> Detection {
    if !input.is_shorthand_candidate() {
        return Detection::NoMatch;
    }
    extract::bare_github(input.path).map_or(Detection::NoMatch, Detection::Matched)
}

fn detect_bare_package(input: &SourceInput<'_>) -> Detection {
    if !input.is_shorthand_candidate() {
        return Detection::NoMatch;
    }
    extract::bare_package(input.path).map_or(Detection::NoMatch, Detection::Matched)
}
