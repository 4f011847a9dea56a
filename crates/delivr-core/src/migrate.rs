//! Rewriting of source and CDN URLs embedded in a document.
//!
//! Scans HTML, CSS or JavaScript text for absolute or protocol-relative URLs
//! on the supported upstream hosts and swaps each one for its canonical CDN
//! URL. URLs that fail to resolve are reported and left as they were.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;
use crate::source::{SourceKind, SourceResolver};

static EMBEDDED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i:https?:)?//(?i:cdn\.jsdelivr\.net|fastly\.jsdelivr\.net|gcore\.jsdelivr\.net|unpkg\.com|raw\.githubusercontent\.com|(?:www\.)?github\.com|fonts\.googleapis\.com)/[^\s"'`<>()]+"#,
    )
    .expect("valid embedded url regex")
});

/// A URL that was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    /// Byte offset of the original URL in the input
    pub offset: usize,
    pub original: String,
    pub replacement: String,
    pub kind: SourceKind,
}

/// A recognized-host URL that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    /// Byte offset of the URL in the input
    pub offset: usize,
    pub original: String,
    /// Display form of the resolution error
    pub reason: String,
}

/// Result of rewriting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    /// The rewritten document
    pub output: String,
    pub rewrites: Vec<Rewrite>,
    pub skipped: Vec<Skipped>,
}

impl Migration {
    /// Check if anything in the document changed.
    pub fn is_changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// Rewrite every resolvable upstream URL in `text`.
pub fn rewrite_document(text: &str, resolver: &SourceResolver) -> Migration {
    let mut migration = Migration {
        output: String::with_capacity(text.len()),
        ..Migration::default()
    };
    let mut last_end = 0;

    for found in EMBEDDED_URL.find_iter(text) {
        let offset = found.start();
        if continues_url(&text[..offset]) {
            tracing::trace!(offset, nested = found.as_str(), "ignored nested url");
            continue;
        }
        let original = trim_trailing_punctuation(found.as_str());
        let end = offset + original.len();

        match resolver.resolve(original) {
            Ok(resolution) => {
                tracing::debug!(offset, original, replacement = %resolution.canonical_url, "rewrote url");
                migration.output.push_str(&text[last_end..offset]);
                migration.output.push_str(&resolution.canonical_url);
                last_end = end;
                migration.rewrites.push(Rewrite {
                    offset,
                    original: original.to_string(),
                    replacement: resolution.canonical_url,
                    kind: resolution.kind,
                });
            }
            Err(err) => {
                tracing::debug!(offset, original, error = %err, "left url unchanged");
                migration.skipped.push(skipped(offset, original, &err));
            }
        }
    }

    migration.output.push_str(&text[last_end..]);
    migration
}

fn skipped(offset: usize, original: &str, err: &ResolutionError) -> Skipped {
    Skipped {
        offset,
        original: original.to_string(),
        reason: err.to_string(),
    }
}

/// Check if the text before a match ends in a character that would make the
/// match part of a longer URL, e.g. `?to=//unpkg.com/...`.
fn continues_url(before: &str) -> bool {
    before.chars().next_back().is_some_and(|c| {
        c.is_alphanumeric()
            || matches!(
                c,
                '=' | '/' | ':' | '?' | '&' | '%' | '.' | '-' | '_' | '~' | '+'
            )
    })
}

/// Drop sentence punctuation that commonly follows a URL in prose or code,
/// e.g. `url,` or `url;`.
fn trim_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches([',', ';', '.', ':', '!'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migrate(text: &str) -> Migration {
        rewrite_document(text, &SourceResolver::default())
    }

    #[test]
    fn rewrites_script_and_link_tags() {
        let html = r#"<script src="https://cdn.jsdelivr.net/npm/vue@3.3.4/dist/vue.global.js"></script>
<link rel="stylesheet" href="//unpkg.com/bulma@0.9.4/css/bulma.min.css">"#;

        let migration = migrate(html);

        assert_eq!(migration.rewrites.len(), 2);
        assert!(migration.skipped.is_empty());
        assert_eq!(
            migration.output,
            r#"<script src="https://cdn.staticdelivr.com/npm/vue@3.3.4/dist/vue.global.js"></script>
<link rel="stylesheet" href="https://cdn.staticdelivr.com/npm/bulma@0.9.4/css/bulma.min.css">"#
        );
        assert_eq!(migration.rewrites[0].kind, SourceKind::JsDelivrNpm);
        assert_eq!(migration.rewrites[1].kind, SourceKind::UnpkgShorthand);
        assert_eq!(migration.rewrites[0].offset, 13);
    }

    #[test]
    fn keeps_escaped_font_query() {
        let html = r#"<link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700&amp;display=swap" rel="stylesheet">"#;

        let migration = migrate(html);

        assert_eq!(
            migration.output,
            r#"<link href="https://cdn.staticdelivr.com/gfonts/css2?family=Inter:wght@400;700&amp;display=swap" rel="stylesheet">"#
        );
    }

    #[test]
    fn css_url_function_and_punctuation() {
        let css = "@import url(https://fonts.googleapis.com/css?family=Lato);\n\
                   /* see https://github.com/o/r/blob/main/a.css. */";

        let migration = migrate(css);

        assert_eq!(migration.rewrites.len(), 2);
        assert!(migration.output.contains("url(https://cdn.staticdelivr.com/gfonts/css?family=Lato);"));
        assert!(migration.output.contains("https://cdn.staticdelivr.com/gh/o/r/main/a.css. */"));
    }

    #[test]
    fn unresolvable_urls_are_left_alone() {
        let text = "Clone https://github.com/o/r and load https://cdn.jsdelivr.net/gh/o/r/x.js";

        let migration = migrate(text);

        assert!(!migration.is_changed());
        assert_eq!(migration.output, text);
        assert_eq!(migration.skipped.len(), 2);
        assert_eq!(migration.skipped[0].original, "https://github.com/o/r");
        assert!(migration.skipped[1].reason.contains("missing ref"));
    }

    #[test]
    fn urls_nested_in_other_urls_are_not_touched() {
        let html = r#"<a href="https://example.com/go?to=//unpkg.com/react@18.2.0/index.js">x</a>
<a href="https://example.com/r?u=https://cdn.jsdelivr.net/npm/vue@3.3.4/dist/vue.js">y</a>"#;

        let migration = migrate(html);

        assert_eq!(migration.output, html);
        assert!(migration.rewrites.is_empty());
        assert!(migration.skipped.is_empty());
    }

    #[test]
    fn url_after_markup_is_still_rewritten() {
        let text = "<p>CDN:</p>//unpkg.com/react@18.2.0/index.js url(//unpkg.com/a@1.0.0/b.css)";

        let migration = migrate(text);

        assert_eq!(migration.rewrites.len(), 2);
        assert_eq!(migration.rewrites[0].offset, 11);
    }

    #[test]
    fn unrelated_hosts_are_not_touched() {
        let text = r#"<script src="https://example.com/app.js"></script>"#;
        let migration = migrate(text);
        assert_eq!(migration.output, text);
        assert!(migration.rewrites.is_empty());
        assert!(migration.skipped.is_empty());
    }
}
