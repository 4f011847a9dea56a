//! HTML tag wrapping for resolved URLs.

use delivr_core::source::{Resolution, SourceFamily};

/// Wrap a resolved URL in the tag a page would use to load it.
///
/// Stylesheets and font requests become `<link rel="stylesheet">`, scripts
/// become `<script>`; anything else is returned as the bare URL.
pub fn html_tag(resolution: &Resolution) -> String {
    let href = escape_attribute(&resolution.canonical_url);
    if resolution.kind.family() == Some(SourceFamily::GoogleFonts) {
        return format!(r#"<link rel="stylesheet" href="{}">"#, href);
    }

    let extension = resolution
        .reference
        .file_path
        .as_deref()
        .and_then(|path| path.rsplit('/').next())
        .and_then(|file| file.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("css") => format!(r#"<link rel="stylesheet" href="{}">"#, href),
        Some("mjs") => format!(r#"<script type="module" src="{}"></script>"#, href),
        Some("js") | Some("cjs") => format!(r#"<script src="{}"></script>"#, href),
        _ => resolution.canonical_url.clone(),
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
