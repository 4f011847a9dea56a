use std::time::{Duration, Instant};

use delivr_core::error::{Component, ResolutionError, ResolutionErrorKind};
use delivr_core::source::{ResolveOptions, SourceKind, SourceResolver, resolve};

const SAMPLE_INPUTS: &[&str] = &[
    "https://github.com/jquery/jquery/blob/3.6.4/dist/jquery.min.js",
    "https://raw.githubusercontent.com/necolas/normalize.css/8.0.1/normalize.css",
    "cdn.jsdelivr.net/npm/react@18.2.0/index.js",
    "https://cdn.jsdelivr.net/gh/twbs/bootstrap@v5.3.0/dist/js/bootstrap.min.js",
    "https://unpkg.com/@babel/standalone@7.22.0/babel.min.js",
    "https://www.npmjs.com/package/lodash",
    "https://registry.npmjs.org/express",
    "https://fonts.googleapis.com/css2?family=Inter&display=swap",
    "@babel/core@7.20.0/lib/index.js",
    "owner/repo/main/file.js",
    "",
    "   ",
    "https://github.com/jquery/jquery/blob/3.6.4",
    "definitely not a source",
];

fn assert_within(limit: Duration, f: impl FnOnce()) {
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();
    assert!(elapsed < limit, "took {elapsed:?}, limit {limit:?}");
}

#[test]
fn resolution_is_deterministic() {
    let options = ResolveOptions::default();
    for input in SAMPLE_INPUTS {
        assert_eq!(resolve(input, &options), resolve(input, &options), "input: {input:?}");
    }

    let custom = ResolveOptions::with_cdn_host("cdn.example.net");
    for input in SAMPLE_INPUTS {
        assert_eq!(resolve(input, &custom), resolve(input, &custom), "input: {input:?}");
    }
}

#[test]
fn scoped_package_components() {
    let result = resolve("@babel/core@7.20.0/lib/index.js", &ResolveOptions::default()).unwrap();

    assert_eq!(result.reference.package_name.as_deref(), Some("@babel/core"));
    assert_eq!(result.reference.package_version.as_deref(), Some("7.20.0"));
    assert_eq!(result.reference.file_path.as_deref(), Some("lib/index.js"));
}

#[test]
fn github_blob_to_cdn() {
    let result = resolve(
        "https://github.com/jquery/jquery/blob/3.6.4/dist/jquery.min.js",
        &ResolveOptions::default(),
    )
    .unwrap();

    assert_eq!(
        result.canonical_url,
        "https://cdn.staticdelivr.com/gh/jquery/jquery/3.6.4/dist/jquery.min.js"
    );
}

#[test]
fn jsdelivr_npm_takes_priority_over_bare_shorthand() {
    let result = resolve(
        "cdn.jsdelivr.net/npm/react@18.2.0/index.js",
        &ResolveOptions::default(),
    )
    .unwrap();

    assert_eq!(result.kind, SourceKind::JsDelivrNpm);
    assert_eq!(result.reference.package_name.as_deref(), Some("react"));
}

#[test]
fn incomplete_blob_is_rejected() {
    let err = resolve(
        "https://github.com/jquery/jquery/blob/3.6.4",
        &ResolveOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ResolutionErrorKind::IncompleteReference);
    assert!(matches!(
        err,
        ResolutionError::IncompleteReference {
            missing: Component::FilePath,
            ..
        }
    ));
}

#[test]
fn empty_input_is_rejected() {
    let options = ResolveOptions::default();
    assert_eq!(resolve("", &options), Err(ResolutionError::EmptyInput));
    assert_eq!(resolve("   ", &options), Err(ResolutionError::EmptyInput));
}

#[test]
fn google_fonts_query_is_preserved() {
    let input = "https://fonts.googleapis.com/css2?family=Open+Sans:wght@400;600&family=Poppins:wght@500;700&display=swap";
    let result = resolve(input, &ResolveOptions::default()).unwrap();

    assert_eq!(
        result.canonical_url,
        "https://cdn.staticdelivr.com/gfonts/css2?family=Open+Sans:wght@400;600&family=Poppins:wght@500;700&display=swap"
    );
}

#[test]
fn adversarial_inputs_complete_quickly() {
    let resolver = SourceResolver::default();
    let limit = Duration::from_millis(100);

    let inputs = [
        "@".repeat(10_000),
        "/".repeat(10_000),
        "@/".repeat(5_000),
        "a@".repeat(5_000),
        format!("@scope/{}", "@".repeat(10_000)),
        format!("https://github.com/{}", "a/".repeat(5_000)),
        format!("https://unpkg.com/{}", "@a/".repeat(3_000)),
        format!("https://fonts.googleapis.com/css2?{}", "family=A@".repeat(1_000)),
        format!("{}/x", "a/b/".repeat(2_500)),
    ];

    // Compile the lazily built patterns outside the timed section.
    let _ = resolver.resolve("lodash@1.0.0");
    let _ = resolver.resolve("o/r/main/x.js");
    let _ = resolver.resolve("https://registry.npmjs.org/x/1.0.0");

    for input in &inputs {
        assert_within(limit, || {
            let _ = resolver.resolve(input);
        });
    }
}

#[test]
fn all_failures_are_values_not_panics() {
    let resolver = SourceResolver::default();
    let odd_inputs = [
        "@", "@/", "@a/", "a@", "@a/b@", "?", "#", "//", "https://", "http://github.com",
        "github.com/?x", "unpkg.com/@", "registry.npmjs.org/@x%2F", "npmjs.com/package/@s",
        "fonts.googleapis.com/css2?", "cdn.jsdelivr.net/gh/@", "é/ü/ß/ø", "a/b/c/d?e#f",
    ];

    for input in odd_inputs {
        let result = std::panic::catch_unwind(|| resolver.resolve(input));
        assert!(result.is_ok(), "resolver panicked on {input:?}");
    }
}
