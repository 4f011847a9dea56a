//! Source resolution for CDN assets.
//!
//! This module turns URLs and shorthands pointing at upstream hosts into
//! canonical URLs on the target CDN. It handles:
//! - GitHub blob/raw URLs and bare `owner/repo/ref/path` shorthands
//! - npm references via jsDelivr, unpkg, npmjs.com, the registry, or bare
//!   `pkg@version/path` shorthands
//! - Google Fonts CSS API requests

mod build;
mod detect;
mod extract;
mod input;
mod kind;
mod reference;
mod resolver;

pub use build::{build_canonical_url, normalize_cdn_host};
pub use kind::{SourceFamily, SourceKind};
pub use reference::{DEFAULT_PACKAGE_VERSION, ParsedReference};
pub use resolver::{
    DEFAULT_CDN_HOST, Resolution, ResolutionResult, ResolveOptions, SourceResolver, resolve,
};
