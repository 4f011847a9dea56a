//! Delivr Core Library
//!
//! Resolves URLs and shorthands for assets hosted on GitHub, npm, unpkg,
//! jsDelivr and Google Fonts into canonical URLs on a target CDN.

pub mod config;
pub mod error;
pub mod migrate;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    // Resolution
    pub use crate::source::{
        ParsedReference, Resolution, ResolutionResult, ResolveOptions, SourceFamily, SourceKind,
        SourceResolver, resolve,
    };

    // Errors
    pub use crate::error::{Component, ResolutionError, ResolutionErrorKind};

    // Configuration
    pub use crate::config::{ConfigScope, ConfigStore, DelivrConfig};

    // Migration
    pub use crate::migrate::{Migration, rewrite_document};
}
