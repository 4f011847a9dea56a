//! Resolution error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::source::SourceKind;

/// Structural component a recognized reference can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    Owner,
    Repo,
    Ref,
    FilePath,
    PackageName,
    PackageVersion,
    Query,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Owner => "owner",
            Component::Repo => "repository",
            Component::Ref => "ref",
            Component::FilePath => "file path",
            Component::PackageName => "package name",
            Component::PackageVersion => "package version",
            Component::Query => "query string",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to turn an input into a canonical CDN URL.
///
/// Every failure mode of the resolver is one of these variants; string
/// input never causes a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Input was empty or whitespace-only.
    #[error("input is empty")]
    EmptyInput,

    /// No detector matched the input.
    #[error("unrecognized source format: `{input}`")]
    UnrecognizedFormat {
        /// The trimmed input.
        input: String,
    },

    /// A host or pattern matched but a required component is missing.
    #[error("incomplete {kind} reference: missing {missing}")]
    IncompleteReference {
        /// Kind the input was recognized as.
        kind: SourceKind,
        /// First required component that could not be extracted.
        missing: Component,
    },
}

/// Coarse classification of a [`ResolutionError`], for callers that map
/// failures to user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionErrorKind {
    EmptyInput,
    UnrecognizedFormat,
    IncompleteReference,
}

impl ResolutionError {
    pub(crate) fn unrecognized(input: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            input: input.into(),
        }
    }

    pub(crate) fn incomplete(kind: SourceKind, missing: Component) -> Self {
        Self::IncompleteReference { kind, missing }
    }

    pub fn kind(&self) -> ResolutionErrorKind {
        match self {
            Self::EmptyInput => ResolutionErrorKind::EmptyInput,
            Self::UnrecognizedFormat { .. } => ResolutionErrorKind::UnrecognizedFormat,
            Self::IncompleteReference { .. } => ResolutionErrorKind::IncompleteReference,
        }
    }
}

impl ResolutionErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionErrorKind::EmptyInput => "empty-input",
            ResolutionErrorKind::UnrecognizedFormat => "unrecognized-format",
            ResolutionErrorKind::IncompleteReference => "incomplete-reference",
        }
    }
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
