//! Structural decomposition of a recognized input.

use serde::{Deserialize, Serialize};

/// Version injected for shorthand-style npm inputs that name no version.
pub const DEFAULT_PACKAGE_VERSION: &str = "latest";

/// Components extracted from an input string.
///
/// Which fields are populated depends on the source family:
/// - GitHub: `owner`, `repo`, `git_ref`, `file_path`
/// - npm: `package_name`, optional `package_version`, optional `file_path`
/// - Google Fonts: `query`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Branch, tag, or commit SHA
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Package name, including a leading `@scope/` when scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    /// Raw font request query string, without the leading `?`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ParsedReference {
    /// Create a reference to a file inside a GitHub repository.
    pub fn github(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            git_ref: Some(git_ref.into()),
            file_path: Some(file_path.into()),
            ..Self::default()
        }
    }

    /// Create a reference to an npm package with no version or path.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            package_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a reference to a Google Fonts CSS request.
    pub fn fonts(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Set the package version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.package_version = Some(version.into());
        self
    }

    /// Set the file path.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Fill in `latest` when no version was given.
    pub fn with_default_version(mut self) -> Self {
        if self.package_version.is_none() {
            self.package_version = Some(DEFAULT_PACKAGE_VERSION.to_string());
        }
        self
    }

    /// Check if the package name carries an `@scope/` prefix.
    pub fn is_scoped_package(&self) -> bool {
        self.package_name
            .as_deref()
            .is_some_and(|name| name.starts_with('@'))
    }
}
