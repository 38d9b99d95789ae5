use std::path::Path;

use serde::{Deserialize, Serialize};

/// How elements outside the exhibit namespace are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespacePolicy {
    /// Foreign elements are structural errors.
    Require,
    /// Foreign elements produce a warning but do not fail the document.
    #[default]
    Warn,
    /// Namespaces are not checked at all.
    Ignore,
}

/// Configuration for exhibit validation.
///
/// This struct holds settings that control how documents are read and how
/// strictly the structural stage treats namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// How elements outside the exhibit namespace are reported.
    pub namespace_policy: NamespacePolicy,

    /// Whether to strip comments and processing instructions before parsing.
    pub sanitize: bool,

    /// File extensions collected when validating a directory.
    ///
    /// Extensions are stored without the leading dot and compared
    /// case-insensitively.
    extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace_policy: NamespacePolicy::default(),
            sanitize: false,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the file extensions collected when validating a directory.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Checks whether a file extension should be validated.
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Adds an extension to the collected list.
    ///
    /// The leading dot is dropped and the extension is lowercased.
    ///
    /// Returns `true` if the extension was added, `false` if it already
    /// existed.
    pub fn add_extension(&mut self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.').to_lowercase();
        if self.extensions.contains(&extension) {
            false
        } else {
            self.extensions.push(extension);
            true
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["xml".to_string()]
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        namespace_policy: NamespacePolicy,

        #[serde(default)]
        sanitize: bool,

        #[serde(default = "default_extensions")]
        extensions: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                namespace_policy,
                sanitize,
                extensions,
            } => Self {
                namespace_policy,
                sanitize,
                extensions,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            namespace_policy: config.namespace_policy,
            sanitize: config.sanitize,
            extensions: config.extensions,
        }
    }
}
