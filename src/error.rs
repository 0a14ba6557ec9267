//! Error types raised while loading configuration and building entry sets.

use std::path::PathBuf;

use thiserror::Error;

use crate::selection::SelectionError;

/// Fatal configuration problems detected before any discovery runs.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read configuration at {path}: {source}")]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the YAML configuration document.
  #[error("failed to parse configuration at {path}: {source}")]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
  /// A required configuration key is absent or blank.
  #[error("missing configuration: [{0}]")]
  MissingKey(&'static str),
  /// The configured root does not resolve to an existing directory.
  #[error("drupal root not detected at: {root} (resolved to {})", resolved.display())]
  RootNotFound {
    /// Root value as written in the configuration.
    root: String,
    /// Root resolved against the working directory.
    resolved: PathBuf,
  },
  /// A `packages` policy was neither the wildcard nor a list of names.
  #[error("invalid selection policy for package type `{package_type}`: {reason}")]
  InvalidPolicy {
    /// Package type the policy was attached to.
    package_type: String,
    /// Human readable explanation.
    reason: String,
  },
  /// A policy or lookup referenced a package type that is not registered.
  #[error("unknown package type `{0}`")]
  UnknownPackageType(String),
  /// An additional package type tried to replace a built-in one.
  #[error("package type `{0}` is built in and cannot be redefined")]
  DuplicatePackageType(String),
}

/// Errors returned while building an entry set.
#[derive(Debug, Error)]
pub enum BuildError {
  /// Configuration problem surfaced while preparing the build.
  #[error(transparent)]
  Config(#[from] ConfigError),
  /// The selection referenced a package type with no registered plan.
  #[error("unknown package type `{0}`")]
  UnknownPackageType(String),
  /// The selection could not be interpreted.
  #[error("invalid selection: {0}")]
  Selection(#[from] SelectionError),
  /// Failed to list the packages of a type.
  #[error("failed to list packages in {path}: {source}")]
  Io {
    /// Directory that could not be read.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}

/// Result alias used by the build pipeline.
pub type BuildResult<T> = Result<T, BuildError>;
