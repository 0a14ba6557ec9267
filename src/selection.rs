//! Selection options describing which packages an entry build should cover.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::PackageRef;
use crate::registry::{MODULE, THEME};

/// Options accepted by the entry builder, mirroring the bundler's environment flags.
///
/// Several keys may be set at once; [`Selection::resolve`] decides which one wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selection {
  /// Build a single module.
  pub module: Option<String>,
  /// Build a single theme.
  pub theme: Option<String>,
  /// Build a single package of `package_type`.
  pub package_name: Option<String>,
  /// Build the packages of one type according to its configured policy.
  pub package_type: Option<String>,
  /// Build every custom module on disk.
  pub modules: bool,
  /// Build every custom theme on disk.
  pub themes: bool,
  /// Build every custom package of every registered type on disk.
  pub all: bool,
}

/// The single interpretation of a [`Selection`] applied to a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
  /// One named package.
  Package(PackageRef),
  /// Every selected package of one type.
  PackageType {
    /// Package type tag.
    package_type: String,
    /// Ignore the configured policy and take every package on disk.
    discover_all: bool,
  },
  /// Every selected package of every type.
  AllTypes {
    /// Ignore the configured policies and take every package on disk.
    discover_all: bool,
  },
}

/// Errors that can occur while loading or interpreting a selection.
#[derive(Debug, Error)]
pub enum SelectionError {
  /// Failed to read the selection file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON selection file.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// A package name was given without saying which type it belongs to.
  #[error("package `{0}` was requested without a package type")]
  MissingPackageType(String),
}

impl Selection {
  /// Load a selection from a JSON file such as `{"theme": "olivero"}`.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SelectionError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    serde_json::from_str(&contents).map_err(|source| SelectionError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Select one package of a given type.
  pub fn for_package(package_type: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      package_name: Some(name.into()),
      package_type: Some(package_type.into()),
      ..Self::default()
    }
  }

  /// Select the packages of one type according to the configured policy.
  pub fn for_type(package_type: impl Into<String>) -> Self {
    Self {
      package_type: Some(package_type.into()),
      ..Self::default()
    }
  }

  /// Decide which request this selection stands for.
  ///
  /// Precedence: `module`, `theme`, `package_name` with `package_type`, `modules`, `themes`,
  /// `all`, `package_type` alone, and finally the configured defaults. Blank names count as
  /// absent.
  pub fn resolve(&self) -> Result<SelectionRequest, SelectionError> {
    if let Some(name) = present(&self.module) {
      return Ok(SelectionRequest::Package(PackageRef::new(MODULE, name)));
    }
    if let Some(name) = present(&self.theme) {
      return Ok(SelectionRequest::Package(PackageRef::new(THEME, name)));
    }

    let package_type = present(&self.package_type);
    if let Some(name) = present(&self.package_name) {
      return match package_type {
        Some(package_type) => Ok(SelectionRequest::Package(PackageRef::new(package_type, name))),
        None => Err(SelectionError::MissingPackageType(name)),
      };
    }

    if self.modules {
      return Ok(discover_all(MODULE));
    }
    if self.themes {
      return Ok(discover_all(THEME));
    }
    if self.all {
      return Ok(SelectionRequest::AllTypes { discover_all: true });
    }

    Ok(match package_type {
      Some(package_type) => SelectionRequest::PackageType {
        package_type,
        discover_all: false,
      },
      None => SelectionRequest::AllTypes {
        discover_all: false,
      },
    })
  }
}

fn discover_all(package_type: &str) -> SelectionRequest {
  SelectionRequest::PackageType {
    package_type: package_type.to_string(),
    discover_all: true,
  }
}

fn present(value: &Option<String>) -> Option<String> {
  value
    .as_deref()
    .map(normalise_name)
    .filter(|value| !value.is_empty())
}

fn normalise_name(value: &str) -> String {
  value.trim().trim_matches('/').to_string()
}

/// Normalise a list of package names, keeping the first occurrence of each.
///
/// Values are trimmed and empty entries are discarded to simplify downstream lookups.
pub fn normalise_names(values: impl IntoIterator<Item = String>) -> Vec<String> {
  let mut seen = HashSet::new();
  values
    .into_iter()
    .map(|value| normalise_name(&value))
    .filter(|value| !value.is_empty())
    .filter(|value| seen.insert(value.clone()))
    .collect()
}
