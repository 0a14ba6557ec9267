//! Resolve package names to directories following Drupal's `<type>s/custom/<name>` layout.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::entry_paths::{join_path, relative_to, to_slash};
use crate::error::ConfigError;

/// Directory nested under each package type holding project-specific packages.
pub const CUSTOM_DIR: &str = "custom";

/// Turns package references into paths relative to the working directory.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
  root: &'a str,
  working_dir: &'a Path,
}

impl<'a> PathResolver<'a> {
  /// Create a resolver for the configured root, anchored at `working_dir`.
  pub fn new(config: &'a Config, working_dir: &'a Path) -> Self {
    Self {
      root: &config.root,
      working_dir,
    }
  }

  /// Directory every relative path produced by the resolver is anchored at.
  pub fn working_dir(&self) -> &Path {
    self.working_dir
  }

  /// Configured root resolved against the working directory.
  ///
  /// Fails when the resolved path is missing or is not a directory.
  pub fn resolve_root(&self) -> Result<PathBuf, ConfigError> {
    let resolved = if Path::new(self.root).is_absolute() {
      PathBuf::from(join_path(&[self.root]))
    } else {
      PathBuf::from(join_path(&[to_slash(self.working_dir).as_str(), self.root]))
    };
    if resolved.is_dir() {
      Ok(resolved)
    } else {
      Err(ConfigError::RootNotFound {
        root: self.root.to_string(),
        resolved,
      })
    }
  }

  /// Directory holding the custom packages of a type, e.g. `web/modules/custom`.
  pub fn custom_packages_dir(&self, package_type: &str) -> String {
    let plural = format!("{package_type}s");
    let joined = join_path(&[self.root, plural.as_str(), CUSTOM_DIR]);
    if Path::new(self.root).is_absolute() {
      relative_to(self.working_dir, Path::new(&joined))
    } else {
      joined
    }
  }

  /// Directory of a named package. Existence is left for the caller to check.
  pub fn package_path(&self, package_type: &str, name: &str) -> String {
    join_path(&[self.custom_packages_dir(package_type), name.to_string()])
  }

  /// Location on disk of a path produced by this resolver.
  pub fn on_disk(&self, relative: &str) -> PathBuf {
    self.working_dir.join(relative)
  }
}
