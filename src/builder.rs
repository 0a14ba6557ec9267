//! Entry set orchestrator turning a selection into the final bundler entry map.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{Config, SelectionPolicy};
use crate::discovery::{PackageEntryBuilder, list_package_dirs};
use crate::error::{BuildError, BuildResult, ConfigError};
use crate::logging::{TracingSink, WarningSink};
use crate::models::{EntryMap, PackageRef};
use crate::registry::PackageTypeRegistry;
use crate::resolver::PathResolver;
use crate::selection::{Selection, SelectionRequest};

/// High-level helper building entry maps for a project.
pub struct EntrySetBuilder<'a> {
  config: &'a Config,
  working_dir: &'a Path,
  registry: PackageTypeRegistry,
  sink: &'a dyn WarningSink,
}

impl<'a> EntrySetBuilder<'a> {
  /// Create a builder reporting missing packages through `tracing`.
  ///
  /// Fails when the configured root is not a directory under `working_dir`.
  pub fn new(config: &'a Config, working_dir: &'a Path) -> Result<Self, ConfigError> {
    Self::with_sink(config, working_dir, &TracingSink)
  }

  /// Create a builder reporting missing packages through a custom sink.
  pub fn with_sink(
    config: &'a Config,
    working_dir: &'a Path,
    sink: &'a dyn WarningSink,
  ) -> Result<Self, ConfigError> {
    let root = PathResolver::new(config, working_dir).resolve_root()?;
    debug!("using drupal root {}", root.display());

    Ok(Self {
      config,
      working_dir,
      registry: PackageTypeRegistry::from_config(config),
      sink,
    })
  }

  /// Build the entry map for a selection.
  pub fn build(&self, selection: &Selection) -> BuildResult<EntryMap> {
    let request = selection.resolve()?;
    let entries = self.build_request(&request)?;
    info!(
      "built {} entries from {} source files",
      entries.len(),
      entries.source_count()
    );
    Ok(entries)
  }

  /// Build the entry map for an already resolved request.
  pub fn build_request(&self, request: &SelectionRequest) -> BuildResult<EntryMap> {
    match request {
      SelectionRequest::Package(package) => self.package_builder().build(package),
      SelectionRequest::PackageType {
        package_type,
        discover_all,
      } => self.build_type(package_type, *discover_all),
      SelectionRequest::AllTypes { discover_all } => {
        let mut entries = EntryMap::new();
        for package_type in self.default_types(*discover_all) {
          entries.absorb(self.build_type(&package_type, *discover_all)?);
        }
        Ok(entries)
      }
    }
  }

  fn default_types(&self, discover_all: bool) -> Vec<String> {
    let types: Vec<String> = if discover_all {
      self.registry.types().map(str::to_string).collect()
    } else {
      self.config.packages.keys().cloned().collect()
    };
    if types.is_empty() {
      warn!("no packages are configured; nothing to build");
    }
    types
  }

  fn build_type(&self, package_type: &str, discover_all: bool) -> BuildResult<EntryMap> {
    if self.registry.plan(package_type).is_none() {
      return Err(BuildError::UnknownPackageType(package_type.to_string()));
    }

    let names = if discover_all {
      self.discover_packages(package_type)?
    } else {
      match self.config.policy(package_type) {
        Some(SelectionPolicy::Wildcard) => self.discover_packages(package_type)?,
        Some(SelectionPolicy::Named(names)) => names.clone(),
        None => {
          warn!("no packages are configured for type `{package_type}`");
          Vec::new()
        }
      }
    };

    let builder = self.package_builder();
    let mut entries = EntryMap::new();
    for name in names {
      entries.absorb(builder.build(&PackageRef::new(package_type, name))?);
    }
    Ok(entries)
  }

  fn discover_packages(&self, package_type: &str) -> BuildResult<Vec<String>> {
    let resolver = PathResolver::new(self.config, self.working_dir);
    let custom_dir = resolver.custom_packages_dir(package_type);
    let on_disk = resolver.on_disk(&custom_dir);

    if !on_disk.is_dir() {
      self.sink.warn(&format!(
        "No custom {package_type}s directory found at {custom_dir}. No assets will be compiled for {package_type}s."
      ));
      return Ok(Vec::new());
    }

    list_package_dirs(&on_disk).map_err(|source| BuildError::Io {
      path: on_disk,
      source,
    })
  }

  fn package_builder(&self) -> PackageEntryBuilder<'_> {
    PackageEntryBuilder::new(
      PathResolver::new(self.config, self.working_dir),
      &self.registry,
      self.config.skip_underscore_files,
      self.sink,
    )
  }
}
