//! Build the entries of a single package, descending into nested packages of the same type.

use same_file::Handle;
use tracing::{debug, warn};

use crate::discovery::list_package_dirs;
use crate::discovery::matching::match_category;
use crate::entry_paths::join_path;
use crate::error::{BuildError, BuildResult};
use crate::logging::WarningSink;
use crate::models::{EntryMap, PackageRef};
use crate::registry::PackageTypeRegistry;
use crate::resolver::PathResolver;

/// Runs every asset category of a package type's plan against one package.
pub struct PackageEntryBuilder<'a> {
  resolver: PathResolver<'a>,
  registry: &'a PackageTypeRegistry,
  skip_underscore_files: bool,
  sink: &'a dyn WarningSink,
}

impl<'a> PackageEntryBuilder<'a> {
  /// Create a builder sharing the resolver, registry and warning sink of a build.
  pub fn new(
    resolver: PathResolver<'a>,
    registry: &'a PackageTypeRegistry,
    skip_underscore_files: bool,
    sink: &'a dyn WarningSink,
  ) -> Self {
    Self {
      resolver,
      registry,
      skip_underscore_files,
      sink,
    }
  }

  /// Collect the entries of a package and of all packages nested inside it.
  ///
  /// A package missing from disk is reported through the warning sink and contributes
  /// nothing; only an unregistered package type or an unreadable nested directory fails.
  pub fn build(&self, package: &PackageRef) -> BuildResult<EntryMap> {
    let mut visited = Vec::new();
    self.build_tracked(package, &mut visited)
  }

  fn build_tracked(&self, package: &PackageRef, visited: &mut Vec<Handle>) -> BuildResult<EntryMap> {
    let plan = self
      .registry
      .plan(&package.package_type)
      .ok_or_else(|| BuildError::UnknownPackageType(package.package_type.clone()))?;

    let package_dir = match &package.path {
      Some(path) => path.clone(),
      None => self.resolver.package_path(&package.package_type, &package.name),
    };
    let on_disk = self.resolver.on_disk(&package_dir);

    if !on_disk.exists() {
      self.sink.warn(&format!(
        "The {name} {kind} does not exist in your codebase. No assets will be compiled for this {kind}.",
        name = package.name,
        kind = package.package_type,
      ));
    } else if let Ok(handle) = Handle::from_path(&on_disk) {
      if visited.contains(&handle) {
        warn!("skipping {} as it was already visited", package_dir);
        return Ok(EntryMap::new());
      }
      visited.push(handle);
    }

    let working_dir = self.resolver.working_dir();
    let mut entries = EntryMap::new();
    for category in &plan.categories {
      entries.absorb(match_category(
        working_dir,
        &package_dir,
        category,
        self.skip_underscore_files,
      ));
    }

    let Some(nested) = &plan.nested else {
      return Ok(entries);
    };

    let nested_dir = join_path(&[package_dir.as_str(), nested.as_str()]);
    let nested_on_disk = self.resolver.on_disk(&nested_dir);
    if !nested_on_disk.is_dir() {
      return Ok(entries);
    }

    let children = list_package_dirs(&nested_on_disk).map_err(|source| BuildError::Io {
      path: nested_on_disk.clone(),
      source,
    })?;
    for child in children {
      debug!("descending into nested {} {}", package.package_type, child);
      let child_dir = join_path(&[nested_dir.as_str(), child.as_str()]);
      let child_ref = PackageRef::at(&package.package_type, child, child_dir);
      entries.absorb(self.build_tracked(&child_ref, visited)?);
    }

    Ok(entries)
  }
}
