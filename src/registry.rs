//! Table of package types and the asset categories discovered for each of them.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::models::AssetCategory;

/// Tag of Drupal module packages.
pub const MODULE: &str = "module";
/// Tag of Drupal theme packages.
pub const THEME: &str = "theme";
/// Subdirectory of a module holding its submodules.
pub const NESTED_MODULES_DIR: &str = "modules";

/// Discovery plan for one package type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
  /// Categories matched in order for every package of the type.
  pub categories: Vec<AssetCategory>,
  /// Subdirectory containing nested packages of the same type, if the type nests.
  pub nested: Option<String>,
}

/// Maps a package type tag to its discovery plan.
#[derive(Debug, Clone, Default)]
pub struct PackageTypeRegistry {
  plans: BTreeMap<String, PackagePlan>,
}

impl PackageTypeRegistry {
  /// Build the registry holding the built-in types and any configured extra types.
  pub fn from_config(config: &Config) -> Self {
    let mut registry = Self::default();
    let ext = &config.extensions;

    registry.register(MODULE, PackagePlan {
      categories: vec![
        AssetCategory::new(
          &config.modules.scripts.source,
          &config.modules.scripts.destination,
          &ext.scripts,
        ),
        AssetCategory::new(
          &config.modules.styles.source,
          &config.modules.styles.destination,
          &ext.styles,
        ),
      ],
      nested: Some(NESTED_MODULES_DIR.to_string()),
    });

    // Components compile in place, so source and destination are the same directory.
    let components = &config.themes.components;
    registry.register(THEME, PackagePlan {
      categories: vec![
        AssetCategory::new(
          &config.themes.scripts.source,
          &config.themes.scripts.destination,
          &ext.scripts,
        ),
        AssetCategory::new(
          &config.themes.styles.source,
          &config.themes.styles.destination,
          &ext.styles,
        ),
        AssetCategory::new(components, components, &ext.scripts),
        AssetCategory::new(components, components, &ext.styles),
      ],
      nested: None,
    });

    for (tag, extra) in &config.extra_types {
      let categories = extra
        .categories
        .iter()
        .map(|category| {
          AssetCategory::new(
            &category.source,
            &category.destination,
            ext.for_kind(category.kind),
          )
        })
        .collect();
      registry.register(tag, PackagePlan {
        categories,
        nested: extra.nested.clone(),
      });
    }

    registry
  }

  /// Register or replace the plan for a package type.
  pub fn register(&mut self, package_type: impl Into<String>, plan: PackagePlan) {
    self.plans.insert(package_type.into(), plan);
  }

  /// Plan registered for a package type.
  pub fn plan(&self, package_type: &str) -> Option<&PackagePlan> {
    self.plans.get(package_type)
  }

  /// Registered type tags in sorted order.
  pub fn types(&self) -> impl Iterator<Item = &str> {
    self.plans.keys().map(String::as_str)
  }
}
