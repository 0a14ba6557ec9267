//! Project configuration loader describing where packages live and which assets they hold.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::AssetKind;
use crate::registry::{MODULE, THEME};
use crate::selection::normalise_names;

/// Location of the configuration file relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = ".webpack/config.yml";

/// Marker selecting every package of a type found on disk.
pub const WILDCARD: &str = "*";

/// Source and destination sub-paths for one asset category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryPaths {
  /// Sub-path of the package searched for files.
  pub source: String,
  /// Sub-path of the package chunk keys are placed under.
  pub destination: String,
}

impl CategoryPaths {
  fn new(source: &str, destination: &str) -> Self {
    Self {
      source: source.into(),
      destination: destination.into(),
    }
  }
}

/// Asset layout shared by module packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleLayout {
  /// Script sources and output location.
  pub scripts: CategoryPaths,
  /// Stylesheet sources and output location.
  pub styles: CategoryPaths,
}

impl Default for ModuleLayout {
  fn default() -> Self {
    Self {
      scripts: CategoryPaths::new("js", "js"),
      styles: CategoryPaths::new("scss", "css"),
    }
  }
}

/// Asset layout shared by theme packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeLayout {
  /// Script sources and output location.
  pub scripts: CategoryPaths,
  /// Stylesheet sources and output location.
  pub styles: CategoryPaths,
  /// Directory of self-contained components, compiled in place.
  pub components: String,
}

impl Default for ThemeLayout {
  fn default() -> Self {
    Self {
      scripts: CategoryPaths::new("js", "js"),
      styles: CategoryPaths::new("scss", "css"),
      components: "components".into(),
    }
  }
}

/// Asset category declared for an additional package type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtraCategory {
  /// Sub-path of the package searched for files.
  pub source: String,
  /// Sub-path of the package chunk keys are placed under.
  pub destination: String,
  /// Which configured extension the category matches.
  pub kind: AssetKind,
}

/// Package type declared in configuration next to the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtraPackageType {
  /// Subdirectory holding nested packages of the same type.
  pub nested: Option<String>,
  /// Asset categories discovered in every package of the type.
  pub categories: Vec<ExtraCategory>,
}

/// How the packages of one type are chosen when no package is named explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
  /// Every package present in the type's custom directory.
  Wildcard,
  /// Exactly these packages, in this order.
  Named(Vec<String>),
}

/// File extensions recognised for each asset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions {
  /// Script extension including the leading dot.
  pub scripts: String,
  /// Stylesheet extension including the leading dot.
  pub styles: String,
}

impl Extensions {
  /// Extension configured for an asset kind.
  pub fn for_kind(&self, kind: AssetKind) -> &str {
    match kind {
      AssetKind::Scripts => &self.scripts,
      AssetKind::Styles => &self.styles,
    }
  }
}

/// Validated, immutable configuration shared by every component of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Drupal root relative to the working directory.
  pub root: String,
  /// Recognised script and stylesheet extensions.
  pub extensions: Extensions,
  /// Asset layout of module packages.
  pub modules: ModuleLayout,
  /// Asset layout of theme packages.
  pub themes: ThemeLayout,
  /// Skip files whose name starts with `_`.
  pub skip_underscore_files: bool,
  /// Selection policy per package type tag.
  pub packages: BTreeMap<String, SelectionPolicy>,
  /// Additional package types keyed by tag.
  pub extra_types: BTreeMap<String, ExtraPackageType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtensionsSection {
  scripts: Option<String>,
  styles: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PolicyValue {
  Marker(String),
  Names(Vec<String>),
}

/// Raw document layout before validation.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
  root: String,
  extensions: ExtensionsSection,
  modules: ModuleLayout,
  themes: ThemeLayout,
  skip_underscore_files: bool,
  packages: Option<BTreeMap<String, PolicyValue>>,
  default_theme: Option<String>,
  types: BTreeMap<String, ExtraPackageType>,
}

impl Default for ConfigFile {
  fn default() -> Self {
    Self {
      root: ".".into(),
      extensions: ExtensionsSection::default(),
      modules: ModuleLayout::default(),
      themes: ThemeLayout::default(),
      skip_underscore_files: true,
      packages: None,
      default_theme: None,
      types: BTreeMap::new(),
    }
  }
}

impl Config {
  /// Load the configuration stored at [`DEFAULT_CONFIG_FILE`] under `project_dir`.
  pub fn discover(project_dir: &Path) -> Result<Self, ConfigError> {
    Self::load(&project_dir.join(DEFAULT_CONFIG_FILE))
  }

  /// Read and validate configuration from a specific YAML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let file: ConfigFile = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    Self::try_from(file)
  }

  /// Parse and validate configuration from an in-memory YAML document.
  pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
    let file: ConfigFile = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
      path: PathBuf::from("<inline>"),
      source,
    })?;
    Self::try_from(file)
  }

  /// Selection policy configured for a package type, if any.
  pub fn policy(&self, package_type: &str) -> Option<&SelectionPolicy> {
    self.packages.get(package_type)
  }

  /// Returns `true` when the tag is a built-in or configured package type.
  pub fn is_known_type(&self, package_type: &str) -> bool {
    package_type == MODULE || package_type == THEME || self.extra_types.contains_key(package_type)
  }
}

impl TryFrom<ConfigFile> for Config {
  type Error = ConfigError;

  fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
    let extensions = Extensions {
      scripts: required(file.extensions.scripts, "config.extensions.scripts")?,
      styles: required(file.extensions.styles, "config.extensions.styles")?,
    };

    for tag in file.types.keys() {
      if tag == MODULE || tag == THEME {
        return Err(ConfigError::DuplicatePackageType(tag.clone()));
      }
    }

    let raw_packages = match (file.packages, file.default_theme) {
      (Some(packages), _) => packages,
      (None, Some(theme)) => BTreeMap::from([(THEME.to_string(), PolicyValue::Names(vec![theme]))]),
      (None, None) => BTreeMap::new(),
    };

    let mut config = Config {
      root: file.root,
      extensions,
      modules: file.modules,
      themes: file.themes,
      skip_underscore_files: file.skip_underscore_files,
      packages: BTreeMap::new(),
      extra_types: file.types,
    };

    for (package_type, value) in raw_packages {
      if !config.is_known_type(&package_type) {
        return Err(ConfigError::UnknownPackageType(package_type));
      }
      let policy = parse_policy(&package_type, value)?;
      config.packages.insert(package_type, policy);
    }

    Ok(config)
  }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
  match value {
    Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
    _ => Err(ConfigError::MissingKey(key)),
  }
}

fn parse_policy(package_type: &str, value: PolicyValue) -> Result<SelectionPolicy, ConfigError> {
  match value {
    PolicyValue::Marker(marker) if marker.trim() == WILDCARD => Ok(SelectionPolicy::Wildcard),
    PolicyValue::Marker(marker) => Err(ConfigError::InvalidPolicy {
      package_type: package_type.to_string(),
      reason: format!("expected \"{WILDCARD}\" or a list of package names, found \"{marker}\""),
    }),
    PolicyValue::Names(names) => Ok(SelectionPolicy::Named(normalise_names(names))),
  }
}
