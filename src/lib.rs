#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod discovery;
pub mod entry_paths;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod selection;

pub use builder::EntrySetBuilder;
pub use config::Config;
pub use error::{BuildError, BuildResult, ConfigError};
pub use logging::{CollectedWarnings, TracingSink, WarningSink};
pub use models::{AssetCategory, EntryMap, PackageRef};
pub use selection::{Selection, SelectionRequest};
