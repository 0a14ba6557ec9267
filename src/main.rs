use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use drupal_entries::config::{Config, DEFAULT_CONFIG_FILE};
use drupal_entries::logging::init_logging;
use drupal_entries::{EntrySetBuilder, Selection};

/// Print the bundler entry map for the custom packages of a Drupal project.
#[derive(Debug, Parser)]
#[command(name = "drupal-entries", version, about)]
struct Cli {
  /// Build a single custom module.
  #[arg(long, value_name = "NAME")]
  module: Option<String>,
  /// Build a single custom theme.
  #[arg(long, value_name = "NAME")]
  theme: Option<String>,
  /// Build a single package of the type given with --type.
  #[arg(long = "package", value_name = "NAME", requires = "package_type")]
  package_name: Option<String>,
  /// Build the packages of a type according to its configured policy.
  #[arg(long = "type", value_name = "TYPE")]
  package_type: Option<String>,
  /// Build every custom module on disk.
  #[arg(long)]
  modules: bool,
  /// Build every custom theme on disk.
  #[arg(long)]
  themes: bool,
  /// Build every custom package of every type on disk.
  #[arg(long)]
  all: bool,
  /// Read the selection from a JSON file instead of the flags above.
  #[arg(
    long,
    value_name = "FILE",
    conflicts_with_all = ["module", "theme", "package_name", "package_type", "modules", "themes", "all"]
  )]
  selection: Option<PathBuf>,
  /// Configuration file; defaults to .webpack/config.yml in the working directory.
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,
  /// Directory package paths are resolved from.
  #[arg(long, value_name = "DIR", default_value = ".")]
  working_dir: PathBuf,
  /// Write the entry map to a file instead of stdout.
  #[arg(long, short, value_name = "FILE")]
  output: Option<PathBuf>,
  /// Emit compact JSON.
  #[arg(long)]
  compact: bool,
}

impl Cli {
  fn selection(&self) -> Result<Selection> {
    if let Some(path) = &self.selection {
      return Selection::load_from_path(path).context("failed to load selection");
    }

    Ok(Selection {
      module: self.module.clone(),
      theme: self.theme.clone(),
      package_name: self.package_name.clone(),
      package_type: self.package_type.clone(),
      modules: self.modules,
      themes: self.themes,
      all: self.all,
    })
  }
}

fn main() -> Result<()> {
  init_logging("warn");
  let cli = Cli::parse();

  let config_path = cli
    .config
    .clone()
    .unwrap_or_else(|| cli.working_dir.join(DEFAULT_CONFIG_FILE));
  let config = Config::load(&config_path)
    .with_context(|| format!("please verify the configuration at {}", config_path.display()))?;

  let builder = EntrySetBuilder::new(&config, &cli.working_dir)?;
  let entries = builder.build(&cli.selection()?)?;

  let json = if cli.compact {
    serde_json::to_string(&entries)?
  } else {
    serde_json::to_string_pretty(&entries)?
  };

  match &cli.output {
    Some(path) => fs::write(path, format!("{json}\n"))
      .with_context(|| format!("failed to write {}", path.display()))?,
    None => println!("{json}"),
  }

  Ok(())
}
