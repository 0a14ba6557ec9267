//! Warning sinks used by the discovery pipeline and the subscriber set up by the binary.

use std::cell::RefCell;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Receives non-fatal, user-facing warnings emitted while building entries.
pub trait WarningSink {
  /// Report a warning. Implementations must not abort the build.
  fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
  fn warn(&self, message: &str) {
    tracing::warn!("{message}");
  }
}

/// Keeps warnings in memory so callers can inspect them after a build.
#[derive(Debug, Default)]
pub struct CollectedWarnings {
  messages: RefCell<Vec<String>>,
}

impl CollectedWarnings {
  /// Snapshot of the warnings received so far.
  pub fn messages(&self) -> Vec<String> {
    self.messages.borrow().clone()
  }

  /// Number of warnings received so far.
  pub fn len(&self) -> usize {
    self.messages.borrow().len()
  }

  /// Returns `true` when nothing was reported.
  pub fn is_empty(&self) -> bool {
    self.messages.borrow().is_empty()
  }
}

impl WarningSink for CollectedWarnings {
  fn warn(&self, message: &str) {
    self.messages.borrow_mut().push(message.to_string());
  }
}

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to `default_level`.
///
/// Stdout is left untouched so the entry map can be piped into other tools.
pub fn init_logging(default_level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let stderr_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false);

  tracing_subscriber::registry()
    .with(filter)
    .with(stderr_layer)
    .init();
}
