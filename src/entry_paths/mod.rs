//! Helpers for normalising package paths and filtering discovered files.
//!
//! Path handling is kept purely lexical so chunk keys stay stable regardless of the
//! platform separator or whether the directories exist yet. Filename rules live in their
//! own submodule so they can be tested without touching the filesystem.

mod filters;
mod normalise;

pub use filters::{is_built_output, is_hidden, is_private_include, should_skip_file};
pub use normalise::{join_path, relative_to, to_slash};
