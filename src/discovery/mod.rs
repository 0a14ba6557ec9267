//! Package discovery broken into focused submodules for easier testing.

mod matching;
mod package;

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::entry_paths::is_hidden;

pub use matching::match_category;
pub use package::PackageEntryBuilder;

/// List the package directories directly inside `dir`, sorted by name.
///
/// Symlinked directories count as packages; hidden entries and plain files are skipped.
pub fn list_package_dirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("ignoring non UTF-8 package directory {}", raw.to_string_lossy());
                continue;
            }
        };
        if is_hidden(&name) {
            continue;
        }
        if fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir()) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
