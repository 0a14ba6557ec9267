//! Match the files of one asset category and key them by output chunk.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::entry_paths::{is_hidden, join_path, should_skip_file};
use crate::models::{AssetCategory, EntryMap};

/// Collect the entries of one asset category inside a package.
///
/// Files under `<package_dir>/<source>` ending with the category extension are keyed by their
/// path relative to the source directory, with the extension stripped and the destination
/// directory prefixed. Paths are interpreted relative to `working_dir`, which is also what
/// the returned keys and sources are relative to. A missing source directory yields an
/// empty map.
pub fn match_category(
    working_dir: &Path,
    package_dir: &str,
    category: &AssetCategory,
    skip_underscore_files: bool,
) -> EntryMap {
    let source_dir = join_path(&[package_dir, category.source.as_str()]);
    let destination_dir = join_path(&[package_dir, category.destination.as_str()]);
    let source_on_disk = working_dir.join(&source_dir);

    let mut entries = EntryMap::new();
    if !source_on_disk.is_dir() {
        return entries;
    }

    let walker = WalkDir::new(&source_on_disk)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {}", source_on_disk.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            debug!("ignoring non UTF-8 file name {}", entry.path().display());
            continue;
        };
        if !file_name.ends_with(category.extension.as_str()) {
            continue;
        }
        if should_skip_file(file_name, skip_underscore_files) {
            debug!("ignoring {}", entry.path().display());
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&source_on_disk) else {
            continue;
        };
        let Some(relative) = relative.to_str() else {
            debug!("ignoring non UTF-8 path {}", entry.path().display());
            continue;
        };
        let relative = relative.replace('\\', "/");
        let Some(stem) = relative.strip_suffix(category.extension.as_str()) else {
            continue;
        };

        let chunk = join_path(&[destination_dir.as_str(), stem]);
        let source = addressable(&join_path(&[source_dir.as_str(), relative.as_str()]));
        entries.push(chunk, source);
    }

    entries
}

fn addressable(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "/* asset */").unwrap();
    }

    fn sources(entries: &EntryMap, chunk: &str) -> Vec<String> {
        entries.get(chunk).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn keys_files_by_destination_and_stripped_extension() {
        let dir = tempdir().unwrap();
        write(dir.path(), "modules/custom/foo/scss/base/layout.scss");

        let entries = match_category(
            dir.path(),
            "modules/custom/foo",
            &AssetCategory::new("scss", "css", ".scss"),
            true,
        );

        assert_eq!(
            sources(&entries, "modules/custom/foo/css/base/layout"),
            vec!["./modules/custom/foo/scss/base/layout.scss"]
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn ignores_minified_and_private_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/js/a.js");
        write(dir.path(), "pkg/js/_b.js");
        write(dir.path(), "pkg/js/c.min.js");
        write(dir.path(), "pkg/js/notes.txt");

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("js", "js", ".js"), true);

        assert_eq!(entries.chunks().collect::<Vec<_>>(), vec!["pkg/js/a"]);
    }

    #[test]
    fn keeps_private_files_when_flag_disabled() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/js/_b.js");
        write(dir.path(), "pkg/js/c.min.js");

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("js", "js", ".js"), false);

        assert_eq!(entries.chunks().collect::<Vec<_>>(), vec!["pkg/js/_b"]);
    }

    #[test]
    fn minified_scripts_skipped_for_any_extension() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/src/vendor.min.js");
        write(dir.path(), "pkg/src/app.js");

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("src", "dist", "js"), true);

        assert_eq!(sources(&entries, "pkg/dist/app."), vec!["./pkg/src/app.js"]);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn same_source_and_destination_compiles_in_place() {
        let dir = tempdir().unwrap();
        write(dir.path(), "theme/components/card/card.js");

        let entries = match_category(
            dir.path(),
            "theme",
            &AssetCategory::new("components", "components", ".js"),
            true,
        );

        assert_eq!(
            sources(&entries, "theme/components/card/card"),
            vec!["./theme/components/card/card.js"]
        );
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/js/.cache/stale.js");
        write(dir.path(), "pkg/js/live.js");

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("js", "js", ".js"), true);

        assert_eq!(entries.chunks().collect::<Vec<_>>(), vec!["pkg/js/live"]);
    }

    #[test]
    fn parent_relative_sources_keep_dot_prefix() {
        let dir = tempdir().unwrap();
        write(dir.path(), "web/pkg/js/app.js");
        let working_dir = dir.path().join("tools");
        fs::create_dir_all(&working_dir).unwrap();

        let entries = match_category(
            &working_dir,
            "../web/pkg",
            &AssetCategory::new("js", "js", ".js"),
            true,
        );

        assert_eq!(sources(&entries, "../web/pkg/js/app"), vec!["./../web/pkg/js/app.js"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn skips_non_utf8_file_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/js/ok.js");
        let js_dir = dir.path().join("pkg/js");
        fs::write(js_dir.join(OsStr::from_bytes(b"bad\xff.js")), "").unwrap();

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("js", "js", ".js"), true);

        assert_eq!(entries.chunks().collect::<Vec<_>>(), vec!["pkg/js/ok"]);
    }

    #[test]
    fn missing_source_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let entries = match_category(dir.path(), "absent", &AssetCategory::new("js", "js", ".js"), true);
        assert!(entries.is_empty());
    }

    #[test]
    fn every_key_maps_to_a_non_empty_list() {
        let dir = tempdir().unwrap();
        for name in ["a", "b/c", "b/d", "_e", "f.min"] {
            write(dir.path(), &format!("pkg/js/{name}.js"));
        }

        let entries = match_category(dir.path(), "pkg", &AssetCategory::new("js", "out", ".js"), true);

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|(_, sources)| sources.len() == 1));
    }
}
