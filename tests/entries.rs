use std::fs;
use std::path::Path;

use drupal_entries::{CollectedWarnings, Config, EntrySetBuilder, Selection};
use tempfile::tempdir;

fn write(root: &Path, relative: &str) {
  let path = root.join(relative);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, "// source").unwrap();
}

fn config(extra: &str) -> Config {
  Config::from_yaml(&format!(
    "root: .\nskipUnderscoreFiles: true\nextensions:\n  scripts: .js\n  styles: .scss\nmodules:\n  scripts: {{ source: js, destination: dist/js }}\n  styles: {{ source: scss, destination: dist/css }}\n{extra}"
  ))
  .expect("configuration should parse")
}

#[test]
fn module_entries_skip_private_and_minified_files() {
  let dir = tempdir().unwrap();
  write(dir.path(), "modules/custom/foo/js/a.js");
  write(dir.path(), "modules/custom/foo/js/_b.js");
  write(dir.path(), "modules/custom/foo/js/c.min.js");
  write(dir.path(), "modules/custom/foo/scss/a.scss");

  let config = config("");
  let sink = CollectedWarnings::default();
  let builder = EntrySetBuilder::with_sink(&config, dir.path(), &sink).unwrap();

  let entries = builder.build(&Selection::for_package("module", "foo")).unwrap();

  let expected = serde_json::json!({
    "modules/custom/foo/dist/js/a": ["./modules/custom/foo/js/a.js"],
    "modules/custom/foo/dist/css/a": ["./modules/custom/foo/scss/a.scss"],
  });
  assert_eq!(serde_json::to_value(&entries).unwrap(), expected);
  assert!(sink.is_empty());
}

#[test]
fn wildcard_module_type_merges_every_package() {
  let dir = tempdir().unwrap();
  write(dir.path(), "modules/custom/one/js/shared.js");
  write(dir.path(), "modules/custom/one/js/one.js");
  write(dir.path(), "modules/custom/two/js/shared.js");
  write(dir.path(), "modules/custom/two/modules/nested/scss/nested.scss");

  let config = config("packages:\n  module: '*'\n");
  let builder = EntrySetBuilder::new(&config, dir.path()).unwrap();

  let entries = builder.build(&Selection::for_type("module")).unwrap();

  assert_eq!(entries.len(), 4);
  assert_eq!(entries.source_count(), 4);
  assert!(entries.get("modules/custom/two/modules/nested/dist/css/nested").is_some());
}

#[test]
fn missing_package_yields_empty_map_and_one_warning() {
  let dir = tempdir().unwrap();
  let config = config("");
  let sink = CollectedWarnings::default();
  let builder = EntrySetBuilder::with_sink(&config, dir.path(), &sink).unwrap();

  let selection = Selection {
    module: Some("ghost".into()),
    ..Selection::default()
  };
  let entries = builder.build(&selection).unwrap();

  assert!(entries.is_empty());
  assert_eq!(sink.len(), 1);
  assert!(sink.messages()[0].contains("ghost module does not exist"));
}

#[test]
fn theme_components_merge_with_matching_script_keys() {
  let dir = tempdir().unwrap();
  write(dir.path(), "themes/custom/front/components/card.js");
  write(dir.path(), "themes/custom/front/components/card.scss");
  write(dir.path(), "themes/custom/front/src/components/card.js");

  let config = config(
    "themes:\n  scripts: { source: src, destination: . }\n  styles: { source: scss, destination: css }\n  components: components\n",
  );
  let builder = EntrySetBuilder::new(&config, dir.path()).unwrap();

  let entries = builder.build(&Selection::for_package("theme", "front")).unwrap();

  assert_eq!(entries.get("themes/custom/front/components/card").unwrap(), &[
    "./themes/custom/front/src/components/card.js".to_string(),
    "./themes/custom/front/components/card.js".to_string(),
    "./themes/custom/front/components/card.scss".to_string(),
  ]);
}

#[test]
fn extra_package_types_are_discovered_from_configuration() {
  let dir = tempdir().unwrap();
  write(dir.path(), "profiles/custom/standard/js/install.js");
  write(dir.path(), "profiles/custom/standard/profiles/child/js/child.js");

  let config = config(
    "types:\n  profile:\n    nested: profiles\n    categories:\n      - { source: js, destination: build, kind: scripts }\npackages:\n  profile: [standard]\n",
  );
  let builder = EntrySetBuilder::new(&config, dir.path()).unwrap();

  let entries = builder.build(&Selection::default()).unwrap();

  assert_eq!(entries.chunks().collect::<Vec<_>>(), vec![
    "profiles/custom/standard/build/install",
    "profiles/custom/standard/profiles/child/build/child",
  ]);
}
