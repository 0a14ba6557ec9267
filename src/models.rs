//! Data structures produced while discovering package entries.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Mapping from an output chunk identifier to the source files compiled into it.
///
/// Every key maps to a non-empty, ordered list. Merging two maps never drops a path; lists
/// that share a key are concatenated with the accumulator's paths first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryMap(BTreeMap<String, Vec<String>>);

impl EntryMap {
  /// Create an empty entry map.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a source path to the list stored under `chunk`, creating the list when needed.
  pub fn push(&mut self, chunk: impl Into<String>, source: impl Into<String>) {
    self.0.entry(chunk.into()).or_default().push(source.into());
  }

  /// Produce a new map holding every entry of `self` followed by every entry of `other`.
  pub fn merge(&self, other: &EntryMap) -> EntryMap {
    let mut merged = self.clone();
    merged.absorb(other.clone());
    merged
  }

  /// In-place form of [`EntryMap::merge`] used while accumulating results.
  pub fn absorb(&mut self, other: EntryMap) {
    for (chunk, sources) in other.0 {
      if sources.is_empty() {
        continue;
      }
      self.0.entry(chunk).or_default().extend(sources);
    }
  }

  /// Source paths registered for a chunk.
  pub fn get(&self, chunk: &str) -> Option<&[String]> {
    self.0.get(chunk).map(Vec::as_slice)
  }

  /// Number of chunks in the map.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` when no chunk was discovered.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterate over chunk identifiers in sorted order.
  pub fn chunks(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// Total number of source paths across all chunks.
  pub fn source_count(&self) -> usize {
    self.0.values().map(Vec::len).sum()
  }

  /// Iterate over `(chunk, sources)` pairs in sorted chunk order.
  pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
    self.0.iter()
  }
}

impl FromIterator<(String, Vec<String>)> for EntryMap {
  fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
    let mut map = EntryMap::new();
    for (chunk, sources) in iter {
      map.absorb(EntryMap(BTreeMap::from([(chunk, sources)])));
    }
    map
  }
}

impl<'a> IntoIterator for &'a EntryMap {
  type Item = (&'a String, &'a Vec<String>);
  type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Identifies one discoverable package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
  /// Package type tag such as `module` or `theme`.
  pub package_type: String,
  /// Machine name of the package.
  pub name: String,
  /// Explicit directory overriding the conventional location.
  pub path: Option<String>,
}

impl PackageRef {
  /// Reference a package living in its type's conventional custom directory.
  pub fn new(package_type: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      package_type: package_type.into(),
      name: name.into(),
      path: None,
    }
  }

  /// Reference a package whose directory is already known.
  pub fn at(package_type: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      package_type: package_type.into(),
      name: name.into(),
      path: Some(path.into()),
    }
  }
}

/// Which configured extension an asset category matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// Matches `extensions.scripts`.
  Scripts,
  /// Matches `extensions.styles`.
  Styles,
}

/// One class of files to discover inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCategory {
  /// Sub-path of the package searched for files.
  pub source: String,
  /// Sub-path of the package the chunk keys are placed under.
  pub destination: String,
  /// File extension including the leading dot.
  pub extension: String,
}

impl AssetCategory {
  /// Build a category from its three parts.
  pub fn new(
    source: impl Into<String>,
    destination: impl Into<String>,
    extension: impl Into<String>,
  ) -> Self {
    Self {
      source: source.into(),
      destination: destination.into(),
      extension: extension.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(pairs: &[(&str, &[&str])]) -> EntryMap {
    pairs
      .iter()
      .map(|(chunk, sources)| {
        (
          chunk.to_string(),
          sources.iter().map(|s| s.to_string()).collect(),
        )
      })
      .collect()
  }

  #[test]
  fn merge_keeps_keys_from_both_sides() {
    let a = map(&[("a", &["./a.js"])]);
    let b = map(&[("b", &["./b.js"])]);

    let merged = a.merge(&b);

    assert_eq!(merged.get("a"), Some(&["./a.js".to_string()][..]));
    assert_eq!(merged.get("b"), Some(&["./b.js".to_string()][..]));
    assert_eq!(merged.len(), 2);
  }

  #[test]
  fn merge_concatenates_in_accumulation_order() {
    let existing = map(&[("theme/js/app", &["./one.js"])]);
    let incoming = map(&[("theme/js/app", &["./two.js", "./three.js"])]);

    let merged = existing.merge(&incoming);

    assert_eq!(merged.get("theme/js/app").unwrap(), &[
      "./one.js".to_string(),
      "./two.js".to_string(),
      "./three.js".to_string()
    ]);
  }

  #[test]
  fn merge_leaves_inputs_untouched() {
    let a = map(&[("x", &["./1"])]);
    let b = map(&[("x", &["./2"])]);

    let _ = a.merge(&b);

    assert_eq!(a, map(&[("x", &["./1"])]));
    assert_eq!(b, map(&[("x", &["./2"])]));
  }

  #[test]
  fn merge_is_associative() {
    let a = map(&[("x", &["./a"]), ("only-a", &["./a1"])]);
    let b = map(&[("x", &["./b"]), ("y", &["./b"])]);
    let c = map(&[("y", &["./c"]), ("x", &["./c"])]);

    assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    assert_eq!(a.merge(&b).merge(&c).get("x").unwrap(), &[
      "./a".to_string(),
      "./b".to_string(),
      "./c".to_string()
    ]);
  }

  #[test]
  fn absorb_matches_merge() {
    let a = map(&[("x", &["./a"])]);
    let b = map(&[("x", &["./b"]), ("z", &["./z"])]);

    let mut accumulated = a.clone();
    accumulated.absorb(b.clone());

    assert_eq!(accumulated, a.merge(&b));
  }

  #[test]
  fn empty_lists_never_create_keys() {
    let built = map(&[("empty", &[])]);
    assert!(built.is_empty());
  }

  #[test]
  fn serialises_as_plain_object() {
    let built = map(&[("a/js/app", &["./a/js/app.js"])]);
    let json = serde_json::to_string(&built).unwrap();
    assert_eq!(json, r#"{"a/js/app":["./a/js/app.js"]}"#);
  }
}
