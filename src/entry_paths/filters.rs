use regex::Regex;

fn built_output_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| vec![Regex::new(r"\.min\.js$").expect("invalid minified script regex")])
        .as_slice()
}

/// Determine whether a file name belongs to already-built bundler output.
///
/// Minified scripts are produced next to their sources by the bundler itself, so they are
/// never fed back in as entries, whatever extension is being matched.
pub fn is_built_output(file_name: &str) -> bool {
    built_output_patterns()
        .iter()
        .any(|pattern| pattern.is_match(file_name))
}

/// Underscore-prefixed files are partials meant to be included by other sources.
pub fn is_private_include(file_name: &str) -> bool {
    file_name.starts_with('_')
}

/// Dot-prefixed names are skipped the same way a shell glob skips them.
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}

/// Combine the filename rules applied to every matched file.
pub fn should_skip_file(file_name: &str, skip_underscore_files: bool) -> bool {
    is_hidden(file_name)
        || is_built_output(file_name)
        || (skip_underscore_files && is_private_include(file_name))
}
