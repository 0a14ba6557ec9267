use std::path::{Path, PathBuf};

/// Render a path with forward slashes regardless of the host separator.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Join path fragments lexically, dropping `.` segments and folding `..` where possible.
///
/// The result always uses forward slashes so that entry keys work on every platform. An
/// empty relative result is rendered as `.`.
pub fn join_path<S: AsRef<str>>(parts: &[S]) -> String {
    let mut absolute = false;
    let mut segments: Vec<&str> = Vec::new();

    for (index, part) in parts.iter().enumerate() {
        let part = part.as_ref();
        if index == 0 && (part.starts_with('/') || part.starts_with('\\')) {
            absolute = true;
        }

        for segment in part.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => match segments.last() {
                    Some(last) if *last != ".." => {
                        segments.pop();
                    }
                    _ if absolute => {}
                    _ => segments.push(".."),
                },
                other => segments.push(other),
            }
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Express `target` relative to `base` when it lives underneath it.
///
/// Both paths are made absolute against the current directory first, so a relative `base`
/// such as `.` still matches an absolute `target`. Targets outside of `base` are returned
/// unchanged so they stay addressable.
pub fn relative_to(base: &Path, target: &Path) -> String {
    let base = PathBuf::from(join_path(&[to_slash(&absolute_or_self(base))]));
    let target = PathBuf::from(join_path(&[to_slash(&absolute_or_self(target))]));
    match target.strip_prefix(&base) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => join_path(&[to_slash(relative)]),
        Err(_) => to_slash(&target),
    }
}

fn absolute_or_self(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
