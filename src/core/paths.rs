//! Path normalization utilities
//!
//! Document paths are kept as root-relative strings with '/' as separator, so
//! link resolution is purely lexical and never touches the filesystem.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve a link path against the directory of its source document.
///
/// A leading '/' anchors the path at the root. Returns `None` when `..`
/// climbs above the root.
pub fn resolve_relative(base_dir: &str, target: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();

    let (start, rest) = match target.strip_prefix('/') {
        Some(rest) => ("", rest),
        None => (base_dir, target),
    };

    for segment in start.split('/').chain(rest.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            s => parts.push(s),
        }
    }

    Some(parts.join("/"))
}

/// Decode `%XX` escapes; malformed escapes are kept verbatim
pub fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
