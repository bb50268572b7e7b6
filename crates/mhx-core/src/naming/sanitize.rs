//! Filesystem-safe filename sanitization.

use super::random_id;

/// Upper bound on sanitized names. Leaves room under NAME_MAX (255) for a
/// collision suffix and the `.part` temp extension.
const MAX_NAME_LEN: usize = 200;

/// Longest extension kept intact when a name has to be shortened.
const MAX_KEPT_EXTENSION: usize = 16;

/// Sanitizes an untrusted filename.
///
/// - Every character outside `[A-Za-z0-9._-]` (path separators, spaces,
///   control and non-ASCII characters) becomes one `_`
/// - `""`, `"."` and `".."` are replaced by `resource_<id>`
/// - Over-long names are shortened, keeping a short extension
///
/// Never fails and never returns an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if out.is_empty() || out == "." || out == ".." {
        return format!("resource_{}", random_id());
    }
    shorten(out)
}

/// Output of the mapping above is ASCII, so byte offsets are char boundaries.
fn shorten(name: String) -> String {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let ext = match name.rfind('.') {
        Some(i) if i > 0 && name.len() - i <= MAX_KEPT_EXTENSION => &name[i..],
        _ => "",
    };
    let stem = &name[..MAX_NAME_LEN - ext.len()];
    format!("{stem}{ext}")
}
