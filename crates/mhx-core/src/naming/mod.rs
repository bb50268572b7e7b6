//! Resource filename derivation.
//!
//! Declared names from MIME parts and URL paths are sanitized to
//! `[A-Za-z0-9._-]`; anything unusable falls back to a synthesized name with a
//! short random identifier.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use uuid::Uuid;

/// Length of the random identifier embedded in synthesized names.
pub const ID_LEN: usize = 8;

/// Returns a fresh 8-character lowercase hex identifier (prefix of a v4 UUID).
///
/// Uniqueness is probabilistic only; nothing checks for repeats.
pub fn random_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

/// `resource_<id><ext>` for parts without a declared filename.
pub fn resource_name(extension: &str) -> String {
    format!("resource_{}{}", random_id(), extension)
}

/// `page_<id>.html` for HTML document parts.
pub fn page_name() -> String {
    format!("page_{}.html", random_id())
}

/// `inline_script_<id>.js` for `<script>` bodies found in the HTML.
pub fn inline_script_name() -> String {
    format!("inline_script_{}.js", random_id())
}

/// Filename for a script fetched from `url`.
///
/// Uses the last path segment (query and fragment ignored) when it sanitizes
/// to something ending in `.js`, otherwise `script_<id>.js`.
///
/// - `script_name_for_url("https://cdn.example.com/lib/app.js?v=3")` → `"app.js"`
/// - `script_name_for_url("https://example.com/loader?id=1")` → `"script_1a2b3c4d.js"`
pub fn script_name_for_url(url: &str) -> String {
    filename_from_url_path(url)
        .map(|segment| sanitize_filename(&segment))
        .filter(|name| name.ends_with(".js"))
        .unwrap_or_else(|| format!("script_{}.js", random_id()))
}
