//! Content-type normalization and default file extensions.

/// Kind used when a part declares no content type at all.
pub const DEFAULT_KIND: &str = "application/octet-stream";

/// Normalizes a raw `Content-Type` value: parameters after the first `;` are
/// dropped and the rest is lowercased. Empty input maps to [`DEFAULT_KIND`].
///
/// - `normalize("TEXT/CSS; charset=utf-8")` → `"text/css"`
/// - `normalize("")` → `"application/octet-stream"`
pub fn normalize(raw: &str) -> String {
    let essence = raw.split(';').next().unwrap_or("").trim();
    if essence.is_empty() {
        return DEFAULT_KIND.to_string();
    }
    essence.to_ascii_lowercase()
}

/// Default file extension (with leading dot) for a normalized kind.
/// Unknown kinds get `.bin`.
pub fn extension_for(kind: &str) -> &'static str {
    match kind {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        "text/css" => ".css",
        "text/javascript" | "application/javascript" => ".js",
        "application/json" => ".json",
        "font/ttf" => ".ttf",
        "font/otf" => ".otf",
        "font/woff" => ".woff",
        "font/woff2" => ".woff2",
        "text/plain" => ".txt",
        "text/html" => ".html",
        _ => ".bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parameters_and_lowercases() {
        assert_eq!(normalize("TEXT/CSS; charset=utf-8"), "text/css");
        assert_eq!(normalize("image/PNG;name=a.png"), "image/png");
    }

    #[test]
    fn normalized_input_is_unchanged() {
        assert_eq!(normalize("text/css"), "text/css");
        assert_eq!(normalize(&normalize("Text/Html; q=1")), "text/html");
    }

    #[test]
    fn empty_defaults_to_octet_stream() {
        assert_eq!(normalize(""), DEFAULT_KIND);
        assert_eq!(normalize("  "), DEFAULT_KIND);
        assert_eq!(normalize("; charset=utf-8"), DEFAULT_KIND);
    }

    #[test]
    fn known_extensions() {
        assert_eq!(extension_for("image/jpeg"), ".jpg");
        assert_eq!(extension_for("text/javascript"), ".js");
        assert_eq!(extension_for("application/javascript"), ".js");
        assert_eq!(extension_for("font/woff2"), ".woff2");
        assert_eq!(extension_for("text/html"), ".html");
    }

    #[test]
    fn unknown_kind_is_bin() {
        assert_eq!(extension_for("application/x-shockwave-flash"), ".bin");
        assert_eq!(extension_for(DEFAULT_KIND), ".bin");
        assert_eq!(extension_for(""), ".bin");
    }
}
