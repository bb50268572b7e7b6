//! Decoded resources and the result of one parse pass.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Where a resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// A MIME part of the archive.
    Embedded,
    /// The body of a `<script>` element in the primary HTML.
    Inline,
    /// Fetched over HTTP from a `<script src=...>` reference.
    External,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Embedded => "embedded",
            Origin::Inline => "inline",
            Origin::External => "external",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded artifact. The payload is owned and never mutated after decoding;
/// `size()` is always the payload length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: String,
    filename: String,
    payload: Vec<u8>,
    origin: Origin,
    location: Option<String>,
}

impl Resource {
    pub fn new(
        kind: impl Into<String>,
        filename: impl Into<String>,
        payload: Vec<u8>,
        origin: Origin,
    ) -> Self {
        Self {
            kind: kind.into(),
            filename: filename.into(),
            payload,
            origin,
            location: None,
        }
    }

    /// Attach a source location (`Content-Location` or fetched URL).
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Normalized MIME type, e.g. `image/png`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Filesystem-safe name used when the resource is extracted.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// SHA-256 of the payload as lowercase hex.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.payload))
    }
}

/// Everything one parse pass produced: resources in discovery order (MIME
/// parts, then inline scripts, then external scripts) and the primary HTML.
///
/// A new parse returns a new value; indices are only meaningful for the
/// result they were taken from.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    resources: Vec<Resource>,
    html: String,
}

impl ParseResult {
    pub(crate) fn new(resources: Vec<Resource>, html: String) -> Self {
        Self { resources, html }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Text of the first `text/html` part, or `""` if the archive had none.
    ///
    /// Decoded as UTF-8 with invalid sequences replaced, so it is lossy for
    /// other charsets; that part's `payload()` keeps the exact bytes.
    pub fn html_content(&self) -> &str {
        &self.html
    }

    /// Indices of resources whose kind starts with `prefix` (e.g. `"image/"`).
    pub fn indices_of_kind(&self, prefix: &str) -> Vec<usize> {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }
}
