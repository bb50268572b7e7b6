//! Synthetic MHTML archives for integration tests.

use std::path::{Path, PathBuf};

pub const BOUNDARY: &str = "----MultipartBoundary--t3stB0undary----";

/// One MIME part: header lines plus the already-encoded body.
pub struct Part {
    headers: Vec<String>,
    body: Vec<u8>,
}

impl Part {
    pub fn new(content_type: &str, body: &[u8]) -> Self {
        Self {
            headers: vec![format!("Content-Type: {}", content_type)],
            body: body.to_vec(),
        }
    }

    /// Part with no headers at all.
    pub fn bare(body: &[u8]) -> Self {
        Self {
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", name, value));
        self
    }

    pub fn filename(self, name: &str) -> Self {
        self.header(
            "Content-Disposition",
            &format!("attachment; filename=\"{}\"", name),
        )
    }

    pub fn base64(self) -> Self {
        self.header("Content-Transfer-Encoding", "base64")
    }
}

/// Blink-style archive: top-level header, parts, closing delimiter.
pub fn build(parts: &[Part]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(
        format!(
            "From: <Saved by Blink>\r\n\
             Snapshot-Content-Location: https://example.com/\r\n\
             Subject: Test page\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/related;\r\n\
             \ttype=\"text/html\";\r\n\
             \tboundary=\"{}\"\r\n\r\n",
            BOUNDARY
        )
        .as_bytes(),
    );
    for part in parts {
        out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        for h in &part.headers {
            out.extend_from_slice(h.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&part.body);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    out
}

/// Write an archive into `dir` and return its path.
pub fn write(dir: &Path, name: &str, parts: &[Part]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build(parts)).unwrap();
    path
}
