//! MIME multipart envelope and boundary splitting.
//!
//! [`read_envelope`] parses the top-level header block and yields the
//! boundary; [`MultipartReader`] then walks the body line by line and hands
//! out each part's raw bytes (headers and encoded body) in order.

use mailparse::MailHeaderMap;
use thiserror::Error;

/// Failure while reading the top-level MIME header.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("unreadable MIME header: {0}")]
    Unreadable(#[from] mailparse::MailParseError),
    #[error("missing Content-Type header")]
    MissingContentType,
    #[error("expected a multipart content type, found {0}")]
    NotMultipart(String),
    #[error("Content-Type {0} has no boundary parameter")]
    MissingBoundary(String),
}

/// Failure while splitting one part out of the body.
#[derive(Debug, Error)]
pub enum PartError {
    /// Input ended before the part's closing delimiter.
    #[error("part starting at byte {offset} is truncated (no closing boundary)")]
    Truncated { offset: usize },
}

/// Top-level header of a multipart archive.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Normalized multipart type, e.g. `multipart/related`.
    pub content_type: String,
    pub boundary: String,
    /// Offset of the first body byte (just past the blank line).
    pub body_offset: usize,
}

/// Parse the header block at the start of `data`.
pub fn read_envelope(data: &[u8]) -> Result<Envelope, EnvelopeError> {
    let (headers, body_offset) = mailparse::parse_headers(data)?;
    let raw = headers
        .get_first_value("Content-Type")
        .filter(|v| !v.trim().is_empty())
        .ok_or(EnvelopeError::MissingContentType)?;

    let parsed = mailparse::parse_content_type(&raw);
    let content_type = parsed.mimetype.to_ascii_lowercase();
    if !content_type.starts_with("multipart/") {
        return Err(EnvelopeError::NotMultipart(content_type));
    }

    let boundary = parsed
        .params
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("boundary"))
        .map(|(_, v)| v.trim().to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| EnvelopeError::MissingBoundary(content_type.clone()))?;

    Ok(Envelope {
        content_type,
        boundary,
        body_offset,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    /// Skipping text before the first delimiter.
    Preamble,
    /// Between delimiters; the next part starts at `pos`.
    Parts,
    /// Close delimiter seen or input exhausted.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Open,
    Close,
}

/// Iterator over the raw parts of a multipart body.
///
/// Each item is the bytes between two delimiter lines, excluding the line
/// break that precedes the next delimiter. A final part with no closing
/// delimiter is reported as [`PartError::Truncated`]; the epilogue after the
/// close delimiter is ignored.
pub struct MultipartReader<'a> {
    data: &'a [u8],
    pos: usize,
    dash_boundary: Vec<u8>,
    state: ReaderState,
}

impl<'a> MultipartReader<'a> {
    pub fn new(body: &'a [u8], boundary: &str) -> Self {
        let mut dash_boundary = Vec::with_capacity(boundary.len() + 2);
        dash_boundary.extend_from_slice(b"--");
        dash_boundary.extend_from_slice(boundary.as_bytes());
        Self {
            data: body,
            pos: 0,
            dash_boundary,
            state: ReaderState::Preamble,
        }
    }

    /// Returns `(line_start, next_line_start)` of the line at `from`, or
    /// `None` at end of input.
    fn line_at(&self, from: usize) -> Option<(usize, usize)> {
        if from >= self.data.len() {
            return None;
        }
        let next = match self.data[from..].iter().position(|&b| b == b'\n') {
            Some(i) => from + i + 1,
            None => self.data.len(),
        };
        Some((from, next))
    }

    fn classify(&self, start: usize, next: usize) -> Option<Delimiter> {
        let line = &self.data[start..next];
        let rest = line.strip_prefix(self.dash_boundary.as_slice())?;
        let (kind, rest) = match rest.strip_prefix(b"--") {
            Some(after) => (Delimiter::Close, after),
            None => (Delimiter::Open, rest),
        };
        // Transport padding after the boundary is allowed.
        if rest.iter().all(|b| b.is_ascii_whitespace()) {
            Some(kind)
        } else {
            None
        }
    }

    fn skip_preamble(&mut self) {
        let mut cursor = self.pos;
        while let Some((start, next)) = self.line_at(cursor) {
            match self.classify(start, next) {
                Some(Delimiter::Open) => {
                    self.pos = next;
                    self.state = ReaderState::Parts;
                    return;
                }
                Some(Delimiter::Close) => break,
                None => cursor = next,
            }
        }
        self.state = ReaderState::Done;
    }

    fn next_part(&mut self) -> Option<Result<&'a [u8], PartError>> {
        let data = self.data;
        let part_start = self.pos;
        let mut cursor = part_start;
        while let Some((start, next)) = self.line_at(cursor) {
            if let Some(delimiter) = self.classify(start, next) {
                let mut end = start;
                if end > part_start {
                    end -= 1;
                    if end > part_start && data[end - 1] == b'\r' {
                        end -= 1;
                    }
                }
                self.pos = next;
                if delimiter == Delimiter::Close {
                    self.state = ReaderState::Done;
                }
                return Some(Ok(&data[part_start..end]));
            }
            cursor = next;
        }

        self.state = ReaderState::Done;
        let rest = &data[part_start..];
        if rest.iter().all(|b| b.is_ascii_whitespace()) {
            None
        } else {
            Some(Err(PartError::Truncated { offset: part_start }))
        }
    }
}

impl<'a> Iterator for MultipartReader<'a> {
    type Item = Result<&'a [u8], PartError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ReaderState::Preamble {
            self.skip_preamble();
        }
        match self.state {
            ReaderState::Parts => self.next_part(),
            ReaderState::Preamble | ReaderState::Done => None,
        }
    }
}
