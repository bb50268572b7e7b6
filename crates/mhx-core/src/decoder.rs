//! MHTML decoding: envelope, parts, then script mining.
//!
//! A parse moves through header read, part streaming and script mining.
//! Only the envelope can fail the whole call; a part that cannot be split or
//! decoded is logged and skipped so one corrupt part never costs the rest of
//! the archive.

use crate::classify;
use crate::config::FetchConfig;
use crate::fetch::{CurlFetcher, Fetch};
use crate::multipart::{self, EnvelopeError, MultipartReader};
use crate::naming;
use crate::resource::{Origin, ParseResult, Resource};
use crate::scripts;
use mailparse::MailHeaderMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HTML_KIND: &str = "text/html";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid MHTML header: {0}")]
    Header(#[from] EnvelopeError),
}

/// Parse an MHTML file with the default fetch settings (5 s timeout).
pub fn parse(path: &Path, fetch_external: bool) -> Result<ParseResult, DecodeError> {
    Decoder::new(&FetchConfig::default()).parse(path, fetch_external)
}

/// MHTML decoder. The fetcher is only used when a parse asks for external
/// scripts.
pub struct Decoder<F = CurlFetcher> {
    fetcher: F,
}

impl Decoder<CurlFetcher> {
    pub fn new(cfg: &FetchConfig) -> Self {
        Self {
            fetcher: CurlFetcher::new(cfg),
        }
    }
}

impl<F: Fetch> Decoder<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Read and decode the archive at `path`.
    pub fn parse(&self, path: &Path, fetch_external: bool) -> Result<ParseResult, DecodeError> {
        let data = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let result = self.parse_bytes(&data, fetch_external)?;
        tracing::info!(
            resources = result.len(),
            html_bytes = result.html_content().len(),
            "parsed {}",
            path.display()
        );
        Ok(result)
    }

    /// Decode an archive already in memory.
    pub fn parse_bytes(&self, data: &[u8], fetch_external: bool) -> Result<ParseResult, DecodeError> {
        let envelope = multipart::read_envelope(data)?;
        tracing::debug!(
            content_type = %envelope.content_type,
            boundary = %envelope.boundary,
            "read MIME envelope"
        );

        let mut resources = Vec::new();
        let mut html: Option<String> = None;

        let body = &data[envelope.body_offset..];
        for (n, raw) in MultipartReader::new(body, &envelope.boundary).enumerate() {
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(part = n, "skipping MIME part: {}", e);
                    continue;
                }
            };
            let part = match decode_part(raw) {
                Ok(part) => part,
                Err(e) => {
                    tracing::warn!(part = n, "failed to read MIME part: {}", e);
                    continue;
                }
            };
            tracing::debug!(part = n, kind = %part.kind, size = part.payload.len(), "decoded part");

            let filename = if part.kind == HTML_KIND {
                if html.is_none() {
                    html = Some(String::from_utf8_lossy(&part.payload).into_owned());
                }
                naming::page_name()
            } else {
                match part.declared_name {
                    Some(name) => naming::sanitize_filename(&name),
                    None => naming::resource_name(classify::extension_for(&part.kind)),
                }
            };

            let mut resource = Resource::new(part.kind, filename, part.payload, Origin::Embedded);
            if let Some(location) = part.location {
                resource = resource.with_location(location);
            }
            resources.push(resource);
        }

        let html = html.unwrap_or_default();
        if !html.is_empty() {
            match scripts::extract_inline_scripts(&html) {
                Ok(found) => resources.extend(found),
                Err(e) => tracing::warn!("failed to extract inline scripts: {}", e),
            }
            if fetch_external {
                match scripts::fetch_external_scripts(&html, &self.fetcher) {
                    Ok(found) => resources.extend(found),
                    Err(e) => tracing::warn!("failed to download external scripts: {}", e),
                }
            }
        }

        Ok(ParseResult::new(resources, html))
    }
}

/// One MIME part after header parsing and transfer decoding.
struct DecodedPart {
    kind: String,
    declared_name: Option<String>,
    location: Option<String>,
    payload: Vec<u8>,
}

fn decode_part(raw: &[u8]) -> Result<DecodedPart, mailparse::MailParseError> {
    let mail = mailparse::parse_mail(raw)?;
    let kind = classify::normalize(
        &mail
            .headers
            .get_first_value("Content-Type")
            .unwrap_or_default(),
    );
    let declared_name = mail
        .get_content_disposition()
        .params
        .get("filename")
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let location = mail
        .headers
        .get_first_value("Content-Location")
        .map(|loc| loc.trim().to_string())
        .filter(|loc| !loc.is_empty());
    let payload = mail.get_body_raw()?;

    Ok(DecodedPart {
        kind,
        declared_name,
        location,
        payload,
    })
}
