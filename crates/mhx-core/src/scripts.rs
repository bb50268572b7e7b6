//! Script mining from the primary HTML document.
//!
//! Both passes walk `<script>` elements of the parsed DOM in document order.
//! Inline bodies become resources directly; absolute `http(s)` `src` URLs are
//! fetched one after another and failures are logged and skipped.

use crate::fetch::Fetch;
use crate::naming;
use crate::resource::{Origin, Resource};
use scraper::{Html, Selector};
use thiserror::Error;

/// Kind assigned to every mined script.
pub const SCRIPT_KIND: &str = "text/javascript";

#[derive(Debug, Error)]
pub enum MineError {
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// One `<script>` element as seen in the DOM.
struct ScriptTag {
    src: Option<String>,
    text: String,
}

fn script_tags(html: &str) -> Result<Vec<ScriptTag>, MineError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").map_err(|e| MineError::Selector(e.to_string()))?;
    Ok(document
        .select(&selector)
        .map(|el| ScriptTag {
            src: el.value().attr("src").map(str::to_string),
            text: el.text().collect(),
        })
        .collect())
}

/// Inline `<script>` bodies (elements without `src`), trimmed, as resources.
/// Empty and whitespace-only bodies are skipped.
pub fn extract_inline_scripts(html: &str) -> Result<Vec<Resource>, MineError> {
    let scripts = script_tags(html)?
        .into_iter()
        .filter(|tag| tag.src.is_none())
        .filter_map(|tag| {
            let code = tag.text.trim();
            if code.is_empty() {
                return None;
            }
            Some(Resource::new(
                SCRIPT_KIND,
                naming::inline_script_name(),
                code.as_bytes().to_vec(),
                Origin::Inline,
            ))
        })
        .collect::<Vec<_>>();
    tracing::debug!("found {} inline scripts", scripts.len());
    Ok(scripts)
}

/// Absolute `http://` / `https://` script URLs in document order.
/// Duplicates are kept; relative and other-scheme sources are ignored.
pub fn external_script_urls(html: &str) -> Result<Vec<String>, MineError> {
    Ok(script_tags(html)?
        .into_iter()
        .filter_map(|tag| tag.src)
        .map(|src| src.trim().to_string())
        .filter(|src| is_http_url(src))
        .collect())
}

fn is_http_url(src: &str) -> bool {
    let lower = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch every external script with `fetcher`, sequentially.
///
/// A URL that fails (network error, non-2xx status, body read error) is
/// logged and skipped; the remaining URLs are still fetched.
pub fn fetch_external_scripts<F: Fetch + ?Sized>(
    html: &str,
    fetcher: &F,
) -> Result<Vec<Resource>, MineError> {
    let urls = external_script_urls(html)?;
    let mut scripts = Vec::with_capacity(urls.len());
    for url in urls {
        match fetcher.get(&url) {
            Ok(body) => {
                tracing::debug!(size = body.len(), "fetched {}", url);
                let name = naming::script_name_for_url(&url);
                scripts.push(
                    Resource::new(SCRIPT_KIND, name, body, Origin::External).with_location(url),
                );
            }
            Err(e) => tracing::warn!("failed to download {}: {}", url, e),
        }
    }
    Ok(scripts)
}
