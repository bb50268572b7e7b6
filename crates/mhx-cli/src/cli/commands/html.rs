//! `mhx html`: print or save the primary HTML document.

use anyhow::{bail, Context, Result};
use mhx_core::ParseResult;
use std::io::Write;
use std::path::Path;

pub fn run_html(result: &ParseResult, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let html = result.html_content();
    if html.is_empty() {
        bail!("archive has no text/html part");
    }
    match output {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
            writeln!(out, "Wrote {} bytes of HTML to {}", html.len(), path.display())?;
        }
        None => out.write_all(html.as_bytes())?,
    }
    Ok(())
}
