//! `mhx list`: show every resource of a parsed archive.

use anyhow::Result;
use mhx_core::{Origin, ParseResult};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub json: bool,
    pub digest: bool,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    index: usize,
    origin: Origin,
    kind: &'a str,
    size: usize,
    filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
}

/// Sizes are shown in kilobytes with two decimals.
pub fn format_size(size: usize) -> String {
    format!("{:.2} KB", size as f64 / 1024.0)
}

pub fn run_list(result: &ParseResult, opts: ListOptions, out: &mut impl Write) -> Result<()> {
    let rows: Vec<Row<'_>> = result
        .resources()
        .iter()
        .enumerate()
        .map(|(index, r)| Row {
            index,
            origin: r.origin(),
            kind: r.kind(),
            size: r.size(),
            filename: r.filename(),
            location: r.location(),
            sha256: opts.digest.then(|| r.sha256_hex()),
        })
        .collect();

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "No resources found.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<6} {:<9} {:<26} {:>12} {}",
        "INDEX", "ORIGIN", "KIND", "SIZE", "FILENAME"
    )?;
    for row in &rows {
        write!(
            out,
            "{:<6} {:<9} {:<26} {:>12} {}",
            row.index,
            row.origin.as_str(),
            row.kind,
            format_size(row.size),
            row.filename
        )?;
        if let Some(digest) = &row.sha256 {
            write!(out, "  {}", digest)?;
        }
        writeln!(out)?;
    }
    if result.html_content().is_empty() {
        writeln!(out, "[No HTML content found]")?;
    }
    Ok(())
}
