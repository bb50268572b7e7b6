//! `mhx extract`: write a selection of resources to a directory.
//!
//! The selection is a set of indices owned by the CLI; the parsed archive is
//! never modified.

use anyhow::{bail, Result};
use mhx_core::{extract_resources, ParseResult};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// What the user asked to extract.
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs {
    pub indices: Vec<usize>,
    pub kinds: Vec<String>,
    pub all: bool,
}

impl SelectionArgs {
    fn is_empty(&self) -> bool {
        !self.all && self.indices.is_empty() && self.kinds.is_empty()
    }
}

/// Resolve the selection against `result`. Explicit indices are passed
/// through unchecked so the extractor can reject out-of-range ones.
pub fn selected_indices(result: &ParseResult, args: &SelectionArgs) -> Vec<usize> {
    if args.all {
        return (0..result.len()).collect();
    }
    let mut set: BTreeSet<usize> = args.indices.iter().copied().collect();
    for kind in &args.kinds {
        set.extend(result.indices_of_kind(kind));
    }
    set.into_iter().collect()
}

pub fn run_extract(
    result: &ParseResult,
    args: &SelectionArgs,
    output_dir: &Path,
    out: &mut impl Write,
) -> Result<()> {
    if args.is_empty() {
        bail!("nothing selected; pass --index, --kind or --all");
    }
    let selected = selected_indices(result, args);
    let written = extract_resources(result, output_dir, &selected)?;
    for path in &written {
        writeln!(out, "{}", path.display())?;
    }
    if written.is_empty() {
        writeln!(out, "No resources selected for extraction")?;
    } else {
        writeln!(
            out,
            "Extracted {} resources to {}",
            written.len(),
            output_dir.display()
        )?;
    }
    Ok(())
}
