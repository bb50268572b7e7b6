//! File output with atomic finalize.
//!
//! Payloads are staged in a hidden `.<name>.<id>.part` file next to the
//! target, synced, and renamed into place, so a failed write never leaves a
//! partial file under the final name. The staging file is created with
//! `create_new`, so no existing file is ever truncated by it.

use crate::naming;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

const STAGE_ATTEMPTS: usize = 16;

/// Staging path for `final_path`: `dir/.<name>.<id>.part`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    final_path.with_file_name(format!(".{name}.{}{TEMP_SUFFIX}", naming::random_id()))
}

/// Write `data` to `final_path` via a synced temp file and rename.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let (tmp, file) = create_staging(final_path)?;
    let result = write_synced(file, data).and_then(|()| std::fs::rename(&tmp, final_path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Creates a fresh staging file, retrying on the rare id collision.
fn create_staging(final_path: &Path) -> io::Result<(PathBuf, File)> {
    let mut last_err = None;
    for _ in 0..STAGE_ATTEMPTS {
        let tmp = temp_path(final_path);
        match OpenOptions::new().write(true).create_new(true).open(&tmp) {
            Ok(f) => return Ok((tmp, f)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => last_err = Some(e),
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AlreadyExists)))
}

fn write_synced(mut f: File, data: &[u8]) -> io::Result<()> {
    f.write_all(data)?;
    f.sync_all()
}

/// First path in `dir` that does not exist yet: `name`, then `stem_1.ext`,
/// `stem_2.ext`, … The check is not atomic against other writers.
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = split_extension(filename);
    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(format!("{stem}_{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// `"a.tar.gz"` → `("a.tar", ".gz")`; a leading dot is part of the stem.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(i) if i > 0 => filename.split_at(i),
        _ => (filename, ""),
    }
}
