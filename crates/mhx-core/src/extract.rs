//! Writing selected resources to an output directory.

use crate::resource::{ParseResult, Resource};
use crate::storage;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selected index is past the end of the resource list. Nothing was written.
    #[error("invalid selected index {index} (only {len} resources)")]
    InvalidIndex { index: usize, len: usize },
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Extract the selected resources of `result` into `output_dir`.
pub fn extract_resources(
    result: &ParseResult,
    output_dir: &Path,
    selected: &[usize],
) -> Result<Vec<PathBuf>, ExtractError> {
    extract(result.resources(), output_dir, selected)
}

/// Writes `resources[i]` for every selected `i` into `output_dir` and returns
/// the paths written.
///
/// All indices are validated before anything touches the filesystem.
/// Duplicates are ignored and resources are written in ascending index order,
/// whatever order `selected` lists them in. An existing file is never
/// overwritten: the name gets a `_1`, `_2`, … suffix before its extension.
/// The first write failure aborts the call.
pub fn extract(
    resources: &[Resource],
    output_dir: &Path,
    selected: &[usize],
) -> Result<Vec<PathBuf>, ExtractError> {
    if let Some(&index) = selected.iter().find(|&&i| i >= resources.len()) {
        return Err(ExtractError::InvalidIndex {
            index,
            len: resources.len(),
        });
    }
    if selected.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(output_dir).map_err(|source| ExtractError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let order: BTreeSet<usize> = selected.iter().copied().collect();
    let mut written = Vec::with_capacity(order.len());
    for index in order {
        let resource = &resources[index];
        let path = storage::unique_path(output_dir, resource.filename());
        storage::write_atomic(&path, resource.payload()).map_err(|source| {
            ExtractError::Write {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(
            index,
            kind = resource.kind(),
            size = resource.size(),
            "wrote {}",
            path.display()
        );
        written.push(path);
    }

    tracing::info!(
        "extracted {} resources to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Origin;

    fn res(name: &str, body: &[u8]) -> Resource {
        Resource::new("application/octet-stream", name, body.to_vec(), Origin::Embedded)
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let paths = extract(&[res("a.bin", b"a")], &out, &[]).unwrap();
        assert!(paths.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn index_equal_to_len_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let resources = [res("a.bin", b"a"), res("b.bin", b"b")];
        let err = extract(&resources, &out, &[0, 2]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidIndex { index: 2, len: 2 }));
        assert!(!out.exists());
    }

    #[test]
    fn ascending_order_and_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let resources = [res("a.bin", b"a"), res("b.bin", b"b"), res("c.bin", b"c")];
        let paths = extract(&resources, dir.path(), &[2, 0, 2]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.bin"), dir.path().join("c.bin")]
        );
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"c");
    }

    #[test]
    fn colliding_names_get_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let resources = [res("app.js", b"first"), res("app.js", b"second")];
        let paths = extract(&resources, dir.path(), &[0, 1]).unwrap();
        assert_eq!(paths[0], dir.path().join("app.js"));
        assert_eq!(paths[1], dir.path().join("app_1.js"));
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"first");
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"second");
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"old").unwrap();
        let paths = extract(&[res("logo.png", b"new")], dir.path(), &[0]).unwrap();
        assert_eq!(paths, vec![dir.path().join("logo_1.png")]);
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"old");
    }

    #[test]
    fn part_named_resource_survives_later_write() {
        let dir = tempfile::tempdir().unwrap();
        let resources = [res("app.js.part", b"staged"), res("app.js", b"final")];
        let paths = extract(&resources, dir.path(), &[0, 1]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("app.js.part"), dir.path().join("app.js")]
        );
        for path in &paths {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"staged");
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"final");
    }

    #[test]
    fn unrelated_part_file_in_output_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png.part"), b"mine").unwrap();
        let paths = extract(&[res("logo.png", b"new")], dir.path(), &[0]).unwrap();
        assert_eq!(paths, vec![dir.path().join("logo.png")]);
        assert_eq!(std::fs::read(dir.path().join("logo.png.part")).unwrap(), b"mine");
    }

    #[test]
    fn output_dir_that_is_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let err = extract(&[res("a.bin", b"a")], &blocker.join("out"), &[0]).unwrap_err();
        assert!(matches!(err, ExtractError::CreateDir { .. }));
    }
}
