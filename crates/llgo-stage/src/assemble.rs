//! Synthesizing a package from files named on the command line.
//!
//! `llgo build foo.go bar.go` has no package directory to import, so one
//! is faked: the named files are stat'ed, required to share a directory,
//! and served to the resolver through a [`SyntheticListing`] that shows
//! only those files. Resolution then proceeds exactly as it would for a
//! real directory, with filtering disabled so every named file is kept.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::StageError;
use crate::package::{
    FileMeta, FsLister, GO_FILE_SUFFIX, Package, PackageResolver, SyntheticListing,
};

/// Build a [`Package`] from individually named Go source files.
///
/// All files must carry the `.go` suffix, exist, not be directories, and
/// live in a single directory. A mismatched directory is reported as soon
/// as it is seen. The shared directory is made absolute against the
/// current working directory before resolution, so the resulting package
/// is usable after later `chdir` calls.
///
/// # Errors
///
/// Returns [`StageError::InvalidInput`] for an empty file list, a
/// non-`.go` name, a directory argument, or files spread across multiple
/// directories; [`StageError::Io`] if a file cannot be stat'ed or the
/// working directory cannot be determined.
pub fn package_from_files(
    gofiles: &[PathBuf],
    config: &BuildConfig,
    resolver: &dyn PackageResolver,
) -> Result<Package, StageError> {
    if gofiles.is_empty() {
        return Err(StageError::invalid_input("no Go files listed"));
    }
    for file in gofiles {
        if !file.to_string_lossy().ends_with(GO_FILE_SUFFIX) {
            return Err(StageError::invalid_input(format!(
                "named files must be .go files: {}",
                file.display()
            )));
        }
    }

    let mut dir: Option<PathBuf> = None;
    let mut entries = Vec::with_capacity(gofiles.len());
    for file in gofiles {
        let meta = fs::metadata(file).map_err(|err| StageError::io("stat", file, err))?;
        if meta.is_dir() {
            return Err(StageError::invalid_input(format!(
                "{} is a directory, should be a Go file",
                file.display()
            )));
        }

        let parent = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        match &dir {
            None => dir = Some(parent),
            Some(seen) if *seen != parent => {
                return Err(StageError::invalid_input(format!(
                    "named files must all be in one directory; have {} and {}",
                    seen.display(),
                    parent.display()
                )));
            }
            Some(_) => {}
        }

        let name = file
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        entries.push(FileMeta::from_metadata(name, &meta));
    }

    // Non-empty input guarantees the directory was set above.
    let dir = dir.unwrap_or_default();
    let cwd = env::current_dir()
        .map_err(|err| StageError::io("determine current directory", ".", err))?;
    let dir = absolutize(&dir, &cwd);

    tracing::debug!(
        "synthesizing package for {} files in {}",
        gofiles.len(),
        dir.display()
    );

    let listing = SyntheticListing::new(dir.clone(), entries, FsLister);
    let config = config.clone().with_use_all_files(true);
    resolver.resolve(&dir, &listing, &config)
}

/// Anchor a relative directory at `cwd`, dropping `.` components.
fn absolutize(dir: &Path, cwd: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    cwd.join(dir)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
