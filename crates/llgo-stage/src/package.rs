//! Package model and directory listing abstractions.
//!
//! A [`Package`] is the unit the rest of the build driver consumes: a
//! directory plus the Go source file names inside it that should be
//! compiled together. Listings are abstracted behind [`DirLister`] so a
//! package can be resolved from the real filesystem or from a synthetic
//! listing assembled out of command-line arguments.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::StageError;

/// File extension recognized as Go source.
pub const GO_FILE_SUFFIX: &str = ".go";

const TEST_FILE_SUFFIX: &str = "_test.go";

/// Metadata for a single directory entry, as seen by package resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Base name of the entry within its directory.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Unix permission bits.
    pub mode: u32,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileMeta {
    /// Build entry metadata from a name and filesystem metadata.
    pub fn from_metadata(name: impl Into<String>, meta: &fs::Metadata) -> Self {
        Self {
            name: name.into(),
            size: meta.len(),
            mode: meta.permissions().mode(),
            is_dir: meta.is_dir(),
        }
    }
}

/// A resolved package: one directory and the source files chosen from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    dir: PathBuf,
    files: Vec<String>,
    use_all_files: bool,
}

impl Package {
    /// Construct a package from a directory and member file names.
    ///
    /// Member names must be bare file names. A name containing a path
    /// separator or parent component would silently escape `dir` when
    /// joined, so such names are rejected here.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::InvalidInput`] if any member name is empty
    /// or is not a single normal path component.
    pub fn new(
        dir: impl Into<PathBuf>,
        files: Vec<String>,
        use_all_files: bool,
    ) -> Result<Self, StageError> {
        for name in &files {
            if !is_bare_file_name(name) {
                return Err(StageError::invalid_input(format!(
                    "package member {name:?} is not a bare file name"
                )));
            }
        }
        Ok(Self {
            dir: dir.into(),
            files,
            use_all_files,
        })
    }

    /// Directory containing the package sources.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Member file names, in resolution order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Whether file-filtering heuristics were bypassed during resolution.
    pub fn use_all_files(&self) -> bool {
        self.use_all_files
    }

    /// Full paths of the member files, joined onto the package directory.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|name| self.dir.join(name)).collect()
    }
}

fn is_bare_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Source of directory listings for package resolution.
pub trait DirLister {
    /// List the entries of `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FileMeta>>;
}

/// [`DirLister`] backed by the real filesystem.
///
/// Entries are sorted by name so resolution order is stable across
/// platforms and filesystem implementations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirLister for FsLister {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FileMeta>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(FileMeta::from_metadata(name, &meta));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// [`DirLister`] that serves a fixed listing for one directory and
/// delegates everywhere else.
///
/// The synthetic entries are served exactly as given, preserving their
/// order rather than sorting. Directory comparison is by literal path
/// components; callers are expected to query with the same path the
/// listing was built for.
#[derive(Debug)]
pub struct SyntheticListing<L> {
    dir: PathBuf,
    entries: Vec<FileMeta>,
    fallback: L,
}

impl<L: DirLister> SyntheticListing<L> {
    /// Serve `entries` for `dir`, delegating other directories to `fallback`.
    pub fn new(dir: impl Into<PathBuf>, entries: Vec<FileMeta>, fallback: L) -> Self {
        Self {
            dir: dir.into(),
            entries,
            fallback,
        }
    }
}

impl<L: DirLister> DirLister for SyntheticListing<L> {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FileMeta>> {
        if dir == self.dir {
            return Ok(self.entries.clone());
        }
        self.fallback.list_dir(dir)
    }
}

/// Strategy for turning a directory listing into a [`Package`].
pub trait PackageResolver {
    /// Resolve the package rooted at `dir` using `lister` for entries.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Io`] if the directory cannot be listed, or
    /// [`StageError::InvalidInput`] if no buildable source files remain
    /// after filtering.
    fn resolve(
        &self,
        dir: &Path,
        lister: &dyn DirLister,
        config: &BuildConfig,
    ) -> Result<Package, StageError>;
}

/// Default resolver: keeps Go source files, applying the standard
/// name-based exclusions.
///
/// Entries are excluded when they are directories, lack the `.go`
/// suffix, or start with `_` or `.`. Test files (`*_test.go`) are also
/// excluded unless the config sets `use_all_files`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingResolver;

impl ListingResolver {
    fn keeps(name: &str, is_dir: bool, config: &BuildConfig) -> bool {
        if is_dir || !name.ends_with(GO_FILE_SUFFIX) {
            return false;
        }
        if name.starts_with('_') || name.starts_with('.') {
            return false;
        }
        if name.ends_with(TEST_FILE_SUFFIX) && !config.use_all_files {
            return false;
        }
        true
    }
}

impl PackageResolver for ListingResolver {
    fn resolve(
        &self,
        dir: &Path,
        lister: &dyn DirLister,
        config: &BuildConfig,
    ) -> Result<Package, StageError> {
        let entries = lister
            .list_dir(dir)
            .map_err(|err| StageError::io("read directory", dir, err))?;

        let files: Vec<String> = entries
            .into_iter()
            .filter(|entry| Self::keeps(&entry.name, entry.is_dir, config))
            .map(|entry| entry.name)
            .collect();

        if files.is_empty() {
            return Err(StageError::invalid_input(format!(
                "no buildable Go source files in {}",
                dir.display()
            )));
        }

        Package::new(dir, files, config.use_all_files)
    }
}
