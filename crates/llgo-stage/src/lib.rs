//! Staging operations used by the llgo build driver between source
//! resolution and linking.
//!
//! The crate covers the pre-link build stages: synthesizing a package
//! from files named on the command line, moving finished artifacts into
//! place, rewriting gccgo extern annotations, and asking the C compiler
//! where its runtime support library lives. Every operation is
//! synchronous and reports failures as [`StageError`].

pub mod assemble;
pub mod config;
pub mod env;
pub mod error;
pub mod externs;
pub mod package;
pub mod relocate;
pub mod toolchain;

pub use assemble::package_from_files;
pub use config::BuildConfig;
pub use env::env_fields;
pub use error::StageError;
pub use externs::translate_gccgo_externs;
pub use package::{
    DirLister, FileMeta, FsLister, ListingResolver, Package, PackageResolver, SyntheticListing,
};
pub use relocate::{STDOUT_SENTINEL, move_artifact};
pub use toolchain::find_gcclib;
