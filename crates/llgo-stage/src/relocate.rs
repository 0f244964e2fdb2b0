//! Moving built artifacts to their final destination.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::error::StageError;

/// Destination name that streams the artifact to stdout instead of disk.
pub const STDOUT_SENTINEL: &str = "-";

/// Move `src` to `dst`, crossing filesystems when necessary.
///
/// A `dst` of [`STDOUT_SENTINEL`] streams the file to stdout and leaves
/// the source in place, so a driver pipeline can both emit and keep the
/// artifact. Otherwise a plain rename is attempted first; when it fails
/// (typically because `dst` is on another filesystem) the file is copied
/// with its permissions and the source removed afterwards.
///
/// With `echo` set, the planned action is announced first: `cat src`
/// when streaming to stdout, `mv src dst` otherwise.
///
/// # Errors
///
/// Returns [`StageError::Io`] naming the first operation that failed and
/// the path it failed on.
pub fn move_artifact(src: &Path, dst: &Path, echo: bool) -> Result<(), StageError> {
    if echo {
        tracing::info!("{}", planned_action(src, dst));
    }

    if dst == Path::new(STDOUT_SENTINEL) {
        let mut fin = File::open(src).map_err(|err| StageError::io("open", src, err))?;
        let mut stdout = io::stdout().lock();
        io::copy(&mut fin, &mut stdout)
            .and_then(|_| stdout.flush())
            .map_err(|err| StageError::io("stream", src, err))?;
        return Ok(());
    }

    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                "rename {} -> {} failed ({rename_err}), falling back to copy",
                src.display(),
                dst.display()
            );
            copy_then_remove(src, dst)
        }
    }
}

/// Shell-style rendering of what the relocation is about to do.
///
/// Streaming to stdout is a `cat`, not a `mv`: the source survives it.
fn planned_action(src: &Path, dst: &Path) -> String {
    if dst == Path::new(STDOUT_SENTINEL) {
        format!("cat {}", src.display())
    } else {
        format!("mv {} {}", src.display(), dst.display())
    }
}

/// Copy `src` to `dst` preserving permissions, then delete `src`.
///
/// Permissions are applied to the destination before any bytes are
/// written, so a partially copied artifact never sits on disk with wider
/// permissions than the source.
fn copy_then_remove(src: &Path, dst: &Path) -> Result<(), StageError> {
    let mut fin = File::open(src).map_err(|err| StageError::io("open", src, err))?;
    let meta = fin
        .metadata()
        .map_err(|err| StageError::io("stat", src, err))?;
    let mut fout = File::create(dst).map_err(|err| StageError::io("create", dst, err))?;
    fout.set_permissions(meta.permissions())
        .map_err(|err| StageError::io("set permissions on", dst, err))?;

    io::copy(&mut fin, &mut fout).map_err(|err| StageError::io("copy to", dst, err))?;

    fs::remove_file(src).map_err(|err| StageError::io("remove", src, err))
}
