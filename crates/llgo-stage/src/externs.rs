//! Rewriting gccgo extern annotations into llgo name pragmas.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::{NoExpand, Regex};

use crate::error::StageError;

/// Matches a gccgo extern annotation at the start of a line.
static GCCGO_EXTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^//extern ").expect("extern pattern is valid"));

const LLGO_NAME_PREFIX: &[u8] = b"// #llgo name: ";

/// Rewrite `//extern <symbol>` annotations in `path` to llgo name pragmas.
///
/// Each line beginning with `//extern ` has that marker replaced by
/// `// #llgo name: `; the symbol text after it is carried over verbatim.
/// The file is processed as raw bytes, so non-UTF-8 content elsewhere in
/// the file survives untouched. The rewritten file is left with mode
/// `0644`. Running the translation again is a no-op.
///
/// # Errors
///
/// Returns [`StageError::Io`] if the file cannot be read or written back.
pub fn translate_gccgo_externs(path: &Path) -> Result<(), StageError> {
    let data = fs::read(path).map_err(|err| StageError::io("read", path, err))?;
    let rewritten = GCCGO_EXTERN.replace_all(&data, NoExpand(LLGO_NAME_PREFIX));

    tracing::debug!("rewriting extern annotations in {}", path.display());
    fs::write(path, rewritten.as_ref()).map_err(|err| StageError::io("write", path, err))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .map_err(|err| StageError::io("set permissions on", path, err))
}
