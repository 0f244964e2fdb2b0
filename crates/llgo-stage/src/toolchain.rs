//! Locating toolchain support libraries.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::BuildConfig;
use crate::error::StageError;

const PRINT_LIBGCC_ARG: &str = "--print-libgcc-file-name";

/// Ask the configured C compiler where libgcc lives and return that
/// directory, for use as a linker search path.
///
/// The compiler's stderr passes through to the caller's so diagnostics
/// stay visible; only stdout is captured. The printed path is trimmed
/// and reduced to its parent directory. A compiler that prints a bare
/// file name yields `.`.
///
/// # Errors
///
/// Returns [`StageError::Exec`] if the compiler is missing, exits
/// nonzero, or prints nothing.
pub fn find_gcclib(config: &BuildConfig) -> Result<PathBuf, StageError> {
    let stdout = run_captured(&config.cc, PRINT_LIBGCC_ARG)?;
    let text = String::from_utf8_lossy(&stdout);
    if text.trim().is_empty() {
        return Err(StageError::Exec {
            command: format!("{} {PRINT_LIBGCC_ARG}", config.cc),
            reason: "printed no library path".to_string(),
        });
    }

    let dir = libdir_from_output(&text);
    tracing::debug!("{} reports libgcc in {}", config.cc, dir.display());
    Ok(dir)
}

/// Run `program arg`, capturing stdout and passing stderr through.
fn run_captured(program: &str, arg: &str) -> Result<Vec<u8>, StageError> {
    let command = format!("{program} {arg}");
    tracing::debug!("running {command}");
    let output = Command::new(program)
        .arg(arg)
        .stderr(Stdio::inherit())
        .output()
        .map_err(|err| {
            let reason = if err.kind() == std::io::ErrorKind::NotFound {
                format!("{program} not found in PATH")
            } else {
                err.to_string()
            };
            StageError::Exec { command: command.clone(), reason }
        })?;

    if !output.status.success() {
        return Err(StageError::Exec {
            command,
            reason: output.status.to_string(),
        });
    }
    Ok(output.stdout)
}

/// Reduce the compiler's printed library path to its directory.
fn libdir_from_output(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    match Path::new(trimmed).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => PathBuf::from(trimmed),
    }
}
