//! Atomic output writes.

use lexprep_core::{Error, OutputPair, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Write the raw and cleaned text of one document.
///
/// Both files are staged as temporary files next to their targets before
/// either target is touched. If the cleaned file cannot be put in place, the
/// raw target is restored to what it held before the call.
pub async fn write_pair_atomic(pair: &OutputPair, raw: String, cleaned: String) -> Result<()> {
    let pair = pair.clone();
    tokio::task::spawn_blocking(move || {
        write_pair_blocking(&pair, raw.as_bytes(), cleaned.as_bytes())
    })
    .await
    .map_err(|e| Error::Other(format!("write task failed: {e}")))?
}

fn write_pair_blocking(pair: &OutputPair, raw: &[u8], cleaned: &[u8]) -> Result<()> {
    let raw_tmp = stage(&pair.raw, raw)?;
    let cleaned_tmp = stage(&pair.cleaned, cleaned)?;
    let backup = back_up(&pair.raw)?;

    raw_tmp
        .persist(&pair.raw)
        .map_err(|e| write_error(&pair.raw, e.error))?;

    if let Err(e) = cleaned_tmp.persist(&pair.cleaned) {
        restore(&pair.raw, backup);
        return Err(write_error(&pair.cleaned, e.error));
    }
    Ok(())
}

/// Write `contents` to a synced temporary file in the directory of `path`.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(|e| write_error(path, e))?;
    file.write_all(contents).map_err(|e| write_error(path, e))?;
    file.as_file().sync_all().map_err(|e| write_error(path, e))?;
    Ok(file)
}

/// Stage a copy of the current contents of `path`, if it exists.
fn back_up(path: &Path) -> Result<Option<NamedTempFile>> {
    match fs::read(path) {
        Ok(previous) => stage(path, &previous).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(write_error(path, e)),
    }
}

/// Put `path` back the way [`back_up`] found it.
fn restore(path: &Path, backup: Option<NamedTempFile>) {
    let result = match backup {
        Some(file) => file.persist(path).map(|_| ()).map_err(|e| e.error),
        None => fs::remove_file(path),
    };
    if let Err(e) = result {
        warn!("Failed to roll back {:?}: {}", path, e);
    }
}

fn write_error(path: &Path, source: io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
