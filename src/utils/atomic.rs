//! Atomic file operations
//!
//! Every rewrite of the log goes through a sibling temp file:
//!
//! 1. Write all lines to `<log>.tmp` (the full file name plus `.tmp`)
//! 2. `sync_all()` the temp file
//! 3. Rename over the log (atomic on most filesystems)
//!
//! A reader therefore sees either the previous log or the new one, never a
//! half-written file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the temp file used while rewriting `path`.
///
/// The suffix is appended, so `log.csv` uses `log.csv.tmp` and a log named
/// `notes.tmp` never shares its own temp path.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace `path` with the given lines, one per line.
///
/// Each line is written followed by `\n`; an empty iterator truncates the
/// file to zero bytes.
pub fn atomic_write_lines<P, I, S>(path: P, lines: I) -> io::Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

/// Remove a temp file left behind by an interrupted rewrite of `path`.
///
/// Returns `true` when a stale file was found and removed.
pub fn cleanup_stale_temp<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let temp_path = temp_path_for(path.as_ref());
    if !temp_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp_path)?;
    Ok(true)
}
