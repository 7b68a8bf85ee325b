//! Writing generated files.
//!
//! Generators render their whole output in memory and hand it here once
//! it is complete, so a failure part way through translation never leaves
//! a truncated file behind.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{KconfError, Result};

/// Join lines with `\n` after each one, then add the closing blank line
/// that downstream build scripts expect.
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let capacity = lines.iter().map(|l| l.as_ref().len() + 1).sum::<usize>() + 1;
    let mut out = String::with_capacity(capacity);
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Create the directories leading up to `dest` if they are missing.
pub fn ensure_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KconfError::io("create directory", parent, e))?;
    }
    Ok(())
}

/// Replace `dest` with `contents` atomically (write `<dest>.tmp`, then rename).
///
/// The parent directory must already exist. Anything previously at `dest`
/// is discarded only once the new content is fully on disk.
pub fn write_atomic(dest: &Path, contents: &str) -> Result<()> {
    write_all_atomic(&[(dest, contents)])
}

/// Replace several files together.
///
/// Every `<dest>.tmp` is written before any destination is touched, so a
/// failed write leaves all previous outputs in place. Temporary files are
/// removed on every error path.
pub fn write_all_atomic(files: &[(&Path, &str)]) -> Result<()> {
    let tmps = files
        .iter()
        .map(|(dest, _)| tmp_path(dest))
        .collect::<Result<Vec<_>>>()?;

    for (idx, (tmp, (_, contents))) in tmps.iter().zip(files).enumerate() {
        if let Err(e) = fs::write(tmp, contents) {
            discard(&tmps[..=idx]);
            return Err(KconfError::io("write", tmp, e));
        }
    }

    for (idx, (tmp, (dest, _))) in tmps.iter().zip(files).enumerate() {
        if let Err(e) = fs::rename(tmp, dest) {
            discard(&tmps[idx..]);
            return Err(KconfError::io("replace", dest, e));
        }
    }
    Ok(())
}

fn discard(tmps: &[PathBuf]) {
    for tmp in tmps {
        let _ = fs::remove_file(tmp);
    }
}

fn tmp_path(dest: &Path) -> Result<PathBuf> {
    let Some(name) = dest.file_name() else {
        return Err(KconfError::io(
            "write",
            dest,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        ));
    };
    let mut tmp_name = OsString::from(name);
    tmp_name.push(".tmp");
    Ok(dest.with_file_name(tmp_name))
}
