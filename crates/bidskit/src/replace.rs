//! Whole-file replacement through a sibling temporary file.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{BidsError, Result};

/// Removes the temporary file on drop unless the rename went through.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %err, "could not remove temporary file");
            }
        }
    }
}

/// `dir/.name.tmp` next to `path`. The leading dot keeps it out of scans.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the contents of `path` with whatever `write` produces.
///
/// The new contents go to a temporary file in the same directory, which is
/// synced and then renamed over `path`. If `write` fails, `path` is left as
/// it was.
pub(crate) fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let tmp_path = temp_path(path);
    let file = File::create(&tmp_path).map_err(BidsError::io(&tmp_path))?;
    let mut guard = TempFileGuard::new(tmp_path.clone());

    {
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().map_err(BidsError::io(&tmp_path))?;
        writer.get_ref().sync_all().map_err(BidsError::io(&tmp_path))?;
    }

    fs::rename(&tmp_path, path).map_err(BidsError::io(path))?;
    guard.disarm();
    Ok(())
}
