use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use filetime::FileTime;

/// True if any directory entry (file, directory, even a dangling symlink) sits at `path`.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Return `dest` if free, otherwise the first free `<stem>-N<.ext>` next to it.
///
/// The filesystem is probed fresh on every candidate. Nothing guards against
/// another process claiming the same name between this probe and the copy.
pub fn unique_path(dest: &Path) -> PathBuf {
    if !is_occupied(dest) {
        return dest.to_path_buf();
    }

    let parent = dest.parent().unwrap_or_else(|| Path::new(""));
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let ext = dest.extension().map(|s| s.to_string_lossy().into_owned());

    let mut counter = 1u64;
    loop {
        let new_name = match &ext {
            Some(ext) => format!("{}-{}.{}", stem, counter, ext),
            None => format!("{}-{}", stem, counter),
        };
        let candidate = parent.join(&new_name);
        if !is_occupied(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Copy file contents and permission bits. Timestamps are set separately.
pub fn transfer(source: &Path, dest: &Path) -> io::Result<u64> {
    fs::copy(source, dest)
}

/// Set both access and modification time to `dt` (whole seconds).
pub fn set_fs_times(path: &Path, dt: &DateTime<FixedOffset>) -> io::Result<()> {
    let ft = FileTime::from_unix_time(dt.timestamp(), 0);
    filetime::set_file_times(path, ft, ft)
}
