use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{Pattern, glob};

use crate::error::{Error, Result};

/// File name pattern of Action Logger output files
pub const LOG_FILE_PATTERN: &str = "*-logs.txt";

/// Pick the most recently created `*-logs.txt` file in `dir`
///
/// Creation time ties resolve to the lexicographically greatest path, so
/// repeated calls over the same directory pick the same file.
pub fn find_newest_file(dir: &Path) -> Result<PathBuf> {
    let unreadable = |source| Error::LogDirUnreadable {
        dir: dir.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(dir).map_err(unreadable)?;
    if !metadata.is_dir() {
        return Err(unreadable(io::Error::other("not a directory")));
    }

    // The directory itself may contain glob metacharacters
    let pattern = PathBuf::from(Pattern::escape(&dir.to_string_lossy()))
        .join(LOG_FILE_PATTERN)
        .to_string_lossy()
        .into_owned();
    let entries = glob(&pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?;
        let Ok(metadata) = fs::metadata(&path) else {
            tracing::debug!(path = %path.display(), "skipping unreadable log file");
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let created = match metadata.created() {
            Ok(created) => created,
            Err(e) => {
                // Some filesystems don't record birth time
                tracing::debug!(path = %path.display(), error = %e, "no creation time, using mtime");
                metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH)
            }
        };
        candidates.push((created, path));
    }

    let path = newest(candidates).ok_or_else(|| Error::NoLogFilesFound {
        dir: dir.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), "selected newest log file");
    Ok(path)
}

/// Latest creation time wins, then the greatest path
fn newest(candidates: impl IntoIterator<Item = (SystemTime, PathBuf)>) -> Option<PathBuf> {
    candidates.into_iter().max().map(|(_, path)| path)
}
