//! Size-rotated line writer for the trace file.
//!
//! Lines are appended to `mailfeed-otlp.json`. Once the file grows past the
//! size limit it is shifted to `mailfeed-otlp.json.1`, older backups move up one
//! slot (`.1` → `.2` → `.3`) and the oldest falls off the end.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating line writer.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on the first write and dropped on rotation.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// Nothing is opened until the first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer that rotates past `max_bytes` and keeps `max_backups` old files.
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is over the limit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if rotating, opening or writing fails, or if a
    /// previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    /// Path of backup number `index` (1 is the newest).
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_exists(&self.file_path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directories_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotation_shifts_backups_and_drops_the_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "second\n");
        assert!(!writer.backup_path(3).exists());
    }
}
