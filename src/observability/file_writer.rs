//! Rotating file writer with size-based rotation and backup retention.
//!
//! The writer is shared by every log event, so the open file sits behind a
//! mutex. Once the file grows past the size limit it is renamed with a UTC
//! timestamp suffix and a fresh file is started; only the newest backups are
//! kept.

use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    file_path: PathBuf,
    max_size: u64,
    writer: Mutex<Option<fs::File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path`. The file is opened lazily on first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            max_size: MAX_FILE_SIZE_BYTES,
            writer: Mutex::new(None),
        }
    }

    #[cfg(test)]
    const fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Appends `bytes`, rotating first if the file is over the limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutex is poisoned or the file cannot be
    /// opened, rotated, or written.
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        file.write_all(bytes)?;
        file.flush()?;
        drop(writer);

        Ok(())
    }

    fn check_and_rotate(&self, writer: &mut Option<fs::File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_size {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let file_name = self
            .file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;
        let backup_path = self.file_path.with_file_name(format!("{file_name}.{stamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups(file_name)
    }

    fn cleanup_old_backups(&self, file_name: &str) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;

        let prefix = format!("{file_name}.");
        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically; newest first.
        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &std::path::Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("zacman.log."))
            .count()
    }

    #[test]
    fn writes_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zacman.log");
        let writer = FileWriter::new(path.clone());

        writer.write_bytes(b"first\n").unwrap();
        (&writer).write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn oversized_file_is_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zacman.log");
        let writer = FileWriter::new(path.clone()).with_max_size(8);

        writer.write_bytes(b"0123456789\n").unwrap();
        writer.write_bytes(b"next\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        assert_eq!(backups(dir.path()), 1);
    }

    #[test]
    fn old_backups_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zacman.log");
        for stamp in ["20240101T000000.000", "20240102T000000.000", "20240103T000000.000", "20240104T000000.000"] {
            fs::write(dir.path().join(format!("zacman.log.{stamp}")), "old").unwrap();
        }

        let writer = FileWriter::new(path).with_max_size(1);
        writer.write_bytes(b"grow\n").unwrap();
        writer.write_bytes(b"rotate\n").unwrap();

        assert_eq!(backups(dir.path()), MAX_BACKUP_FILES);
        assert!(!dir.path().join("zacman.log.20240101T000000.000").exists());
    }
}
