//! Calendar file output
//!
//! The finished calendar is written next to a temporary file and renamed
//! into place, so an interrupted run never leaves a truncated `.ics`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// File name of the published calendar for a year
///
/// # Examples
/// ```
/// use jieri_core::writer::calendar_file_name;
///
/// assert_eq!(calendar_file_name(2024), "calendar_2024_jr.ics");
/// ```
pub fn calendar_file_name(year: i32) -> String {
    format!("calendar_{}_jr.ics", year)
}

/// Destination for generated calendar documents
pub trait FileWriter: Send + Sync {
    /// Persist `contents` under `name`, returning where it was written
    fn write(&self, name: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes calendars into a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsWriter {
    dir: PathBuf,
}

impl FsWriter {
    /// Create a writer for the given output directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for FsWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileWriter for FsWriter {
    fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(name);
        let partial = self.dir.join(format!(".{}.partial", name));

        fs::write(&partial, contents.as_bytes())?;
        if let Err(e) = fs::rename(&partial, &target) {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }

        info!(path = %target.display(), bytes = contents.len(), "wrote calendar");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_file_name() {
        assert_eq!(calendar_file_name(2024), "calendar_2024_jr.ics");
        assert_eq!(calendar_file_name(1999), "calendar_1999_jr.ics");
    }

    #[test]
    fn test_fs_writer_writes_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(dir.path());

        let path = writer.write("calendar_2024_jr.ics", "SUMMARY:元旦\n").unwrap();

        assert_eq!(path, dir.path().join("calendar_2024_jr.ics"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "SUMMARY:元旦\n");
    }

    #[test]
    fn test_fs_writer_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        FsWriter::new(dir.path()).write("a.ics", "x").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.ics"]);
    }

    #[test]
    fn test_fs_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("ics");

        let path = FsWriter::new(&nested).write("a.ics", "x").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_fs_writer_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(dir.path());
        writer.write("a.ics", "old").unwrap();
        let path = writer.write("a.ics", "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_fs_writer_default_is_current_dir() {
        assert_eq!(FsWriter::default().dir(), Path::new("."));
    }
}
