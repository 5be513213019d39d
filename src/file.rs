// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::config::consts::DATETIME_FORMAT;
use crate::config::options::Mode;
use crate::csv::write_row;
use crate::data::DataSet;
use crate::error::ScrapeError;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ScrapeError + '_ {
    move |source| ScrapeError::Io { path: path.to_path_buf(), source }
}

/// Create `dir` (and parents) if missing. Idempotent.
pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::other("path exists but is not a directory"),
        });
    }
    fs::create_dir_all(dir).map_err(io_err(dir))
}

/// Write `bytes` to `path`, truncating any existing file. Not atomic: an
/// interrupted write leaves a truncated file behind.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, bytes).map_err(io_err(path))
}

/// `<dir>/<mode>_<timestamp>.csv`
pub fn results_file_path(dir: &Path, mode: Mode, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}_{}.csv", mode.name(), now.format(DATETIME_FORMAT)))
}

/// Write the whole table (header row first) as CSV.
pub fn write_csv(path: &Path, data: &DataSet) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(io_err(path))?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    for row in data.table() {
        write_row(&mut out, row, ',').map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VersionEntry;
    use chrono::TimeZone;

    #[test]
    fn ensure_directory_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("downloads");
        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let f = tmp.path().join("downloads");
        fs::write(&f, "x").unwrap();
        assert!(matches!(ensure_directory(&f), Err(ScrapeError::Io { .. })));
    }

    #[test]
    fn write_bytes_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("a").join("b.zip");
        write_bytes(&p, b"first, longer").unwrap();
        write_bytes(&p, b"second").unwrap();
        assert_eq!(fs::read(&p).unwrap(), b"second");
    }

    #[test]
    fn results_name_has_mode_and_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let p = results_file_path(Path::new("results"), Mode::LatestVersions, now);
        assert_eq!(p, Path::new("results").join("latest-versions_2024-03-09_07-05-01.csv"));
    }

    #[test]
    fn csv_has_header_first() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("out.csv");
        let ds = DataSet::from_entries(
            &[VersionEntry { doc_url: s!("u"), version: s!("3.12"), status: s!("stable, final") }],
            Vec::new(),
        );
        write_csv(&p, &ds).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "Link,Version,Status\nu,3.12,\"stable, final\"\n");
    }
}
