// src/output.rs
//
// Output sink for row results. The runner only promises header-first,
// page-ordered rows; this module decides how they look.
//
// - no --output : one line per row, cells separated by spaces
// - pretty      : bordered, column-aligned table
// - file        : CSV under <base>/results/

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::options::{AppOptions, OutputMode};
use crate::data::DataSet;
use crate::error::ScrapeError;
use crate::file::{results_file_path, write_csv};

/// Render `data` per `opts.output`. Returns the file path when one was written.
pub fn control_output(data: &DataSet, opts: &AppOptions) -> Result<Option<PathBuf>, ScrapeError> {
    match opts.output {
        None => print_stdout(&render_lines(data)).map(|_| None),
        Some(OutputMode::Pretty) => print_stdout(&render_pretty(data)).map(|_| None),
        Some(OutputMode::File) => {
            let path = results_file_path(&opts.results_dir(), opts.mode, Local::now());
            write_csv(&path, data)?;
            logf!("Results saved to {}", path.display());
            Ok(Some(path))
        }
    }
}

fn print_stdout(text: &str) -> Result<(), ScrapeError> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| ScrapeError::Io { path: Path::new("<stdout>").to_path_buf(), source })
}

pub fn render_lines(data: &DataSet) -> String {
    let mut buf = s!();
    for row in data.table() {
        buf.push_str(&row.join(" "));
        buf.push('\n');
    }
    buf
}

pub fn render_pretty(data: &DataSet) -> String {
    let cols = data.headers().len();
    let mut widths = vec![0usize; cols];
    for row in data.table() {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = {
        let mut r = s!("+");
        for w in &widths {
            r.push_str(&"-".repeat(w + 2));
            r.push('+');
        }
        r.push('\n');
        r
    };

    let line = |row: &[String]| {
        let mut l = s!("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = w - cell.chars().count();
            l.push(' ');
            l.push_str(cell);
            l.push_str(&" ".repeat(pad + 1));
            l.push('|');
        }
        l.push('\n');
        l
    };

    let mut buf = rule.clone();
    let mut rows = data.table();
    if let Some(header) = rows.next() {
        buf.push_str(&line(header));
        buf.push_str(&rule);
    }
    for row in rows {
        buf.push_str(&line(row));
    }
    if !data.rows().is_empty() {
        buf.push_str(&rule);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VersionEntry;

    fn sample() -> DataSet {
        DataSet::from_entries(
            &[
                VersionEntry { doc_url: s!("https://docs.python.org/3.13/"), version: s!("3.13"), status: s!("stable") },
                VersionEntry { doc_url: s!("https://docs.python.org/2.7/"), version: s!("Python 2.7"), status: s!() },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn plain_lines_header_first() {
        let text = render_lines(&sample());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Link Version Status");
        assert_eq!(lines[1], "https://docs.python.org/3.13/ 3.13 stable");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn pretty_table_aligns_columns() {
        let text = render_pretty(&sample());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[5]);
        assert!(lines[1].starts_with("| Link "));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn file_mode_writes_csv_into_results() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = AppOptions::new(crate::config::options::Mode::LatestVersions);
        opts.base_dir = tmp.path().to_path_buf();
        opts.output = Some(OutputMode::File);

        let path = control_output(&sample(), &opts).unwrap().unwrap();
        assert!(path.starts_with(tmp.path().join("results")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("latest-versions_") && name.ends_with(".csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Link,Version,Status\n"));
    }
}
