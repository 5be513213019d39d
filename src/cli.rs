// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::consts::DOC_ROOT_URL;
use crate::config::options::{AppOptions, CacheOptions, Mode, OutputMode, Strictness};
use crate::output;
use crate::progress::Progress;
use crate::runner::{self, RunOutcome};

/// Scrape the Python documentation site: release notes, versions, PDF archive.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pydocs_scrape", version, about)]
pub struct Args {
    /// What to scrape
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// How to present rows (default: plain lines on stdout)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Directory holding .store/, downloads/ and results/
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Documentation root all other pages are resolved against
    #[arg(long, default_value = DOC_ROOT_URL)]
    pub doc_root: String,

    /// Skip release pages that fail instead of aborting the run
    #[arg(long)]
    pub lenient: bool,

    /// Expire cached responses older than this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,
}

impl Args {
    pub fn into_options(self) -> AppOptions {
        AppOptions {
            mode: self.mode,
            doc_root: self.doc_root,
            base_dir: self.base_dir,
            clear_cache: self.clear_cache,
            output: self.output,
            strictness: if self.lenient { Strictness::Lenient } else { Strictness::Strict },
            cache: CacheOptions { expire_after: self.cache_ttl.map(Duration::from_secs) },
        }
    }
}

/// Terminal progress bar for the per-item fetch loops.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl Progress for BarProgress {
    fn begin(&mut self, total: usize) {
        let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        self.bar = Some(ProgressBar::new(total as u64).with_style(style));
    }
    fn log(&mut self, msg: &str) {
        match &self.bar {
            Some(bar) => bar.println(msg),
            None => eprintln!("{msg}"),
        }
    }
    fn item_done(&mut self, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(s!(label));
            bar.inc(1);
        }
    }
    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> color_eyre::Result<()> {
    let opts = args.into_options();
    crate::log::init(&opts.base_dir)?;
    logf!("Scraper started: {:?}", opts);

    let fetcher = runner::prepare_fetcher(&opts)?;
    let mut bar = BarProgress::default();
    let outcome = runner::run(&opts, &fetcher, Some(&mut bar))?;

    match outcome {
        RunOutcome::Rows(ds) => {
            if let Some(path) = output::control_output(&ds, &opts)? {
                println!("Results saved to {}", path.display());
            }
            for s in ds.skipped() {
                eprintln!("Skipped {}: {}", s.url, s.reason);
            }
        }
        RunOutcome::Saved { path, .. } => println!("Archive saved to {}", path.display()),
    }

    logf!("Scraper finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes_and_flags() {
        let args = Args::try_parse_from(["pydocs_scrape", "latest-versions", "-c", "--output", "pretty"]).unwrap();
        assert_eq!(args.mode, Mode::LatestVersions);
        assert!(args.clear_cache);
        assert_eq!(args.output, Some(OutputMode::Pretty));

        let opts = args.into_options();
        assert_eq!(opts.doc_root, DOC_ROOT_URL);
        assert_eq!(opts.strictness, Strictness::Strict);
        assert_eq!(opts.cache.expire_after, None);
    }

    #[test]
    fn lenient_and_ttl() {
        let args = Args::try_parse_from(["pydocs_scrape", "whats-new", "--lenient", "--cache-ttl", "90", "-o", "file"]).unwrap();
        let opts = args.into_options();
        assert_eq!(opts.mode, Mode::WhatsNew);
        assert_eq!(opts.strictness, Strictness::Lenient);
        assert_eq!(opts.output, Some(OutputMode::File));
        assert_eq!(opts.cache.expire_after, Some(Duration::from_secs(90)));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["pydocs_scrape", "pep-list"]).is_err());
        assert!(Args::try_parse_from(["pydocs_scrape"]).is_err());
    }
}
