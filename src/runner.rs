// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::{AppOptions, Mode},
    core::{cache::ResponseCache, net::Fetcher},
    data::{DataSet, DownloadTarget},
    error::ScrapeError,
    progress::{NullProgress, Progress},
    specs,
};

/// Lifecycle of one run: `Idle → Fetching → Done`, or `→ Failed` on the first
/// error, which ends the run and is returned to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Fetching,
    Done,
    Failed,
}

/// What a mode produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Header + rows for the output sink.
    Rows(DataSet),
    /// Pure side effect: the archive was written to `path`.
    Saved { target: DownloadTarget, path: PathBuf },
}

impl RunOutcome {
    /// Rows to hand to the output sink, if any.
    pub fn rows(&self) -> Option<&DataSet> {
        match self {
            RunOutcome::Rows(ds) => Some(ds),
            RunOutcome::Saved { .. } => None,
        }
    }
}

/// Open the cache under `<base>/.store/http_cache` and wrap it in a Fetcher.
/// Clears the cache first only when `opts.clear_cache` asks for it.
pub fn prepare_fetcher(opts: &AppOptions) -> Result<Fetcher, ScrapeError> {
    let cache = ResponseCache::open(opts.cache_dir())?.with_expiry(opts.cache.expire_after);
    let fetcher = Fetcher::new(cache)?;
    if opts.clear_cache {
        fetcher.clear()?;
    }
    Ok(fetcher)
}

pub struct Runner<'f> {
    fetcher: &'f Fetcher,
    state: RunState,
}

impl<'f> Runner<'f> {
    pub fn new(fetcher: &'f Fetcher) -> Self {
        Self { fetcher, state: RunState::Idle }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Dispatch on `opts.mode` and run it to completion.
    /// `progress` can be None (no UI updates) or Some(&mut impl Progress).
    pub fn run(
        &mut self,
        opts: &AppOptions,
        progress: Option<&mut dyn Progress>,
    ) -> Result<RunOutcome, ScrapeError> {
        let mut null = NullProgress;
        let progress: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        self.state = RunState::Fetching;
        logf!("Run: mode {} against {}", opts.mode, opts.doc_root);

        let result = self.dispatch(opts, progress);
        progress.finish();

        match &result {
            Ok(outcome) => {
                self.state = RunState::Done;
                match outcome {
                    RunOutcome::Rows(ds) => logf!(
                        "Run: {} done, {} rows ({} skipped)",
                        opts.mode,
                        ds.rows().len(),
                        ds.skipped().len()
                    ),
                    RunOutcome::Saved { path, .. } => {
                        logf!("Run: {} done, saved {}", opts.mode, path.display())
                    }
                }
            }
            Err(e) => {
                self.state = RunState::Failed;
                loge!("Run: {} failed: {}", opts.mode, e);
            }
        }
        result
    }

    fn dispatch(&self, opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunOutcome, ScrapeError> {
        let root = opts.doc_root_url()?;
        match opts.mode {
            Mode::WhatsNew => {
                specs::whats_new::fetch(self.fetcher, &root, opts.strictness, progress).map(RunOutcome::Rows)
            }
            Mode::LatestVersions => specs::versions::fetch(self.fetcher, &root, progress).map(RunOutcome::Rows),
            Mode::Download => {
                let (target, path) = specs::download::fetch(self.fetcher, &root, &opts.downloads_dir(), progress)?;
                Ok(RunOutcome::Saved { target, path })
            }
        }
    }
}

/// One-shot convenience: fresh Runner, single mode.
pub fn run(
    opts: &AppOptions,
    fetcher: &Fetcher,
    progress: Option<&mut dyn Progress>,
) -> Result<RunOutcome, ScrapeError> {
    Runner::new(fetcher).run(opts, progress)
}
