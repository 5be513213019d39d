// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Env, Target};

use crate::config::consts::{LOG_FILE, STORE_DIR};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub fn log_path(base_dir: &Path) -> PathBuf {
    base_dir.join(STORE_DIR).join(LOG_FILE)
}

/// Route the `log` facade into `<base>/.store/debug.log`.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(base_dir: &Path) -> std::io::Result<PathBuf> {
    start();
    let path = log_path(base_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let elapsed = fmt_elapsed(start().elapsed().as_millis());
            writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
        });
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    Ok(path)
}
