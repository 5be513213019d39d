// src/config/consts.rs

// Site
pub const DOC_ROOT_URL: &str = "https://docs.python.org/3/";
pub const WHATS_NEW_PATH: &str = "whatsnew/";
pub const DOWNLOADS_PATH: &str = "download.html";

// Page anchors
pub const WHATS_NEW_SECTION_ID: &str = "what-s-new-in-python";
pub const TOCTREE_WRAPPER_CLASS: &str = "toctree-wrapper";
pub const TOCTREE_L1_CLASS: &str = "toctree-l1";
pub const SIDEBAR_CLASS: &str = "sphinxsidebarwrapper";
pub const ALL_VERSIONS_MARKER: &str = "All versions";

// Patterns
pub const VERSION_STATUS_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";
pub const ARCHIVE_PATTERN: &str = r".+pdf-a4\.zip$";

// Local store
pub const STORE_DIR: &str = ".store";
pub const HTTP_CACHE_SUBDIR: &str = "http_cache";
pub const LOG_FILE: &str = "debug.log";

// Output
pub const DOWNLOADS_SUBDIR: &str = "downloads";
pub const RESULTS_SUBDIR: &str = "results";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

// Net
pub const USER_AGENT: &str = concat!("pydocs_scrape/", env!("CARGO_PKG_VERSION"));
