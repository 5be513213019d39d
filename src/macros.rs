// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg: String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::log::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::log::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::log::error!($($arg)*)
    };
}
