//! Unified logging macro for the acquisition core.
//!
//! Diagnostics are best-effort text output and not part of the device
//! contract, so the backend is selected entirely at compile time:
//!
//! - `log` feature - routes to the `log` crate (host-side debugging)
//! - `defmt` feature - routes to `defmt` (RTT-style embedded targets)
//! - neither - every call compiles to nothing
//!
//! # Usage
//!
//! ```rust
//! penscope::scope_log!(info, "capture armed, {} words", 1000);
//! penscope::scope_log!(warn, "exchange start failed");
//! ```
//!
//! Format strings stick to plain `{}` placeholders so the same call site is
//! valid for both `core::fmt` and `defmt` backends.

/// Unified logging macro - selects `log::`, `defmt::` or a no-op by feature.
#[macro_export]
#[cfg(feature = "log")]
macro_rules! scope_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(not(feature = "log"), feature = "defmt"))]
macro_rules! scope_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! scope_log {
    ($level:ident, $($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}
