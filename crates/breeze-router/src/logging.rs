//! Logging macros for breeze-router
//!
//! The router runs both in the browser and natively (tests, desktop hosts),
//! so log calls go through these macros instead of a single backend.
//!
//! | Macro | WASM | Non-WASM |
//! |-------|------|----------|
//! | `debug_log!` | `console.debug` (debug builds) | `tracing::debug!` |
//! | `info_log!` | `console.info` (debug builds) | `tracing::info!` |
//! | `warn_log!` | `console.warn` (debug builds) | `tracing::warn!` |
//! | `error_log!` | `console.error` | `tracing::error!` |
//!
//! Native events are emitted under the `breeze_router` target, so a host can
//! filter them with `RUST_LOG=breeze_router=debug` or an equivalent directive.
//!
//! ## Example
//!
//! ```ignore
//! use breeze_router::{debug_log, warn_log};
//!
//! debug_log!("transition {} started for {}", generation, path);
//! warn_log!("keeping raw value for parameter `{}`", name);
//! ```

/// Logs a debug message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// No-op debug_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs a debug message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "breeze_router", "{}", format!($($arg)*));
	}};
}

/// Logs an info message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// No-op info_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "breeze_router", "{}", format!($($arg)*));
	}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// No-op warn_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "breeze_router", "{}", format!($($arg)*));
	}};
}

/// Logs an error message.
///
/// Unlike the other macros, this one also logs in release WASM builds.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "breeze_router", "{}", format!($($arg)*));
	}};
}

#[cfg(test)]
mod tests {
	use crate::{debug_log, error_log, info_log, warn_log};
	use rstest::rstest;

	#[rstest]
	fn test_logging_macros_compile() {
		debug_log!("transition {} started", 1);
		info_log!("router started at {}", "/");
		warn_log!("raw value kept: {:?}", "%ff");
		error_log!("render failed: {}", "outlet missing");
	}

	#[rstest]
	fn test_logging_macros_no_args() {
		debug_log!("debug");
		info_log!("info");
		warn_log!("warning");
		error_log!("error");
	}
}
