//! # Breeze
//!
//! Client-side routing for single-page web applications.
//!
//! Breeze maps browser locations to application content, keeps the History
//! API in sync, and routes in-app link clicks without full page reloads. It
//! compiles natively (for tests and non-browser hosts) and to WebAssembly.
//!
//! ## Feature Flags
//!
//! - `router` (default) - The client-side router ([`router`])
//!
//! ## Example
//!
//! ```rust
//! use breeze::prelude::*;
//! use futures::executor::LocalPool;
//!
//! let table = RouteTable::new()
//!     .with_route(Route::new("/", "home"))
//!     .with_route(Route::new("/posts/:slug", "post"))
//!     .with_route(Route::not_found("not found"));
//!
//! let mut pool = LocalPool::new();
//! let history = MemoryHistory::new("/posts/hello-world");
//! let controller = NavigationController::new(
//!     table,
//!     history,
//!     |_: &&str, _: &RouteParams| anyhow::Ok(()),
//!     pool.spawner(),
//! );
//!
//! pool.run_until(controller.start().unwrap());
//! let current = controller.current().unwrap();
//! assert_eq!(*current.content(), "post");
//! assert_eq!(current.params().get("slug"), Some("hello-world"));
//! ```

#![warn(missing_docs)]

/// Client-side routing
///
/// Re-exports [`breeze_router`]. See its documentation for the route table,
/// navigation controller, link interception, and browser bindings.
#[cfg(feature = "router")]
pub mod router {
	pub use breeze_router::*;
}

/// Commonly used types
#[cfg(feature = "router")]
pub mod prelude {
	pub use breeze_router::prelude::*;
}
