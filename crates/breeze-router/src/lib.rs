//! Breeze Router - client-side routing for single-page applications
//!
//! Maps URL paths to application content, keeps browser history in sync,
//! and intercepts in-app link clicks so navigation never reloads the page.
//!
//! ## Features
//!
//! - **Ordered matching**: literal and `:param` segments, first registered route wins
//! - **Not-found fallback**: a single sentinel route catches every unmatched path
//! - **Last navigation wins**: a transition superseded by a newer one never renders
//! - **Pluggable collaborators**: history, rendering, and task spawning are traits,
//!   so the whole router runs natively in tests and in the browser via `web`
//!
//! ## Architecture
//!
//! - [`router`]: route table, matcher, navigation controller, click interceptor
//! - [`config`]: serde-deserialisable [`RouterConfig`]
//! - [`logging`]: logging macros shared by the native and WASM targets
//! - `web` (wasm32 only): `web-sys` implementations of the router's collaborator traits
//!
//! ## Example
//!
//! ```ignore
//! use breeze_router::prelude::*;
//! use breeze_router::web::{BrowserHistory, BrowserSpawner, attach_click_listener, page_interceptor};
//!
//! let table = RouteTable::new()
//!     .with_route(Route::new("/", Page::Home))
//!     .with_route(Route::new("/users/:id", Page::User).with_handler(load_user))
//!     .with_route(Route::not_found(Page::NotFound));
//!
//! let controller = NavigationController::new(table, BrowserHistory::new()?, render_page, BrowserSpawner);
//! controller.spawn(controller.start()?);
//!
//! let interceptor = page_interceptor(controller.clone())?;
//! let _clicks = attach_click_listener(&document_body, interceptor)?;
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod router;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::RouterConfig;
pub use router::{
	ClickInterceptor, HistoryAdapter, HistoryMode, MatchedRoute, MemoryHistory,
	NavigationController, ParamError, Renderer, Route, RouteParams, RouteTable, RouterError,
	Subscription, TransitionOutcome,
};

/// Commonly used types for building a router.
pub mod prelude {
	pub use crate::config::RouterConfig;
	pub use crate::router::{
		ClickInterceptor, ClickOutcome, HistoryAdapter, HistoryMode, MatchedRoute, MemoryHistory,
		NavigationController, NavigationPhase, ParamError, Renderer, Route, RouteHandler,
		RouteParams, RouteTable, RouterError, Subscription, TransitionOutcome,
	};
}

// Backends for the exported logging macros.
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
