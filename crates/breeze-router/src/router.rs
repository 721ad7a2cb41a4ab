//! Client-side routing
//!
//! This module maps browser locations to application content without full
//! page reloads.
//!
//! ## Building blocks
//!
//! - [`RouteTable`]: ordered, immutable set of routes plus one not-found route
//! - [`match_path`]: resolves a path against a table (first match wins)
//! - [`NavigationController`]: owns the current/previous route, talks to
//!   history, runs handlers, renders, and discards superseded transitions
//! - [`ClickInterceptor`]: turns in-app anchor clicks into `navigate_to` calls
//!
//! ## Example
//!
//! ```
//! use breeze_router::router::{MemoryHistory, NavigationController, Route, RouteParams, RouteTable};
//! use futures::executor::LocalPool;
//!
//! let table = RouteTable::new()
//!     .with_route(Route::new("/", "home"))
//!     .with_route(Route::new("/users/:id", "user"))
//!     .with_route(Route::not_found("404"));
//!
//! let mut pool = LocalPool::new();
//! let history = MemoryHistory::new("/");
//! let controller = NavigationController::new(
//!     table,
//!     history.clone(),
//!     |content: &&str, params: &RouteParams| {
//!         println!("render {content} {:?}", params.get("id"));
//!         anyhow::Ok(())
//!     },
//!     pool.spawner(),
//! );
//!
//! pool.run_until(controller.start().unwrap());
//! pool.run_until(controller.navigate_to("/users/42"));
//!
//! let current = controller.current().unwrap();
//! assert_eq!(current.params().get("id"), Some("42"));
//! assert_eq!(history.entries(), vec!["/", "/users/42"]);
//! ```

pub mod error;
pub mod history;
pub mod intercept;
pub mod matcher;
pub mod navigation;
pub mod render;
pub mod route;
pub mod subscription;
pub mod table;

pub use error::{ParamError, RouterError};
pub use history::{HistoryAdapter, HistoryMode, MemoryHistory, PopListener, path_component};
pub use intercept::{
	AnchorElement, AnchorFinder, ClickDecision, ClickEvent, ClickInterceptor, ClickOutcome,
	DefaultClickDecision, Modifiers, PRIMARY_BUTTON, normalize_href,
};
pub use matcher::{decode_segment, match_path, match_route, normalize_path};
pub use navigation::{
	NavigationController, NavigationPhase, NavigationState, NavigationTrigger, TransitionOutcome,
};
pub use render::Renderer;
pub use route::{
	HandlerFuture, MatchedRoute, NOT_FOUND_PATTERN, Route, RouteHandler, RouteParams,
};
pub use subscription::Subscription;
pub use table::RouteTable;
