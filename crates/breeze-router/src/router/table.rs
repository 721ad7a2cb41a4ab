//! Ordered route registry.

use super::error::RouterError;
use super::route::Route;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Routes in registration order, plus the not-found fallback.
///
/// Order is significant: the matcher returns the first route that accepts
/// a path. Exactly one entry must be the not-found route; this is checked
/// by [`validate`](Self::validate) when navigation starts.
///
/// # Example
///
/// ```
/// use breeze_router::router::{Route, RouteTable};
///
/// let table = RouteTable::new()
///     .with_route(Route::new("/", "home"))
///     .with_route(Route::new("/users/:id", "user"))
///     .with_route(Route::not_found("404"));
///
/// assert!(table.validate().is_ok());
/// assert_eq!(table.len(), 3);
/// ```
pub struct RouteTable<C> {
	routes: Vec<Rc<Route<C>>>,
}

impl<C> fmt::Debug for RouteTable<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteTable")
			.field("routes_count", &self.routes.len())
			.field(
				"patterns",
				&self.routes.iter().map(|r| r.pattern()).collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl<C> Default for RouteTable<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C> RouteTable<C> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Appends a route.
	pub fn register(&mut self, route: Route<C>) {
		self.routes.push(Rc::new(route));
	}

	/// Appends a route, builder style.
	pub fn with_route(mut self, route: Route<C>) -> Self {
		self.register(route);
		self
	}

	/// Returns the routes in registration order.
	pub fn all(&self) -> impl Iterator<Item = &Route<C>> {
		self.routes.iter().map(|route| route.as_ref())
	}

	pub(crate) fn entries(&self) -> impl Iterator<Item = &Rc<Route<C>>> {
		self.routes.iter()
	}

	pub(crate) fn sentinel_entry(&self) -> Option<&Rc<Route<C>>> {
		self.routes.iter().find(|route| route.is_not_found())
	}

	/// Returns the not-found route, if registered.
	pub fn sentinel(&self) -> Option<&Route<C>> {
		self.sentinel_entry().map(|route| route.as_ref())
	}

	/// Returns the number of registered routes, the not-found route included.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns true if no routes are registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Checks that the table can be navigated.
	///
	/// # Errors
	///
	/// - [`RouterError::MissingSentinel`] / [`RouterError::DuplicateSentinel`]
	///   unless exactly one not-found route is registered.
	/// - [`RouterError::InvalidPattern`] for a pattern that does not start
	///   with `/` or has an empty parameter name.
	/// - [`RouterError::DuplicateParameter`] if a pattern names the same
	///   parameter twice.
	pub fn validate(&self) -> Result<(), RouterError> {
		let sentinels = self.routes.iter().filter(|r| r.is_not_found()).count();
		match sentinels {
			0 => return Err(RouterError::MissingSentinel),
			1 => {}
			count => return Err(RouterError::DuplicateSentinel { count }),
		}

		for route in self.all().filter(|r| !r.is_not_found()) {
			validate_pattern(route.pattern())?;
		}
		Ok(())
	}
}

fn validate_pattern(pattern: &str) -> Result<(), RouterError> {
	if !pattern.starts_with('/') {
		return Err(RouterError::InvalidPattern {
			pattern: pattern.to_string(),
			reason: "pattern must start with `/`",
		});
	}

	let mut seen = HashSet::new();
	for name in pattern.split('/').filter_map(|s| s.strip_prefix(':')) {
		if name.is_empty() {
			return Err(RouterError::InvalidPattern {
				pattern: pattern.to_string(),
				reason: "parameter name is empty",
			});
		}
		if !seen.insert(name) {
			return Err(RouterError::DuplicateParameter {
				pattern: pattern.to_string(),
				name: name.to_string(),
			});
		}
	}
	Ok(())
}
