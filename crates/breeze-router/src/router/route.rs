//! Route definitions and match results.

use super::error::ParamError;
use super::matcher::normalize_path;
use futures::future::{FutureExt, LocalBoxFuture};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::str::FromStr;

/// Pattern given to the not-found route when none is supplied.
pub const NOT_FOUND_PATTERN: &str = "*";

/// Future returned by a [`RouteHandler`].
pub type HandlerFuture = LocalBoxFuture<'static, anyhow::Result<()>>;

/// Hook run for a matched route before its content is rendered.
///
/// Every handler returns a future, synchronous work included; the
/// controller always awaits it before rendering. Closures of the form
/// `Fn(MatchedRoute<C>) -> impl Future<Output = anyhow::Result<()>>`
/// implement this trait.
///
/// # Example
///
/// ```
/// use breeze_router::router::{MatchedRoute, Route};
///
/// async fn load_user(id: u64) -> anyhow::Result<()> {
///     println!("loading user {id}");
///     Ok(())
/// }
///
/// let route = Route::new("/users/:id", "user-template").with_handler(
///     |matched: MatchedRoute<&'static str>| async move {
///         let id: u64 = matched.params().get_as("id")?;
///         load_user(id).await
///     },
/// );
/// assert!(route.has_handler());
/// ```
pub trait RouteHandler<C> {
	/// Runs the hook for `matched`.
	fn handle(&self, matched: MatchedRoute<C>) -> HandlerFuture;
}

impl<C, F, Fut> RouteHandler<C> for F
where
	F: Fn(MatchedRoute<C>) -> Fut,
	Fut: Future<Output = anyhow::Result<()>> + 'static,
{
	fn handle(&self, matched: MatchedRoute<C>) -> HandlerFuture {
		self(matched).boxed_local()
	}
}

/// A single route definition.
///
/// `C` is the content reference handed to the render collaborator; the
/// router never inspects it.
pub struct Route<C> {
	/// Normalised path pattern.
	pattern: String,
	/// Opaque content reference.
	content: C,
	/// Optional hook run before rendering.
	handler: Option<Box<dyn RouteHandler<C>>>,
	/// Whether this route is the not-found fallback.
	not_found: bool,
}

impl<C> fmt::Debug for Route<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("not_found", &self.not_found)
			.field("has_handler", &self.handler.is_some())
			.finish()
	}
}

impl<C> Route<C> {
	/// Creates a route for `pattern`.
	///
	/// Segments starting with `:` are named parameters. A single trailing
	/// slash is dropped, so `/about/` and `/about` describe the same route.
	pub fn new(pattern: &str, content: C) -> Self {
		Self {
			pattern: normalize_path(pattern).to_string(),
			content,
			handler: None,
			not_found: false,
		}
	}

	/// Creates the not-found fallback route.
	///
	/// The fallback is never matched by path; it is returned whenever no
	/// other route matches.
	pub fn not_found(content: C) -> Self {
		Self {
			pattern: NOT_FOUND_PATTERN.to_string(),
			content,
			handler: None,
			not_found: true,
		}
	}

	/// Attaches a closure handler to this route.
	pub fn with_handler<F, Fut>(self, handler: F) -> Self
	where
		F: Fn(MatchedRoute<C>) -> Fut + 'static,
		Fut: Future<Output = anyhow::Result<()>> + 'static,
	{
		self.with_route_handler(handler)
	}

	/// Attaches any [`RouteHandler`] implementation to this route.
	pub fn with_route_handler<H>(mut self, handler: H) -> Self
	where
		H: RouteHandler<C> + 'static,
	{
		self.handler = Some(Box::new(handler));
		self
	}

	/// Returns the normalised pattern.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the content reference.
	pub fn content(&self) -> &C {
		&self.content
	}

	/// Returns the handler, if any.
	pub fn handler(&self) -> Option<&dyn RouteHandler<C>> {
		self.handler.as_deref()
	}

	/// Returns true if this route has a handler.
	pub fn has_handler(&self) -> bool {
		self.handler.is_some()
	}

	/// Returns true if this is the not-found fallback.
	pub fn is_not_found(&self) -> bool {
		self.not_found
	}

	/// Returns true if the pattern contains at least one `:name` segment.
	pub fn is_parameterized(&self) -> bool {
		self.param_names().next().is_some()
	}

	/// Iterates over the parameter names in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.pattern
			.split('/')
			.filter_map(|segment| segment.strip_prefix(':'))
	}
}

/// Parameters extracted from a matched path, keyed by name.
///
/// Values are percent-decoded. A fresh map is built for each match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	values: HashMap<String, String>,
}

impl RouteParams {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	/// Returns the decoded value of `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Parses the value of `name` into `T`.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Missing`] if the route has no such parameter
	/// and [`ParamError::Parse`] if the value does not parse.
	pub fn get_as<T>(&self, name: &str) -> Result<T, ParamError>
	where
		T: FromStr,
		T::Err: fmt::Display,
	{
		let raw = self.get(name).ok_or_else(|| ParamError::Missing {
			name: name.to_string(),
		})?;

		raw.parse::<T>().map_err(|e| ParamError::Parse {
			name: name.to_string(),
			raw: raw.to_string(),
			type_name: std::any::type_name::<T>(),
			message: e.to_string(),
		})
	}

	/// Returns true if a parameter named `name` was captured.
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Returns the number of captured parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over `(name, value)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// A resolved route together with the parameters captured from the path.
pub struct MatchedRoute<C> {
	/// The normalised path that was resolved.
	path: String,
	/// The route that matched, or the not-found fallback.
	route: Rc<Route<C>>,
	/// Captured parameters.
	params: RouteParams,
}

impl<C> Clone for MatchedRoute<C> {
	fn clone(&self) -> Self {
		Self {
			path: self.path.clone(),
			route: Rc::clone(&self.route),
			params: self.params.clone(),
		}
	}
}

impl<C> fmt::Debug for MatchedRoute<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MatchedRoute")
			.field("path", &self.path)
			.field("route", &self.route)
			.field("params", &self.params)
			.finish()
	}
}

impl<C> MatchedRoute<C> {
	pub(crate) fn new(path: impl Into<String>, route: Rc<Route<C>>, params: RouteParams) -> Self {
		Self {
			path: path.into(),
			route,
			params,
		}
	}

	/// Returns the normalised path that was resolved.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the matched route.
	pub fn route(&self) -> &Route<C> {
		&self.route
	}

	/// Returns the captured parameters.
	pub fn params(&self) -> &RouteParams {
		&self.params
	}

	/// Returns the matched route's content reference.
	pub fn content(&self) -> &C {
		self.route.content()
	}

	/// Returns true if resolution fell back to the not-found route.
	pub fn is_not_found(&self) -> bool {
		self.route.is_not_found()
	}

	/// Returns true if both results point at the same registered route.
	pub fn same_route(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.route, &other.route)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/")]
	#[case("/about", "/about")]
	#[case("/about/", "/about")]
	#[case("/users/:id/", "/users/:id")]
	fn test_route_new_normalizes_pattern(#[case] pattern: &str, #[case] expected: &str) {
		let route = Route::new(pattern, ());
		assert_eq!(route.pattern(), expected);
		assert!(!route.is_not_found());
	}

	#[rstest]
	fn test_route_not_found() {
		let route = Route::not_found("404");
		assert!(route.is_not_found());
		assert_eq!(route.pattern(), NOT_FOUND_PATTERN);
		assert_eq!(*route.content(), "404");
	}

	#[rstest]
	fn test_route_param_names() {
		let route = Route::new("/users/:user_id/posts/:post_id", ());
		let names: Vec<_> = route.param_names().collect();
		assert_eq!(names, vec!["user_id", "post_id"]);
		assert!(route.is_parameterized());
		assert!(!Route::new("/about", ()).is_parameterized());
	}

	#[rstest]
	fn test_route_debug_hides_content() {
		let route = Route::new("/", vec![1u8, 2, 3]).with_handler(|_| async { anyhow::Ok(()) });
		let debug = format!("{:?}", route);
		assert!(debug.contains("has_handler: true"));
		assert!(!debug.contains("[1, 2, 3]"));
	}

	#[rstest]
	fn test_closure_handler_is_invoked() {
		let route = Rc::new(Route::new("/users/:id", "user").with_handler(
			|matched: MatchedRoute<&'static str>| async move {
				let id: u32 = matched.params().get_as("id")?;
				anyhow::ensure!(id == 7, "unexpected id {}", id);
				anyhow::Ok(())
			},
		));
		let params: RouteParams = [("id", "7")].into_iter().collect();
		let matched = MatchedRoute::new("/users/7", Rc::clone(&route), params);

		let handler = route.handler().expect("handler attached");
		assert!(block_on(handler.handle(matched)).is_ok());
	}

	#[rstest]
	fn test_params_get_as() {
		let params: RouteParams = [("id", "42"), ("slug", "hello")].into_iter().collect();

		assert_eq!(params.get_as::<u64>("id"), Ok(42));
		assert_eq!(params.get_as::<String>("slug"), Ok("hello".to_string()));
		assert_eq!(params.len(), 2);
		assert!(params.contains("slug"));
	}

	#[rstest]
	fn test_params_get_as_missing() {
		let params = RouteParams::new();
		assert!(params.is_empty());
		assert_eq!(
			params.get_as::<u64>("id"),
			Err(ParamError::Missing {
				name: "id".to_string()
			})
		);
	}

	#[rstest]
	fn test_params_get_as_parse_error() {
		let params: RouteParams = [("id", "not_a_number")].into_iter().collect();

		match params.get_as::<i32>("id") {
			Err(ParamError::Parse {
				name,
				raw,
				type_name,
				..
			}) => {
				assert_eq!(name, "id");
				assert_eq!(raw, "not_a_number");
				assert_eq!(type_name, "i32");
			}
			other => panic!("Expected ParseError, got {:?}", other),
		}
	}

	#[rstest]
	fn test_matched_route_same_route() {
		let route = Rc::new(Route::new("/a", ()));
		let other = Rc::new(Route::new("/a", ()));
		let first = MatchedRoute::new("/a", Rc::clone(&route), RouteParams::new());
		let second = first.clone();
		let third = MatchedRoute::new("/a", other, RouteParams::new());

		assert!(first.same_route(&second));
		assert!(!first.same_route(&third));
	}
}
