//! Path matching.
//!
//! Resolution walks the routes in registration order and returns the first
//! route whose pattern accepts the path; there is no most-specific-wins
//! ranking. Two paths are compared segment by segment after splitting on
//! `/`: a pattern segment accepts a path segment if the two are equal or if
//! the pattern segment is a `:name` parameter. Paths that nothing accepts
//! resolve to the not-found route.

use super::route::{MatchedRoute, Route, RouteParams};
use super::table::RouteTable;
use crate::{debug_log, warn_log};
use std::borrow::Cow;
use std::rc::Rc;

/// Drops one trailing `/`, leaving the root path untouched.
pub fn normalize_path(path: &str) -> &str {
	if path == "/" {
		return path;
	}
	path.strip_suffix('/').unwrap_or(path)
}

/// Returns true if every `%` in `segment` starts a two-digit hex escape.
fn has_valid_escapes(segment: &str) -> bool {
	let bytes = segment.as_bytes();
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'%' {
			let escape = bytes.get(i + 1..i + 3);
			if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
				return false;
			}
			i += 3;
		} else {
			i += 1;
		}
	}
	true
}

/// Percent-decodes a captured segment.
///
/// Decoding never fails: a malformed escape anywhere in the segment, or
/// bytes that do not form valid UTF-8, keep the whole segment raw.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
	if !has_valid_escapes(segment) {
		warn_log!("keeping raw path segment `{}`: malformed percent escape", segment);
		return Cow::Borrowed(segment);
	}
	match urlencoding::decode(segment) {
		Ok(decoded) => decoded,
		Err(e) => {
			warn_log!("keeping raw path segment `{}`: {}", segment, e);
			Cow::Borrowed(segment)
		}
	}
}

/// Returns true if every segment of `pattern` accepts the matching
/// segment of `path`.
fn segments_accept(pattern: &str, path: &str) -> bool {
	let pattern_segments = pattern.split('/');
	let path_segments = path.split('/');

	if pattern_segments.clone().count() != path_segments.clone().count() {
		return false;
	}

	pattern_segments
		.zip(path_segments)
		.all(|(expected, actual)| expected.starts_with(':') || expected == actual)
}

/// Collects the `:name` parameters of `pattern` from an accepted `path`.
fn extract_params(pattern: &str, path: &str) -> RouteParams {
	let mut params = RouteParams::new();
	for (expected, actual) in pattern.split('/').zip(path.split('/')) {
		if let Some(name) = expected.strip_prefix(':') {
			params.insert(name, decode_segment(actual));
		}
	}
	params
}

/// Tries a single route against an already normalised path.
///
/// The not-found route never matches by path.
pub fn match_route<C>(route: &Route<C>, path: &str) -> Option<RouteParams> {
	if route.is_not_found() || !segments_accept(route.pattern(), path) {
		return None;
	}
	Some(extract_params(route.pattern(), path))
}

/// Resolves `path` against `table`.
///
/// Returns `None` only when nothing matches and the table has no not-found
/// route; a validated table therefore always yields a result.
pub fn match_path<C>(table: &RouteTable<C>, path: &str) -> Option<MatchedRoute<C>> {
	let path = normalize_path(path);

	for route in table.entries() {
		if let Some(params) = match_route(route, path) {
			return Some(MatchedRoute::new(path, Rc::clone(route), params));
		}
	}

	debug_log!("no route matches `{}`, using not-found route", path);
	table
		.sentinel_entry()
		.map(|sentinel| MatchedRoute::new(path, Rc::clone(sentinel), RouteParams::new()))
}
