//! In-app link interception.
//!
//! A single click listener on the document root sees every click that
//! bubbles up. For clicks on (or inside) an anchor that the router should
//! own, the default navigation is cancelled and the anchor's href is routed
//! through [`NavigationController::navigate_to`] instead. Everything else,
//! such as modified clicks, new-window targets, downloads, and cross-origin
//! links, is left to the browser.
//!
//! The DOM is reached only through the [`ClickEvent`], [`AnchorElement`],
//! and [`AnchorFinder`] traits; browser implementations live in
//! `crate::web`.

use super::navigation::NavigationController;
use crate::config::RouterConfig;
use crate::debug_log;
use url::Url;

/// `MouseEvent.button` value of the primary button.
pub const PRIMARY_BUTTON: i16 = 0;

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Meta (Command / Windows) key.
	pub meta: bool,
	/// Control key.
	pub ctrl: bool,
	/// Shift key.
	pub shift: bool,
	/// Alt (Option) key.
	pub alt: bool,
}

impl Modifiers {
	/// Returns true if any modifier is held.
	pub fn any(&self) -> bool {
		self.meta || self.ctrl || self.shift || self.alt
	}
}

/// A click as seen by the interceptor.
pub trait ClickEvent {
	/// Which mouse button was pressed.
	fn button(&self) -> i16;
	/// Modifier keys held during the click.
	fn modifiers(&self) -> Modifiers;
	/// Whether another listener already cancelled the default action.
	fn default_prevented(&self) -> bool;
	/// Cancels the browser's default navigation.
	fn prevent_default(&self);
}

/// The anchor attributes the interceptor inspects.
pub trait AnchorElement {
	/// Raw `href` attribute.
	fn href(&self) -> Option<String>;
	/// Raw `target` attribute.
	fn target(&self) -> Option<String>;
	/// Whether the anchor carries a `download` attribute.
	fn has_download(&self) -> bool;
}

/// Locates the anchor a click belongs to.
pub trait AnchorFinder<E> {
	/// Anchor type produced.
	type Anchor: AnchorElement;

	/// Walks up from the event target to the nearest anchor.
	fn nearest_anchor(&self, event: &E) -> Option<Self::Anchor>;
}

/// Decides whether the router takes over a click.
pub trait ClickDecision<E, A> {
	/// Returns true if the router should handle this click.
	fn should_handle(&self, event: &E, anchor: &A) -> bool;
}

/// The standard click policy.
///
/// Declines clicks that are not plain primary-button clicks, clicks another
/// listener already cancelled, anchors that open another browsing context
/// or download a file, anchors without an `href`, fragment-only links
/// (unless enabled), and links to another origin.
#[derive(Debug, Clone, Default)]
pub struct DefaultClickDecision {
	/// Base URL of the running page; used to resolve and compare origins.
	base: Option<Url>,
	intercept_fragment_links: bool,
}

impl DefaultClickDecision {
	/// Creates a policy with no known origin.
	///
	/// Without an origin every absolute href is treated as cross-origin.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a policy from the router configuration.
	pub fn from_config(config: &RouterConfig) -> Self {
		Self::new().with_fragment_links(config.intercept_fragment_links())
	}

	/// Sets the page URL that same-origin checks compare against.
	pub fn with_base(mut self, base: Url) -> Self {
		self.base = Some(base);
		self
	}

	/// Sets whether fragment-only links are handled.
	pub fn with_fragment_links(mut self, intercept: bool) -> Self {
		self.intercept_fragment_links = intercept;
		self
	}

	/// Returns true if `href` resolves to the page's own origin.
	pub fn is_same_origin(&self, href: &str) -> bool {
		let href = href.trim();
		match &self.base {
			Some(base) => base
				.join(href)
				.is_ok_and(|resolved| resolved.origin() == base.origin()),
			// Scheme-relative hrefs name a host, which cannot be compared.
			None if href.starts_with("//") => false,
			None => matches!(Url::parse(href), Err(url::ParseError::RelativeUrlWithoutBase)),
		}
	}
}

fn opens_new_context(target: Option<String>) -> bool {
	target.is_some_and(|target| {
		let target = target.trim();
		!target.is_empty() && !target.eq_ignore_ascii_case("_self")
	})
}

impl<E, A> ClickDecision<E, A> for DefaultClickDecision
where
	E: ClickEvent,
	A: AnchorElement,
{
	fn should_handle(&self, event: &E, anchor: &A) -> bool {
		if event.button() != PRIMARY_BUTTON || event.modifiers().any() || event.default_prevented() {
			return false;
		}
		if opens_new_context(anchor.target()) || anchor.has_download() {
			return false;
		}

		let Some(href) = anchor.href() else {
			return false;
		};
		let href = href.trim();
		if href.is_empty() {
			return false;
		}
		if href.starts_with('#') && !self.intercept_fragment_links {
			return false;
		}
		self.is_same_origin(href)
	}
}

/// Turns an anchor href into the root-relative location the router
/// navigates to.
///
/// Absolute and scheme-relative hrefs keep their path, query, and fragment.
/// Anything else is treated as root-relative and gains a leading `/` if it
/// lacks one. Fragment-only hrefs depend on the current location and are
/// resolved by [`ClickInterceptor`] instead.
pub fn normalize_href(href: &str) -> String {
	let href = href.trim();
	let absolute = if href.starts_with("//") {
		Url::parse(&format!("http:{}", href)).ok()
	} else {
		Url::parse(href).ok()
	};

	match absolute {
		Some(url) => {
			let mut location = url.path().to_string();
			if let Some(query) = url.query() {
				location.push('?');
				location.push_str(query);
			}
			if let Some(fragment) = url.fragment() {
				location.push('#');
				location.push_str(fragment);
			}
			location
		}
		None if href.starts_with('/') => href.to_string(),
		None => format!("/{}", href),
	}
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
	/// The click was not inside an anchor.
	NoAnchor,
	/// The click policy left the click to the browser.
	Declined,
	/// The router took over and navigated to `path`.
	Navigated {
		/// Root-relative location passed to `navigate_to`.
		path: String,
	},
}

/// Routes in-app link clicks through a [`NavigationController`].
pub struct ClickInterceptor<C, F, D = DefaultClickDecision> {
	controller: NavigationController<C>,
	finder: F,
	decision: D,
}

impl<C, F, D> std::fmt::Debug for ClickInterceptor<C, F, D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClickInterceptor").finish_non_exhaustive()
	}
}

impl<C: 'static, F> ClickInterceptor<C, F, DefaultClickDecision> {
	/// Creates an interceptor using the default click policy, configured
	/// from the controller's settings.
	pub fn new(controller: NavigationController<C>, finder: F) -> Self {
		let decision = DefaultClickDecision::from_config(&controller.config());
		Self {
			controller,
			finder,
			decision,
		}
	}
}

impl<C: 'static, F, D> ClickInterceptor<C, F, D> {
	/// Replaces the click policy.
	pub fn with_decision<D2>(self, decision: D2) -> ClickInterceptor<C, F, D2> {
		ClickInterceptor {
			controller: self.controller,
			finder: self.finder,
			decision,
		}
	}

	/// Returns the controller clicks are routed to.
	pub fn controller(&self) -> &NavigationController<C> {
		&self.controller
	}

	/// Root-relative location an accepted href navigates to.
	///
	/// A fragment-only href stays on the current path.
	fn target_location(&self, href: &str) -> String {
		let href = href.trim();
		if !href.starts_with('#') {
			return normalize_href(href);
		}
		let current = self
			.controller
			.current()
			.map(|matched| matched.path().to_string())
			.unwrap_or_else(|| "/".to_string());
		format!("{}{}", current, href)
	}

	/// Handles one click event.
	///
	/// When the router takes over, the default action is prevented and the
	/// resulting transition is spawned on the controller's spawner.
	pub fn handle_click<E>(&self, event: &E) -> ClickOutcome
	where
		E: ClickEvent,
		F: AnchorFinder<E>,
		D: ClickDecision<E, F::Anchor>,
	{
		let Some(anchor) = self.finder.nearest_anchor(event) else {
			return ClickOutcome::NoAnchor;
		};
		if !self.decision.should_handle(event, &anchor) {
			return ClickOutcome::Declined;
		}
		let Some(href) = anchor.href() else {
			return ClickOutcome::Declined;
		};

		event.prevent_default();
		let path = self.target_location(&href);
		debug_log!("intercepted click on `{}`, navigating to `{}`", href, path);
		self.controller.spawn(self.controller.navigate_to(&path));
		ClickOutcome::Navigated { path }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::history::HistoryAdapter;
	use crate::router::{MemoryHistory, Route, RouteParams, RouteTable};
	use futures::executor::LocalPool;
	use rstest::{fixture, rstest};
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	#[derive(Debug, Clone, Default)]
	struct FakeAnchor {
		href: Option<String>,
		target: Option<String>,
		download: bool,
	}

	impl FakeAnchor {
		fn link(href: &str) -> Self {
			Self {
				href: Some(href.to_string()),
				..Default::default()
			}
		}
	}

	impl AnchorElement for FakeAnchor {
		fn href(&self) -> Option<String> {
			self.href.clone()
		}

		fn target(&self) -> Option<String> {
			self.target.clone()
		}

		fn has_download(&self) -> bool {
			self.download
		}
	}

	#[derive(Debug, Default)]
	struct FakeClick {
		anchor: Option<FakeAnchor>,
		button: i16,
		modifiers: Modifiers,
		prevented: Cell<bool>,
	}

	impl FakeClick {
		fn on(anchor: FakeAnchor) -> Self {
			Self {
				anchor: Some(anchor),
				..Default::default()
			}
		}
	}

	impl ClickEvent for FakeClick {
		fn button(&self) -> i16 {
			self.button
		}

		fn modifiers(&self) -> Modifiers {
			self.modifiers
		}

		fn default_prevented(&self) -> bool {
			self.prevented.get()
		}

		fn prevent_default(&self) {
			self.prevented.set(true);
		}
	}

	struct FakeFinder;

	impl AnchorFinder<FakeClick> for FakeFinder {
		type Anchor = FakeAnchor;

		fn nearest_anchor(&self, event: &FakeClick) -> Option<FakeAnchor> {
			event.anchor.clone()
		}
	}

	struct Harness {
		interceptor: ClickInterceptor<&'static str, FakeFinder>,
		history: MemoryHistory,
		rendered: Rc<RefCell<Vec<&'static str>>>,
		pool: LocalPool,
	}

	#[fixture]
	fn harness() -> Harness {
		let mut pool = LocalPool::new();
		let history = MemoryHistory::new("/");
		let rendered = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&rendered);
		let table = RouteTable::new()
			.with_route(Route::new("/", "home"))
			.with_route(Route::new("/about", "about"))
			.with_route(Route::not_found("404"));
		let controller = NavigationController::new(
			table,
			history.clone(),
			move |content: &&'static str, _: &RouteParams| {
				sink.borrow_mut().push(*content);
				anyhow::Ok(())
			},
			pool.spawner(),
		);
		pool.run_until(controller.start().unwrap());

		Harness {
			interceptor: ClickInterceptor::new(controller, FakeFinder),
			history,
			rendered,
			pool,
		}
	}

	fn base() -> Url {
		Url::parse("https://app.example/users/1").unwrap()
	}

	#[rstest]
	fn test_plain_click_navigates(mut harness: Harness) {
		let click = FakeClick::on(FakeAnchor::link("/about"));

		let outcome = harness.interceptor.handle_click(&click);
		harness.pool.run_until_stalled();

		assert_eq!(
			outcome,
			ClickOutcome::Navigated {
				path: "/about".to_string()
			}
		);
		assert!(click.prevented.get());
		assert_eq!(harness.history.entries(), vec!["/", "/about"]);
		assert_eq!(*harness.rendered.borrow(), vec!["home", "about"]);
	}

	#[rstest]
	fn test_relative_href_gets_leading_slash(mut harness: Harness) {
		let click = FakeClick::on(FakeAnchor::link("  about "));

		harness.interceptor.handle_click(&click);
		harness.pool.run_until_stalled();

		assert_eq!(harness.history.current_path(), "/about");
	}

	#[rstest]
	fn test_click_outside_anchor_is_ignored(harness: Harness) {
		let click = FakeClick::default();

		assert_eq!(harness.interceptor.handle_click(&click), ClickOutcome::NoAnchor);
		assert!(!click.prevented.get());
	}

	#[rstest]
	#[case::meta(Modifiers { meta: true, ..Default::default() })]
	#[case::ctrl(Modifiers { ctrl: true, ..Default::default() })]
	#[case::shift(Modifiers { shift: true, ..Default::default() })]
	#[case::alt(Modifiers { alt: true, ..Default::default() })]
	fn test_modifier_click_is_left_to_browser(mut harness: Harness, #[case] modifiers: Modifiers) {
		let click = FakeClick {
			modifiers,
			..FakeClick::on(FakeAnchor::link("/about"))
		};

		let outcome = harness.interceptor.handle_click(&click);
		harness.pool.run_until_stalled();

		assert_eq!(outcome, ClickOutcome::Declined);
		assert!(!click.prevented.get());
		assert_eq!(harness.history.entries(), vec!["/"]);
		assert_eq!(harness.interceptor.controller().generation(), 1);
	}

	#[rstest]
	fn test_already_prevented_click_is_declined(harness: Harness) {
		let click = FakeClick::on(FakeAnchor::link("/about"));
		click.prevented.set(true);

		assert_eq!(harness.interceptor.handle_click(&click), ClickOutcome::Declined);
		assert_eq!(harness.history.entries(), vec!["/"]);
	}

	#[rstest]
	#[case(FakeAnchor { target: Some("_blank".into()), ..FakeAnchor::link("/about") }, false)]
	#[case(FakeAnchor { target: Some("_self".into()), ..FakeAnchor::link("/about") }, true)]
	#[case(FakeAnchor { target: Some("".into()), ..FakeAnchor::link("/about") }, true)]
	#[case(FakeAnchor { download: true, ..FakeAnchor::link("/report.csv") }, false)]
	#[case(FakeAnchor::default(), false)]
	#[case(FakeAnchor::link(""), false)]
	#[case(FakeAnchor::link("#top"), false)]
	#[case(FakeAnchor::link("https://elsewhere.example/about"), false)]
	#[case(FakeAnchor::link("mailto:team@app.example"), false)]
	#[case(FakeAnchor::link("https://app.example/about"), true)]
	#[case(FakeAnchor::link("//app.example/about"), true)]
	#[case(FakeAnchor::link("//cdn.example/file"), false)]
	#[case(FakeAnchor::link("about"), true)]
	fn test_default_decision(#[case] anchor: FakeAnchor, #[case] expected: bool) {
		let decision = DefaultClickDecision::new().with_base(base());
		let click = FakeClick::on(anchor.clone());

		assert_eq!(decision.should_handle(&click, &anchor), expected);
	}

	#[rstest]
	fn test_non_primary_button_is_declined() {
		let anchor = FakeAnchor::link("/about");
		let click = FakeClick {
			button: 1,
			..FakeClick::on(anchor.clone())
		};

		assert!(!DefaultClickDecision::new().should_handle(&click, &anchor));
	}

	#[rstest]
	fn test_fragment_links_when_enabled() {
		let anchor = FakeAnchor::link("#top");
		let click = FakeClick::on(anchor.clone());
		let config = RouterConfig::default().with_intercept_fragment_links(true);

		assert!(DefaultClickDecision::from_config(&config).should_handle(&click, &anchor));
	}

	#[rstest]
	fn test_fragment_link_stays_on_current_page(mut harness: Harness) {
		let controller = harness
			.interceptor
			.controller()
			.clone()
			.with_config(RouterConfig::default().with_intercept_fragment_links(true));
		let interceptor = ClickInterceptor::new(controller, FakeFinder);
		harness
			.pool
			.run_until(interceptor.controller().navigate_to("/about"));

		let click = FakeClick::on(FakeAnchor::link("#top"));
		let outcome = interceptor.handle_click(&click);
		harness.pool.run_until_stalled();

		assert_eq!(
			outcome,
			ClickOutcome::Navigated {
				path: "/about#top".to_string()
			}
		);
		assert_eq!(harness.history.current_path(), "/about");
		assert_eq!(
			interceptor.controller().current().map(|m| m.path().to_string()),
			Some("/about".to_string())
		);
		assert_eq!(*harness.rendered.borrow(), vec!["home", "about", "about"]);
	}

	#[rstest]
	#[case("/about", true)]
	#[case("about", true)]
	#[case("https://app.example/about", false)]
	#[case("//app.example/about", false)]
	fn test_same_origin_without_base(#[case] href: &str, #[case] expected: bool) {
		assert_eq!(DefaultClickDecision::new().is_same_origin(href), expected);
	}

	#[rstest]
	#[case("/about", "/about")]
	#[case("about", "/about")]
	#[case(" users/42 ", "/users/42")]
	#[case("/search?q=rust#results", "/search?q=rust#results")]
	#[case("https://app.example/users/7?tab=posts", "/users/7?tab=posts")]
	#[case("//app.example/docs#intro", "/docs#intro")]
	fn test_normalize_href(#[case] href: &str, #[case] expected: &str) {
		assert_eq!(normalize_href(href), expected);
	}

	#[rstest]
	fn test_custom_decision(harness: Harness) {
		struct Never;
		impl<E, A> ClickDecision<E, A> for Never {
			fn should_handle(&self, _: &E, _: &A) -> bool {
				false
			}
		}

		let interceptor = harness.interceptor.with_decision(Never);
		let click = FakeClick::on(FakeAnchor::link("/about"));

		assert_eq!(interceptor.handle_click(&click), ClickOutcome::Declined);
	}
}
