//! Browser bindings (WASM only)
//!
//! `web-sys` implementations of the router's collaborator traits:
//!
//! - [`BrowserHistory`]: the History API and `popstate`
//! - [`BrowserSpawner`]: runs transitions on the browser's microtask queue
//! - [`DomAnchorFinder`]: resolves a click target to its enclosing `<a>`
//! - [`page_interceptor`]: a [`ClickInterceptor`] that knows the page's origin
//! - [`attach_click_listener`]: wires a [`ClickInterceptor`] to a DOM root

use crate::config::RouterConfig;
use crate::router::{
	AnchorElement, AnchorFinder, ClickDecision, ClickEvent, ClickInterceptor, ClickOutcome,
	DefaultClickDecision, HistoryAdapter, Modifiers, NavigationController, PopListener,
	RouterError, Subscription,
};
use crate::{debug_log, error_log};
use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn describe(value: &JsValue) -> String {
	match value.dyn_ref::<js_sys::Error>() {
		Some(error) => String::from(error.message()),
		None => format!("{:?}", value),
	}
}

fn history_error(context: &str, value: JsValue) -> RouterError {
	RouterError::History(format!("{}: {}", context, describe(&value)))
}

/// History adapter backed by `window.history` and `window.location`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: web_sys::Window,
}

impl BrowserHistory {
	/// Binds to the global `window`.
	pub fn new() -> Result<Self, RouterError> {
		let window = web_sys::window()
			.ok_or_else(|| RouterError::History("no global `window`".to_string()))?;
		Ok(Self { window })
	}

	fn history(&self) -> Result<web_sys::History, RouterError> {
		self.window
			.history()
			.map_err(|e| history_error("history unavailable", e))
	}
}

impl HistoryAdapter for BrowserHistory {
	fn current_path(&self) -> String {
		match self.window.location().pathname() {
			Ok(path) => path,
			Err(e) => {
				error_log!("failed to read location.pathname: {}", describe(&e));
				"/".to_string()
			}
		}
	}

	fn push_entry(&self, path: &str) -> Result<(), RouterError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(path))
			.map_err(|e| history_error("pushState failed", e))
	}

	fn replace_entry(&self, path: &str) -> Result<(), RouterError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(path))
			.map_err(|e| history_error("replaceState failed", e))
	}

	fn on_popped(&self, listener: PopListener) -> Subscription {
		let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |_event: web_sys::PopStateEvent| listener(),
		);
		let window = self.window.clone();

		if let Err(e) =
			window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			error_log!("failed to attach popstate listener: {}", describe(&e));
			return Subscription::noop();
		}

		Subscription::new(move || {
			if let Err(e) = window
				.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			{
				error_log!("failed to detach popstate listener: {}", describe(&e));
			}
		})
	}
}

/// Spawns transitions with `wasm_bindgen_futures::spawn_local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
	fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
		wasm_bindgen_futures::spawn_local(future);
		Ok(())
	}
}

impl ClickEvent for web_sys::MouseEvent {
	fn button(&self) -> i16 {
		web_sys::MouseEvent::button(self)
	}

	fn modifiers(&self) -> Modifiers {
		Modifiers {
			meta: self.meta_key(),
			ctrl: self.ctrl_key(),
			shift: self.shift_key(),
			alt: self.alt_key(),
		}
	}

	fn default_prevented(&self) -> bool {
		web_sys::Event::default_prevented(self)
	}

	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self);
	}
}

// Raw attributes, not the resolved `href`/`target` properties.
impl AnchorElement for web_sys::HtmlAnchorElement {
	fn href(&self) -> Option<String> {
		self.get_attribute("href")
	}

	fn target(&self) -> Option<String> {
		self.get_attribute("target")
	}

	fn has_download(&self) -> bool {
		self.has_attribute("download")
	}
}

/// Finds the nearest `<a>` ancestor of a click target, including the
/// target itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomAnchorFinder;

impl AnchorFinder<web_sys::MouseEvent> for DomAnchorFinder {
	type Anchor = web_sys::HtmlAnchorElement;

	fn nearest_anchor(&self, event: &web_sys::MouseEvent) -> Option<Self::Anchor> {
		let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
		element
			.closest("a")
			.ok()
			.flatten()?
			.dyn_into::<web_sys::HtmlAnchorElement>()
			.ok()
	}
}

/// Default click policy bound to the page's `location.href`, so absolute
/// links to this origin are handled by the router.
pub fn page_click_decision(config: &RouterConfig) -> Result<DefaultClickDecision, RouterError> {
	let window = web_sys::window()
		.ok_or_else(|| RouterError::Listener("no global `window`".to_string()))?;
	let href = window
		.location()
		.href()
		.map_err(|e| RouterError::Listener(format!("location.href: {}", describe(&e))))?;
	let base = Url::parse(&href)
		.map_err(|e| RouterError::Listener(format!("location.href `{}`: {}", href, e)))?;
	Ok(DefaultClickDecision::from_config(config).with_base(base))
}

/// Creates an interceptor for `controller` using [`DomAnchorFinder`] and
/// [`page_click_decision`].
pub fn page_interceptor<C: 'static>(
	controller: NavigationController<C>,
) -> Result<ClickInterceptor<C, DomAnchorFinder>, RouterError> {
	let decision = page_click_decision(&controller.config())?;
	Ok(ClickInterceptor::new(controller, DomAnchorFinder).with_decision(decision))
}

/// Delegates every click under `root` to `interceptor`.
///
/// One listener covers the whole subtree, so anchors added later are
/// intercepted too. Dropping the returned subscription removes it.
pub fn attach_click_listener<C, D>(
	root: &web_sys::EventTarget,
	interceptor: ClickInterceptor<C, DomAnchorFinder, D>,
) -> Result<Subscription, RouterError>
where
	C: 'static,
	D: ClickDecision<web_sys::MouseEvent, web_sys::HtmlAnchorElement> + 'static,
{
	let closure =
		Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
			if let ClickOutcome::Declined = interceptor.handle_click(&event) {
				debug_log!("click left to the browser");
			}
		});

	root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
		.map_err(|e| RouterError::Listener(format!("click: {}", describe(&e))))?;

	let root = root.clone();
	Ok(Subscription::new(move || {
		if let Err(e) =
			root.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
		{
			error_log!("failed to detach click listener: {}", describe(&e));
		}
	}))
}
