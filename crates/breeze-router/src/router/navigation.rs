//! Navigation state machine.
//!
//! The controller owns the only mutable navigation state. Each of the four
//! triggers (`start`, `navigate_to`, `redirect`, a history pop) runs a
//! *transition*: resolve the current location, commit it as `current`, run
//! the route handler, then render. Transitions are tagged with a generation
//! number; a transition whose generation is no longer the latest when its
//! handler finishes is discarded without rendering (last navigation wins).

use super::error::RouterError;
use super::history::{HistoryAdapter, HistoryMode, PopListener};
use super::matcher::match_path;
use super::render::Renderer;
use super::route::MatchedRoute;
use super::subscription::Subscription;
use super::table::RouteTable;
use crate::config::RouterConfig;
use crate::{debug_log, error_log, warn_log};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::{LocalSpawn, LocalSpawnExt};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

/// Observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationPhase {
	/// No transition is pending.
	#[default]
	Idle,
	/// The latest transition has not rendered yet.
	Transitioning,
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTrigger {
	/// Initial transition from `start()`.
	Start,
	/// `navigate_to()`, including intercepted link clicks.
	Navigate,
	/// `redirect()`.
	Redirect,
	/// Browser back/forward.
	Popped,
}

/// Result of driving a transition to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
	/// The transition rendered its route.
	Committed {
		/// Generation of the transition.
		generation: u64,
	},
	/// A newer transition started first; nothing was rendered.
	Superseded {
		/// Generation of the discarded transition.
		generation: u64,
		/// Generation that replaced it.
		latest: u64,
	},
	/// The controller was not started, or has been disposed.
	NotStarted,
}

impl TransitionOutcome {
	/// Returns true if the transition rendered.
	pub fn is_committed(&self) -> bool {
		matches!(self, Self::Committed { .. })
	}
}

/// Snapshot of the controller's navigation state.
pub struct NavigationState<C> {
	current: Option<MatchedRoute<C>>,
	previous: Option<MatchedRoute<C>>,
	generation: u64,
}

impl<C> Default for NavigationState<C> {
	fn default() -> Self {
		Self {
			current: None,
			previous: None,
			generation: 0,
		}
	}
}

impl<C> Clone for NavigationState<C> {
	fn clone(&self) -> Self {
		Self {
			current: self.current.clone(),
			previous: self.previous.clone(),
			generation: self.generation,
		}
	}
}

impl<C> fmt::Debug for NavigationState<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationState")
			.field("current", &self.current.as_ref().map(|m| m.path()))
			.field("previous", &self.previous.as_ref().map(|m| m.path()))
			.field("generation", &self.generation)
			.finish()
	}
}

impl<C> NavigationState<C> {
	/// The most recently committed route.
	pub fn current(&self) -> Option<&MatchedRoute<C>> {
		self.current.as_ref()
	}

	/// The route that was current before it.
	pub fn previous(&self) -> Option<&MatchedRoute<C>> {
		self.previous.as_ref()
	}

	/// Generation of the latest transition.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	fn commit(&mut self, matched: MatchedRoute<C>) -> u64 {
		self.generation += 1;
		self.previous = self.current.replace(matched);
		self.generation
	}
}

struct Shared<C> {
	table: RouteTable<C>,
	history: Box<dyn HistoryAdapter>,
	renderer: Box<dyn Renderer<C>>,
	spawner: Rc<dyn LocalSpawn>,
	config: Cell<RouterConfig>,
	state: RefCell<NavigationState<C>>,
	phase: Cell<NavigationPhase>,
	started: Cell<bool>,
	popped: RefCell<Option<Subscription>>,
}

/// Coordinates history, route resolution, handlers, and rendering.
///
/// The controller is a cheap handle; clones drive the same state. All
/// operations run on a single thread.
///
/// `navigate_to`, `redirect`, and `handle_popped` update history and claim a
/// new generation before they return, so a later call always supersedes an
/// earlier one. The returned future runs the handler and render; it must be
/// awaited or spawned for the route to appear.
///
/// # Example
///
/// ```
/// use breeze_router::router::{
///     MemoryHistory, NavigationController, Route, RouteParams, RouteTable, RouterError,
/// };
/// use futures::executor::LocalPool;
///
/// let mut pool = LocalPool::new();
/// let table = RouteTable::new()
///     .with_route(Route::new("/", "home"))
///     .with_route(Route::not_found("404"));
/// let controller = NavigationController::new(
///     table,
///     MemoryHistory::new("/"),
///     |content: &&str, _params: &RouteParams| {
///         println!("{content}");
///         anyhow::Ok(())
///     },
///     pool.spawner(),
/// );
///
/// let initial = controller.start()?;
/// assert!(pool.run_until(initial).is_committed());
/// assert_eq!(controller.generation(), 1);
/// # Ok::<(), RouterError>(())
/// ```
pub struct NavigationController<C> {
	shared: Rc<Shared<C>>,
}

impl<C> Clone for NavigationController<C> {
	fn clone(&self) -> Self {
		Self {
			shared: Rc::clone(&self.shared),
		}
	}
}

impl<C> fmt::Debug for NavigationController<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationController")
			.field("routes", &self.shared.table)
			.field("state", &*self.shared.state.borrow())
			.field("phase", &self.shared.phase.get())
			.field("started", &self.shared.started.get())
			.finish()
	}
}

impl<C: 'static> NavigationController<C> {
	/// Creates a controller over `table`.
	///
	/// Nothing is validated or rendered until [`start`](Self::start).
	pub fn new<H, R, S>(table: RouteTable<C>, history: H, renderer: R, spawner: S) -> Self
	where
		H: HistoryAdapter + 'static,
		R: Renderer<C> + 'static,
		S: LocalSpawn + 'static,
	{
		Self {
			shared: Rc::new(Shared {
				table,
				history: Box::new(history),
				renderer: Box::new(renderer),
				spawner: Rc::new(spawner),
				config: Cell::new(RouterConfig::default()),
				state: RefCell::new(NavigationState::default()),
				phase: Cell::new(NavigationPhase::Idle),
				started: Cell::new(false),
				popped: RefCell::new(None),
			}),
		}
	}

	/// Replaces the configuration.
	pub fn with_config(self, config: RouterConfig) -> Self {
		self.shared.config.set(config);
		self
	}

	/// Returns the active configuration.
	pub fn config(&self) -> RouterConfig {
		self.shared.config.get()
	}

	/// Returns the route table.
	pub fn routes(&self) -> &RouteTable<C> {
		&self.shared.table
	}

	/// Validates the route table, subscribes to history pops, and begins the
	/// initial transition for the current location without adding a history
	/// entry.
	///
	/// # Errors
	///
	/// Returns the table's configuration error (see
	/// [`RouteTable::validate`]) or [`RouterError::AlreadyStarted`].
	pub fn start(&self) -> Result<impl Future<Output = TransitionOutcome> + 'static, RouterError> {
		if self.shared.started.get() {
			return Err(RouterError::AlreadyStarted);
		}
		if let Err(e) = self.shared.table.validate() {
			error_log!("router configuration rejected: {}", e);
			return Err(e);
		}

		self.shared.started.set(true);
		let subscription = self.shared.history.on_popped(self.pop_listener());
		*self.shared.popped.borrow_mut() = Some(subscription);

		Ok(self.transition(NavigationTrigger::Start))
	}

	/// Pushes `path` onto history and transitions to it.
	pub fn navigate_to(&self, path: &str) -> impl Future<Output = TransitionOutcome> + 'static {
		self.navigate(path, HistoryMode::Push, NavigationTrigger::Navigate)
	}

	/// Transitions to `path` using the configured redirect history mode
	/// (replace by default).
	pub fn redirect(&self, path: &str) -> impl Future<Output = TransitionOutcome> + 'static {
		let mode = self.shared.config.get().redirect_mode();
		self.navigate(path, mode, NavigationTrigger::Redirect)
	}

	/// Transitions to the location history now points at, without adding an
	/// entry. Called for browser back/forward.
	pub fn handle_popped(&self) -> impl Future<Output = TransitionOutcome> + 'static {
		if !self.shared.started.get() {
			return futures::future::ready(TransitionOutcome::NotStarted).boxed_local();
		}
		self.transition(NavigationTrigger::Popped)
	}

	/// Stops listening for history pops and discards in-flight transitions.
	///
	/// The controller can be started again afterwards.
	pub fn dispose(&self) {
		if let Some(subscription) = self.shared.popped.borrow_mut().take() {
			subscription.dispose();
		}
		if self.shared.started.replace(false) {
			self.shared.state.borrow_mut().generation += 1;
			self.shared.phase.set(NavigationPhase::Idle);
			debug_log!("router disposed");
		}
	}

	/// Returns true between `start()` and `dispose()`.
	pub fn is_started(&self) -> bool {
		self.shared.started.get()
	}

	/// Returns the current phase.
	pub fn phase(&self) -> NavigationPhase {
		self.shared.phase.get()
	}

	/// Returns the most recently committed route.
	pub fn current(&self) -> Option<MatchedRoute<C>> {
		self.shared.state.borrow().current.clone()
	}

	/// Returns the route that was current before it.
	pub fn previous(&self) -> Option<MatchedRoute<C>> {
		self.shared.state.borrow().previous.clone()
	}

	/// Returns the latest generation.
	pub fn generation(&self) -> u64 {
		self.shared.state.borrow().generation
	}

	/// Returns a snapshot of the navigation state.
	pub fn state(&self) -> NavigationState<C> {
		self.shared.state.borrow().clone()
	}

	/// Resolves `path` without navigating.
	pub fn resolve(&self, path: &str) -> Option<MatchedRoute<C>> {
		match_path(&self.shared.table, path)
	}

	/// Runs `transition` on the controller's spawner.
	///
	/// Browser hosts use this to drive `start()` and other transitions from
	/// synchronous event callbacks.
	pub fn spawn<F>(&self, transition: F)
	where
		F: Future<Output = TransitionOutcome> + 'static,
	{
		let task = transition.map(|outcome| debug_log!("transition finished: {:?}", outcome));
		if let Err(e) = self.shared.spawner.spawn_local(task) {
			error_log!("failed to spawn transition: {}", e);
		}
	}

	fn pop_listener(&self) -> PopListener {
		let weak: Weak<Shared<C>> = Rc::downgrade(&self.shared);
		Rc::new(move || {
			if let Some(shared) = weak.upgrade() {
				let controller = NavigationController { shared };
				controller.spawn(controller.handle_popped());
			}
		})
	}

	fn navigate(
		&self,
		path: &str,
		mode: HistoryMode,
		trigger: NavigationTrigger,
	) -> LocalBoxFuture<'static, TransitionOutcome> {
		if !self.shared.started.get() {
			warn_log!("{:?} to `{}` ignored: router not started", trigger, path);
			return futures::future::ready(TransitionOutcome::NotStarted).boxed_local();
		}
		if let Err(e) = mode.apply(self.shared.history.as_ref(), path) {
			// The location did not change; the transition re-renders it.
			error_log!("{:?} to `{}`: {}", trigger, path, e);
		}
		self.transition(trigger)
	}

	fn transition(&self, trigger: NavigationTrigger) -> LocalBoxFuture<'static, TransitionOutcome> {
		let shared = Rc::clone(&self.shared);
		let location = shared.history.current_path();

		let Some(matched) = match_path(&shared.table, &location) else {
			// Unreachable once `start()` has validated the table.
			error_log!("no route or not-found route for `{}`", location);
			return futures::future::ready(TransitionOutcome::NotStarted).boxed_local();
		};

		let generation = shared.state.borrow_mut().commit(matched.clone());
		shared.phase.set(NavigationPhase::Transitioning);
		debug_log!(
			"transition {} ({:?}) to `{}` -> `{}`",
			generation,
			trigger,
			matched.path(),
			matched.route().pattern()
		);

		async move {
			if let Some(handler) = matched.route().handler() {
				if let Some(outcome) = superseded(&shared, generation) {
					return outcome;
				}
				if let Err(e) = handler.handle(matched.clone()).await {
					error_log!("handler for `{}` failed: {:#}", matched.path(), e);
				}
			}

			if let Some(outcome) = superseded(&shared, generation) {
				return outcome;
			}

			if let Err(e) = shared.renderer.render(matched.content(), matched.params()) {
				error_log!("render for `{}` failed: {:#}", matched.path(), e);
			}
			shared.phase.set(NavigationPhase::Idle);
			TransitionOutcome::Committed { generation }
		}
		.boxed_local()
	}
}

fn superseded<C>(shared: &Shared<C>, generation: u64) -> Option<TransitionOutcome> {
	let latest = shared.state.borrow().generation;
	if latest == generation {
		return None;
	}
	debug_log!("transition {} superseded by {}", generation, latest);
	Some(TransitionOutcome::Superseded { generation, latest })
}
