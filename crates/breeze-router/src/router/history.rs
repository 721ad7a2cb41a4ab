//! History adapter contract and an in-memory implementation.

use super::error::RouterError;
use super::subscription::Subscription;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback fired when the user moves back or forward through history.
pub type PopListener = Rc<dyn Fn()>;

/// Access to the browsable location history.
pub trait HistoryAdapter {
	/// Returns the path component of the current location.
	fn current_path(&self) -> String;

	/// Records `path` as a new history entry.
	fn push_entry(&self, path: &str) -> Result<(), RouterError>;

	/// Replaces the current history entry with `path`.
	fn replace_entry(&self, path: &str) -> Result<(), RouterError>;

	/// Subscribes to back/forward signals.
	fn on_popped(&self, listener: PopListener) -> Subscription;
}

/// How a navigation records itself in history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
	/// Add a new entry.
	Push,
	/// Overwrite the current entry.
	#[default]
	Replace,
}

impl HistoryMode {
	/// Records `path` in `history` according to this mode.
	pub fn apply(self, history: &dyn HistoryAdapter, path: &str) -> Result<(), RouterError> {
		match self {
			Self::Push => history.push_entry(path),
			Self::Replace => history.replace_entry(path),
		}
	}
}

/// Strips the query string and fragment from a location.
pub fn path_component(location: &str) -> &str {
	let end = location.find(['?', '#']).unwrap_or(location.len());
	&location[..end]
}

#[derive(Default)]
struct MemoryHistoryInner {
	entries: Vec<String>,
	index: usize,
	listeners: Vec<(u64, PopListener)>,
	next_listener_id: u64,
}

/// History kept in memory.
///
/// Used by native hosts and tests. Clones share the same history, so a test
/// can keep a handle while the controller owns another. [`back`](Self::back)
/// and [`forward`](Self::forward) fire the pop listeners the way a browser
/// fires `popstate`.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<RefCell<MemoryHistoryInner>>,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &inner.entries)
			.field("index", &inner.index)
			.field("listeners", &inner.listeners.len())
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(MemoryHistoryInner {
				entries: vec![initial.into()],
				..Default::default()
			})),
		}
	}

	/// Returns every entry, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.inner.borrow().entries.clone()
	}

	/// Returns the index of the current entry.
	pub fn index(&self) -> usize {
		self.inner.borrow().index
	}

	/// Returns the number of active pop listeners.
	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}

	/// Moves one entry back and notifies listeners.
	///
	/// Returns false, without notifying, at the oldest entry.
	pub fn back(&self) -> bool {
		let moved = {
			let mut inner = self.inner.borrow_mut();
			if inner.index == 0 {
				false
			} else {
				inner.index -= 1;
				true
			}
		};
		if moved {
			self.notify();
		}
		moved
	}

	/// Moves one entry forward and notifies listeners.
	///
	/// Returns false, without notifying, at the newest entry.
	pub fn forward(&self) -> bool {
		let moved = {
			let mut inner = self.inner.borrow_mut();
			if inner.index + 1 >= inner.entries.len() {
				false
			} else {
				inner.index += 1;
				true
			}
		};
		if moved {
			self.notify();
		}
		moved
	}

	fn notify(&self) {
		// Listeners may read the history, so release the borrow first.
		let listeners: Vec<PopListener> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			listener();
		}
	}
}

impl HistoryAdapter for MemoryHistory {
	fn current_path(&self) -> String {
		let inner = self.inner.borrow();
		inner
			.entries
			.get(inner.index)
			.map(|entry| path_component(entry).to_string())
			.unwrap_or_else(|| "/".to_string())
	}

	fn push_entry(&self, path: &str) -> Result<(), RouterError> {
		let mut inner = self.inner.borrow_mut();
		let next = inner.index + 1;
		inner.entries.truncate(next);
		inner.entries.push(path.to_string());
		inner.index = next;
		Ok(())
	}

	fn replace_entry(&self, path: &str) -> Result<(), RouterError> {
		let mut inner = self.inner.borrow_mut();
		let index = inner.index;
		inner.entries[index] = path.to_string();
		Ok(())
	}

	fn on_popped(&self, listener: PopListener) -> Subscription {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_listener_id;
			inner.next_listener_id += 1;
			inner.listeners.push((id, listener));
			id
		};

		let weak: Weak<RefCell<MemoryHistoryInner>> = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().listeners.retain(|(other, _)| *other != id);
			}
		})
	}
}
