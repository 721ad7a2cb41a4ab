//! Disposable event subscriptions.

use std::fmt;

/// Handle to a registered listener.
///
/// The listener is removed by [`dispose`](Self::dispose) or when the handle
/// is dropped, so a router instance never leaves listeners behind.
#[must_use = "dropping a Subscription removes its listener"]
pub struct Subscription {
	teardown: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.is_active())
			.finish()
	}
}

impl Subscription {
	/// Creates a subscription that runs `teardown` once when disposed.
	pub fn new<F>(teardown: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			teardown: Some(Box::new(teardown)),
		}
	}

	/// Creates a subscription with nothing to tear down.
	pub fn noop() -> Self {
		Self { teardown: None }
	}

	/// Returns true until the subscription has been torn down.
	pub fn is_active(&self) -> bool {
		self.teardown.is_some()
	}

	/// Removes the listener.
	pub fn dispose(mut self) {
		self.teardown_now();
	}

	fn teardown_now(&mut self) {
		if let Some(teardown) = self.teardown.take() {
			teardown();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.teardown_now();
	}
}
