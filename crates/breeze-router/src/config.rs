//! Router configuration.

use crate::router::HistoryMode;
use serde::Deserialize;

/// Tunable router behaviour.
///
/// Deserializable so hosts can keep it next to the rest of their settings.
///
/// # Examples
///
/// ```
/// use breeze_router::config::RouterConfig;
/// use breeze_router::router::HistoryMode;
///
/// let config = RouterConfig::default();
/// assert_eq!(config.redirect_mode(), HistoryMode::Replace);
///
/// let config: RouterConfig = serde_json::from_str(r#"{ "redirect_mode": "push" }"#).unwrap();
/// assert_eq!(config.redirect_mode(), HistoryMode::Push);
/// assert!(!config.intercept_fragment_links());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	redirect_mode: HistoryMode,
	intercept_fragment_links: bool,
}

impl RouterConfig {
	/// Sets how `redirect()` records itself in history.
	pub fn with_redirect_mode(mut self, mode: HistoryMode) -> Self {
		self.redirect_mode = mode;
		self
	}

	/// Sets whether clicks on `#fragment` links are routed.
	pub fn with_intercept_fragment_links(mut self, intercept: bool) -> Self {
		self.intercept_fragment_links = intercept;
		self
	}

	/// History mode used by `redirect()`.
	pub fn redirect_mode(&self) -> HistoryMode {
		self.redirect_mode
	}

	/// Whether clicks on fragment-only links are routed.
	pub fn intercept_fragment_links(&self) -> bool {
		self.intercept_fragment_links
	}
}
