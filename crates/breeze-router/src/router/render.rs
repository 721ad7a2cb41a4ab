//! Render collaborator contract.

use super::route::RouteParams;

/// Swaps the outlet's content for a matched route.
///
/// Called once per committed transition. Errors are logged by the
/// controller and never change its navigation state.
pub trait Renderer<C> {
	/// Renders `content` with the captured `params`.
	fn render(&self, content: &C, params: &RouteParams) -> anyhow::Result<()>;
}

impl<C, F> Renderer<C> for F
where
	F: Fn(&C, &RouteParams) -> anyhow::Result<()>,
{
	fn render(&self, content: &C, params: &RouteParams) -> anyhow::Result<()> {
		self(content, params)
	}
}
