//! Router error types.

/// Errors reported by the router.
///
/// Configuration errors are fatal and surface from
/// [`NavigationController::start`](super::NavigationController::start).
/// Failures raised while a transition is running (handler or render errors,
/// unmatched paths) are recovered inside the controller and never reach
/// the caller through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// No route was registered as the not-found fallback.
	#[error("no not-found route registered")]
	MissingSentinel,
	/// More than one route was registered as the not-found fallback.
	#[error("{count} not-found routes registered, expected exactly one")]
	DuplicateSentinel {
		/// Number of routes carrying the not-found flag.
		count: usize,
	},
	/// A route pattern is malformed.
	#[error("invalid route pattern `{pattern}`: {reason}")]
	InvalidPattern {
		/// The offending pattern.
		pattern: String,
		/// Why the pattern was rejected.
		reason: &'static str,
	},
	/// A parameter name appears twice in the same pattern.
	#[error("parameter `{name}` appears more than once in `{pattern}`")]
	DuplicateParameter {
		/// The offending pattern.
		pattern: String,
		/// The repeated parameter name.
		name: String,
	},
	/// `start()` was called on a controller that is already running.
	#[error("router already started")]
	AlreadyStarted,
	/// The history adapter failed to record an entry.
	#[error("history update failed: {0}")]
	History(String),
	/// A DOM listener could not be attached.
	#[error("DOM listener setup failed: {0}")]
	Listener(String),
}

/// Errors raised by typed parameter access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
	/// The matched route has no parameter with this name.
	#[error("missing path parameter `{name}`")]
	Missing {
		/// Requested parameter name.
		name: String,
	},
	/// The parameter value could not be parsed into the requested type.
	#[error("failed to parse parameter `{name}` from `{raw}` as {type_name}: {message}")]
	Parse {
		/// Parameter name.
		name: String,
		/// The decoded value that failed to parse.
		raw: String,
		/// Target type name.
		type_name: &'static str,
		/// Parser error message.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(RouterError::MissingSentinel, "no not-found route registered")]
	#[case(
		RouterError::DuplicateSentinel { count: 2 },
		"2 not-found routes registered, expected exactly one"
	)]
	#[case(RouterError::AlreadyStarted, "router already started")]
	#[case(
		RouterError::History("SecurityError".to_string()),
		"history update failed: SecurityError"
	)]
	#[case(
		RouterError::Listener("TypeError".to_string()),
		"DOM listener setup failed: TypeError"
	)]
	fn test_router_error_display(#[case] error: RouterError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}

	#[rstest]
	fn test_param_error_display() {
		let error = ParamError::Parse {
			name: "id".to_string(),
			raw: "abc".to_string(),
			type_name: "u32",
			message: "invalid digit found in string".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"failed to parse parameter `id` from `abc` as u32: invalid digit found in string"
		);
	}
}
