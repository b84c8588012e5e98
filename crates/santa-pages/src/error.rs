//! Error types for page enhancements and API calls.

use thiserror::Error;

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;

/// Errors raised by a DOM backend.
///
/// None of these ever reach the end user: enhancement registration logs them
/// and moves on to the next enhancement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomError {
	/// The selector could not be parsed or uses unsupported syntax.
	#[error("invalid selector '{selector}': {reason}")]
	InvalidSelector {
		/// Selector as written.
		selector: String,
		/// What the parser rejected.
		reason: String,
	},

	/// The node handle does not refer to a node of this document.
	#[error("unknown node")]
	UnknownNode,

	/// The operation needs an element but the node is text or the document.
	#[error("node is not an element")]
	NotAnElement,

	/// Inserting the node would make it its own ancestor.
	#[error("hierarchy request: a node cannot contain its own ancestor")]
	HierarchyRequest,

	/// No window or document is available (e.g. running inside a worker).
	#[error("no document available")]
	NoDocument,

	/// An exception thrown by the browser.
	#[error("script error: {0}")]
	Script(String),
}

/// Errors raised while performing an API call.
///
/// These carry diagnostic detail for the developer console only; callers see
/// them wrapped in [`ApiFailure`](crate::api::ApiFailure), whose public message
/// is always the generic fallback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
	/// The request payload could not be serialized as JSON.
	#[error("failed to encode request payload: {0}")]
	Encode(#[source] serde_json::Error),

	/// The request could not be sent or the response body could not be read.
	#[error("request to {url} failed: {source}")]
	Transport {
		/// Target URL.
		url: String,
		/// Underlying client error.
		#[source]
		source: reqwest::Error,
	},

	/// The response body is not valid JSON.
	#[error("response from {url} is not valid JSON: {source}")]
	Decode {
		/// Target URL.
		url: String,
		/// Parser error.
		#[source]
		source: serde_json::Error,
	},
}
