//! JSON API client
//!
//! A thin wrapper around [`reqwest`] for the site's ad-hoc JSON endpoints.
//! Server endpoints answer with a JSON envelope even on 4xx/5xx statuses, so
//! the body is parsed regardless of status and handed back as-is.
//!
//! Failures never surface as `Err`: encoding, transport and decoding errors are
//! logged and folded into [`ApiOutcome::Failure`], whose public message is
//! always [`FALLBACK_MESSAGE`].
//!
//! ## Example
//!
//! ```ignore
//! let outcome = ApiClient::new()
//!     .post("/api/wishlist", &json!({ "item": "Socks" }))
//!     .await;
//! show_outcome(&dom, &container, &outcome)?;
//! ```

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ApiError;
use crate::error_log;

pub use reqwest::Method;

/// Public message of every failed call.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

const APPLICATION_JSON: &str = "application/json";

/// A failed API call.
///
/// The wrapped [`ApiError`] is for diagnostics only; user-facing text comes
/// from [`ApiFailure::message`].
#[derive(Debug)]
pub struct ApiFailure {
	error: ApiError,
}

impl ApiFailure {
	/// Wraps a diagnostic error.
	pub fn new(error: ApiError) -> Self {
		Self { error }
	}

	/// Generic message safe to show to the user.
	pub fn message(&self) -> &'static str {
		FALLBACK_MESSAGE
	}

	/// Diagnostic detail for logs.
	pub fn detail(&self) -> String {
		self.error.to_string()
	}

	/// The underlying error.
	pub fn error(&self) -> &ApiError {
		&self.error
	}
}

impl From<ApiError> for ApiFailure {
	fn from(error: ApiError) -> Self {
		Self::new(error)
	}
}

/// Result of an API call.
#[derive(Debug)]
pub enum ApiOutcome {
	/// The server answered with a JSON body (whatever its HTTP status).
	Success(Value),
	/// The call could not be completed or the answer was not JSON.
	Failure(ApiFailure),
}

impl ApiOutcome {
	/// Whether a JSON body was received.
	///
	/// This says nothing about the envelope's own `success` flag.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	/// The JSON body, or `{ "success": false, "message": "An error occurred" }`
	/// for failures.
	pub fn into_envelope(self) -> Value {
		match self {
			Self::Success(body) => body,
			Self::Failure(failure) => json!({
				"success": false,
				"message": failure.message(),
			}),
		}
	}

	/// Typed view of the body.
	///
	/// Fails only when a received body is not a JSON object.
	pub fn envelope(&self) -> Result<ApiEnvelope, serde_json::Error> {
		match self {
			Self::Success(body) => ApiEnvelope::deserialize(body),
			Self::Failure(_) => Ok(ApiEnvelope::fallback()),
		}
	}
}

/// The `{ success, message, ... }` envelope returned by the site's endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
	/// Whether the server reports success. Missing means `false`.
	#[serde(default)]
	pub success: bool,
	/// Human readable message, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Every other field of the body.
	#[serde(flatten)]
	pub data: Map<String, Value>,
}

impl ApiEnvelope {
	/// The envelope reported for failed calls.
	pub fn fallback() -> Self {
		Self {
			success: false,
			message: Some(FALLBACK_MESSAGE.to_string()),
			data: Map::new(),
		}
	}

	/// A field of the body other than `success` and `message`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}
}

/// HTTP client for JSON endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
	http: reqwest::Client,
	#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
	timeout: Option<Duration>,
}

impl ApiClient {
	/// Creates a client with no request timeout.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps an existing `reqwest` client.
	pub fn with_client(http: reqwest::Client) -> Self {
		Self {
			http,
			timeout: None,
		}
	}

	/// Applies a per-request timeout.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Sends a request and returns the parsed JSON body.
	///
	/// `Content-Type: application/json` is always set; `payload`, when given,
	/// is serialized as the request body.
	pub async fn call<T>(&self, url: &str, method: Method, payload: Option<&T>) -> ApiOutcome
	where
		T: Serialize + ?Sized,
	{
		match self.try_call(url, method, payload).await {
			Ok(body) => ApiOutcome::Success(body),
			Err(err) => {
				error_log!("API Error: {}", err);
				ApiOutcome::Failure(ApiFailure::new(err))
			}
		}
	}

	/// `GET` without a body.
	pub async fn get(&self, url: &str) -> ApiOutcome {
		self.call::<Value>(url, Method::GET, None).await
	}

	/// `POST` with a JSON body.
	pub async fn post<T>(&self, url: &str, payload: &T) -> ApiOutcome
	where
		T: Serialize + ?Sized,
	{
		self.call(url, Method::POST, Some(payload)).await
	}

	async fn try_call<T>(&self, url: &str, method: Method, payload: Option<&T>) -> Result<Value, ApiError>
	where
		T: Serialize + ?Sized,
	{
		let url = resolve_url(url);
		let mut request = self
			.http
			.request(method, &url)
			.header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

		if let Some(payload) = payload {
			let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
			request = request.body(body);
		}

		#[cfg(not(target_arch = "wasm32"))]
		if let Some(timeout) = self.timeout {
			request = request.timeout(timeout);
		}

		let transport = |source| ApiError::Transport {
			url: url.clone(),
			source,
		};
		let response = request.send().await.map_err(transport)?;
		let bytes = response.bytes().await.map_err(transport)?;

		serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
			url: url.clone(),
			source,
		})
	}
}

/// Calls `url` with a one-off client. See [`ApiClient::call`].
pub async fn api_call<T>(url: &str, method: Method, payload: Option<&T>) -> ApiOutcome
where
	T: Serialize + ?Sized,
{
	ApiClient::new().call(url, method, payload).await
}

/// Resolves a relative URL against the page location, as `fetch` does.
#[cfg(target_arch = "wasm32")]
fn resolve_url(url: &str) -> String {
	if reqwest::Url::parse(url).is_ok() {
		return url.to_string();
	}
	web_sys::window()
		.and_then(|window| window.location().href().ok())
		.and_then(|base| reqwest::Url::parse(&base).ok())
		.and_then(|base| base.join(url).ok())
		.map(String::from)
		.unwrap_or_else(|| url.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_url(url: &str) -> String {
	url.to_string()
}
