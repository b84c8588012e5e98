//! JavaScript entry points (wasm32 only).
//!
//! The module initializes the page itself; the exported functions keep the
//! names page scripts already call.

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::api::{ApiClient, ApiEnvelope, Method};
use crate::config::PageConfig;
use crate::dom::WebDocument;
use crate::enhance::initialize_page;
use crate::feedback::{FeedbackBanner, show_loading};
use crate::{error_log, info_log};

fn js_error(err: impl std::fmt::Display) -> JsValue {
	JsValue::from_str(&err.to_string())
}

fn run(dom: &WebDocument) {
	let config = PageConfig::from_document(dom);
	let report = initialize_page(dom, &config);
	info_log!(
		"Page enhanced: {} applied, {} failed",
		report.applied.len(),
		report.failed.len()
	);
}

/// Runs the page enhancements once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	let dom = WebDocument::current().map_err(js_error)?;
	let document = dom.document().clone();

	if document.ready_state() == "loading" {
		let callback = Closure::once_into_js(move || run(&dom));
		document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
	} else {
		run(&dom);
	}
	Ok(())
}

fn banner() -> Result<FeedbackBanner<WebDocument>, JsValue> {
	let dom = WebDocument::current().map_err(js_error)?;
	let config = PageConfig::from_document(&dom);
	FeedbackBanner::from_config(&dom, &config)
		.map_err(js_error)?
		.ok_or_else(|| js_error(format!("no element matches '{}'", config.container_selector)))
}

/// Shows a success banner at the top of the page container.
#[wasm_bindgen(js_name = showSuccess)]
pub fn show_success(message: &str) -> Result<(), JsValue> {
	banner()?.success(message).map_err(js_error)?;
	Ok(())
}

/// Shows an error banner at the top of the page container.
#[wasm_bindgen(js_name = showError)]
pub fn show_error(message: &str) -> Result<(), JsValue> {
	banner()?.error(message).map_err(js_error)?;
	Ok(())
}

/// Replaces the element's content with a loading spinner.
#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading_spinner(element: web_sys::Element) -> Result<(), JsValue> {
	let dom = WebDocument::current().map_err(js_error)?;
	show_loading(&dom, &element).map_err(js_error)?;
	Ok(())
}

fn to_js(value: &Value) -> Result<JsValue, JsValue> {
	let json = serde_json::to_string(value).map_err(js_error)?;
	js_sys::JSON::parse(&json)
}

fn fallback() -> Result<JsValue, JsValue> {
	let envelope = serde_json::to_value(ApiEnvelope::fallback()).map_err(js_error)?;
	to_js(&envelope)
}

fn parse_method(method: Option<&str>) -> Option<Method> {
	let method = method.unwrap_or("GET").to_ascii_uppercase();
	Method::from_bytes(method.as_bytes()).ok()
}

fn payload_from_js(data: &JsValue) -> Result<Option<Value>, String> {
	if data.is_falsy() {
		return Ok(None);
	}
	let json: String = js_sys::JSON::stringify(data)
		.map_err(|err| format!("{:?}", err))?
		.into();
	serde_json::from_str(&json)
		.map(Some)
		.map_err(|err| err.to_string())
}

/// Calls a JSON endpoint and resolves to the response body, or to
/// `{ success: false, message: "An error occurred" }` on failure.
#[wasm_bindgen(js_name = apiCall)]
pub fn api_call(url: String, method: Option<String>, data: JsValue) -> js_sys::Promise {
	let parsed = parse_method(method.as_deref());
	let payload = payload_from_js(&data);

	future_to_promise(async move {
		let Some(method) = parsed else {
			error_log!("API Error: invalid method {:?}", method);
			return fallback();
		};
		let payload = match payload {
			Ok(payload) => payload,
			Err(err) => {
				error_log!("API Error: {}", err);
				return fallback();
			}
		};

		let outcome = ApiClient::new().call(&url, method, payload.as_ref()).await;
		to_js(&outcome.into_envelope())
	})
}
