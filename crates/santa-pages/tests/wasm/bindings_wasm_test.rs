//! JavaScript Export WASM Tests
//!
//! Calls the functions page scripts use (`showSuccess`, `showError`,
//! `showLoading`, `apiCall`) and the module entry point against a real
//! browser document.
//!
//! **Run with**: `wasm-pack test --headless --chrome crates/santa-pages`
//!
//! Test Categories:
//! - Category 1: Entry Point (1 test)
//! - Category 2: Feedback Exports (4 tests)
//! - Category 3: apiCall (2 tests)

#![cfg(target_arch = "wasm32")]

use santa_pages::bindings;
use santa_pages::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> WebDocument {
	let dom = WebDocument::current().unwrap();
	dom.document().body().unwrap().set_inner_html(html);
	dom
}

fn by_id(dom: &WebDocument, id: &str) -> Element {
	dom.element_by_id(id).unwrap()
}

fn field(value: &JsValue, name: &str) -> JsValue {
	js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

fn assert_fallback(envelope: &JsValue) {
	assert_eq!(field(envelope, "success").as_bool(), Some(false));
	assert_eq!(
		field(envelope, "message").as_string().as_deref(),
		Some("An error occurred")
	);
}

// ============================================================================
// Category 1: Entry Point (1 test)
// ============================================================================

/// Tests that starting on an already-loaded document enhances it right away
#[wasm_bindgen_test]
fn test_start_on_loaded_document_runs_immediately() {
	let dom = mount(r#"<input id="invite_code" name="invite_code">"#);
	assert_ne!(dom.document().ready_state(), "loading");

	bindings::start().unwrap();

	let input = by_id(&dom, "invite_code").dyn_into::<HtmlInputElement>().unwrap();
	input.set_value("xmas-24");
	input.dispatch_event(&Event::new("input").unwrap()).unwrap();
	assert_eq!(input.value(), "XMAS24");
}

// ============================================================================
// Category 2: Feedback Exports (4 tests)
// ============================================================================

/// Tests that showSuccess prepends a banner into the page container
#[wasm_bindgen_test]
fn test_show_success_prepends_into_container() {
	let dom = mount(r#"<main class="container"><h1 id="title">My Events</h1></main>"#);

	bindings::show_success("Wishlist saved").unwrap();

	let container = dom.query(".container").unwrap().unwrap();
	let banner = container.first_element_child().unwrap();
	assert!(dom.has_class(&banner, "alert-success"));
	assert!(dom.has_class(&banner, "show"));
	assert_eq!(dom.text_content(&banner), "Wishlist saved");
	assert_eq!(
		banner.next_element_sibling().map(|next| next.id()).as_deref(),
		Some("title")
	);
}

/// Tests that the close button removes the banner
#[wasm_bindgen_test]
fn test_banner_close_button_removes_banner() {
	let dom = mount(r#"<main class="container"></main>"#);
	bindings::show_error("Draw failed").unwrap();
	let banner = dom.query(".alert-danger").unwrap().unwrap();

	let close = dom.query(".btn-close").unwrap().unwrap();
	close.dyn_into::<web_sys::HtmlElement>().unwrap().click();

	assert!(!dom.is_connected(&banner));
}

/// Tests that the banner exports reject when the page has no container
#[wasm_bindgen_test]
fn test_show_error_without_container_rejects() {
	let dom = mount(r#"<div id="content"></div>"#);

	let err = bindings::show_error("Nope").unwrap_err();

	assert!(err.as_string().unwrap().contains(".container"));
	assert!(dom.query(".alert").unwrap().is_none());
}

/// Tests that showLoading swaps the element's content for a spinner
#[wasm_bindgen_test]
fn test_show_loading_replaces_content() {
	let dom = mount(r#"<div id="results"><p>Old results</p></div>"#);
	let results = by_id(&dom, "results");

	bindings::show_loading_spinner(results.clone()).unwrap();

	assert_eq!(results.child_element_count(), 1);
	let spinner = results.first_element_child().unwrap();
	assert!(dom.has_class(&spinner, "spinner-border"));
	assert_eq!(dom.text_content(&results), "Loading...");
}

// ============================================================================
// Category 3: apiCall (2 tests)
// ============================================================================

/// Tests that an unknown method resolves to the fallback envelope
#[wasm_bindgen_test]
async fn test_api_call_invalid_method_resolves_to_fallback() {
	let promise = bindings::api_call(
		"/api/events".to_string(),
		Some("NOT A METHOD".to_string()),
		JsValue::NULL,
	);

	let envelope = JsFuture::from(promise).await.unwrap();

	assert_fallback(&envelope);
}

/// Tests that a relative URL with no method and no data resolves, never rejects
#[wasm_bindgen_test]
async fn test_api_call_relative_url_without_method_resolves() {
	let promise = bindings::api_call(
		"/santa-pages-missing-endpoint".to_string(),
		None,
		JsValue::UNDEFINED,
	);

	let envelope = JsFuture::from(promise).await.unwrap();

	assert_fallback(&envelope);
}
