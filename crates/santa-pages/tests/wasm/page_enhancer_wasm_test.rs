//! Page Enhancer WASM Tests
//!
//! Runs `initialize_page` over a real browser document through `WebDocument`
//! and drives it with dispatched DOM events, so the listener, validity and
//! timer plumbing of the browser backend is exercised end to end.
//!
//! **Run with**: `wasm-pack test --headless --chrome crates/santa-pages`
//!
//! Test Categories:
//! - Category 1: Form Guard (2 tests)
//! - Category 2: Input Handling (3 tests)
//! - Category 3: Navigation and Styling (2 tests)
//! - Category 4: Timers (1 test)

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use santa_pages::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

/// Replaces the body with `html` and returns the live document.
fn mount(html: &str) -> WebDocument {
	let dom = WebDocument::current().unwrap();
	dom.document().body().unwrap().set_inner_html(html);
	dom
}

fn by_id(dom: &WebDocument, id: &str) -> Element {
	dom.element_by_id(id).unwrap()
}

fn input(dom: &WebDocument, id: &str) -> HtmlInputElement {
	by_id(dom, id).dyn_into::<HtmlInputElement>().unwrap()
}

/// Dispatches a bubbling, cancelable event; `false` means it was cancelled.
fn fire(target: &Element, name: &str) -> bool {
	let init = EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = Event::new_with_event_init_dict(name, &init).unwrap();
	target.dispatch_event(&event).unwrap()
}

fn type_into(field: &HtmlInputElement, value: &str) {
	field.set_value(value);
	fire(field, "input");
}

// ============================================================================
// Category 1: Form Guard (2 tests)
// ============================================================================

/// Tests that an invalid submit is cancelled, kept from bubbling and marked validated
#[wasm_bindgen_test]
fn test_invalid_submit_is_cancelled() {
	let dom = mount(
		r#"<div id="outer">
			<form id="join" novalidate><input id="name" name="name" required></form>
		</div>"#,
	);
	let report = initialize_page(&dom, &PageConfig::default());
	assert!(report.is_clean());
	assert_eq!(report.count(Enhancement::FormGuard), Some(1));

	let reached_outer = Rc::new(Cell::new(0));
	let counter = reached_outer.clone();
	dom.listen(
		&by_id(&dom, "outer"),
		EventKind::Submit,
		Rc::new(move |_: &mut DomEvent| counter.set(counter.get() + 1)),
	)
	.unwrap();

	let form = by_id(&dom, "join");
	assert!(!fire(&form, "submit"));
	assert!(dom.has_class(&form, "was-validated"));
	assert_eq!(reached_outer.get(), 0);
}

/// Tests that a valid submit goes through and still bubbles
#[wasm_bindgen_test]
fn test_valid_submit_proceeds() {
	let dom = mount(
		r#"<div id="outer">
			<form id="join" novalidate><input id="name" name="name" required></form>
		</div>"#,
	);
	initialize_page(&dom, &PageConfig::default());

	let reached_outer = Rc::new(Cell::new(0));
	let counter = reached_outer.clone();
	dom.listen(
		&by_id(&dom, "outer"),
		EventKind::Submit,
		Rc::new(move |_: &mut DomEvent| counter.set(counter.get() + 1)),
	)
	.unwrap();
	input(&dom, "name").set_value("Robin");

	let form = by_id(&dom, "join");
	assert!(fire(&form, "submit"));
	assert!(dom.has_class(&form, "was-validated"));
	assert_eq!(reached_outer.get(), 1);
}

// ============================================================================
// Category 2: Input Handling (3 tests)
// ============================================================================

/// Tests that typed invite codes are normalized in the live field
#[wasm_bindgen_test]
fn test_invite_code_is_normalized() {
	let dom = mount(r#"<input id="invite_code" name="invite_code">"#);
	initialize_page(&dom, &PageConfig::default());
	let field = input(&dom, "invite_code");

	type_into(&field, "ab-12 cd");

	assert_eq!(field.value(), "AB12CD");
}

/// Tests that a mismatched confirmation reports the browser validation message
#[wasm_bindgen_test]
fn test_password_mismatch_sets_validation_message() {
	let dom = mount(
		r#"<input id="password" type="password">
		<input id="confirm_password" type="password">"#,
	);
	initialize_page(&dom, &PageConfig::default());
	let confirm = input(&dom, "confirm_password");

	input(&dom, "password").set_value("hunter22");
	type_into(&confirm, "hunter2");

	assert_eq!(confirm.validation_message().unwrap(), "Passwords do not match");
	assert!(!confirm.check_validity());
}

/// Tests that fixing the password clears the confirmation's message
#[wasm_bindgen_test]
fn test_password_match_clears_validation_message() {
	let dom = mount(
		r#"<input id="password" type="password">
		<input id="confirm_password" type="password">"#,
	);
	initialize_page(&dom, &PageConfig::default());
	let password = input(&dom, "password");
	let confirm = input(&dom, "confirm_password");

	type_into(&password, "hunter2");
	type_into(&confirm, "hunter22");
	type_into(&password, "hunter22");

	assert_eq!(dom.validation_message(&by_id(&dom, "confirm_password")), "");
	assert!(confirm.check_validity());
}

// ============================================================================
// Category 3: Navigation and Styling (2 tests)
// ============================================================================

/// Tests that in-page links do not navigate
#[wasm_bindgen_test]
fn test_fragment_link_click_is_cancelled() {
	let dom = mount(
		r##"<a id="to-faq" href="#faq">FAQ</a>
		<section id="faq">Questions</section>"##,
	);
	initialize_page(&dom, &PageConfig::default());
	let location = web_sys::window().unwrap().location();
	let before = location.hash().unwrap();

	assert!(!fire(&by_id(&dom, "to-faq"), "click"));
	assert_eq!(location.hash().unwrap(), before);
}

/// Tests that cards receive staggered delays as inline styles
#[wasm_bindgen_test]
fn test_cards_get_staggered_delays() {
	let dom = mount(
		r#"<div id="c0" class="card"></div>
		<div id="c1" class="card"></div>
		<div id="c2" class="card"></div>"#,
	);
	initialize_page(&dom, &PageConfig::default());

	let delay = |id: &str| {
		by_id(&dom, id)
			.dyn_into::<HtmlElement>()
			.unwrap()
			.style()
			.get_property_value("animation-delay")
			.unwrap()
	};
	assert_eq!(delay("c0"), "0s");
	assert_eq!(delay("c2"), "0.2s");
	assert!(dom.has_class(&by_id(&dom, "c1"), "fade-in"));
}

// ============================================================================
// Category 4: Timers (1 test)
// ============================================================================

/// Tests that the browser timer removes alerts after the configured delay
#[wasm_bindgen_test]
async fn test_alert_removed_by_browser_timer() {
	let dom = mount(r#"<div id="flash" class="alert alert-info fade show">Saved</div>"#);
	let config = PageConfig::default().with_alert_dismiss_ms(20);
	initialize_page(&dom, &config);
	let flash = by_id(&dom, "flash");

	assert!(dom.is_connected(&flash));
	TimeoutFuture::new(100).await;
	assert!(!dom.is_connected(&flash));
	assert!(!dom.has_class(&flash, "show"));
}
