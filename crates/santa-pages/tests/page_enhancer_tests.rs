//! Page Enhancer Integration Tests
//!
//! Drives `initialize_page` against server-rendered markup built in a
//! `MemoryDocument`, then simulates the user with clicks, keystrokes,
//! submissions and the passage of time.
//!
//! Test Categories:
//! - Category 1: Alert Auto-Dismiss (4 tests)
//! - Category 2: Form Guard (4 tests)
//! - Category 3: Invite Code Normalizer (3 tests)
//! - Category 4: Password Confirmation (4 tests)
//! - Category 5: Smooth Scroll (3 tests)
//! - Category 6: Card Fade-In (2 tests)
//! - Category 7: Isolation and Configuration (3 tests)

use std::time::Duration;

use rstest::{fixture, rstest};
use santa_pages::dom::{ScrollOptions, ScrollRecord};
use santa_pages::enhance::{Enhancement, dismiss, initialize_page};
use santa_pages::prelude::*;

fn element(dom: &MemoryDocument, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
	attrs
		.iter()
		.fold(ElementBuilder::new(dom, tag), |builder, (name, value)| {
			builder.attr(name, value)
		})
		.append_to(&parent)
		.unwrap()
}

/// A join page: flash message, join form and a password form.
struct JoinPage {
	dom: MemoryDocument,
	flash: NodeId,
	join_form: NodeId,
	invite_code: NodeId,
	signup_form: NodeId,
	password: NodeId,
	confirm: NodeId,
}

#[fixture]
fn page() -> JoinPage {
	let dom = MemoryDocument::new();
	let container = element(&dom, dom.body(), "div", &[("class", "container")]);
	let flash = element(
		&dom,
		container,
		"div",
		&[("class", "alert alert-info alert-dismissible fade show")],
	);

	let join_form = element(&dom, container, "form", &[("method", "post"), ("novalidate", "")]);
	let invite_code = element(
		&dom,
		join_form,
		"input",
		&[("id", "invite_code"), ("name", "invite_code"), ("required", "")],
	);

	let signup_form = element(&dom, container, "form", &[("method", "post"), ("novalidate", "")]);
	let password = element(
		&dom,
		signup_form,
		"input",
		&[("id", "password"), ("type", "password"), ("required", "")],
	);
	let confirm = element(
		&dom,
		signup_form,
		"input",
		&[("id", "confirm_password"), ("type", "password"), ("required", "")],
	);

	JoinPage {
		dom,
		flash,
		join_form,
		invite_code,
		signup_form,
		password,
		confirm,
	}
}

// ============================================================================
// Category 1: Alert Auto-Dismiss (4 tests)
// ============================================================================

/// Tests that alerts present at load are gone after five seconds
#[rstest]
fn test_alert_removed_after_five_seconds(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.advance(Duration::from_millis(5000));

	assert!(!page.dom.is_connected(&page.flash));
	assert!(page.dom.query_all(".alert").unwrap().is_empty());
}

/// Tests that alerts are still visible just before the deadline
#[rstest]
fn test_alert_kept_before_deadline(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.advance(Duration::from_millis(4999));

	assert!(page.dom.is_connected(&page.flash));
	assert!(page.dom.has_class(&page.flash, "show"));
}

/// Tests that a manual close followed by the timer is harmless
#[rstest]
fn test_manual_close_then_timer(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	assert!(dismiss(&page.dom, &page.flash));
	assert_eq!(page.dom.advance(Duration::from_millis(5000)), 1);
	assert!(!page.dom.is_connected(&page.flash));
}

/// Tests that alerts created after load are not scheduled
#[rstest]
fn test_alert_added_after_load_is_kept(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());
	let container = page.dom.query(".container").unwrap().unwrap();
	let banner = show_success(&page.dom, &container, "Saved").unwrap();

	page.dom.advance(Duration::from_secs(60));

	assert!(page.dom.is_connected(&banner));
}

// ============================================================================
// Category 2: Form Guard (4 tests)
// ============================================================================

/// Tests that an invalid submission is cancelled and marked validated
#[rstest]
fn test_invalid_submit_is_cancelled(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	assert!(!page.dom.submit(page.join_form));
	assert!(page.dom.has_class(&page.join_form, "was-validated"));
}

/// Tests that a valid submission proceeds and is marked validated
#[rstest]
fn test_valid_submit_proceeds(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());
	page.dom.type_into(page.invite_code, "XMAS2024");

	assert!(page.dom.submit(page.join_form));
	assert!(page.dom.has_class(&page.join_form, "was-validated"));
}

/// Tests that a cancelled submission does not reach ancestor listeners
#[rstest]
fn test_invalid_submit_stops_propagation(page: JoinPage) {
	use std::cell::Cell;
	use std::rc::Rc;

	let reached = Rc::new(Cell::new(false));
	let flag = reached.clone();
	page.dom
		.listen(
			&page.dom.body(),
			EventKind::Submit,
			Rc::new(move |_: &mut DomEvent| flag.set(true)),
		)
		.unwrap();
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.submit(page.join_form);

	assert!(!reached.get());
}

/// Tests that repeated attempts keep a single validated class
#[rstest]
fn test_repeated_attempts_are_idempotent(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.submit(page.join_form);
	page.dom.submit(page.join_form);

	let classes = page.dom.attribute(&page.join_form, "class").unwrap();
	assert_eq!(classes, "was-validated");
}

// ============================================================================
// Category 3: Invite Code Normalizer (3 tests)
// ============================================================================

/// Tests that typed codes are uppercased and filtered
#[rstest]
#[case("abc-123", "ABC123")]
#[case("xmas 2024!", "XMAS2024")]
#[case("ABC123", "ABC123")]
fn test_typed_code_is_normalized(page: JoinPage, #[case] typed: &str, #[case] expected: &str) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.type_into(page.invite_code, typed);

	assert_eq!(page.dom.value(&page.invite_code), expected);
}

/// Tests that pages without an invite-code input are untouched
#[rstest]
fn test_missing_input_is_not_an_error() {
	let dom = MemoryDocument::new();
	let report = initialize_page(&dom, &PageConfig::default());

	assert_eq!(report.count(Enhancement::InviteCodeNormalizer), Some(0));
}

/// Tests a custom invite-code id
#[rstest]
fn test_custom_invite_code_id() {
	let dom = MemoryDocument::new();
	let input = element(&dom, dom.body(), "input", &[("id", "code")]);
	let config = PageConfig::default().with_invite_code_id("code");
	initialize_page(&dom, &config);

	dom.type_into(input, "ab-cd");

	assert_eq!(dom.value(&input), "ABCD");
}

// ============================================================================
// Category 4: Password Confirmation (4 tests)
// ============================================================================

/// Tests that a mismatching confirmation is invalid
#[rstest]
fn test_mismatch_sets_custom_validity(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.type_into(page.password, "hunter22");
	page.dom.type_into(page.confirm, "hunter2");

	assert_eq!(page.dom.validation_message(&page.confirm), "Passwords do not match");
	assert!(!page.dom.check_validity(&page.confirm));
	assert!(!page.dom.submit(page.signup_form));
}

/// Tests that matching values clear the message
#[rstest]
fn test_match_clears_custom_validity(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.type_into(page.confirm, "hunter22");
	assert!(!page.dom.check_validity(&page.confirm));

	page.dom.type_into(page.password, "hunter22");
	assert_eq!(page.dom.validation_message(&page.confirm), "");
	assert!(page.dom.submit(page.signup_form));
}

/// Tests that editing the password re-validates the confirmation
#[rstest]
fn test_editing_password_revalidates(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());
	page.dom.type_into(page.password, "hunter22");
	page.dom.type_into(page.confirm, "hunter22");

	page.dom.type_into(page.password, "hunter23");

	assert_eq!(page.dom.validation_message(&page.confirm), "Passwords do not match");
}

/// Tests that two empty fields count as matching
#[rstest]
fn test_both_empty_match(page: JoinPage) {
	initialize_page(&page.dom, &PageConfig::default());

	page.dom.type_into(page.password, "x");
	page.dom.type_into(page.password, "");

	// Still invalid through `required`, but not through the mismatch message.
	assert_eq!(page.dom.validation_message(&page.confirm), "Please fill out this field.");
}

// ============================================================================
// Category 5: Smooth Scroll (3 tests)
// ============================================================================

/// Tests that in-page links scroll smoothly instead of jumping
#[rstest]
fn test_fragment_link_scrolls_smoothly() {
	let dom = MemoryDocument::new();
	let link = element(&dom, dom.body(), "a", &[("href", "#faq")]);
	let faq = element(&dom, dom.body(), "section", &[("id", "faq")]);
	initialize_page(&dom, &PageConfig::default());

	assert!(!dom.click(link));
	assert_eq!(
		dom.scroll_log(),
		vec![ScrollRecord {
			node: faq,
			options: ScrollOptions::SMOOTH_START,
		}]
	);
}

/// Tests that links to missing targets and bare `#` do nothing but still
/// cancel navigation
#[rstest]
#[case("#nowhere")]
#[case("#")]
fn test_missing_target_is_ignored(#[case] href: &str) {
	let dom = MemoryDocument::new();
	let link = element(&dom, dom.body(), "a", &[("href", href)]);
	initialize_page(&dom, &PageConfig::default());

	assert!(!dom.click(link));
	assert!(dom.scroll_log().is_empty());
}

/// Tests that links to other pages are left alone
#[rstest]
fn test_external_link_untouched() {
	let dom = MemoryDocument::new();
	let link = element(&dom, dom.body(), "a", &[("href", "/events#faq")]);
	let report = initialize_page(&dom, &PageConfig::default());

	assert_eq!(report.count(Enhancement::SmoothScroll), Some(0));
	assert!(dom.click(link));
}

// ============================================================================
// Category 6: Card Fade-In (2 tests)
// ============================================================================

/// Tests that cards get increasing delays and the fade-in class
#[rstest]
fn test_cards_are_staggered() {
	let dom = MemoryDocument::new();
	let cards: Vec<_> = (0..4)
		.map(|_| element(&dom, dom.body(), "div", &[("class", "card")]))
		.collect();
	let report = initialize_page(&dom, &PageConfig::default());

	assert_eq!(report.count(Enhancement::CardFadeIn), Some(4));
	let delays: Vec<_> = cards
		.iter()
		.map(|card| dom.style(*card, "animation-delay").unwrap())
		.collect();
	assert_eq!(delays, ["0s", "0.1s", "0.2s", "0.3s"]);
	assert!(cards.iter().all(|card| dom.has_class(card, "fade-in")));
}

/// Tests a configured stagger step
#[rstest]
fn test_custom_stagger_step() {
	let dom = MemoryDocument::new();
	element(&dom, dom.body(), "div", &[("class", "card")]);
	let second = element(&dom, dom.body(), "div", &[("class", "card")]);
	initialize_page(&dom, &PageConfig::default().with_card_stagger_ms(250));

	assert_eq!(dom.style(second, "animation-delay").as_deref(), Some("0.25s"));
}

// ============================================================================
// Category 7: Isolation and Configuration (3 tests)
// ============================================================================

/// Tests that a failing enhancement does not stop the others
#[rstest]
fn test_failure_is_isolated(page: JoinPage) {
	let config = PageConfig::default().with_alert_selector(".container > .alert");
	let report = initialize_page(&page.dom, &config);

	assert!(!report.is_clean());
	assert_eq!(report.failed[0].0, Enhancement::AlertDismissal);
	assert_eq!(report.count(Enhancement::FormGuard), Some(2));
	assert_eq!(page.dom.listener_count(page.join_form, EventKind::Submit), 1);
	assert_eq!(page.dom.pending_timers(), 0);
}

/// Tests the counts reported for the join page
#[rstest]
fn test_report_counts(page: JoinPage) {
	let report = initialize_page(&page.dom, &PageConfig::default());

	assert!(report.is_clean());
	assert_eq!(report.count(Enhancement::AlertDismissal), Some(1));
	assert_eq!(report.count(Enhancement::FormGuard), Some(2));
	assert_eq!(report.count(Enhancement::InviteCodeNormalizer), Some(1));
	assert_eq!(report.count(Enhancement::PasswordConfirmation), Some(2));
}

/// Tests that the configuration island is honored
#[rstest]
fn test_config_island(page: JoinPage) {
	ElementBuilder::new(&page.dom, "script")
		.id("santa-config")
		.attr("type", "application/json")
		.text(r#"{ "alert_dismiss_ms": 8000 }"#)
		.append_to(&page.dom.head())
		.unwrap();
	let config = PageConfig::from_document(&page.dom);
	initialize_page(&page.dom, &config);

	page.dom.advance(Duration::from_millis(5000));
	assert!(page.dom.is_connected(&page.flash));
	page.dom.advance(Duration::from_millis(3000));
	assert!(!page.dom.is_connected(&page.flash));
}
