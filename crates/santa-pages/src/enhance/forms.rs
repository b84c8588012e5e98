//! Submit-time validation and password confirmation.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::dom::{DomEvent, EventHandler, EventKind, PageDom};
use crate::error::DomResult;
use crate::warn_log;

/// Guards every form matched by the configured selector.
pub fn register_form_guards<D: PageDom>(dom: &D, config: &PageConfig) -> DomResult<usize> {
	let forms = dom.query_all(&config.form_selector)?;

	for form in &forms {
		guard_form(dom, form, &config.validated_class)?;
	}

	Ok(forms.len())
}

/// Blocks submission of `form` while any of its controls is invalid.
///
/// Every attempt, valid or not, adds `validated_class` so the stylesheet can
/// reveal per-field feedback.
pub fn guard_form<D: PageDom>(dom: &D, form: &D::Node, validated_class: &str) -> DomResult<()> {
	let handle = dom.clone();
	let target = form.clone();
	let validated_class = validated_class.to_string();

	dom.listen(
		form,
		EventKind::Submit,
		Rc::new(move |event: &mut DomEvent| {
			if !handle.check_validity(&target) {
				event.prevent_default();
				event.stop_propagation();
			}
			if let Err(err) = handle.add_class(&target, &validated_class) {
				warn_log!("Could not mark form as validated: {}", err);
			}
		}),
	)
}

/// Whether the confirmation matches the password.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
	password == confirmation
}

/// Sets or clears the mismatch message on `confirmation`.
///
/// Returns whether the two values match.
pub fn sync_confirmation_validity<D: PageDom>(
	dom: &D,
	password: &D::Node,
	confirmation: &D::Node,
	mismatch_message: &str,
) -> bool {
	let matched = passwords_match(&dom.value(password), &dom.value(confirmation));
	let message = if matched { "" } else { mismatch_message };
	dom.set_custom_validity(confirmation, message);
	matched
}

/// Cross-validates the password and confirmation inputs.
///
/// Returns `Ok(0)` without registering anything unless both inputs exist.
pub fn register_password_confirmation<D: PageDom>(
	dom: &D,
	config: &PageConfig,
) -> DomResult<usize> {
	let (Some(password), Some(confirmation)) = (
		dom.element_by_id(&config.password_id),
		dom.element_by_id(&config.confirm_password_id),
	) else {
		return Ok(0);
	};

	let sync: EventHandler = {
		let handle = dom.clone();
		let password = password.clone();
		let confirmation = confirmation.clone();
		let message = config.password_mismatch_message.clone();
		Rc::new(move |_: &mut DomEvent| {
			sync_confirmation_validity(&handle, &password, &confirmation, &message);
		})
	};

	dom.listen(&password, EventKind::Input, sync.clone())?;
	dom.listen(&confirmation, EventKind::Input, sync)?;

	Ok(2)
}
