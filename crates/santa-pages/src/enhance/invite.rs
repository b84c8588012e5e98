//! Invite-code input normalization.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::dom::{DomEvent, EventKind, PageDom};
use crate::error::DomResult;

/// Uppercases `raw` and keeps only `A-Z` and `0-9`.
///
/// Uppercasing happens first, so lowercase ASCII letters survive while
/// characters whose uppercase form is not ASCII (`ß` becomes `SS`, `é` becomes
/// `É`) follow the uppercase mapping before filtering.
pub fn normalize_invite_code(raw: &str) -> String {
	raw.to_uppercase()
		.chars()
		.filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
		.collect()
}

/// Normalizes the invite-code input on every keystroke.
///
/// Returns `Ok(0)` when the page has no invite-code input.
pub fn register_invite_code_normalizer<D: PageDom>(
	dom: &D,
	config: &PageConfig,
) -> DomResult<usize> {
	match dom.element_by_id(&config.invite_code_id) {
		Some(input) => {
			attach_normalizer(dom, &input)?;
			Ok(1)
		}
		None => Ok(0),
	}
}

/// Rewrites `input`'s value with its normalized form on every input event.
///
/// The value is only written when normalization changes it, so typing an
/// already-normalized code leaves the caret where it is.
pub fn attach_normalizer<D: PageDom>(dom: &D, input: &D::Node) -> DomResult<()> {
	let handle = dom.clone();
	let target = input.clone();

	dom.listen(
		input,
		EventKind::Input,
		Rc::new(move |_: &mut DomEvent| {
			let current = handle.value(&target);
			let normalized = normalize_invite_code(&current);
			if normalized != current {
				handle.set_value(&target, &normalized);
			}
		}),
	)
}
