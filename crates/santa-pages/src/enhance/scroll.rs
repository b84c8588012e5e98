//! Smooth scrolling for in-page links.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::dom::{DomEvent, EventKind, PageDom, ScrollOptions};
use crate::error::DomResult;

/// Target id of a fragment-only href (`#faq` yields `faq`).
///
/// A bare `#` and hrefs that point elsewhere yield `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Replaces the jump to an in-page anchor with a smooth scroll.
///
/// Navigation is always cancelled. The href is read at click time, and a
/// missing target is silently ignored.
pub fn register_smooth_scroll<D: PageDom>(dom: &D, config: &PageConfig) -> DomResult<usize> {
	let anchors = dom.query_all(&config.fragment_link_selector)?;

	for anchor in &anchors {
		let handle = dom.clone();
		let target = anchor.clone();
		dom.listen(
			anchor,
			EventKind::Click,
			Rc::new(move |event: &mut DomEvent| {
				event.prevent_default();
				let destination = handle
					.attribute(&target, "href")
					.and_then(|href| fragment_id(&href).and_then(|id| handle.element_by_id(id)));
				if let Some(destination) = destination {
					handle.scroll_into_view(&destination, ScrollOptions::SMOOTH_START);
				}
			}),
		)?;
	}

	Ok(anchors.len())
}
