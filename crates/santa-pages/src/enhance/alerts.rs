//! Alert auto-dismissal.

use std::time::Duration;

use crate::config::PageConfig;
use crate::debug_log;
use crate::dom::PageDom;
use crate::error::DomResult;

/// Bootstrap visibility class, dropped before the node is detached.
const SHOW_CLASS: &str = "show";

/// Schedules removal of every alert present in the document.
pub fn register_alert_dismissal<D: PageDom>(dom: &D, config: &PageConfig) -> DomResult<usize> {
	let alerts = dom.query_all(&config.alert_selector)?;
	let delay = Duration::from_millis(config.alert_dismiss_ms);

	for alert in &alerts {
		schedule_dismissal(dom, alert, delay)?;
	}

	Ok(alerts.len())
}

/// Dismisses `node` after `delay`.
pub fn schedule_dismissal<D: PageDom>(dom: &D, node: &D::Node, delay: Duration) -> DomResult<()> {
	let handle = dom.clone();
	let node = node.clone();
	dom.set_timeout(
		delay,
		Box::new(move || {
			dismiss(&handle, &node);
		}),
	)
}

/// Removes an alert from the document.
///
/// Drops the `show` class, then detaches the node in the same turn. The
/// Bootstrap fade-out transition does not get to play. Returns `false` when
/// the node was already gone (closed by the user or by an earlier timer).
pub fn dismiss<D: PageDom>(dom: &D, node: &D::Node) -> bool {
	if !dom.is_connected(node) {
		return false;
	}
	if let Err(err) = dom.remove_class(node, SHOW_CLASS) {
		debug_log!("Could not drop '{}' before dismissal: {}", SHOW_CLASS, err);
	}
	dom.remove(node);
	true
}
