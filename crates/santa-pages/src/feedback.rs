//! Feedback banners
//!
//! Success and error banners rendered with Bootstrap's dismissible alert
//! markup, plus a loading spinner placeholder:
//!
//! ```html
//! <div class="alert alert-success alert-dismissible fade show" role="alert">
//!   Saved
//!   <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
//! </div>
//! ```
//!
//! Messages are inserted as text nodes and are never parsed as markup. Banners
//! stack: each new one becomes the first child of the container.

use std::rc::Rc;
use std::time::Duration;

use crate::api::{ApiOutcome, FALLBACK_MESSAGE};
use crate::builder::ElementBuilder;
use crate::config::PageConfig;
use crate::dom::{DomEvent, EventKind, PageDom};
use crate::enhance::{dismiss, schedule_dismissal};
use crate::error::DomResult;
use crate::warn_log;

/// Banner flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
	/// Green confirmation banner.
	Success,
	/// Red error banner.
	Error,
}

impl BannerKind {
	/// Bootstrap contextual class.
	pub fn class(self) -> &'static str {
		match self {
			Self::Success => "alert-success",
			Self::Error => "alert-danger",
		}
	}
}

/// Renders banners into one container.
#[derive(Debug, Clone)]
pub struct FeedbackBanner<D: PageDom> {
	dom: D,
	container: D::Node,
	auto_dismiss: Option<Duration>,
}

impl<D: PageDom> FeedbackBanner<D> {
	/// Banners go into `container` and stay until closed.
	pub fn new(dom: &D, container: D::Node) -> Self {
		Self {
			dom: dom.clone(),
			container,
			auto_dismiss: None,
		}
	}

	/// Locates the configured container and applies the configured
	/// auto-dismiss delay. Returns `Ok(None)` when the page has no container.
	pub fn from_config(dom: &D, config: &PageConfig) -> DomResult<Option<Self>> {
		let Some(container) = locate_container(dom, config)? else {
			return Ok(None);
		};
		let mut banner = Self::new(dom, container);
		banner.auto_dismiss = config.banner_auto_dismiss_ms.map(Duration::from_millis);
		Ok(Some(banner))
	}

	/// Removes each banner `delay` after it is shown.
	pub fn with_auto_dismiss(mut self, delay: Duration) -> Self {
		self.auto_dismiss = Some(delay);
		self
	}

	/// The container banners are inserted into.
	pub fn container(&self) -> &D::Node {
		&self.container
	}

	/// Shows a success banner.
	pub fn success(&self, message: &str) -> DomResult<D::Node> {
		self.show(BannerKind::Success, message)
	}

	/// Shows an error banner.
	pub fn error(&self, message: &str) -> DomResult<D::Node> {
		self.show(BannerKind::Error, message)
	}

	/// Shows a banner of the given kind.
	pub fn show(&self, kind: BannerKind, message: &str) -> DomResult<D::Node> {
		let banner = render_banner(&self.dom, &self.container, kind, message)?;
		if let Some(delay) = self.auto_dismiss {
			schedule_dismissal(&self.dom, &banner, delay)?;
		}
		Ok(banner)
	}

	/// Shows the banner matching an API outcome. See [`show_outcome`].
	pub fn outcome(&self, outcome: &ApiOutcome) -> DomResult<Option<D::Node>> {
		match outcome_banner(outcome) {
			Some((kind, message)) => self.show(kind, &message).map(Some),
			None => Ok(None),
		}
	}
}

/// Inserts a success banner as the first child of `container`.
pub fn show_success<D: PageDom>(dom: &D, container: &D::Node, message: &str) -> DomResult<D::Node> {
	render_banner(dom, container, BannerKind::Success, message)
}

/// Inserts an error banner as the first child of `container`.
pub fn show_error<D: PageDom>(dom: &D, container: &D::Node, message: &str) -> DomResult<D::Node> {
	render_banner(dom, container, BannerKind::Error, message)
}

/// Replaces the children of `element` with a loading spinner.
pub fn show_loading<D: PageDom>(dom: &D, element: &D::Node) -> DomResult<D::Node> {
	dom.clear_children(element)?;
	let label = ElementBuilder::new(dom, "span")
		.class("visually-hidden")
		.text("Loading...")
		.build()?;
	ElementBuilder::new(dom, "div")
		.class("spinner-border text-primary")
		.attr("role", "status")
		.child(&label)
		.append_to(element)
}

/// Shows a banner for an API outcome.
///
/// A body whose `success` flag is true becomes a success banner with its
/// `message`; a body reporting failure becomes an error banner with its
/// `message` (or the generic fallback); a failed call becomes an error banner
/// with the generic fallback. A successful body without a message shows
/// nothing.
pub fn show_outcome<D: PageDom>(
	dom: &D,
	container: &D::Node,
	outcome: &ApiOutcome,
) -> DomResult<Option<D::Node>> {
	match outcome_banner(outcome) {
		Some((kind, message)) => render_banner(dom, container, kind, &message).map(Some),
		None => Ok(None),
	}
}

/// The page's primary container, if present.
pub fn locate_container<D: PageDom>(dom: &D, config: &PageConfig) -> DomResult<Option<D::Node>> {
	dom.query(&config.container_selector)
}

fn outcome_banner(outcome: &ApiOutcome) -> Option<(BannerKind, String)> {
	let envelope = match outcome.envelope() {
		Ok(envelope) => envelope,
		Err(err) => {
			warn_log!("Response is not an envelope: {}", err);
			return None;
		}
	};

	if envelope.success {
		envelope.message.map(|message| (BannerKind::Success, message))
	} else {
		let message = envelope
			.message
			.unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
		Some((BannerKind::Error, message))
	}
}

fn render_banner<D: PageDom>(
	dom: &D,
	container: &D::Node,
	kind: BannerKind,
	message: &str,
) -> DomResult<D::Node> {
	let close = ElementBuilder::new(dom, "button")
		.attr("type", "button")
		.class("btn-close")
		.attr("data-bs-dismiss", "alert")
		.attr("aria-label", "Close")
		.build()?;

	let banner = ElementBuilder::new(dom, "div")
		.class("alert")
		.class(kind.class())
		.class("alert-dismissible fade show")
		.attr("role", "alert")
		.text(message)
		.child(&close)
		.prepend_to(container)?;

	let handle = dom.clone();
	let target = banner.clone();
	dom.listen(
		&close,
		EventKind::Click,
		Rc::new(move |_: &mut DomEvent| {
			dismiss(&handle, &target);
		}),
	)?;

	Ok(banner)
}
