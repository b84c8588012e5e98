//! Page load enhancements
//!
//! [`initialize_page`] runs once per page load, after the document is parsed,
//! and wires every enhancement against the server-rendered markup:
//!
//! | Enhancement | Targets | Effect |
//! |-------------|---------|--------|
//! | [`Enhancement::AlertDismissal`] | `.alert` | removed after 5 s |
//! | [`Enhancement::FormGuard`] | `form` | invalid submits cancelled, `was-validated` added |
//! | [`Enhancement::InviteCodeNormalizer`] | `#invite_code` | value uppercased and filtered to `A-Z0-9` |
//! | [`Enhancement::PasswordConfirmation`] | `#password`, `#confirm_password` | mismatch reported through custom validity |
//! | [`Enhancement::SmoothScroll`] | `a[href^="#"]` | smooth scroll to the fragment target |
//! | [`Enhancement::CardFadeIn`] | `.card` | staggered `fade-in` entrance |
//!
//! Each enhancement is also exposed as a `register_*` function that can be
//! called on its own. Enhancements are independent: a failing registration is
//! logged and recorded in the [`EnhanceReport`], and the rest still run.

mod alerts;
mod cards;
mod forms;
mod invite;
mod scroll;

use std::fmt;

pub use alerts::{dismiss, register_alert_dismissal, schedule_dismissal};
pub use cards::{format_seconds, register_card_fade_in, stagger_delay};
pub use forms::{
	guard_form, passwords_match, register_form_guards, register_password_confirmation,
	sync_confirmation_validity,
};
pub use invite::{attach_normalizer, normalize_invite_code, register_invite_code_normalizer};
pub use scroll::{fragment_id, register_smooth_scroll};

use crate::config::PageConfig;
use crate::dom::PageDom;
use crate::error::{DomError, DomResult};
use crate::{debug_log, warn_log};

/// The individual page enhancements, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enhancement {
	/// Timed removal of alerts present at load.
	AlertDismissal,
	/// Submit-time constraint validation.
	FormGuard,
	/// Invite-code input normalization.
	InviteCodeNormalizer,
	/// Password confirmation cross-validation.
	PasswordConfirmation,
	/// Smooth scrolling for in-page links.
	SmoothScroll,
	/// Staggered card entrance animation.
	CardFadeIn,
}

impl Enhancement {
	/// Every enhancement, in registration order.
	pub const ALL: [Self; 6] = [
		Self::AlertDismissal,
		Self::FormGuard,
		Self::InviteCodeNormalizer,
		Self::PasswordConfirmation,
		Self::SmoothScroll,
		Self::CardFadeIn,
	];

	/// Stable name used in log output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::AlertDismissal => "alert-dismissal",
			Self::FormGuard => "form-guard",
			Self::InviteCodeNormalizer => "invite-code-normalizer",
			Self::PasswordConfirmation => "password-confirmation",
			Self::SmoothScroll => "smooth-scroll",
			Self::CardFadeIn => "card-fade-in",
		}
	}

	/// Registers this enhancement, returning the number of nodes it touched.
	pub fn register<D: PageDom>(self, dom: &D, config: &PageConfig) -> DomResult<usize> {
		match self {
			Self::AlertDismissal => register_alert_dismissal(dom, config),
			Self::FormGuard => register_form_guards(dom, config),
			Self::InviteCodeNormalizer => register_invite_code_normalizer(dom, config),
			Self::PasswordConfirmation => register_password_confirmation(dom, config),
			Self::SmoothScroll => register_smooth_scroll(dom, config),
			Self::CardFadeIn => register_card_fade_in(dom, config),
		}
	}
}

impl fmt::Display for Enhancement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of [`initialize_page`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhanceReport {
	/// Enhancements that registered, with the number of nodes each touched.
	pub applied: Vec<(Enhancement, usize)>,
	/// Enhancements whose registration failed.
	pub failed: Vec<(Enhancement, DomError)>,
}

impl EnhanceReport {
	/// Number of nodes touched by `enhancement`, `None` if it failed.
	pub fn count(&self, enhancement: Enhancement) -> Option<usize> {
		self.applied
			.iter()
			.find(|(e, _)| *e == enhancement)
			.map(|(_, count)| *count)
	}

	/// Whether every enhancement registered.
	pub fn is_clean(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Wires every enhancement into the document.
///
/// Call once per page load after the document is parsed. Calling it again
/// attaches a second set of listeners.
pub fn initialize_page<D: PageDom>(dom: &D, config: &PageConfig) -> EnhanceReport {
	let mut report = EnhanceReport::default();

	for enhancement in Enhancement::ALL {
		match enhancement.register(dom, config) {
			Ok(count) => {
				debug_log!("{}: {} node(s)", enhancement, count);
				report.applied.push((enhancement, count));
			}
			Err(err) => {
				warn_log!("Skipping {}: {}", enhancement, err);
				report.failed.push((enhancement, err));
			}
		}
	}

	report
}
