//! Page configuration.
//!
//! Every selector, id and timing used by the enhancements lives here so a
//! template can override them without recompiling. Defaults match the markup
//! rendered by the Secret Santa server templates.
//!
//! ## Data island
//!
//! A page may embed overrides as JSON:
//!
//! ```html
//! <script type="application/json" id="santa-config">
//!   { "alert_dismiss_ms": 8000, "banner_auto_dismiss_ms": 5000 }
//! </script>
//! ```
//!
//! Fields left out keep their defaults. A malformed island is logged and
//! ignored.

use serde::{Deserialize, Serialize};

use crate::dom::PageDom;
use crate::warn_log;

/// Element id of the JSON configuration island.
pub const CONFIG_ISLAND_ID: &str = "santa-config";

/// Delay before alerts present at page load are dismissed.
pub const DEFAULT_ALERT_DISMISS_MS: u64 = 5000;

/// Entrance delay added per card index.
pub const DEFAULT_CARD_STAGGER_MS: u64 = 100;

/// Custom validity message set on a mismatching confirmation field.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Selectors, ids and timings for the page enhancements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	/// Alerts scheduled for auto-dismissal at load.
	pub alert_selector: String,
	/// Auto-dismiss delay for alerts present at load.
	pub alert_dismiss_ms: u64,
	/// Forms guarded on submit.
	pub form_selector: String,
	/// Class added to a form on every submit attempt.
	pub validated_class: String,
	/// Id of the invite-code input.
	pub invite_code_id: String,
	/// Id of the password input.
	pub password_id: String,
	/// Id of the password confirmation input.
	pub confirm_password_id: String,
	/// Custom validity message for mismatching passwords.
	pub password_mismatch_message: String,
	/// Anchors that scroll smoothly instead of jumping.
	pub fragment_link_selector: String,
	/// Cards that fade in.
	pub card_selector: String,
	/// Entrance delay step per card.
	pub card_stagger_ms: u64,
	/// Class that triggers the fade-in animation.
	pub fade_in_class: String,
	/// Primary content region that receives feedback banners.
	pub container_selector: String,
	/// Auto-dismiss delay for banners created after load. `None` keeps them
	/// until the user closes them.
	pub banner_auto_dismiss_ms: Option<u64>,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self {
			alert_selector: ".alert".to_string(),
			alert_dismiss_ms: DEFAULT_ALERT_DISMISS_MS,
			form_selector: "form".to_string(),
			validated_class: "was-validated".to_string(),
			invite_code_id: "invite_code".to_string(),
			password_id: "password".to_string(),
			confirm_password_id: "confirm_password".to_string(),
			password_mismatch_message: PASSWORD_MISMATCH_MESSAGE.to_string(),
			fragment_link_selector: "a[href^=\"#\"]".to_string(),
			card_selector: ".card".to_string(),
			card_stagger_ms: DEFAULT_CARD_STAGGER_MS,
			fade_in_class: "fade-in".to_string(),
			container_selector: ".container".to_string(),
			banner_auto_dismiss_ms: None,
		}
	}
}

impl PageConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a JSON override. Missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Reads the configuration island from the document.
	///
	/// Falls back to the defaults when the island is absent or malformed.
	pub fn from_document<D: PageDom>(dom: &D) -> Self {
		let Some(island) = dom.element_by_id(CONFIG_ISLAND_ID) else {
			return Self::default();
		};

		let json = dom.text_content(&island);
		match Self::from_json(&json) {
			Ok(config) => config,
			Err(err) => {
				warn_log!("Ignoring malformed #{} island: {}", CONFIG_ISLAND_ID, err);
				Self::default()
			}
		}
	}

	/// Sets the alert auto-dismiss delay.
	pub fn with_alert_dismiss_ms(mut self, ms: u64) -> Self {
		self.alert_dismiss_ms = ms;
		self
	}

	/// Sets the per-card entrance delay step.
	pub fn with_card_stagger_ms(mut self, ms: u64) -> Self {
		self.card_stagger_ms = ms;
		self
	}

	/// Sets the container selector used for feedback banners.
	pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
		self.container_selector = selector.into();
		self
	}

	/// Enables auto-dismissal of banners created after load.
	pub fn with_banner_auto_dismiss_ms(mut self, ms: u64) -> Self {
		self.banner_auto_dismiss_ms = Some(ms);
		self
	}

	/// Sets the invite-code input id.
	pub fn with_invite_code_id(mut self, id: impl Into<String>) -> Self {
		self.invite_code_id = id.into();
		self
	}

	/// Sets the alert selector.
	pub fn with_alert_selector(mut self, selector: impl Into<String>) -> Self {
		self.alert_selector = selector.into();
		self
	}

	/// Sets the card selector.
	pub fn with_card_selector(mut self, selector: impl Into<String>) -> Self {
		self.card_selector = selector.into();
		self
	}
}
