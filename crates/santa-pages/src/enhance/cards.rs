//! Staggered card entrance.

use crate::config::PageConfig;
use crate::dom::PageDom;
use crate::error::DomResult;

/// Entrance delay in milliseconds of the card at `index`.
pub fn stagger_delay(index: usize, step_ms: u64) -> u64 {
	u64::try_from(index)
		.unwrap_or(u64::MAX)
		.saturating_mul(step_ms)
}

/// Formats milliseconds as a CSS `<time>` in seconds (`100` is `0.1s`).
pub fn format_seconds(ms: u64) -> String {
	let (whole, millis) = (ms / 1000, ms % 1000);
	if millis == 0 {
		return format!("{}s", whole);
	}
	let fraction = format!("{:03}", millis);
	format!("{}.{}s", whole, fraction.trim_end_matches('0'))
}

/// Sets each card's `animation-delay` and adds the fade-in class.
pub fn register_card_fade_in<D: PageDom>(dom: &D, config: &PageConfig) -> DomResult<usize> {
	let cards = dom.query_all(&config.card_selector)?;

	for (index, card) in cards.iter().enumerate() {
		let delay = format_seconds(stagger_delay(index, config.card_stagger_ms));
		dom.set_style(card, "animation-delay", &delay)?;
		dom.add_class(card, &config.fade_in_class)?;
	}

	Ok(cards.len())
}
