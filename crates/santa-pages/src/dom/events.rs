//! Event model shared by the DOM backends.
//!
//! Handlers receive a [`DomEvent`] and signal their intent through
//! `prevent_default` / `stop_propagation`; the backend applies that intent to
//! the underlying browser event (or, in memory, to its own dispatch loop).

use std::rc::Rc;

/// Event listener callback.
pub type EventHandler = Rc<dyn Fn(&mut DomEvent)>;

/// Timer callback, run once.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Event types the page enhancements listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// Pointer activation (anchors, close buttons).
	Click,
	/// Value change of a text control.
	Input,
	/// Form submission.
	Submit,
}

impl EventKind {
	/// DOM event name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::Input => "input",
			Self::Submit => "submit",
		}
	}

	/// Whether `prevent_default` has an effect for this event type.
	pub fn cancelable(self) -> bool {
		!matches!(self, Self::Input)
	}
}

/// A dispatched event as seen by a handler.
#[derive(Debug, Clone)]
pub struct DomEvent {
	kind: EventKind,
	cancelable: bool,
	default_prevented: bool,
	propagation_stopped: bool,
}

impl DomEvent {
	/// Creates an event with the default cancelability of its kind.
	pub fn new(kind: EventKind) -> Self {
		Self {
			kind,
			cancelable: kind.cancelable(),
			default_prevented: false,
			propagation_stopped: false,
		}
	}

	/// Event type.
	pub fn kind(&self) -> EventKind {
		self.kind
	}

	/// Cancels the default action (navigation, form submission).
	///
	/// Has no effect on events that are not cancelable.
	pub fn prevent_default(&mut self) {
		if self.cancelable {
			self.default_prevented = true;
		}
	}

	/// Stops the event from reaching ancestors of the current node.
	pub fn stop_propagation(&mut self) {
		self.propagation_stopped = true;
	}

	/// Whether the default action was cancelled.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented
	}

	/// Whether propagation was stopped.
	pub fn is_propagation_stopped(&self) -> bool {
		self.propagation_stopped
	}
}

/// `scrollIntoView` behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
	/// Jump immediately.
	#[default]
	Auto,
	/// Animate the scroll.
	Smooth,
}

/// Vertical alignment of the scrolled element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
	/// Align to the top of the viewport.
	#[default]
	Start,
	/// Center in the viewport.
	Center,
	/// Align to the bottom of the viewport.
	End,
	/// Scroll as little as possible.
	Nearest,
}

/// Options for `scrollIntoView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
	/// Scroll animation.
	pub behavior: ScrollBehavior,
	/// Vertical alignment.
	pub block: ScrollBlock,
}

impl ScrollOptions {
	/// Smooth scroll aligning the element to the start of the viewport.
	pub const SMOOTH_START: Self = Self {
		behavior: ScrollBehavior::Smooth,
		block: ScrollBlock::Start,
	};
}
