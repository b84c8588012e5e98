//! DOM abstraction layer
//!
//! Enhancements are written once against [`PageDom`] and run on two backends:
//!
//! - [`WebDocument`] (wasm32 only): the live browser document via `web-sys`.
//! - [`MemoryDocument`]: an in-memory tree with a virtual clock, used for
//!   native tests and headless checks of server-rendered markup.
//!
//! Both backends are single-threaded and cheap to clone. Handlers and timer
//! callbacks capture a clone of the document and run to completion before the
//! next event is dispatched.

mod events;
mod memory;
mod selector;
#[cfg(target_arch = "wasm32")]
mod web;

use std::fmt;
use std::time::Duration;

pub use events::{
	DomEvent, EventHandler, EventKind, ScrollBehavior, ScrollBlock, ScrollOptions, TimerCallback,
};
pub use memory::{MemoryDocument, NodeId, ScrollRecord};
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;

use crate::error::DomResult;

/// Operations the page enhancements need from a document.
///
/// Lookups that can legitimately find nothing return `Option`; operations
/// that can fail inside the backend return [`DomResult`]. Reads on a node
/// that is not an element degrade to empty values instead of failing.
pub trait PageDom: Clone + 'static {
	/// Handle to a node of this document.
	type Node: Clone + PartialEq + fmt::Debug + 'static;

	/// All elements matching `selector`, in document order.
	fn query_all(&self, selector: &str) -> DomResult<Vec<Self::Node>>;

	/// First element matching `selector`.
	fn query(&self, selector: &str) -> DomResult<Option<Self::Node>> {
		Ok(self.query_all(selector)?.into_iter().next())
	}

	/// Element whose `id` attribute equals `id`.
	fn element_by_id(&self, id: &str) -> Option<Self::Node>;

	/// Attribute value, if present.
	fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

	/// Sets an attribute.
	fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> DomResult<()>;

	/// Adds a class to the element's class list.
	fn add_class(&self, node: &Self::Node, class: &str) -> DomResult<()>;

	/// Removes a class from the element's class list.
	fn remove_class(&self, node: &Self::Node, class: &str) -> DomResult<()>;

	/// Whether the element carries `class`.
	fn has_class(&self, node: &Self::Node, class: &str) -> bool;

	/// Sets an inline style property.
	fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> DomResult<()>;

	/// Current value of a form control (empty for other nodes).
	fn value(&self, node: &Self::Node) -> String;

	/// Replaces the current value of a form control.
	fn set_value(&self, node: &Self::Node, value: &str);

	/// Sets the custom validity message; an empty message clears it.
	fn set_custom_validity(&self, node: &Self::Node, message: &str);

	/// Message the control would report, empty when valid.
	fn validation_message(&self, node: &Self::Node) -> String;

	/// Native constraint validity of a form or control.
	fn check_validity(&self, node: &Self::Node) -> bool;

	/// Whether the node is still attached to the document.
	fn is_connected(&self, node: &Self::Node) -> bool;

	/// Detaches the node. Detaching a detached node is a no-op.
	fn remove(&self, node: &Self::Node);

	/// Creates a detached element.
	fn create_element(&self, tag: &str) -> DomResult<Self::Node>;

	/// Appends a text node; the text is never parsed as markup.
	fn append_text(&self, parent: &Self::Node, text: &str) -> DomResult<()>;

	/// Appends `child` as the last child of `parent`.
	fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> DomResult<()>;

	/// Inserts `child` before the current first child of `parent`.
	fn prepend_child(&self, parent: &Self::Node, child: &Self::Node) -> DomResult<()>;

	/// Removes all children of `node`.
	fn clear_children(&self, node: &Self::Node) -> DomResult<()>;

	/// Concatenated text of the node and its descendants.
	fn text_content(&self, node: &Self::Node) -> String;

	/// Scrolls the element into view.
	fn scroll_into_view(&self, node: &Self::Node, options: ScrollOptions);

	/// Registers an event listener on the node.
	fn listen(&self, node: &Self::Node, kind: EventKind, handler: EventHandler) -> DomResult<()>;

	/// Schedules `callback` on the event loop after `delay`.
	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> DomResult<()>;
}
