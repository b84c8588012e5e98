//! Element builder
//!
//! A fluent API for constructing elements against any [`PageDom`] backend.
//!
//! ## Design Pattern
//!
//! - **Fluent API**: method chaining for readable construction
//! - **Deferred errors**: the first backend error is kept and returned by the
//!   terminal method, so chains never need intermediate `?`
//! - **Text only**: `text` appends a text node; nothing is parsed as markup
//!
//! ## Example
//!
//! ```ignore
//! let close = ElementBuilder::new(&dom, "button")
//!     .attr("type", "button")
//!     .class("btn-close")
//!     .attr("data-bs-dismiss", "alert")
//!     .build()?;
//! ```

use crate::dom::{EventHandler, EventKind, PageDom};
use crate::error::DomResult;

/// Fluent element builder.
pub struct ElementBuilder<'a, D: PageDom> {
	dom: &'a D,
	element: DomResult<D::Node>,
}

impl<'a, D: PageDom> ElementBuilder<'a, D> {
	/// Creates a detached `tag` element.
	pub fn new(dom: &'a D, tag: &str) -> Self {
		Self {
			dom,
			element: dom.create_element(tag),
		}
	}

	fn apply(mut self, step: impl FnOnce(&D, &D::Node) -> DomResult<()>) -> Self {
		if let Ok(element) = &self.element
			&& let Err(err) = step(self.dom, element)
		{
			self.element = Err(err);
		}
		self
	}

	/// Adds one or more space-separated classes.
	pub fn class(self, classes: &str) -> Self {
		self.apply(|dom, element| {
			classes
				.split_whitespace()
				.try_for_each(|class| dom.add_class(element, class))
		})
	}

	/// Sets the id attribute.
	pub fn id(self, id: &str) -> Self {
		self.attr("id", id)
	}

	/// Sets an attribute.
	pub fn attr(self, name: &str, value: &str) -> Self {
		self.apply(|dom, element| dom.set_attribute(element, name, value))
	}

	/// Appends a text node.
	pub fn text(self, text: &str) -> Self {
		self.apply(|dom, element| dom.append_text(element, text))
	}

	/// Appends a child element.
	pub fn child(self, child: &D::Node) -> Self {
		self.apply(|dom, element| dom.append_child(element, child))
	}

	/// Adds an event listener.
	pub fn on(self, kind: EventKind, handler: EventHandler) -> Self {
		self.apply(|dom, element| dom.listen(element, kind, handler))
	}

	/// Finalizes the builder and returns the detached element.
	pub fn build(self) -> DomResult<D::Node> {
		self.element
	}

	/// Finalizes the builder and appends the element to `parent`.
	pub fn append_to(self, parent: &D::Node) -> DomResult<D::Node> {
		let dom = self.dom;
		let element = self.build()?;
		dom.append_child(parent, &element)?;
		Ok(element)
	}

	/// Finalizes the builder and inserts the element as the first child of
	/// `parent`.
	pub fn prepend_to(self, parent: &D::Node) -> DomResult<D::Node> {
		let dom = self.dom;
		let element = self.build()?;
		dom.prepend_child(parent, &element)?;
		Ok(element)
	}
}
