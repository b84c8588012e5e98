//! Browser DOM backend (wasm32 only).
//!
//! Listener closures are leaked with `Closure::forget`: enhancements are
//! attached once per page load and must live as long as the page does.

use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
	HtmlTextAreaElement, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::PageDom;
use super::events::{
	DomEvent, EventHandler, EventKind, ScrollBehavior, ScrollBlock, ScrollOptions, TimerCallback,
};
use crate::error::{DomError, DomResult};

/// The live browser document.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: web_sys::Document,
}

impl WebDocument {
	/// Wraps the document of the current window.
	pub fn current() -> DomResult<Self> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or(DomError::NoDocument)?;
		Ok(Self { document })
	}

	/// Wraps an existing document.
	pub fn from_document(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// The wrapped document.
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}
}

fn script_error(value: JsValue) -> DomError {
	DomError::Script(
		value
			.as_string()
			.unwrap_or_else(|| format!("{:?}", value)),
	)
}

impl PageDom for WebDocument {
	type Node = Element;

	fn query_all(&self, selector: &str) -> DomResult<Vec<Element>> {
		let list = self
			.document
			.query_selector_all(selector)
			.map_err(script_error)?;
		Ok((0..list.length())
			.filter_map(|index| list.item(index))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.collect())
	}

	fn query(&self, selector: &str) -> DomResult<Option<Element>> {
		self.document.query_selector(selector).map_err(script_error)
	}

	fn element_by_id(&self, id: &str) -> Option<Element> {
		self.document.get_element_by_id(id)
	}

	fn attribute(&self, node: &Element, name: &str) -> Option<String> {
		node.get_attribute(name)
	}

	fn set_attribute(&self, node: &Element, name: &str, value: &str) -> DomResult<()> {
		node.set_attribute(name, value).map_err(script_error)
	}

	fn add_class(&self, node: &Element, class: &str) -> DomResult<()> {
		node.class_list().add_1(class).map_err(script_error)
	}

	fn remove_class(&self, node: &Element, class: &str) -> DomResult<()> {
		node.class_list().remove_1(class).map_err(script_error)
	}

	fn has_class(&self, node: &Element, class: &str) -> bool {
		node.class_list().contains(class)
	}

	fn set_style(&self, node: &Element, property: &str, value: &str) -> DomResult<()> {
		let element = node.dyn_ref::<HtmlElement>().ok_or(DomError::NotAnElement)?;
		element
			.style()
			.set_property(property, value)
			.map_err(script_error)
	}

	fn value(&self, node: &Element) -> String {
		if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			input.value()
		} else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
			textarea.value()
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			select.value()
		} else {
			String::new()
		}
	}

	fn set_value(&self, node: &Element, value: &str) {
		if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			input.set_value(value);
		} else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
			textarea.set_value(value);
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			select.set_value(value);
		}
	}

	fn set_custom_validity(&self, node: &Element, message: &str) {
		if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			input.set_custom_validity(message);
		} else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
			textarea.set_custom_validity(message);
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			select.set_custom_validity(message);
		}
	}

	fn validation_message(&self, node: &Element) -> String {
		let message = if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			input.validation_message()
		} else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
			textarea.validation_message()
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			select.validation_message()
		} else {
			return String::new();
		};
		message.unwrap_or_default()
	}

	fn check_validity(&self, node: &Element) -> bool {
		if let Some(form) = node.dyn_ref::<HtmlFormElement>() {
			form.check_validity()
		} else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			input.check_validity()
		} else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
			textarea.check_validity()
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			select.check_validity()
		} else {
			true
		}
	}

	fn is_connected(&self, node: &Element) -> bool {
		node.is_connected()
	}

	fn remove(&self, node: &Element) {
		node.remove();
	}

	fn create_element(&self, tag: &str) -> DomResult<Element> {
		self.document.create_element(tag).map_err(script_error)
	}

	fn append_text(&self, parent: &Element, text: &str) -> DomResult<()> {
		let text = self.document.create_text_node(text);
		parent.append_child(&text).map_err(script_error)?;
		Ok(())
	}

	fn append_child(&self, parent: &Element, child: &Element) -> DomResult<()> {
		parent.append_child(child).map_err(script_error)?;
		Ok(())
	}

	fn prepend_child(&self, parent: &Element, child: &Element) -> DomResult<()> {
		let first = parent.first_child();
		parent
			.insert_before(child, first.as_ref())
			.map_err(script_error)?;
		Ok(())
	}

	fn clear_children(&self, node: &Element) -> DomResult<()> {
		node.set_text_content(None);
		Ok(())
	}

	fn text_content(&self, node: &Element) -> String {
		node.text_content().unwrap_or_default()
	}

	fn scroll_into_view(&self, node: &Element, options: ScrollOptions) {
		let web_options = ScrollIntoViewOptions::new();
		web_options.set_behavior(match options.behavior {
			ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
			ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
		});
		web_options.set_block(match options.block {
			ScrollBlock::Start => ScrollLogicalPosition::Start,
			ScrollBlock::Center => ScrollLogicalPosition::Center,
			ScrollBlock::End => ScrollLogicalPosition::End,
			ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
		});
		node.scroll_into_view_with_scroll_into_view_options(&web_options);
	}

	fn listen(&self, node: &Element, kind: EventKind, handler: EventHandler) -> DomResult<()> {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let mut dom_event = DomEvent::new(kind);
			handler(&mut dom_event);
			if dom_event.is_default_prevented() {
				event.prevent_default();
			}
			if dom_event.is_propagation_stopped() {
				event.stop_propagation();
			}
		}) as Box<dyn FnMut(_)>);

		node.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
			.map_err(script_error)?;

		closure.forget(); // Keep closure alive
		Ok(())
	}

	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> DomResult<()> {
		let window = web_sys::window().ok_or(DomError::NoDocument)?;
		let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
		let callback = Closure::once_into_js(move || callback());
		window
			.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
			.map_err(script_error)?;
		Ok(())
	}
}
