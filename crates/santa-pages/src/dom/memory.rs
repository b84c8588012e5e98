//! In-memory DOM backend
//!
//! An arena-backed document tree with event dispatch, constraint validation
//! and a virtual clock. It mirrors the browser behaviors the enhancements rely
//! on closely enough to test them natively:
//!
//! - events bubble from the target to the document root; `stop_propagation`
//!   halts bubbling after the current node's listeners ran
//! - timers fire in due-time order when the clock is advanced, ties in the
//!   order they were scheduled
//! - form validity covers `required`, `minlength`, `maxlength`, `type="email"`
//!   and custom validity messages
//!
//! Listeners and timer callbacks usually hold a clone of the document, so a
//! document with listeners stays alive as long as those listeners do, just as
//! closures handed to the browser live as long as the page.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::events::{DomEvent, EventHandler, EventKind, ScrollOptions, TimerCallback};
use super::selector::{SelectorList, SelectorSubject};
use super::PageDom;
use crate::error::{DomError, DomResult};

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// The document node.
	pub const DOCUMENT: NodeId = NodeId(0);
}

/// A recorded `scrollIntoView` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRecord {
	/// Element scrolled into view.
	pub node: NodeId,
	/// Options it was scrolled with.
	pub options: ScrollOptions,
}

/// In-memory document.
///
/// Cloning yields another handle to the same document.
#[derive(Clone)]
pub struct MemoryDocument {
	inner: Rc<RefCell<Arena>>,
}

struct Arena {
	nodes: Vec<MemoryNode>,
	listeners: Vec<Listener>,
	timers: Vec<PendingTimer>,
	clock: Duration,
	timer_seq: u64,
	scrolls: Vec<ScrollRecord>,
	head: NodeId,
	body: NodeId,
}

struct MemoryNode {
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	data: NodeData,
}

enum NodeData {
	Document,
	Element(ElementData),
	Text(String),
}

#[derive(Default)]
struct ElementData {
	tag: String,
	attributes: Vec<(String, String)>,
	classes: Vec<String>,
	styles: Vec<(String, String)>,
	value: Option<String>,
	custom_validity: String,
}

struct Listener {
	node: NodeId,
	kind: EventKind,
	handler: EventHandler,
}

struct PendingTimer {
	due: Duration,
	seq: u64,
	callback: TimerCallback,
}

/// Validity flags of a single control, evaluated on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ValidityState {
	value_missing: bool,
	too_short: bool,
	too_long: bool,
	type_mismatch: bool,
	custom_error: bool,
}

impl ValidityState {
	fn valid(&self) -> bool {
		!self.value_missing
			&& !self.too_short
			&& !self.too_long
			&& !self.type_mismatch
			&& !self.custom_error
	}

	fn message(&self, custom: &str) -> String {
		if self.custom_error {
			return custom.to_string();
		}
		let message = if self.value_missing {
			"Please fill out this field."
		} else if self.type_mismatch {
			"Please enter an email address."
		} else if self.too_short {
			"Please lengthen this text."
		} else if self.too_long {
			"Please shorten this text."
		} else {
			""
		};
		message.to_string()
	}
}

impl ElementData {
	fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			..Self::default()
		}
	}

	fn raw_attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	fn is_control(&self) -> bool {
		matches!(self.tag.as_str(), "input" | "textarea" | "select")
	}

	fn input_type(&self) -> String {
		self.raw_attribute("type")
			.unwrap_or("text")
			.to_ascii_lowercase()
	}

	/// Controls that never take part in constraint validation.
	fn is_barred(&self) -> bool {
		self.raw_attribute("disabled").is_some()
			|| (self.tag == "input"
				&& matches!(
					self.input_type().as_str(),
					"hidden" | "submit" | "reset" | "button"
				))
	}

	fn validity(&self, value: &str) -> ValidityState {
		let mut state = ValidityState {
			custom_error: !self.custom_validity.is_empty(),
			..ValidityState::default()
		};

		if self.raw_attribute("required").is_some() {
			state.value_missing = if self.input_type() == "checkbox" {
				self.raw_attribute("checked").is_none()
			} else {
				value.is_empty()
			};
		}

		let length = value.chars().count();
		if let Some(min) = self.length_limit("minlength")
			&& length > 0
			&& length < min
		{
			state.too_short = true;
		}
		if let Some(max) = self.length_limit("maxlength")
			&& length > max
		{
			state.too_long = true;
		}

		if self.tag == "input" && self.input_type() == "email" && !value.is_empty() {
			state.type_mismatch = !looks_like_email(value);
		}

		state
	}

	fn length_limit(&self, name: &str) -> Option<usize> {
		self.raw_attribute(name)?.trim().parse().ok()
	}
}

fn looks_like_email(value: &str) -> bool {
	match value.split_once('@') {
		Some((local, domain)) => {
			!local.is_empty()
				&& !domain.is_empty()
				&& !domain.contains('@')
				&& !value.chars().any(char::is_whitespace)
		}
		None => false,
	}
}

impl SelectorSubject for ElementData {
	fn tag(&self) -> &str {
		&self.tag
	}

	fn attribute(&self, name: &str) -> Option<String> {
		match name {
			"class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
			"class" => None,
			"style" if !self.styles.is_empty() => Some(
				self.styles
					.iter()
					.map(|(property, value)| format!("{}: {};", property, value))
					.collect::<Vec<_>>()
					.join(" "),
			),
			"style" => None,
			_ => self.raw_attribute(name).map(str::to_string),
		}
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| c == class)
	}
}

impl Arena {
	fn new() -> Self {
		let mut arena = Self {
			nodes: vec![MemoryNode {
				parent: None,
				children: Vec::new(),
				data: NodeData::Document,
			}],
			listeners: Vec::new(),
			timers: Vec::new(),
			clock: Duration::ZERO,
			timer_seq: 0,
			scrolls: Vec::new(),
			head: NodeId::DOCUMENT,
			body: NodeId::DOCUMENT,
		};

		let html = arena.push(NodeData::Element(ElementData::new("html")));
		let head = arena.push(NodeData::Element(ElementData::new("head")));
		let body = arena.push(NodeData::Element(ElementData::new("body")));
		arena.link_last(NodeId::DOCUMENT, html);
		arena.link_last(html, head);
		arena.link_last(html, body);
		arena.head = head;
		arena.body = body;
		arena
	}

	fn push(&mut self, data: NodeData) -> NodeId {
		self.nodes.push(MemoryNode {
			parent: None,
			children: Vec::new(),
			data,
		});
		NodeId(self.nodes.len() - 1)
	}

	fn node(&self, id: NodeId) -> DomResult<&MemoryNode> {
		self.nodes.get(id.0).ok_or(DomError::UnknownNode)
	}

	fn element(&self, id: NodeId) -> DomResult<&ElementData> {
		match &self.node(id)?.data {
			NodeData::Element(element) => Ok(element),
			_ => Err(DomError::NotAnElement),
		}
	}

	fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
		match self.nodes.get_mut(id.0).map(|node| &mut node.data) {
			Some(NodeData::Element(element)) => Ok(element),
			Some(_) => Err(DomError::NotAnElement),
			None => Err(DomError::UnknownNode),
		}
	}

	fn detach(&mut self, id: NodeId) {
		let Some(parent) = self.nodes.get(id.0).and_then(|node| node.parent) else {
			return;
		};
		if let Some(parent_node) = self.nodes.get_mut(parent.0) {
			parent_node.children.retain(|&child| child != id);
		}
		if let Some(node) = self.nodes.get_mut(id.0) {
			node.parent = None;
		}
	}

	fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
		self.node(child)?;
		if matches!(self.node(parent)?.data, NodeData::Text(_)) || child == NodeId::DOCUMENT {
			return Err(DomError::HierarchyRequest);
		}
		if self.ancestors_inclusive(parent).contains(&child) {
			return Err(DomError::HierarchyRequest);
		}
		Ok(())
	}

	fn link_last(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
	}

	fn link_first(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.insert(0, child);
	}

	fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
		let mut path = Vec::new();
		let mut current = Some(id);
		while let Some(node) = current {
			path.push(node);
			current = self.nodes.get(node.0).and_then(|n| n.parent);
		}
		path
	}

	fn is_connected(&self, id: NodeId) -> bool {
		self.ancestors_inclusive(id).last() == Some(&NodeId::DOCUMENT)
	}

	/// Descendants of `root` in document order, excluding `root`.
	fn descendants(&self, root: NodeId) -> Vec<NodeId> {
		let mut order = Vec::new();
		let mut stack: Vec<NodeId> = match self.nodes.get(root.0) {
			Some(node) => node.children.iter().rev().copied().collect(),
			None => return order,
		};
		while let Some(id) = stack.pop() {
			order.push(id);
			stack.extend(self.nodes[id.0].children.iter().rev().copied());
		}
		order
	}

	fn text_content(&self, id: NodeId) -> String {
		match self.nodes.get(id.0).map(|node| &node.data) {
			Some(NodeData::Text(text)) => text.clone(),
			Some(_) => self
				.descendants(id)
				.into_iter()
				.filter_map(|d| match &self.nodes[d.0].data {
					NodeData::Text(text) => Some(text.as_str()),
					_ => None,
				})
				.collect(),
			None => String::new(),
		}
	}

	fn value(&self, id: NodeId) -> String {
		let Ok(element) = self.element(id) else {
			return String::new();
		};
		if let Some(value) = &element.value {
			return value.clone();
		}
		match element.tag.as_str() {
			"textarea" => self.text_content(id),
			_ => element.raw_attribute("value").unwrap_or_default().to_string(),
		}
	}

	fn control_validity(&self, id: NodeId) -> Option<ValidityState> {
		let element = self.element(id).ok()?;
		if !element.is_control() || element.is_barred() {
			return None;
		}
		Some(element.validity(&self.value(id)))
	}

	fn check_validity(&self, id: NodeId) -> bool {
		let Ok(element) = self.element(id) else {
			return true;
		};
		if element.tag == "form" {
			return self
				.descendants(id)
				.into_iter()
				.filter_map(|d| self.control_validity(d))
				.all(|state| state.valid());
		}
		self.control_validity(id).is_none_or(|state| state.valid())
	}

	fn handlers_for(&self, node: NodeId, kind: EventKind) -> Vec<EventHandler> {
		self.listeners
			.iter()
			.filter(|listener| listener.node == node && listener.kind == kind)
			.map(|listener| Rc::clone(&listener.handler))
			.collect()
	}

	fn take_due_timer(&mut self, deadline: Duration) -> Option<PendingTimer> {
		let index = self
			.timers
			.iter()
			.enumerate()
			.filter(|(_, timer)| timer.due <= deadline)
			.min_by_key(|(_, timer)| (timer.due, timer.seq))
			.map(|(index, _)| index)?;
		let timer = self.timers.swap_remove(index);
		self.clock = self.clock.max(timer.due);
		Some(timer)
	}
}

impl MemoryDocument {
	/// Creates a document containing `<html><head></head><body></body></html>`.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(Arena::new())),
		}
	}

	/// The `<head>` element.
	pub fn head(&self) -> NodeId {
		self.inner.borrow().head
	}

	/// The `<body>` element.
	pub fn body(&self) -> NodeId {
		self.inner.borrow().body
	}

	/// Children of `node` in order.
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.inner
			.borrow()
			.nodes
			.get(node.0)
			.map(|n| n.children.clone())
			.unwrap_or_default()
	}

	/// Parent of `node`, if attached to one.
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.inner.borrow().nodes.get(node.0).and_then(|n| n.parent)
	}

	/// Lowercase tag name, `None` for text and document nodes.
	pub fn tag_name(&self, node: NodeId) -> Option<String> {
		self.inner.borrow().element(node).ok().map(|e| e.tag.clone())
	}

	/// Inline style property value.
	pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
		let arena = self.inner.borrow();
		let element = arena.element(node).ok()?;
		element
			.styles
			.iter()
			.find(|(p, _)| p == property)
			.map(|(_, v)| v.clone())
	}

	/// Current time of the virtual clock.
	pub fn now(&self) -> Duration {
		self.inner.borrow().clock
	}

	/// Number of timers not yet fired.
	pub fn pending_timers(&self) -> usize {
		self.inner.borrow().timers.len()
	}

	/// Number of listeners registered on `node` for `kind`.
	pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
		self.inner.borrow().handlers_for(node, kind).len()
	}

	/// Every `scrollIntoView` call so far.
	pub fn scroll_log(&self) -> Vec<ScrollRecord> {
		self.inner.borrow().scrolls.clone()
	}

	/// Advances the virtual clock, firing every timer that falls due.
	///
	/// Timers scheduled by a firing callback also run if they fall due within
	/// the same window. Returns the number of timers fired.
	pub fn advance(&self, by: Duration) -> usize {
		let deadline = self.now() + by;
		let mut fired = 0;
		loop {
			let next = self.inner.borrow_mut().take_due_timer(deadline);
			let Some(timer) = next else {
				break;
			};
			(timer.callback)();
			fired += 1;
		}
		self.inner.borrow_mut().clock = deadline;
		fired
	}

	/// Dispatches an event at `target`, bubbling to the document.
	///
	/// Returns the event after all listeners ran so the caller can inspect
	/// whether the default action was cancelled.
	pub fn dispatch(&self, target: NodeId, kind: EventKind) -> DomEvent {
		let mut event = DomEvent::new(kind);
		let path = self.inner.borrow().ancestors_inclusive(target);
		for node in path {
			let handlers = self.inner.borrow().handlers_for(node, kind);
			for handler in handlers {
				handler(&mut event);
			}
			if event.is_propagation_stopped() {
				break;
			}
		}
		event
	}

	/// Fires `submit` at a form, as a `novalidate` form does on submission.
	///
	/// Returns `true` when the submission would proceed.
	pub fn submit(&self, form: NodeId) -> bool {
		!self.dispatch(form, EventKind::Submit).is_default_prevented()
	}

	/// Fires `click` at a node. Returns `true` when the default action (such
	/// as following a link) would proceed.
	pub fn click(&self, node: NodeId) -> bool {
		!self.dispatch(node, EventKind::Click).is_default_prevented()
	}

	/// Replaces a control's value and fires `input`, as typing does.
	pub fn type_into(&self, node: NodeId, value: &str) {
		self.set_value(&node, value);
		self.dispatch(node, EventKind::Input);
	}
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let arena = self.inner.borrow();
		f.debug_struct("MemoryDocument")
			.field("nodes", &arena.nodes.len())
			.field("listeners", &arena.listeners.len())
			.field("pending_timers", &arena.timers.len())
			.field("clock", &arena.clock)
			.finish()
	}
}

impl PageDom for MemoryDocument {
	type Node = NodeId;

	fn query_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
		let selectors = SelectorList::parse(selector)?;
		let arena = self.inner.borrow();
		Ok(arena
			.descendants(NodeId::DOCUMENT)
			.into_iter()
			.filter(|&id| {
				arena
					.element(id)
					.is_ok_and(|element| selectors.matches(element))
			})
			.collect())
	}

	fn element_by_id(&self, id: &str) -> Option<NodeId> {
		let arena = self.inner.borrow();
		arena.descendants(NodeId::DOCUMENT).into_iter().find(|&node| {
			arena
				.element(node)
				.is_ok_and(|element| element.raw_attribute("id") == Some(id))
		})
	}

	fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
		let arena = self.inner.borrow();
		SelectorSubject::attribute(arena.element(*node).ok()?, name)
	}

	fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		let element = arena.element_mut(*node)?;
		match name {
			"class" => {
				element.classes = value.split_whitespace().map(str::to_string).collect();
			}
			"style" => {
				element.styles = value
					.split(';')
					.filter_map(|declaration| declaration.split_once(':'))
					.map(|(p, v)| (p.trim().to_string(), v.trim().to_string()))
					.collect();
			}
			_ => match element.attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, existing)) => *existing = value.to_string(),
				None => element
					.attributes
					.push((name.to_string(), value.to_string())),
			},
		}
		Ok(())
	}

	fn add_class(&self, node: &NodeId, class: &str) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		let element = arena.element_mut(*node)?;
		if !element.classes.iter().any(|c| c == class) {
			element.classes.push(class.to_string());
		}
		Ok(())
	}

	fn remove_class(&self, node: &NodeId, class: &str) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		arena.element_mut(*node)?.classes.retain(|c| c != class);
		Ok(())
	}

	fn has_class(&self, node: &NodeId, class: &str) -> bool {
		self.inner
			.borrow()
			.element(*node)
			.is_ok_and(|element| element.has_class(class))
	}

	fn set_style(&self, node: &NodeId, property: &str, value: &str) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		let element = arena.element_mut(*node)?;
		match element.styles.iter_mut().find(|(p, _)| p == property) {
			Some((_, existing)) => *existing = value.to_string(),
			None => element
				.styles
				.push((property.to_string(), value.to_string())),
		}
		Ok(())
	}

	fn value(&self, node: &NodeId) -> String {
		self.inner.borrow().value(*node)
	}

	fn set_value(&self, node: &NodeId, value: &str) {
		if let Ok(element) = self.inner.borrow_mut().element_mut(*node) {
			element.value = Some(value.to_string());
		}
	}

	fn set_custom_validity(&self, node: &NodeId, message: &str) {
		if let Ok(element) = self.inner.borrow_mut().element_mut(*node) {
			element.custom_validity = message.to_string();
		}
	}

	fn validation_message(&self, node: &NodeId) -> String {
		let arena = self.inner.borrow();
		match (arena.control_validity(*node), arena.element(*node)) {
			(Some(state), Ok(element)) => state.message(&element.custom_validity),
			_ => String::new(),
		}
	}

	fn check_validity(&self, node: &NodeId) -> bool {
		self.inner.borrow().check_validity(*node)
	}

	fn is_connected(&self, node: &NodeId) -> bool {
		self.inner.borrow().is_connected(*node)
	}

	fn remove(&self, node: &NodeId) {
		self.inner.borrow_mut().detach(*node);
	}

	fn create_element(&self, tag: &str) -> DomResult<NodeId> {
		if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
			return Err(DomError::Script(format!("invalid tag name '{}'", tag)));
		}
		Ok(self
			.inner
			.borrow_mut()
			.push(NodeData::Element(ElementData::new(tag))))
	}

	fn append_text(&self, parent: &NodeId, text: &str) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		arena.element(*parent)?;
		let id = arena.push(NodeData::Text(text.to_string()));
		arena.link_last(*parent, id);
		Ok(())
	}

	fn append_child(&self, parent: &NodeId, child: &NodeId) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		arena.check_insertion(*parent, *child)?;
		arena.detach(*child);
		arena.link_last(*parent, *child);
		Ok(())
	}

	fn prepend_child(&self, parent: &NodeId, child: &NodeId) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		arena.check_insertion(*parent, *child)?;
		arena.detach(*child);
		arena.link_first(*parent, *child);
		Ok(())
	}

	fn clear_children(&self, node: &NodeId) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		let children = arena.node(*node)?.children.clone();
		for child in children {
			arena.detach(child);
		}
		Ok(())
	}

	fn text_content(&self, node: &NodeId) -> String {
		self.inner.borrow().text_content(*node)
	}

	fn scroll_into_view(&self, node: &NodeId, options: ScrollOptions) {
		self.inner.borrow_mut().scrolls.push(ScrollRecord {
			node: *node,
			options,
		});
	}

	fn listen(&self, node: &NodeId, kind: EventKind, handler: EventHandler) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		arena.node(*node)?;
		arena.listeners.push(Listener {
			node: *node,
			kind,
			handler,
		});
		Ok(())
	}

	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> DomResult<()> {
		let mut arena = self.inner.borrow_mut();
		let due = arena.clock + delay;
		let seq = arena.timer_seq;
		arena.timer_seq += 1;
		arena.timers.push(PendingTimer { due, seq, callback });
		Ok(())
	}
}
