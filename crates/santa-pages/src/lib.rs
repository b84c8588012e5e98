//! Santa Pages - client-side enhancements for the Secret Santa site
//!
//! Progressive enhancement for server-rendered pages. The server renders
//! complete HTML; this crate adds the interactive polish on top.
//!
//! ## Features
//!
//! - **Alert auto-dismiss**: flash messages are removed after five seconds
//! - **Form guards**: invalid submissions are blocked and marked `was-validated`
//! - **Invite codes**: typed codes are uppercased and filtered to `A-Z0-9`
//! - **Password confirmation**: mismatches surface through custom validity
//! - **Smooth scroll** and **card fade-in** effects
//! - **API client**: JSON calls that always yield an envelope, never an error
//! - **Feedback banners**: dismissible success/error messages and a spinner
//!
//! ## Architecture
//!
//! - [`dom`]: DOM abstraction with a browser backend and an in-memory backend
//! - [`builder`]: element builder over the DOM abstraction
//! - [`enhance`]: page load enhancements and [`initialize_page`]
//! - [`feedback`]: success/error banners and the loading spinner
//! - [`api`]: JSON API client
//! - [`config`]: selectors, ids and timings
//! - [`error`]: error types
//! - [`logging`]: logging macros for WASM and native targets
//!
//! Everything is generic over [`PageDom`], so the same code drives the browser
//! on `wasm32` and the [`MemoryDocument`] in native tests.
//!
//! ## Example
//!
//! ```ignore
//! use santa_pages::prelude::*;
//!
//! let dom = MemoryDocument::new();
//! let config = PageConfig::from_document(&dom);
//! let report = initialize_page(&dom, &config);
//! assert!(report.is_clean());
//! ```
//!
//! In the browser the compiled module initializes itself on `DOMContentLoaded`
//! and exposes `showSuccess`, `showError`, `showLoading` and `apiCall` to page
//! scripts.

#![warn(missing_docs)]

// Core modules
pub mod builder;
pub mod dom;
pub mod logging;

pub mod api;
pub mod config;
pub mod enhance;
pub mod error;
pub mod feedback;

// Unified prelude for simplified imports
pub mod prelude;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use api::{ApiClient, ApiEnvelope, ApiFailure, ApiOutcome, FALLBACK_MESSAGE, Method, api_call};
pub use builder::ElementBuilder;
pub use config::PageConfig;
pub use dom::{DomEvent, EventKind, MemoryDocument, NodeId, PageDom, ScrollOptions};
#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
pub use enhance::{EnhanceReport, Enhancement, initialize_page};
pub use error::{ApiError, DomError, DomResult};
pub use feedback::{
	BannerKind, FeedbackBanner, locate_container, show_error, show_loading, show_outcome,
	show_success,
};

// Used by the logging macros.
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
