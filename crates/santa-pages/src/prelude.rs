//! Common imports for page scripts and tests.
//!
//! ```ignore
//! use santa_pages::prelude::*;
//! ```

pub use crate::api::{ApiClient, ApiEnvelope, ApiOutcome, Method, api_call};
pub use crate::builder::ElementBuilder;
pub use crate::config::PageConfig;
pub use crate::dom::{DomEvent, EventHandler, EventKind, MemoryDocument, NodeId, PageDom};
#[cfg(target_arch = "wasm32")]
pub use crate::dom::WebDocument;
pub use crate::enhance::{EnhanceReport, Enhancement, initialize_page};
pub use crate::error::{DomError, DomResult};
pub use crate::feedback::{
	FeedbackBanner, locate_container, show_error, show_loading, show_outcome, show_success,
};
pub use crate::{debug_log, error_log, info_log, warn_log};
