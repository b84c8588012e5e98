//! # Santa
//!
//! Client-side enhancements for the Secret Santa gift-exchange site.
//!
//! The server renders every page as plain HTML; this crate compiles to
//! WebAssembly and layers the interactive behavior on top: alert
//! auto-dismissal, submit-time form validation, invite-code normalization,
//! password confirmation, smooth scrolling, card entrance effects, feedback
//! banners and a JSON API client.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - page enhancements via `santa-pages`
//! - `debug-hooks` - verbose `debug_log!` output in debug builds
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use santa::prelude::*;
//!
//! let dom = MemoryDocument::new();
//! let report = initialize_page(&dom, &PageConfig::default());
//! assert!(report.is_clean());
//! ```

#[cfg(feature = "pages")]
pub mod pages;

/// Common imports
pub mod prelude {
	#[cfg(feature = "pages")]
	pub use crate::pages::prelude::*;
}
