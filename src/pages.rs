//! Page enhancements for the Secret Santa site
//!
//! This module provides access to santa-pages: load-time enhancements for the
//! server-rendered templates, feedback banners and the JSON API client.
//!
//! ## Example
//!
//! ```rust,ignore
//! use santa::pages::prelude::*;
//!
//! let dom = MemoryDocument::new();
//! let config = PageConfig::from_document(&dom);
//! let report = initialize_page(&dom, &config);
//!
//! let container = locate_container(&dom, &config)?.expect("page has a container");
//! show_success(&dom, &container, "Wishlist saved")?;
//! ```

// Re-export all santa-pages functionality
pub use santa_pages::*;
