//! Blockkit - state management for content-editor blocks
//!
//! This library provides the state layer behind editor blocks that list
//! posts and products: declarative resource queries against a REST-style
//! content repository, async fetching with stale-response supersession,
//! carousel navigation with auto-advance, debounced search filtering,
//! expand/collapse toggle sets and attribute-bag patch helpers.
//!
//! The editor host and the content repository stay external: the host
//! owns the attribute bag and receives patches over a channel, and the
//! repository is reached through the [`repository::ContentRepository`]
//! trait.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Library configuration management
//! * [`query`] - Declarative query specs and URL parameter building
//! * [`fetcher`] - Async list fetching with supersession
//! * [`carousel`] - Circular slide navigation and auto-advance
//! * [`search`] - Debounced text + tab filtering
//! * [`attributes`] - Attribute bag patch helpers
//! * [`view`] - Per-block view model bundling the above

/// Attribute bag patch helpers and block-kind validation
pub mod attributes;

/// Carousel state machine with circular indexing and auto-advance
pub mod carousel;

/// Configuration module for managing library settings
pub mod config;

/// Library constants and default values
pub mod constants;

/// Error taxonomy shared across modules
pub mod error;

/// Async resource fetching with loading/error state and supersession
pub mod fetcher;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Query spec construction and deterministic parameter building
pub mod query;

/// Content repository abstraction and resource types
pub mod repository;

/// Debounced search and tab filtering
pub mod search;

/// Immutable expand/collapse toggle sets
pub mod toggles;

/// Per-block view model exposed to the editor host
pub mod view;

// Re-export the types hosts touch on every render for convenient access
pub use error::BlockError;
pub use fetcher::{FetchState, ResourceFetcher};
pub use query::QuerySpec;
pub use repository::{ContentRepository, Resource, ResourceType};
pub use view::BlockViewModel;
