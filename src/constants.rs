//! Constants used throughout the library
//!
//! This module centralizes parameter key names, defaults and bounds
//! to improve maintainability and consistency.

// Query parameter keys, in the order build_params emits them
pub const PARAM_PER_PAGE: &str = "per_page";
pub const PARAM_ORDER_BY: &str = "orderby";
pub const PARAM_ORDER: &str = "order";
pub const PARAM_OFFSET: &str = "offset";
pub const PARAM_CATEGORIES: &str = "categories";
pub const PARAM_TAGS: &str = "tags";
pub const PARAM_AUTHOR: &str = "author";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_EMBED: &str = "_embed";

// Search filter tab ids
pub const TAB_ALL: &str = "all";
pub const TAB_ACTIVE: &str = "active";
pub const TAB_INACTIVE: &str = "inactive";

// Fetching Limits
/// Minimum items per page a query spec may request
pub const PAGE_SIZE_MIN: u32 = 1;
/// Maximum items per page a query spec may request
pub const PAGE_SIZE_MAX: u32 = 100;
/// Default items per page when the host does not configure one
pub const PAGE_SIZE_DEFAULT: u32 = 6;

// Timer Defaults
/// Default carousel auto-advance interval in milliseconds
pub const AUTOPLAY_INTERVAL_MS_DEFAULT: u64 = 5000;
/// Smallest auto-advance interval accepted by config validation
pub const AUTOPLAY_INTERVAL_MS_MIN: u64 = 500;
/// Default search debounce delay in milliseconds
pub const DEBOUNCE_MS_DEFAULT: u64 = 150;
/// Largest debounce delay accepted by config validation
pub const DEBOUNCE_MS_MAX: u64 = 5000;

// Carousel Layout Constants
/// Items shown per view on narrow viewports
pub const NARROW_ITEMS_PER_VIEW: usize = 1;
/// Upper bound for items shown per view on medium viewports
pub const MEDIUM_ITEMS_PER_VIEW_CAP: usize = 2;
