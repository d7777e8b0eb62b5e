//! Query spec construction and deterministic parameter building.
//!
//! A [`QuerySpec`] is derived from block attributes, validated once, and
//! then immutable for the lifetime of a fetch. [`build_params`] turns it
//! into an ordered, URL-ready parameter list; it is pure and
//! deterministic so parameter lists double as cache keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FetchConfig;
use crate::constants::{
    PAGE_SIZE_MAX, PAGE_SIZE_MIN, PARAM_AUTHOR, PARAM_CATEGORIES, PARAM_EMBED, PARAM_OFFSET, PARAM_ORDER,
    PARAM_ORDER_BY, PARAM_PER_PAGE, PARAM_SEARCH, PARAM_TAGS,
};
use crate::error::BlockError;
use crate::repository::ResourceType;

/// Field the repository orders results by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Date,
    Title,
    Id,
    MenuOrder,
}

impl OrderBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
            Self::Id => "id",
            Self::MenuOrder => "menu_order",
        }
    }
}

/// Ordering direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Taxonomy and search filters for a query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub authors: Vec<u64>,
    pub search: Option<String>,
}

impl FilterSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty() && self.authors.is_empty() && self.search.is_none()
    }
}

/// Declarative description of one list-fetch request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub resource_type: ResourceType,
    pub page_size: u32,
    pub order_by: OrderBy,
    pub order: OrderDirection,
    pub filters: FilterSet,
    pub offset: u32,
    pub embed_relations: bool,
}

impl QuerySpec {
    /// Build a validated spec. Returns `BlockError::Validation` for an
    /// out-of-range page size and `BlockError::Configuration` when the
    /// filters do not apply to the resource type.
    pub fn build(
        resource_type: ResourceType,
        page_size: u32,
        order_by: OrderBy,
        order: OrderDirection,
        filters: FilterSet,
        embed_relations: bool,
    ) -> Result<Self, BlockError> {
        let spec = Self {
            resource_type,
            page_size,
            order_by,
            order,
            filters,
            offset: 0,
            embed_relations,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Derive a spec from a block attribute bag.
    ///
    /// Recognized attribute keys: `postsPerPage`, `orderBy`, `order`,
    /// `categories`, `tags`, `authors`, `search`. Missing keys fall back
    /// to the fetch configuration defaults.
    pub fn from_attributes(
        resource_type: ResourceType,
        bag: &Map<String, Value>,
        fetch: &FetchConfig,
    ) -> Result<Self, BlockError> {
        let page_size = match bag.get("postsPerPage") {
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| BlockError::Validation(format!("postsPerPage is not a positive integer: {value}")))?,
            None => fetch.default_page_size,
        };

        let order_by = match bag.get("orderBy").and_then(Value::as_str) {
            Some("date") | None => OrderBy::Date,
            Some("title") => OrderBy::Title,
            Some("id") => OrderBy::Id,
            Some("menu_order") => OrderBy::MenuOrder,
            Some(other) => return Err(BlockError::Validation(format!("unknown orderBy value: {other}"))),
        };

        let order = match bag.get("order").and_then(Value::as_str) {
            Some("asc") => OrderDirection::Asc,
            Some("desc") | None => OrderDirection::Desc,
            Some(other) => return Err(BlockError::Validation(format!("unknown order value: {other}"))),
        };

        let filters = FilterSet {
            categories: id_list(bag.get("categories")),
            tags: id_list(bag.get("tags")),
            authors: id_list(bag.get("authors")),
            search: bag
                .get("search")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
        };

        Self::build(resource_type, page_size, order_by, order, filters, fetch.embed_relations)
    }

    /// Copy of this spec advanced to the next page.
    #[must_use]
    pub fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.offset = self.offset.saturating_add(self.page_size);
        next
    }

    /// Validate the spec without building parameters.
    pub fn validate(&self) -> Result<(), BlockError> {
        if self.page_size < PAGE_SIZE_MIN || self.page_size > PAGE_SIZE_MAX {
            return Err(BlockError::Validation(format!(
                "page_size must be between {} and {}, got {}",
                PAGE_SIZE_MIN, PAGE_SIZE_MAX, self.page_size
            )));
        }

        // Taxonomy listings cannot themselves be filtered by taxonomy or author
        if matches!(self.resource_type, ResourceType::Category | ResourceType::Tag) {
            if !self.filters.categories.is_empty() || !self.filters.tags.is_empty() {
                return Err(BlockError::Configuration(format!(
                    "taxonomy filters do not apply to resource type '{}'",
                    self.resource_type.as_str()
                )));
            }
            if !self.filters.authors.is_empty() {
                return Err(BlockError::Configuration(format!(
                    "author filter does not apply to resource type '{}'",
                    self.resource_type.as_str()
                )));
            }
        }

        // Products carry no author field
        if self.resource_type == ResourceType::Product && !self.filters.authors.is_empty() {
            return Err(BlockError::Configuration(
                "author filter does not apply to resource type 'product'".to_string(),
            ));
        }

        Ok(())
    }
}

/// Build the URL-query-ready parameter list for a spec.
///
/// Keys appear in a fixed order so equal specs yield byte-identical
/// lists. Conventions: `offset` is omitted when 0; taxonomy id lists are
/// deduped, sorted ascending and comma-joined; empty filters are omitted
/// entirely rather than emitted as empty strings.
#[must_use]
pub fn build_params(spec: &QuerySpec) -> Vec<(String, String)> {
    let mut params = vec![
        (PARAM_PER_PAGE.to_string(), spec.page_size.to_string()),
        (PARAM_ORDER_BY.to_string(), spec.order_by.as_str().to_string()),
        (PARAM_ORDER.to_string(), spec.order.as_str().to_string()),
    ];

    if spec.offset > 0 {
        params.push((PARAM_OFFSET.to_string(), spec.offset.to_string()));
    }

    if let Some(joined) = join_ids(&spec.filters.categories) {
        params.push((PARAM_CATEGORIES.to_string(), joined));
    }
    if let Some(joined) = join_ids(&spec.filters.tags) {
        params.push((PARAM_TAGS.to_string(), joined));
    }
    if let Some(joined) = join_ids(&spec.filters.authors) {
        params.push((PARAM_AUTHOR.to_string(), joined));
    }

    if let Some(search) = spec.filters.search.as_deref() {
        let trimmed = search.trim();
        if !trimmed.is_empty() {
            params.push((PARAM_SEARCH.to_string(), trimmed.to_string()));
        }
    }

    if spec.embed_relations {
        params.push((PARAM_EMBED.to_string(), "true".to_string()));
    }

    params
}

/// Comma-join ids sorted ascending with duplicates removed; `None` when empty.
fn join_ids(ids: &[u64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Some(
        sorted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Read a JSON array of numeric ids, ignoring non-numeric entries.
fn id_list(value: Option<&Value>) -> Vec<u64> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}
