//! Content repository abstraction.
//!
//! This module defines the single operation the library needs from the
//! host's REST surface, along with the opaque resource record it returns.
//! The library never interprets resource fields beyond passing them back
//! to the renderer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use crate::error::RepositoryError;

/// Kinds of content entity the repository can list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Post,
    Product,
    Category,
    Tag,
}

impl ResourceType {
    /// Identifier used in logs and repository routing (e.g. "post").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Product => "product",
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }
}

/// Opaque content entity returned by the repository.
///
/// Only `id` is interpreted by the library; renderer-facing fields
/// (title, excerpt, images, price, embedded relations) ride along in
/// `fields` untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Resource {
    /// Build a resource with just an id, mostly useful in tests.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Pass-through accessor for a renderer field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Repository trait the editor host implements over its REST client.
///
/// `params` is the ordered parameter list produced by
/// [`crate::query::build_params`]; implementations pass it through to
/// their transport verbatim.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch one page of resources of the given type.
    async fn list(&self, resource_type: ResourceType, params: &[(String, String)])
        -> Result<Vec<Resource>, RepositoryError>;
}
