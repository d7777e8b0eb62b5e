//! Attribute bag patch helpers.
//!
//! The editor host owns the attribute bag; the store receives a snapshot
//! each render and proposes patches back over a channel. Every helper is
//! copy-on-write: the caller's bag is never mutated, and a patch always
//! replaces the named key(s) wholesale.

use log::debug;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::error::BlockError;

/// Flat attribute bag of JSON-compatible values, as held by the host.
pub type AttributeBag = Map<String, Value>;

/// Partial bag proposed to the host; the host replaces exactly the keys
/// present here and persists the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributePatch {
    pub values: AttributeBag,
}

impl AttributePatch {
    fn single(key: &str, value: Value) -> Self {
        let mut values = AttributeBag::new();
        values.insert(key.to_string(), value);
        Self { values }
    }
}

/// Block kinds the store validates attribute bags for.
///
/// Each kind names the attributes it cannot operate without; a bag
/// missing one of them is rejected at store construction instead of
/// failing later in a fetch or render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    PostGrid,
    PostCarousel,
    PostSlider,
    ProductCarousel,
    Faq,
}

impl BlockKind {
    /// Attribute keys that must be present for this kind.
    #[must_use]
    pub const fn required_keys(self) -> &'static [&'static str] {
        match self {
            Self::PostGrid | Self::PostCarousel | Self::PostSlider => &["postsPerPage"],
            Self::ProductCarousel => &["postsPerPage", "categories"],
            Self::Faq => &["faqItems"],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostGrid => "post-grid",
            Self::PostCarousel => "post-carousel",
            Self::PostSlider => "post-slider",
            Self::ProductCarousel => "product-carousel",
            Self::Faq => "faq",
        }
    }
}

/// Patch-proposing wrapper around the host's attribute bag.
pub struct AttributeStore {
    kind: BlockKind,
    patch_sender: mpsc::UnboundedSender<AttributePatch>,
}

impl AttributeStore {
    /// Create a store for a block kind. The returned receiver delivers
    /// the patches the host should apply and persist.
    pub fn new(kind: BlockKind) -> (Self, mpsc::UnboundedReceiver<AttributePatch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                kind,
                patch_sender: tx,
            },
            rx,
        )
    }

    /// Create a store after checking the bag carries the attributes the
    /// kind requires.
    pub fn for_kind(
        kind: BlockKind,
        bag: &AttributeBag,
    ) -> Result<(Self, mpsc::UnboundedReceiver<AttributePatch>), BlockError> {
        for key in kind.required_keys() {
            if !bag.contains_key(*key) {
                return Err(BlockError::Configuration(format!(
                    "block kind '{}' requires attribute '{}'",
                    kind.as_str(),
                    key
                )));
            }
        }
        Ok(Self::new(kind))
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Replace one attribute.
    pub fn update(&self, key: &str, value: Value) {
        self.send(AttributePatch::single(key, value));
    }

    /// Replace one field inside an object-valued attribute, keeping its
    /// sibling fields. A missing or non-object parent starts from an
    /// empty object.
    pub fn update_nested(&self, bag: &AttributeBag, parent_key: &str, child_key: &str, value: Value) {
        let mut object = match bag.get(parent_key) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        object.insert(child_key.to_string(), value);
        self.send(AttributePatch::single(parent_key, Value::Object(object)));
    }

    /// Replace one field of one element of an array-valued attribute.
    ///
    /// Out-of-range indices make the call a no-op: nothing is sent to
    /// the host and the error is returned for the caller to ignore or
    /// report. That usually means a stale UI event raced an attribute
    /// change, not a bug worth crashing over.
    pub fn update_array_item(
        &self,
        bag: &AttributeBag,
        array_key: &str,
        index: usize,
        field: &str,
        value: Value,
    ) -> Result<(), BlockError> {
        let items = array_items(bag, array_key);
        if index >= items.len() {
            debug!("stale array update for '{array_key}'[{index}] dropped");
            return Err(BlockError::Index {
                index,
                len: items.len(),
            });
        }

        let mut items = items.clone();
        let mut element = match items[index].clone() {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        element.insert(field.to_string(), value);
        items[index] = Value::Object(element);

        self.send(AttributePatch::single(array_key, Value::Array(items)));
        Ok(())
    }

    /// Append an item to an array-valued attribute, creating the array
    /// if it is absent.
    pub fn add_array_item(&self, bag: &AttributeBag, array_key: &str, item: Value) {
        let mut items = array_items(bag, array_key).clone();
        items.push(item);
        self.send(AttributePatch::single(array_key, Value::Array(items)));
    }

    /// Remove an element by position, shifting later elements down.
    /// Out-of-range indices are a reported no-op like
    /// [`Self::update_array_item`].
    pub fn remove_array_item(&self, bag: &AttributeBag, array_key: &str, index: usize) -> Result<(), BlockError> {
        let items = array_items(bag, array_key);
        if index >= items.len() {
            debug!("stale array removal for '{array_key}'[{index}] dropped");
            return Err(BlockError::Index {
                index,
                len: items.len(),
            });
        }

        let mut items = items.clone();
        items.remove(index);
        self.send(AttributePatch::single(array_key, Value::Array(items)));
        Ok(())
    }

    fn send(&self, patch: AttributePatch) {
        let _ = self.patch_sender.send(patch);
    }
}

static EMPTY_ITEMS: Vec<Value> = Vec::new();

fn array_items<'a>(bag: &'a AttributeBag, array_key: &str) -> &'a Vec<Value> {
    match bag.get(array_key) {
        Some(Value::Array(items)) => items,
        _ => &EMPTY_ITEMS,
    }
}
