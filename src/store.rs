//! In-memory item store.
//!
//! Items live in an ordered `Vec` behind a `tokio::sync::RwLock`. Lookups
//! are linear scans. Nothing is persisted.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;

/// Caller-supplied item fields.
pub type Fields = Map<String, Value>;

/// A stored record: an assigned id plus whatever fields the caller sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: u64,
    /// Open-ended fields, flattened next to `id`.
    #[serde(flatten)]
    pub fields: Fields,
}

// Free-form object with a required integer `id`.
impl utoipa::PartialSchema for Item {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .description(Some("Stored item: an assigned id plus caller-supplied fields"))
            .property("id", ObjectBuilder::new().schema_type(Type::Integer))
            .required("id")
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .into()
    }
}

impl utoipa::ToSchema for Item {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Item")
    }
}

impl Item {
    /// Build an item, dropping any `id` key from `fields`.
    pub fn new(id: u64, mut fields: Fields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Shallow merge: supplied fields overwrite, others are kept.
    fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if key != "id" {
                self.fields.insert(key, value);
            }
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<Item>,
    /// Highest id ever seen by this store.
    last_id: u64,
}

/// Shared handle to the item sequence.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Inner>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `items` in order.
    pub fn with_items(items: Vec<Item>) -> Self {
        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self {
            inner: Arc::new(RwLock::new(Inner { items, last_id })),
        }
    }

    /// Create a store holding the demo record `{id: 1, name: "item-1"}`.
    pub fn seeded() -> Self {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::from("item-1"));
        Self::with_items(vec![Item::new(1, fields)])
    }

    /// All items, in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    /// Item with the given id.
    pub async fn get(&self, id: u64) -> Option<Item> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Append a new item with the next id and return it.
    pub async fn create(&self, fields: Fields) -> Item {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = Item::new(inner.last_id, fields);
        inner.items.push(item.clone());
        item
    }

    /// Merge `fields` into the item with the given id.
    ///
    /// Returns `None` when no such item exists.
    pub async fn update(&self, id: u64, fields: Fields) -> Option<Item> {
        let mut inner = self.inner.write().await;
        let item = inner.items.iter_mut().find(|item| item.id == id)?;
        item.merge(fields);
        Some(item.clone())
    }

    /// Remove the item with the given id. Returns whether one was removed.
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.items.iter().position(|item| item.id == id) {
            Some(index) => {
                inner.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }
}
