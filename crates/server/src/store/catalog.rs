//! Stores and items.

use mock_shop_core::{ItemId, Record, loose_string};
use serde_json::{Value, json};

use super::{FixtureStore, Item, Store, StoreError, StoreResult, Tables};

const STORE_NAME_REQUIRED: &str = "Store name is required";

/// How an item route addresses its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    /// An all-digit path segment.
    Id(ItemId),
    /// Any other path segment.
    Name(String),
}

impl ItemKey {
    /// Classify a path segment: digits select by id, anything else by name.
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        segment
            .parse::<ItemId>()
            .map_or_else(|_| Self::Name(segment.to_string()), Self::Id)
    }
}

impl Tables {
    fn find_item_id(&self, key: &ItemKey) -> Option<ItemId> {
        match key {
            ItemKey::Id(id) => self.items.contains_key(id).then_some(*id),
            ItemKey::Name(name) => self
                .items
                .values()
                .find(|item| item.name() == Some(name.as_str()))
                .map(|item| item.id),
        }
    }
}

impl FixtureStore {
    /// Create a store with no items.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if `name` is empty
    /// - [`StoreError::StoreNameTaken`] if the name is in use
    pub fn create_store(&self, name: &str) -> StoreResult<Store> {
        if name.is_empty() {
            return Err(StoreError::Validation(STORE_NAME_REQUIRED));
        }

        let mut tables = self.write()?;
        if tables.stores.contains_key(name) {
            return Err(StoreError::StoreNameTaken(name.to_string()));
        }

        let store = Store {
            id: tables.allocate_store(),
            name: name.to_string(),
            items: Vec::new(),
        };
        tables.stores.insert(store.name.clone(), store.clone());
        drop(tables);

        tracing::info!(store_id = %store.id, name, "Store created");
        Ok(store)
    }

    /// Fetch a store by name.
    ///
    /// # Errors
    ///
    /// [`StoreError::StoreNotFound`] if there is no such store.
    pub fn store(&self, name: &str) -> StoreResult<Store> {
        self.read()?
            .stores
            .get(name)
            .cloned()
            .ok_or(StoreError::StoreNotFound)
    }

    /// Create an item from a request body holding `price` and `store_id`.
    ///
    /// Both fields are stored exactly as given (`null` when absent). If a
    /// store's id matches `store_id` the item name is appended to that
    /// store; otherwise the item is created without a store.
    ///
    /// # Errors
    ///
    /// [`StoreError::ItemNameTaken`] if an item already has this name.
    pub fn create_item(&self, name: &str, body: Record) -> StoreResult<Item> {
        let mut tables = self.write()?;
        if tables
            .items
            .values()
            .any(|item| item.name() == Some(name))
        {
            return Err(StoreError::ItemNameTaken(name.to_string()));
        }

        let id = tables.allocate_item();
        let store_id = body.get_or_null("store_id");
        let mut record = Record::new();
        record.insert("name", Value::String(name.to_string()));
        record.insert("price", body.get_or_null("price"));
        record.insert("store_id", store_id.clone());
        record.insert("itemID", json!(id));
        let item = Item { id, record };
        tables.items.insert(id, item.clone());

        let wanted = loose_string(&store_id);
        let linked = tables
            .stores
            .values_mut()
            .find(|store| store.id.to_string() == wanted)
            .map(|store| {
                store.items.push(name.to_string());
                store.id
            });
        drop(tables);

        match linked {
            Some(store_id) => tracing::info!(item_id = %id, name, %store_id, "Item created"),
            None => tracing::info!(item_id = %id, name, "Item created without a store"),
        }
        Ok(item)
    }

    /// Fetch an item by id or name.
    ///
    /// # Errors
    ///
    /// [`StoreError::ItemNotFound`] if nothing matches.
    pub fn item(&self, key: &ItemKey) -> StoreResult<Item> {
        let tables = self.read()?;
        tables
            .find_item_id(key)
            .and_then(|id| tables.items.get(&id))
            .cloned()
            .ok_or(StoreError::ItemNotFound)
    }

    /// Shallow-merge `changes` into an item and return the result.
    ///
    /// Any field may be overwritten, including `name`; later lookups by
    /// name see the new value.
    ///
    /// # Errors
    ///
    /// [`StoreError::ItemNotFound`] if nothing matches.
    pub fn update_item(&self, key: &ItemKey, changes: Record) -> StoreResult<Item> {
        let mut tables = self.write()?;
        let id = tables.find_item_id(key).ok_or(StoreError::ItemNotFound)?;
        let item = tables.items.get_mut(&id).ok_or(StoreError::ItemNotFound)?;
        item.record.merge(changes);
        let updated = item.clone();
        drop(tables);

        tracing::debug!(item_id = %id, "Item updated");
        Ok(updated)
    }

    /// Every item, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] if the store lock is poisoned.
    pub fn items(&self) -> StoreResult<Vec<Item>> {
        Ok(self.read()?.items.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mock_shop_core::StoreId;

    use super::*;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_item_key_from_segment() {
        assert_eq!(ItemKey::from_segment("12"), ItemKey::Id(ItemId::new(12)));
        assert_eq!(
            ItemKey::from_segment("widget"),
            ItemKey::Name("widget".to_string())
        );
        assert_eq!(
            ItemKey::from_segment("-3"),
            ItemKey::Name("-3".to_string())
        );
    }

    #[test]
    fn test_create_store_and_duplicate() {
        let store = FixtureStore::new();
        let shop = store.create_store("shop1").unwrap();
        assert_eq!(shop.id, StoreId::new(1));
        assert!(shop.items.is_empty());

        assert_eq!(
            store.create_store("shop1"),
            Err(StoreError::StoreNameTaken("shop1".to_string()))
        );
        assert_eq!(
            store.create_store(""),
            Err(StoreError::Validation(STORE_NAME_REQUIRED))
        );
        assert_eq!(store.create_store("shop2").unwrap().id, StoreId::new(2));
    }

    #[test]
    fn test_item_links_to_store_by_loose_id() {
        let store = FixtureStore::new();
        store.create_store("shop1").unwrap();
        store.create_store("shop2").unwrap();

        store
            .create_item("widget", record(json!({"price": 30, "store_id": "1"})))
            .unwrap();
        store
            .create_item("gadget", record(json!({"price": 5, "store_id": 2})))
            .unwrap();
        store
            .create_item("orphan", record(json!({"price": 1, "store_id": "77"})))
            .unwrap();
        store.create_item("loose", Record::new()).unwrap();

        assert_eq!(store.store("shop1").unwrap().items, vec!["widget"]);
        assert_eq!(store.store("shop2").unwrap().items, vec!["gadget"]);
        assert_eq!(store.counts().unwrap().items, 4);
    }

    #[test]
    fn test_item_record_shape() {
        let store = FixtureStore::new();
        let item = store
            .create_item("widget", record(json!({"price": 30, "store_id": "1", "extra": 1})))
            .unwrap();
        assert_eq!(
            Value::from(item.record),
            json!({"name": "widget", "price": 30, "store_id": "1", "itemID": 1})
        );

        let bare = store.create_item("bare", Record::new()).unwrap();
        assert_eq!(
            Value::from(bare.record),
            json!({"name": "bare", "price": null, "store_id": null, "itemID": 2})
        );
    }

    #[test]
    fn test_duplicate_item_name() {
        let store = FixtureStore::new();
        store.create_item("widget", Record::new()).unwrap();
        assert_eq!(
            store.create_item("widget", Record::new()),
            Err(StoreError::ItemNameTaken("widget".to_string()))
        );
        assert_eq!(store.create_item("next", Record::new()).unwrap().id, ItemId::new(2));
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let store = FixtureStore::new();
        store.create_item("widget", record(json!({"price": 3}))).unwrap();

        let by_id = store.item(&ItemKey::Id(ItemId::new(1))).unwrap();
        let by_name = store.item(&ItemKey::from_segment("widget")).unwrap();
        assert_eq!(by_id, by_name);

        assert_eq!(
            store.item(&ItemKey::Id(ItemId::new(2))),
            Err(StoreError::ItemNotFound)
        );
        assert_eq!(
            store.item(&ItemKey::from_segment("nothing")),
            Err(StoreError::ItemNotFound)
        );
    }

    #[test]
    fn test_update_renames_item() {
        let store = FixtureStore::new();
        store.create_item("widget", record(json!({"price": 3}))).unwrap();

        let updated = store
            .update_item(&ItemKey::from_segment("widget"), record(json!({"name": "gizmo", "price": 4})))
            .unwrap();
        assert_eq!(updated.name(), Some("gizmo"));
        assert_eq!(updated.record.get("price"), Some(&json!(4)));
        assert_eq!(updated.record.get("itemID"), Some(&json!(1)));

        assert!(store.item(&ItemKey::from_segment("widget")).is_err());
        assert!(store.item(&ItemKey::from_segment("gizmo")).is_ok());
        // The old name is free again
        assert!(store.create_item("widget", Record::new()).is_ok());
    }

    #[test]
    fn test_items_in_creation_order() {
        let store = FixtureStore::new();
        for name in ["c", "a", "b"] {
            store.create_item(name, Record::new()).unwrap();
        }
        let names: Vec<_> = store
            .items()
            .unwrap()
            .iter()
            .filter_map(|item| item.name().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
