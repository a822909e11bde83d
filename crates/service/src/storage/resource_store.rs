use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::resources::Resource;
use super::FIRST_ID;

struct Collection<R> {
    records: Vec<R>,
    next_id: i64,
}

impl<R: Resource> Collection<R> {
    fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn position_or_not_found(&self, id: i64) -> Result<usize, ServiceError> {
        self.position(id).ok_or_else(R::not_found)
    }
}

/// Ordered in-memory collection of one record shape with its own id counter.
///
/// Reads (`list`, `get`) share the lock; every mutation holds it exclusively,
/// so the counter and id uniqueness stay consistent under concurrent requests.
pub struct ResourceStore<R> {
    inner: RwLock<Collection<R>>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self { Self::new(FIRST_ID) }
}

impl<R: Resource> ResourceStore<R> {
    /// Empty collection whose first created record gets `first_id`.
    pub fn new(first_id: i64) -> Self {
        Self::with_records(first_id, Vec::new())
    }

    /// Collection pre-filled with `records` in the given order. The counter
    /// starts at `first_id` or one past the highest existing id, whichever
    /// is larger.
    pub fn with_records(first_id: i64, records: Vec<R>) -> Self {
        let next_id = records
            .iter()
            .map(|r| r.id().saturating_add(1))
            .fold(first_id, i64::max);
        Self { inner: RwLock::new(Collection { records, next_id }) }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<R> {
        let c = self.inner.read().await;
        c.records.clone()
    }

    pub async fn get(&self, id: i64) -> Result<R, ServiceError> {
        let c = self.inner.read().await;
        let idx = c.position_or_not_found(id)?;
        Ok(c.records[idx].clone())
    }

    /// Validate, assign the next id and append.
    pub async fn create(&self, payload: R::Payload) -> Result<R, ServiceError> {
        if !R::has_required(&payload) {
            return Err(ServiceError::invalid_input(R::MESSAGES.missing_fields));
        }
        let mut c = self.inner.write().await;
        let id = c.next_id;
        c.next_id += 1;
        let record = R::from_payload(id, payload);
        c.records.push(record.clone());
        debug!(collection = R::COLLECTION, id, "record created");
        Ok(record)
    }

    /// Total replacement keeping id and position. Existence is checked
    /// before the payload.
    pub async fn replace(&self, id: i64, payload: R::Payload) -> Result<R, ServiceError> {
        let mut c = self.inner.write().await;
        let idx = c.position_or_not_found(id)?;
        if !R::has_required(&payload) {
            return Err(ServiceError::invalid_input(R::MESSAGES.replace_incomplete));
        }
        let record = R::from_payload(id, payload);
        c.records[idx] = record.clone();
        debug!(collection = R::COLLECTION, id, "record replaced");
        Ok(record)
    }

    /// Apply a partial payload in place. No required-field check; the
    /// original id is restored whatever the patch did.
    pub async fn merge(&self, id: i64, patch: R::Patch) -> Result<R, ServiceError> {
        let mut c = self.inner.write().await;
        let idx = c.position_or_not_found(id)?;
        let record = &mut c.records[idx];
        record.apply_patch(patch);
        record.set_id(id);
        debug!(collection = R::COLLECTION, id, "record merged");
        Ok(record.clone())
    }

    /// Remove and return the record. Its id is never handed out again.
    pub async fn delete(&self, id: i64) -> Result<R, ServiceError> {
        let mut c = self.inner.write().await;
        let idx = c.position_or_not_found(id)?;
        let removed = c.records.remove(idx);
        debug!(collection = R::COLLECTION, id, "record deleted");
        Ok(removed)
    }

    /// Id the next successful create will receive.
    pub async fn next_id(&self) -> i64 {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::product::{Product, ProductPatch, ProductPayload};
    use crate::resources::user::{User, UserPatch, UserPayload};
    use serde_json::{json, Number};

    fn user_payload(v: serde_json::Value) -> UserPayload {
        serde_json::from_value(v).unwrap()
    }

    fn product(id: i64, name: &str, price: i64, stock: i64) -> Product {
        Product { id, name: name.into(), price: Number::from(price), stock }
    }

    fn products_with_p() -> ResourceStore<Product> {
        ResourceStore::with_records(FIRST_ID, vec![product(1, "P", 100, 5)])
    }

    #[tokio::test]
    async fn create_assigns_ids_from_104() -> anyhow::Result<()> {
        let users = ResourceStore::<User>::default();
        let a = users.create(user_payload(json!({"name": "A", "email": "a@x.com"}))).await?;
        assert_eq!(
            serde_json::to_value(&a)?,
            json!({"id": 104, "name": "A", "email": "a@x.com", "age": null, "ville": null})
        );
        let b = users.create(user_payload(json!({"name": "B", "email": "b@x.com", "age": 30}))).await?;
        assert_eq!(b.id, 105);
        assert_eq!(b.age, Some(30));
        Ok(())
    }

    #[tokio::test]
    async fn ids_strictly_increase() -> anyhow::Result<()> {
        let users = ResourceStore::<User>::default();
        let mut last = 0;
        for i in 0..20 {
            let u = users
                .create(user_payload(json!({"name": format!("u{i}"), "email": "e@x.com"})))
                .await?;
            assert!(u.id > last);
            last = u.id;
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_leaves_collection_untouched() {
        let users = ResourceStore::<User>::default();
        let err = users.create(user_payload(json!({"name": "A"}))).await.unwrap_err();
        assert_eq!(err, ServiceError::InvalidInput("Nom et email requis".into()));
        let err = users.create(user_payload(json!({"name": "", "email": "a@x.com"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(users.is_empty().await);
        assert_eq!(users.next_id().await, 104);

        let products = ResourceStore::<Product>::default();
        let err = products.create(ProductPayload { name: Some("P".into()), ..Default::default() }).await.unwrap_err();
        assert_eq!(err.to_string(), "Nom et prix requis");
        assert_eq!(products.next_id().await, 104);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_change_nothing() {
        let products = products_with_p();
        let before = products.list().await;
        let nf = ServiceError::NotFound("Produit non trouvé".into());

        assert_eq!(products.get(42).await.unwrap_err(), nf);
        let full = ProductPayload { name: Some("Q".into()), price: Some(Number::from(1)), stock: None };
        assert_eq!(products.replace(42, full).await.unwrap_err(), nf);
        assert_eq!(products.merge(42, ProductPatch::default()).await.unwrap_err(), nf);
        assert_eq!(products.delete(42).await.unwrap_err(), nf);

        assert_eq!(products.list().await, before);
        assert_eq!(products.next_id().await, 104);
    }

    #[tokio::test]
    async fn replace_checks_existence_before_payload() {
        let products = products_with_p();
        let err = products.replace(42, ProductPayload::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = products.replace(1, ProductPayload::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::InvalidInput("PUT nécessite toutes les données".into()));
        assert_eq!(products.get(1).await.unwrap(), product(1, "P", 100, 5));
    }

    #[tokio::test]
    async fn merge_overwrites_only_given_fields() -> anyhow::Result<()> {
        let products = products_with_p();
        let patch: ProductPatch = serde_json::from_value(json!({"stock": 3}))?;
        let merged = products.merge(1, patch).await?;
        assert_eq!(serde_json::to_value(&merged)?, json!({"id": 1, "name": "P", "price": 100, "stock": 3}));
        assert_eq!(products.get(1).await?, merged);
        Ok(())
    }

    #[tokio::test]
    async fn merge_never_moves_the_id() -> anyhow::Result<()> {
        let products = products_with_p();
        let patch: ProductPatch = serde_json::from_value(json!({"id": 999, "name": "R"}))?;
        let merged = products.merge(1, patch).await?;
        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "R");
        assert!(products.get(999).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn merge_skips_required_field_validation() -> anyhow::Result<()> {
        let users = ResourceStore::<User>::default();
        let u = users.create(user_payload(json!({"name": "A", "email": "a@x.com", "ville": "Dakar"}))).await?;
        let patch: UserPatch = serde_json::from_value(json!({"name": "", "ville": null}))?;
        let merged = users.merge(u.id, patch).await?;
        assert_eq!(merged.name, "");
        assert_eq!(merged.email, "a@x.com");
        assert_eq!(merged.ville, None);
        Ok(())
    }

    #[tokio::test]
    async fn replace_drops_absent_fields_to_defaults() -> anyhow::Result<()> {
        let products = products_with_p();
        let payload: ProductPayload = serde_json::from_value(json!({"name": "Q", "price": 50}))?;
        let replaced = products.replace(1, payload).await?;
        assert_eq!(serde_json::to_value(&replaced)?, json!({"id": 1, "name": "Q", "price": 50, "stock": 0}));
        assert_eq!(products.get(1).await?, replaced);
        Ok(())
    }

    #[tokio::test]
    async fn replace_and_merge_keep_position() -> anyhow::Result<()> {
        let products = ResourceStore::with_records(
            FIRST_ID,
            vec![product(1, "a", 1, 0), product(2, "b", 2, 0), product(3, "c", 3, 0)],
        );
        let payload: ProductPayload = serde_json::from_value(json!({"name": "B", "price": 20}))?;
        products.replace(2, payload).await?;
        products.merge(1, serde_json::from_value(json!({"name": "A"}))?).await?;
        let ids: Vec<i64> = products.list().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(products.get(2).await?.name, "B");
        Ok(())
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reused() -> anyhow::Result<()> {
        let users = ResourceStore::<User>::default();
        let a = users.create(user_payload(json!({"name": "A", "email": "a@x.com"}))).await?;
        let removed = users.delete(a.id).await?;
        assert_eq!(removed, a);
        assert!(matches!(users.get(a.id).await, Err(ServiceError::NotFound(_))));
        assert!(users.list().await.iter().all(|u| u.id != a.id));

        let b = users.create(user_payload(json!({"name": "B", "email": "b@x.com"}))).await?;
        assert_eq!(b.id, a.id + 1);
        Ok(())
    }

    #[tokio::test]
    async fn counter_starts_past_preloaded_records() {
        let low = ResourceStore::with_records(FIRST_ID, vec![product(1, "a", 1, 0)]);
        assert_eq!(low.next_id().await, 104);
        let high = ResourceStore::with_records(FIRST_ID, vec![product(200, "a", 1, 0)]);
        assert_eq!(high.next_id().await, 201);
    }

    #[test]
    fn resolve_id_maps_garbage_to_not_found() {
        assert_eq!(User::resolve_id("104"), Ok(104));
        assert_eq!(User::resolve_id("abc"), Err(ServiceError::NotFound("Utilisateur non trouvé".into())));
    }
}
