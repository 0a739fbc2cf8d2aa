use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::AppResult;
use super::models::BoatPatch;
use crate::core::{Boat, BoatData, BoatId};

#[async_trait]
pub trait BoatRepository: Send + Sync {
    async fn create(&self, data: BoatData) -> AppResult<Boat>;
    async fn list(&self) -> AppResult<Vec<Boat>>;
    async fn get_by_id(&self, id: BoatId) -> AppResult<Option<Boat>>;
    async fn patch(&self, id: BoatId, patch: BoatPatch) -> AppResult<Option<Boat>>;
    async fn replace(&self, id: BoatId, data: BoatData) -> AppResult<Option<Boat>>;
    async fn delete(&self, id: BoatId) -> AppResult<bool>;
}

#[derive(Debug)]
struct Inner {
    boats: BTreeMap<BoatId, Boat>,
    next_id: BoatId,
}

/// Boats kept in process memory, in id order
#[derive(Debug)]
pub struct InMemoryBoatRepository {
    inner: RwLock<Inner>,
}

impl Default for InMemoryBoatRepository {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                boats: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryBoatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoatRepository for InMemoryBoatRepository {
    async fn create(&self, data: BoatData) -> AppResult<Boat> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let boat = Boat::new(id, data.name, data.description);
        inner.boats.insert(id, boat.clone());
        Ok(boat)
    }

    async fn list(&self) -> AppResult<Vec<Boat>> {
        Ok(self.inner.read().await.boats.values().cloned().collect())
    }

    async fn get_by_id(&self, id: BoatId) -> AppResult<Option<Boat>> {
        Ok(self.inner.read().await.boats.get(&id).cloned())
    }

    async fn patch(&self, id: BoatId, patch: BoatPatch) -> AppResult<Option<Boat>> {
        let mut inner = self.inner.write().await;
        let Some(boat) = inner.boats.get_mut(&id) else {
            return Ok(None);
        };

        let mut data = boat.data();
        patch.apply(&mut data);
        *boat = boat.with_data(data);
        Ok(Some(boat.clone()))
    }

    async fn replace(&self, id: BoatId, data: BoatData) -> AppResult<Option<Boat>> {
        let mut inner = self.inner.write().await;
        let Some(boat) = inner.boats.get_mut(&id) else {
            return Ok(None);
        };

        *boat = boat.with_data(data);
        Ok(Some(boat.clone()))
    }

    async fn delete(&self, id: BoatId) -> AppResult<bool> {
        Ok(self.inner.write().await.boats.remove(&id).is_some())
    }
}
