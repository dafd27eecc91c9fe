use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use models::ship;
use sea_orm::{ActiveValue, TryIntoModel};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::ship::criteria::ShipPredicate;
use crate::ship::repository::ShipRepository;

#[derive(Default)]
struct MemoryState {
    ships: BTreeMap<i64, ship::Model>,
    last_id: i64,
}

/// Process-local repository. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryShipRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryShipRepository {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, ServiceError> {
        self.state.lock().map_err(|_| ServiceError::Db("ship store lock poisoned".into()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.ships.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

fn incomplete(e: sea_orm::DbErr) -> ServiceError { ServiceError::Db(format!("incomplete ship record: {e}")) }

#[async_trait]
impl ShipRepository for InMemoryShipRepository {
    async fn save(&self, mut ship: ship::ActiveModel) -> Result<ship::Model, ServiceError> {
        let mut state = self.lock()?;
        let existing = match ship.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(id),
            ActiveValue::NotSet => None,
        };
        let id = match existing {
            Some(id) if state.ships.contains_key(&id) => id,
            Some(_) => return Err(ServiceError::not_found("ship")),
            None => {
                ship.id = ActiveValue::Set(state.last_id + 1);
                state.last_id + 1
            }
        };
        let model = ship.try_into_model().map_err(incomplete)?;
        state.last_id = state.last_id.max(id);
        state.ships.insert(id, model.clone());
        Ok(model)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        Ok(self.lock()?.ships.get(&id).cloned())
    }

    async fn delete(&self, ship: ship::Model) -> Result<(), ServiceError> {
        self.lock()?.ships.remove(&ship.id);
        Ok(())
    }

    async fn find_all(&self, predicate: &ShipPredicate, page: &PageRequest) -> Result<Page<ship::Model>, ServiceError> {
        let state = self.lock()?;
        let mut matching: Vec<&ship::Model> = state.ships.values().filter(|s| predicate.matches(s)).collect();
        matching.sort_by(|a, b| page.order.compare(a, b));
        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.page_size).unwrap_or(usize::MAX);
        let content = matching.into_iter().skip(offset).take(size).cloned().collect();
        Ok(Page::new(content, page, total))
    }

    async fn count(&self, predicate: &ShipPredicate) -> Result<u64, ServiceError> {
        Ok(self.lock()?.ships.values().filter(|s| predicate.matches(s)).count() as u64)
    }
}
