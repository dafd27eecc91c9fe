use async_trait::async_trait;
use models::ship;

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::ship::criteria::ShipPredicate;

/// Storage collaborator for ships.
#[async_trait]
pub trait ShipRepository: Send + Sync {
    /// Insert when `id` is `NotSet` (the store assigns it), update otherwise.
    async fn save(&self, ship: ship::ActiveModel) -> Result<ship::Model, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError>;
    async fn delete(&self, ship: ship::Model) -> Result<(), ServiceError>;
    async fn find_all(&self, predicate: &ShipPredicate, page: &PageRequest) -> Result<Page<ship::Model>, ServiceError>;
    async fn count(&self, predicate: &ShipPredicate) -> Result<u64, ServiceError>;
}
