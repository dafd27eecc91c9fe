use async_trait::async_trait;
use models::ship;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use tracing::debug;

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest, ShipOrder};
use crate::ship::criteria::ShipPredicate;
use crate::ship::repository::ShipRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShipRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// `SELECT` restricted by the predicate; no `WHERE` when unconstrained.
pub fn filtered(predicate: &ShipPredicate) -> Select<ship::Entity> {
    let select = ship::Entity::find();
    if predicate.is_unconstrained() {
        select
    } else {
        select.filter(predicate.to_condition())
    }
}

/// Filtered and sorted ascending by `order`, then by id.
pub fn ordered(predicate: &ShipPredicate, order: ShipOrder) -> Select<ship::Entity> {
    let select = filtered(predicate).order_by_asc(order.column());
    if order == ShipOrder::Id {
        select
    } else {
        select.order_by_asc(ship::Column::Id)
    }
}

#[async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn save(&self, ship: ship::ActiveModel) -> Result<ship::Model, ServiceError> {
        let saved = if ship.id.is_not_set() {
            ship.insert(&self.db).await
        } else {
            ship.update(&self.db).await
        };
        saved.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::not_found("ship"),
            other => db_err(other),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        ship::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn delete(&self, ship: ship::Model) -> Result<(), ServiceError> {
        let res = ship.delete(&self.db).await.map_err(db_err)?;
        debug!(rows = res.rows_affected, "ship rows deleted");
        Ok(())
    }

    async fn find_all(&self, predicate: &ShipPredicate, page: &PageRequest) -> Result<Page<ship::Model>, ServiceError> {
        let paginator = ordered(predicate, page.order).paginate(&self.db, page.page_size);
        let total_elements = paginator.num_items().await.map_err(db_err)?;
        let content = paginator.fetch_page(page.page_number).await.map_err(db_err)?;
        Ok(Page::new(content, page, total_elements))
    }

    async fn count(&self, predicate: &ShipPredicate) -> Result<u64, ServiceError> {
        filtered(predicate).count(&self.db).await.map_err(db_err)
    }
}
