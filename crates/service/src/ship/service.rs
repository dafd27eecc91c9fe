use std::sync::Arc;

use chrono::Datelike;
use models::rating::{compute_rating, rating_of, rating_value};
use models::ship::{self, ShipPayload};
use models::validation::{convert_identifier, is_id_valid, validate_ship_for_create};
use sea_orm::{ActiveValue::NotSet, Set, TryIntoModel};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::ship::criteria::ShipFilter;
use crate::ship::repository::ShipRepository;

/// Parse a path identifier; anything but a positive integer is malformed.
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    let id = convert_identifier(raw);
    match id {
        Some(id) if is_id_valid(Some(id)) => Ok(id),
        _ => Err(ServiceError::MalformedId(format!("'{raw}' is not a positive integer id"))),
    }
}

pub struct ShipService<R: ShipRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ShipRepository + ?Sized> Clone for ShipService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ShipRepository + ?Sized> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn load(&self, id: i64) -> Result<ship::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("ship"))
    }

    /// Validate, default `is_used` to false, derive the rating and persist.
    #[instrument(skip_all)]
    pub async fn create(&self, payload: Option<ShipPayload>) -> Result<ship::Model, ServiceError> {
        if !validate_ship_for_create(payload.as_ref()) {
            let reason = match &payload {
                None => "request body is empty".to_string(),
                Some(p) => {
                    let mut fields = p.missing_fields();
                    fields.extend(p.invalid_fields());
                    format!("missing or invalid fields: {}", fields.join(", "))
                }
            };
            warn!(%reason, "ship rejected");
            return Err(ServiceError::Validation(reason));
        }
        let Some(ShipPayload {
            name: Some(name),
            planet: Some(planet),
            ship_type: Some(ship_type),
            prod_date: Some(prod_date),
            is_used,
            speed: Some(speed),
            crew_size: Some(crew_size),
        }) = payload
        else {
            return Err(ServiceError::Validation("incomplete ship".into()));
        };

        let is_used = is_used.unwrap_or(false);
        let rating = rating_value(compute_rating(speed, is_used, prod_date.year())?);

        let active = ship::ActiveModel {
            id: NotSet,
            name: Set(name),
            planet: Set(planet),
            ship_type: Set(ship_type),
            prod_date: Set(prod_date),
            is_used: Set(is_used),
            speed: Set(speed),
            crew_size: Set(crew_size),
            rating: Set(rating),
        };
        let saved = self.repo.save(active).await?;
        info!(id = saved.id, rating = saved.rating, "ship created");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ship::Model, ServiceError> {
        self.load(id).await
    }

    /// Apply the present fields of `patch`; nothing is written if any of them is invalid.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: ShipPayload) -> Result<ship::Model, ServiceError> {
        let current = self.load(id).await?;

        let invalid = patch.invalid_fields();
        if !invalid.is_empty() {
            let reason = format!("invalid fields: {}", invalid.join(", "));
            warn!(id, %reason, "ship update rejected");
            return Err(ServiceError::Validation(reason));
        }

        let mut active: ship::ActiveModel = current.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(planet) = patch.planet {
            active.planet = Set(planet);
        }
        if let Some(ship_type) = patch.ship_type {
            active.ship_type = Set(ship_type);
        }
        if let Some(prod_date) = patch.prod_date {
            active.prod_date = Set(prod_date);
        }
        if let Some(is_used) = patch.is_used {
            active.is_used = Set(is_used);
        }
        if let Some(speed) = patch.speed {
            active.speed = Set(speed);
        }
        if let Some(crew_size) = patch.crew_size {
            active.crew_size = Set(crew_size);
        }

        let merged = active
            .clone()
            .try_into_model()
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        active.rating = Set(rating_value(rating_of(&merged)?));
        let saved = self.repo.save(active).await?;
        debug!(id, rating = saved.rating, "ship updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let current = self.load(id).await?;
        self.repo.delete(current).await?;
        info!(id, "ship deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ShipFilter, page: &PageRequest) -> Result<Page<ship::Model>, ServiceError> {
        self.repo.find_all(&filter.to_predicate(), page).await
    }

    #[instrument(skip(self))]
    pub async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        self.repo.count(&filter.to_predicate()).await
    }
}
