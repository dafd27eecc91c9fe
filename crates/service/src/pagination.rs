//! Pagination and sort order for ship listings.
//!
//! Pages are zero-based and sorted ascending by a single field.

use std::cmp::Ordering;

use models::ship;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_SIZE: u64 = 3;

/// Largest row offset a store accepts (SQL `OFFSET` is a signed bigint).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Sort field of a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    #[default]
    Id,
    Speed,
    Date,
    Rating,
}

impl ShipOrder {
    /// Field name as exposed on the wire.
    pub fn field_name(self) -> &'static str {
        match self {
            ShipOrder::Id => "id",
            ShipOrder::Speed => "speed",
            ShipOrder::Date => "prodDate",
            ShipOrder::Rating => "rating",
        }
    }

    pub fn column(self) -> ship::Column {
        match self {
            ShipOrder::Id => ship::Column::Id,
            ShipOrder::Speed => ship::Column::Speed,
            ShipOrder::Date => ship::Column::ProdDate,
            ShipOrder::Rating => ship::Column::Rating,
        }
    }

    /// Ascending comparison on the sort field, ties broken by id.
    pub fn compare(self, a: &ship::Model, b: &ship::Model) -> Ordering {
        let primary = match self {
            ShipOrder::Id => Ordering::Equal,
            ShipOrder::Speed => a.speed.total_cmp(&b.speed),
            ShipOrder::Date => a.prod_date.cmp(&b.prod_date),
            ShipOrder::Rating => a.rating.total_cmp(&b.rating),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// Page selection for a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page_number: u64,
    /// items per page, at least 1
    pub page_size: u64,
    pub order: ShipOrder,
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64, order: ShipOrder) -> Result<Self, ServiceError> {
        if page_size == 0 {
            return Err(ServiceError::Validation("pageSize must be at least 1".into()));
        }
        let offset = page_number.checked_mul(page_size).filter(|o| *o <= MAX_OFFSET);
        if page_size > MAX_OFFSET || offset.is_none() {
            return Err(ServiceError::Validation("pageNumber * pageSize is too large".into()));
        }
        Ok(Self { page_number, page_size, order })
    }

    /// Fill absent query parameters with defaults.
    pub fn from_parts(
        page_number: Option<u64>,
        page_size: Option<u64>,
        order: Option<ShipOrder>,
    ) -> Result<Self, ServiceError> {
        Self::new(
            page_number.unwrap_or(0),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            order.unwrap_or_default(),
        )
    }

    /// Number of rows before this page.
    pub fn offset(&self) -> u64 {
        // bounded by `new`
        self.page_number * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page_number: 0, page_size: DEFAULT_PAGE_SIZE, order: ShipOrder::Id }
    }
}

/// One page of results plus the size of the whole result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self { content, page_number: request.page_number, page_size: request.page_size, total_elements }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.page_size.max(1))
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}
