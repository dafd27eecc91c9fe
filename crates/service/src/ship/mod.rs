//! Ship registry: filter composition, storage abstraction, business rules.

pub mod criteria;
pub mod repository;
pub mod repo;
pub mod service;

pub use criteria::{ShipFilter, ShipPredicate};
pub use repository::ShipRepository;
pub use service::ShipService;
