//! Service layer for the ship registry.
//! - `ship::criteria` turns optional filter parameters into a typed predicate.
//! - `ship::repository` abstracts the store; SeaORM and in-memory backends live in `ship::repo`.
//! - `ship::service` applies validation and rating rules on top of a repository.

pub mod errors;
pub mod pagination;
pub mod ship;
#[cfg(test)]
pub mod test_support;
