//! Persistence-facing model of the ship registry.
//! - `ship`: SeaORM entity, `ShipType` and the create/update payload.
//! - `validation` and `rating`: pure field rules and the derived rating.

pub mod errors;
pub mod db;
pub mod ship;
pub mod validation;
pub mod rating;

#[cfg(test)]
mod tests;
