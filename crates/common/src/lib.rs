//! Pieces shared by every crate in the workspace: logging setup and a few
//! wire types that are not tied to the ship domain.

pub mod types;
pub mod utils;
