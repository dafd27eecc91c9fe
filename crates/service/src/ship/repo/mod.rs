pub mod memory;
pub mod seaorm;

pub use memory::InMemoryShipRepository;
pub use seaorm::SeaOrmShipRepository;
