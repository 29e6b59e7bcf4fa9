pub mod entity;
pub mod repository;

pub use entity::{Movement, MovementId, MovementKind, NewMovement};
pub use repository::{MovementFilter, MovementRepository};
