pub mod entity;
pub mod repository;

pub use entity::{ActivityAction, ActivityId, ActivityLogEntry, NewActivity, TargetType};
pub use repository::{ActivityFilter, ActivityLogRepository};
