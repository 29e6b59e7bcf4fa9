mod record;
mod service;

pub use record::RecordMovementCommand;
pub use service::MovementCommandService;
