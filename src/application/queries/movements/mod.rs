mod list;
mod service;

pub use list::ListMovementsQuery;
pub use service::MovementQueryService;
