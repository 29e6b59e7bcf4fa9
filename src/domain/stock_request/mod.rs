pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewStockRequest, StockRequest};
pub use repository::{StatusCounts, StockRequestFilter, StockRequestRepository};
pub use value_objects::{RequestStatus, StockRequestId};
