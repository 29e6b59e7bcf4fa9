mod alerts;
mod charts;
mod service;
mod stats;

pub use charts::STOCK_LEVEL_POINTS;
pub use service::DashboardQueryService;
