mod get;
mod list;
mod service;

pub use get::GetRequestQuery;
pub use list::ListRequestsQuery;
pub use service::StockRequestQueryService;
