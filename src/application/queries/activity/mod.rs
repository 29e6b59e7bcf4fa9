mod list;
mod service;

pub use list::ListActivityQuery;
pub use service::ActivityQueryService;
