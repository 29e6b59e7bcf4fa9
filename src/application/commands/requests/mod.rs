// src/application/commands/requests/mod.rs
mod approve;
mod create;
mod reject;
mod service;

pub use approve::ApproveRequestCommand;
pub use create::CreateRequestCommand;
pub use reject::RejectRequestCommand;
pub use service::StockRequestCommandService;
