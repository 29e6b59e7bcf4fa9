pub mod activity;
pub mod article;
pub mod errors;
pub mod ledger;
pub mod movement;
pub mod pagination;
pub mod stock_request;
pub mod user;
