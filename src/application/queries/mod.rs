pub mod activity;
pub mod articles;
pub mod dashboard;
pub mod labels;
pub mod movements;
pub mod requests;
pub mod users;
