pub mod articles;
pub mod capability;
pub mod movements;
pub mod requests;
pub mod retry;
pub mod users;
