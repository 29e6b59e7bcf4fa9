pub mod activity;
pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod movements;
pub mod pagination;
pub mod requests;
pub mod serde_time;
pub mod users;

pub use activity::ActivityDto;
pub use articles::ArticleDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use dashboard::{AlertDto, AlertKind, ChartsDto, DashboardStatsDto, StockLevelPoint};
pub use movements::MovementDto;
pub use pagination::PageDto;
pub use requests::StockRequestDto;
pub use users::{CapabilityView, UserDto, UserProfileDto};
