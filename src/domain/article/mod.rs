pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle, qr_payload};
pub use repository::{
    ArticleFilter, ArticleReadRepository, ArticleSort, ArticleSortField, ArticleWriteRepository,
};
pub use specifications::{ExpiringSoonSpec, LowStockSpec, SearchSpec};
pub use value_objects::{ArticleDescription, ArticleId, ArticleName, Quantity, StockLevel};
