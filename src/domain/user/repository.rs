use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::{Email, UserId},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    /// Store `new_user` as an administrator, but only while no account
    /// exists. Concurrent callers are serialized: at most one gets `Some`.
    async fn insert_first_admin(&self, new_user: NewUser) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Batch lookup used to label history rows. Unknown ids are simply absent.
    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>>;
}
