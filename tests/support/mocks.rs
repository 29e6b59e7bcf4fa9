// tests/support/mocks.rs
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use stockify::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
};
use stockify::domain::user::{Role, UserId};
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

pub static ADMIN_ID: Lazy<UserId> = Lazy::new(|| {
    UserId::new(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001))
});
pub static USER_ID: Lazy<UserId> = Lazy::new(|| {
    UserId::new(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002))
});

static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

pub fn actor(id: UserId, name: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        name: name.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: fixed_now(),
        expires_at: fixed_now() + Duration::hours(1),
    }
}

pub fn admin_actor() -> AuthenticatedUser {
    actor(*ADMIN_ID, "Admin", Role::Admin)
}

pub fn user_actor() -> AuthenticatedUser {
    actor(*USER_ID, "Jane", Role::User)
}

/// Resolves the two well-known tokens and refuses everything else.
pub struct DummyTokenManager;

#[async_trait::async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Ok(AuthTokenDto {
            token: format!("token-for-{}", subject.user_id),
            issued_at: fixed_now(),
            expires_at: fixed_now() + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(admin_actor()),
            USER_TOKEN => Ok(user_actor()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Reversible "hash" so tests stay fast.
pub struct DummyPasswordHasher;

#[async_trait::async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash.strip_prefix("plain:") == Some(password) {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}
