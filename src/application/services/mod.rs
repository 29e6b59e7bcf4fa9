// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            articles::ArticleCommandService, movements::MovementCommandService,
            requests::StockRequestCommandService, retry::RetryPolicy, users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{
            activity::ActivityQueryService, articles::ArticleQueryService,
            dashboard::DashboardQueryService, movements::MovementQueryService,
            requests::StockRequestQueryService, users::UserQueryService,
        },
    },
    domain::{
        activity::ActivityLogRepository,
        article::{ArticleReadRepository, ArticleWriteRepository},
        ledger::StockLedger,
        movement::MovementRepository,
        stock_request::StockRequestRepository,
        user::UserRepository,
    },
};

/// Storage ports, wired by the infrastructure layer.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub requests: Arc<dyn StockRequestRepository>,
    pub movements: Arc<dyn MovementRepository>,
    pub activity: Arc<dyn ActivityLogRepository>,
    pub ledger: Arc<dyn StockLedger>,
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub ledger_retry: RetryPolicy,
    pub expiry_alert_days: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            ledger_retry: RetryPolicy::default(),
            expiry_alert_days: 30,
        }
    }
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub request_commands: Arc<StockRequestCommandService>,
    pub movement_commands: Arc<MovementCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub request_queries: Arc<StockRequestQueryService>,
    pub movement_queries: Arc<MovementQueryService>,
    pub activity_queries: Arc<ActivityQueryService>,
    pub dashboard_queries: Arc<DashboardQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            password_hasher,
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.activity),
            Arc::clone(&clock),
        ));

        let request_commands = Arc::new(StockRequestCommandService::new(
            Arc::clone(&repos.requests),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.users),
            Arc::clone(&repos.activity),
            Arc::clone(&repos.ledger),
            Arc::clone(&clock),
            settings.ledger_retry.clone(),
        ));

        let movement_commands = Arc::new(MovementCommandService::new(
            Arc::clone(&repos.ledger),
            Arc::clone(&clock),
            settings.ledger_retry,
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&repos.article_read)));
        let request_queries = Arc::new(StockRequestQueryService::new(
            Arc::clone(&repos.requests),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.users),
        ));
        let movement_queries = Arc::new(MovementQueryService::new(
            Arc::clone(&repos.movements),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.users),
        ));
        let activity_queries = Arc::new(ActivityQueryService::new(
            Arc::clone(&repos.activity),
            Arc::clone(&repos.users),
        ));
        let dashboard_queries = Arc::new(DashboardQueryService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.requests),
            Arc::clone(&repos.users),
            clock,
            settings.expiry_alert_days,
        ));

        Self {
            user_commands,
            article_commands,
            request_commands,
            movement_commands,
            user_queries,
            article_queries,
            request_queries,
            movement_queries,
            activity_queries,
            dashboard_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Resolve a raw bearer token into the calling user.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
