use std::sync::Arc;

use crate::domain::{
    article::ArticleReadRepository, movement::MovementRepository, user::UserRepository,
};

pub struct MovementQueryService {
    pub(super) movement_repo: Arc<dyn MovementRepository>,
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl MovementQueryService {
    pub fn new(
        movement_repo: Arc<dyn MovementRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            movement_repo,
            article_repo,
            user_repo,
        }
    }
}
