use std::sync::Arc;

use crate::domain::{activity::ActivityLogRepository, user::UserRepository};

pub struct ActivityQueryService {
    pub(super) activity_repo: Arc<dyn ActivityLogRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl ActivityQueryService {
    pub fn new(
        activity_repo: Arc<dyn ActivityLogRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            activity_repo,
            user_repo,
        }
    }
}
