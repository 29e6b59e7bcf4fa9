// src/application/queries/labels.rs
//! Display names for soft references. Rows keep dangling ids after an article
//! or user disappears, so lookups fall back to fixed labels.
use std::collections::{BTreeSet, HashMap};

use crate::{
    application::error::ApplicationResult,
    domain::{
        article::{ArticleId, ArticleReadRepository},
        user::{UserId, UserRepository},
    },
};

pub const DELETED_ARTICLE_LABEL: &str = "deleted article";
pub const UNKNOWN_USER_LABEL: &str = "unknown user";

#[derive(Debug, Default)]
pub struct LabelIndex {
    articles: HashMap<ArticleId, String>,
    users: HashMap<UserId, String>,
}

impl LabelIndex {
    pub async fn load(
        article_repo: &dyn ArticleReadRepository,
        user_repo: &dyn UserRepository,
        article_ids: impl IntoIterator<Item = ArticleId>,
        user_ids: impl IntoIterator<Item = UserId>,
    ) -> ApplicationResult<Self> {
        let article_ids: Vec<ArticleId> = dedup(article_ids);
        let user_ids: Vec<UserId> = dedup(user_ids);

        let articles = if article_ids.is_empty() {
            HashMap::new()
        } else {
            article_repo
                .find_by_ids(&article_ids)
                .await?
                .into_iter()
                .map(|article| (article.id, article.name.into_inner()))
                .collect()
        };
        let users = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user_repo
                .find_by_ids(&user_ids)
                .await?
                .into_iter()
                .map(|user| (user.id, user.name.to_string()))
                .collect()
        };

        Ok(Self { articles, users })
    }

    pub fn article_name(&self, id: ArticleId) -> String {
        self.articles
            .get(&id)
            .cloned()
            .unwrap_or_else(|| DELETED_ARTICLE_LABEL.to_string())
    }

    pub fn user_name(&self, id: UserId) -> String {
        self.users
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER_LABEL.to_string())
    }
}

fn dedup<T: Ord>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    ids.into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
