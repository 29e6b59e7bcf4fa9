// src/infrastructure/memory/mod.rs
//! Process-local storage backend. Every port shares one `RwLock`, so ledger
//! operations are atomic simply by holding the write guard for their whole
//! duration. Nothing here awaits while a guard is held.
use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;

use crate::application::services::Repositories;
use crate::domain::activity::{ActivityFilter, ActivityLogEntry, ActivityLogRepository, NewActivity};
use crate::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSort, ArticleSortField,
    ArticleUpdate, ArticleWriteRepository, LowStockSpec, NewArticle, SearchSpec,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ledger::{
    AdjustmentReceipt, ApprovalReceipt, RequestApproval, RequestRejection, StockAdjustment,
    StockLedger, approval_activity, movement_activity, rejection_activity,
};
use crate::domain::movement::{Movement, MovementFilter, MovementKind, MovementRepository, NewMovement};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::stock_request::{
    NewStockRequest, StatusCounts, StockRequest, StockRequestFilter, StockRequestId,
    StockRequestRepository,
};
use crate::domain::user::{Email, NewUser, Role, User, UserId, UserRepository};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    articles: HashMap<ArticleId, Article>,
    requests: HashMap<StockRequestId, StockRequest>,
    movements: Vec<Movement>,
    activity: Vec<ActivityLogEntry>,
}

impl State {
    fn request_mut(&mut self, id: StockRequestId) -> DomainResult<&mut StockRequest> {
        self.requests
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("request not found".into()))
    }

    fn insert_user(&mut self, new_user: NewUser) -> DomainResult<User> {
        if self.users.values().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let user = User {
            id: new_user.id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn article(&self, id: ArticleId) -> DomainResult<&Article> {
        self.articles
            .get(&id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose the store through every storage port.
    pub fn repositories(self: Arc<Self>) -> Repositories {
        Repositories {
            users: self.clone(),
            article_write: self.clone(),
            article_read: self.clone(),
            requests: self.clone(),
            movements: self.clone(),
            activity: self.clone(),
            ledger: self,
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

/// `key` should end with the row id so equal timestamps still sort the same
/// way on every call, matching the `ORDER BY created_at, id` of the Postgres
/// repositories.
fn by_created_at<T, K: Ord>(
    order: SortOrder,
    key: impl Fn(&T) -> K,
) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| match order {
        SortOrder::Asc => key(a).cmp(&key(b)),
        SortOrder::Desc => key(b).cmp(&key(a)),
    }
}

fn compare_articles(sort: ArticleSort, a: &Article, b: &Article) -> Ordering {
    let ordering = match sort.field {
        ArticleSortField::Name => a.name.as_str().cmp(b.name.as_str()),
        ArticleSortField::Quantity => a.quantity.cmp(&b.quantity),
        ArticleSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ArticleSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
    .then_with(|| a.id.cmp(&b.id));
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.read()?.users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        self.write()?.insert_user(new_user)
    }

    async fn insert_first_admin(&self, new_user: NewUser) -> DomainResult<Option<User>> {
        let mut state = self.write()?;
        if !state.users.is_empty() {
            return Ok(None);
        }
        state
            .insert_user(NewUser {
                role: Role::Admin,
                ..new_user
            })
            .map(Some)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.write()?;
        if state.articles.contains_key(&article.id) {
            return Err(DomainError::Conflict("article already exists".into()));
        }
        let article = Article {
            id: article.id,
            name: article.name,
            description: article.description,
            quantity: article.quantity,
            min_quantity: article.min_quantity,
            expiration_date: article.expiration_date,
            image: article.image,
            qr_code: article.qr_code,
            created_at: article.created_at,
            updated_at: article.created_at,
        };
        state.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.write()?;
        let article = state
            .articles
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "article was modified concurrently, please retry".into(),
            ));
        }
        update.apply_to(article);
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.write()?
            .articles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.read()?.articles.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ArticleId]) -> DomainResult<Vec<Article>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.articles.get(id).cloned())
            .collect())
    }

    async fn list_page(
        &self,
        filter: &ArticleFilter,
        sort: ArticleSort,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        let search = filter.search_term().map(SearchSpec::new);
        let mut items: Vec<Article> = self
            .read()?
            .articles
            .values()
            .filter(|a| search.as_ref().is_none_or(|spec| spec.is_satisfied_by(a)))
            .filter(|a| !filter.low_stock || LowStockSpec.is_satisfied_by(a))
            .cloned()
            .collect();
        items.sort_by(|a, b| compare_articles(sort, a, b));
        Ok(page.slice(items))
    }

    async fn list_all(&self) -> DomainResult<Vec<Article>> {
        let mut items: Vec<Article> = self.read()?.articles.values().cloned().collect();
        items.sort_by(by_created_at(SortOrder::Desc, |a: &Article| (a.created_at, a.id)));
        Ok(items)
    }
}

#[async_trait]
impl StockRequestRepository for InMemoryStore {
    async fn insert(&self, request: NewStockRequest) -> DomainResult<StockRequest> {
        let request = request.into_pending();
        self.write()?.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: StockRequestId) -> DomainResult<Option<StockRequest>> {
        Ok(self.read()?.requests.get(&id).cloned())
    }

    async fn list_page(
        &self,
        filter: &StockRequestFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<StockRequest>> {
        let mut items: Vec<StockRequest> = self
            .read()?
            .requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        items.sort_by(by_created_at(order, |r: &StockRequest| (r.created_at, r.id)));
        Ok(page.slice(items))
    }

    async fn count_by_status(&self, requester: Option<UserId>) -> DomainResult<StatusCounts> {
        let state = self.read()?;
        let mut counts = StatusCounts::default();
        for request in state
            .requests
            .values()
            .filter(|r| requester.is_none_or(|id| r.requester_id == id))
        {
            counts.add(request.status, 1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl MovementRepository for InMemoryStore {
    async fn list_page(
        &self,
        filter: &MovementFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<Movement>> {
        let mut items: Vec<Movement> = self
            .read()?
            .movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        items.sort_by(by_created_at(order, |m: &Movement| (m.created_at, m.id)));
        Ok(page.slice(items))
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryStore {
    async fn append(&self, entry: NewActivity) -> DomainResult<ActivityLogEntry> {
        let entry = entry.into_entry();
        self.write()?.activity.push(entry.clone());
        Ok(entry)
    }

    async fn list_page(
        &self,
        filter: &ActivityFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<ActivityLogEntry>> {
        let mut items: Vec<ActivityLogEntry> = self
            .read()?
            .activity
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        items.sort_by(by_created_at(order, |e: &ActivityLogEntry| (e.created_at, e.id)));
        Ok(page.slice(items))
    }
}

#[async_trait]
impl StockLedger for InMemoryStore {
    async fn approve_request(&self, approval: RequestApproval) -> DomainResult<ApprovalReceipt> {
        let RequestApproval {
            request_id,
            actor,
            at,
        } = approval;
        let mut state = self.write()?;

        // Work on copies and write back only once every check has passed.
        let mut request = state.request_mut(request_id)?.clone();
        request.approve(actor, at)?;
        let mut article = state.article(request.article_id)?.clone();
        article.debit(request.quantity, at)?;

        let movement =
            NewMovement::for_approval(request.id, article.id, request.quantity, actor, at)
                .into_movement();
        let activity = approval_activity(&request, actor, at).into_entry();

        state.articles.insert(article.id, article.clone());
        *state.request_mut(request_id)? = request.clone();
        state.movements.push(movement.clone());
        state.activity.push(activity);

        Ok(ApprovalReceipt {
            request,
            article,
            movement,
        })
    }

    async fn reject_request(&self, rejection: RequestRejection) -> DomainResult<StockRequest> {
        let RequestRejection {
            request_id,
            actor,
            at,
        } = rejection;
        let mut state = self.write()?;

        let stored = state.request_mut(request_id)?;
        let mut request = stored.clone();
        request.reject(actor, at)?;
        *stored = request.clone();

        state
            .activity
            .push(rejection_activity(&request, actor, at).into_entry());
        Ok(request)
    }

    async fn apply_movement(
        &self,
        adjustment: StockAdjustment,
    ) -> DomainResult<AdjustmentReceipt> {
        let StockAdjustment {
            article_id,
            kind,
            quantity,
            actor,
            reason,
            at,
        } = adjustment;
        let mut state = self.write()?;

        let mut article = state.article(article_id)?.clone();
        match kind {
            MovementKind::Entry => article.credit(quantity, at)?,
            MovementKind::Exit => article.debit(quantity, at)?,
        }
        let movement = NewMovement::new(article_id, kind, quantity, actor, reason, at).into_movement();
        let activity = movement_activity(&movement, &article).into_entry();

        state.articles.insert(article.id, article.clone());
        state.movements.push(movement.clone());
        state.activity.push(activity);

        Ok(AdjustmentReceipt { article, movement })
    }
}
