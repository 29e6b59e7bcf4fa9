use super::StockRequestQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, StockRequestDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::stock_request::StockRequestId,
};

pub struct GetRequestQuery {
    pub id: String,
}

impl StockRequestQueryService {
    /// Another user's request is reported as missing rather than forbidden.
    pub async fn get_request(
        &self,
        actor: &AuthenticatedUser,
        query: GetRequestQuery,
    ) -> ApplicationResult<StockRequestDto> {
        let scope = Self::visibility_scope(actor)?;
        let id = StockRequestId::parse(&query.id)?;

        let request = self
            .request_repo
            .find_by_id(id)
            .await?
            .filter(|request| scope.is_none_or(|owner| request.requester_id == owner))
            .ok_or_else(|| ApplicationError::not_found("request not found"))?;

        self.labelled(vec![request])
            .await?
            .pop()
            .ok_or_else(|| ApplicationError::not_found("request not found"))
    }
}
