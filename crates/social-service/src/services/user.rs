//! User service
//!
//! Handles user profile lookups and username search.

use social_core::entities::User;
use social_core::{DomainError, Snowflake, Viewer};
use tracing::instrument;

use crate::dto::{CurrentUserResponse, NumberedPage, UserResponse, UserSearchRequest};

/// Default and maximum search page sizes
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const MAX_SEARCH_LIMIT: i64 = 50;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.find_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// The authenticated viewer's own profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, viewer: Viewer) -> ServiceResult<CurrentUserResponse> {
        let user = self.find_user(viewer.require()?).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Users whose username contains the query, ignoring case
    #[instrument(skip(self, request), fields(q = %request.q))]
    pub async fn search_users(
        &self,
        request: UserSearchRequest,
    ) -> ServiceResult<NumberedPage<UserResponse>> {
        let query = request.q.trim();
        if query.is_empty() {
            return Err(DomainError::Validation("Search query is required".to_string()).into());
        }
        let page = request.page.unwrap_or(1).max(1);
        let limit = request
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        let repo = self.ctx.user_repo();
        let total = repo.count_matching(query).await?;
        let users = repo.search(query, limit, (page - 1) * limit).await?;

        let data = users.iter().map(UserResponse::from).collect();
        Ok(NumberedPage::new(data, page, limit, total))
    }

    async fn find_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
