use crate::shared::core::primitives::UserId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("user {0:?} not found")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve_user_by_name(&self, name: &str) -> Result<UserId, IdentityError>;
}
