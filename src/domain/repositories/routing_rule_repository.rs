//! Repository trait for routing rule retrieval.

use crate::domain::entities::RoutingRule;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the routing rules attached to short links.
///
/// Rule storage and authoring live outside this crate; implementations only hand
/// out immutable snapshots for one evaluation.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryRuleRepository`] - rule file / in-memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutingRuleRepository: Send + Sync {
    /// Returns the enabled rules of a link, with their conditions, in declaration order.
    ///
    /// An unknown link yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backing store fails.
    async fn find_enabled_by_link(&self, link_id: &str) -> Result<Vec<RoutingRule>, AppError>;
}
