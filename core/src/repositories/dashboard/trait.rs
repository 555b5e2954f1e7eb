//! Aggregate counts for the admin dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::DashboardSummary;
use crate::errors::DomainError;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Count every dashboard entity; users created at or after `new_users_since` count as new
    async fn summary(&self, new_users_since: DateTime<Utc>) -> Result<DashboardSummary, DomainError>;
}
