//! Admin dashboard use case.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::value_objects::DashboardSummary;
use crate::errors::DomainResult;
use crate::repositories::DashboardRepository;

/// Window used for the "new users" figure
pub const NEW_USERS_WINDOW_DAYS: i64 = 30;

pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    /// Summary as of `now`
    pub async fn summary(&self, now: DateTime<Utc>) -> DomainResult<DashboardSummary> {
        let since = now - Duration::days(NEW_USERS_WINDOW_DAYS);
        let summary = self.repository.summary(since).await?;
        tracing::debug!(total_users = summary.total_users, "Dashboard summary computed");
        Ok(summary)
    }
}
