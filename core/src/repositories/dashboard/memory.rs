//! In-memory implementation of DashboardRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::value_objects::DashboardSummary;
use crate::errors::DomainError;
use crate::repositories::user::InMemoryUserRepository;

use super::DashboardRepository;

/// Counts of tourism entities managed outside the user store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogueCounts {
    pub associations: u64,
    pub entrepreneurs: u64,
    pub events: u64,
    pub reservations: u64,
    pub pending_reservations: u64,
    pub plans: u64,
    pub services: u64,
}

/// Dashboard repository counting users live and reporting fixed catalogue counts
pub struct InMemoryDashboardRepository {
    users: Arc<InMemoryUserRepository>,
    catalogue: CatalogueCounts,
}

impl InMemoryDashboardRepository {
    pub fn new(users: Arc<InMemoryUserRepository>, catalogue: CatalogueCounts) -> Self {
        Self { users, catalogue }
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardRepository {
    async fn summary(&self, new_users_since: DateTime<Utc>) -> Result<DashboardSummary, DomainError> {
        let users = self.users.snapshot()?;
        let new_users = users
            .iter()
            .filter(|user| user.created_at.map_or(false, |created| created >= new_users_since))
            .count();

        Ok(DashboardSummary {
            total_users: users.len() as u64,
            new_users_last_30_days: new_users as u64,
            total_associations: self.catalogue.associations,
            total_entrepreneurs: self.catalogue.entrepreneurs,
            total_events: self.catalogue.events,
            total_reservations: self.catalogue.reservations,
            pending_reservations: self.catalogue.pending_reservations,
            total_plans: self.catalogue.plans,
            total_services: self.catalogue.services,
        })
    }
}
