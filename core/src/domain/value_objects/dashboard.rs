//! Admin dashboard summary

use serde::{Deserialize, Serialize};

/// Entity counts shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_users: u64,
    /// Users registered during the last 30 days
    pub new_users_last_30_days: u64,
    pub total_associations: u64,
    pub total_entrepreneurs: u64,
    pub total_events: u64,
    pub total_reservations: u64,
    pub pending_reservations: u64,
    pub total_plans: u64,
    pub total_services: u64,
}
