//! Application state shared by every handler

use std::sync::Arc;

use tm_core::domain::entities::role::{Permission, Role, ADMIN_ROLE, DEFAULT_ROLE};
use tm_core::errors::DomainResult;
use tm_core::repositories::{CatalogueCounts, InMemoryDashboardRepository, InMemoryPasswordResetRepository, InMemoryUserRepository};
use tm_core::services::{
    AuthService, AuthServiceConfig, DashboardService, LinkBuilder, MailQueue, StorageUrlResolver, TokenService,
    UserService,
};
use tm_shared::AppConfig;

/// Role held by venture owners
pub const ENTREPRENEUR_ROLE: &str = "emprendedor";

/// Services shared by every handler
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub dashboard: Arc<DashboardService>,
    pub storage: Arc<dyn StorageUrlResolver>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        users: Arc<UserService>,
        dashboard: Arc<DashboardService>,
        storage: Arc<dyn StorageUrlResolver>,
    ) -> Self {
        Self {
            auth,
            users,
            dashboard,
            storage,
        }
    }

    /// Wire the services over the in-memory repositories
    ///
    /// # Errors
    /// Fails when the front-end URL cannot be used to build links
    pub fn in_memory(
        config: &AppConfig,
        auth_config: AuthServiceConfig,
        users: Arc<InMemoryUserRepository>,
        mailer: Arc<dyn MailQueue>,
        storage: Arc<dyn StorageUrlResolver>,
    ) -> DomainResult<Self> {
        let links = LinkBuilder::new(
            &config.frontend.url,
            &config.app.key,
            config.mail.verification_expire_minutes,
        )?;
        let auth = AuthService::new(
            users.clone(),
            Arc::new(InMemoryPasswordResetRepository::new()),
            mailer,
            TokenService::new(&config.auth),
            links,
            auth_config,
        );
        let dashboard = DashboardService::new(Arc::new(InMemoryDashboardRepository::new(
            users.clone(),
            CatalogueCounts::default(),
        )));

        Ok(Self::new(
            Arc::new(auth),
            Arc::new(UserService::new(users)),
            Arc::new(dashboard),
            storage,
        ))
    }
}

/// The role catalogue every deployment starts with
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new(1, ADMIN_ROLE).with_permissions(vec![
            Permission::new(1, "users.view"),
            Permission::new(2, "users.edit"),
            Permission::new(3, "dashboard.view"),
        ]),
        Role::new(2, DEFAULT_ROLE).with_permissions(vec![Permission::new(4, "reservations.create")]),
        Role::new(3, ENTREPRENEUR_ROLE).with_permissions(vec![
            Permission::new(4, "reservations.create"),
            Permission::new(5, "services.manage"),
        ]),
    ]
}
