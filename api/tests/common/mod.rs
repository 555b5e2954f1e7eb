//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test, web};
use chrono::Utc;
use tm_api::state::default_roles;
use tm_api::{AppState, ExceptionMapper};
use tm_core::domain::entities::role::{Permission, Role};
use tm_core::domain::entities::user::User;
use tm_core::repositories::InMemoryUserRepository;
use tm_core::services::auth::hash_password;
use tm_core::services::{AuthServiceConfig, InMemoryMailQueue, MailJob};
use tm_infra::PublicStorage;
use tm_shared::{AppConfig, Language};

pub const PASSWORD: &str = "secreto123";

pub struct TestContext {
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub users: Arc<InMemoryUserRepository>,
    pub mailer: Arc<InMemoryMailQueue>,
    pub mapper: Arc<ExceptionMapper>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(false, InMemoryMailQueue::new())
    }

    pub fn with_debug() -> Self {
        Self::build(true, InMemoryMailQueue::new())
    }

    pub fn with_mailer(debug: bool, mailer: InMemoryMailQueue) -> Self {
        Self::build(debug, mailer)
    }

    fn build(debug: bool, mailer: InMemoryMailQueue) -> Self {
        let mut config = AppConfig::default();
        config.app.debug = debug;
        config.app.key = "test-app-key".to_string();
        config.frontend.url = "https://turismo.example.com".to_string();
        config.storage.public_url = "https://files.example.com/storage".to_string();

        let users = Arc::new(InMemoryUserRepository::with_roles(default_roles()));
        let mailer = Arc::new(mailer);
        let storage = PublicStorage::new(&config.storage.public_url).unwrap();
        let auth_config = AuthServiceConfig {
            password_reset_ttl_minutes: 60,
            bcrypt_cost: 4,
        };
        let state = AppState::in_memory(&config, auth_config, users.clone(), mailer.clone(), Arc::new(storage)).unwrap();
        let mapper = Arc::new(ExceptionMapper::standard(debug, Language::English));

        Self {
            config,
            state: web::Data::new(state),
            users,
            mailer,
            mapper,
        }
    }

    /// Store a user holding the named roles from the default catalogue
    pub fn seed_user(&self, name: &str, email: &str, roles: &[&str]) -> User {
        let mut user = User::new(name, email, hash_password(PASSWORD, 4).unwrap());
        user.roles = default_roles()
            .into_iter()
            .filter(|role| roles.contains(&role.name.as_str()))
            .collect();
        self.users.seed(user).unwrap()
    }

    /// Store a tourist who was granted `permission` directly
    pub fn seed_user_with_permission(&self, name: &str, email: &str, permission: &str) -> User {
        let mut user = User::new(name, email, hash_password(PASSWORD, 4).unwrap());
        user.roles = vec![Role::new(2, "turista")];
        user.permissions = vec![Permission::new(90, permission)];
        self.users.seed(user).unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state.auth.tokens().issue(user, Utc::now()).unwrap().access_token
    }

    pub fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token_for(user)))
    }

    pub fn jobs(&self) -> Vec<MailJob> {
        self.mailer.jobs()
    }
}

/// Initialize the full application for a context
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(tm_api::create_app(&$ctx.config, $ctx.state.clone(), $ctx.mapper.clone())).await
    };
}

/// A request from a client that expects JSON
pub fn json_request(method: actix_web::http::Method, uri: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header((header::ACCEPT, "application/json"))
}

pub fn get(uri: &str) -> test::TestRequest {
    json_request(actix_web::http::Method::GET, uri)
}

pub fn post(uri: &str) -> test::TestRequest {
    json_request(actix_web::http::Method::POST, uri)
}

pub fn put(uri: &str) -> test::TestRequest {
    json_request(actix_web::http::Method::PUT, uri)
}

/// Query string of an emailed link
pub fn link_query(link: &str) -> String {
    url::Url::parse(link).unwrap().query().unwrap_or_default().to_string()
}

/// One query parameter of an emailed link, decoded
pub fn link_param(link: &str, name: &str) -> String {
    url::Url::parse(link)
        .unwrap()
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .unwrap()
}
