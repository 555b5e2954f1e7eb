use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use tm_api::{create_app, AppState, ExceptionMapper};
use tm_core::domain::entities::role::ADMIN_ROLE;
use tm_core::domain::entities::user::User;
use tm_core::repositories::InMemoryUserRepository;
use tm_core::services::auth::hash_password;
use tm_core::services::AuthServiceConfig;
use tm_infra::{spawn_mail_worker, LogMailTransport, PublicStorage};
use tm_shared::utils::mask_email;
use tm_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Turismo API Server");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    info!("Environment: {}, debug: {}", config.environment, config.app.debug);

    let storage = PublicStorage::new(&config.storage.public_url)
        .with_context(|| format!("invalid STORAGE_PUBLIC_URL: {}", config.storage.public_url))?;

    let (mailer, _mail_worker) = spawn_mail_worker(Arc::new(LogMailTransport::new()), &config.mail, &config.app.name);

    let users = Arc::new(InMemoryUserRepository::with_roles(tm_api::state::default_roles()));
    let auth_config = AuthServiceConfig::from_mail_config(&config.mail);
    seed_admin(&users, &auth_config)?;

    let state = web::Data::new(
        AppState::in_memory(&config, auth_config, users, Arc::new(mailer), Arc::new(storage))
            .context("failed to initialize services")?,
    );
    let mapper = Arc::new(ExceptionMapper::standard(config.app.debug, config.app.locale));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(&app_config, state.clone(), mapper.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}

/// Create the initial administrator from `ADMIN_EMAIL` / `ADMIN_PASSWORD`
fn seed_admin(users: &InMemoryUserRepository, auth_config: &AuthServiceConfig) -> anyhow::Result<()> {
    let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) else {
        return Ok(());
    };

    let hash = hash_password(&password, auth_config.bcrypt_cost).context("failed to hash admin password")?;
    let mut admin = User::new("Administrator", email.trim().to_lowercase(), hash);
    admin.roles = tm_api::state::default_roles()
        .into_iter()
        .filter(|role| role.name == ADMIN_ROLE)
        .collect();
    let admin = users.seed(admin).context("failed to seed admin")?;
    info!("Seeded administrator {}", mask_email(&admin.email));
    Ok(())
}
