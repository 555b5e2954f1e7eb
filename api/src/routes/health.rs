use actix_web::HttpResponse;
use chrono::Utc;
use serde_json::json;

use crate::handlers::response;

/// Liveness probe
pub async fn health_check() -> HttpResponse {
    response::success(
        json!({
            "status": "healthy",
            "service": "turismo-api",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
        }),
        None,
    )
}
