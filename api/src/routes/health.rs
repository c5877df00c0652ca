use actix_web::HttpResponse;
use serde_json::json;
use vt_shared::ApiResponse;

/// Liveness probe, `GET /health`
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(
        json!({
            "status": "healthy",
            "service": "vidtube-api",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
        "OK",
    ))
}
