//! Pass-through HTTP server for the Crewmates Gallery.
//!
//! # Responsibility
//! - Answer the health-check endpoint.
//! - In production mode, serve the built single-page app for all
//!   non-`/api` paths with an `index.html` fallback for client routing.
//!
//! # Invariants
//! - No data operation goes through this server; the client talks to the
//!   hosted store directly.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "client/dist";

#[derive(Debug, Clone)]
struct ServerConfig {
    port: u16,
    production: bool,
    static_dir: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let production = std::env::var("APP_ENV")
            .map(|value| value == "production")
            .unwrap_or(false);
        let static_dir =
            std::env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
        Self {
            port,
            production,
            static_dir,
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        message: "Server is running",
    })
}

fn router(config: &ServerConfig) -> Router {
    let mut app = Router::new().route("/api/health", get(health));

    if config.production {
        let index = Path::new(&config.static_dir).join("index.html");
        let spa = ServeDir::new(&config.static_dir).not_found_service(ServeFile::new(index));
        app = app.fallback_service(spa);
    }

    app.layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = std::env::var("CREWMATES_LOG_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("crewmates-logs"));
    if let Err(err) =
        crewmates_core::init_logging(crewmates_core::default_log_level(), &log_dir.to_string_lossy())
    {
        eprintln!("logging disabled: {err}");
    }

    let config = ServerConfig::from_env();
    let app = router(&config);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "event=server_start module=server status=ok port={} production={} core={}",
        config.port,
        config.production,
        crewmates_core::core_version()
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{router, ServerConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn dev_config() -> ServerConfig {
        ServerConfig {
            port: 0,
            production: false,
            static_dir: "client/dist".to_string(),
        }
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = router(&dev_config());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Server is running");
    }

    #[tokio::test]
    async fn unknown_path_is_not_served_outside_production() {
        let app = router(&dev_config());

        let response = app
            .oneshot(Request::builder().uri("/gallery").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
