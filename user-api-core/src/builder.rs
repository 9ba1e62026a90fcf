use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::info;

use crate::config::{AppConfig, ConfigError, SeedSettings, ServerSettings};
use crate::controller::{self, not_found};
use crate::layers::{catch_panic_layer, default_cors, default_trace};
use crate::registry::UserRegistry;
use crate::state::AppState;

/// Assembles the User API router and runs the server.
///
/// ```ignore
/// let config = AppConfig::load("dev")?;
/// UserApi::from_config(&config)?.serve().await?;
/// ```
#[derive(Clone)]
pub struct UserApi {
    registry: UserRegistry,
    server: ServerSettings,
}

impl UserApi {
    /// An API over the seeded registry with default listener settings.
    pub fn new() -> Self {
        Self::with_registry(UserRegistry::new())
    }

    pub fn with_registry(registry: UserRegistry) -> Self {
        Self {
            registry,
            server: ServerSettings::default(),
        }
    }

    /// Build from configuration: listener settings and whether to seed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let server = ServerSettings::from_config(config)?;
        let seed = SeedSettings::from_config(config)?;
        let registry = if seed.enabled {
            UserRegistry::new()
        } else {
            UserRegistry::empty()
        };
        Ok(Self { registry, server })
    }

    /// Handle to the registry the router serves.
    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// Assemble the final `axum::Router`.
    ///
    /// Unknown paths and unsupported methods answer 404 `{"message":"Not Found"}`.
    /// A path with a trailing slash that matches nothing is re-dispatched
    /// with the slash stripped.
    pub fn build(self) -> Router {
        let state = AppState::new(self.registry);
        let routes = controller::routes().method_not_allowed_fallback(not_found);

        let inner = routes.clone().fallback(not_found).with_state(state.clone());

        routes
            .fallback(move |req: Request| normalize_trailing_slash(inner.clone(), req))
            .with_state(state)
            .layer(default_cors())
            .layer(default_trace())
            .layer(catch_panic_layer())
    }

    /// Build the application and serve on the configured address until
    /// Ctrl-C or SIGTERM.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.server.addr();
        let app = self.build();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "User API listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("User API stopped");
        Ok(())
    }
}

impl Default for UserApi {
    fn default() -> Self {
        Self::new()
    }
}

async fn normalize_trailing_slash(inner: Router, req: Request) -> Response {
    let path = req.uri().path();
    if path.len() <= 1 || !path.ends_with('/') {
        return not_found().await.into_response();
    }

    // Only one trailing slash is tolerated: `/users//` stays unmatched.
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.ends_with('/') {
        return not_found().await.into_response();
    }
    let new_uri = match req.uri().query() {
        Some(q) => format!("{trimmed}?{q}"),
        None => trimmed.to_string(),
    };
    let (mut parts, body) = req.into_parts();
    parts.uri = new_uri.parse().unwrap_or(parts.uri);
    let new_req = Request::from_parts(parts, body);
    match tower::ServiceExt::oneshot(inner, new_req).await {
        Ok(resp) => resp,
        Err(infallible) => match infallible {},
    }
}

/// Wait for a shutdown signal (Ctrl-C or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
