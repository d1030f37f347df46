//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Connect one store per configured mount
//! - Assemble the Axum router: /ping, per-mount route tables, auth gate
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Mounts are built once at startup and never mutated
//! - The auth layer wraps the mounted API routes only; /ping stays open
//! - A read-only mount nests the read-only table; its mutating verbs
//!   are never registered

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{MountConfig, ServerConfig};
use crate::http::middleware::{token_auth_middleware, AuthState};
use crate::rest::{routes, MountState};
use crate::store::{mongo::MongoStore, DocumentStore, StoreError};

/// One mount ready for routing: its config plus a connected store.
pub type Mount = (MountConfig, Arc<dyn DocumentStore>);

/// HTTP server exposing every configured mount.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Connect a MongoDB store per mount and assemble the server.
    pub async fn build(config: &ServerConfig) -> Result<Self, StoreError> {
        let mut mounts: Vec<Mount> = Vec::with_capacity(config.mounts.len());
        for mount in &config.mounts {
            tracing::info!(url = %mount.url, db = %mount.db_name, "Connecting to store");
            let store = MongoStore::connect(&mount.url, &mount.db_name).await?;
            mounts.push((mount.clone(), Arc::new(store)));
        }

        Ok(Self::with_mounts(config, mounts))
    }

    /// Assemble the server from pre-built stores. Used directly by
    /// tests to mount in-memory stores.
    pub fn with_mounts(config: &ServerConfig, mounts: Vec<Mount>) -> Self {
        let mut api = Router::new();

        for (mount, store) in mounts {
            let path = mount.mount_path(&config.base);
            let table = if mount.read_only {
                routes::read_only()
            } else {
                routes::all()
            };
            let table = table.with_state(MountState::new(store, path.clone()));

            tracing::info!(
                path = %path,
                read_only = mount.read_only,
                "Mounting API routes"
            );
            api = if path == "/" {
                api.merge(table)
            } else {
                api.nest(&path, table)
            };
        }

        if let Some(token) = &config.auth_token {
            tracing::info!("Authentication enabled");
            api = api.layer(middleware::from_fn_with_state(
                AuthState {
                    token: token.clone(),
                },
                token_auth_middleware,
            ));
        }

        let router = Router::new()
            .route("/ping", get(ping_handler))
            .merge(api)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "API server started");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Liveness glue, outside the auth gate.
async fn ping_handler() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Wait for Ctrl+C or an internal shutdown broadcast.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = shutdown.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
