mod api;
mod backend;
mod gateway;
mod middleware;
mod session;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use newsdash_analytics::AnalyticsClient;
use newsdash_core::{AppConfig, SessionsFile};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    gateway::Gateway,
    middleware::RateLimitState,
    session::SessionRegistry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = newsdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sessions = SessionRegistry::from_file(&load_sessions_file(&config)?);
    if sessions.is_empty() {
        tracing::warn!("session registry is empty");
    } else {
        tracing::info!(sessions = sessions.len(), "session registry loaded");
    }

    let analytics = AnalyticsClient::new(&config.backend_url, config.backend_timeout_secs)
        .context("failed to build analytics client")?;
    let gateway = Gateway::new(Arc::new(sessions), Arc::new(analytics));

    let app = build_app(
        AppState {
            gateway: Arc::new(gateway),
        },
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        backend = %config.backend_url,
        "newsdash server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// A missing sessions file is tolerated in development only.
fn load_sessions_file(config: &AppConfig) -> anyhow::Result<SessionsFile> {
    if !config.sessions_path.exists() && config.is_development() {
        tracing::warn!(
            path = %config.sessions_path.display(),
            "sessions file not found; every request will be rejected as unauthenticated"
        );
        return Ok(SessionsFile::default());
    }
    Ok(newsdash_core::load_sessions(&config.sessions_path)?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
