//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::events::EventBus;
use crate::notifications::{EventBusNotifier, LogMailer, MailDispatcher, Mailer, Notifier};
use crate::storage::Repositories;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const MAIL_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder for the storefront HTTP server
///
/// Every component has a default: configuration falls back to
/// [`AppConfig::default`], storage to in-memory repositories, notifications
/// to the event bus and mail to [`LogMailer`].
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(AppConfig::load()?)
///     .serve()
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<AppConfig>,
    repositories: Option<Repositories>,
    notifier: Option<Arc<dyn Notifier>>,
    mailer: Option<Arc<dyn Mailer>>,
    event_bus: Option<EventBus>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use pre-populated or custom repositories
    pub fn with_repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    /// Replace the event-bus notifier, e.g. with a recording fake in tests
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Mail transport used by the dispatcher started in [`serve`](Self::serve)
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Share an existing event bus instead of creating one from config
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Build the host holding all application state
    pub fn build_host(&mut self) -> ServerHost {
        let config = self.config.take().unwrap_or_default();
        let event_bus = self
            .event_bus
            .take()
            .unwrap_or_else(|| EventBus::new(config.events.capacity));
        let repositories = self.repositories.take().unwrap_or_default();
        let notifier = self
            .notifier
            .take()
            .unwrap_or_else(|| Arc::new(EventBusNotifier::new(event_bus.clone())) as Arc<dyn Notifier>);

        ServerHost::from_components(config, repositories, notifier, event_bus)
    }

    /// Build the final router
    ///
    /// No mail dispatcher is started; notifications published on the bus
    /// are only seen by subscribers the caller attaches.
    pub fn build(mut self) -> Router {
        let host = self.build_host();
        build_router(&host)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Starts the mail dispatcher, binds to the configured address and
    /// serves until SIGTERM or Ctrl+C. Pending mail is drained once the
    /// router has been dropped.
    pub async fn serve(mut self) -> Result<()> {
        let mailer = self
            .mailer
            .take()
            .unwrap_or_else(|| Arc::new(LogMailer) as Arc<dyn Mailer>);
        let host = self.build_host();

        let dispatcher = MailDispatcher::new(mailer).spawn(host.event_bus());
        let app = build_router(&host);
        let addr = host.config.server.address();
        drop(host);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        match tokio::time::timeout(MAIL_DRAIN_TIMEOUT, dispatcher).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "mail dispatcher ended abnormally"),
            Err(_) => tracing::warn!("mail dispatcher still running at shutdown, abandoned"),
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_default() {
        let builder = ServerBuilder::new();
        assert!(builder.config.is_none());
        assert!(builder.repositories.is_none());
        assert!(builder.notifier.is_none());
    }

    #[test]
    fn test_build_host_registers_entities() {
        let mut builder = ServerBuilder::new().with_config(AppConfig::default());
        let host = builder.build_host();
        assert_eq!(host.entity_types().len(), 4);
        assert_eq!(host.config.pagination.per_page(), 20);
    }

    #[test]
    fn test_build_host_shares_event_bus() {
        let bus = EventBus::new(8);
        let _rx = bus.subscribe();

        let mut builder = ServerBuilder::new().with_event_bus(bus.clone());
        let host = builder.build_host();
        assert_eq!(host.event_bus().receiver_count(), 1);
    }

    #[tokio::test]
    async fn test_build_produces_router() {
        let _router = ServerBuilder::new()
            .with_repositories(Repositories::in_memory())
            .build();
    }
}
