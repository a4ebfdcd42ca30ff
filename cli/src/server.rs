// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Service wiring and the HTTP server loop.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use rehome_core::application::account::StandardAccountService;
use rehome_core::application::adoption_service::StandardAdoptionService;
use rehome_core::application::catalog::{PetCatalogService, ShelterDirectoryService};
use rehome_core::application::notification_worker::{LogNotifier, NotificationWorker};
use rehome_core::domain::identity::TokenService;
use rehome_core::domain::repository::{
    AdoptionRequestRepository, PetRepository, ShelterRepository, UserRepository,
};
use rehome_core::infrastructure::auth::JwtTokenService;
use rehome_core::infrastructure::event_queue;
use rehome_core::infrastructure::repositories::{
    InMemoryStore, InMemoryUserRepository, PostgresAdoptionRepository, PostgresPetRepository,
    PostgresShelterRepository, PostgresUserRepository,
};
use rehome_core::presentation::api::{self, AppState};

use crate::Cli;

struct Repositories {
    pets: Arc<dyn PetRepository>,
    shelters: Arc<dyn ShelterRepository>,
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn AdoptionRequestRepository>,
}

async fn connect_repositories(database_url: Option<&str>) -> Result<Repositories> {
    match database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            sqlx::migrate!("../migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            info!("connected to PostgreSQL");
            Ok(Repositories {
                pets: Arc::new(PostgresPetRepository::new(pool.clone())),
                shelters: Arc::new(PostgresShelterRepository::new(pool.clone())),
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                requests: Arc::new(PostgresAdoptionRepository::new(pool)),
            })
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage");
            let store = InMemoryStore::new();
            Ok(Repositories {
                pets: Arc::new(store.clone()),
                shelters: Arc::new(store.clone()),
                users: Arc::new(InMemoryUserRepository::new()),
                requests: Arc::new(store),
            })
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let repos = connect_repositories(cli.database_url.as_deref()).await?;

    // One bounded queue per process, threaded explicitly to the request
    // path (dispatcher) and the worker (receiver).
    let (dispatcher, receiver) = event_queue::bounded(cli.queue_capacity);
    let notifier = Arc::new(LogNotifier::new(Duration::from_millis(cli.notify_delay_ms)));
    let worker = NotificationWorker::new(receiver, notifier);
    let worker_shutdown = worker.shutdown_token();
    let worker_handle = worker.start();

    let secret = cli.jwt_secret.unwrap_or_else(|| {
        warn!("JWT_SECRET not set, using insecure development secret");
        "dev-secret".to_string()
    });
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &secret,
        chrono::Duration::hours(cli.token_ttl_hours),
    ));

    let state = AppState {
        adoptions: Arc::new(StandardAdoptionService::new(
            repos.requests.clone(),
            repos.pets.clone(),
            repos.shelters.clone(),
            dispatcher,
        )),
        accounts: Arc::new(StandardAccountService::new(
            repos.users.clone(),
            tokens.clone(),
        )),
        pets: Arc::new(PetCatalogService::new(
            repos.pets.clone(),
            repos.shelters.clone(),
        )),
        shelters: Arc::new(ShelterDirectoryService::new(repos.shelters.clone())),
        tokens,
    };

    let app = api::app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("rehomed listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // Stop the worker without draining; queued events are lost by design.
    worker_shutdown.cancel();
    let _ = worker_handle.await;

    info!("rehomed shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
