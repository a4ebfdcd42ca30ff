// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Notification Worker - background consumer of adoption lifecycle events
//!
//! Exactly one worker runs per process, started at startup and cancelled at
//! shutdown. It drains the event queue in arrival order, one event at a
//! time, and hands each to a [`Notifier`]. No retry, no dead-lettering, no
//! acknowledgement back to the producer; events still queued when the
//! shutdown token fires are lost.

use crate::domain::events::AdoptionEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Side-effectful notification sink.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &AdoptionEvent);
}

/// Default notifier: logs the event and sleeps a fixed delay to emulate an
/// external notification call.
pub struct LogNotifier {
    delay: Duration,
}

impl LogNotifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: &AdoptionEvent) {
        info!(
            request_id = ?event.request_id,
            user_id = ?event.user_id,
            pet_id = ?event.pet_id,
            status = %event.status,
            message = %event.message,
            "processing adoption event"
        );
        tokio::time::sleep(self.delay).await;
    }
}

pub struct NotificationWorker {
    receiver: mpsc::Receiver<AdoptionEvent>,
    notifier: Arc<dyn Notifier>,
    shutdown_token: CancellationToken,
}

impl NotificationWorker {
    pub fn new(receiver: mpsc::Receiver<AdoptionEvent>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            receiver,
            notifier,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Get a handle to trigger shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Start the background task. Returns a handle that completes once the
    /// worker has stopped.
    pub fn start(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&mut self) {
        info!("adoption notification worker started");

        loop {
            tokio::select! {
                // Check shutdown before accepting a new event so cancellation
                // never starts another iteration; an event already handed to
                // the notifier runs to completion.
                biased;

                _ = self.shutdown_token.cancelled() => {
                    info!("shutdown signal received, stopping notification worker");
                    break;
                }
                event = self.receiver.recv() => match event {
                    Some(event) => self.notifier.notify(&event).await,
                    None => {
                        debug!("event queue closed, stopping notification worker");
                        break;
                    }
                },
            }
        }

        info!("adoption notification worker stopped");
    }
}
