//! Background mail delivery fed by the event bus

use super::mailer::{MailMessage, Mailer};
use crate::core::events::{DomainEvent, EventBus, EventEnvelope};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Delivers notification events through a [`Mailer`]
///
/// Delivery is best effort: a failed send is logged and the loop moves on.
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl MailDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Subscribe to the bus and run the dispatch loop on a new task
    ///
    /// The subscription is taken before spawning, so events published after
    /// this call returns are not missed.
    pub fn spawn(self, bus: &EventBus) -> JoinHandle<()> {
        let rx = bus.subscribe();
        tokio::spawn(async move { self.run(rx).await })
    }

    /// Run the dispatch loop until every sender is dropped
    pub async fn run(&self, mut rx: broadcast::Receiver<EventEnvelope>) {
        tracing::info!("mail dispatch loop started");

        loop {
            match rx.recv().await {
                Ok(envelope) => self.dispatch(&envelope).await,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    tracing::warn!(count, "mail dispatch loop lagged, {} events skipped", count);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("event bus closed, stopping mail dispatch loop");
                    break;
                }
            }
        }
    }

    async fn dispatch(&self, envelope: &EventEnvelope) {
        let DomainEvent::Notification(notification) = &envelope.event else {
            return;
        };

        let message = MailMessage::render(notification);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(
                event_id = %envelope.id,
                to = %message.to,
                error = %e,
                "mail delivery failed"
            );
        }
    }
}
