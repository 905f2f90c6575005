//! Mail rendering and sending

use super::Notification;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A rendered e-mail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Render the mail for a notification
    pub fn render(notification: &Notification) -> Self {
        match notification {
            Notification::OrderCheckout {
                customer_name,
                email,
                order_id,
                ..
            } => MailMessage {
                to: email.clone(),
                subject: format!("Order #{} is on checkout", order_id),
                body: format!(
                    "Hello {},\n\nYour order #{} has moved to checkout. \
                     We will let you know once it ships.\n",
                    customer_name, order_id
                ),
            },
        }
    }
}

/// Outgoing mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<()>;
}

/// Mailer that writes messages to the log instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        tracing::info!(to = %message.to, subject = %message.subject, "mail sent");
        Ok(())
    }
}
