//! Customer notifications
//!
//! Controllers hand notifications to a [`Notifier`] and move on; delivery
//! happens elsewhere. The default [`EventBusNotifier`] publishes onto the
//! [`EventBus`], where a [`MailDispatcher`] picks them up and sends mail
//! through a [`Mailer`].

pub mod dispatcher;
pub mod mailer;

pub use dispatcher::MailDispatcher;
pub use mailer::{LogMailer, MailMessage, Mailer};

use crate::core::entity::EntityId;
use crate::core::error::ApiResult;
use crate::core::events::{DomainEvent, EventBus};
use crate::entities::{Customer, Order};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message destined for a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// The customer's order moved to checkout
    OrderCheckout {
        customer_id: EntityId,
        customer_name: String,
        email: String,
        order_id: EntityId,
    },
}

impl Notification {
    pub fn order_checkout(customer: &Customer, order: &Order) -> Self {
        Notification::OrderCheckout {
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            email: customer.email.clone(),
            order_id: order.id,
        }
    }

    /// Id of the customer this notification is addressed to
    pub fn customer_id(&self) -> EntityId {
        match self {
            Notification::OrderCheckout { customer_id, .. } => *customer_id,
        }
    }
}

/// Delivery channel for notifications
///
/// `notify` must return as soon as the notification is accepted; it does
/// not wait for delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> ApiResult<()>;
}

/// Notifier that publishes onto the event bus
#[derive(Debug, Clone)]
pub struct EventBusNotifier {
    bus: EventBus,
}

impl EventBusNotifier {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl Notifier for EventBusNotifier {
    async fn notify(&self, notification: Notification) -> ApiResult<()> {
        let customer_id = notification.customer_id();
        let receivers = self.bus.publish(DomainEvent::Notification(notification));
        if receivers == 0 {
            tracing::warn!(customer_id, "no subscriber for notification, dropped");
        }
        Ok(())
    }
}
