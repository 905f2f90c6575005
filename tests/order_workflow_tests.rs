//! HTTP-level tests for the order checkout workflow

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use storefront::prelude::*;

/// Notifier that records what it was handed
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> ApiResult<()> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

struct Harness {
    server: TestServer,
    repositories: Repositories,
    notifier: Arc<RecordingNotifier>,
}

fn harness() -> Harness {
    let repositories = Repositories::in_memory();
    let notifier = Arc::new(RecordingNotifier::default());

    let router = ServerBuilder::new()
        .with_repositories(repositories.clone())
        .with_notifier(notifier.clone())
        .build();

    Harness {
        server: TestServer::new(router),
        repositories,
        notifier,
    }
}

impl Harness {
    async fn customer(&self) -> Customer {
        self.repositories
            .customers
            .create(Customer::new("Ada Lovelace", "ada@example.com"))
            .await
            .unwrap()
    }

    async fn open_order(&self) -> Value {
        let customer = self.customer().await;
        let response = self
            .server
            .post("/orders")
            .json(&json!({ "customer_id": customer.id }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    async fn add_item(&self, order_id: &Value) {
        self.server
            .post("/order-items")
            .json(&json!({
                "order_id": order_id,
                "product": "Fountain pen",
                "quantity": 2,
                "unit_price": 12.5
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    async fn stored(&self, order_id: &Value) -> Order {
        let id = order_id.as_u64().unwrap();
        self.repositories.orders.get_by_id(id).await.unwrap()
    }

    async fn stored_status(&self, order_id: &Value) -> OrderStatus {
        self.stored(order_id).await.status
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_forces_opened_status() {
    let h = harness();
    let customer = h.customer().await;

    let response = h
        .server
        .post("/orders")
        .json(&json!({ "customer_id": customer.id, "status": "checkout" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"]["status"], "opened");
}

#[tokio::test]
async fn test_create_with_unknown_customer_is_unprocessable() {
    let h = harness();
    let response = h
        .server
        .post("/orders")
        .json(&json!({ "customer_id": 99 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "customer_id");
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let h = harness();
    let response = h
        .server
        .post("/orders")
        .text("{\"customer_id\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_JSON");
}

// =============================================================================
// Update (checkout)
// =============================================================================

#[tokio::test]
async fn test_update_without_items_is_rejected() {
    let h = harness();
    let order = h.open_order().await;
    let before = h.stored(&order["id"]).await;

    let response = h
        .server
        .put(&format!("/orders/{}", order["id"]))
        .json(&json!({ "status": "checkout", "notes": "leave at the door" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "The order has no items yet." }));

    let after = h.stored(&order["id"]).await;
    assert_eq!(after.status, OrderStatus::Opened);
    assert_eq!(after.notes, None);
    assert_eq!(after.updated_at, before.updated_at);
    assert_eq!(after, before);
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_update_moves_order_to_checkout_and_notifies_once() {
    let h = harness();
    let order = h.open_order().await;
    h.add_item(&order["id"]).await;

    let response = h
        .server
        .patch(&format!("/orders/{}", order["id"]))
        .json(&json!({ "status": "checkout", "notes": "gift wrap" }))
        .await;

    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];
    assert_eq!(data["status"], "checkout");
    assert_eq!(data["notes"], "gift wrap");

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Notification::OrderCheckout { email, order_id, .. }
            if email == "ada@example.com" && json!(order_id) == order["id"]
    ));
}

#[tokio::test]
async fn test_update_already_checked_out_is_rejected() {
    let h = harness();
    let order = h.open_order().await;
    h.add_item(&order["id"]).await;
    let path = format!("/orders/{}", order["id"]);

    h.server
        .put(&path)
        .json(&json!({ "status": "checkout", "notes": "first" }))
        .await
        .assert_status_ok();
    let before = h.stored(&order["id"]).await;

    let response = h
        .server
        .put(&path)
        .json(&json!({ "status": "checkout", "notes": "second" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "The order is already on checkout." }));

    let after = h.stored(&order["id"]).await;
    assert_eq!(after.status, OrderStatus::Checkout);
    assert_eq!(after.notes.as_deref(), Some("first"));
    assert_eq!(after.updated_at, before.updated_at);
    assert_eq!(after, before);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_update_with_other_status_is_unprocessable() {
    let h = harness();
    let order = h.open_order().await;
    h.add_item(&order["id"]).await;

    h.server
        .put(&format!("/orders/{}", order["id"]))
        .json(&json!({ "status": "opened" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(h.stored_status(&order["id"]).await, OrderStatus::Opened);
}

#[tokio::test]
async fn test_update_unknown_order_is_not_found() {
    let h = harness();
    h.server
        .put("/orders/5")
        .json(&json!({ "status": "checkout" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_with_items_is_rejected() {
    let h = harness();
    let order = h.open_order().await;
    h.add_item(&order["id"]).await;
    let path = format!("/orders/{}", order["id"]);

    let response = h.server.delete(&path).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "The order has items and cannot be destroyed." }));

    h.server.get(&path).await.assert_status_ok();
}

#[tokio::test]
async fn test_delete_without_items_removes_order() {
    let h = harness();
    let order = h.open_order().await;
    let path = format!("/orders/{}", order["id"]);

    h.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    h.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Items
// =============================================================================

#[tokio::test]
async fn test_item_for_unknown_order_is_unprocessable() {
    let h = harness();
    h.server
        .post("/order-items")
        .json(&json!({ "order_id": 3, "product": "Ink", "quantity": 1 }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_items_of_order() {
    let h = harness();
    let order = h.open_order().await;
    h.add_item(&order["id"]).await;
    h.add_item(&order["id"]).await;

    let body: Value = h
        .server
        .get(&format!("/orders/{}/items", order["id"]))
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["product"], "Fountain pen");
}

// =============================================================================
// Mail delivery through the event bus
// =============================================================================

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_checkout_mail_is_dispatched() {
    let bus = EventBus::new(64);
    let mailer = Arc::new(RecordingMailer::default());
    let _dispatcher = MailDispatcher::new(mailer.clone()).spawn(&bus);

    let repositories = Repositories::in_memory();
    let server = TestServer::new(
        ServerBuilder::new()
            .with_repositories(repositories.clone())
            .with_event_bus(bus)
            .build(),
    );

    let customer = repositories
        .customers
        .create(Customer::new("Ada Lovelace", "ada@example.com"))
        .await
        .unwrap();
    let order = repositories
        .orders
        .create(Order::new(customer.id, None))
        .await
        .unwrap();
    repositories
        .order_items
        .create(OrderItem::new(order.id, "Ink", 1, 3.0))
        .await
        .unwrap();

    server
        .put(&format!("/orders/{}", order.id))
        .json(&json!({ "status": "checkout" }))
        .await
        .assert_status_ok();

    for _ in 0..100 {
        if !mailer.sent.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
}
