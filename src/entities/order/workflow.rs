//! Order state transitions
//!
//! Orders move from `opened` to `checkout` once they carry at least one
//! item. A successful transition notifies the order's customer. None of
//! the steps are transactional: a failure after the order is persisted
//! leaves it updated without a notification.

use super::model::{Order, OrderStoreInput, OrderUpdateInput};
use crate::core::entity::EntityId;
use crate::core::error::{ApiError, ApiResult, RuleViolation};
use crate::core::events::EventBus;
use crate::core::field::FieldValue;
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::customer::Customer;
use crate::entities::order_item::OrderItem;
use crate::notifications::{Notification, Notifier};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderWorkflow {
    orders: Arc<dyn Repository<Order>>,
    items: Arc<dyn Repository<OrderItem>>,
    customers: Arc<dyn Repository<Customer>>,
    notifier: Arc<dyn Notifier>,
    events: EventBus,
    per_page: usize,
}

impl OrderWorkflow {
    pub fn new(
        orders: Arc<dyn Repository<Order>>,
        items: Arc<dyn Repository<OrderItem>>,
        customers: Arc<dyn Repository<Customer>>,
        notifier: Arc<dyn Notifier>,
        events: EventBus,
        per_page: usize,
    ) -> Self {
        Self {
            orders,
            items,
            customers,
            notifier,
            events,
            per_page,
        }
    }

    pub async fn list(&self, page: usize) -> ApiResult<Page<Order>> {
        self.orders.paginate(page, self.per_page).await
    }

    /// Create an order; the status always starts at `opened`
    pub async fn create(&self, input: OrderStoreInput) -> ApiResult<Order> {
        let customer_id = input.customer_id.unwrap_or_default();
        if self.customers.find(customer_id).await?.is_none() {
            return Err(ApiError::invalid_field(
                "customer_id",
                "The selected customer does not exist.",
            ));
        }

        let order = self.orders.create(Order::new(customer_id, input.notes)).await?;
        tracing::info!(order_id = order.id, customer_id, "order created");
        self.events.entity_created(&order);

        Ok(order)
    }

    pub async fn get(&self, id: EntityId) -> ApiResult<Order> {
        tracing::debug!(order_id = id, "fetching order");
        self.orders.get_by_id(id).await
    }

    /// Move an order to checkout and notify its customer
    pub async fn update(&self, id: EntityId, input: OrderUpdateInput) -> ApiResult<Order> {
        let mut order = self.orders.get_by_id(id).await?;

        if !self.has_items(id).await? {
            tracing::warn!(order_id = id, "update rejected, order has no items");
            return Err(RuleViolation::OrderHasNoItems.into());
        }
        if order.is_checked_out() {
            tracing::warn!(order_id = id, "update rejected, order already on checkout");
            return Err(RuleViolation::OrderAlreadyCheckedOut.into());
        }

        order.status = input.target_status();
        if input.notes.is_some() {
            order.notes = input.notes;
        }
        self.orders.update(id, order).await?;
        let order = self.orders.get_by_id(id).await?;

        let customer = self.customers.get_by_id(order.customer_id).await?;
        self.notifier
            .notify(Notification::order_checkout(&customer, &order))
            .await?;

        tracing::info!(
            order_id = id,
            customer_id = customer.id,
            status = %order.status,
            "order moved to checkout"
        );
        self.events.entity_updated(&order);

        Ok(order)
    }

    /// Delete an order that has no items
    pub async fn delete(&self, id: EntityId) -> ApiResult<()> {
        if self.has_items(id).await? {
            tracing::warn!(order_id = id, "delete rejected, order has items");
            return Err(RuleViolation::OrderHasItems.into());
        }

        self.orders.destroy(id).await?;
        tracing::info!(order_id = id, "order deleted");
        self.events.entity_deleted::<Order>(id);

        Ok(())
    }

    pub async fn has_items(&self, id: EntityId) -> ApiResult<bool> {
        self.items
            .exists_where("order_id", &FieldValue::from(id))
            .await
    }

    /// Items of an existing order
    pub async fn items_of(&self, id: EntityId) -> ApiResult<Vec<OrderItem>> {
        self.orders.get_by_id(id).await?;
        self.items
            .find_by_field("order_id", &FieldValue::from(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::order::OrderStatus;
    use crate::storage::InMemoryRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: Notification) -> ApiResult<()> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    struct Fixture {
        workflow: OrderWorkflow,
        orders: Arc<InMemoryRepository<Order>>,
        items: Arc<InMemoryRepository<OrderItem>>,
        customers: Arc<InMemoryRepository<Customer>>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
        let orders = Arc::new(InMemoryRepository::<Order>::new());
        let items = Arc::new(InMemoryRepository::<OrderItem>::new());
        let customers = Arc::new(InMemoryRepository::<Customer>::new());
        let notifier = Arc::new(RecordingNotifier::default());

        let workflow = OrderWorkflow::new(
            orders.clone(),
            items.clone(),
            customers.clone(),
            notifier.clone(),
            EventBus::new(16),
            20,
        );

        Fixture {
            workflow,
            orders,
            items,
            customers,
            notifier,
        }
    }

    fn checkout() -> OrderUpdateInput {
        OrderUpdateInput {
            status: Some("checkout".to_string()),
            notes: None,
        }
    }

    async fn open_order(f: &Fixture) -> Order {
        let customer = f
            .customers
            .create(Customer::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        f.orders.create(Order::new(customer.id, None)).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_existing_customer() {
        let f = fixture();
        let err = f
            .workflow
            .create(OrderStoreInput {
                customer_id: Some(42),
                notes: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_without_items_is_rejected() {
        let f = fixture();
        let order = open_order(&f).await;

        let err = f.workflow.update(order.id, checkout()).await.unwrap_err();
        assert!(matches!(err, ApiError::Rule(RuleViolation::OrderHasNoItems)));

        let stored = f.orders.get_by_id(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Opened);
        assert!(f.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_notifies_once() {
        let f = fixture();
        let order = open_order(&f).await;
        f.items
            .create(OrderItem::new(order.id, "Pen", 1, 1.5))
            .await
            .unwrap();

        let updated = f.workflow.update(order.id, checkout()).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Checkout);

        let sent = f.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].customer_id(), order.customer_id);
    }

    #[tokio::test]
    async fn test_second_checkout_is_rejected() {
        let f = fixture();
        let order = open_order(&f).await;
        f.items
            .create(OrderItem::new(order.id, "Pen", 1, 1.5))
            .await
            .unwrap();

        f.workflow.update(order.id, checkout()).await.unwrap();
        let err = f.workflow.update(order.id, checkout()).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Rule(RuleViolation::OrderAlreadyCheckedOut)
        ));
        assert_eq!(f.notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_order_is_not_found() {
        let f = fixture();
        let err = f.workflow.update(99, checkout()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_customer_leaves_order_updated() {
        let f = fixture();
        let order = f.orders.create(Order::new(77, None)).await.unwrap();
        f.items
            .create(OrderItem::new(order.id, "Pen", 1, 1.5))
            .await
            .unwrap();

        let err = f.workflow.update(order.id, checkout()).await.unwrap_err();
        assert!(err.is_not_found());

        let stored = f.orders.get_by_id(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Checkout);
        assert!(f.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_blocked_by_items() {
        let f = fixture();
        let order = open_order(&f).await;
        f.items
            .create(OrderItem::new(order.id, "Pen", 1, 1.5))
            .await
            .unwrap();

        let err = f.workflow.delete(order.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Rule(RuleViolation::OrderHasItems)));
        assert!(f.orders.find(order.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_without_items() {
        let f = fixture();
        let order = open_order(&f).await;

        f.workflow.delete(order.id).await.unwrap();
        assert!(f.workflow.get(order.id).await.unwrap_err().is_not_found());
    }
}
