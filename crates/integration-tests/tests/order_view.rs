//! Order view flows against a mock backend.

use crm_client::api::OrderScope;
use crm_client::controllers::orders::{DELETE_CONFIRM, DELETE_REJECTED};
use crm_client::controllers::{OrderAction, OrderController};
use crm_client::views::OrderForm;
use crm_client::{RecordingShell, Surface};
use crm_core::{CustomerId, OrderId, PageRequest};
use crm_integration_tests::{TestBackend, customer_json, order_json};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_customers(backend: &TestBackend, customers: Value) {
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers))
        .mount(&backend.server)
        .await;
}

async fn mount_paged(backend: &TestBackend, orders: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders))
        .expect(times)
        .mount(&backend.server)
        .await;
}

async fn mount_scoped(backend: &TestBackend, customer_id: &str, orders: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/orders/{customer_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders))
        .expect(times)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_load_joins_customer_names() {
    let backend = TestBackend::signed_in().await;
    mount_customers(&backend, json!([customer_json("5", "Ada", "ada@example.com")])).await;
    mount_paged(
        &backend,
        json!([
            order_json("1", "5", "Widget", 9.99),
            order_json("2", "99", "Gadget", 5.0),
        ]),
        1,
    )
    .await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(controller.load(&mut shell).await);

    let table = shell.last_presented(Surface::Orders).unwrap();
    assert!(table.contains("Filter: [All Customers] | Ada (5)"));
    let rows: Vec<&str> = table.lines().filter(|l| l.ends_with("delete 1") || l.ends_with("delete 2")).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("Ada") && rows[0].contains("$9.99"));
    assert!(rows[1].contains("Unknown") && rows[1].contains("$5.00"));
}

#[tokio::test]
async fn test_customer_failure_stops_before_orders() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "Customer service unavailable"})))
        .mount(&backend.server)
        .await;
    mount_paged(&backend, json!([]), 0).await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(!controller.load(&mut shell).await);
    assert_eq!(shell.alerts(), vec!["Customer service unavailable"]);
    assert!(shell.last_presented(Surface::Orders).is_none());
}

#[tokio::test]
async fn test_filter_all_then_customer_then_all() {
    let backend = TestBackend::signed_in().await;
    mount_customers(&backend, json!([customer_json("5", "Ada", "ada@example.com")])).await;
    mount_paged(&backend, json!([order_json("1", "5", "Widget", 9.99)]), 2).await;
    mount_scoped(&backend, "5", json!([order_json("1", "5", "Widget", 9.99)]), 1).await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(controller.load(&mut shell).await);
    assert_eq!(controller.scope(), OrderScope::All(PageRequest::default()));

    assert!(
        controller
            .dispatch(OrderAction::Filter(Some(CustomerId::new("5"))), &mut shell)
            .await
    );
    assert_eq!(controller.scope(), OrderScope::Customer(CustomerId::new("5")));
    assert!(
        shell
            .last_presented(Surface::Orders)
            .unwrap()
            .contains("[Ada] (5)")
    );

    assert!(controller.dispatch(OrderAction::Filter(None), &mut shell).await);
    assert_eq!(controller.scope(), OrderScope::All(PageRequest::default()));
}

#[tokio::test]
async fn test_create_then_filtered_reload_shows_price() {
    let backend = TestBackend::signed_in().await;
    mount_customers(&backend, json!([customer_json("5", "Ada", "ada@example.com")])).await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(json!({
            "customer_id": "5",
            "product_name": "Widget",
            "price": 9.99
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("11", "5", "Widget", 9.99)))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_scoped(&backend, "5", json!([order_json("11", "5", "Widget", 9.99)]), 1).await;
    mount_paged(&backend, json!([]), 0).await;

    let mut controller =
        OrderController::new(backend.client.clone()).with_filter(Some(CustomerId::new("5")));
    let mut shell = RecordingShell::new();
    assert!(controller.load_customers(&mut shell).await);
    controller.dispatch(OrderAction::Add, &mut shell).await;
    assert_eq!(controller.modal().form().customer_id, Some(CustomerId::new("5")));

    let form = OrderForm {
        customer_id: Some(CustomerId::new("5")),
        product_name: "Widget".to_string(),
        price: "9.99".to_string(),
    };
    assert!(controller.submit(form, &mut shell).await);
    assert!(!controller.modal().is_open());

    let table = shell.last_presented(Surface::Orders).unwrap();
    let row = table.lines().find(|l| l.ends_with("delete 11")).unwrap();
    assert!(row.contains("Ada"));
    assert!(row.contains("Widget"));
    assert!(row.contains("$9.99"));
}

#[tokio::test]
async fn test_invalid_price_is_sent_as_null() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(json!({
            "customer_id": "5",
            "product_name": "Widget",
            "price": null
        })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": [
            {"loc": ["body", "price"], "msg": "Input should be a valid number", "type": "float_type"}
        ]})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    controller.open_add(&mut shell);
    let form = OrderForm {
        customer_id: Some(CustomerId::new("5")),
        product_name: "Widget".to_string(),
        price: "cheap".to_string(),
    };
    assert!(!controller.submit(form, &mut shell).await);
    assert_eq!(shell.alerts(), vec!["Input should be a valid number"]);
    assert!(controller.modal().is_open());
}

#[tokio::test]
async fn test_delete_ack_false_alerts() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_paged(&backend, json!([]), 0).await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::confirming();
    assert!(!controller.delete(&OrderId::new("3"), &mut shell).await);
    assert_eq!(shell.confirmations(), vec![DELETE_CONFIRM]);
    assert_eq!(shell.alerts(), vec![DELETE_REJECTED]);
}

#[tokio::test]
async fn test_delete_error_is_prefixed() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/3"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Order not found"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut controller = OrderController::new(backend.client.clone());
    let mut shell = RecordingShell::confirming();
    assert!(!controller.delete(&OrderId::new("3"), &mut shell).await);
    assert_eq!(shell.alerts(), vec!["Error deleting order: Order not found"]);
}

#[tokio::test]
async fn test_confirmed_delete_reloads_under_filter() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_scoped(&backend, "5", json!([]), 1).await;
    mount_paged(&backend, json!([]), 0).await;

    let mut controller =
        OrderController::new(backend.client.clone()).with_filter(Some(CustomerId::new("5")));
    let mut shell = RecordingShell::confirming();
    assert!(controller.delete(&OrderId::new("3"), &mut shell).await);
    assert!(controller.orders().is_empty());
}
