//! Customer view flows against a mock backend.

use crm_client::controllers::customers::{DELETE_CONFIRM, DELETE_REJECTED, EDIT_TITLE};
use crm_client::controllers::{CustomerAction, CustomerController};
use crm_client::views::CustomerForm;
use crm_client::{RecordingShell, Surface};
use crm_core::CustomerId;
use crm_integration_tests::{TestBackend, bearer, customer_json};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_list(backend: &TestBackend, customers: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers))
        .expect(times)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_load_renders_table() {
    let backend = TestBackend::signed_in().await;
    mount_list(
        &backend,
        json!([
            customer_json("1", "Ada", "ada@example.com"),
            customer_json("2", "Grace", "grace@example.com"),
        ]),
        1,
    )
    .await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(controller.load(&mut shell).await);

    assert_eq!(controller.customers().len(), 2);
    let table = shell.last_presented(Surface::Customers).unwrap();
    assert!(table.contains("grace@example.com"));
    assert!(table.contains("2024-03-01 09:30:00"));
    assert_eq!(table, controller.render());
}

#[tokio::test]
async fn test_create_reloads_with_new_record() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(customer_json("7", "Ada", "ada@example.com")),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_list(&backend, json!([customer_json("7", "Ada", "ada@example.com")]), 1).await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    controller.dispatch(CustomerAction::Add, &mut shell).await;

    let form = CustomerForm {
        id: None,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    };
    assert!(controller.submit(form, &mut shell).await);
    assert!(!controller.modal().is_open());
    assert!(controller.customers().iter().any(|c| c.id == CustomerId::new("7")));

    // Rendering the same list twice gives the same table
    assert_eq!(controller.render(), controller.render());
}

#[tokio::test]
async fn test_edit_then_update_reloads() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/customers/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(customer_json("7", "Ada", "ada@example.com")),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/customers/7"))
        .and(body_json(json!({"name": "Ada Lovelace", "email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(
            "7",
            "Ada Lovelace",
            "ada@example.com",
        )))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_list(
        &backend,
        json!([customer_json("7", "Ada Lovelace", "ada@example.com")]),
        1,
    )
    .await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(
        controller
            .dispatch(CustomerAction::Edit(CustomerId::new("7")), &mut shell)
            .await
    );
    assert_eq!(controller.modal().title(), EDIT_TITLE);

    let mut form = controller.modal().form().clone();
    assert_eq!(form.id, Some(CustomerId::new("7")));
    form.name = "Ada Lovelace".to_string();
    assert!(controller.submit(form, &mut shell).await);

    assert_eq!(controller.customers()[0].name, "Ada Lovelace");
    assert!(
        shell
            .last_presented(Surface::Customers)
            .unwrap()
            .contains("Ada Lovelace")
    );
}

#[tokio::test]
async fn test_failed_create_alerts_and_keeps_form() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already exists"})),
        )
        .mount(&backend.server)
        .await;
    mount_list(&backend, json!([]), 0).await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    controller.open_add(&mut shell);
    let form = CustomerForm {
        id: None,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    };
    assert!(!controller.submit(form.clone(), &mut shell).await);

    assert_eq!(shell.alerts(), vec!["Email already exists"]);
    assert!(controller.modal().is_open());
    assert_eq!(controller.modal().form(), &form);
}

#[tokio::test]
async fn test_declined_delete_sends_no_request() {
    let backend = TestBackend::signed_in().await;
    mount_list(&backend, json!([customer_json("1", "Ada", "ada@example.com")]), 1).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&backend.server)
        .await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    controller.load(&mut shell).await;
    let before = controller.render();

    shell.answer_next(false);
    assert!(!controller.delete(&CustomerId::new("1"), &mut shell).await);
    assert_eq!(shell.confirmations(), vec![DELETE_CONFIRM]);
    assert_eq!(controller.render(), before);
}

#[tokio::test]
async fn test_confirmed_delete_reloads() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/customers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_list(&backend, json!([]), 1).await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::confirming();
    assert!(controller.delete(&CustomerId::new("1"), &mut shell).await);
    assert!(controller.customers().is_empty());
    assert!(
        shell
            .last_presented(Surface::Customers)
            .unwrap()
            .contains("No customers found.")
    );
}

async fn delete_with_response(response: ResponseTemplate) -> (CustomerController, RecordingShell, String) {
    let backend = TestBackend::signed_in().await;
    // Only the initial load; a failed delete must not reload
    mount_list(&backend, json!([customer_json("1", "Ada", "ada@example.com")]), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/customers/1"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(response)
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::confirming();
    assert!(controller.load(&mut shell).await);
    let before = controller.render();

    assert!(!controller.delete(&CustomerId::new("1"), &mut shell).await);
    assert!(backend.has_token());
    (controller, shell, before)
}

#[tokio::test]
async fn test_failed_delete_alerts_and_keeps_list() {
    let (controller, shell, before) = delete_with_response(
        ResponseTemplate::new(404).set_body_json(json!({"detail": "Customer not found"})),
    )
    .await;

    assert_eq!(shell.alerts(), vec!["Customer not found"]);
    assert_eq!(controller.customers().len(), 1);
    assert_eq!(controller.render(), before);
}

#[tokio::test]
async fn test_rejected_delete_alerts_and_keeps_list() {
    let (controller, shell, before) = delete_with_response(
        ResponseTemplate::new(200).set_body_json(json!({"success": false})),
    )
    .await;

    assert_eq!(shell.alerts(), vec![DELETE_REJECTED]);
    assert_eq!(controller.customers().len(), 1);
    assert_eq!(controller.render(), before);
}

#[tokio::test]
async fn test_unauthorized_load_clears_token_and_redirects() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut controller = CustomerController::new(backend.client.clone());
    let mut shell = RecordingShell::new();
    assert!(!controller.load(&mut shell).await);
    assert!(!backend.has_token());
    assert_eq!(shell.navigations(), vec![Surface::Login]);
    assert!(shell.alerts().is_empty());
}
