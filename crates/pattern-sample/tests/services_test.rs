use pattern_framework::mock::MockClient;
use pattern_framework::DispatchError;
use pattern_sample::model::{NewUser, StockReservation, UserFilter};
use pattern_sample::services::{InventoryService, OrdersService, UsersService};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn users_service_derives_users_patterns() {
    let mock = Arc::new(MockClient::new());
    mock.expect_send("users.create").return_ok(json!({ "id": 1 }));
    mock.expect_send("users.find_one").return_ok(json!(null));
    mock.expect_send("users.find_all").return_ok(json!([]));
    let users = UsersService::with_client(mock.clone());

    users.create(NewUser::new("Alice", "alice@example.com")).unwrap().await.unwrap();
    users.find_one(1).unwrap().await.unwrap();
    users.find_all(UserFilter::default()).unwrap().await.unwrap();

    let sent = mock.sent();
    assert_eq!(
        sent[0].payload,
        json!({ "name": "Alice", "email": "alice@example.com" })
    );
    assert_eq!(sent[1].payload, json!({ "id": 1 }));
    assert_eq!(sent[2].payload, json!({ "name_contains": null }));
    mock.verify();
}

#[test]
fn inventory_service_uses_its_explicit_name() {
    let mock = Arc::new(MockClient::new());
    mock.expect_send("catalog.find_one").return_ok(json!(null));
    let inventory = InventoryService::with_client(mock.clone());

    let _pending = inventory.find_one(3).unwrap();

    assert_eq!(mock.sent()[0].pattern.as_str(), "catalog.find_one");
    assert_eq!(mock.sent()[0].payload, json!({ "id": 3 }));
}

#[test]
fn reserve_validates_before_sending() {
    let mock = Arc::new(MockClient::new());
    let inventory = InventoryService::with_client(mock.clone());

    let err = inventory
        .reserve(StockReservation { id: 1, quantity: 0 })
        .err()
        .expect("reservation should be rejected");

    assert!(matches!(err, DispatchError::Rejected(_)));
    assert_eq!(mock.send_count(), 0);
}

#[test]
fn no_argument_sends_id_null() {
    let mock = Arc::new(MockClient::new());
    mock.expect_send("orders.find_all").return_ok(json!([]));
    let orders = OrdersService::with_client(mock.clone());

    let _pending = orders.find_all().unwrap();

    assert_eq!(mock.sent()[0].payload, json!({ "id": null }));
}

#[test]
fn unbound_service_names_its_client_property() {
    let users: UsersService<MockClient> = UsersService::new();

    let err = users.find_one(1).err().expect("dispatch should fail");

    assert_eq!(
        err.to_string(),
        r#"ClientProxy not found on property "userClient""#
    );
}

#[test]
fn late_bound_client_is_used() {
    let mock = Arc::new(MockClient::new());
    mock.expect_send("users.find_one").return_ok(json!(null));
    let mut users: UsersService<MockClient> = UsersService::new();

    users.bind(mock.clone());
    let _pending = users.find_one(1).unwrap();

    assert_eq!(mock.send_count(), 1);
}

#[test]
fn generic_services_build_over_any_client() {
    let users: UsersService<MockClient> = UsersService::new();
    let inventory: InventoryService<MockClient> = InventoryService::default();
    let defaulted: UsersService<MockClient> = UsersService::default();

    assert!(users.find_one(1).is_err());
    assert!(defaulted.find_one(1).is_err());

    let mock = Arc::new(MockClient::new());
    mock.expect_send("catalog.find_one").return_ok(json!(null));
    let mut inventory = inventory;
    inventory.bind(mock.clone());
    let _pending = inventory.find_one(5).unwrap();
    mock.verify();
}
