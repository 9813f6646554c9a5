//! File-backed service tests: everything goes through real CSV files on disk.

use std::fs;

use stockroom_auth::{authorize, AuthzError, Permission, Session};
use stockroom_changelog::Action;
use stockroom_core::DomainError;
use stockroom_infra::{InventoryService, ServiceError, StockroomConfig};
use stockroom_inventory::AdjustStep;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> StockroomConfig {
    stockroom_observability::tracing::init_for_tests();
    StockroomConfig {
        inventory_path: dir.path().join("inventory.csv"),
        log_path: dir.path().join("log.csv"),
        admin_password: "letmein".to_string(),
        recent_log_limit: 5,
    }
}

#[test]
fn receipt_on_empty_store_writes_single_row() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();

    service.apply_receipt("widget", 5, "2024-01-01").unwrap();

    let contents = fs::read_to_string(&config.inventory_path).unwrap();
    assert_eq!(contents, "widget,5,2024-01-01\n");
}

#[test]
fn reopening_reproduces_inventory_and_log() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let (inventory, log) = {
        let mut service = InventoryService::open(&config).unwrap();
        service.apply_receipt("widget", 5, "2024-01-01").unwrap();
        service.apply_receipt("gadget", 2, "2024-01-03").unwrap();
        service.apply_shipment("widget", 3).unwrap();
        service.adjust("gadget", AdjustStep::Plus).unwrap();
        service.remove("gadget").unwrap();
        service.undo(0).unwrap();
        (service.inventory().clone(), service.log().clone())
    };

    let reopened = InventoryService::open(&config).unwrap();
    assert_eq!(reopened.inventory(), &inventory);
    assert_eq!(reopened.log(), &log);
    assert_eq!(reopened.get("widget").unwrap().quantity(), 2);
    assert_eq!(reopened.get("gadget").unwrap().quantity(), 3);
}

#[test]
fn undo_round_trip_on_disk() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();

    service.apply_receipt("x", 5, "2024-01-01").unwrap();
    service.undo(0).unwrap();

    let reopened = InventoryService::open(&config).unwrap();
    assert_eq!(reopened.get("x").unwrap().quantity(), 0);
    let actions: Vec<_> = reopened.log().entries().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![Action::Undo]);
}

#[test]
fn malformed_inventory_rows_load_with_defaults() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::write(&config.inventory_path, "widget,abc,2024-01-01\ngadget,4\n").unwrap();

    let service = InventoryService::open(&config).unwrap();

    assert_eq!(service.get("widget").unwrap().quantity(), 0);
    assert_eq!(service.get("gadget").unwrap().received_date(), "");
}

#[test]
fn rows_with_invalid_utf8_are_skipped_on_open() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::write(&config.inventory_path, b"widget,5,2024-01-01\nw\xff,3,2024-01-01\n").unwrap();
    fs::write(
        &config.log_path,
        b"2024-01-01T00:00:00Z,increase,widget,5,0\n\
          2024-01-01T00:00:01Z,increase,w\xff\xfe,3,0\n\
          2024-01-01T00:00:02Z,decrease,widget,-1,5\n",
    )
    .unwrap();

    let service = InventoryService::open(&config).unwrap();

    assert_eq!(service.items().len(), 1);
    assert_eq!(service.get("widget").unwrap().quantity(), 5);
    assert_eq!(service.log().len(), 2);
}

#[test]
fn recent_view_respects_configured_limit() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();

    for day in 1..=8u64 {
        service
            .apply_receipt("widget", day, &format!("2024-01-{day:02}"))
            .unwrap();
    }

    let recent = service.recent(config.recent_log_limit);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].previous_quantity, Some((1..=7).sum::<u64>()));
}

#[test]
fn mutation_is_gated_by_admin_session() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();

    let visitor = Session::anonymous();
    assert_eq!(
        authorize(&visitor, &Permission::INVENTORY_WRITE),
        Err(AuthzError::Forbidden("inventory.write".to_string()))
    );

    let admin = Session::login(&config.admin_credentials(), "letmein").unwrap();
    authorize(&admin, &Permission::INVENTORY_WRITE).unwrap();
    service.apply_receipt("widget", 1, "2024-01-01").unwrap();

    assert!(authorize(&visitor, &Permission::INVENTORY_READ).is_ok());
    assert_eq!(service.items().len(), 1);
}

#[test]
fn unwritable_inventory_path_surfaces_storage_error() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.inventory_path = dir.path().join("missing-dir").join("inventory.csv");
    let mut service = InventoryService::open(&config).unwrap();

    let err = service.apply_receipt("widget", 1, "2024-01-01").unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
}

#[test]
fn snapshot_serializes_for_json_rendering() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();
    service.apply_receipt("widget", 5, "2024-01-01").unwrap();

    let json = serde_json::to_value(service.snapshot()).unwrap();

    assert_eq!(json["total_quantity"], 5);
    assert_eq!(json["items"][0]["name"], "widget");
    assert_eq!(json["items"][0]["quantity"], 5);
    assert_eq!(json["items"][0]["received_date"], "2024-01-01");
}

#[test]
fn adjust_unknown_item_on_disk_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut service = InventoryService::open(&config).unwrap();

    let err = service.adjust("ghost", AdjustStep::Plus).unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    assert!(!config.log_path.exists());
}
