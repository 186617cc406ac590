use super::*;

#[test]
fn test_happy_path_through_all_phases() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    advance_to(&manager, &order.order_id, OrderPhase::Delivered);

    let stored = manager.get_order("t1", &order.order_id).unwrap();
    assert_eq!(stored.status, OrderPhase::Delivered);
    assert!(stored.is_completed());
    assert_eq!(stored.timeline.len(), 5);

    // status always mirrors the last timeline entry
    assert_eq!(stored.timeline.last().unwrap().status, stored.status);

    // timestamps are non-decreasing
    let stamps: Vec<i64> = stored.timeline.iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_transition_records_attribution() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    let outcome = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap();

    assert_eq!(outcome.previous_status, OrderPhase::Received);
    assert!(outcome.warning.is_none());
    let event = outcome.order.timeline.last().unwrap();
    assert_eq!(event.attended_by, "Ana");
    assert_eq!(event.role, "KITCHEN_STAFF");
}

#[test]
fn test_skip_is_rejected() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    let err = manager
        .transition("t1", &order.order_id, OrderPhase::Packing, "Ana", "PACKER")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);

    // Order untouched
    let stored = manager.get_order("t1", &order.order_id).unwrap();
    assert_eq!(stored.status, OrderPhase::Received);
    assert_eq!(stored.timeline.len(), 1);
}

#[test]
fn test_reversal_is_rejected() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();
    advance_to(&manager, &order.order_id, OrderPhase::Packing);

    let err = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);
}

#[test]
fn test_repeat_is_rejected_without_double_apply() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap();
    let err = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);

    let stored = manager.get_order("t1", &order.order_id).unwrap();
    let cooking_entries = stored
        .timeline
        .iter()
        .filter(|e| e.status == OrderPhase::Cooking)
        .count();
    assert_eq!(cooking_entries, 1);
}

#[test]
fn test_terminal_order_rejects_everything() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();
    advance_to(&manager, &order.order_id, OrderPhase::Delivered);

    for target in OrderPhase::SEQUENCE {
        let err = manager
            .transition("t1", &order.order_id, target, "Ana", "KITCHEN_STAFF")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyDelivered);
    }
}

#[test]
fn test_full_walkthrough_with_rejected_skip() {
    // create → COOKING → PACKING → (COOKING→DELIVERING skip fails) →
    // DELIVERING → DELIVERED → terminal
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();
    let id = order.order_id;

    manager
        .transition("t1", &id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap();
    manager
        .transition("t1", &id, OrderPhase::Packing, "Beto", "PACKER")
        .unwrap();

    let err = manager
        .transition("t1", &id, OrderPhase::Delivered, "Carla", "DELIVERY_DRIVER")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);

    manager
        .transition("t1", &id, OrderPhase::Delivering, "Carla", "DELIVERY_DRIVER")
        .unwrap();
    manager
        .transition("t1", &id, OrderPhase::Delivered, "Carla", "DELIVERY_DRIVER")
        .unwrap();

    let err = manager
        .transition("t1", &id, OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderAlreadyDelivered);
}

#[test]
fn test_missing_attribution() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    let err = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RequiredField);

    let err = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Ana", "  ")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RequiredField);

    // Nothing was appended
    let stored = manager.get_order("t1", &order.order_id).unwrap();
    assert_eq!(stored.timeline.len(), 1);
}

#[test]
fn test_role_mismatch_warns_but_applies() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    let outcome = manager
        .transition("t1", &order.order_id, OrderPhase::Cooking, "Dana", "PACKER")
        .unwrap();

    assert_eq!(outcome.order.status, OrderPhase::Cooking);
    let warning = outcome.warning.unwrap();
    assert!(warning.contains("KITCHEN_STAFF"));
    assert!(warning.contains("PACKER"));
}

#[test]
fn test_transition_unknown_order() {
    let manager = create_test_manager();
    let err = manager
        .transition("t1", "ghost", OrderPhase::Cooking, "Ana", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[test]
fn test_list_orders_with_status_filter() {
    let manager = create_test_manager();
    let a = manager.create_order("t1", sample_draft()).unwrap();
    let _b = manager.create_order("t1", sample_draft()).unwrap();
    advance_to(&manager, &a.order_id, OrderPhase::Cooking);

    assert_eq!(manager.list_orders("t1", None).unwrap().len(), 2);
    let cooking = manager
        .list_orders("t1", Some(OrderPhase::Cooking))
        .unwrap();
    assert_eq!(cooking.len(), 1);
    assert_eq!(cooking[0].order_id, a.order_id);
    assert!(manager
        .list_orders("t1", Some(OrderPhase::Delivered))
        .unwrap()
        .is_empty());
}

#[test]
fn test_orders_do_not_leak_across_tenants() {
    let manager = create_test_manager();
    let order = manager.create_order("t1", sample_draft()).unwrap();

    // Another tenant with its own menu
    manager
        .upsert_menu_item(
            "t2",
            MenuItemUpsert {
                product_id: Some("pollo".to_string()),
                name: "Other Chicken".to_string(),
                price: Decimal::new(1000, 2),
                category: None,
                description: None,
                image_url: None,
            },
        )
        .unwrap();

    let err = manager.get_order("t2", &order.order_id).unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
    assert!(manager.list_orders("t2", None).unwrap().is_empty());

    // And t2 cannot advance t1's order either
    let err = manager
        .transition("t2", &order.order_id, OrderPhase::Cooking, "Eve", "KITCHEN_STAFF")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}
