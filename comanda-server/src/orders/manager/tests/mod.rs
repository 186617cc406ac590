use super::*;
use crate::orders::storage::OrderStorage;
use rust_decimal::Decimal;
use shared::models::OrderLineDraft;

fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    let manager = OrdersManager::new(storage);
    manager
        .upsert_menu_item(
            "t1",
            MenuItemUpsert {
                product_id: Some("pollo".to_string()),
                name: "Roast Chicken".to_string(),
                price: Decimal::new(2590, 2),
                category: Some("mains".to_string()),
                description: None,
                image_url: None,
            },
        )
        .unwrap();
    manager
        .upsert_menu_item(
            "t1",
            MenuItemUpsert {
                product_id: Some("papas".to_string()),
                name: "Fries".to_string(),
                price: Decimal::new(850, 2),
                category: Some("sides".to_string()),
                description: None,
                image_url: None,
            },
        )
        .unwrap();
    manager
}

fn sample_draft() -> OrderDraft {
    OrderDraft {
        items: vec![
            OrderLineDraft {
                product_id: "pollo".to_string(),
                name: String::new(),
                quantity: 1,
            },
            OrderLineDraft {
                product_id: "papas".to_string(),
                name: String::new(),
                quantity: 2,
            },
        ],
        customer_name: "Ana".to_string(),
        customer_phone: "999888777".to_string(),
        customer_email: "ana@example.com".to_string(),
        customer_address: "Av. Principal 123".to_string(),
    }
}

/// Create an order and advance it through every phase up to `target`.
fn advance_to(manager: &OrdersManager, order_id: &str, target: OrderPhase) {
    let steps = [
        (OrderPhase::Cooking, "Ana", "KITCHEN_STAFF"),
        (OrderPhase::Packing, "Beto", "PACKER"),
        (OrderPhase::Delivering, "Carla", "DELIVERY_DRIVER"),
        (OrderPhase::Delivered, "Carla", "DELIVERY_DRIVER"),
    ];
    for (phase, who, role) in steps {
        if phase.index() > target.index() {
            break;
        }
        manager
            .transition("t1", order_id, phase, who, role)
            .unwrap();
    }
}

mod test_lifecycle;
