//! Domain models

mod menu_item;
mod order;
mod tenant;

pub use menu_item::{MenuItem, MenuItemUpsert};
pub use order::{
    Order, OrderDraft, OrderLine, OrderLineDraft, PhaseEvent, SYSTEM_ACTOR, SYSTEM_ROLE,
};
pub use tenant::Tenant;
