//! OrdersManager — the order lifecycle state machine
//!
//! The manager is the **only** mutator of order state: it creates orders in
//! their initial phase and advances them one step at a time through the fixed
//! sequence. All other components (metrics, dashboard, API reads) consume the
//! store read-only.
//!
//! # Transition Flow
//!
//! ```text
//! transition(tenant, order_id, target, attended_by, role)
//!     ├─ 1. Load order inside a write transaction (NotFound if absent)
//!     ├─ 2. Reject if current phase is terminal
//!     ├─ 3. Reject unless target is the single successor of the current phase
//!     ├─ 4. Reject empty attribution (attended_by / role)
//!     ├─ 5. Append PhaseEvent, sync status + updated_at
//!     ├─ 6. Commit
//!     └─ 7. Broadcast notice (and return role-mismatch warning, if any)
//! ```
//!
//! Steps 1–6 happen inside one redb write transaction, so two concurrent
//! requests advancing the same order cannot both succeed: the second one
//! re-validates against the committed timeline and fails with
//! `InvalidTransition`.

use super::storage::OrderStorage;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    MenuItem, MenuItemUpsert, Order, OrderDraft, OrderLine, PhaseEvent, SYSTEM_ACTOR, SYSTEM_ROLE,
    Tenant,
};
use shared::phase::OrderPhase;
use shared::util::now_millis;
use tokio::sync::broadcast;
use validator::ValidateEmail;

/// Notice broadcast channel capacity
const NOTICE_CHANNEL_CAPACITY: usize = 1024;

/// Event published on the notice channel after a successful mutation
#[derive(Debug, Clone)]
pub enum OrderNotice {
    Created {
        tenant_id: String,
        order_id: String,
        status: OrderPhase,
        customer_name: String,
        customer_email: String,
    },
    StatusChanged {
        tenant_id: String,
        order_id: String,
        status: OrderPhase,
        previous_status: OrderPhase,
        attended_by: String,
        role: String,
        customer_name: String,
        customer_email: String,
    },
}

/// Result of a successful transition
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub order: Order,
    pub previous_status: OrderPhase,
    /// Set when `role` differs from the phase's expected role
    pub warning: Option<String>,
}

/// Order lifecycle manager
pub struct OrdersManager {
    storage: OrderStorage,
    notice_tx: broadcast::Sender<OrderNotice>,
}

impl OrdersManager {
    pub fn new(storage: OrderStorage) -> Self {
        let (notice_tx, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self { storage, notice_tx }
    }

    /// Subscribe to order notices (order created / status changed)
    pub fn subscribe(&self) -> broadcast::Receiver<OrderNotice> {
        self.notice_tx.subscribe()
    }

    /// Fail with `TenantNotFound` unless the tenant is registered
    pub fn ensure_tenant(&self, tenant_id: &str) -> AppResult<Tenant> {
        self.storage
            .get_tenant(tenant_id)?
            .ok_or_else(|| AppError::tenant_not_found(tenant_id))
    }

    // ==================== Menu ====================

    /// List the tenant's menu. An unknown tenant simply has an empty menu;
    /// the registry entry appears with the first menu write.
    pub fn list_menu(&self, tenant_id: &str) -> AppResult<Vec<MenuItem>> {
        Ok(self.storage.list_menu(tenant_id)?)
    }

    /// Upsert a menu item, registering the tenant on first write
    pub fn upsert_menu_item(&self, tenant_id: &str, upsert: MenuItemUpsert) -> AppResult<MenuItem> {
        if upsert.name.trim().is_empty() {
            return Err(AppError::required_field("name"));
        }
        if upsert.price.is_sign_negative() {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!("Price must be non-negative, got {}", upsert.price),
            ));
        }

        if self.storage.get_tenant(tenant_id)?.is_none() {
            self.storage.upsert_tenant(&Tenant {
                tenant_id: tenant_id.to_string(),
                name: tenant_id.to_string(),
                is_active: true,
            })?;
            tracing::info!(tenant_id, "tenant registered");
        }

        let item = MenuItem {
            product_id: upsert
                .product_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: upsert.name,
            price: upsert.price,
            category: upsert.category.unwrap_or_else(|| "default".to_string()),
            description: upsert.description,
            image_url: upsert.image_url,
        };
        self.storage.upsert_menu_item(tenant_id, &item)?;
        Ok(item)
    }

    // ==================== Orders ====================

    /// Create an order in its initial phase
    ///
    /// Line names and prices are resolved from the tenant's menu, never taken
    /// from the client, so financial records stay authoritative.
    pub fn create_order(&self, tenant_id: &str, draft: OrderDraft) -> AppResult<Order> {
        let tenant = self.ensure_tenant(tenant_id)?;
        if !tenant.is_active {
            return Err(AppError::new(ErrorCode::TenantInactive));
        }

        if draft.items.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::OrderEmpty,
                "items is required",
            ));
        }
        if !draft.customer_email.is_empty() && !draft.customer_email.validate_email() {
            return Err(AppError::validation("Invalid customer email").with_detail(
                "customer_email",
                draft.customer_email.as_str(),
            ));
        }

        let mut items = Vec::with_capacity(draft.items.len());
        for line in &draft.items {
            if line.quantity < 1 {
                return Err(AppError::with_message(
                    ErrorCode::InvalidQuantity,
                    format!("Quantity must be at least 1 for {}", line.product_id),
                )
                .with_detail("product_id", line.product_id.as_str()));
            }
            let menu_item = self
                .storage
                .get_menu_item(tenant_id, &line.product_id)?
                .ok_or_else(|| AppError::product_not_found(&line.product_id))?;
            items.push(OrderLine {
                product_id: menu_item.product_id,
                name: menu_item.name,
                quantity: line.quantity,
                unit_price: menu_item.price,
            });
        }

        let now = now_millis();
        let order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            customer_email: draft.customer_email,
            customer_address: draft.customer_address,
            items,
            status: OrderPhase::Received,
            created_at: now,
            updated_at: now,
            timeline: vec![PhaseEvent {
                status: OrderPhase::Received,
                attended_by: SYSTEM_ACTOR.to_string(),
                role: SYSTEM_ROLE.to_string(),
                timestamp: now,
            }],
        };
        self.storage.insert_order(&order)?;

        tracing::info!(tenant_id, order_id = %order.order_id, "order created");
        let _ = self.notice_tx.send(OrderNotice::Created {
            tenant_id: tenant_id.to_string(),
            order_id: order.order_id.clone(),
            status: order.status,
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
        });

        Ok(order)
    }

    /// Advance an order one step through the phase sequence
    pub fn transition(
        &self,
        tenant_id: &str,
        order_id: &str,
        target: OrderPhase,
        attended_by: &str,
        role: &str,
    ) -> AppResult<TransitionOutcome> {
        self.ensure_tenant(tenant_id)?;

        let mut previous_status = OrderPhase::Received;
        let order = self.storage.with_order_mut(tenant_id, order_id, |order| {
            if order.status.is_terminal() {
                return Err(AppError::terminal_state(&order.order_id));
            }
            if order.status.successor() != Some(target) {
                return Err(AppError::invalid_transition(order.status, target));
            }
            if attended_by.trim().is_empty() {
                return Err(AppError::required_field("attended_by"));
            }
            if role.trim().is_empty() {
                return Err(AppError::required_field("role"));
            }

            previous_status = order.status;
            order.record_event(PhaseEvent {
                status: target,
                attended_by: attended_by.to_string(),
                role: role.to_string(),
                timestamp: now_millis(),
            });
            Ok(())
        })?;

        let warning = target.expected_role().and_then(|expected| {
            (role != expected).then(|| format!("Expected role {expected} but got {role}"))
        });

        tracing::info!(
            tenant_id,
            order_id,
            from = %previous_status,
            to = %target,
            attended_by,
            "order advanced"
        );
        let _ = self.notice_tx.send(OrderNotice::StatusChanged {
            tenant_id: tenant_id.to_string(),
            order_id: order_id.to_string(),
            status: target,
            previous_status,
            attended_by: attended_by.to_string(),
            role: role.to_string(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
        });

        Ok(TransitionOutcome {
            order,
            previous_status,
            warning,
        })
    }

    /// Fetch one order
    pub fn get_order(&self, tenant_id: &str, order_id: &str) -> AppResult<Order> {
        self.ensure_tenant(tenant_id)?;
        self.storage
            .get_order(tenant_id, order_id)?
            .ok_or_else(|| AppError::order_not_found(order_id))
    }

    /// All orders for a tenant, optionally filtered by status
    pub fn list_orders(
        &self,
        tenant_id: &str,
        status: Option<OrderPhase>,
    ) -> AppResult<Vec<Order>> {
        self.ensure_tenant(tenant_id)?;
        let mut orders = self.storage.list_orders(tenant_id)?;
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }
        Ok(orders)
    }

    /// Tenant registry, with a built-in fallback when empty
    pub fn list_tenants(&self) -> AppResult<Vec<Tenant>> {
        let tenants = self.storage.list_tenants()?;
        if tenants.is_empty() {
            return Ok(vec![Tenant::fallback()]);
        }
        Ok(tenants)
    }
}

#[cfg(test)]
mod tests;
