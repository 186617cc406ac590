//! redb-based storage layer for tenants, menus and orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `tenants` | `tenant_id` | `Tenant` | Tenant registry |
//! | `menu` | `(tenant_id, product_id)` | `MenuItem` | Per-tenant menu |
//! | `orders` | `(tenant_id, order_id)` | `Order` | Orders with embedded timeline |
//!
//! # Durability and concurrency
//!
//! Commits are persistent as soon as `commit()` returns, so orders survive
//! process restarts. redb allows a single write transaction at a time:
//! [`OrderStorage::with_order_mut`] runs its validation closure *inside* the
//! write transaction, which serializes competing transitions on the same
//! order — the loser re-reads committed state and fails validation instead of
//! double-applying. Reads run on MVCC snapshots and never block writers.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::{AppError, AppResult};
use shared::models::{MenuItem, Order, Tenant};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Tenant registry: key = tenant_id, value = JSON-serialized Tenant
const TENANTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("tenants");

/// Menu items: key = (tenant_id, product_id), value = JSON-serialized MenuItem
const MENU_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("menu");

/// Orders: key = (tenant_id, order_id), value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage error occurred");
        AppError::database(err.to_string())
    }
}

/// Embedded store backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open (or create) the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    /// Create all tables if they don't exist
    fn init_tables(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TENANTS_TABLE)?;
            let _ = write_txn.open_table(MENU_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ==================== Tenants ====================

    pub fn upsert_tenant(&self, tenant: &Tenant) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TENANTS_TABLE)?;
            let buf = serde_json::to_vec(tenant)?;
            table.insert(tenant.tenant_id.as_str(), buf.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_tenant(&self, tenant_id: &str) -> StorageResult<Option<Tenant>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TENANTS_TABLE)?;
        match table.get(tenant_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_tenants(&self) -> StorageResult<Vec<Tenant>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TENANTS_TABLE)?;

        let mut tenants = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            tenants.push(serde_json::from_slice(value.value())?);
        }
        Ok(tenants)
    }

    // ==================== Menu ====================

    pub fn upsert_menu_item(&self, tenant_id: &str, item: &MenuItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_TABLE)?;
            let buf = serde_json::to_vec(item)?;
            table.insert((tenant_id, item.product_id.as_str()), buf.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_menu_item(
        &self,
        tenant_id: &str,
        product_id: &str,
    ) -> StorageResult<Option<MenuItem>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(MENU_TABLE)?;
        match table.get((tenant_id, product_id))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_menu(&self, tenant_id: &str) -> StorageResult<Vec<MenuItem>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(MENU_TABLE)?;

        let mut items = Vec::new();
        for result in table.range((tenant_id, "")..)? {
            let (key, value) = result?;
            if key.value().0 != tenant_id {
                break;
            }
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    // ==================== Orders ====================

    pub fn insert_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let buf = serde_json::to_vec(order)?;
            table.insert(
                (order.tenant_id.as_str(), order.order_id.as_str()),
                buf.as_slice(),
            )?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_order(&self, tenant_id: &str, order_id: &str) -> StorageResult<Option<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get((tenant_id, order_id))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All orders for a tenant, ordered by creation time (ascending)
    pub fn list_orders(&self, tenant_id: &str) -> StorageResult<Vec<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;

        let mut orders: Vec<Order> = Vec::new();
        for result in table.range((tenant_id, "")..)? {
            let (key, value) = result?;
            if key.value().0 != tenant_id {
                break;
            }
            orders.push(serde_json::from_slice(value.value())?);
        }
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Read-modify-write a single order inside one write transaction.
    ///
    /// The closure performs domain validation against the committed state and
    /// mutates the order in place; any error aborts the transaction, leaving
    /// the stored order untouched. This is the atomicity point for phase
    /// transitions: check-and-append cannot be interleaved with another write
    /// on the same database.
    pub fn with_order_mut<F>(&self, tenant_id: &str, order_id: &str, f: F) -> AppResult<Order>
    where
        F: FnOnce(&mut Order) -> AppResult<()>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE).map_err(StorageError::from)?;

            let mut order: Order = {
                let guard = table
                    .get((tenant_id, order_id))
                    .map_err(StorageError::from)?
                    .ok_or_else(|| AppError::order_not_found(order_id))?;
                serde_json::from_slice(guard.value()).map_err(StorageError::from)?
            };

            f(&mut order)?;

            let buf = serde_json::to_vec(&order).map_err(StorageError::from)?;
            table
                .insert((tenant_id, order_id), buf.as_slice())
                .map_err(StorageError::from)?;
            order
        };
        txn.commit().map_err(StorageError::from)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{OrderLine, PhaseEvent};
    use shared::phase::OrderPhase;

    fn tenant(id: &str) -> Tenant {
        Tenant {
            tenant_id: id.to_string(),
            name: id.to_string(),
            is_active: true,
        }
    }

    fn menu_item(product_id: &str, price: i64) -> MenuItem {
        MenuItem {
            product_id: product_id.to_string(),
            name: format!("Item {product_id}"),
            price: Decimal::new(price, 2),
            category: "default".to_string(),
            description: None,
            image_url: None,
        }
    }

    fn order(tenant_id: &str, order_id: &str, created_at: i64) -> Order {
        Order {
            order_id: order_id.to_string(),
            tenant_id: tenant_id.to_string(),
            customer_name: "Ana".to_string(),
            customer_phone: String::new(),
            customer_email: String::new(),
            customer_address: String::new(),
            items: vec![OrderLine {
                product_id: "p1".to_string(),
                name: "Item p1".to_string(),
                quantity: 1,
                unit_price: Decimal::new(1000, 2),
            }],
            status: OrderPhase::Received,
            created_at,
            updated_at: created_at,
            timeline: vec![PhaseEvent {
                status: OrderPhase::Received,
                attended_by: "system".to_string(),
                role: "SYSTEM".to_string(),
                timestamp: created_at,
            }],
        }
    }

    #[test]
    fn test_tenant_roundtrip() {
        let storage = OrderStorage::open_in_memory().unwrap();

        assert!(storage.get_tenant("t1").unwrap().is_none());

        storage.upsert_tenant(&tenant("t1")).unwrap();
        assert_eq!(storage.get_tenant("t1").unwrap(), Some(tenant("t1")));
        assert_eq!(storage.list_tenants().unwrap().len(), 1);
    }

    #[test]
    fn test_menu_scoped_by_tenant() {
        let storage = OrderStorage::open_in_memory().unwrap();

        storage.upsert_menu_item("t1", &menu_item("p1", 1050)).unwrap();
        storage.upsert_menu_item("t1", &menu_item("p2", 2599)).unwrap();
        storage.upsert_menu_item("t2", &menu_item("p9", 999)).unwrap();

        let t1_menu = storage.list_menu("t1").unwrap();
        assert_eq!(t1_menu.len(), 2);
        assert!(t1_menu.iter().all(|i| i.product_id.starts_with('p')));

        assert_eq!(storage.list_menu("t2").unwrap().len(), 1);
        assert!(storage.list_menu("t3").unwrap().is_empty());

        assert!(storage.get_menu_item("t2", "p1").unwrap().is_none());
        assert!(storage.get_menu_item("t1", "p1").unwrap().is_some());
    }

    #[test]
    fn test_orders_scoped_by_tenant() {
        let storage = OrderStorage::open_in_memory().unwrap();

        storage.insert_order(&order("t1", "a", 100)).unwrap();
        storage.insert_order(&order("t1", "b", 50)).unwrap();
        storage.insert_order(&order("t2", "c", 10)).unwrap();

        let t1_orders = storage.list_orders("t1").unwrap();
        assert_eq!(t1_orders.len(), 2);
        // Ascending by created_at, not by key
        assert_eq!(t1_orders[0].order_id, "b");
        assert_eq!(t1_orders[1].order_id, "a");

        assert!(storage.get_order("t2", "a").unwrap().is_none());
    }

    #[test]
    fn test_with_order_mut_applies_mutation() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.insert_order(&order("t1", "a", 100)).unwrap();

        let updated = storage
            .with_order_mut("t1", "a", |o| {
                o.record_event(PhaseEvent {
                    status: OrderPhase::Cooking,
                    attended_by: "Ana".to_string(),
                    role: "KITCHEN_STAFF".to_string(),
                    timestamp: 200,
                });
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.status, OrderPhase::Cooking);

        let stored = storage.get_order("t1", "a").unwrap().unwrap();
        assert_eq!(stored.status, OrderPhase::Cooking);
        assert_eq!(stored.timeline.len(), 2);
    }

    #[test]
    fn test_with_order_mut_aborts_on_closure_error() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.insert_order(&order("t1", "a", 100)).unwrap();

        let result = storage.with_order_mut("t1", "a", |o| {
            o.record_event(PhaseEvent {
                status: OrderPhase::Cooking,
                attended_by: "Ana".to_string(),
                role: "KITCHEN_STAFF".to_string(),
                timestamp: 200,
            });
            Err(AppError::validation("rejected"))
        });
        assert!(result.is_err());

        // Stored order is unchanged
        let stored = storage.get_order("t1", "a").unwrap().unwrap();
        assert_eq!(stored.status, OrderPhase::Received);
        assert_eq!(stored.timeline.len(), 1);
    }

    #[test]
    fn test_with_order_mut_unknown_order() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let result = storage.with_order_mut("t1", "nope", |_| Ok(()));
        assert_eq!(
            result.unwrap_err().code,
            shared::error::ErrorCode::OrderNotFound
        );
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.redb");

        {
            let storage = OrderStorage::open(&path).unwrap();
            storage.upsert_tenant(&tenant("t1")).unwrap();
            storage.insert_order(&order("t1", "a", 100)).unwrap();
        }

        let storage = OrderStorage::open(&path).unwrap();
        assert!(storage.get_tenant("t1").unwrap().is_some());
        let stored = storage.get_order("t1", "a").unwrap().unwrap();
        assert_eq!(stored.order_id, "a");
        assert_eq!(stored.timeline.len(), 1);
    }
}
