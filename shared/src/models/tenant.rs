//! Tenant Model

use serde::{Deserialize, Serialize};

/// Tenant entity — the isolation boundary for menus, orders and metrics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tenant {
    pub tenant_id: String,
    pub name: String,
    pub is_active: bool,
}

impl Tenant {
    /// Built-in tenant reported when the registry is empty, so a fresh
    /// deployment has somewhere to point a demo client at.
    pub fn fallback() -> Self {
        Self {
            tenant_id: "demo-kitchen".to_string(),
            name: "Demo Kitchen".to_string(),
            is_active: true,
        }
    }
}
