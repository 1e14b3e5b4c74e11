use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format_amount;

/// Lifecycle status of a collection as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    #[default]
    Active,
    Saved,
    PendingDelete,
}

/// Which family of server routes a collection lives under.
///
/// Grocery lists and food orders share the same item hierarchy but are
/// managed by separate endpoints, and only lists go through the
/// grace-period deletion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Order,
}

/// A grocery list or food order owning zero or more line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    /// Vendor name (orders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Spending budget (lists).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Server-derived sum of the current items' quantity x price.
    /// Trusted as-is; never recomputed locally.
    #[serde(default, alias = "total_spent", alias = "total_cost")]
    pub total: f64,
    #[serde(default)]
    pub status: CollectionStatus,
    #[serde(default)]
    pub collaborators: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Collection {
    /// Secondary line shown under the name: vendor for orders, budget for lists.
    pub fn secondary_label(&self) -> String {
        if let Some(ref vendor) = self.vendor {
            vendor.clone()
        } else if let Some(budget) = self.budget {
            format!("Budget: {}", format_amount(budget))
        } else {
            String::new()
        }
    }

    pub fn is_pending_delete(&self) -> bool {
        self.status == CollectionStatus::PendingDelete
    }
}
