use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::SyncError;

/// Shopping status of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    ToBuy,
    InPantry,
    Bought,
}

/// A line item exclusively owned by one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(alias = "item_id")]
    pub id: String,
    #[serde(default, alias = "list_id", alias = "order_id")]
    pub collection_id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price; the owning collection's total is server-derived from this.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Assigned server-side from the item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// User input for creating a line item, validated before dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl ItemDraft {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.trim().is_empty() {
            return Err(SyncError::ValidationFailed(
                "item name is required".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(SyncError::ValidationFailed(
                "quantity must be a positive integer".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SyncError::ValidationFailed(
                "price must be a non-negative amount".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single-field item edit, mirroring the server's PUT body
/// `{item_id, <field>: <value>}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Quantity(u32),
    Price(f64),
    Status(ItemStatus),
    Store(String),
}

impl ItemField {
    pub fn validate(&self) -> Result<(), SyncError> {
        match self {
            ItemField::Quantity(0) => Err(SyncError::ValidationFailed(
                "quantity must be a positive integer".to_string(),
            )),
            ItemField::Price(p) if !p.is_finite() || *p < 0.0 => Err(SyncError::ValidationFailed(
                "price must be a non-negative amount".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn patch_body(&self, item_id: &str) -> Value {
        let mut body = json!({ "item_id": item_id });
        let (key, value) = match self {
            ItemField::Quantity(q) => ("quantity", json!(q)),
            ItemField::Price(p) => ("price", json!(p)),
            ItemField::Status(s) => ("status", serde_json::to_value(s).unwrap_or(Value::Null)),
            ItemField::Store(s) => ("store", json!(s)),
        };
        body[key] = value;
        body
    }
}

/// Observed prices for an item name across past purchases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub prices: Vec<PricePoint>,
    #[serde(default)]
    pub average_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, quantity: u32, price: f64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            quantity,
            price,
            status: Some(ItemStatus::ToBuy),
            store: None,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft("Rice", 2, 5.50).validate().is_ok());
        assert!(matches!(
            draft("", 2, 5.50).validate(),
            Err(SyncError::ValidationFailed(_))
        ));
        assert!(matches!(
            draft("Rice", 0, 5.50).validate(),
            Err(SyncError::ValidationFailed(_))
        ));
        assert!(matches!(
            draft("Rice", 2, -0.01).validate(),
            Err(SyncError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_patch_body_carries_item_id_and_field() {
        let body = ItemField::Quantity(3).patch_body("i9");
        assert_eq!(body["item_id"], "i9");
        assert_eq!(body["quantity"], 3);

        let body = ItemField::Status(ItemStatus::Bought).patch_body("i9");
        assert_eq!(body["status"], "bought");
    }

    #[test]
    fn test_parses_order_item_alias() {
        // Order item payloads use item_id instead of id.
        let json = r#"{"item_id":"i1","order_id":"o1","name":"Yam","quantity":4,"price":2.25}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "i1");
        assert_eq!(item.collection_id, "o1");
        assert_eq!(item.line_total(), 9.0);
        assert!(item.status.is_none());
    }
}
