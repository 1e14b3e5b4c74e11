//! Typed route layer over the raw transport.
//!
//! One method per server operation; each formats the route, sends the
//! request, and parses the JSON into domain models. All routes mirror the
//! backend's blueprint layout: `/lists`, `/orders`, `/meal_plans`,
//! `/price_history/{name}`, `/suggestions`.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::deletion::PendingDeleteStatus;
use crate::models::{
    Collection, CollectionKind, CollectionStatus, Ingredient, ItemDraft, ItemField, LineItem,
    MealPlan, MealPlanDraft, PredictiveSuggestion, PriceHistory, Suggestion, SuggestionDraft,
};

use super::{ApiError, Transport};

#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn parse<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("{what}: {e}")))
    }

    fn base(kind: CollectionKind) -> &'static str {
        match kind {
            CollectionKind::List => "lists",
            CollectionKind::Order => "orders",
        }
    }

    // ===== Collections (grocery lists) =====

    pub async fn fetch_collections(
        &self,
        status: CollectionStatus,
    ) -> Result<Vec<Collection>, ApiError> {
        let status = match status {
            CollectionStatus::Active => "active",
            CollectionStatus::Saved => "saved",
            CollectionStatus::PendingDelete => "pending_delete",
        };
        let value = self
            .transport
            .send(&format!("lists?status={status}"), Method::GET, None)
            .await?;
        let collections: Vec<Collection> = Self::parse(value, "collection list")?;
        debug!(count = collections.len(), status, "Collections fetched");
        Ok(collections)
    }

    pub async fn fetch_collection(&self, id: &str) -> Result<Collection, ApiError> {
        let value = self
            .transport
            .send(&format!("lists/{id}"), Method::GET, None)
            .await?;
        Self::parse(value, "collection detail")
    }

    pub async fn create_collection(&self, name: &str, budget: f64) -> Result<Value, ApiError> {
        self.transport
            .send(
                "lists",
                Method::POST,
                Some(&json!({ "name": name, "budget": budget })),
            )
            .await
    }

    pub async fn update_collection(
        &self,
        id: &str,
        name: &str,
        budget: f64,
    ) -> Result<Value, ApiError> {
        self.transport
            .send(
                &format!("lists/{id}/edit"),
                Method::PUT,
                Some(&json!({ "name": name, "budget": budget })),
            )
            .await
    }

    pub async fn save_collection(&self, id: &str) -> Result<Value, ApiError> {
        self.transport
            .send(&format!("lists/{id}/save"), Method::PUT, None)
            .await
    }

    pub async fn share_collection(&self, id: &str, email: &str) -> Result<Value, ApiError> {
        self.transport
            .send(
                &format!("lists/{id}/share"),
                Method::POST,
                Some(&json!({ "email": email })),
            )
            .await
    }

    /// Export a collection as an opaque document blob.
    pub async fn export_collection(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        self.transport
            .send_binary(&format!("lists/{id}/export_pdf"))
            .await
    }

    // ===== Pending deletion =====

    /// Ask the server to mark a collection pending-delete. Returns the
    /// server's grace period when the acceptance carries one.
    pub async fn begin_pending_delete(&self, id: &str) -> Result<Option<i64>, ApiError> {
        let value = self
            .transport
            .send(&format!("lists/{id}/pending_delete"), Method::POST, None)
            .await?;
        Ok(value.get("remaining_seconds").and_then(Value::as_i64))
    }

    pub async fn poll_pending_delete(&self, id: &str) -> Result<PendingDeleteStatus, ApiError> {
        let value = self
            .transport
            .send(
                &format!("lists/{id}/pending_delete/status"),
                Method::GET,
                None,
            )
            .await?;
        Self::parse(value, "pending delete status")
    }

    pub async fn cancel_pending_delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .send(
                &format!("lists/{id}/pending_delete/cancel"),
                Method::POST,
                None,
            )
            .await?;
        Ok(())
    }

    // ===== Orders =====

    pub async fn fetch_orders(&self) -> Result<Vec<Collection>, ApiError> {
        let value = self.transport.send("orders", Method::GET, None).await?;
        let orders: Vec<Collection> = Self::parse(value, "order list")?;
        debug!(count = orders.len(), "Orders fetched");
        Ok(orders)
    }

    pub async fn create_order(&self, name: &str, vendor: &str) -> Result<Value, ApiError> {
        self.transport
            .send(
                "orders",
                Method::POST,
                Some(&json!({ "name": name, "vendor": vendor })),
            )
            .await
    }

    /// Immediate deletion; orders do not go through the grace-period flow.
    pub async fn delete_order(&self, id: &str) -> Result<Value, ApiError> {
        self.transport
            .send(&format!("orders/{id}"), Method::DELETE, None)
            .await
    }

    // ===== Line items =====

    pub async fn fetch_items(
        &self,
        kind: CollectionKind,
        collection_id: &str,
    ) -> Result<Vec<LineItem>, ApiError> {
        let value = self
            .transport
            .send(
                &format!("{}/{collection_id}/items", Self::base(kind)),
                Method::GET,
                None,
            )
            .await?;
        Self::parse(value, "item list")
    }

    pub async fn create_item(
        &self,
        kind: CollectionKind,
        collection_id: &str,
        draft: &ItemDraft,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| ApiError::InvalidResponse(format!("item draft: {e}")))?;
        self.transport
            .send(
                &format!("{}/{collection_id}/items", Self::base(kind)),
                Method::POST,
                Some(&body),
            )
            .await
    }

    pub async fn update_item(
        &self,
        kind: CollectionKind,
        collection_id: &str,
        item_id: &str,
        field: &ItemField,
    ) -> Result<Value, ApiError> {
        self.transport
            .send(
                &format!("{}/{collection_id}/items", Self::base(kind)),
                Method::PUT,
                Some(&field.patch_body(item_id)),
            )
            .await
    }

    // ===== Suggestions =====

    pub async fn fetch_suggestions(&self, collection_id: &str) -> Result<Vec<Suggestion>, ApiError> {
        let value = self
            .transport
            .send(
                &format!("lists/{collection_id}/suggestions"),
                Method::GET,
                None,
            )
            .await?;
        Self::parse(value, "suggestion list")
    }

    pub async fn create_suggestion(
        &self,
        collection_id: &str,
        draft: &SuggestionDraft,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| ApiError::InvalidResponse(format!("suggestion draft: {e}")))?;
        self.transport
            .send(
                &format!("lists/{collection_id}/suggestions"),
                Method::POST,
                Some(&body),
            )
            .await
    }

    pub async fn approve_suggestion(
        &self,
        collection_id: &str,
        suggestion_id: &str,
    ) -> Result<Value, ApiError> {
        self.transport
            .send(
                &format!("lists/{collection_id}/suggestions/{suggestion_id}/approve"),
                Method::POST,
                None,
            )
            .await
    }

    pub async fn fetch_predictive_suggestions(&self) -> Result<Vec<PredictiveSuggestion>, ApiError> {
        let value = self.transport.send("suggestions", Method::GET, None).await?;
        Self::parse(value, "predictive suggestions")
    }

    // ===== Meal plans =====

    pub async fn fetch_meal_plans(&self) -> Result<Vec<MealPlan>, ApiError> {
        let value = self.transport.send("meal_plans", Method::GET, None).await?;
        Self::parse(value, "meal plan list")
    }

    pub async fn create_meal_plan(&self, draft: &MealPlanDraft) -> Result<Value, ApiError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| ApiError::InvalidResponse(format!("meal plan draft: {e}")))?;
        self.transport
            .send("meal_plans", Method::POST, Some(&body))
            .await
    }

    pub async fn add_ingredient(
        &self,
        meal_plan_id: &str,
        ingredient: &Ingredient,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(ingredient)
            .map_err(|e| ApiError::InvalidResponse(format!("ingredient: {e}")))?;
        self.transport
            .send(
                &format!("meal_plans/{meal_plan_id}/ingredients"),
                Method::POST,
                Some(&body),
            )
            .await
    }

    // ===== Price history =====

    pub async fn fetch_price_history(&self, item_name: &str) -> Result<PriceHistory, ApiError> {
        let value = self
            .transport
            .send(
                &format!("price_history/{}", encode_segment(item_name)),
                Method::GET,
                None,
            )
            .await?;
        Self::parse(value, "price history")
    }
}

/// Percent-encode an item name for use as a single path segment.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
