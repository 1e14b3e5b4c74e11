use serde::{Deserialize, Serialize};

use crate::error::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Approved,
}

/// A proposed line item awaiting promotion into its collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(alias = "suggestion_id")]
    pub id: String,
    #[serde(default, alias = "list_id")]
    pub collection_id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: SuggestionStatus,
}

fn default_quantity() -> u32 {
    1
}

/// User input for submitting a suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionDraft {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl SuggestionDraft {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.trim().is_empty() {
            return Err(SyncError::ValidationFailed(
                "suggestion name is required".to_string(),
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

/// A purchase-history-derived suggestion, independent of any collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictiveSuggestion {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
}
