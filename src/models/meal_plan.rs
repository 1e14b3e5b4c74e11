use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// One entry of a meal plan's ordered ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Ingredient {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.trim().is_empty() {
            return Err(SyncError::ValidationFailed(
                "ingredient name is required".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(SyncError::ValidationFailed(
                "ingredient quantity must be a positive integer".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SyncError::ValidationFailed(
                "ingredient price must be a non-negative amount".to_string(),
            ));
        }
        Ok(())
    }
}

/// A meal plan, independent of collections; can derive a new collection
/// server-side at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MealPlan {
    /// Preview sum for display only; the derived collection's real total
    /// comes back from the server.
    pub fn ingredient_total(&self) -> f64 {
        self.ingredients
            .iter()
            .map(|i| i.quantity as f64 * i.price)
            .sum()
    }
}

/// User input for creating a meal plan.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub ingredients: Vec<Ingredient>,
    /// When set, the server also creates a collection populated with the
    /// ingredients.
    pub auto_generate_list: bool,
}

impl MealPlanDraft {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.trim().is_empty() {
            return Err(SyncError::ValidationFailed(
                "meal plan name is required".to_string(),
            ));
        }
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(SyncError::ValidationFailed(
                    "budget must be a non-negative amount".to_string(),
                ));
            }
        }
        for ingredient in &self.ingredients {
            ingredient.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_total() {
        let plan = MealPlan {
            id: "m1".to_string(),
            name: "Jollof week".to_string(),
            budget: Some(50.0),
            ingredients: vec![
                Ingredient {
                    name: "Rice".to_string(),
                    quantity: 2,
                    price: 5.5,
                    category: None,
                },
                Ingredient {
                    name: "Tomatoes".to_string(),
                    quantity: 6,
                    price: 0.5,
                    category: Some("produce".to_string()),
                },
            ],
            created_at: None,
        };
        assert!((plan.ingredient_total() - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_draft_rejects_bad_ingredient() {
        let draft = MealPlanDraft {
            name: "Dinner".to_string(),
            budget: None,
            ingredients: vec![Ingredient {
                name: "Rice".to_string(),
                quantity: 0,
                price: 1.0,
                category: None,
            }],
            auto_generate_list: false,
        };
        assert!(matches!(
            draft.validate(),
            Err(SyncError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_draft_rejects_negative_budget() {
        let draft = MealPlanDraft {
            name: "Dinner".to_string(),
            budget: Some(-5.0),
            ingredients: vec![],
            auto_generate_list: true,
        };
        assert!(draft.validate().is_err());
    }
}
