//! User mutation intents.
//!
//! Every write the engine can perform is one variant here. An intent is
//! validated locally before any network call, carries its own debounce
//! key (action + target, so unrelated concurrent actions never block
//! each other), and knows whether it can change monetary totals.

use crate::error::SyncError;
use crate::models::{
    CollectionKind, Ingredient, ItemDraft, ItemField, MealPlanDraft, SuggestionDraft,
};

/// Debounce identity of an intent: rapid repeats with the same key
/// collapse to a single network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DebounceKey {
    pub action: &'static str,
    pub target: String,
}

#[derive(Debug, Clone)]
pub enum MutationIntent {
    CreateCollection {
        name: String,
        budget: f64,
    },
    EditCollection {
        id: String,
        name: String,
        budget: f64,
    },
    SaveCollection {
        id: String,
    },
    ShareCollection {
        id: String,
        email: String,
    },
    CreateOrder {
        name: String,
        vendor: String,
    },
    AddItem {
        kind: CollectionKind,
        collection_id: String,
        draft: ItemDraft,
    },
    UpdateItem {
        kind: CollectionKind,
        collection_id: String,
        item_id: String,
        field: ItemField,
    },
    Suggest {
        collection_id: String,
        draft: SuggestionDraft,
    },
    ApproveSuggestion {
        collection_id: String,
        suggestion_id: String,
    },
    CreateMealPlan {
        draft: MealPlanDraft,
    },
    AddIngredient {
        meal_plan_id: String,
        ingredient: Ingredient,
    },
}

impl MutationIntent {
    pub fn action(&self) -> &'static str {
        match self {
            MutationIntent::CreateCollection { .. } => "create_collection",
            MutationIntent::EditCollection { .. } => "edit_collection",
            MutationIntent::SaveCollection { .. } => "save_collection",
            MutationIntent::ShareCollection { .. } => "share_collection",
            MutationIntent::CreateOrder { .. } => "create_order",
            MutationIntent::AddItem { .. } => "add_item",
            MutationIntent::UpdateItem { .. } => "update_item",
            MutationIntent::Suggest { .. } => "suggest",
            MutationIntent::ApproveSuggestion { .. } => "approve_suggestion",
            MutationIntent::CreateMealPlan { .. } => "create_meal_plan",
            MutationIntent::AddIngredient { .. } => "add_ingredient",
        }
    }

    /// Reject invalid input locally; no network call is made for a
    /// failing intent.
    pub fn validate(&self) -> Result<(), SyncError> {
        match self {
            MutationIntent::CreateCollection { name, budget } => {
                require_name(name, "list name")?;
                require_amount(*budget, "budget")
            }
            MutationIntent::EditCollection { name, budget, .. } => {
                require_name(name, "list name")?;
                require_amount(*budget, "budget")
            }
            MutationIntent::SaveCollection { .. } => Ok(()),
            MutationIntent::ShareCollection { email, .. } => {
                if email.trim().is_empty() || !email.contains('@') {
                    Err(SyncError::ValidationFailed(
                        "a collaborator email is required".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            MutationIntent::CreateOrder { name, vendor } => {
                require_name(name, "order name")?;
                require_name(vendor, "vendor")
            }
            MutationIntent::AddItem { draft, .. } => draft.validate(),
            MutationIntent::UpdateItem { field, .. } => field.validate(),
            MutationIntent::Suggest { draft, .. } => draft.validate(),
            MutationIntent::ApproveSuggestion { .. } => Ok(()),
            MutationIntent::CreateMealPlan { draft } => draft.validate(),
            MutationIntent::AddIngredient { ingredient, .. } => ingredient.validate(),
        }
    }

    pub fn debounce_key(&self) -> DebounceKey {
        let target = match self {
            MutationIntent::CreateCollection { name, .. } => name.clone(),
            MutationIntent::EditCollection { id, .. } => id.clone(),
            MutationIntent::SaveCollection { id } => id.clone(),
            MutationIntent::ShareCollection { id, email } => format!("{id}:{email}"),
            MutationIntent::CreateOrder { name, .. } => name.clone(),
            MutationIntent::AddItem {
                collection_id,
                draft,
                ..
            } => format!("{collection_id}:{}", draft.name),
            MutationIntent::UpdateItem {
                item_id, field, ..
            } => format!("{item_id}:{}", field_name(field)),
            MutationIntent::Suggest {
                collection_id,
                draft,
            } => format!("{collection_id}:{}", draft.name),
            MutationIntent::ApproveSuggestion { suggestion_id, .. } => suggestion_id.clone(),
            MutationIntent::CreateMealPlan { draft } => draft.name.clone(),
            MutationIntent::AddIngredient {
                meal_plan_id,
                ingredient,
            } => format!("{meal_plan_id}:{}", ingredient.name),
        };
        DebounceKey {
            action: self.action(),
            target,
        }
    }

    /// Whether a successful dispatch can change monetary totals and must
    /// signal the financial-summary collaborator.
    pub fn touches_spend(&self) -> bool {
        match self {
            MutationIntent::AddItem { .. } | MutationIntent::ApproveSuggestion { .. } => true,
            MutationIntent::UpdateItem { field, .. } => {
                !matches!(field, ItemField::Store(_))
            }
            MutationIntent::CreateMealPlan { draft } => draft.auto_generate_list,
            _ => false,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationIntent::CreateCollection { .. } => "List created successfully",
            MutationIntent::EditCollection { .. } => "List updated successfully",
            MutationIntent::SaveCollection { .. } => "List saved successfully",
            MutationIntent::ShareCollection { .. } => "List shared successfully",
            MutationIntent::CreateOrder { .. } => "Order created successfully",
            MutationIntent::AddItem { .. } => "Item added successfully",
            MutationIntent::UpdateItem { .. } => "Item updated successfully",
            MutationIntent::Suggest { .. } => "Suggestion added successfully",
            MutationIntent::ApproveSuggestion { .. } => "Suggestion approved and added to list",
            MutationIntent::CreateMealPlan { .. } => "Meal plan created successfully",
            MutationIntent::AddIngredient { .. } => "Ingredient added to meal plan",
        }
    }
}

fn field_name(field: &ItemField) -> &'static str {
    match field {
        ItemField::Quantity(_) => "quantity",
        ItemField::Price(_) => "price",
        ItemField::Status(_) => "status",
        ItemField::Store(_) => "store",
    }
}

fn require_name(value: &str, what: &str) -> Result<(), SyncError> {
    if value.trim().is_empty() {
        Err(SyncError::ValidationFailed(format!("{what} is required")))
    } else {
        Ok(())
    }
}

fn require_amount(value: f64, what: &str) -> Result<(), SyncError> {
    if !value.is_finite() || value < 0.0 {
        Err(SyncError::ValidationFailed(format!(
            "{what} must be a non-negative amount"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;

    fn add_item(collection_id: &str, name: &str) -> MutationIntent {
        MutationIntent::AddItem {
            kind: CollectionKind::List,
            collection_id: collection_id.to_string(),
            draft: ItemDraft {
                name: name.to_string(),
                quantity: 1,
                price: 1.0,
                status: None,
                store: None,
            },
        }
    }

    #[test]
    fn test_identical_intents_share_a_debounce_key() {
        assert_eq!(add_item("l1", "Rice").debounce_key(), add_item("l1", "Rice").debounce_key());
    }

    #[test]
    fn test_unrelated_targets_do_not_share_a_key() {
        assert_ne!(add_item("l1", "Rice").debounce_key(), add_item("l2", "Rice").debounce_key());
        assert_ne!(add_item("l1", "Rice").debounce_key(), add_item("l1", "Beans").debounce_key());

        // Same target, different action.
        let edit = MutationIntent::EditCollection {
            id: "l1".to_string(),
            name: "Weekly".to_string(),
            budget: 10.0,
        };
        let save = MutationIntent::SaveCollection {
            id: "l1".to_string(),
        };
        assert_ne!(edit.debounce_key(), save.debounce_key());
    }

    #[test]
    fn test_validation_rules() {
        let intent = MutationIntent::CreateCollection {
            name: " ".to_string(),
            budget: 10.0,
        };
        assert!(matches!(
            intent.validate(),
            Err(SyncError::ValidationFailed(_))
        ));

        let intent = MutationIntent::CreateCollection {
            name: "Weekly".to_string(),
            budget: -1.0,
        };
        assert!(intent.validate().is_err());

        let intent = MutationIntent::ShareCollection {
            id: "l1".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(intent.validate().is_err());

        let intent = MutationIntent::CreateOrder {
            name: "Weekly".to_string(),
            vendor: "MegaMart".to_string(),
        };
        assert!(intent.validate().is_ok());
    }

    #[test]
    fn test_spend_classification() {
        assert!(add_item("l1", "Rice").touches_spend());
        assert!(MutationIntent::UpdateItem {
            kind: CollectionKind::List,
            collection_id: "l1".to_string(),
            item_id: "i1".to_string(),
            field: ItemField::Price(2.0),
        }
        .touches_spend());
        assert!(MutationIntent::UpdateItem {
            kind: CollectionKind::List,
            collection_id: "l1".to_string(),
            item_id: "i1".to_string(),
            field: ItemField::Status(ItemStatus::Bought),
        }
        .touches_spend());

        // A store rename moves no money.
        assert!(!MutationIntent::UpdateItem {
            kind: CollectionKind::List,
            collection_id: "l1".to_string(),
            item_id: "i1".to_string(),
            field: ItemField::Store("MegaMart".to_string()),
        }
        .touches_spend());

        assert!(!MutationIntent::SaveCollection {
            id: "l1".to_string()
        }
        .touches_spend());

        let plan = |auto: bool| MutationIntent::CreateMealPlan {
            draft: MealPlanDraft {
                name: "Dinner".to_string(),
                budget: None,
                ingredients: vec![],
                auto_generate_list: auto,
            },
        };
        assert!(plan(true).touches_spend());
        assert!(!plan(false).touches_spend());
    }
}
