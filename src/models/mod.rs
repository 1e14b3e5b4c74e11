//! Domain models for the budgeting data mirrored by this engine.
//!
//! All identifiers are opaque stable strings assigned by the server.
//! Monetary totals on collections are server-derived and never recomputed
//! locally; concurrent collaborator edits make a local sum unreliable.

pub mod collection;
pub mod item;
pub mod meal_plan;
pub mod suggestion;

pub use collection::{Collection, CollectionKind, CollectionStatus};
pub use item::{ItemDraft, ItemField, ItemStatus, LineItem, PriceHistory, PricePoint};
pub use meal_plan::{Ingredient, MealPlan, MealPlanDraft};
pub use suggestion::{PredictiveSuggestion, Suggestion, SuggestionDraft, SuggestionStatus};
