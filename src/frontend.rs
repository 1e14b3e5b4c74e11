//! Interfaces consumed from the embedding UI shell.
//!
//! The engine never renders markup, looks up translation strings, or
//! draws toasts; it hands structured data and plain-English default
//! messages to these collaborators and reads the authority token through
//! `TokenSource`.

use std::sync::Arc;

use serde_json::Value;

/// Toast/banner severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// Named views the engine asks the shell to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Collections,
    ManageCollections,
    CollectionDetails,
    Orders,
    Items,
    Suggestions,
    MealPlans,
    PredictiveSuggestions,
    PriceHistory,
    DeletionCountdown,
}

/// Supplies the per-session authority token; may have none.
pub trait TokenSource: Send + Sync {
    fn authority_token(&self) -> Option<String>;
}

/// User-visible toast/banner sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Markup rendering for a named view.
pub trait ViewSink: Send + Sync {
    fn render(&self, view: View, data: Value);
}

/// Invoked after any mutation that changes monetary totals.
pub trait FinancialSummaryHook: Send + Sync {
    fn financial_summary_changed(&self);
}

/// User confirmation gate before a destructive action is dispatched.
pub trait ConfirmAction: Send + Sync {
    fn confirm_destructive(&self, prompt: &str) -> bool;
}

/// Bundle of shell collaborators handed to the coordinator.
#[derive(Clone)]
pub struct Shell {
    pub notifier: Arc<dyn Notifier>,
    pub views: Arc<dyn ViewSink>,
    pub financial: Arc<dyn FinancialSummaryHook>,
    pub confirm: Arc<dyn ConfirmAction>,
}

impl Shell {
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    pub fn render(&self, view: View, data: Value) {
        self.views.render(view, data);
    }
}
