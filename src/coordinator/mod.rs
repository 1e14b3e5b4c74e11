//! Mutation coordination and read-path cache fallback.
//!
//! The `Coordinator` is the only writer of the mirror cache. Every user
//! intent goes through the same pipeline: local validation, per-target
//! debouncing, exactly one network mutation, then a refresh of exactly
//! the cache keys the mutation could have changed and a re-render of the
//! views backed by them. Mutations that move money also signal the
//! financial-summary collaborator.
//!
//! Reads fetch live data and overwrite the mirror on success; on any
//! transport failure they notify the user and serve the last snapshot
//! instead of rendering empty. Writes are never applied optimistically -
//! the mirror only ever reflects server-confirmed state.

pub mod debounce;
pub mod intent;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::json;
use tracing::{debug, warn};

use crate::api::{ApiClient, Gateway, Transport};
use crate::cache::{CacheKey, MirrorCache};
use crate::config::Config;
use crate::deletion::{DeletionEvent, DeletionTracker, PendingDeletion};
use crate::error::SyncError;
use crate::frontend::{Severity, Shell, TokenSource, View};
use crate::models::{
    Collection, CollectionKind, CollectionStatus, LineItem, MealPlan, PredictiveSuggestion,
    PriceHistory, Suggestion,
};
use crate::state::SessionState;

use self::debounce::Debouncer;
pub use self::intent::{DebounceKey, MutationIntent};

// ============================================================================
// Constants
// ============================================================================

/// Maximum concurrent requests while priming the cache for offline use.
const MAX_CONCURRENT_REQUESTS: usize = 5;

const MSG_AUTHORITY_DENIED: &str = "You do not have sufficient authority for this action";
const MSG_GENERIC_FAILURE: &str = "An error occurred. Please try again";
const MSG_STALE_DATA: &str = "Could not refresh live data; showing the last saved copy";

/// What became of a submitted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Dispatched and confirmed by the server.
    Applied,
    /// Collapsed into an identical intent inside the debounce window.
    Coalesced,
    /// The user declined the destructive-action confirmation.
    NotConfirmed,
    /// A deletion countdown is already running for this collection.
    AlreadyPending,
}

pub struct Coordinator {
    gateway: Gateway,
    cache: MirrorCache,
    shell: Shell,
    session: SessionState,
    debouncer: Debouncer,
    deletions: DeletionTracker,
    poll_interval: std::time::Duration,
    default_grace_secs: i64,
}

impl Coordinator {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: MirrorCache,
        shell: Shell,
        config: &Config,
    ) -> Self {
        Self {
            gateway: Gateway::new(transport),
            cache,
            shell,
            session: SessionState::default(),
            debouncer: Debouncer::new(config.debounce_window()),
            deletions: DeletionTracker::new(),
            poll_interval: config.poll_interval(),
            default_grace_secs: config.default_grace_secs,
        }
    }

    /// Build a coordinator against the configured backend, pulling the
    /// authority token from the session collaborator. A missing token
    /// degrades to unauthenticated requests instead of failing.
    pub fn connect(
        config: &Config,
        shell: Shell,
        tokens: &dyn TokenSource,
    ) -> Result<Self, SyncError> {
        let mut client = ApiClient::new(&config.base_url)?;
        match tokens.authority_token() {
            Some(token) => client.set_token(token),
            None => warn!("No authority token supplied; continuing unauthenticated"),
        }
        let cache = MirrorCache::new(config.cache_dir()?)?;
        Ok(Self::new(Arc::new(client), cache, shell, config))
    }

    pub fn cache(&self) -> &MirrorCache {
        &self.cache
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_delete_pending(&self, collection_id: &str) -> bool {
        self.deletions.is_pending(collection_id)
    }

    pub fn pending_deletion(&self, collection_id: &str) -> Option<&PendingDeletion> {
        self.deletions.pending(collection_id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Run one user intent through validation, debouncing, dispatch, and
    /// the post-success refresh policy.
    pub async fn apply(&mut self, intent: MutationIntent) -> Result<MutationOutcome, SyncError> {
        if let Err(e) = intent.validate() {
            self.shell.notify(&e.to_string(), Severity::Warning);
            return Err(e);
        }

        if !self.debouncer.admit(intent.debounce_key()) {
            debug!(action = intent.action(), "Intent coalesced inside debounce window");
            return Ok(MutationOutcome::Coalesced);
        }

        match self.dispatch(&intent).await {
            Ok(()) => {
                self.refresh_after(&intent).await;
                self.shell.notify(intent.success_message(), Severity::Success);
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    async fn dispatch(&self, intent: &MutationIntent) -> Result<(), crate::api::ApiError> {
        debug!(action = intent.action(), "Dispatching mutation");
        match intent {
            MutationIntent::CreateCollection { name, budget } => {
                self.gateway.create_collection(name, *budget).await?;
            }
            MutationIntent::EditCollection { id, name, budget } => {
                self.gateway.update_collection(id, name, *budget).await?;
            }
            MutationIntent::SaveCollection { id } => {
                self.gateway.save_collection(id).await?;
            }
            MutationIntent::ShareCollection { id, email } => {
                self.gateway.share_collection(id, email).await?;
            }
            MutationIntent::CreateOrder { name, vendor } => {
                self.gateway.create_order(name, vendor).await?;
            }
            MutationIntent::AddItem {
                kind,
                collection_id,
                draft,
            } => {
                self.gateway.create_item(*kind, collection_id, draft).await?;
            }
            MutationIntent::UpdateItem {
                kind,
                collection_id,
                item_id,
                field,
            } => {
                self.gateway
                    .update_item(*kind, collection_id, item_id, field)
                    .await?;
            }
            MutationIntent::Suggest {
                collection_id,
                draft,
            } => {
                self.gateway.create_suggestion(collection_id, draft).await?;
            }
            MutationIntent::ApproveSuggestion {
                collection_id,
                suggestion_id,
            } => {
                self.gateway
                    .approve_suggestion(collection_id, suggestion_id)
                    .await?;
            }
            MutationIntent::CreateMealPlan { draft } => {
                self.gateway.create_meal_plan(draft).await?;
            }
            MutationIntent::AddIngredient {
                meal_plan_id,
                ingredient,
            } => {
                self.gateway.add_ingredient(meal_plan_id, ingredient).await?;
            }
        }
        Ok(())
    }

    /// Refresh exactly the cache keys the mutation could have changed and
    /// signal the financial collaborator when spend moved.
    async fn refresh_after(&mut self, intent: &MutationIntent) {
        match intent {
            MutationIntent::CreateCollection { .. }
            | MutationIntent::EditCollection { .. }
            | MutationIntent::SaveCollection { .. }
            | MutationIntent::ShareCollection { .. } => {
                self.refresh_collection_views().await;
            }
            MutationIntent::CreateOrder { .. } => {
                self.refresh_orders().await;
            }
            MutationIntent::AddItem {
                kind,
                collection_id,
                ..
            }
            | MutationIntent::UpdateItem {
                kind,
                collection_id,
                ..
            } => {
                self.refresh_items(*kind, collection_id).await;
            }
            MutationIntent::Suggest { collection_id, .. } => {
                self.refresh_suggestions(collection_id).await;
            }
            MutationIntent::ApproveSuggestion { collection_id, .. } => {
                // Approval promotes the suggestion into the item list.
                self.refresh_suggestions(collection_id).await;
                self.refresh_items(CollectionKind::List, collection_id).await;
            }
            MutationIntent::CreateMealPlan { draft } => {
                self.refresh_meal_plans().await;
                if draft.auto_generate_list {
                    self.refresh_collection_views().await;
                }
            }
            MutationIntent::AddIngredient { .. } => {
                self.refresh_meal_plans().await;
            }
        }

        if intent.touches_spend() {
            self.shell.financial.financial_summary_changed();
        }
    }

    // =========================================================================
    // Immediate order deletion
    // =========================================================================

    /// Orders delete immediately after confirmation; only grocery lists
    /// get the grace-period countdown.
    pub async fn delete_order(
        &mut self,
        order_id: &str,
        name: &str,
    ) -> Result<MutationOutcome, SyncError> {
        let prompt = format!("Delete order \"{name}\"?");
        if !self.shell.confirm.confirm_destructive(&prompt) {
            return Ok(MutationOutcome::NotConfirmed);
        }

        match self.gateway.delete_order(order_id).await {
            Ok(_) => {
                if let Err(e) = self.cache.purge_collection(order_id) {
                    warn!(error = %e, order_id, "Failed to purge deleted order from cache");
                }
                self.session.clear_if_current(order_id);
                self.refresh_orders().await;
                self.shell.financial.financial_summary_changed();
                self.shell.notify("Order deleted", Severity::Success);
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Grace-period deletion
    // =========================================================================

    /// Enter the pending-delete flow for a collection. The server marks it
    /// `pending_delete` and a 1 s status poll drives the countdown; nothing
    /// is removed locally until the server confirms.
    pub async fn request_delete(
        &mut self,
        collection_id: &str,
        name: &str,
    ) -> Result<MutationOutcome, SyncError> {
        if self.deletions.is_pending(collection_id) {
            self.shell
                .notify("Deletion already in progress for this list", Severity::Warning);
            return Ok(MutationOutcome::AlreadyPending);
        }

        let prompt = format!("Are you sure you want to delete \"{name}\"?");
        if !self.shell.confirm.confirm_destructive(&prompt) {
            return Ok(MutationOutcome::NotConfirmed);
        }

        match self.gateway.begin_pending_delete(collection_id).await {
            Ok(server_grace) => {
                let initial = server_grace.unwrap_or(self.default_grace_secs);
                self.deletions.begin(
                    collection_id,
                    initial,
                    server_grace.is_some(),
                    self.gateway.clone(),
                    self.poll_interval,
                );
                self.render_countdown(collection_id, Some(initial));
                self.shell.notify(
                    "Deletion scheduled; it can still be cancelled",
                    Severity::Info,
                );
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Cancel a pending deletion. On success the collection keeps its
    /// prior status and the cache is left untouched; on failure the
    /// countdown keeps running.
    pub async fn cancel_delete(
        &mut self,
        collection_id: &str,
    ) -> Result<MutationOutcome, SyncError> {
        if !self.deletions.is_pending(collection_id) {
            return Err(SyncError::ValidationFailed(
                "no deletion is pending for this list".to_string(),
            ));
        }

        match self.gateway.cancel_pending_delete(collection_id).await {
            Ok(()) => {
                self.deletions.finish(collection_id);
                self.render_countdown(collection_id, None);
                self.refresh_collection_views().await;
                self.shell.notify("Deletion cancelled", Severity::Info);
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Drain pending countdown events. Call from the host event loop.
    pub async fn pump_deletions(&mut self) {
        while let Some(event) = self.deletions.try_next() {
            self.process_deletion_event(event).await;
        }
    }

    async fn process_deletion_event(&mut self, event: DeletionEvent) {
        match event {
            DeletionEvent::Tick {
                collection_id,
                remaining_seconds,
            } => {
                // The server value always wins over any local clock.
                self.deletions
                    .update_remaining(&collection_id, remaining_seconds);
                self.render_countdown(&collection_id, Some(remaining_seconds));
            }
            DeletionEvent::Committed { collection_id } => {
                self.deletions.finish(&collection_id);
                if let Err(e) = self.cache.purge_collection(&collection_id) {
                    warn!(error = %e, collection_id, "Failed to purge deleted collection");
                }
                self.session.clear_if_current(&collection_id);
                self.render_countdown(&collection_id, None);
                self.refresh_collection_views().await;
                self.shell.financial.financial_summary_changed();
                self.shell.notify("List deleted", Severity::Success);
            }
            DeletionEvent::Failed {
                collection_id,
                error,
            } => {
                // Fail safe: the countdown stops but nothing is assumed
                // deleted until the server says so.
                self.deletions.finish(&collection_id);
                self.render_countdown(&collection_id, None);
                warn!(collection_id = %collection_id, error = %error, "Deletion countdown aborted");
                self.shell.notify(
                    "Could not confirm deletion status; the list was left unchanged",
                    Severity::Danger,
                );
            }
        }
    }

    fn render_countdown(&self, collection_id: &str, remaining_seconds: Option<i64>) {
        self.shell.render(
            View::DeletionCountdown,
            json!({
                "collection_id": collection_id,
                "remaining_seconds": remaining_seconds,
            }),
        );
    }

    // =========================================================================
    // Read paths
    // =========================================================================

    /// Active collections; serves the mirror snapshot on fetch failure.
    pub async fn load_collections(&mut self) -> Vec<Collection> {
        match self.gateway.fetch_collections(CollectionStatus::Active).await {
            Ok(collections) => {
                self.store_collections(&CacheKey::Collections, &collections);
                self.render_list(View::Collections, &collections);
                collections
            }
            Err(e) => self.fallback_collections(&CacheKey::Collections, View::Collections, &e),
        }
    }

    /// Saved collections (the manage view).
    pub async fn load_manage_collections(&mut self) -> Vec<Collection> {
        match self.gateway.fetch_collections(CollectionStatus::Saved).await {
            Ok(collections) => {
                self.store_collections(&CacheKey::ManageCollections, &collections);
                self.render_list(View::ManageCollections, &collections);
                collections
            }
            Err(e) => {
                self.fallback_collections(&CacheKey::ManageCollections, View::ManageCollections, &e)
            }
        }
    }

    pub async fn load_orders(&mut self) -> Vec<Collection> {
        match self.gateway.fetch_orders().await {
            Ok(orders) => {
                self.store_collections(&CacheKey::Orders, &orders);
                self.render_list(View::Orders, &orders);
                orders
            }
            Err(e) => self.fallback_collections(&CacheKey::Orders, View::Orders, &e),
        }
    }

    /// Items of one collection; selects it as the current one.
    pub async fn load_items(
        &mut self,
        kind: CollectionKind,
        collection_id: &str,
    ) -> Vec<LineItem> {
        match kind {
            CollectionKind::List => self.session.select_collection(collection_id),
            CollectionKind::Order => self.session.select_order(collection_id),
        }

        match self.gateway.fetch_items(kind, collection_id).await {
            Ok(items) => {
                if let Err(e) = self.cache.save_items(collection_id, &items) {
                    warn!(error = %e, collection_id, "Failed to cache items");
                }
                self.render_list(View::Items, &items);
                items
            }
            Err(e) => {
                self.notify_read_failure(&e);
                let items = self
                    .cache
                    .load_items(collection_id)
                    .ok()
                    .flatten()
                    .map(|c| c.data)
                    .unwrap_or_default();
                self.render_list(View::Items, &items);
                items
            }
        }
    }

    pub async fn load_suggestions(&mut self, collection_id: &str) -> Vec<Suggestion> {
        match self.gateway.fetch_suggestions(collection_id).await {
            Ok(suggestions) => {
                if let Err(e) = self.cache.save_suggestions(collection_id, &suggestions) {
                    warn!(error = %e, collection_id, "Failed to cache suggestions");
                }
                self.render_list(View::Suggestions, &suggestions);
                suggestions
            }
            Err(e) => {
                self.notify_read_failure(&e);
                let suggestions = self
                    .cache
                    .load_suggestions(collection_id)
                    .ok()
                    .flatten()
                    .map(|c| c.data)
                    .unwrap_or_default();
                self.render_list(View::Suggestions, &suggestions);
                suggestions
            }
        }
    }

    pub async fn load_meal_plans(&mut self) -> Vec<MealPlan> {
        match self.gateway.fetch_meal_plans().await {
            Ok(plans) => {
                if let Err(e) = self.cache.save_meal_plans(&plans) {
                    warn!(error = %e, "Failed to cache meal plans");
                }
                self.render_list(View::MealPlans, &plans);
                plans
            }
            Err(e) => {
                self.notify_read_failure(&e);
                let plans = self
                    .cache
                    .load_meal_plans()
                    .ok()
                    .flatten()
                    .map(|c| c.data)
                    .unwrap_or_default();
                self.render_list(View::MealPlans, &plans);
                plans
            }
        }
    }

    pub async fn load_predictive_suggestions(&mut self) -> Vec<PredictiveSuggestion> {
        match self.gateway.fetch_predictive_suggestions().await {
            Ok(suggestions) => {
                if let Err(e) = self.cache.save_predictive(&suggestions) {
                    warn!(error = %e, "Failed to cache predictive suggestions");
                }
                self.render_list(View::PredictiveSuggestions, &suggestions);
                suggestions
            }
            Err(e) => {
                self.notify_read_failure(&e);
                let suggestions = self
                    .cache
                    .load_predictive()
                    .ok()
                    .flatten()
                    .map(|c| c.data)
                    .unwrap_or_default();
                self.render_list(View::PredictiveSuggestions, &suggestions);
                suggestions
            }
        }
    }

    /// Detail view of a single collection. Rendered only; the list
    /// snapshots stay the authority for the overview views.
    pub async fn show_collection_details(
        &mut self,
        collection_id: &str,
    ) -> Result<Collection, SyncError> {
        match self.gateway.fetch_collection(collection_id).await {
            Ok(collection) => {
                self.shell.render(
                    View::CollectionDetails,
                    serde_json::to_value(&collection).unwrap_or_default(),
                );
                Ok(collection)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Observed prices for an item name. Not a mirror key; rendered only.
    pub async fn show_price_history(&mut self, item_name: &str) -> Result<PriceHistory, SyncError> {
        match self.gateway.fetch_price_history(item_name).await {
            Ok(history) => {
                self.shell.render(
                    View::PriceHistory,
                    serde_json::to_value(&history).unwrap_or_default(),
                );
                Ok(history)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Export a collection as an opaque document blob.
    pub async fn export_collection(&mut self, collection_id: &str) -> Result<Vec<u8>, SyncError> {
        match self.gateway.export_collection(collection_id).await {
            Ok(bytes) => {
                self.shell.notify("Document exported", Severity::Success);
                Ok(bytes)
            }
            Err(e) => {
                let e = SyncError::from(e);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Warm every mirror key so the app can run from cache, fetching
    /// per-collection data with bounded concurrency.
    pub async fn prime_offline(&mut self) {
        let mut list_ids: Vec<String> = self
            .load_collections()
            .await
            .iter()
            .map(|c| c.id.clone())
            .collect();
        list_ids.extend(
            self.load_manage_collections()
                .await
                .iter()
                .map(|c| c.id.clone()),
        );
        list_ids.sort();
        list_ids.dedup();

        let order_ids: Vec<String> = self
            .load_orders()
            .await
            .iter()
            .map(|c| c.id.clone())
            .collect();

        self.load_meal_plans().await;
        self.load_predictive_suggestions().await;

        let gateway = self.gateway.clone();
        let fetched: Vec<_> = stream::iter(list_ids)
            .map(|id| {
                let gateway = gateway.clone();
                async move {
                    let items = gateway.fetch_items(CollectionKind::List, &id).await;
                    let suggestions = gateway.fetch_suggestions(&id).await;
                    (id, items, suggestions)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

        for (id, items, suggestions) in fetched {
            if let Ok(items) = items {
                if let Err(e) = self.cache.save_items(&id, &items) {
                    warn!(error = %e, collection_id = %id, "Failed to cache items for offline");
                }
            }
            if let Ok(suggestions) = suggestions {
                if let Err(e) = self.cache.save_suggestions(&id, &suggestions) {
                    warn!(error = %e, collection_id = %id, "Failed to cache suggestions for offline");
                }
            }
        }

        let fetched: Vec<_> = stream::iter(order_ids)
            .map(|id| {
                let gateway = gateway.clone();
                async move {
                    let items = gateway.fetch_items(CollectionKind::Order, &id).await;
                    (id, items)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

        for (id, items) in fetched {
            if let Ok(items) = items {
                if let Err(e) = self.cache.save_items(&id, &items) {
                    warn!(error = %e, collection_id = %id, "Failed to cache order items for offline");
                }
            }
        }

        self.shell.notify("Offline data ready", Severity::Info);
    }

    // =========================================================================
    // Refresh helpers
    // =========================================================================

    async fn refresh_collection_views(&mut self) {
        let (active, saved) = tokio::join!(
            self.gateway.fetch_collections(CollectionStatus::Active),
            self.gateway.fetch_collections(CollectionStatus::Saved),
        );

        match active {
            Ok(collections) => {
                self.store_collections(&CacheKey::Collections, &collections);
                self.render_list(View::Collections, &collections);
            }
            Err(e) => {
                self.fallback_collections(&CacheKey::Collections, View::Collections, &e);
            }
        }
        match saved {
            Ok(collections) => {
                self.store_collections(&CacheKey::ManageCollections, &collections);
                self.render_list(View::ManageCollections, &collections);
            }
            Err(e) => {
                self.fallback_collections(&CacheKey::ManageCollections, View::ManageCollections, &e);
            }
        }
    }

    async fn refresh_orders(&mut self) {
        self.load_orders().await;
    }

    async fn refresh_items(&mut self, kind: CollectionKind, collection_id: &str) {
        match self.gateway.fetch_items(kind, collection_id).await {
            Ok(items) => {
                if let Err(e) = self.cache.save_items(collection_id, &items) {
                    warn!(error = %e, collection_id, "Failed to cache items");
                }
                self.render_list(View::Items, &items);
            }
            Err(e) => {
                warn!(error = %e, collection_id, "Item refresh failed after mutation");
                self.notify_read_failure(&e);
            }
        }
    }

    async fn refresh_suggestions(&mut self, collection_id: &str) {
        match self.gateway.fetch_suggestions(collection_id).await {
            Ok(suggestions) => {
                if let Err(e) = self.cache.save_suggestions(collection_id, &suggestions) {
                    warn!(error = %e, collection_id, "Failed to cache suggestions");
                }
                self.render_list(View::Suggestions, &suggestions);
            }
            Err(e) => {
                warn!(error = %e, collection_id, "Suggestion refresh failed after mutation");
                self.notify_read_failure(&e);
            }
        }
    }

    async fn refresh_meal_plans(&mut self) {
        self.load_meal_plans().await;
    }

    fn store_collections(&self, key: &CacheKey, collections: &[Collection]) {
        if let Err(e) = self.cache.save_collections(key, collections) {
            warn!(error = %e, key = %key, "Failed to cache collections");
        }
    }

    /// Read fallback: notify, then serve and render the last snapshot
    /// instead of an empty view.
    fn fallback_collections(
        &self,
        key: &CacheKey,
        view: View,
        error: &crate::api::ApiError,
    ) -> Vec<Collection> {
        self.notify_read_failure(error);
        let collections = self
            .cache
            .load_collections(key)
            .ok()
            .flatten()
            .map(|c| c.data)
            .unwrap_or_default();
        self.render_list(view, &collections);
        collections
    }

    fn render_list<T: serde::Serialize>(&self, view: View, data: &[T]) {
        self.shell
            .render(view, serde_json::to_value(data).unwrap_or_default());
    }

    fn notify_read_failure(&self, error: &crate::api::ApiError) {
        if error.is_authority() {
            self.shell.notify(MSG_AUTHORITY_DENIED, Severity::Danger);
        } else {
            self.shell.notify(MSG_STALE_DATA, Severity::Warning);
        }
    }

    fn notify_failure(&self, error: &SyncError) {
        match error {
            SyncError::ValidationFailed(msg) => {
                self.shell.notify(msg, Severity::Warning);
            }
            e if e.is_authority() => {
                self.shell.notify(MSG_AUTHORITY_DENIED, Severity::Danger);
            }
            _ => {
                self.shell.notify(MSG_GENERIC_FAILURE, Severity::Danger);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
