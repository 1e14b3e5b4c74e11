//! Pantrycache - offline-first state layer for household budgeting data.
//!
//! This crate keeps a local mirror of a server-side list/item hierarchy
//! (grocery lists, food orders, meal plans) consistent across rapid user
//! mutations, falls back to cached snapshots when the network or the
//! user's authority fails, and turns destructive deletes into a
//! cancellable server-confirmed countdown.
//!
//! The embedding UI supplies rendering, notifications, confirmation
//! dialogs, and the session token through the traits in [`frontend`];
//! everything else - transport, mirror cache, mutation coordination, and
//! the grace-period deletion machine - lives here.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod deletion;
pub mod error;
pub mod frontend;
pub mod models;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ApiError, Gateway, Transport};
pub use cache::{CacheKey, CachedData, MirrorCache};
pub use config::Config;
pub use coordinator::{Coordinator, MutationIntent, MutationOutcome};
pub use deletion::{DeletionEvent, PendingDeleteStatus, PendingDeletion};
pub use error::SyncError;
pub use frontend::{
    ConfirmAction, FinancialSummaryHook, Notifier, Severity, Shell, TokenSource, View, ViewSink,
};
pub use state::SessionState;
