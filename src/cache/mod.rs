//! Local mirror of the last-known-good server state.
//!
//! The `MirrorCache` stores one JSON snapshot file per logical key so data
//! survives a full page reload or process restart. Snapshots are
//! overwritten on every successful fetch, read untouched on fetch failure,
//! and dropped only by explicit invalidation - there is no TTL and no
//! eviction (data volume is small and per-user).
//!
//! Mirrored keys:
//! - `collections` / `manage_collections` (active and saved views)
//! - `orders`
//! - `items:{collection_id}` and `suggestions:{collection_id}`
//! - `meal_plans`
//! - `predictive_suggestions`

pub mod mirror;

pub use mirror::{CacheKey, CachedData, MirrorCache};
