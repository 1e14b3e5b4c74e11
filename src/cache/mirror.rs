use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Collection, LineItem, MealPlan, PredictiveSuggestion, Suggestion};

/// Logical key for one mirrored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Active collections (the main list view).
    Collections,
    /// Saved collections (the manage view).
    ManageCollections,
    /// Food orders.
    Orders,
    /// Line items of one collection.
    Items(String),
    /// Suggestions proposed for one collection.
    Suggestions(String),
    /// Meal plans.
    MealPlans,
    /// Purchase-history-derived suggestions, not tied to a collection.
    PredictiveSuggestions,
}

impl CacheKey {
    fn file_name(&self) -> String {
        match self {
            CacheKey::Collections => "collections.json".to_string(),
            CacheKey::ManageCollections => "manage_collections.json".to_string(),
            CacheKey::Orders => "orders.json".to_string(),
            CacheKey::Items(id) => format!("items_{}.json", sanitize(id)),
            CacheKey::Suggestions(id) => format!("suggestions_{}.json", sanitize(id)),
            CacheKey::MealPlans => "meal_plans.json".to_string(),
            CacheKey::PredictiveSuggestions => "predictive_suggestions.json".to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Collections => write!(f, "collections"),
            CacheKey::ManageCollections => write!(f, "manage_collections"),
            CacheKey::Orders => write!(f, "orders"),
            CacheKey::Items(id) => write!(f, "items:{}", id),
            CacheKey::Suggestions(id) => write!(f, "suggestions:{}", id),
            CacheKey::MealPlans => write!(f, "meal_plans"),
            CacheKey::PredictiveSuggestions => write!(f, "predictive_suggestions"),
        }
    }
}

/// Identifiers are opaque; keep only filesystem-safe characters when
/// deriving snapshot file names.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew (negative ages) as well
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Durable key-value store mirroring the last successfully fetched server
/// state. Written only by the mutation coordinator and the deletion poll
/// handling; read paths never mutate it.
pub struct MirrorCache {
    cache_dir: PathBuf,
}

impl MirrorCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Last snapshot for a key, or None if never populated.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<CachedData<T>>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache snapshot {}", key))?;
        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache snapshot {}", key))?;
        Ok(Some(cached))
    }

    /// Overwrite the snapshot and its fetch timestamp.
    pub fn put<T: Serialize>(&self, key: &CacheKey, value: &T) -> Result<()> {
        let cached = CachedData::new(value);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.path(key), contents)
            .with_context(|| format!("Failed to write cache snapshot {}", key))?;
        Ok(())
    }

    /// Drop a snapshot so the next read path must refetch.
    pub fn invalidate(&self, key: &CacheKey) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to invalidate cache snapshot {}", key))?;
            debug!(key = %key, "Cache snapshot invalidated");
        }
        Ok(())
    }

    /// Explicit cache reset: drop every snapshot. Never triggered by
    /// normal navigation.
    pub fn clear(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            if entry.path().extension().is_some_and(|e| e == "json") {
                std::fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    // ===== Collections =====

    pub fn load_collections(&self, key: &CacheKey) -> Result<Option<CachedData<Vec<Collection>>>> {
        self.get(key)
    }

    pub fn save_collections(&self, key: &CacheKey, collections: &[Collection]) -> Result<()> {
        self.put(key, &collections)
    }

    // ===== Items =====

    pub fn load_items(&self, collection_id: &str) -> Result<Option<CachedData<Vec<LineItem>>>> {
        self.get(&CacheKey::Items(collection_id.to_string()))
    }

    pub fn save_items(&self, collection_id: &str, items: &[LineItem]) -> Result<()> {
        self.put(&CacheKey::Items(collection_id.to_string()), &items)
    }

    // ===== Suggestions =====

    pub fn load_suggestions(
        &self,
        collection_id: &str,
    ) -> Result<Option<CachedData<Vec<Suggestion>>>> {
        self.get(&CacheKey::Suggestions(collection_id.to_string()))
    }

    pub fn save_suggestions(&self, collection_id: &str, suggestions: &[Suggestion]) -> Result<()> {
        self.put(&CacheKey::Suggestions(collection_id.to_string()), &suggestions)
    }

    // ===== Meal plans =====

    pub fn load_meal_plans(&self) -> Result<Option<CachedData<Vec<MealPlan>>>> {
        self.get(&CacheKey::MealPlans)
    }

    pub fn save_meal_plans(&self, plans: &[MealPlan]) -> Result<()> {
        self.put(&CacheKey::MealPlans, &plans)
    }

    // ===== Predictive suggestions =====

    pub fn load_predictive(&self) -> Result<Option<CachedData<Vec<PredictiveSuggestion>>>> {
        self.get(&CacheKey::PredictiveSuggestions)
    }

    pub fn save_predictive(&self, suggestions: &[PredictiveSuggestion]) -> Result<()> {
        self.put(&CacheKey::PredictiveSuggestions, &suggestions)
    }

    /// Remove every trace of a deleted collection: its per-collection
    /// snapshots and its entry in each collection-list snapshot.
    pub fn purge_collection(&self, collection_id: &str) -> Result<()> {
        self.invalidate(&CacheKey::Items(collection_id.to_string()))?;
        self.invalidate(&CacheKey::Suggestions(collection_id.to_string()))?;

        for key in [
            CacheKey::Collections,
            CacheKey::ManageCollections,
            CacheKey::Orders,
        ] {
            if let Some(cached) = self.load_collections(&key)? {
                let before = cached.data.len();
                let remaining: Vec<Collection> = cached
                    .data
                    .into_iter()
                    .filter(|c| c.id != collection_id)
                    .collect();
                if remaining.len() != before {
                    self.save_collections(&key, &remaining)?;
                }
            }
        }

        debug!(collection_id, "Purged collection from cache");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CollectionStatus;
    use chrono::Duration;

    fn collection(id: &str, name: &str) -> Collection {
        Collection {
            id: id.to_string(),
            name: name.to_string(),
            vendor: None,
            budget: Some(100.0),
            total: 0.0,
            status: CollectionStatus::Active,
            collaborators: vec![],
            created_at: None,
        }
    }

    fn item(id: &str, collection_id: &str, name: &str) -> LineItem {
        LineItem {
            id: id.to_string(),
            collection_id: collection_id.to_string(),
            name: name.to_string(),
            quantity: 1,
            price: 2.0,
            status: None,
            store: None,
            category: None,
        }
    }

    #[test]
    fn test_put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();

        let lists = vec![collection("l1", "Weekly")];
        cache.save_collections(&CacheKey::Collections, &lists).unwrap();

        let cached = cache.load_collections(&CacheKey::Collections).unwrap().unwrap();
        assert_eq!(cached.data.len(), 1);
        assert_eq!(cached.data[0].name, "Weekly");
        assert!(cached.age_minutes() <= 1);
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();
        assert!(cache.load_items("nope").unwrap().is_none());
    }

    #[test]
    fn test_snapshots_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();
            cache.save_items("l1", &[item("i1", "l1", "Rice")]).unwrap();
        }

        // A fresh instance over the same directory models a process restart.
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();
        let cached = cache.load_items("l1").unwrap().unwrap();
        assert_eq!(cached.data[0].name, "Rice");
    }

    #[test]
    fn test_invalidate_drops_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();

        cache.save_items("l1", &[item("i1", "l1", "Rice")]).unwrap();
        cache.invalidate(&CacheKey::Items("l1".to_string())).unwrap();
        assert!(cache.load_items("l1").unwrap().is_none());
    }

    #[test]
    fn test_clear_drops_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();

        cache.save_collections(&CacheKey::Collections, &[collection("l1", "A")]).unwrap();
        cache.save_items("l1", &[item("i1", "l1", "Rice")]).unwrap();
        cache.clear().unwrap();

        assert!(cache.load_collections(&CacheKey::Collections).unwrap().is_none());
        assert!(cache.load_items("l1").unwrap().is_none());
    }

    #[test]
    fn test_purge_collection_removes_all_traces() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();

        cache
            .save_collections(
                &CacheKey::Collections,
                &[collection("l1", "Weekly"), collection("l2", "Monthly")],
            )
            .unwrap();
        cache
            .save_collections(&CacheKey::ManageCollections, &[collection("l1", "Weekly")])
            .unwrap();
        cache.save_items("l1", &[item("i1", "l1", "Rice")]).unwrap();
        cache
            .save_suggestions(
                "l1",
                &[Suggestion {
                    id: "s1".to_string(),
                    collection_id: "l1".to_string(),
                    name: "Beans".to_string(),
                    quantity: 1,
                    price: 0.0,
                    status: Default::default(),
                }],
            )
            .unwrap();

        cache.purge_collection("l1").unwrap();

        let active = cache.load_collections(&CacheKey::Collections).unwrap().unwrap();
        assert_eq!(active.data.len(), 1);
        assert_eq!(active.data[0].id, "l2");
        let manage = cache.load_collections(&CacheKey::ManageCollections).unwrap().unwrap();
        assert!(manage.data.is_empty());
        assert!(cache.load_items("l1").unwrap().is_none());
        assert!(cache.load_suggestions("l1").unwrap().is_none());
    }

    #[test]
    fn test_age_display() {
        let mut cached = CachedData::new(vec![1]);
        assert_eq!(cached.age_display(), "just now");

        cached.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");

        cached.cached_at = Utc::now() - Duration::minutes(130);
        assert_eq!(cached.age_display(), "2h ago");
    }

    #[test]
    fn test_item_keys_are_per_collection() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MirrorCache::new(dir.path().to_path_buf()).unwrap();

        cache.save_items("l1", &[item("i1", "l1", "Rice")]).unwrap();
        cache.save_items("l2", &[item("i2", "l2", "Beans")]).unwrap();

        assert_eq!(cache.load_items("l1").unwrap().unwrap().data[0].name, "Rice");
        assert_eq!(cache.load_items("l2").unwrap().unwrap().data[0].name, "Beans");
    }
}
