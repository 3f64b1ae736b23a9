//! Inventory store for Larder.
//!
//! Persists the food collection and the current-user marker as JSON
//! documents through a [`StorageBackend`]. The collection lives under a
//! single key, and every mutation is a full read-modify-write of the whole
//! snapshot. That mirrors the medium the tracker was built for and is the
//! documented concurrency model: with two writers on the same backend the
//! last snapshot wins, so usage is assumed single-writer.
//!
//! Reads never fail. An unreadable or uninitialized medium degrades to an
//! empty collection (logged); mutations surface the failure instead so
//! callers never clobber state they could not read.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use larder_models::{FoodCreate, FoodItem, FoodUpdate, User};

mod backend;
mod error;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{Error, Result};

/// Key holding the food collection.
const FOODS_KEY: &str = "larder_foods";

/// Key holding the current-user marker.
const USER_KEY: &str = "larder_user";

/// Store for food records and the session user.
///
/// The backend is an explicit constructor argument, never ambient state:
/// two stores with separate backends are fully isolated sessions.
#[derive(Clone)]
pub struct PantryStore {
    backend: Arc<dyn StorageBackend>,
}

impl PantryStore {
    /// Create a store over an explicit backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Create a file-backed store rooted at a data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(data_dir)))
    }

    /// Create a store with isolated in-memory state.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    // ------------------------------------------------------------------
    // Foods
    // ------------------------------------------------------------------

    /// List every stored food record.
    ///
    /// Never fails: an unavailable medium or undecodable document yields an
    /// empty list. Storage order is whatever the medium preserved; callers
    /// that need an ordering sort the snapshot themselves.
    pub async fn list_foods(&self) -> Vec<FoodItem> {
        match self.read_foods().await {
            Ok(foods) => foods,
            Err(e) => {
                warn!(error = %e, "Degrading food listing to empty");
                Vec::new()
            }
        }
    }

    /// Add a food record from a draft, returning the stored record.
    pub async fn add_food(&self, owner_id: &str, draft: FoodCreate) -> Result<FoodItem> {
        let mut foods = self.read_foods().await?;
        let item = FoodItem::new(owner_id, draft);
        foods.push(item.clone());
        self.save_foods(&foods).await?;
        Ok(item)
    }

    /// Merge a patch into the record with the given id.
    ///
    /// Returns `Ok(false)` when no record matches; a missing id is a silent
    /// no-op, not an error, and the boolean exists so callers and tests can
    /// still observe it.
    pub async fn update_food(&self, id: &str, update: FoodUpdate) -> Result<bool> {
        let mut foods = self.read_foods().await?;
        let mut found = false;
        for food in foods.iter_mut() {
            if food.id == id {
                food.apply_update(update);
                found = true;
                break;
            }
        }
        if !found {
            debug!(food_id = %id, "Update targeted a missing record");
        }
        self.save_foods(&foods).await?;
        Ok(found)
    }

    /// Remove the record with the given id. `Ok(false)` when absent.
    pub async fn remove_food(&self, id: &str) -> Result<bool> {
        let mut foods = self.read_foods().await?;
        let before = foods.len();
        foods.retain(|food| food.id != id);
        let found = foods.len() != before;
        self.save_foods(&foods).await?;
        Ok(found)
    }

    async fn read_foods(&self) -> Result<Vec<FoodItem>> {
        match self.backend.read(FOODS_KEY).await? {
            Some(content) => serde_json::from_str(&content)
                .map_err(|e| Error::InvalidData(format!("Failed to decode food collection: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the whole collection in one replace.
    async fn save_foods(&self, foods: &[FoodItem]) -> Result<()> {
        let content = serde_json::to_string(foods)
            .map_err(|e| Error::InvalidData(format!("Failed to encode food collection: {}", e)))?;
        self.backend.write(FOODS_KEY, &content).await
    }

    // ------------------------------------------------------------------
    // Current user
    // ------------------------------------------------------------------

    /// Store the session user, replacing any previous one.
    pub async fn set_current_user(&self, user: &User) -> Result<()> {
        let content = serde_json::to_string(user)
            .map_err(|e| Error::InvalidData(format!("Failed to encode user: {}", e)))?;
        self.backend.write(USER_KEY, &content).await
    }

    /// The session user, if one is stored. Never fails.
    pub async fn current_user(&self) -> Option<User> {
        let content = match self.backend.read(USER_KEY).await {
            Ok(content) => content?,
            Err(e) => {
                warn!(error = %e, "Degrading current-user read to none");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user is undecodable");
                None
            }
        }
    }

    /// Clear the session user.
    pub async fn clear_current_user(&self) -> Result<()> {
        self.backend.remove(USER_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(name: &str) -> FoodCreate {
        FoodCreate {
            name: name.to_string(),
            category: "vegetables".to_string(),
            quantity: "3".to_string(),
            unit: "pcs".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(),
            location: Some("fridge".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_add_then_list_round_trip() {
        let store = PantryStore::in_memory();

        let added = store.add_food("user-1", draft("Carrots")).await.unwrap();

        let foods = store.list_foods().await;
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0], added);
        assert_eq!(foods[0].name, "Carrots");
        assert_eq!(foods[0].owner_id, "user-1");
        assert!(foods[0].updated_at >= foods[0].created_at);
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_adds() {
        let store = PantryStore::in_memory();
        for _ in 0..5 {
            store.add_food("user-1", draft("Eggs")).await.unwrap();
        }

        let foods = store.list_foods().await;
        let mut ids: Vec<_> = foods.iter().map(|f| f.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let store = PantryStore::in_memory();
        store.add_food("user-1", draft("Bread")).await.unwrap();
        store.add_food("user-1", draft("Butter")).await.unwrap();

        let first = store.list_foods().await;
        let second = store.list_foods().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_on_empty_store() {
        let store = PantryStore::in_memory();
        assert!(store.list_foods().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_only_named_fields() {
        let store = PantryStore::in_memory();
        let added = store.add_food("user-1", draft("Yoghurt")).await.unwrap();

        let found = store
            .update_food(
                &added.id,
                FoodUpdate {
                    name: Some("Greek yoghurt".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(found);

        let foods = store.list_foods().await;
        assert_eq!(foods.len(), 1);
        let updated = &foods[0];
        assert_eq!(updated.name, "Greek yoghurt");
        assert_eq!(updated.id, added.id);
        assert_eq!(updated.category, added.category);
        assert_eq!(updated.quantity, added.quantity);
        assert_eq!(updated.expiry_date, added.expiry_date);
        assert_eq!(updated.created_at, added.created_at);
        assert!(updated.updated_at >= added.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_a_silent_no_op() {
        let store = PantryStore::in_memory();
        store.add_food("user-1", draft("Apples")).await.unwrap();
        let before = store.list_foods().await;

        let found = store
            .update_food(
                "no-such-id",
                FoodUpdate {
                    name: Some("Pears".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!found);
        assert_eq!(store.list_foods().await, before);
    }

    #[tokio::test]
    async fn test_remove_food() {
        let store = PantryStore::in_memory();
        let keep = store.add_food("user-1", draft("Rice")).await.unwrap();
        let gone = store.add_food("user-1", draft("Beans")).await.unwrap();

        assert!(store.remove_food(&gone.id).await.unwrap());

        let foods = store.list_foods().await;
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].id, keep.id);

        // Removing again is a no-op.
        assert!(!store.remove_food(&gone.id).await.unwrap());
        assert_eq!(store.list_foods().await.len(), 1);
    }

    #[tokio::test]
    async fn test_current_user_lifecycle() {
        let store = PantryStore::in_memory();
        assert!(store.current_user().await.is_none());

        let user = User::new("ada@example.com", Some("Ada".to_string()));
        store.set_current_user(&user).await.unwrap();
        assert_eq!(store.current_user().await, Some(user.clone()));

        // A second sign-in replaces the first; at most one user is held.
        let other = User::new("grace@example.com", None);
        store.set_current_user(&other).await.unwrap();
        assert_eq!(store.current_user().await, Some(other));

        store.clear_current_user().await.unwrap();
        assert!(store.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_isolated_sessions_do_not_interfere() {
        let a = PantryStore::in_memory();
        let b = PantryStore::in_memory();

        a.add_food("user-a", draft("Cheese")).await.unwrap();

        assert_eq!(a.list_foods().await.len(), 1);
        assert!(b.list_foods().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = PantryStore::open(dir.path().to_path_buf());
        let added = store.add_food("user-1", draft("Tomatoes")).await.unwrap();
        let user = User::new("ada@example.com", None);
        store.set_current_user(&user).await.unwrap();
        drop(store);

        let reopened = PantryStore::open(dir.path().to_path_buf());
        let foods = reopened.list_foods().await;
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0], added);
        assert_eq!(reopened.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_unavailable_medium_degrades_reads_and_fails_writes() {
        // A file that is not a directory makes the backend unusable.
        let file = tempfile::NamedTempFile::new().unwrap();
        let inside = file.path().join("data");
        let store = PantryStore::open(inside);

        assert!(store.list_foods().await.is_empty());
        assert!(store.current_user().await.is_none());

        let err = store.add_food("user-1", draft("Milk")).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_corrupt_collection_degrades_list_and_blocks_mutation() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write(FOODS_KEY, "not json").await.unwrap();
        let store = PantryStore::new(backend);

        assert!(store.list_foods().await.is_empty());

        let err = store.add_food("user-1", draft("Milk")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
