//! User-authored prompts
//!
//! Custom prompts live outside the catalog document. Each one gets a random
//! id (prefix `c`, so it can never look like a content id) and a creation
//! timestamp. The whole list is stored as one JSON array, newest last.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::identity::to_base36;
use crate::storage::{load_or_default, save_json, KeyValueStore, Observers, Persistence};

/// Storage key holding the custom prompt list.
pub const CUSTOM_KEY: &str = "pv_custom";

/// Prefix for custom prompt ids.
pub const CUSTOM_ID_PREFIX: char = 'c';

/// A user-authored prompt as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPrompt {
    pub id: String,
    pub tab: String,
    pub section: String,
    pub category: String,
    pub text: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Fields supplied when adding a prompt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPrompt {
    pub tab: String,
    pub section: String,
    pub category: String,
    pub text: String,
}

impl NewPrompt {
    pub fn new(
        tab: impl Into<String>,
        section: impl Into<String>,
        category: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            tab: tab.into(),
            section: section.into(),
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Source of fresh custom prompt ids
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random ids: `c` followed by a UUID v4 in base 36
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        format!("{}{}", CUSTOM_ID_PREFIX, to_base36(Uuid::new_v4().as_u128()))
    }
}

/// Predictable ids `c1`, `c2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{}{}", CUSTOM_ID_PREFIX, self.next)
    }
}

pub struct CustomPromptStore {
    storage: Arc<dyn KeyValueStore>,
    prompts: Vec<CustomPrompt>,
    ids: Box<dyn IdGenerator>,
    observers: Observers<[CustomPrompt]>,
}

impl CustomPromptStore {
    /// Load custom prompts from `storage`, drawing new ids at random.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_ids(storage, RandomIds)
    }

    /// Load with a specific id generator.
    ///
    /// Unreadable or corrupt state yields an empty list.
    pub fn load_with_ids(storage: Arc<dyn KeyValueStore>, ids: impl IdGenerator + 'static) -> Self {
        let prompts: Vec<CustomPrompt> = load_or_default(storage.as_ref(), CUSTOM_KEY);
        debug!(count = prompts.len(), "Custom prompts loaded");
        Self {
            storage,
            prompts,
            ids: Box::new(ids),
            observers: Observers::default(),
        }
    }

    /// Append a new prompt and persist the list.
    ///
    /// Returns the stored record together with the persistence status.
    pub fn add(&mut self, fields: NewPrompt) -> (CustomPrompt, Persistence) {
        let id = self.fresh_id();
        let prompt = CustomPrompt {
            id,
            tab: fields.tab,
            section: fields.section,
            category: fields.category,
            text: fields.text,
            created_at: Utc::now().timestamp_millis(),
        };
        debug!(id = %prompt.id, "Custom prompt added");

        self.prompts.push(prompt.clone());
        self.observers.notify(&self.prompts);
        (prompt, self.save())
    }

    /// Delete the prompt with `id`, if present, and persist the list.
    ///
    /// Unknown ids leave the list untouched but still rewrite storage.
    pub fn remove(&mut self, id: &str) -> Persistence {
        let before = self.prompts.len();
        self.prompts.retain(|prompt| prompt.id != id);

        if self.prompts.len() != before {
            debug!(id = id, "Custom prompt removed");
            self.observers.notify(&self.prompts);
        }
        self.save()
    }

    /// Write the current list to storage.
    pub fn save(&self) -> Persistence {
        save_json(self.storage.as_ref(), CUSTOM_KEY, &self.prompts)
    }

    /// All custom prompts, oldest first.
    pub fn prompts(&self) -> &[CustomPrompt] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&CustomPrompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Run `callback` with the new list after every add or effective remove.
    pub fn subscribe(&mut self, callback: impl FnMut(&[CustomPrompt]) + 'static) {
        self.observers.push(callback);
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::ReadOnlyStore;
    use crate::storage::{FileStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn memory() -> (MemoryStore, Arc<dyn KeyValueStore>) {
        let store = MemoryStore::new();
        let shared: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        (store, shared)
    }

    fn hi() -> NewPrompt {
        NewPrompt::new("X", "Y", "Z", "hi")
    }

    #[test]
    fn test_add_then_remove() {
        let (_, storage) = memory();
        let mut store = CustomPromptStore::load(storage);

        let (prompt, status) = store.add(hi());
        assert!(status.is_saved());
        assert!(store.contains(&prompt.id));
        assert_eq!(prompt.tab, "X");
        assert_eq!(prompt.text, "hi");
        assert!(prompt.created_at > 0);

        assert!(store.remove(&prompt.id).is_saved());
        assert!(!store.contains(&prompt.id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (_, storage) = memory();
        let mut store = CustomPromptStore::load_with_ids(storage, SequentialIds::default());
        store.add(hi()).1.log_failure("custom");

        assert!(store.remove("c999").is_saved());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_random_ids_use_custom_prefix() {
        let mut ids = RandomIds;
        let first = ids.next_id();
        let second = ids.next_id();

        assert!(first.starts_with('c'));
        assert!(first.len() > 10);
        assert_ne!(first, second);
    }

    #[test]
    fn test_sequential_ids_and_append_order() {
        let (_, storage) = memory();
        let mut store = CustomPromptStore::load_with_ids(storage, SequentialIds::default());

        let (a, _) = store.add(NewPrompt::new("t", "s", "c", "first"));
        let (b, _) = store.add(NewPrompt::new("t", "s", "c", "second"));

        assert_eq!(a.id, "c1");
        assert_eq!(b.id, "c2");
        let texts: Vec<&str> = store.prompts().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_ids_never_reuse_loaded_entries() {
        let (raw, storage) = memory();
        {
            let mut store = CustomPromptStore::load_with_ids(storage.clone(), SequentialIds::default());
            store.add(hi()).1.log_failure("custom");
        }
        assert!(raw.read(CUSTOM_KEY).unwrap().is_some());

        // a restarted generator would hand out c1 again
        let mut store = CustomPromptStore::load_with_ids(storage, SequentialIds::default());
        let (prompt, _) = store.add(hi());
        assert_eq!(prompt.id, "c2");
    }

    #[test]
    fn test_persisted_record_shape() {
        let (raw, storage) = memory();
        let mut store = CustomPromptStore::load_with_ids(storage, SequentialIds::default());
        let (prompt, _) = store.add(hi());

        let json: serde_json::Value =
            serde_json::from_str(&raw.read(CUSTOM_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(json[0]["id"], "c1");
        assert_eq!(json[0]["category"], "Z");
        assert_eq!(json[0]["createdAt"], prompt.created_at);
    }

    #[test]
    fn test_reload_reproduces_list() {
        let temp_dir = TempDir::new().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(temp_dir.path()));

        let mut store = CustomPromptStore::load(storage.clone());
        store.add(NewPrompt::new("a", "b", "c", "one")).1.log_failure("custom");
        let (two, _) = store.add(NewPrompt::new("a", "b", "c", "two"));
        store.add(NewPrompt::new("a", "b", "c", "three")).1.log_failure("custom");
        store.remove(&two.id).log_failure("custom");

        let reloaded = CustomPromptStore::load(storage);
        assert_eq!(reloaded.prompts(), store.prompts());
    }

    #[test]
    fn test_corrupt_state_loads_empty() {
        let (raw, storage) = memory();
        raw.seed(CUSTOM_KEY, r#"{"id": "not a list"}"#);

        assert!(CustomPromptStore::load(storage).is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore(MemoryStore::new()));
        let mut store = CustomPromptStore::load(storage);

        let (prompt, status) = store.add(hi());
        assert!(!status.is_saved());
        assert!(store.contains(&prompt.id));
    }

    #[test]
    fn test_subscribers_see_effective_changes() {
        let (_, storage) = memory();
        let mut store = CustomPromptStore::load_with_ids(storage, SequentialIds::default());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |prompts| sink.borrow_mut().push(prompts.len()));

        store.add(hi()).1.log_failure("custom");
        store.add(hi()).1.log_failure("custom");
        store.remove("c1").log_failure("custom");
        store.remove("c1").log_failure("custom");

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }
}
