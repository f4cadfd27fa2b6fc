use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::store::remote::{DocumentStore, StoreError};
use crate::store::schema::{UserDocument, WordSlot};

/// In-memory `DocumentStore`. Defines the reference merge semantics the
/// tests pin down: a targeted write fails with `MissingPath` when the user
/// document is absent, a creating merge establishes the document without
/// touching sibling fields. `fail_connectivity` simulates an unreachable
/// store for the failure-classification tests.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, UserDocument>>,
    pub fail_connectivity: AtomicBool,
    pub create_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user: &str, doc: UserDocument) {
        self.docs.lock().unwrap().insert(user.to_string(), doc);
    }

    pub fn document(&self, user: &str) -> Option<UserDocument> {
        self.docs.lock().unwrap().get(user).cloned()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.fail_connectivity.load(Ordering::SeqCst) {
            Err(StoreError::Connectivity("store unreachable".into()))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load_document(&self, user: &str) -> Result<Option<UserDocument>, StoreError> {
        self.check_reachable()?;
        Ok(self.docs.lock().unwrap().get(user).cloned())
    }

    fn write_word_slot(&self, user: &str, word: &str, slot: WordSlot) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get_mut(user)
            .ok_or_else(|| StoreError::MissingPath(format!("users/{user}")))?;
        doc.vocabulary.insert(word.to_string(), slot);
        Ok(())
    }

    fn create_with_word_slot(
        &self,
        user: &str,
        word: &str,
        slot: WordSlot,
    ) -> Result<(), StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        let mut docs = self.docs.lock().unwrap();
        let doc = docs.entry(user.to_string()).or_default();
        doc.vocabulary.insert(word.to_string(), slot);
        Ok(())
    }

    fn write_theme_setting(&self, user: &str, theme_index: usize) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get_mut(user)
            .ok_or_else(|| StoreError::MissingPath(format!("users/{user}")))?;
        doc.settings.theme_index = Some(theme_index);
        Ok(())
    }

    fn create_with_theme_setting(&self, user: &str, theme_index: usize) -> Result<(), StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        let mut docs = self.docs.lock().unwrap();
        let doc = docs.entry(user.to_string()).or_default();
        doc.settings.theme_index = Some(theme_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::remote::{WriteOutcome, reconcile_theme, reconcile_word};
    use crate::store::schema::Settings;

    #[test]
    fn test_targeted_write_requires_existing_document() {
        let store = MemoryStore::new();
        let err = store
            .write_word_slot("alice", "犬", WordSlot { s: 1, f: 0 })
            .unwrap_err();
        assert!(err.is_missing_path());
    }

    #[test]
    fn test_targeted_write_preserves_sibling_slots() {
        let store = MemoryStore::new();
        let mut doc = UserDocument::default();
        doc.vocabulary.insert("猫".to_string(), WordSlot { s: 4, f: 1 });
        doc.settings.theme_index = Some(3);
        store.seed("alice", doc);

        store
            .write_word_slot("alice", "犬", WordSlot { s: 1, f: 0 })
            .unwrap();

        let doc = store.document("alice").unwrap();
        assert_eq!(doc.vocabulary["猫"], WordSlot { s: 4, f: 1 });
        assert_eq!(doc.vocabulary["犬"], WordSlot { s: 1, f: 0 });
        assert_eq!(doc.settings.theme_index, Some(3));
    }

    #[test]
    fn test_fallback_creates_document_with_slot() {
        let store = MemoryStore::new();
        let outcome = reconcile_word(&store, "alice", "犬", WordSlot { s: 0, f: 1 });
        assert_eq!(outcome, WriteOutcome::FallbackCommitted);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);

        let doc = store.document("alice").unwrap();
        assert_eq!(doc.vocabulary["犬"], WordSlot { s: 0, f: 1 });
    }

    #[test]
    fn test_fallback_preserves_existing_settings() {
        // The creating merge must not erase settings already present.
        let store = MemoryStore::new();
        store.seed(
            "alice",
            UserDocument {
                settings: Settings {
                    theme_index: Some(2),
                },
                ..UserDocument::default()
            },
        );
        store
            .create_with_word_slot("alice", "犬", WordSlot { s: 1, f: 0 })
            .unwrap();
        let doc = store.document("alice").unwrap();
        assert_eq!(doc.settings.theme_index, Some(2));
        assert_eq!(doc.vocabulary["犬"], WordSlot { s: 1, f: 0 });
    }

    #[test]
    fn test_connectivity_failure_never_reaches_fallback() {
        let store = MemoryStore::new();
        store.fail_connectivity.store(true, Ordering::SeqCst);
        let outcome = reconcile_word(&store, "alice", "犬", WordSlot { s: 1, f: 0 });
        assert_eq!(outcome, WriteOutcome::Failed);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_theme_setting_same_merge_contract() {
        let store = MemoryStore::new();
        // New user: fallback creation path.
        assert_eq!(
            reconcile_theme(&store, "alice", 1),
            WriteOutcome::FallbackCommitted
        );
        // Existing user: targeted path.
        assert_eq!(reconcile_theme(&store, "alice", 2), WriteOutcome::Committed);
        assert_eq!(
            store.document("alice").unwrap().settings.theme_index,
            Some(2)
        );
    }
}
