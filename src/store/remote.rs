//! Durable-store write reconciliation.
//!
//! Every answer (and the theme setting) is merged into the remote per-user
//! document through the same two-phase strategy: a targeted write that
//! touches one slot, falling back to a structure-creating merge only when
//! the targeted write failed because the parent document does not exist.
//! Failures are logged and swallowed; the optimistic local state stays
//! authoritative for the rest of the session.

use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tracing::{debug, error};

use crate::store::schema::{UserDocument, WordSlot};

/// Classified store failures, so fallback decisions never string-match.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed parent structure does not exist yet. The only class
    /// eligible for the fallback creation path.
    #[error("missing path: {0}")]
    MissingPath(String),

    /// Transport-level failure (DNS, refused connection, timeout).
    #[error("connectivity: {0}")]
    Connectivity(String),

    /// The store rejected the caller's credentials.
    #[error("permission denied: {0}")]
    Denied(String),

    /// The store answered with an unexpected error response.
    #[error("store error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The document could not be encoded or decoded.
    #[error("encoding: {0}")]
    Encoding(String),
}

impl StoreError {
    pub fn is_missing_path(&self) -> bool {
        matches!(self, StoreError::MissingPath(_))
    }
}

/// Narrow contract against the per-user durable document store.
///
/// `write_*` methods are targeted: they address one slot and must never
/// clobber sibling slots or unrelated top-level fields. `create_*` methods
/// are the structure-creating merges used when the parent document is
/// missing; they too merge non-destructively with whatever exists.
pub trait DocumentStore: Send + Sync {
    fn load_document(&self, user: &str) -> Result<Option<UserDocument>, StoreError>;

    fn write_word_slot(&self, user: &str, word: &str, slot: WordSlot) -> Result<(), StoreError>;
    fn create_with_word_slot(&self, user: &str, word: &str, slot: WordSlot)
    -> Result<(), StoreError>;

    fn write_theme_setting(&self, user: &str, theme_index: usize) -> Result<(), StoreError>;
    fn create_with_theme_setting(&self, user: &str, theme_index: usize)
    -> Result<(), StoreError>;
}

/// Terminal state of one durable write. Never user-visible; all three leave
/// the optimistic local value in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Committed,
    FallbackCommitted,
    Failed,
}

/// Attempt a narrow write; on `MissingPath` (and only that class) attempt
/// the broadened creating write exactly once. Connectivity and permission
/// failures are terminal for the attempt; falling back on those would mask
/// real errors as fallback-eligible.
pub fn two_phase_merge<T, F>(targeted: T, fallback: F) -> WriteOutcome
where
    T: FnOnce() -> Result<(), StoreError>,
    F: FnOnce() -> Result<(), StoreError>,
{
    match targeted() {
        Ok(()) => WriteOutcome::Committed,
        Err(err) if err.is_missing_path() => match fallback() {
            Ok(()) => WriteOutcome::FallbackCommitted,
            Err(err) => {
                error!(%err, "fallback creation failed");
                WriteOutcome::Failed
            }
        },
        Err(err) => {
            error!(%err, "targeted write failed");
            WriteOutcome::Failed
        }
    }
}

pub fn reconcile_word(
    store: &dyn DocumentStore,
    user: &str,
    word: &str,
    slot: WordSlot,
) -> WriteOutcome {
    two_phase_merge(
        || store.write_word_slot(user, word, slot),
        || store.create_with_word_slot(user, word, slot),
    )
}

pub fn reconcile_theme(store: &dyn DocumentStore, user: &str, theme_index: usize) -> WriteOutcome {
    two_phase_merge(
        || store.write_theme_setting(user, theme_index),
        || store.create_with_theme_setting(user, theme_index),
    )
}

/// Fire-and-forget reconciliation of one answer. The caller already holds
/// the optimistic result; the outcome here is only logged, never awaited,
/// never retried.
pub fn spawn_reconcile_word(
    store: Arc<dyn DocumentStore>,
    user: String,
    word: String,
    slot: WordSlot,
) {
    thread::spawn(move || {
        let outcome = reconcile_word(store.as_ref(), &user, &word, slot);
        debug!(?outcome, %word, "answer reconciliation finished");
    });
}

pub fn spawn_reconcile_theme(store: Arc<dyn DocumentStore>, user: String, theme_index: usize) {
    thread::spawn(move || {
        let outcome = reconcile_theme(store.as_ref(), &user, theme_index);
        debug!(?outcome, theme_index, "theme reconciliation finished");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targeted_success_skips_fallback() {
        let outcome = two_phase_merge(
            || Ok(()),
            || panic!("fallback must not run after a committed targeted write"),
        );
        assert_eq!(outcome, WriteOutcome::Committed);
    }

    #[test]
    fn test_missing_path_takes_fallback_once() {
        let mut fallback_calls = 0;
        let outcome = two_phase_merge(
            || Err(StoreError::MissingPath("users/alice".into())),
            || {
                fallback_calls += 1;
                Ok(())
            },
        );
        assert_eq!(outcome, WriteOutcome::FallbackCommitted);
        assert_eq!(fallback_calls, 1);
    }

    #[test]
    fn test_connectivity_failure_is_terminal() {
        let outcome = two_phase_merge(
            || Err(StoreError::Connectivity("connection refused".into())),
            || panic!("fallback must not run for connectivity failures"),
        );
        assert_eq!(outcome, WriteOutcome::Failed);
    }

    #[test]
    fn test_denied_failure_is_terminal() {
        let outcome = two_phase_merge(
            || Err(StoreError::Denied("expired token".into())),
            || panic!("fallback must not run for permission failures"),
        );
        assert_eq!(outcome, WriteOutcome::Failed);
    }

    #[test]
    fn test_failed_fallback_gives_up() {
        let outcome = two_phase_merge(
            || Err(StoreError::MissingPath("users/alice".into())),
            || Err(StoreError::Connectivity("connection reset".into())),
        );
        assert_eq!(outcome, WriteOutcome::Failed);
    }
}
