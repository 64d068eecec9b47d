//! Locally persisted pin sets.
//!
//! Pins are operator-local UI state and deliberately NOT rows in the backing
//! database. The store is an injected abstraction with an explicit namespace
//! per dashboard context, so contexts cannot collide on a shared key. The
//! file-backed implementation writes one JSON array of ids per namespace,
//! rewritten on every change.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use uuid::Uuid;

/// Namespace for the main admin dashboard.
pub const NS_ADMIN: &str = "admin";
/// Namespace for the quotes/artwork management dashboard.
pub const NS_ADMIN_MANAGEMENT: &str = "admin-management";

/// An operator can pin at most this many items per namespace.
pub const MAX_PINNED: usize = 5;

/// Errors from pin-store operations.
#[derive(Debug, Error)]
pub enum PinStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt pin store: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("pin store poisoned")]
    Poisoned,
}

/// Outcome of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Pinned,
    Unpinned,
    /// The namespace already holds [`MAX_PINNED`] ids; nothing changed.
    LimitReached,
}

/// A namespaced pin-set store.
pub trait PinStore: Send + Sync {
    /// Load the pin set for a namespace. A missing namespace is an empty set.
    ///
    /// # Errors
    ///
    /// Returns `PinStoreError` if the backing store cannot be read.
    fn load(&self, namespace: &str) -> Result<BTreeSet<Uuid>, PinStoreError>;

    /// Replace the pin set for a namespace.
    ///
    /// # Errors
    ///
    /// Returns `PinStoreError` if the backing store cannot be written.
    fn save(&self, namespace: &str, pins: &BTreeSet<Uuid>) -> Result<(), PinStoreError>;
}

/// Toggle one id in a namespace, honoring the pin limit.
///
/// The store only ever holds the final membership; there is no history.
///
/// # Errors
///
/// Returns `PinStoreError` if the store cannot be read or written.
pub fn toggle(
    store: &dyn PinStore,
    namespace: &str,
    id: Uuid,
) -> Result<ToggleOutcome, PinStoreError> {
    let mut pins = store.load(namespace)?;
    let outcome = if pins.remove(&id) {
        ToggleOutcome::Unpinned
    } else if pins.len() >= MAX_PINNED {
        return Ok(ToggleOutcome::LimitReached);
    } else {
        pins.insert(id);
        ToggleOutcome::Pinned
    };
    store.save(namespace, &pins)?;
    Ok(outcome)
}

/// Namespaces map to file names, so keep them to a safe alphabet.
fn validate_namespace(namespace: &str) -> Result<(), PinStoreError> {
    let ok = !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(PinStoreError::InvalidNamespace(namespace.to_string()))
    }
}

/// File-backed store: `<dir>/<namespace>.json` holding a JSON array of ids.
pub struct JsonFilePinStore {
    dir: PathBuf,
}

impl JsonFilePinStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `PinStoreError::Io` if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self, PinStoreError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, namespace: &str) -> Result<PathBuf, PinStoreError> {
        validate_namespace(namespace)?;
        Ok(self.dir.join(format!("{namespace}.json")))
    }
}

impl PinStore for JsonFilePinStore {
    fn load(&self, namespace: &str) -> Result<BTreeSet<Uuid>, PinStoreError> {
        let path = self.path_for(namespace)?;
        match std::fs::read(&path) {
            Ok(bytes) => {
                let ids: Vec<Uuid> = serde_json::from_slice(&bytes)?;
                Ok(ids.into_iter().collect())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeSet::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, namespace: &str, pins: &BTreeSet<Uuid>) -> Result<(), PinStoreError> {
        let path = self.path_for(namespace)?;
        let ids: Vec<&Uuid> = pins.iter().collect();
        let json = serde_json::to_vec(&ids)?;
        // Write-then-rename so a crash mid-write cannot corrupt the set
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemoryPinStore {
    inner: Mutex<HashMap<String, BTreeSet<Uuid>>>,
}

impl InMemoryPinStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PinStore for InMemoryPinStore {
    fn load(&self, namespace: &str) -> Result<BTreeSet<Uuid>, PinStoreError> {
        validate_namespace(namespace)?;
        let inner = self.inner.lock().map_err(|_| PinStoreError::Poisoned)?;
        Ok(inner.get(namespace).cloned().unwrap_or_default())
    }

    fn save(&self, namespace: &str, pins: &BTreeSet<Uuid>) -> Result<(), PinStoreError> {
        validate_namespace(namespace)?;
        let mut inner = self.inner.lock().map_err(|_| PinStoreError::Poisoned)?;
        inner.insert(namespace.to_string(), pins.clone());
        Ok(())
    }
}
