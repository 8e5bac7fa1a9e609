//! Insert-vs-update classification of core product ids.
//!
//! The classification is advisory: it reflects what this process has seen, not what
//! the store holds. After a restart every id is first-seen again. Stores upsert by id
//! regardless, so a stale `Insert` never duplicates or rejects a record.

use std::collections::BTreeSet;
use std::sync::Mutex;

use catalog_core::ProductId;
use catalog_products::WriteMode;

/// Classifies a product id as first-seen (`Insert`) or previously seen (`Update`).
pub trait IdentityTracker: Send + Sync {
    fn classify(&self, id: ProductId) -> WriteMode;
}

/// Process-lifetime set of seen ids.
///
/// The set is the only state shared between in-flight saves; the guard is never held
/// across an await.
#[derive(Debug, Default)]
pub struct InMemoryIdentityTracker {
    seen: Mutex<BTreeSet<ProductId>>,
}

impl InMemoryIdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityTracker for InMemoryIdentityTracker {
    fn classify(&self, id: ProductId) -> WriteMode {
        // A poisoned set is still a valid set of ids.
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        if seen.insert(id) {
            WriteMode::Insert
        } else {
            WriteMode::Update
        }
    }
}
