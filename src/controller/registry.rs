use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::model::SortState;
use crate::mvu::runtime::TableHandle;
use crate::mvu::table::TableModel;

pub const VIEW_IDLE_TIMEOUT: chrono::Duration = chrono::Duration::minutes(30);

struct ViewEntry {
    handle: TableHandle,
    last_touched: DateTime<Utc>,
}

/// Server-side table state, one entry per rendered page.
#[derive(Clone)]
pub struct ViewRegistry {
    views: Arc<RwLock<HashMap<String, ViewEntry>>>,
    next_id: Arc<AtomicU64>,
    prefix: String,
    idle_timeout: chrono::Duration,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_idle_timeout(VIEW_IDLE_TIMEOUT)
    }

    #[must_use]
    pub fn with_idle_timeout(idle_timeout: chrono::Duration) -> Self {
        let started = Utc::now().timestamp_micros();
        Self {
            views: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            prefix: format!("{started:x}"),
            idle_timeout,
        }
    }

    /// Registers a fresh table view and returns its id.
    pub async fn create(&self, sort: SortState) -> (String, TableHandle) {
        self.evict_idle().await;
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{n}", self.prefix);
        let handle: TableHandle = Arc::new(Mutex::new(TableModel::new(sort)));
        let entry = ViewEntry {
            handle: handle.clone(),
            last_touched: Utc::now(),
        };
        self.views.write().await.insert(id.clone(), entry);
        (id, handle)
    }

    /// Looks up a view and marks it as recently used.
    pub async fn get(&self, id: &str) -> Option<TableHandle> {
        let mut map = self.views.write().await;
        let entry = map.get_mut(id)?;
        if Utc::now() - entry.last_touched >= self.idle_timeout {
            map.remove(id);
            return None;
        }
        entry.last_touched = Utc::now();
        Some(entry.handle.clone())
    }

    /// Drops views idle longer than the timeout. Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut map = self.views.write().await;
        let before = map.len();
        map.retain(|_, entry| now - entry.last_touched < self.idle_timeout);
        let evicted = before - map.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} idle table views");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
