//! Live certificate views, keyed by id.
//!
//! A view stands for one certificate on someone's screen. It is created by
//! the first render, repainted on every change, and discarded on request or
//! when it has been idle longer than the configured TTL.

use crate::fonts::FontCache;
use crate::render::CertificateView;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

struct Entry {
    view: Arc<CertificateView>,
    touched: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ViewStore {
    fonts: Arc<FontCache>,
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl ViewStore {
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self {
            fonts,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers an empty view and returns its id.
    pub async fn open(&self) -> (Uuid, Arc<CertificateView>) {
        let id = Uuid::new_v4();
        let view = Arc::new(CertificateView::new(self.fonts.clone()));
        self.entries.write().await.insert(
            id,
            Entry {
                view: view.clone(),
                touched: Utc::now(),
            },
        );
        (id, view)
    }

    /// Looks up a view and marks it as recently used.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<CertificateView>> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(id)?;
        entry.touched = Utc::now();
        Some(entry.view.clone())
    }

    pub async fn discard(&self, id: &Uuid) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drops views idle for longer than `ttl`. Returns how many went.
    pub async fn sweep(&self, ttl: Duration) -> usize {
        let Some(cutoff) = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.touched > cutoff);
        before - entries.len()
    }

    /// Periodically sweeps idle views until the runtime shuts down.
    pub fn spawn_sweeper(&self, ttl: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        let period = (ttl / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let dropped = store.sweep(ttl).await;
                if dropped > 0 {
                    info!("Discarded {} idle certificate views", dropped);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ViewStore {
        ViewStore::new(Arc::new(FontCache::empty()))
    }

    #[tokio::test]
    async fn open_get_discard() {
        let store = store();
        let (id, _view) = store.open().await;
        assert!(store.get(&id).await.is_some());
        assert_eq!(store.len().await, 1);
        assert!(store.discard(&id).await);
        assert!(!store.discard(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn sweep_only_drops_idle_views() {
        let store = store();
        let (id, _) = store.open().await;
        assert_eq!(store.sweep(Duration::from_secs(60)).await, 0);
        assert!(store.get(&id).await.is_some());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.sweep(Duration::from_millis(5)).await, 1);
        assert_eq!(store.len().await, 0);
    }
}
