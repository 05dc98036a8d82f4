//! Lazy loader
//!
//! Each page has at most one fetch in flight. The fetch is driven on the
//! runtime independently of its requesters, so a navigation that loses
//! interest still leaves the module cached for next time.

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cs_routing::PageId;

use crate::module::{ModuleSource, PageModule};
use crate::Result;

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<PageModule>>>>;

enum Slot {
    Loading(SharedLoad),
    Ready(Arc<PageModule>),
}

pub struct LazyLoader {
    source: Arc<dyn ModuleSource>,
    slots: Arc<RwLock<HashMap<PageId, Slot>>>,
    fetches: Arc<AtomicUsize>,
}

impl LazyLoader {
    pub fn new(source: Arc<dyn ModuleSource>) -> Self {
        Self {
            source,
            slots: Arc::new(RwLock::new(HashMap::new())),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seed a module that ships with the initial bundle
    pub fn register(&self, module: PageModule) {
        tracing::debug!(page = %module.page, "Registered eager page");
        self.slots
            .write()
            .insert(module.page, Slot::Ready(Arc::new(module)));
    }

    pub fn cached(&self, page: PageId) -> Option<Arc<PageModule>> {
        match self.slots.read().get(&page) {
            Some(Slot::Ready(module)) => Some(Arc::clone(module)),
            _ => None,
        }
    }

    pub fn is_pending(&self, page: PageId) -> bool {
        matches!(self.slots.read().get(&page), Some(Slot::Loading(_)))
    }

    /// Number of fetches issued to the source so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Resolve a page, joining an in-flight fetch if there is one.
    pub fn load(&self, page: PageId) -> BoxFuture<'static, Result<Arc<PageModule>>> {
        let mut slots = self.slots.write();

        let shared = match slots.get(&page) {
            Some(Slot::Ready(module)) => {
                let module = Arc::clone(module);
                return Box::pin(futures_util::future::ready(Ok(module)));
            }
            Some(Slot::Loading(shared)) => shared.clone(),
            None => {
                let shared = self.start_fetch(page);
                slots.insert(page, Slot::Loading(shared.clone()));
                shared
            }
        };

        Box::pin(shared)
    }

    fn start_fetch(&self, page: PageId) -> SharedLoad {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tracing::info!(page = %page, "Fetching page module");

        let fetch = self.source.fetch(page);
        let slots = Arc::clone(&self.slots);

        let shared = async move {
            let result = fetch.await.map(Arc::new);

            let mut slots = slots.write();
            match &result {
                Ok(module) => {
                    slots.insert(page, Slot::Ready(Arc::clone(module)));
                    tracing::debug!(page = %page, "Page module cached");
                }
                Err(e) => {
                    // Not cached, the next navigation fetches again
                    slots.remove(&page);
                    tracing::warn!(page = %page, error = %e, "Page module failed to load");
                }
            }

            result
        }
        .boxed()
        .shared();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(shared.clone().map(|_| ()));
        }

        shared
    }
}

impl Clone for LazyLoader {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            slots: Arc::clone(&self.slots),
            fetches: Arc::clone(&self.fetches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::module::{BundledSource, ModuleFuture};
    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    /// Fetches wait until the test releases them
    #[derive(Default)]
    struct GatedSource {
        gates: Mutex<HashMap<PageId, oneshot::Receiver<std::result::Result<(), String>>>>,
    }

    impl GatedSource {
        fn gate(&self, page: PageId) -> oneshot::Sender<std::result::Result<(), String>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(page, rx);
            tx
        }
    }

    impl ModuleSource for GatedSource {
        fn fetch(&self, page: PageId) -> ModuleFuture {
            let gate = self.gates.lock().remove(&page);
            Box::pin(async move {
                if let Some(gate) = gate {
                    match gate.await {
                        Ok(Ok(())) => {}
                        Ok(Err(reason)) => return Err(LoadError::Fetch { page, reason }),
                        Err(_) => return Err(LoadError::Abandoned(page)),
                    }
                }
                Ok(PageModule::new(page))
            })
        }
    }

    #[tokio::test]
    async fn test_load_is_memoized() {
        let loader = LazyLoader::new(Arc::new(BundledSource));

        let first = loader.load(PageId::Pricing).await.unwrap();
        let second = loader.load(PageId::Pricing).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.fetch_count(), 1);
        assert!(loader.cached(PageId::Pricing).is_some());
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let source = Arc::new(GatedSource::default());
        let release = source.gate(PageId::Dashboard);
        let loader = LazyLoader::new(source);

        let a = loader.load(PageId::Dashboard);
        let b = loader.load(PageId::Dashboard);
        assert!(loader.is_pending(PageId::Dashboard));

        release.send(Ok(())).unwrap();
        let (a, b) = tokio::join!(a, b);

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(loader.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(GatedSource::default());
        let release = source.gate(PageId::AuditPackager);
        let loader = LazyLoader::new(source);

        let pending = loader.load(PageId::AuditPackager);
        release.send(Err("chunk 404".to_string())).unwrap();

        let err = pending.await.unwrap_err();
        assert_eq!(
            err,
            LoadError::Fetch { page: PageId::AuditPackager, reason: "chunk 404".to_string() }
        );
        assert!(loader.cached(PageId::AuditPackager).is_none());
        assert!(!loader.is_pending(PageId::AuditPackager));

        // No gate this time, so the retry succeeds
        loader.load(PageId::AuditPackager).await.unwrap();
        assert_eq!(loader.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_completes_without_requesters() {
        let source = Arc::new(GatedSource::default());
        let release = source.gate(PageId::Blog);
        let loader = LazyLoader::new(source);

        drop(loader.load(PageId::Blog));
        release.send(Ok(())).unwrap();

        for _ in 0..10 {
            if loader.cached(PageId::Blog).is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(loader.cached(PageId::Blog).is_some());
    }

    #[test]
    fn test_registered_page_is_ready() {
        let loader = LazyLoader::new(Arc::new(BundledSource));
        loader.register(PageModule::new(PageId::Home));

        assert!(loader.cached(PageId::Home).is_some());
        assert_eq!(loader.fetch_count(), 0);
    }
}
