//! Page modules and where they come from

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::time::Duration;

use cs_routing::PageId;

use crate::Result;

/// A resolved, renderable page unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageModule {
    pub page: PageId,
    pub title: String,
    pub loaded_at: DateTime<Utc>,
}

impl PageModule {
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            title: page.title().to_string(),
            loaded_at: Utc::now(),
        }
    }
}

pub type ModuleFuture = BoxFuture<'static, Result<PageModule>>;

/// Fetches page units on demand
pub trait ModuleSource: Send + Sync {
    fn fetch(&self, page: PageId) -> ModuleFuture;
}

/// Every page ships in the bundle and resolves immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

impl ModuleSource for BundledSource {
    fn fetch(&self, page: PageId) -> ModuleFuture {
        Box::pin(futures_util::future::ready(Ok(PageModule::new(page))))
    }
}

/// Resolves each page after a fixed delay, like a chunk fetched over the network
#[derive(Debug, Clone, Copy)]
pub struct DelayedSource {
    delay: Duration,
}

impl DelayedSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ModuleSource for DelayedSource {
    fn fetch(&self, page: PageId) -> ModuleFuture {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(PageModule::new(page))
        })
    }
}
