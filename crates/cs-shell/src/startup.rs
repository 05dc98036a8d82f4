//! Startup effects
//!
//! Reference data the governance pages rely on is preloaded once when the
//! application mounts, whatever route the session starts on.

use futures_util::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type PreloadFuture = BoxFuture<'static, Result<(), String>>;

pub trait ReferenceData: Send + Sync {
    fn load_ermits_frameworks(&self) -> PreloadFuture;
    fn load_nist_csf_framework(&self) -> PreloadFuture;
}

/// Framework data compiled into the bundle; loading only counts calls
#[derive(Debug, Default)]
pub struct BundledReferenceData {
    ermits_loads: AtomicUsize,
    nist_loads: AtomicUsize,
}

impl BundledReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ermits_loads(&self) -> usize {
        self.ermits_loads.load(Ordering::SeqCst)
    }

    pub fn nist_loads(&self) -> usize {
        self.nist_loads.load(Ordering::SeqCst)
    }
}

impl ReferenceData for BundledReferenceData {
    fn load_ermits_frameworks(&self) -> PreloadFuture {
        self.ermits_loads.fetch_add(1, Ordering::SeqCst);
        Box::pin(futures_util::future::ready(Ok(())))
    }

    fn load_nist_csf_framework(&self) -> PreloadFuture {
        self.nist_loads.fetch_add(1, Ordering::SeqCst);
        Box::pin(futures_util::future::ready(Ok(())))
    }
}

/// Issue both preloads concurrently. Failures are logged, never fatal.
pub async fn preload(data: &dyn ReferenceData) {
    let (ermits, nist) = futures_util::future::join(
        data.load_ermits_frameworks(),
        data.load_nist_csf_framework(),
    )
    .await;

    for (name, result) in [("ermits-frameworks", ermits), ("nist-csf-framework", nist)] {
        match result {
            Ok(()) => tracing::debug!(dataset = name, "Reference data loaded"),
            Err(e) => tracing::warn!(dataset = name, error = %e, "Reference data failed to load"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl ReferenceData for Failing {
        fn load_ermits_frameworks(&self) -> PreloadFuture {
            Box::pin(async { Err("offline".to_string()) })
        }

        fn load_nist_csf_framework(&self) -> PreloadFuture {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn test_preload_issues_both() {
        let data = BundledReferenceData::new();
        preload(&data).await;
        assert_eq!(data.ermits_loads(), 1);
        assert_eq!(data.nist_loads(), 1);
    }

    #[tokio::test]
    async fn test_preload_failure_is_not_fatal() {
        preload(&Failing).await;
    }
}
