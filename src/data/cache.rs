//! Dataset Cache Module
//! Loads the derived dataset at most once until explicitly invalidated.

use crate::data::loader::{load_dataset, LoaderError};
use crate::data::source::DataSource;
use crate::data::ProteinDataset;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Write-once, read-many holder of the derived dataset.
///
/// The first `get` fetches and derives under the cache lock, so concurrent
/// first callers trigger a single fetch and share its result.
pub struct DatasetCache {
    source: Box<dyn DataSource>,
    priority_list: Vec<String>,
    slot: Mutex<Option<Arc<ProteinDataset>>>,
}

impl DatasetCache {
    pub fn new(source: Box<dyn DataSource>, priority_list: Vec<String>) -> Self {
        Self {
            source,
            priority_list,
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ProteinDataset>>> {
        // A panic while loading leaves the slot empty, so the data is still valid.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached dataset, loading it on first access.
    pub fn get(&self) -> Result<Arc<ProteinDataset>, LoaderError> {
        let mut slot = self.lock();
        if let Some(dataset) = slot.as_ref() {
            debug!("dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        info!(source = %self.source.describe(), "dataset cache miss, loading");
        let dataset = Arc::new(load_dataset(self.source.as_ref(), &self.priority_list)?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Forget the cached dataset; the next `get` fetches again.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            info!("dataset cache invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TABLE: &str = "Gene\tUniprot\tProtein class\tPathology prognostics - Glioma\n\
GFAP\tP14136\tPredicted intracellular proteins\tprognostic unfavorable\n";

    struct CountingSource {
        fetches: Arc<AtomicUsize>,
        bytes: Vec<u8>,
    }

    impl DataSource for CountingSource {
        fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.bytes.clone())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    fn counting_cache(bytes: &[u8]) -> (DatasetCache, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            fetches: Arc::clone(&fetches),
            bytes: bytes.to_vec(),
        };
        let cache = DatasetCache::new(
            Box::new(source),
            crate::data::classes::default_class_priority(),
        );
        (cache, fetches)
    }

    #[test]
    fn test_second_get_reuses_dataset() {
        let (cache, fetches) = counting_cache(TABLE.as_bytes());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let (cache, fetches) = counting_cache(TABLE.as_bytes());
        let first = cache.get().unwrap();
        cache.invalidate();
        assert!(!cache.is_loaded());

        let second = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let (cache, fetches) = counting_cache(b"Gene\tProtein class\nGFAP\tEnzymes\n");
        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_access_fetches_once() {
        let (cache, fetches) = counting_cache(TABLE.as_bytes());
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get().map(|d| d.len()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 1);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
