//! Window snapshots: fetch through the window manager, consult the cache.
//!
//! [`SnapshotFetcher`] is the single place where window listings enter the
//! crate.  It owns the [`SnapshotCache`] (if any) and an [`AppPathCache`]
//! that lives for one invocation.

use crate::cache::SnapshotCache;
use crate::record::{Scope, WindowRecord};
use crate::traits::{AppLocator, WindowManager};
use log::{debug, warn};
use std::collections::HashMap;

/// Bundle identifier → resolved application path, including negative
/// results.  Each identifier is looked up at most once.
#[derive(Debug, Default)]
pub struct AppPathCache {
    paths: HashMap<String, Option<String>>,
}

impl AppPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `bundle_id`, consulting `locator` only on first sight.
    ///
    /// An empty identifier resolves to `None` without a lookup.
    pub fn resolve<L: AppLocator>(&mut self, locator: &L, bundle_id: &str) -> Option<String> {
        if bundle_id.is_empty() {
            return None;
        }
        self.paths
            .entry(bundle_id.to_string())
            .or_insert_with(|| {
                let path = locator.locate(bundle_id);
                debug!("resolved {} -> {:?}", bundle_id, path);
                path
            })
            .clone()
    }
}

/// Produces window snapshots for a scope, serving fresh cache entries and
/// falling back to the window manager.
pub struct SnapshotFetcher<W: WindowManager, L: AppLocator> {
    wm: W,
    locator: L,
    cache: Option<SnapshotCache>,
    app_paths: AppPathCache,
}

impl<W: WindowManager, L: AppLocator> SnapshotFetcher<W, L> {
    /// Create a fetcher.  Without a `cache` every call is a miss.
    pub fn new(wm: W, locator: L, cache: Option<SnapshotCache>) -> Self {
        Self {
            wm,
            locator,
            cache,
            app_paths: AppPathCache::new(),
        }
    }

    /// The underlying window manager, for calls that bypass snapshots.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Return the windows in `scope`.
    ///
    /// A fresh cache entry is returned as-is.  Otherwise the window manager
    /// is queried, each window's `app_path` is resolved, and the result
    /// replaces the cache entry.  Errors from the window manager are
    /// returned without retry; cache write failures are only logged.
    pub fn get_snapshot(&mut self, scope: Scope) -> Result<Vec<WindowRecord>, W::Error> {
        if let Some(windows) = self.cache.as_ref().and_then(|c| c.load(scope)) {
            return Ok(windows);
        }

        let mut windows = self.wm.list_windows(scope)?;
        for window in &mut windows {
            if let Some(bundle_id) = window.app_bundle_id.as_deref() {
                window.app_path = self.app_paths.resolve(&self.locator, bundle_id);
            }
        }

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(scope, &windows) {
                warn!("failed to cache snapshot for scope {}: {}", scope, e);
            }
        }
        Ok(windows)
    }

    /// Resolve an application path through the shared [`AppPathCache`].
    pub fn resolve_app_path(&mut self, bundle_id: &str) -> Option<String> {
        self.app_paths.resolve(&self.locator, bundle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SnapshotCache;
    use crate::traits::mock::{MockLocator, MockWm};
    use std::time::Duration;

    fn windows() -> Vec<WindowRecord> {
        vec![
            WindowRecord::new("Safari", "Docs", 1).with_bundle_id("com.apple.Safari"),
            WindowRecord::new("Safari", "News", 2).with_bundle_id("com.apple.Safari"),
            WindowRecord::new("Ghostty", "", 3).with_bundle_id("com.mitchellh.ghostty"),
            WindowRecord::new("Mystery", "", 4),
        ]
    }

    fn locator() -> MockLocator {
        MockLocator::with(&[("com.apple.Safari", "/Applications/Safari.app")])
    }

    #[test]
    fn app_paths_are_resolved_once_per_bundle() {
        let mut fetcher = SnapshotFetcher::new(MockWm::with_windows(windows()), locator(), None);
        let out = fetcher.get_snapshot(Scope::All).unwrap();
        assert_eq!(out[0].app_path.as_deref(), Some("/Applications/Safari.app"));
        assert_eq!(out[1].app_path.as_deref(), Some("/Applications/Safari.app"));
        assert_eq!(out[2].app_path, None);
        assert_eq!(out[3].app_path, None);
        assert_eq!(
            *fetcher.locator.lookups.borrow(),
            vec!["com.apple.Safari".to_string(), "com.mitchellh.ghostty".to_string()]
        );
    }

    #[test]
    fn negative_resolution_is_not_repeated() {
        let mut fetcher = SnapshotFetcher::new(MockWm::default(), locator(), None);
        assert_eq!(fetcher.resolve_app_path("org.unknown"), None);
        assert_eq!(fetcher.resolve_app_path("org.unknown"), None);
        assert_eq!(fetcher.locator.lookups.borrow().len(), 1);
    }

    #[test]
    fn empty_bundle_id_is_never_looked_up() {
        let mut cache = AppPathCache::new();
        let loc = locator();
        assert_eq!(cache.resolve(&loc, ""), None);
        assert_eq!(cache.resolve(&loc, ""), None);
        assert!(loc.lookups.borrow().is_empty());
    }

    #[test]
    fn without_cache_every_call_fetches() {
        let mut fetcher = SnapshotFetcher::new(MockWm::with_windows(windows()), locator(), None);
        fetcher.get_snapshot(Scope::Focused).unwrap();
        fetcher.get_snapshot(Scope::Focused).unwrap();
        assert_eq!(fetcher.wm().list_calls.borrow().len(), 2);
    }

    #[test]
    fn fresh_cache_hit_skips_window_manager() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        let mut first = SnapshotFetcher::new(MockWm::with_windows(windows()), locator(), Some(cache.clone()));
        let fetched = first.get_snapshot(Scope::All).unwrap();

        // A second invocation with a window manager that would fail.
        let mut second = SnapshotFetcher::new(MockWm::failing("unreachable"), locator(), Some(cache));
        let cached = second.get_snapshot(Scope::All).unwrap();

        assert_eq!(cached, fetched);
        assert!(second.wm().list_calls.borrow().is_empty());
    }

    #[test]
    fn stale_cache_forces_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::with_ttl(dir.path(), Duration::ZERO);
        let mut fetcher = SnapshotFetcher::new(MockWm::with_windows(windows()), locator(), Some(cache));
        fetcher.get_snapshot(Scope::All).unwrap();
        fetcher.get_snapshot(Scope::All).unwrap();
        assert_eq!(fetcher.wm().list_calls.borrow().len(), 2);
    }

    #[test]
    fn fetch_error_propagates_and_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let mut fetcher = SnapshotFetcher::new(MockWm::failing("aerospace is not running"), locator(), Some(cache.clone()));
        let err = fetcher.get_snapshot(Scope::Focused).unwrap_err();
        assert_eq!(err.to_string(), "aerospace is not running");
        assert_eq!(cache.load(Scope::Focused), None);
    }

    #[test]
    fn unwritable_cache_does_not_fail_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        // The cache root is a regular file, so create_dir_all fails.
        let cache = SnapshotCache::new(&blocker);
        let mut fetcher = SnapshotFetcher::new(MockWm::with_windows(windows()), locator(), Some(cache));
        assert_eq!(fetcher.get_snapshot(Scope::All).unwrap().len(), 4);
    }
}
