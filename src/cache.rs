//! Short-lived on-disk snapshot cache.
//!
//! Each scope owns one file, `windows_<scope>.json`, holding the JSON array
//! of the most recently fetched [`WindowRecord`]s.  The file's modification
//! time is the capture time.  An entry whose age reaches the TTL is treated
//! as absent.
//!
//! Writes go to a temporary file in the same directory and are renamed over
//! the entry, so a reader sees either the old or the new snapshot in full.
//! Concurrent invocations are not coordinated: the last rename wins.

use crate::record::{Scope, WindowRecord};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// How long a cached snapshot stays fresh.
pub const SNAPSHOT_TTL: Duration = Duration::from_millis(1500);

/// Errors from writing a cache entry.  Reads never fail; a bad entry is a
/// miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed snapshot store rooted at a directory.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    root: PathBuf,
    ttl: Duration,
}

impl SnapshotCache {
    /// Cache rooted at `root` with the default [`SNAPSHOT_TTL`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_ttl(root, SNAPSHOT_TTL)
    }

    pub fn with_ttl(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    /// Path of the entry for `scope`.
    pub fn entry_path(&self, scope: Scope) -> PathBuf {
        self.root.join(format!("windows_{}.json", scope))
    }

    /// Return the snapshot for `scope` if it is still fresh.
    pub fn load(&self, scope: Scope) -> Option<Vec<WindowRecord>> {
        self.load_at(scope, SystemTime::now())
    }

    /// Like [`load`](Self::load), judging freshness against `now`.
    ///
    /// A modification time in the future counts as age zero.
    pub fn load_at(&self, scope: Scope, now: SystemTime) -> Option<Vec<WindowRecord>> {
        let path = self.entry_path(scope);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            debug!("cache entry {} is stale ({:?})", path.display(), age);
            return None;
        }
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(windows) => {
                debug!("cache hit for scope {}", scope);
                Some(windows)
            }
            Err(e) => {
                debug!("ignoring unreadable cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Replace the entry for `scope` with `windows`.
    pub fn store(&self, scope: Scope, windows: &[WindowRecord]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::Io {
            path: self.root.clone(),
            source,
        })?;
        let json = serde_json::to_string(windows)?;

        let target = self.entry_path(scope);
        let tmp = self
            .root
            .join(format!(".windows_{}.{}.tmp", scope, std::process::id()));
        fs::write(&tmp, json).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::Io {
                path: target,
                source,
            });
        }
        debug!("stored {} window(s) for scope {}", windows.len(), scope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<WindowRecord> {
        let mut safari = WindowRecord::new("Safari", "Docs", 1)
            .on_workspace("1")
            .on_monitor("Main")
            .with_bundle_id("com.apple.Safari");
        safari.app_pid = Some(310);
        safari.app_path = Some("/Applications/Safari.app".into());
        vec![safari, WindowRecord::new("Ghostty", "", 2).on_workspace("3")]
    }

    #[test]
    fn fresh_entry_round_trips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let windows = sample();
        cache.store(Scope::All, &windows).unwrap();
        assert_eq!(cache.load(Scope::All), Some(windows));
    }

    #[test]
    fn entries_are_per_scope() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(Scope::All, &sample()).unwrap();
        assert_eq!(cache.load(Scope::Focused), None);
        assert!(cache.entry_path(Scope::All).ends_with("windows_all.json"));
        assert!(cache.entry_path(Scope::Focused).ends_with("windows_focused.json"));
    }

    #[test]
    fn entry_older_than_ttl_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(Scope::Focused, &sample()).unwrap();
        let later = SystemTime::now() + Duration::from_millis(1600);
        assert_eq!(cache.load_at(Scope::Focused, later), None);
    }

    #[test]
    fn entry_exactly_at_ttl_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::with_ttl(dir.path(), Duration::ZERO);
        cache.store(Scope::Focused, &sample()).unwrap();
        assert_eq!(cache.load(Scope::Focused), None);
    }

    #[test]
    fn future_mtime_counts_as_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(Scope::Focused, &sample()).unwrap();
        let earlier = SystemTime::now() - Duration::from_secs(60);
        assert!(cache.load_at(Scope::Focused, earlier).is_some());
    }

    #[test]
    fn store_overwrites_previous_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(Scope::All, &sample()).unwrap();
        let replacement = vec![WindowRecord::new("Notes", "", 9)];
        cache.store(Scope::All, &replacement).unwrap();
        assert_eq!(cache.load(Scope::All), Some(replacement));
    }

    #[test]
    fn store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(Scope::All, &sample()).unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["windows_all.json".to_string()]);
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        fs::write(cache.entry_path(Scope::All), "{ not json").unwrap();
        assert_eq!(cache.load(Scope::All), None);
    }

    #[test]
    fn store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("nested").join("cache"));
        cache.store(Scope::All, &sample()).unwrap();
        assert!(cache.load(Scope::All).is_some());
    }
}
