//! [`AppLocator`] implementation backed by Spotlight (`mdfind`).

use super::process::{self, DEFAULT_TIMEOUT};
use crate::traits::AppLocator;
use log::debug;

/// Looks up application bundles by `kMDItemCFBundleIdentifier`.
#[derive(Debug, Default)]
pub struct SpotlightLocator;

impl SpotlightLocator {
    pub fn new() -> Self {
        Self
    }
}

/// Spotlight query matching a bundle identifier.
pub fn bundle_query(bundle_id: &str) -> String {
    format!("kMDItemCFBundleIdentifier=\"{}\"", bundle_id.replace('"', ""))
}

/// First non-empty line of `mdfind` output, if any.
pub fn first_path(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

impl AppLocator for SpotlightLocator {
    fn locate(&self, bundle_id: &str) -> Option<String> {
        match process::run_checked("mdfind", &[&bundle_query(bundle_id)], DEFAULT_TIMEOUT) {
            Ok(output) => first_path(&output),
            Err(e) => {
                debug!("mdfind failed for {}: {}", bundle_id, e);
                None
            }
        }
    }
}
