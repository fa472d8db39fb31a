// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared boolean feature flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A process-wide boolean that any thread may flip.
///
/// Clones share one value. Readers see the last write; the pump samples the
/// pinch flag once per gesture, so a flip mid-gesture applies to the next
/// one.
#[derive(Clone, Debug, Default)]
pub struct FeatureFlag(Arc<AtomicBool>);

impl FeatureFlag {
    /// Creates a flag with an initial value.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the value.
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::FeatureFlag;

    #[test]
    fn clones_share_value() {
        let flag = FeatureFlag::default();
        let remote = flag.clone();
        assert!(!flag.get());
        remote.set(true);
        assert!(flag.get());
    }

    #[test]
    fn visible_across_threads() {
        let flag = FeatureFlag::new(false);
        let writer = flag.clone();
        std::thread::spawn(move || writer.set(true))
            .join()
            .unwrap();
        assert!(flag.get());
    }
}
