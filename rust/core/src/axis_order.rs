// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-order decisions, memoized per CRS

use crate::crs::CrsHandle;
use rustc_hash::FxHashMap;
use std::fmt;

/// Caller-supplied policy: `true` when ordinates in this CRS must be swapped
pub type AxisOrderPredicate = Box<dyn Fn(&CrsHandle) -> bool + Send>;

/// Memoizes the axis-order predicate
///
/// The predicate runs at most once per distinct CRS for the lifetime of the
/// resolver (or until [`clear_cache`](Self::clear_cache)). Without a
/// predicate no CRS is ever inverted.
#[derive(Default)]
pub struct AxisOrderResolver {
    predicate: Option<AxisOrderPredicate>,
    /// CRS -> needs invert
    cache: FxHashMap<CrsHandle, bool>,
}

impl AxisOrderResolver {
    pub fn new(predicate: Option<AxisOrderPredicate>) -> Self {
        Self {
            predicate,
            cache: FxHashMap::default(),
        }
    }

    pub fn with_predicate<F>(predicate: F) -> Self
    where
        F: Fn(&CrsHandle) -> bool + Send + 'static,
    {
        Self::new(Some(Box::new(predicate)))
    }

    #[inline]
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Whether x and y must be swapped for `crs`
    pub fn needs_invert(&mut self, crs: &CrsHandle) -> bool {
        let Some(predicate) = self.predicate.as_ref() else {
            return false;
        };
        if let Some(&invert) = self.cache.get(crs) {
            return invert;
        }
        let invert = predicate(crs);
        tracing::debug!(crs = %crs, invert, "Resolved axis order");
        self.cache.insert(crs.clone(), invert);
        invert
    }

    /// Drop memoized decisions; only costs a predicate call per CRS afterwards
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for AxisOrderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisOrderResolver")
            .field("has_predicate", &self.predicate.is_some())
            .field("cached", &self.cache.len())
            .finish()
    }
}
