// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder configuration, optionally loaded from environment variables.

use crate::crs::{normalize_srs_name, AuthorityCodeResolver, CrsHandle, SrsResolver};

/// Default ordinate dimension when `srsDimension` is absent
pub const DEFAULT_DIMENSION: usize = 2;

/// Unbounded tolerance: arcs are sampled at the base density only
pub const DEFAULT_CURVE_TOLERANCE: f64 = f64::MAX;

/// Geometry decoder configuration.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// CRS used when a geometry carries no `srsName`.
    pub default_crs: CrsHandle,
    /// Ordinate dimension used when no `srsDimension` is given.
    pub default_dimension: usize,
    /// Allow cursors that process DTDs (entity expansion, external entities).
    pub unsafe_xml_allowed: bool,
    /// Maximum distance between an arc and its linearization.
    pub curve_tolerance: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            default_crs: CrsHandle::wgs84(),
            default_dimension: DEFAULT_DIMENSION,
            unsafe_xml_allowed: false,
            curve_tolerance: DEFAULT_CURVE_TOLERANCE,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `GML_DEFAULT_SRS`, `GML_DEFAULT_DIMENSION`,
    /// `GML_UNSAFE_XML_ALLOWED` and `GML_CURVE_TOLERANCE`. Absent or
    /// unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_crs: std::env::var("GML_DEFAULT_SRS")
                .ok()
                .and_then(|name| match AuthorityCodeResolver.resolve(&normalize_srs_name(&name)) {
                    Ok(crs) => Some(crs),
                    Err(err) => {
                        tracing::warn!(value = %name, error = %err, "Ignoring GML_DEFAULT_SRS");
                        None
                    }
                })
                .unwrap_or(defaults.default_crs),
            default_dimension: std::env::var("GML_DEFAULT_DIMENSION")
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&d| d >= 2)
                .unwrap_or(defaults.default_dimension),
            unsafe_xml_allowed: std::env::var("GML_UNSAFE_XML_ALLOWED")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.unsafe_xml_allowed),
            curve_tolerance: std::env::var("GML_CURVE_TOLERANCE")
                .ok()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| *t > 0.0)
                .unwrap_or(defaults.curve_tolerance),
        }
    }

    pub fn with_default_crs(mut self, crs: CrsHandle) -> Self {
        self.default_crs = crs;
        self
    }

    /// Dimensions below 2 fall back to [`DEFAULT_DIMENSION`]
    pub fn with_default_dimension(mut self, dimension: usize) -> Self {
        self.default_dimension = if dimension >= 2 {
            dimension
        } else {
            tracing::warn!(dimension, "Invalid default dimension, using default");
            DEFAULT_DIMENSION
        };
        self
    }

    pub fn with_unsafe_xml_allowed(mut self, allowed: bool) -> Self {
        self.unsafe_xml_allowed = allowed;
        self
    }

    pub fn with_curve_tolerance(mut self, tolerance: f64) -> Self {
        self.curve_tolerance = tolerance;
        self
    }
}
