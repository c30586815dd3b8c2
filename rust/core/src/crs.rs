// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CRS identity and `srsName` resolution
//!
//! The decoder never needs a full CRS definition: it only needs a stable
//! identity to key the axis-order decision and to tag decoded geometries.
//! [`CrsHandle`] is that identity, normalized to `AUTHORITY:CODE`.

use crate::error::CrsError;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Opaque CRS identity; two handles are equal iff they name the same CRS
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrsHandle(Arc<str>);

impl CrsHandle {
    /// Create a handle from an authority and a code (authority is upper-cased)
    pub fn new(authority: &str, code: &str) -> Self {
        Self(Arc::from(format!(
            "{}:{}",
            authority.to_ascii_uppercase(),
            code
        )))
    }

    /// WGS84 geographic, the conventional default when `srsName` is absent
    pub fn wgs84() -> Self {
        Self::new("EPSG", "4326")
    }

    /// Spherical Web Mercator
    pub fn web_mercator() -> Self {
        Self::new("EPSG", "3857")
    }

    /// Normalized `AUTHORITY:CODE` identifier
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn authority(&self) -> &str {
        self.0.split_once(':').map(|(a, _)| a).unwrap_or(&self.0)
    }

    #[inline]
    pub fn code(&self) -> &str {
        self.0.split_once(':').map(|(_, c)| c).unwrap_or("")
    }
}

impl fmt::Display for CrsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CRS registry seam: maps an `srsName` string to a [`CrsHandle`]
pub trait SrsResolver {
    fn resolve(&self, srs_name: &str) -> Result<CrsHandle, CrsError>;
}

impl<F> SrsResolver for F
where
    F: Fn(&str) -> Result<CrsHandle, CrsError>,
{
    fn resolve(&self, srs_name: &str) -> Result<CrsHandle, CrsError> {
        self(srs_name)
    }
}

/// Rewrite deprecated and URI-fragment `srsName` forms before resolution
///
/// - `EPSG:900913` and `urn:ogc:def:crs:EPSG::900913` become `EPSG:3857`
/// - `http://...#CODE` becomes `EPSG:CODE`
///
/// Anything else is returned unchanged.
pub fn normalize_srs_name(srs_name: &str) -> Cow<'_, str> {
    let trimmed = srs_name.trim();
    if trimmed.eq_ignore_ascii_case("EPSG:900913")
        || trimmed.eq_ignore_ascii_case("urn:ogc:def:crs:EPSG::900913")
    {
        return Cow::Owned("EPSG:3857".to_string());
    }
    if trimmed.starts_with("http://") {
        if let Some((_, code)) = trimmed.rsplit_once('#') {
            return Cow::Owned(format!("EPSG:{}", code));
        }
    }
    Cow::Borrowed(srs_name)
}

/// Resolver for the standard authority/code spellings
///
/// Recognizes `AUTH:CODE`, `urn:ogc:def:crs:AUTH:[version]:CODE`,
/// `urn:x-ogc:def:crs:AUTH:[version]:CODE`,
/// `http://www.opengis.net/def/crs/AUTH/version/CODE`,
/// `http://www.opengis.net/gml/srs/epsg.xml#CODE` and `CRS:84`.
/// EPSG codes must be numeric.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityCodeResolver;

const URN_PREFIXES: [&str; 2] = ["urn:ogc:def:crs:", "urn:x-ogc:def:crs:"];
const HTTP_PREFIXES: [&str; 2] = [
    "http://www.opengis.net/def/crs/",
    "https://www.opengis.net/def/crs/",
];

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&value[prefix.len()..]),
        _ => None,
    }
}

impl AuthorityCodeResolver {
    fn split(srs_name: &str) -> Option<(&str, &str)> {
        for prefix in URN_PREFIXES {
            if let Some(rest) = strip_prefix_ignore_case(srs_name, prefix) {
                // AUTH:[version]:CODE - the version part may be empty
                let authority = rest.split(':').next()?;
                let code = rest.rsplit(':').next()?;
                return (rest.contains(':')).then_some((authority, code));
            }
        }
        for prefix in HTTP_PREFIXES {
            if let Some(rest) = strip_prefix_ignore_case(srs_name, prefix) {
                let mut parts = rest.split('/');
                let authority = parts.next()?;
                let code = parts.last()?;
                return Some((authority, code));
            }
        }
        if let Some((_, code)) = srs_name.rsplit_once('#') {
            return Some(("EPSG", code));
        }
        srs_name.split_once(':')
    }
}

impl SrsResolver for AuthorityCodeResolver {
    fn resolve(&self, srs_name: &str) -> Result<CrsHandle, CrsError> {
        let trimmed = srs_name.trim();
        if trimmed.eq_ignore_ascii_case("CRS:84") {
            return Ok(CrsHandle::new("OGC", "CRS84"));
        }

        let (authority, code) =
            Self::split(trimmed).ok_or_else(|| CrsError::Unrecognized(srs_name.to_string()))?;

        let valid_authority =
            !authority.is_empty() && authority.chars().all(|c| c.is_ascii_alphanumeric());
        let valid_code = !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid_authority || !valid_code {
            return Err(CrsError::Unrecognized(srs_name.to_string()));
        }
        if authority.eq_ignore_ascii_case("EPSG") && !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(CrsError::UnknownCode {
                authority: "EPSG".to_string(),
                code: code.to_string(),
            });
        }
        Ok(CrsHandle::new(authority, code))
    }
}
