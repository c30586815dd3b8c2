// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for cursor, coordinate and CRS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while walking the XML stream and reading coordinate text
#[derive(Error, Debug)]
pub enum Error {
    /// Cursor was not on the element the grammar requires at this point
    #[error("Structure error at byte {position}: expected {expected}, found {found}")]
    Structure {
        expected: String,
        found: String,
        position: u64,
    },

    #[error("Number of ordinates ({count}) does not match crs dimension: {dimension}")]
    DimensionMismatch { count: usize, dimension: usize },

    #[error("Invalid coordinate value: {token:?}")]
    InvalidCoordinate { token: String },

    #[error("Invalid value {value:?} for attribute {name}")]
    InvalidAttribute { name: String, value: String },

    #[error("CRS resolution failed: {0}")]
    CrsResolution(#[from] CrsError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl Error {
    pub fn structure(expected: impl Into<String>, found: impl Into<String>, position: u64) -> Self {
        Error::Structure {
            expected: expected.into(),
            found: found.into(),
            position,
        }
    }

    pub fn invalid_coordinate(token: impl Into<String>) -> Self {
        Error::InvalidCoordinate {
            token: token.into(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.into())
    }
}

/// Errors reported by an [`SrsResolver`](crate::SrsResolver)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrsError {
    #[error("Unrecognized CRS identifier: {0:?}")]
    Unrecognized(String),

    #[error("Unknown {authority} code: {code:?}")]
    UnknownCode { authority: String, code: String },
}
