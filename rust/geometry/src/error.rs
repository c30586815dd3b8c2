// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use gml_stream_core::CrsError;
use thiserror::Error;

/// Result type for geometry decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a geometry
///
/// Every error is fatal for the `decode()` call that raised it; nothing is
/// replaced by a default value.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognized geometry element: {0}")]
    UnrecognizedElement(String),

    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Core error: {0}")]
    Core(#[from] gml_stream_core::Error),
}

impl From<CrsError> for Error {
    fn from(err: CrsError) -> Self {
        Error::Core(err.into())
    }
}

impl Error {
    /// Invalid geometry error with a formatted message
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidGeometry(message.into())
    }

    /// Whether the input is malformed XML or does not follow the GML grammar
    pub fn is_structure(&self) -> bool {
        matches!(
            self,
            Error::Core(gml_stream_core::Error::Structure { .. })
                | Error::Core(gml_stream_core::Error::Xml(_))
        )
    }
}
