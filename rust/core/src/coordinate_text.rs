// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate Text Parsing
//!
//! Turns the text content of GML coordinate elements into [`Coordinate`]s.
//! Handles the whitespace-separated `pos`/`posList` encoding, the legacy
//! `coordinates` encoding with configurable separators, and the single
//! ordinates of a `coord` element. Axis inversion is applied here so every
//! encoding swaps the same way.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use smallvec::SmallVec;

/// Ordinates of one tuple before they become a [`Coordinate`]
type Ordinates = SmallVec<[f64; 4]>;

/// Separators of the legacy `coordinates` encoding (`decimal`, `cs`, `ts` attributes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateSeparators {
    pub decimal: String,
    pub ordinate: String,
    pub tuple: String,
}

impl Default for CoordinateSeparators {
    fn default() -> Self {
        Self {
            decimal: ".".to_string(),
            ordinate: ",".to_string(),
            tuple: " ".to_string(),
        }
    }
}

impl CoordinateSeparators {
    /// Build from the optional `decimal`, `cs` and `ts` attribute values
    pub fn from_attributes(
        decimal: Option<&str>,
        ordinate: Option<&str>,
        tuple: Option<&str>,
    ) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            decimal: non_empty("decimal", decimal, defaults.decimal)?,
            ordinate: non_empty("cs", ordinate, defaults.ordinate)?,
            tuple: non_empty("ts", tuple, defaults.tuple)?,
        })
    }
}

fn non_empty(name: &str, value: Option<&str>, default: String) -> Result<String> {
    match value {
        None => Ok(default),
        Some("") => Err(Error::InvalidAttribute {
            name: name.to_string(),
            value: String::new(),
        }),
        Some(v) => Ok(v.to_string()),
    }
}

/// Parse one ordinate token, rejecting anything that is not a finite number
#[inline]
pub fn parse_ordinate(token: &str) -> Result<f64> {
    match fast_float::parse::<f64, _>(token) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::invalid_coordinate(token)),
    }
}

/// Parse an `srsDimension` attribute value
pub fn parse_srs_dimension(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(Error::InvalidAttribute {
            name: "srsDimension".to_string(),
            value: value.to_string(),
        }),
    }
}

#[inline]
fn to_coordinate(ordinates: &[f64], dimension: usize, invert_axis: bool) -> Coordinate {
    let coord = Coordinate {
        x: ordinates[0],
        y: ordinates[1],
        z: if dimension > 2 {
            ordinates.get(2).copied()
        } else {
            None
        },
    };
    if invert_axis {
        coord.swapped()
    } else {
        coord
    }
}

/// Parse `pos` / `posList` text
///
/// Ordinates are separated by runs of whitespace (newlines included). The
/// token count must be an exact multiple of `dimension`; ordinates past the
/// third are dropped.
pub fn parse_pos_list(text: &str, dimension: usize, invert_axis: bool) -> Result<Vec<Coordinate>> {
    let count = text.split_whitespace().count();
    if dimension < 2 || count % dimension != 0 {
        return Err(Error::DimensionMismatch { count, dimension });
    }

    let mut coords = Vec::with_capacity(count / dimension);
    let mut tuple = Ordinates::new();
    for token in text.split_whitespace() {
        tuple.push(parse_ordinate(token)?);
        if tuple.len() == dimension {
            coords.push(to_coordinate(&tuple, dimension, invert_axis));
            tuple.clear();
        }
    }
    Ok(coords)
}

/// Split on runs of `separator`; a whitespace separator matches any whitespace run
fn split_runs<'a>(text: &'a str, separator: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if separator.trim().is_empty() {
        Box::new(text.split_whitespace())
    } else {
        Box::new(
            text.split(separator)
                .map(str::trim)
                .filter(|part| !part.is_empty()),
        )
    }
}

/// Parse legacy `coordinates` text
///
/// A tuple may carry fewer ordinates than `dimension` (z is then omitted),
/// but never fewer than two.
pub fn parse_coordinates(
    text: &str,
    separators: &CoordinateSeparators,
    dimension: usize,
    invert_axis: bool,
) -> Result<Vec<Coordinate>> {
    let normalized = text.replace(['\n', '\r'], " ");
    let rewrite_decimal = separators.decimal != ".";

    let mut coords = Vec::new();
    for tuple in split_runs(normalized.trim(), &separators.tuple) {
        let mut ordinates = Ordinates::new();
        for token in split_runs(tuple, &separators.ordinate) {
            let value = if rewrite_decimal {
                parse_ordinate(&token.replacen(separators.decimal.as_str(), ".", 1))?
            } else {
                parse_ordinate(token)?
            };
            ordinates.push(value);
        }
        if ordinates.len() < 2 {
            return Err(Error::invalid_coordinate(tuple));
        }
        coords.push(to_coordinate(&ordinates, dimension, invert_axis));
    }
    Ok(coords)
}

/// Build a coordinate from the text of `X`, `Y` and optional `Z` elements
pub fn parse_coord(x: &str, y: &str, z: Option<&str>, invert_axis: bool) -> Result<Coordinate> {
    let coord = Coordinate {
        x: parse_ordinate(x.trim())?,
        y: parse_ordinate(y.trim())?,
        z: z.map(|z| parse_ordinate(z.trim())).transpose()?,
    };
    Ok(if invert_axis { coord.swapped() } else { coord })
}
