// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// A position with two or three ordinates
///
/// `z` is present when the declared ordinate dimension is greater than 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    #[inline]
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Swap x and y, leaving z alone
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            z: self.z,
        }
    }

    /// Same position by value; z is only compared when both sides carry one
    #[inline]
    pub fn coincides(&self, other: &Coordinate) -> bool {
        self.x == other.x
            && self.y == other.y
            && match (self.z, other.z) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }

    #[inline]
    pub fn distance_2d(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "({} {} {})", self.x, self.y, z),
            None => write!(f, "({} {})", self.x, self.y),
        }
    }
}
