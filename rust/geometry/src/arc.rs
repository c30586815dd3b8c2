// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arc linearization
//!
//! Circular arcs are given by three control points (start, a point on the
//! arc, end). A chain of `2n + 1` points is `n` arcs sharing endpoints.

use crate::{Error, Result};
use gml_stream_core::{Coordinate, DEFAULT_CURVE_TOLERANCE};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Segments per quadrant before any refinement
pub const BASE_SEGMENTS_PER_QUADRANT: u32 = 12;
/// Upper bound for refinement
pub const MAX_SEGMENTS_PER_QUADRANT: u32 = 10_000;

/// Turns curved segments into polylines
pub trait CurvedGeometryFactory {
    /// Maximum allowed distance between the true arc and its polyline
    fn tolerance(&self) -> f64;

    /// Linearize an arc chain; the output starts and ends on the chain's
    /// first and last control points
    fn linearize_arc(&self, control_points: &[Coordinate]) -> Result<Vec<Coordinate>>;
}

/// Samples circular arcs at a density refined until the chord deviation
/// (sagitta) is within tolerance
#[derive(Debug, Clone, Copy)]
pub struct CircularArcFactory {
    tolerance: f64,
}

impl Default for CircularArcFactory {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_CURVE_TOLERANCE,
        }
    }
}

/// Circle through three control points, or None when they are collinear
struct Circle {
    cx: f64,
    cy: f64,
    radius: f64,
    counter_clockwise: bool,
}

impl Circle {
    fn through(p1: &Coordinate, p2: &Coordinate, p3: &Coordinate) -> Option<Self> {
        // Full circle: start == end, the middle point is diametrically opposite
        if p1.coincides(p3) {
            if p1.distance_2d(p2) == 0.0 {
                return None;
            }
            return Some(Self {
                cx: (p1.x + p2.x) / 2.0,
                cy: (p1.y + p2.y) / 2.0,
                radius: p1.distance_2d(p2) / 2.0,
                counter_clockwise: true,
            });
        }

        // Work relative to p1 to keep precision on projected coordinates
        let (bx, by) = (p2.x - p1.x, p2.y - p1.y);
        let (cx, cy) = (p3.x - p1.x, p3.y - p1.y);
        let d = 2.0 * (bx * cy - by * cx);

        let scale = bx.hypot(by) * cx.hypot(cy);
        if d.abs() <= 2e-10 * scale {
            // Points are collinear
            return None;
        }

        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;

        Some(Self {
            cx: p1.x + ux,
            cy: p1.y + uy,
            radius: ux.hypot(uy),
            counter_clockwise: d > 0.0,
        })
    }

    #[inline]
    fn angle_of(&self, p: &Coordinate) -> f64 {
        (p.y - self.cy).atan2(p.x - self.cx)
    }

    /// Signed sweep from `from` to `to` in the circle's direction, never zero
    fn sweep(&self, from: f64, to: f64) -> f64 {
        let delta = if self.counter_clockwise {
            to - from
        } else {
            from - to
        };
        let mut delta = delta.rem_euclid(TAU);
        if delta == 0.0 {
            delta = TAU;
        }
        if self.counter_clockwise {
            delta
        } else {
            -delta
        }
    }
}

impl CircularArcFactory {
    /// Create a factory; a non-positive or NaN tolerance falls back to the default
    pub fn new(tolerance: f64) -> Self {
        if tolerance > 0.0 {
            Self { tolerance }
        } else {
            tracing::warn!(tolerance, "Invalid curve tolerance, using default");
            Self::default()
        }
    }

    /// Density for a circle of `radius`, doubling from the base while the
    /// sagitta exceeds the tolerance
    pub fn segments_per_quadrant(&self, radius: f64) -> u32 {
        let mut segments = BASE_SEGMENTS_PER_QUADRANT;
        while segments < MAX_SEGMENTS_PER_QUADRANT {
            let step = FRAC_PI_2 / segments as f64;
            let sagitta = radius * (1.0 - (step / 2.0).cos());
            if sagitta <= self.tolerance {
                break;
            }
            segments = (segments * 2).min(MAX_SEGMENTS_PER_QUADRANT);
        }
        segments
    }

    /// Append the points of one partial sweep, excluding `start`, ending exactly on `end`
    fn push_sweep(
        circle: &Circle,
        start: &Coordinate,
        end: &Coordinate,
        start_angle: f64,
        sweep: f64,
        step: f64,
        out: &mut Vec<Coordinate>,
    ) {
        let segments = ((sweep.abs() / step) - 1e-9).ceil().max(1.0) as usize;
        let z = match (start.z, end.z) {
            (Some(z0), Some(z1)) => Some((z0, z1)),
            _ => None,
        };
        for i in 1..segments {
            let t = i as f64 / segments as f64;
            let angle = start_angle + sweep * t;
            out.push(Coordinate {
                x: circle.cx + circle.radius * angle.cos(),
                y: circle.cy + circle.radius * angle.sin(),
                z: z.map(|(z0, z1)| z0 + (z1 - z0) * t),
            });
        }
        out.push(*end);
    }

    fn linearize_single(
        &self,
        p1: &Coordinate,
        p2: &Coordinate,
        p3: &Coordinate,
        out: &mut Vec<Coordinate>,
    ) {
        let Some(circle) = Circle::through(p1, p2, p3) else {
            out.push(*p2);
            out.push(*p3);
            return;
        };

        let step = FRAC_PI_2 / self.segments_per_quadrant(circle.radius) as f64;
        let angle1 = circle.angle_of(p1);
        let angle2 = circle.angle_of(p2);
        let angle3 = circle.angle_of(p3);

        let (sweep12, sweep23) = if p1.coincides(p3) {
            (PI, PI)
        } else {
            (circle.sweep(angle1, angle2), circle.sweep(angle2, angle3))
        };

        Self::push_sweep(&circle, p1, p2, angle1, sweep12, step, out);
        Self::push_sweep(&circle, p2, p3, angle2, sweep23, step, out);
    }
}

impl CurvedGeometryFactory for CircularArcFactory {
    #[inline]
    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn linearize_arc(&self, control_points: &[Coordinate]) -> Result<Vec<Coordinate>> {
        let count = control_points.len();
        if count < 3 || count % 2 == 0 {
            return Err(Error::invalid(format!(
                "arc needs 2n+1 control points (n >= 1), got {}",
                count
            )));
        }

        let mut out = Vec::with_capacity(count * BASE_SEGMENTS_PER_QUADRANT as usize);
        out.push(control_points[0]);
        for arc in control_points.windows(3).step_by(2) {
            self.linearize_single(&arc[0], &arc[1], &arc[2], &mut out);
        }
        Ok(out)
    }
}
