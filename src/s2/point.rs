/*
Copyright 2014 Google Inc. All rights reserved.
Copyright 2017 Jihyun Yu. All rights reserved.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::ops;

use crate::consts::EPSILON;
use crate::r3::vector::Vector;
use crate::s1::angle::Angle;
use crate::s1::chordangle::ChordAngle;

/// Point represents a point on the unit sphere as a normalized 3D vector.
/// Cell centers and vertices, and cap centers, are Points.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub Vector);

impl ops::Add<Point> for Point {
    type Output = Point;
    fn add(self, other: Point) -> Self::Output {
        Point(self.0 + other.0)
    }
}

impl ops::Sub<Point> for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Self::Output {
        Point(self.0 - other.0)
    }
}

impl ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, m: f64) -> Self::Output {
        Point(self.0 * m)
    }
}

/// ORIGIN is a fixed point on the sphere that is neither a pole nor on the
/// boundary of any low-level cell.
pub const ORIGIN: Point = Point(Vector {
    x: -0.0099994664350250197,
    y: 0.0025924542609324121,
    z: 0.99994664350250195,
});

impl Point {
    /// from_coords creates a new normalized point from coordinates.
    ///
    /// This always returns a valid point. If the given coordinates can not be
    /// normalized the origin point will be returned.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        if x == 0. && y == 0. && z == 0. {
            ORIGIN
        } else {
            Point(Vector { x, y, z }.normalize())
        }
    }

    /// distance returns the angle between two points.
    pub fn distance(&self, b: &Point) -> Angle {
        self.0.angle(&b.0)
    }

    /// approx_eq reports whether the two points are similar enough to be equal.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.0.angle(&other.0) <= Angle(EPSILON)
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn normalize(&self) -> Self {
        Point(self.0.normalize())
    }

    /// chordangle constructs a ChordAngle corresponding to the distance
    /// between the two given points. The points must be unit length.
    pub fn chordangle(&self, other: &Point) -> ChordAngle {
        ChordAngle(4f64.min((self.0 - other.0).norm2()))
    }
}

/// point_area returns the area on the unit sphere for the triangle defined by
/// the given points.
///
/// l'Huilier's theorem is used unless the triangle is long and skinny enough
/// that cancellation in (s-a), (s-b), (s-c) dominates, in which case Girard's
/// formula is tried instead. Here s is the semiperimeter and a, b, c are the
/// side lengths.
pub fn point_area(a: &Point, b: &Point, c: &Point) -> f64 {
    let sa = b.0.angle(&c.0).0;
    let sb = c.0.angle(&a.0).0;
    let sc = a.0.angle(&b.0).0;
    let s = 0.5 * (sa + sb + sc);
    if s >= 3e-4 {
        let dmin = s - sa.max(sb.max(sc));
        if dmin < 1e-2 * s * s * s * s * s {
            // Girard's formula, with the edge normals computed robustly
            // enough for nearly degenerate triangles.
            let ab = robust_cross(a, b);
            let bc = robust_cross(b, c);
            let ac = robust_cross(a, c);
            let area = (ab.angle(&ac).0 - ab.angle(&bc).0 + bc.angle(&ac).0).max(0.0);

            if dmin < s * 0.1 * area {
                return area;
            }
        }
    }

    4. * ((0.5 * s).tan()
        * (0.5 * (s - sa)).tan()
        * (0.5 * (s - sb)).tan()
        * (0.5 * (s - sc)).tan())
    .max(0.)
    .sqrt()
    .atan()
}

/// robust_cross returns a vector orthogonal to both a and b. It stays
/// accurate when a and b are nearly parallel.
fn robust_cross(a: &Point, b: &Point) -> Vector {
    (a.0 + b.0).cross(&(b.0 - a.0))
}
