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

use std::f64::consts::PI;
use std::fmt;
use std::ops;

use crate::consts::EPSILON;
use crate::r3::vector::Vector;
use crate::s1::angle::Angle;
use crate::s1::chordangle::{self, ChordAngle};
use crate::s2::point::Point;

/// Cap represents a disc-shaped region defined by a center and radius.
/// Technically this shape is called a "spherical cap" (rather than disc)
/// because it is not planar; the cap represents a portion of the sphere that
/// has been cut off by a plane. The boundary of the cap is the circle defined
/// by the intersection of the sphere and the plane.
///
/// The radius is stored as a ChordAngle. The empty cap has a negative radius
/// and the full cap has a radius of 180 degrees.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cap {
    pub center: Point,
    pub radius: ChordAngle,
}

impl fmt::Debug for Cap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[center={:?}, radius={:.7}]",
            self.center.0,
            self.radius().deg()
        )
    }
}

impl<'a> From<&'a Point> for Cap {
    /// constructs a cap containing a single point.
    fn from(p: &'a Point) -> Self {
        Cap::from_center_chordangle(p, &ChordAngle(0.))
    }
}

impl From<Point> for Cap {
    fn from(p: Point) -> Self {
        Cap::from(&p)
    }
}

impl Cap {
    /// from_center_angle constructs a cap with the given center and angle.
    pub fn from_center_angle(center: &Point, angle: &Angle) -> Self {
        Cap::from_center_chordangle(center, &ChordAngle::from(angle))
    }

    pub fn from_center_chordangle(center: &Point, radius: &ChordAngle) -> Self {
        Cap {
            center: *center,
            radius: *radius,
        }
    }

    /// from_center_height constructs a cap with the given center and height. A
    /// negative height yields an empty cap; a height of 2 or more yields a full
    /// cap. The center should be unit length.
    pub fn from_center_height(center: &Point, height: f64) -> Self {
        Cap::from_center_chordangle(center, &ChordAngle::from_squared_length(2. * height))
    }

    /// from_center_area constructs a cap with the given center and surface
    /// area. Note that the area can also be interpreted as the solid angle
    /// subtended by the cap (because the sphere has unit radius).
    pub fn from_center_area(center: &Point, area: f64) -> Self {
        Cap::from_center_chordangle(center, &ChordAngle::from_squared_length(area / PI))
    }

    pub fn empty() -> Self {
        Cap {
            center: Point(Vector::xyz(1., 0., 0.)),
            radius: chordangle::NEGATIVE,
        }
    }

    pub fn full() -> Self {
        Cap {
            center: Point(Vector::xyz(1., 0., 0.)),
            radius: chordangle::STRAIGHT,
        }
    }

    /// is_valid reports whether the cap is considered valid.
    pub fn is_valid(&self) -> bool {
        self.center.0.is_unit() && self.radius <= chordangle::STRAIGHT
    }

    pub fn is_empty(&self) -> bool {
        self.radius.0 < 0.
    }

    pub fn is_full(&self) -> bool {
        self.radius == chordangle::STRAIGHT
    }

    /// height returns the height of the cap. This is the distance from the
    /// center point to the cutoff plane.
    pub fn height(&self) -> f64 {
        0.5 * self.radius.0
    }

    /// radius returns the cap radius as an Angle. (Note that the cap angle is
    /// stored internally as a ChordAngle, so this method requires a
    /// trigonometric operation and may yield a slightly different result than
    /// the value passed to from_center_angle.)
    pub fn radius(&self) -> Angle {
        Angle::from(self.radius)
    }

    pub fn area(&self) -> f64 {
        2. * PI * self.height().max(0.)
    }

    /// contains reports whether this cap contains the other.
    pub fn contains(&self, other: &Cap) -> bool {
        if self.is_full() || other.is_empty() {
            return true;
        }
        self.radius >= self.center.chordangle(&other.center) + other.radius
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.center.chordangle(p) <= self.radius
    }

    /// add_point increases the cap if necessary to include the given point.
    /// If this cap is empty, the center is set to the point with a zero
    /// radius. p must be unit length.
    pub fn add_point(&mut self, p: &Point) {
        if self.is_empty() {
            self.center = *p;
            self.radius = ChordAngle(0.);
            return;
        }

        // After adding p to this cap, we require that the result contains p.
        // However we don't need to do anything special to achieve this
        // because contains() does exactly the same distance calculation that
        // we do here.
        let new_rad = self.center.chordangle(p);
        if new_rad > self.radius {
            self.radius = new_rad;
        }
    }

    /// add_cap increases the cap height if necessary to include the other
    /// cap. If this cap is empty, it is set to the other cap.
    pub fn add_cap(&mut self, other: &Cap) {
        if self.is_empty() {
            *self = *other;
            return;
        }
        if other.is_empty() {
            return;
        }

        // We round up the distance to ensure that the cap is actually
        // contained.
        let dist = self.center.chordangle(&other.center) + other.radius;
        if dist > self.radius {
            self.radius = dist;
        }
    }

    /// approx_eq reports whether this cap is equal to the other cap within
    /// the given tolerance.
    pub fn approx_eq(&self, other: &Cap) -> bool {
        const EPSILON2: f64 = 1e-14;
        let r2 = self.radius.0;
        let other_r2 = other.radius.0;
        self.center.approx_eq(&other.center) && (r2 - other_r2).abs() <= EPSILON
            || self.is_empty() && other_r2 <= EPSILON2
            || other.is_empty() && r2 <= EPSILON2
            || self.is_full() && other_r2 >= 2. - EPSILON2
            || other.is_full() && r2 >= 2. - EPSILON2
    }
}

impl<'a> ops::Add<&'a Point> for Cap {
    type Output = Cap;
    fn add(mut self, p: &'a Point) -> Self::Output {
        self.add_point(p);
        self
    }
}

impl<'a> ops::Add<&'a Cap> for Cap {
    type Output = Cap;
    fn add(mut self, other: &'a Cap) -> Self::Output {
        self.add_cap(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_near;
    use crate::s1::angle::Deg;

    fn xyz(x: f64, y: f64, z: f64) -> Point {
        Point::from_coords(x, y, z)
    }

    #[test]
    fn test_cap_basic_empty_full_valid() {
        let empty = Cap::empty();
        let full = Cap::full();
        assert!(empty.is_valid());
        assert!(empty.is_empty());
        assert!(!empty.is_full());
        assert!(full.is_valid());
        assert!(full.is_full());
        assert!(!full.is_empty());
        assert_eq!(empty.area(), 0.);
        assert!(f64_near(full.area(), 4. * PI, 1e-15));
        assert!(full.contains(&empty));
        assert!(!empty.contains(&full));
    }

    #[test]
    fn test_cap_point_cap() {
        let p = xyz(1., 2., 3.);
        let c = Cap::from(&p);
        assert!(!c.is_empty());
        assert_eq!(c.height(), 0.);
        assert!(c.contains_point(&p));
        assert!(!c.contains_point(&xyz(1., 2., 2.9)));
    }

    #[test]
    fn test_cap_from_center_height() {
        let north = xyz(0., 0., 1.);
        let hemi = Cap::from_center_height(&north, 1.);
        assert!(f64_near(hemi.area(), 2. * PI, 1e-15));
        assert!(hemi.contains_point(&xyz(1., 0., 0.)));
        assert!(!hemi.contains_point(&xyz(1., 0., -0.01)));
        assert!(Cap::from_center_height(&north, 3.).is_full());
        assert!(Cap::from_center_height(&north, -1.).is_empty());
        assert!(hemi.approx_eq(&Cap::from_center_area(&north, 2. * PI)));
    }

    #[test]
    fn test_cap_add_point() {
        let mut c = Cap::empty();
        c.add_point(&xyz(0., 0., 1.));
        assert!(c.approx_eq(&Cap::from(&xyz(0., 0., 1.))));

        let c = c + &xyz(1., 0., 0.);
        assert!(f64_near(c.radius().deg(), 90., 1e-13));
        assert!(c.contains_point(&xyz(1., 0., 0.)));
        assert!(c.contains_point(&xyz(0., 1., 0.)));
    }

    #[test]
    fn test_cap_add_cap() {
        let a = Cap::from_center_angle(&xyz(0., 0., 1.), &Deg(10.).into());
        let b = Cap::from_center_angle(&xyz(1., 0., 0.), &Deg(10.).into());
        let c = a + &b;
        assert!(c.contains(&a));
        assert!(c.contains(&b));
        assert!(f64_near(c.radius().deg(), 100., 1e-10));

        assert_eq!(Cap::empty() + &a, a);
        assert_eq!(a + &Cap::empty(), a);
    }
}
