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

use crate::consts::DBL_EPSILON;
use crate::r1;
use crate::r2;
use crate::s1::angle::{Angle, Rad};
use crate::s1::interval::{self, Interval};
use crate::s2::cap::Cap;
use crate::s2::cellid::{ij_level_to_bound_uv, CellID};
use crate::s2::latlng::LatLng;
use crate::s2::metric::AVG_AREA;
use crate::s2::point::{point_area, Point};
use crate::s2::rect::Rect;
use crate::s2::region::Region;
use crate::s2::stuv::{face_uv_to_xyz, face_xyz_to_uv, u_axis, v_axis};

/// Cell is an S2 region object that represents a cell. Unlike CellIDs, it
/// supports efficient containment and intersection tests. However, it is
/// also a more expensive representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub face: u8,
    pub level: u8,
    pub orientation: u8,
    pub id: CellID,
    pub uv: r2::rect::Rect,
}

impl<'a> From<&'a CellID> for Cell {
    fn from(id: &'a CellID) -> Self {
        let (face, i, j, orientation) = id.face_ij_orientation();
        let level = id.level();
        Cell {
            face,
            level: level as u8,
            orientation,
            id: *id,
            uv: ij_level_to_bound_uv(i, j, level),
        }
    }
}

impl From<CellID> for Cell {
    fn from(id: CellID) -> Self {
        Cell::from(&id)
    }
}

impl<'a> From<&'a Point> for Cell {
    /// constructs the leaf cell containing the point.
    fn from(p: &'a Point) -> Self {
        Cell::from(CellID::from(p))
    }
}

impl From<Point> for Cell {
    fn from(p: Point) -> Self {
        Cell::from(&p)
    }
}

impl Cell {
    pub fn is_leaf(&self) -> bool {
        self.id.is_leaf()
    }

    pub fn size_ij(&self) -> u64 {
        crate::s2::cellid::size_ij(self.level as u64)
    }

    /// vertex returns the k-th vertex of the cell (k = 0,1,2,3) in CCW order
    /// (lower left, lower right, upper right, upper left in the UV plane).
    pub fn vertex(&self, k: usize) -> Point {
        let v = self.uv.vertices()[k & 3];
        Point(face_uv_to_xyz(self.face, v.x, v.y).normalize())
    }

    /// center returns the direction vector corresponding to the center in
    /// (s,t)-space of the given cell. This is the point at which the cell is
    /// divided into four subcells.
    pub fn center(&self) -> Point {
        Point::from(&self.id)
    }

    /// average_area returns the average area of cells at the level of this
    /// cell. This is accurate to within a factor of 1.7.
    pub fn average_area(&self) -> f64 {
        AVG_AREA.value(self.level as u64)
    }

    /// approx_area returns the approximate area of this cell. This method is
    /// accurate to within 3% percent for all cell sizes and accurate to
    /// within 0.1% for cells at level 5 or higher (i.e. squares 350km to a
    /// side or smaller on the Earth's surface). It is moderately cheap to
    /// compute.
    pub fn approx_area(&self) -> f64 {
        // All cells at the first two levels have the same area.
        if self.level < 2 {
            return self.average_area();
        }

        // First, compute the approximate area of the cell when projected
        // perpendicular to its normal. The cross product of its diagonals
        // gives the normal, and the length of the normal is twice the
        // projected area.
        let d1 = self.vertex(2).0 - self.vertex(0).0;
        let d2 = self.vertex(3).0 - self.vertex(1).0;
        let flat_area = 0.5 * d1.cross(&d2).norm();

        // Now, compensate for the curvature of the cell surface by pretending
        // that the cell is shaped like a spherical cap. The ratio of the area
        // of a spherical cap to the area of its projected disc turns out to
        // be 2 / (1 + sqrt(1 - r*r)) where r is the radius of the disc.
        flat_area * 2. / (1. + (1. - (flat_area / PI).min(1.)).sqrt())
    }

    /// exact_area returns the area of this cell as accurately as possible.
    pub fn exact_area(&self) -> f64 {
        let v0 = self.vertex(0);
        let v1 = self.vertex(1);
        let v2 = self.vertex(2);
        let v3 = self.vertex(3);
        point_area(&v0, &v1, &v2) + point_area(&v0, &v2, &v3)
    }

    /// contains_point reports whether this cell contains the given point.
    /// Points on the boundary are contained, with a margin for the error in
    /// projecting the point onto the face.
    pub fn contains_point(&self, p: &Point) -> bool {
        match face_xyz_to_uv(self.face, p) {
            Some((u, v)) => self
                .uv
                .expanded_by_margin(DBL_EPSILON)
                .contains_point(&r2::point::Point::new(u, v)),
            None => false,
        }
    }

    fn latitude(&self, i: usize, j: usize) -> Angle {
        let u = if i == 0 { self.uv.x.lo } else { self.uv.x.hi };
        let v = if j == 0 { self.uv.y.lo } else { self.uv.y.hi };
        Point(face_uv_to_xyz(self.face, u, v)).latitude()
    }

    fn longitude(&self, i: usize, j: usize) -> Angle {
        let u = if i == 0 { self.uv.x.lo } else { self.uv.x.hi };
        let v = if j == 0 { self.uv.y.lo } else { self.uv.y.hi };
        Point(face_uv_to_xyz(self.face, u, v)).longitude()
    }
}

/// pole_min_lat is the minimum latitude of any point on a polar face, rounded
/// down by half an ulp.
fn pole_min_lat() -> f64 {
    (1f64 / 3.).sqrt().asin() - 0.5 * DBL_EPSILON
}

impl Region for Cell {
    /// cap_bound returns a cap centered at the cell's (u,v) center and grown
    /// to contain all four vertices. This is not the minimal bounding cap,
    /// but it is close.
    fn cap_bound(&self) -> Cap {
        let c = self.uv.center();
        let mut cap = Cap::from(Point(face_uv_to_xyz(self.face, c.x, c.y).normalize()));
        for k in 0..4 {
            cap.add_point(&self.vertex(k));
        }
        cap
    }

    fn rect_bound(&self) -> Rect {
        if self.level > 0 {
            // The cell is convex in lat/lng space, so its extremes are found
            // at two opposite vertices for latitude and the other two for
            // longitude. Which pair depends on the quadrant of the face.
            let u = self.uv.x.lo + self.uv.x.hi;
            let v = self.uv.y.lo + self.uv.y.hi;
            let i = if u_axis(self.face).0.z == 0. {
                (u < 0.) as usize
            } else {
                (u > 0.) as usize
            };
            let j = if v_axis(self.face).0.z == 0. {
                (v < 0.) as usize
            } else {
                (v > 0.) as usize
            };

            let lat = r1::interval::Interval::from_point(self.latitude(i, j).rad())
                + self.latitude(1 - i, 1 - j).rad();
            let lng = interval::EMPTY
                + self.longitude(i, 1 - j).rad()
                + self.longitude(1 - i, j).rad();

            // The lat/lng of each vertex is computed with a small error, so
            // the bound is grown by twice that on every side.
            let margin = LatLng::new(Rad(2. * DBL_EPSILON).into(), Rad(2. * DBL_EPSILON).into());
            return Rect { lat, lng }.expanded(&margin).polar_closure();
        }

        let pole_min_lat = pole_min_lat();
        let bound = match self.face {
            0 => Rect {
                lat: r1::interval::Interval::new(-PI / 4., PI / 4.),
                lng: Interval::new(-PI / 4., PI / 4.),
            },
            1 => Rect {
                lat: r1::interval::Interval::new(-PI / 4., PI / 4.),
                lng: Interval::new(PI / 4., 3. * PI / 4.),
            },
            2 => Rect {
                lat: r1::interval::Interval::new(pole_min_lat, PI / 2.),
                lng: interval::FULL,
            },
            3 => Rect {
                lat: r1::interval::Interval::new(-PI / 4., PI / 4.),
                lng: Interval::new(3. * PI / 4., -3. * PI / 4.),
            },
            4 => Rect {
                lat: r1::interval::Interval::new(-PI / 4., PI / 4.),
                lng: Interval::new(-3. * PI / 4., -PI / 4.),
            },
            _ => Rect {
                lat: r1::interval::Interval::new(-PI / 2., -pole_min_lat),
                lng: interval::FULL,
            },
        };

        // Face edges are great circles, so the latitude extremes of a face
        // cell lie on them exactly and only need the projection error added.
        bound.expanded(&LatLng::new(Rad(DBL_EPSILON).into(), Rad(0.).into()))
    }

    fn contains_cell(&self, other: &Cell) -> bool {
        self.id.contains(&other.id)
    }

    fn intersects_cell(&self, other: &Cell) -> bool {
        self.id.intersects(&other.id)
    }

    fn contains_point(&self, p: &Point) -> bool {
        Cell::contains_point(self, p)
    }
}
