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

use crate::r1::interval::{self, Interval};
use crate::r2::point::Point;

/// Rect represents a closed axis-aligned rectangle in the (x,y) plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// x interval of the rect
    pub x: Interval,
    /// y interval of the rect
    pub y: Interval,
}

/// empty rect
pub const EMPTY: Rect = Rect {
    x: interval::EMPTY,
    y: interval::EMPTY,
};

impl Rect {
    /// from_points constructs a rect that contains the given points.
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(EMPTY, |r, p| r + p)
    }

    pub fn empty() -> Self {
        EMPTY
    }

    /// is_empty reports whether the rectangle is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// vertices returns all four vertices of the rectangle. Vertices are returned in
    /// CCW direction starting with the lower left corner.
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.x.lo, self.y.lo),
            Point::new(self.x.hi, self.y.lo),
            Point::new(self.x.hi, self.y.hi),
            Point::new(self.x.lo, self.y.hi),
        ]
    }

    /// center returns the center of the rectangle in (x,y)-space
    pub fn center(&self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }

    /// contains_point reports whether the rectangle contains the given point.
    /// Rectangles are closed regions, i.e. they contain their boundary.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y)
    }

    /// expanded returns a rectangle that has been expanded in the x-direction
    /// by margin.x, and in y-direction by margin.y. Negative margins shrink
    /// the rectangle and the result may be empty.
    pub fn expanded(&self, margin: &Point) -> Self {
        let x = self.x.expanded(margin.x);
        let y = self.y.expanded(margin.y);
        if x.is_empty() || y.is_empty() {
            EMPTY
        } else {
            Rect { x, y }
        }
    }

    /// expanded_by_margin returns a Rect that has been expanded by the amount on all sides.
    pub fn expanded_by_margin(&self, margin: f64) -> Self {
        self.expanded(&Point::new(margin, margin))
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.x.approx_eq(&other.x) && self.y.approx_eq(&other.y)
    }
}

impl<'b> ops::Add<&'b Point> for Rect {
    type Output = Self;
    /// expands the rectangle by the minimum amount to include the given point.
    fn add(self, p: &'b Point) -> Self::Output {
        Rect {
            x: self.x + p.x,
            y: self.y + p.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let r = Rect::from_points(&[Point::new(0.2, 0.3), Point::new(-0.1, 0.5)]);
        assert_eq!(r.x, Interval::new(-0.1, 0.2));
        assert_eq!(r.y, Interval::new(0.3, 0.5));
        assert!(Rect::from_points(&[]).is_empty());
    }

    #[test]
    fn test_vertices_ccw() {
        let r = Rect::from_points(&[Point::new(0., 0.25), Point::new(0.5, 0.75)]);
        let v = r.vertices();
        assert_eq!(v[0], Point::new(0., 0.25));
        assert_eq!(v[1], Point::new(0.5, 0.25));
        assert_eq!(v[2], Point::new(0.5, 0.75));
        assert_eq!(v[3], Point::new(0., 0.75));
        assert_eq!(r.center(), Point::new(0.25, 0.5));
    }

    #[test]
    fn test_expanded() {
        let r = Rect::from_points(&[Point::new(0., 0.), Point::new(1., 1.)]);
        assert!(r.expanded_by_margin(-0.6).is_empty());
        let e = r.expanded_by_margin(0.25);
        assert!(e.approx_eq(&Rect::from_points(&[Point::new(-0.25, -0.25), Point::new(1.25, 1.25)])));
        assert!(e.contains_point(&Point::new(1.2, -0.2)));
        assert!(!r.contains_point(&Point::new(1.2, -0.2)));
    }
}
