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
use std::ops;

use crate::consts::{remainder, DBL_EPSILON, EPSILON};

/// Interval represents a closed interval on a unit circle, used for
/// longitudes. Points are angles in radians in the range [-π, π], where -π
/// and π are the same point. When lo > hi the interval is "inverted" and
/// wraps around through π.
///
/// The full interval is [-π, π] and the empty interval is [π, -π]. Any
/// other interval with an endpoint of -π is normalized to use π instead.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

pub const EMPTY: Interval = Interval { lo: PI, hi: -PI };
pub const FULL: Interval = Interval { lo: -PI, hi: PI };

/// positive_distance returns the distance from a to b going counterclockwise.
/// The result is in [0, 2π).
fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0. {
        d
    } else {
        // Compute the sum so that the result never becomes negative.
        (b + PI) - (a - PI)
    }
}

impl Interval {
    /// new builds an interval from its endpoints, mapping -π to π where the
    /// interval is neither full nor empty.
    pub fn new(lo: f64, hi: f64) -> Self {
        let mut i = Interval { lo, hi };
        if lo == -PI && hi != PI {
            i.lo = PI;
        }
        if hi == -PI && lo != PI {
            i.hi = PI;
        }
        i
    }

    pub fn empty() -> Self {
        EMPTY
    }

    pub fn full() -> Self {
        FULL
    }

    /// from_point_pair returns the minimal interval containing the two given points.
    pub fn from_point_pair(mut a: f64, mut b: f64) -> Self {
        if a == -PI {
            a = PI;
        }
        if b == -PI {
            b = PI;
        }
        if positive_distance(a, b) <= PI {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lo.abs() <= PI
            && self.hi.abs() <= PI
            && !(self.lo == -PI && self.hi != PI)
            && !(self.hi == -PI && self.lo != PI)
    }

    pub fn is_full(&self) -> bool {
        self.lo == -PI && self.hi == PI
    }

    pub fn is_empty(&self) -> bool {
        self.lo == PI && self.hi == -PI
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }

    pub fn center(&self) -> f64 {
        let c = 0.5 * (self.lo + self.hi);
        if !self.is_inverted() {
            c
        } else if c <= 0. {
            c + PI
        } else {
            c - PI
        }
    }

    /// len returns the length of the interval. The empty interval has a
    /// negative length.
    pub fn len(&self) -> f64 {
        let mut l = self.hi - self.lo;
        if l >= 0. {
            return l;
        }
        l += 2. * PI;
        if l > 0. {
            l
        } else {
            -1.
        }
    }

    /// complement returns the closure of the complement of the interval.
    pub fn complement(&self) -> Self {
        if self.lo == self.hi {
            FULL
        } else {
            Interval {
                lo: self.hi,
                hi: self.lo,
            }
        }
    }

    /// complement_center returns the midpoint of the complement of the interval.
    pub fn complement_center(&self) -> f64 {
        if self.lo != self.hi {
            return self.complement().center();
        }
        if self.hi <= 0. {
            self.hi + PI
        } else {
            self.hi - PI
        }
    }

    fn fast_contains(&self, p: f64) -> bool {
        if self.is_inverted() {
            (p >= self.lo || p <= self.hi) && !self.is_empty()
        } else {
            p >= self.lo && p <= self.hi
        }
    }

    /// contains returns true iff the interval contains p.
    /// p must be in [-π, π].
    pub fn contains(&self, mut p: f64) -> bool {
        if p == -PI {
            p = PI;
        }
        self.fast_contains(p)
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        if self.is_inverted() {
            if other.is_inverted() {
                return other.lo >= self.lo && other.hi <= self.hi;
            }
            return (other.lo >= self.lo || other.hi <= self.hi) && !self.is_empty();
        }
        if other.is_inverted() {
            return self.is_full() || other.is_empty();
        }
        other.lo >= self.lo && other.hi <= self.hi
    }

    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.is_inverted() {
            return other.is_inverted() || other.lo <= self.hi || other.hi >= self.lo;
        }
        if other.is_inverted() {
            return other.lo <= self.hi || other.hi >= self.lo;
        }
        other.lo <= self.hi && other.hi >= self.lo
    }

    /// union returns the smallest interval that contains both intervals.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.fast_contains(other.lo) {
            if self.fast_contains(other.hi) {
                // Either other ⊂ self, or the union wraps around the whole circle.
                if self.contains_interval(other) {
                    return *self;
                }
                return FULL;
            }
            return Interval {
                lo: self.lo,
                hi: other.hi,
            };
        }
        if self.fast_contains(other.hi) {
            return Interval {
                lo: other.lo,
                hi: self.hi,
            };
        }

        // Neither endpoint of other is in self. Either self ⊂ other, or they are disjoint.
        if self.is_empty() || other.fast_contains(self.lo) {
            return *other;
        }

        // Disjoint: bridge the smaller of the two gaps.
        if positive_distance(other.hi, self.lo) < positive_distance(self.hi, other.lo) {
            Interval {
                lo: other.lo,
                hi: self.hi,
            }
        } else {
            Interval {
                lo: self.lo,
                hi: other.hi,
            }
        }
    }

    /// intersection returns the smallest interval that contains the intersection
    /// of the two intervals.
    pub fn intersection(&self, other: &Self) -> Self {
        if other.is_empty() {
            return EMPTY;
        }
        if self.fast_contains(other.lo) {
            if self.fast_contains(other.hi) {
                // The shorter of the two covers both pieces.
                if other.len() < self.len() {
                    return *other;
                }
                return *self;
            }
            return Interval {
                lo: other.lo,
                hi: self.hi,
            };
        }
        if self.fast_contains(other.hi) {
            return Interval {
                lo: self.lo,
                hi: other.hi,
            };
        }
        if other.fast_contains(self.lo) {
            return *self;
        }
        EMPTY
    }

    /// expanded returns an interval expanded on each side by margin. A negative
    /// margin shrinks the interval. Expanding an empty interval or shrinking a
    /// full one has no effect.
    pub fn expanded(&self, margin: f64) -> Self {
        if margin >= 0. {
            if self.is_empty() {
                return *self;
            }
            // Check whether this interval will be full after expansion, allowing
            // for a rounding error when computing each endpoint.
            if self.len() + 2. * margin + 2. * DBL_EPSILON >= 2. * PI {
                return FULL;
            }
        } else {
            if self.is_full() {
                return *self;
            }
            if self.len() + 2. * margin - 2. * DBL_EPSILON <= 0. {
                return EMPTY;
            }
        }
        let mut result = Interval::new(
            remainder(self.lo - margin, 2. * PI),
            remainder(self.hi + margin, 2. * PI),
        );
        if result.lo <= -PI {
            result.lo = PI;
        }
        result
    }

    /// approx_eq reports whether this interval can be transformed into the
    /// given interval by moving each endpoint a small distance.
    pub fn approx_eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            return other.len() <= 2. * EPSILON;
        }
        if other.is_empty() {
            return self.len() <= 2. * EPSILON;
        }
        if self.is_full() {
            return other.len() >= 2. * (PI - EPSILON);
        }
        if other.is_full() {
            return self.len() >= 2. * (PI - EPSILON);
        }
        remainder(other.lo - self.lo, 2. * PI).abs() <= EPSILON
            && remainder(other.hi - self.hi, 2. * PI).abs() <= EPSILON
            && (self.len() - other.len()).abs() <= 2. * EPSILON
    }
}

impl ops::Add<f64> for Interval {
    type Output = Interval;
    /// expands the interval by the minimum amount necessary to contain p.
    fn add(self, mut p: f64) -> Self::Output {
        if p.abs() > PI {
            return self;
        }
        if p == -PI {
            p = PI;
        }
        if self.fast_contains(p) {
            return self;
        }
        if self.is_empty() {
            return Interval { lo: p, hi: p };
        }
        if positive_distance(p, self.lo) < positive_distance(self.hi, p) {
            Interval { lo: p, hi: self.hi }
        } else {
            Interval { lo: self.lo, hi: p }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_eq;

    const QUAD1: Interval = Interval { lo: 0., hi: PI / 2. };
    const QUAD2: Interval = Interval { lo: PI / 2., hi: PI };
    const QUAD3: Interval = Interval { lo: PI, hi: -PI / 2. };
    const QUAD4: Interval = Interval { lo: -PI / 2., hi: 0. };

    #[test]
    fn test_constructors() {
        assert_eq!(Interval::new(-PI, 1.).lo, PI);
        assert_eq!(Interval::new(1., -PI).hi, PI);
        assert!(Interval::new(-PI, PI).is_full());
        assert!(Interval::new(PI, -PI).is_empty());
        assert!(FULL.is_valid());
        assert!(EMPTY.is_valid());
        assert!(!Interval { lo: -PI, hi: 0. }.is_valid());
    }

    #[test]
    fn test_from_point_pair() {
        assert_eq!(Interval::from_point_pair(-PI, PI), Interval { lo: PI, hi: PI });
        assert_eq!(Interval::from_point_pair(0., 1.), Interval { lo: 0., hi: 1. });
        assert_eq!(Interval::from_point_pair(1., 0.), Interval { lo: 0., hi: 1. });
        assert_eq!(Interval::from_point_pair(3., -3.), Interval { lo: 3., hi: -3. });
    }

    #[test]
    fn test_center_and_len() {
        assert!(f64_eq(QUAD1.center(), PI / 4.));
        assert!(f64_eq(QUAD3.center(), -3. * PI / 4.));
        assert!(f64_eq(QUAD3.len(), PI / 2.));
        assert!(f64_eq(FULL.len(), 2. * PI));
        assert!(EMPTY.len() < 0.);
        assert!(f64_eq(QUAD1.complement_center(), -3. * PI / 4.));
    }

    #[test]
    fn test_contains() {
        assert!(QUAD3.contains(PI));
        assert!(QUAD3.contains(-PI));
        assert!(!QUAD3.contains(0.));
        assert!(!EMPTY.contains(PI));
        assert!(FULL.contains_interval(&QUAD3));
        assert!(QUAD3.contains_interval(&Interval { lo: PI, hi: -3. }));
        assert!(!QUAD1.contains_interval(&QUAD2));
    }

    #[test]
    fn test_intersects() {
        assert!(QUAD1.intersects(&QUAD2));
        assert!(!QUAD1.intersects(&QUAD3));
        assert!(QUAD3.intersects(&QUAD4));
        assert!(!EMPTY.intersects(&FULL));
    }

    #[test]
    fn test_union() {
        assert_eq!(QUAD1.union(&QUAD2), Interval { lo: 0., hi: PI });
        assert_eq!(QUAD2.union(&QUAD3), Interval { lo: PI / 2., hi: -PI / 2. });
        assert_eq!(QUAD3.union(&QUAD1), Interval { lo: PI, hi: PI / 2. });
        assert_eq!(QUAD1.union(&EMPTY), QUAD1);
        assert_eq!(EMPTY.union(&QUAD4), QUAD4);
        assert!(QUAD1.union(&QUAD2).union(&QUAD3).union(&QUAD4).is_full());
    }

    #[test]
    fn test_intersection() {
        assert_eq!(QUAD1.intersection(&QUAD2), Interval { lo: PI / 2., hi: PI / 2. });
        assert!(QUAD1.intersection(&QUAD3).is_empty());
        assert_eq!(FULL.intersection(&QUAD3), QUAD3);
    }

    #[test]
    fn test_add_point() {
        let mut i = EMPTY;
        i = i + 0.;
        assert_eq!(i, Interval { lo: 0., hi: 0. });
        i = i + PI / 2.;
        assert_eq!(i, QUAD1);
        let j = QUAD3 + -3.;
        assert_eq!(j, QUAD3);
        let k = QUAD1 + -PI / 2.;
        assert_eq!(k, Interval { lo: -PI / 2., hi: PI / 2. });
    }

    #[test]
    fn test_expanded() {
        assert!(EMPTY.expanded(1.).is_empty());
        assert!(FULL.expanded(-1.).is_full());
        assert!(QUAD1.expanded(PI).is_full());
        assert!(QUAD1.expanded(-PI / 4.).is_empty());
        assert!(QUAD1.expanded(0.25).approx_eq(&Interval { lo: -0.25, hi: PI / 2. + 0.25 }));
        assert!(QUAD3.expanded(0.25).approx_eq(&Interval { lo: PI - 0.25, hi: -PI / 2. + 0.25 }));
    }
}
