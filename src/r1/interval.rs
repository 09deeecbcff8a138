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

/// Interval represents a closed interval on ℝ.
/// Zero-length intervals (where lo == hi) represent single points.
/// If lo > hi then the interval is empty.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// The canonical empty interval.
pub const EMPTY: Interval = Interval { lo: 1., hi: 0. };

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Self {
        Interval { lo, hi }
    }

    pub fn empty() -> Self {
        EMPTY
    }

    /// from_point returns an interval representing a single point.
    pub fn from_point(p: f64) -> Self {
        Interval { lo: p, hi: p }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// len returns the length of the interval. The length of an empty
    /// interval is negative.
    pub fn len(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, p: f64) -> bool {
        self.lo <= p && p <= self.hi
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        other.lo >= self.lo && other.hi <= self.hi
    }

    pub fn intersects(&self, other: &Self) -> bool {
        if self.lo <= other.lo {
            other.lo <= self.hi && other.lo <= other.hi
        } else {
            self.lo <= other.hi && self.lo <= self.hi
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Interval {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// expanded returns an interval that has been expanded on each side by margin.
    /// A negative margin shrinks the interval; empty intervals stay empty.
    pub fn expanded(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo - margin,
            hi: self.hi + margin,
        }
    }

    /// approx_eq reports whether the interval can be transformed into the
    /// given interval by moving each endpoint a small distance.
    /// The empty interval is considered to be positioned arbitrarily on the
    /// real line, so any interval with a small enough length will match it.
    pub fn approx_eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            return other.len() <= 2. * EPSILON;
        }
        if other.is_empty() {
            return self.len() <= 2. * EPSILON;
        }
        (other.lo - self.lo).abs() <= EPSILON && (other.hi - self.hi).abs() <= EPSILON
    }
}

impl ops::Add<f64> for Interval {
    type Output = Interval;
    /// returns the smallest interval containing this interval and the point.
    fn add(self, p: f64) -> Self::Output {
        if self.is_empty() {
            Interval::from_point(p)
        } else if p < self.lo {
            Interval { lo: p, hi: self.hi }
        } else if p > self.hi {
            Interval { lo: self.lo, hi: p }
        } else {
            self
        }
    }
}
