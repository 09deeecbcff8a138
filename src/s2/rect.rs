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

use crate::r1;
use crate::s1::angle::{Angle, Deg, Rad};
use crate::s1::interval::{self, Interval};
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;

/// Rect represents a closed latitude-longitude rectangle. Cell unions report
/// their bounding rectangle as a Rect.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub lat: r1::interval::Interval,
    pub lng: Interval,
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[lo{:?}, hi{:?}]", self.lo(), self.hi())
    }
}

const VALID_RECT_LAT_RANGE: r1::interval::Interval = r1::interval::Interval {
    lo: -PI / 2.,
    hi: PI / 2.,
};

impl Rect {
    pub fn empty() -> Rect {
        Rect {
            lat: r1::interval::EMPTY,
            lng: interval::EMPTY,
        }
    }

    pub fn full() -> Rect {
        Rect {
            lat: VALID_RECT_LAT_RANGE,
            lng: interval::FULL,
        }
    }

    pub fn from_degrees(lat_lo: f64, lng_lo: f64, lat_hi: f64, lng_hi: f64) -> Self {
        Rect {
            lat: r1::interval::Interval::new(
                Angle::from(Deg(lat_lo)).rad(),
                Angle::from(Deg(lat_hi)).rad(),
            ),
            lng: Interval::new(
                Angle::from(Deg(lng_lo)).rad(),
                Angle::from(Deg(lng_hi)).rad(),
            ),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.lo.abs() <= PI / 2.
            && self.lat.hi.abs() <= PI / 2.
            && self.lng.is_valid()
            && self.lat.is_empty() == self.lng.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lat == VALID_RECT_LAT_RANGE && self.lng.is_full()
    }

    /// vertex returns the k-th vertex of the rectangle in CCW order, starting
    /// at the lower-left corner. k is taken modulo 4.
    pub fn vertex(&self, k: u8) -> LatLng {
        let (lat, lng) = match k & 3 {
            0 => (self.lat.lo, self.lng.lo),
            1 => (self.lat.lo, self.lng.hi),
            2 => (self.lat.hi, self.lng.hi),
            _ => (self.lat.hi, self.lng.lo),
        };
        LatLng::new(Rad(lat).into(), Rad(lng).into())
    }

    pub fn lo(&self) -> LatLng {
        self.vertex(0)
    }

    pub fn hi(&self) -> LatLng {
        self.vertex(2)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(Rad(self.lat.center()).into(), Rad(self.lng.center()).into())
    }

    pub fn size(&self) -> LatLng {
        LatLng::new(Rad(self.lat.len()).into(), Rad(self.lng.len()).into())
    }

    /// area returns the surface area of the Rect on the unit sphere.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            let cap_diff = (self.lat.hi.sin() - self.lat.lo.sin()).abs();
            self.lng.len() * cap_diff
        }
    }

    /// expanded returns a rectangle that has been expanded by margin.lat on
    /// each side in the latitude direction, and by margin.lng on each side in
    /// the longitude direction. Negative margins shrink the rectangle. The
    /// latitude range is clamped to [-π/2, π/2].
    pub fn expanded(&self, margin: &LatLng) -> Self {
        let lat = self.lat.expanded(margin.lat.rad());
        let lng = self.lng.expanded(margin.lng.rad());

        if lat.is_empty() || lng.is_empty() {
            Self::empty()
        } else {
            Rect {
                lat: lat.intersection(&VALID_RECT_LAT_RANGE),
                lng,
            }
        }
    }

    /// polar_closure returns the rectangle extended to the full longitude
    /// range if it touches either pole.
    pub fn polar_closure(&self) -> Self {
        if self.lat.lo == -PI / 2. || self.lat.hi == PI / 2. {
            Rect {
                lat: self.lat,
                lng: interval::FULL,
            }
        } else {
            *self
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Rect {
            lat: self.lat.union(&other.lat),
            lng: self.lng.union(&other.lng),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let lat = self.lat.intersection(&other.lat);
        let lng = self.lng.intersection(&other.lng);

        if lat.is_empty() || lng.is_empty() {
            Self::empty()
        } else {
            Rect { lat, lng }
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.lat.intersects(&other.lat) && self.lng.intersects(&other.lng)
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.lat.contains_interval(&other.lat) && self.lng.contains_interval(&other.lng)
    }

    pub fn contains_latlng(&self, ll: &LatLng) -> bool {
        ll.is_valid() && self.lat.contains(ll.lat.rad()) && self.lng.contains(ll.lng.rad())
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.contains_latlng(&LatLng::from(p))
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.lat.approx_eq(&other.lat) && self.lng.approx_eq(&other.lng)
    }
}

impl<'a> ops::Add<&'a LatLng> for Rect {
    type Output = Rect;
    /// expands the rectangle to include the given point. Invalid points are
    /// ignored.
    fn add(self, ll: &'a LatLng) -> Self::Output {
        if !ll.is_valid() {
            self
        } else {
            Rect {
                lat: self.lat + ll.lat.rad(),
                lng: self.lng + ll.lng.rad(),
            }
        }
    }
}

impl From<LatLng> for Rect {
    fn from(ll: LatLng) -> Self {
        Rect {
            lat: r1::interval::Interval::from_point(ll.lat.rad()),
            lng: Interval {
                lo: ll.lng.rad(),
                hi: ll.lng.rad(),
            },
        }
    }
}
