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

use crate::consts::remainder;
use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Deg};
use crate::s2::point::Point;

const NORTH_POLE_LAT: Angle = Angle(PI / 2.);
const SOUTH_POLE_LAT: Angle = Angle(-PI / 2.);

/// LatLng represents a point on the unit sphere as a pair of angles.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: Angle,
    pub lng: Angle,
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lat.deg(), self.lng.deg())
    }
}

impl LatLng {
    pub fn new(lat: Angle, lng: Angle) -> Self {
        LatLng { lat, lng }
    }

    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Deg(lat).into(),
            lng: Deg(lng).into(),
        }
    }

    /// is_valid reports whether lat is in [-π/2, π/2] and lng in [-π, π].
    pub fn is_valid(&self) -> bool {
        self.lat.0.abs() <= PI / 2. && self.lng.0.abs() <= PI
    }

    /// normalized clamps the latitude to [-π/2, π/2] and wraps the longitude
    /// into [-π, π].
    pub fn normalized(&self) -> Self {
        let lat = if self.lat.0 > NORTH_POLE_LAT.0 {
            NORTH_POLE_LAT
        } else if self.lat.0 < SOUTH_POLE_LAT.0 {
            SOUTH_POLE_LAT
        } else {
            self.lat
        };

        LatLng {
            lat,
            lng: Angle(remainder(self.lng.0, PI * 2.)),
        }
    }

    /// distance returns the angle between two LatLngs with the haversine formula.
    pub fn distance(&self, other: &Self) -> Angle {
        let dlat = (0.5 * (other.lat.0 - self.lat.0)).sin();
        let dlng = (0.5 * (other.lng.0 - self.lng.0)).sin();

        let x = dlat * dlat + dlng * dlng * self.lat.0.cos() * other.lat.0.cos();
        Angle(2. * x.sqrt().atan2((1. - x).max(0.).sqrt()))
    }
}

impl Point {
    pub fn latitude(&self) -> Angle {
        let v = &self.0;
        let l = (v.x * v.x + v.y * v.y).sqrt();
        Angle(v.z.atan2(l))
    }

    pub fn longitude(&self) -> Angle {
        let v = &self.0;
        Angle(v.y.atan2(v.x))
    }
}

impl From<LatLng> for Point {
    fn from(ll: LatLng) -> Self {
        let phi = ll.lat.0;
        let theta = ll.lng.0;
        let cosphi = phi.cos();
        Point(Vector::xyz(theta.cos() * cosphi, theta.sin() * cosphi, phi.sin()))
    }
}

impl<'a> From<&'a Point> for LatLng {
    fn from(p: &'a Point) -> Self {
        LatLng {
            lat: p.latitude(),
            lng: p.longitude(),
        }
    }
}
impl From<Point> for LatLng {
    fn from(p: Point) -> Self {
        LatLng::from(&p)
    }
}
