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

/// Angle represents a 1D angle, stored in radians. Use the `Deg` and `Rad`
/// wrappers to convert from and to other units.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Debug)]
pub struct Angle(pub f64);

/// Rad is an angle expressed in radians.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Rad(pub f64);

/// Deg is an angle expressed in degrees.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Deg(pub f64);

impl Angle {
    pub fn rad(&self) -> f64 {
        self.0
    }

    pub fn deg(&self) -> f64 {
        self.0 * (180. / PI)
    }

    /// inf returns an angle larger than any finite angle.
    pub fn inf() -> Self {
        Angle(std::f64::INFINITY)
    }

    pub fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    pub fn abs(&self) -> Self {
        Angle(self.0.abs())
    }

    /// normalized returns an equivalent angle in (-π, π].
    pub fn normalized(&self) -> Self {
        let mut rad = crate::consts::remainder(self.0, 2. * PI);
        if rad <= -PI {
            rad = PI;
        }
        Angle(rad)
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl From<Rad> for Angle {
    fn from(r: Rad) -> Self {
        Angle(r.0)
    }
}

impl From<Deg> for Angle {
    fn from(d: Deg) -> Self {
        Angle(d.0 * (PI / 180.))
    }
}

impl From<Angle> for Rad {
    fn from(a: Angle) -> Self {
        Rad(a.0)
    }
}

impl From<Angle> for Deg {
    fn from(a: Angle) -> Self {
        Deg(a.deg())
    }
}

impl ops::Add<Angle> for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Self::Output {
        Angle(self.0 + other.0)
    }
}

impl ops::Sub<Angle> for Angle {
    type Output = Angle;
    fn sub(self, other: Angle) -> Self::Output {
        Angle(self.0 - other.0)
    }
}

impl ops::Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, m: f64) -> Self::Output {
        Angle(self.0 * m)
    }
}

impl ops::Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}
