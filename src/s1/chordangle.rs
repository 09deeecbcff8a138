/*
Copyright 2015 Google Inc. All rights reserved.
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

use crate::s1::angle::Angle;

/// ChordAngle represents the angle subtended by a chord (i.e., the straight
/// line segment connecting two points on the sphere). It is stored as the
/// squared chord length, which ranges from 0 to 4, so comparing distances
/// needs no trigonometry. Caps store their radius this way.
///
/// Only angles in [0, π] are representable. The representation of (π - x)
/// radians has an error of about (1e-15 / x).
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordAngle(pub f64);

/// NEGATIVE is smaller than the zero angle. Empty caps use it as their radius.
pub const NEGATIVE: ChordAngle = ChordAngle(-1f64);

/// RIGHT represents a chord angle of 90 degrees (a "right angle").
pub const RIGHT: ChordAngle = ChordAngle(2f64);

/// STRAIGHT represents a chord angle of 180 degrees (a "straight angle").
/// This is the maximum finite chord angle.
pub const STRAIGHT: ChordAngle = ChordAngle(4f64);

impl<'a> From<&'a Angle> for ChordAngle {
    fn from(a: &'a Angle) -> Self {
        if a.0 < 0. {
            NEGATIVE
        } else if a.is_infinite() {
            ChordAngle::inf()
        } else {
            let l = 2. * (0.5 * a.rad().min(PI)).sin();
            ChordAngle(l * l)
        }
    }
}

impl From<Angle> for ChordAngle {
    fn from(a: Angle) -> Self {
        ChordAngle::from(&a)
    }
}

impl<'a> From<&'a ChordAngle> for Angle {
    fn from(ca: &'a ChordAngle) -> Self {
        if ca.0 < 0. {
            Angle(-1.)
        } else if ca.is_infinite() {
            Angle::inf()
        } else {
            Angle(2. * (0.5 * ca.0.sqrt()).asin())
        }
    }
}

impl From<ChordAngle> for Angle {
    fn from(ca: ChordAngle) -> Self {
        Angle::from(&ca)
    }
}

impl ops::Add<ChordAngle> for ChordAngle {
    type Output = ChordAngle;
    /// adds two non-special chord angles, clamping the sum at 180 degrees.
    fn add(self, other: ChordAngle) -> Self::Output {
        if other.0 == 0.0 {
            self
        } else if self.0 + other.0 >= 4. {
            STRAIGHT
        } else {
            // With chord lengths a = 2*sin(A) and b = 2*sin(B), the sum follows
            // from sin(A+B) = sin(A)*cos(B) + sin(B)*cos(A).
            let x = self.0 * (1. - 0.25 * other.0);
            let y = other.0 * (1. - 0.25 * self.0);
            ChordAngle(4f64.min(x + y + 2. * (x * y).sqrt()))
        }
    }
}

impl ChordAngle {
    /// inf returns a chord angle larger than any finite chord angle.
    pub fn inf() -> Self {
        ChordAngle(std::f64::INFINITY)
    }

    pub fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    /// from_squared_length returns a ChordAngle from the squared chord length,
    /// clamped to a maximum of 4.0 to absorb roundoff.
    pub fn from_squared_length(length2: f64) -> Self {
        if length2 > 4. {
            STRAIGHT
        } else {
            ChordAngle(length2)
        }
    }

    /// is_special reports whether this ChordAngle is negative or infinite.
    pub fn is_special(&self) -> bool {
        self.0 < 0. || self.0.is_infinite()
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0. && self.0 <= 4. || self.is_special()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_eq;
    use crate::s1::angle::Deg;

    #[test]
    fn test_chordangle_from_angle() {
        for &a in &[0., 1., PI] {
            let got: Angle = ChordAngle::from(Angle(a)).into();
            assert!(f64_eq(got.rad(), a));
        }
        assert_eq!(ChordAngle::from(Angle(PI)), STRAIGHT);
        assert_eq!(ChordAngle::from(Angle(-1.)), NEGATIVE);
        assert!(Angle::from(ChordAngle::from(Angle::inf())).is_infinite());
    }

    #[test]
    fn test_chordangle_add() {
        let d30 = ChordAngle::from(Angle::from(Deg(30.)));
        let d60 = ChordAngle::from(Angle::from(Deg(60.)));
        let d90 = ChordAngle::from(Angle::from(Deg(90.)));
        let d120 = ChordAngle::from(Angle::from(Deg(120.)));
        let zero = ChordAngle(0.);

        assert_eq!(zero + zero, zero);
        assert_eq!(d60 + zero, d60);
        assert!(f64_eq((d30 + d60).0, d90.0));
        assert!(f64_eq((zero + d60).0, d60.0));
        assert_eq!(d120 + d90, STRAIGHT);
        assert_eq!(d90 + d90, STRAIGHT);
    }

    #[test]
    fn test_chordangle_special() {
        assert!(NEGATIVE.is_special());
        assert!(ChordAngle::inf().is_special());
        assert!(!RIGHT.is_special());
        assert!(RIGHT.is_valid());
        assert!(!ChordAngle(4.5).is_valid());
        assert_eq!(ChordAngle::from_squared_length(5.), STRAIGHT);
        assert!(NEGATIVE < ChordAngle(0.));
        assert!(STRAIGHT < ChordAngle::inf());
    }
}
