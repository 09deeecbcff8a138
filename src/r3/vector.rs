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
use crate::s1::angle::Angle;

/// Vector is a point in ℝ³. Cell centers, cell vertices and cap centers are
/// all carried around as vectors before they are wrapped as sphere points.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ops::Add<Vector> for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Self::Output {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl ops::Sub<Vector> for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Self::Output {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, m: f64) -> Self::Output {
        Vector {
            x: self.x * m,
            y: self.y * m,
            z: self.z * m,
        }
    }
}

impl ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        self * -1.
    }
}

impl Vector {
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0. && self.z == 0.
    }

    pub fn approx_eq(&self, other: &Vector) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    /// normalize returns a unit vector in the same direction. The zero vector
    /// is returned unchanged.
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            *self * (1.0 / self.norm())
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn is_unit(&self) -> bool {
        const EPSILON2: f64 = 5e-14;
        (self.norm2() - 1.).abs() < EPSILON2
    }

    pub fn abs(&self) -> Self {
        Vector {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    pub fn angle(&self, other: &Self) -> Angle {
        Angle(self.cross(other).norm().atan2(self.dot(other)))
    }

    /// largest_component returns the axis with the largest absolute value.
    /// Ties resolve toward Z, then Y.
    pub fn largest_component(&self) -> Axis {
        let a = self.abs();
        if a.x > a.y {
            if a.x > a.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if a.y > a.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Axis {
    X,
    Y,
    Z,
}
