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

//! Rounding tolerances and small float helpers shared by the geometry modules.
//! The values match the ones used by the C++ library so results agree across
//! platforms.

/// EPSILON is a small number that represents a reasonable level of noise between two
/// values that can be considered to be equal.
pub const EPSILON: f64 = 1e-14;

/// DBL_EPSILON is a smaller number for values that require more precision.
pub const DBL_EPSILON: f64 = 2.220446049250313e-16;

/// f64_eq reports whether the two values are within the default epsilon.
#[cfg(test)]
pub fn f64_eq(x: f64, y: f64) -> bool {
    f64_near(x, y, EPSILON)
}

/// f64_near reports whether the two values are within the specified epsilon.
#[cfg(test)]
pub fn f64_near(x: f64, y: f64, eps: f64) -> bool {
    (x - y).abs() <= eps
}

/// remainder computes the IEEE 754 remainder of x / y, rounding the quotient
/// to the nearest integer.
pub fn remainder(x: f64, y: f64) -> f64 {
    let mut r = x.abs() % (2. * y);
    while r > (y / 2.) {
        r -= y;
        if r >= (y / 2.) {
            r -= y;
        }
    }
    if x < 0. {
        r = -r;
    }
    r
}

pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_remainder() {
        assert!(f64_eq(remainder(4., 2. * PI), 4. - 2. * PI));
        assert!(f64_eq(remainder(10., 2. * PI), 10. - 4. * PI));
        assert!(f64_eq(remainder(-4., 2. * PI), 2. * PI - 4.));
        assert!(f64_eq(remainder(1., 2. * PI), 1.));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-3i64, 0, 30), 0);
        assert_eq!(clamp(31i64, 0, 30), 30);
        assert_eq!(clamp(0.5, 0., 1.), 0.5);
    }
}
