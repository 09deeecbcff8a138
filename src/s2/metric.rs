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

use std::f64::consts::{PI, SQRT_2};

use float_extras::f64::ilogb;

use crate::s2::cellid::MAX_LEVEL;

/// Metric is a measure for cells. It is used to describe the shape and size
/// of cells. They are useful for deciding which cell level to use in order to
/// satisfy a given condition (e.g. that cell vertices must be no further
/// than "x" apart). Metrics describe both lengths (dim == 1) and areas
/// (dim == 2).
///
/// The values are for the quadratic projection, and are expressed in terms
/// of the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metric {
    /// Dimension of the metric: 1 for lengths, 2 for areas.
    pub dim: u8,
    /// Scaling factor for the metric.
    pub deriv: f64,
}

/// MIN_WIDTH is a lower bound on the minimum width of any cell at a level.
/// Any disc of diameter at most MIN_WIDTH.value(k) is covered by the cell at
/// level k containing its center together with that cell's neighbors.
pub const MIN_WIDTH: Metric = Metric {
    dim: 1,
    deriv: 2. * SQRT_2 / 3.,
};

pub const AVG_AREA: Metric = Metric {
    dim: 2,
    deriv: 4. * PI / 6.,
};
pub const MIN_AREA: Metric = Metric {
    dim: 2,
    deriv: 8. * SQRT_2 / 9.,
};
pub const MAX_AREA: Metric = Metric {
    dim: 2,
    deriv: 2.635799256963161491,
};

impl Metric {
    /// value returns the value of the metric at the given level.
    pub fn value(&self, level: u64) -> f64 {
        self.deriv * 2f64.powi(-(self.dim as i32) * (level as i32))
    }

    /// min_level returns the minimum level such that the metric is at most
    /// the given value, or MAX_LEVEL if there is no such level.
    ///
    /// For example, MIN_WIDTH.min_level(0.1) returns the minimum level such
    /// that all cell widths are at most 0.1.
    pub fn min_level(&self, val: f64) -> u64 {
        if val <= 0. {
            return MAX_LEVEL;
        }

        let level = -(ilogb(val / self.deriv) as i64 >> (self.dim - 1));
        level.max(0).min(MAX_LEVEL as i64) as u64
    }

    /// max_level returns the maximum level such that the metric is at least
    /// the given value, or zero if there is no such level.
    ///
    /// For example, MIN_WIDTH.max_level(0.1) returns the maximum level such
    /// that all cells have a minimum width of 0.1 or larger.
    pub fn max_level(&self, val: f64) -> u64 {
        if val <= 0. {
            return MAX_LEVEL;
        }

        let level = ilogb(self.deriv / val) as i64 >> (self.dim - 1);
        level.max(0).min(MAX_LEVEL as i64) as u64
    }
}
