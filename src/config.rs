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

//! Parameter sets for the tunable cell union operations.
//!
//! Both structs validate on use, so a config deserialized from user input
//! fails with an `Error` rather than producing a malformed union.

use crate::error::{Error, Result};
use crate::s1::angle::{Angle, Deg};
use crate::s2::cellid::MAX_LEVEL;

/// Parameters for `CellUnion::expand_with`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpandConfig {
    /// Minimum distance, in degrees, by which every point of the union is
    /// grown. Default: 0 (expand by one ring of neighbor cells only).
    pub min_radius_degrees: f64,

    /// How many levels finer than the coarsest input cell the neighbor
    /// cells may be. Default: 4
    pub max_level_diff: u64,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            min_radius_degrees: 0.,
            max_level_diff: 4,
        }
    }
}

impl ExpandConfig {
    /// Set the minimum expansion radius.
    pub fn with_min_radius(mut self, radius: Angle) -> Self {
        self.min_radius_degrees = radius.deg();
        self
    }

    /// Set the maximum level difference.
    pub fn with_max_level_diff(mut self, max_level_diff: u64) -> Self {
        self.max_level_diff = max_level_diff;
        self
    }

    pub fn min_radius(&self) -> Angle {
        Deg(self.min_radius_degrees).into()
    }
}

/// Parameters for `CellUnion::denormalize_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenormalizeConfig {
    /// Cells coarser than this level are replaced by their descendants.
    /// Default: 0
    pub min_level: u64,

    /// Output levels are min_level plus a multiple of this value (1..=3).
    /// Default: 1
    pub level_mod: u64,
}

impl Default for DenormalizeConfig {
    fn default() -> Self {
        Self {
            min_level: 0,
            level_mod: 1,
        }
    }
}

impl DenormalizeConfig {
    pub fn new(min_level: u64, level_mod: u64) -> Self {
        Self {
            min_level,
            level_mod,
        }
    }

    pub fn with_min_level(mut self, min_level: u64) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_level_mod(mut self, level_mod: u64) -> Self {
        self.level_mod = level_mod;
        self
    }

    /// validate checks that min_level is a cell level and level_mod is 1, 2 or 3.
    pub fn validate(&self) -> Result<()> {
        if self.min_level > MAX_LEVEL {
            return Err(Error::InvalidLevel(self.min_level));
        }
        if !(1..=3).contains(&self.level_mod) {
            return Err(Error::InvalidLevelMod(self.level_mod));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_eq;

    #[test]
    fn test_expand_config_builder() {
        let cfg = ExpandConfig::default()
            .with_min_radius(Deg(0.5).into())
            .with_max_level_diff(7);
        assert!(f64_eq(cfg.min_radius_degrees, 0.5));
        assert!(f64_eq(cfg.min_radius().deg(), 0.5));
        assert_eq!(cfg.max_level_diff, 7);
    }

    #[test]
    fn test_denormalize_config_validate() {
        assert_eq!(DenormalizeConfig::default().validate(), Ok(()));
        assert_eq!(DenormalizeConfig::new(30, 3).validate(), Ok(()));
        assert_eq!(
            DenormalizeConfig::default().with_min_level(31).validate(),
            Err(Error::InvalidLevel(31))
        );
        assert_eq!(
            DenormalizeConfig::default().with_level_mod(0).validate(),
            Err(Error::InvalidLevelMod(0))
        );
        assert_eq!(
            DenormalizeConfig::default().with_level_mod(4).validate(),
            Err(Error::InvalidLevelMod(4))
        );
    }
}
