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

//! Cell unions over the S2 hierarchical decomposition of the sphere.
//!
//! A `CellUnion` approximates a region as a set of 64-bit `CellID`s. Once
//! normalized it is sorted, free of nested cells and free of complete
//! sibling groups, which makes it the canonical cover of its region. On top
//! of that representation the crate offers containment and intersection
//! tests, union, intersection and difference, expansion by neighbor rings,
//! denormalization to a fixed set of levels, and area and bound aggregates.

#[macro_use]
extern crate lazy_static;

mod consts;

pub mod config;
pub mod error;

pub mod r1;
pub mod r2;
pub mod r3;

pub mod s1;

// export s2 modules directly
mod s2;
pub use crate::s2::*;

pub use crate::error::{Error, Result};
pub use crate::s2::cellid::CellID;
pub use crate::s2::cellunion::CellUnion;
