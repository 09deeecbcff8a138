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

use crate::s2::cap::Cap;
use crate::s2::cell::Cell;
use crate::s2::point::Point;
use crate::s2::rect::Rect;

/// A Region represents a two-dimensional region on the unit sphere.
///
/// The bounds need not be tight. Callers that need a quick rejection test
/// use the bounds first and the cell predicates after.
pub trait Region {
    /// cap_bound returns a bounding spherical cap. This is not guaranteed to
    /// be exact.
    fn cap_bound(&self) -> Cap;

    /// rect_bound returns a bounding latitude-longitude rectangle that
    /// contains the region. The bounds are not guaranteed to be tight.
    fn rect_bound(&self) -> Rect;

    /// contains_cell reports whether the region completely contains the
    /// given cell.
    fn contains_cell(&self, c: &Cell) -> bool;

    /// intersects_cell reports whether the region intersects the given cell
    /// or if the intersection cannot be determined cheaply.
    fn intersects_cell(&self, c: &Cell) -> bool;

    fn contains_point(&self, p: &Point) -> bool;
}
