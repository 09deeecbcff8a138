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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::s2::cellid::*;
use crate::s2::point::Point;

pub fn rng() -> StdRng {
    StdRng::from_entropy()
}

/// skewed_int returns a number in the range [0,2^max_log-1] with bias towards smaller numbers.
pub fn skewed_int<R: Rng>(rng: &mut R, max_log: u32) -> u64 {
    let base = rng.gen_range(0..=max_log);
    rng.gen::<u64>() & ((1u64 << base) - 1)
}

/// one_in returns true with probability 1/n.
pub fn one_in<R: Rng>(rng: &mut R, n: u32) -> bool {
    rng.gen_range(0..n) == 0
}

/// point returns a random unit-length vector.
pub fn point<R: Rng>(rng: &mut R) -> Point {
    Point::from_coords(
        rng.gen_range(-1f64..1.),
        rng.gen_range(-1f64..1.),
        rng.gen_range(-1f64..1.),
    )
}

pub fn cellid<R: Rng>(rng: &mut R) -> CellID {
    let level = rng.gen_range(0..=MAX_LEVEL);
    cellid_for_level(rng, level)
}

pub fn cellid_for_level<R: Rng>(rng: &mut R, level: u64) -> CellID {
    let face = rng.gen_range(0..NUM_FACES as u64);
    let pos = rng.next_u64() & ((1 << POS_BITS) - 1);
    let cellid = CellID::from_face_pos_level(face, pos, level);
    assert_eq!(face, cellid.face() as u64);
    assert_eq!(level, cellid.level());

    cellid
}
