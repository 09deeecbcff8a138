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

use std::fmt;
use std::str::FromStr;

use crate::consts::clamp;
use crate::error::{Error, Result};
use crate::r1;
use crate::r2;
use crate::r3::vector::Vector;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::stuv::*;

/// CellID uniquely identifies a cell in the S2 cell decomposition.
/// The most significant 3 bits encode the face number (0-5). The
/// remaining 61 bits encode the position of the center of this cell
/// along the Hilbert curve on that face. The zero value and the value
/// (1<<64)-1 are invalid cell IDs. The first compares less than any
/// valid cell ID, the second as greater than any valid cell ID.
///
/// Sequentially increasing cell IDs follow a continuous space-filling curve
/// over the entire sphere. They have the following properties:
///
///  - The ID of a cell at level k consists of a 3-bit face number followed
///    by k bit pairs that recursively select one of the four children of
///    each cell. The next bit is always 1, and all other bits are 0.
///    Therefore, the level of a cell is determined by the position of its
///    lowest-numbered bit that is turned on (for a cell at level k, this
///    position is 2 * (MAX_LEVEL - k)).
///
///  - The ID of a parent cell is at the midpoint of the range of IDs spanned
///    by its children (or by its descendants at any level).
///
/// All of the range arithmetic below is plain u64 integer math.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellID(pub u64);

const FACE_BITS: u64 = 3;
pub const NUM_FACES: u8 = 6;
pub const MAX_LEVEL: u64 = 30;
pub const POS_BITS: u64 = (2 * MAX_LEVEL) + 1;
pub const MAX_SIZE: u64 = 1 << MAX_LEVEL;

const MAX_SIZE_I32: i32 = MAX_SIZE as i32;
const MAX_SIZE_F64: f64 = MAX_SIZE as f64;

const LOOKUP_BITS: u64 = 4;
const INVERT_MASK: u8 = 0x02;

/// lsb_for_level returns the lowest set bit of any cell at the given level.
pub(crate) fn lsb_for_level(level: u64) -> u64 {
    1 << (2 * (MAX_LEVEL - level))
}

/// size_ij returns the edge length of a cell at the given level in (i,j) units.
pub(crate) fn size_ij(level: u64) -> u64 {
    1 << (MAX_LEVEL - level)
}

impl CellID {
    /// from_face_pos_level returns a cell given its face in the range
    /// [0,5], the 61-bit Hilbert curve position pos within that face, and
    /// the level in the range [0,MAX_LEVEL]. The position in the cell ID
    /// will be truncated to correspond to the Hilbert curve position at
    /// the center of the returned cell.
    pub fn from_face_pos_level(face: u64, pos: u64, level: u64) -> Self {
        CellID((face << POS_BITS) + (pos | 1)).parent(level)
    }

    /// from_face returns the cell corresponding to a given S2 cube face.
    pub fn from_face(face: u64) -> Self {
        CellID((face << POS_BITS) + lsb_for_level(0))
    }

    /// from_face_ij_wrap returns the leaf cell at (i,j) where the coordinates
    /// may lie up to one leaf beyond the face; those are wrapped onto the
    /// adjacent face.
    fn from_face_ij_wrap(face: u8, mut i: i32, mut j: i32) -> Self {
        // Clamping to just beyond the face boundary keeps the arithmetic
        // within i32 for the neighbors of a face cell.
        i = clamp(i, -1i32, MAX_SIZE_I32);
        j = clamp(j, -1i32, MAX_SIZE_I32);

        const SCALE: f64 = 1.0 / MAX_SIZE_F64;
        const LIMIT: f64 = 1f64 + std::f64::EPSILON;

        let u = clamp(SCALE * (2. * (i as f64) + 1. - MAX_SIZE_F64), -LIMIT, LIMIT);
        let v = clamp(SCALE * (2. * (j as f64) + 1. - MAX_SIZE_F64), -LIMIT, LIMIT);

        let (f, u, v) = xyz_to_face_uv(&face_uv_to_xyz(face, u, v));
        Self::from_face_ij(f, st_to_ij(0.5 * (u + 1.)), st_to_ij(0.5 * (v + 1.)))
    }

    /// from_face_ij returns a leaf cell given its cube face (range 0..5) and
    /// (i,j) coordinates.
    pub(crate) fn from_face_ij(f: u8, i: i32, j: i32) -> Self {
        let mut n = (f as u64) << (POS_BITS - 1);
        let mut bits = (f & SWAP_MASK) as i32;
        let mask = (1 << LOOKUP_BITS) - 1;

        for k in (0..8).rev() {
            bits += ((i >> (k * LOOKUP_BITS)) & mask) << (LOOKUP_BITS + 2);
            bits += ((j >> (k * LOOKUP_BITS)) & mask) << 2;
            bits = LOOKUP.pos[bits as usize] as i32;
            n |= ((bits >> 2) as u64) << (k * 2 * LOOKUP_BITS);
            bits &= (SWAP_MASK | INVERT_MASK) as i32;
        }
        CellID(n * 2 + 1)
    }

    fn from_face_ij_same(f: u8, i: i32, j: i32, same_face: bool) -> Self {
        if same_face {
            Self::from_face_ij(f, i, j)
        } else {
            Self::from_face_ij_wrap(f, i, j)
        }
    }

    /// try_from_token parses a hex token (as produced by to_token) into a cell.
    /// The token must be 1 to 16 hex digits.
    pub fn try_from_token(s: &str) -> Result<CellID> {
        if s.is_empty() || s.len() > 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidToken(s.to_string()));
        }
        let v = u64::from_str_radix(s, 16).map_err(|_| Error::InvalidToken(s.to_string()))?;
        Ok(CellID(v << (4 * (16 - s.len()))))
    }

    /// from_token returns a cell given a hex-encoded string of its uint64 ID.
    /// Malformed tokens (including "X") decode to the invalid CellID(0).
    pub fn from_token(s: &str) -> CellID {
        CellID::try_from_token(s).unwrap_or(CellID(0))
    }

    /// to_token returns a hex-encoded string of the uint64 cell id, with leading
    /// zeros included but trailing zeros stripped.
    pub fn to_token(&self) -> String {
        if self.0 == 0 {
            "X".into()
        } else {
            format!("{:016x}", self.0).trim_end_matches('0').into()
        }
    }

    /// is_valid reports whether ci represents a valid cell.
    pub fn is_valid(&self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & 0x1555555555555555 != 0)
    }

    /// face returns the cube face for this cell ID, in the range [0,5].
    pub fn face(&self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// pos returns the position along the Hilbert curve of this cell ID, in the range [0,2^POS_BITS-1].
    pub fn pos(&self) -> u64 {
        self.0 & ((!0u64) >> FACE_BITS)
    }

    /// level returns the subdivision level of this cell ID, in the range [0, MAX_LEVEL].
    pub fn level(&self) -> u64 {
        MAX_LEVEL - (self.0.trailing_zeros() >> 1) as u64
    }

    /// is_leaf returns whether this cell ID is at the deepest level.
    pub fn is_leaf(&self) -> bool {
        self.0 & 1 != 0
    }

    /// child_position returns the child position (0..3) of this cell's
    /// ancestor at the given level, relative to its parent. The argument
    /// should be in the range 1..=MAX_LEVEL.
    pub fn child_position(&self, level: u64) -> u64 {
        (self.0 >> (2 * (MAX_LEVEL - level) + 1)) & 3
    }

    /// parent returns the cell at the given level, which must be no greater than the current level.
    pub fn parent(&self, level: u64) -> Self {
        let lsb = lsb_for_level(level);
        CellID((self.0 & lsb.wrapping_neg()) | lsb)
    }

    /// immediate_parent is cheaper than parent, but assumes !self.is_face().
    pub fn immediate_parent(&self) -> Self {
        let nlsb = self.lsb() << 2;
        CellID((self.0 & nlsb.wrapping_neg()) | nlsb)
    }

    /// is_face returns whether this is a top-level (face) cell.
    pub fn is_face(&self) -> bool {
        (self.0 & (lsb_for_level(0) - 1)) == 0
    }

    /// lsb returns the least significant bit that is set.
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// children returns the four immediate children of this cell.
    /// If ci is a leaf cell, it returns four identical cells that are not the children.
    pub fn children(&self) -> [CellID; 4] {
        let mut lsb = self.lsb();
        let ch0 = self.0 - lsb + (lsb >> 2);
        lsb >>= 1;
        let ch1 = ch0 + lsb;
        let ch2 = ch1 + lsb;
        let ch3 = ch2 + lsb;

        [CellID(ch0), CellID(ch1), CellID(ch2), CellID(ch3)]
    }

    /// face_ij_orientation returns the face, the (i,j) coordinates of the
    /// cell's lower-left leaf, and the Hilbert curve orientation.
    pub(crate) fn face_ij_orientation(&self) -> (u8, i32, i32, u8) {
        let f = self.face();
        let mut i = 0i32;
        let mut j = 0i32;
        let mut orientation = (f & SWAP_MASK) as u64;
        let mut nbits = MAX_LEVEL - 7 * LOOKUP_BITS;

        for k in (0..8).rev() {
            orientation += ((self.0 >> (k * 2 * LOOKUP_BITS + 1)) & ((1 << (2 * nbits)) - 1)) << 2;
            orientation = LOOKUP.ij[orientation as usize];
            i += ((orientation as i32) >> (LOOKUP_BITS + 2)) << (k * LOOKUP_BITS);
            j += (((orientation as i32) >> 2) & ((1 << LOOKUP_BITS) - 1)) << (k * LOOKUP_BITS);
            orientation &= (SWAP_MASK | INVERT_MASK) as u64;
            nbits = LOOKUP_BITS;
        }

        if self.lsb() & 0x1111111111111110 != 0 {
            orientation ^= SWAP_MASK as u64;
        }
        (f, i, j, orientation as u8)
    }

    /// all_neighbors returns all neighbors of this cell at the given level. Two
    /// cells X and Y are neighbors if their boundaries intersect but their
    /// interiors do not. In particular, two cells that intersect at a single
    /// point are neighbors. For cells adjacent to a face vertex the same
    /// neighbor may be returned more than once.
    ///
    /// This requires level >= self.level().
    pub fn all_neighbors(&self, level: u64) -> Vec<CellID> {
        let mut neighbors = Vec::new();

        let (face, mut i, mut j, _) = self.face_ij_orientation();

        // Snap (i,j) to the lower-left leaf of this cell.
        let size = size_ij(self.level()) as i32;
        i &= -size;
        j &= -size;

        let nbr_size = size_ij(level) as i32;

        // Walk around the boundary; k runs along each edge including corners.
        let mut k = -nbr_size;
        loop {
            let same_face = if k < 0 {
                (j + k) >= 0
            } else if k >= size {
                (j + k) < MAX_SIZE_I32
            } else {
                // Top and bottom neighbors.
                neighbors.push(
                    CellID::from_face_ij_same(face, i + k, j - nbr_size, j - size >= 0)
                        .parent(level),
                );
                neighbors.push(
                    CellID::from_face_ij_same(face, i + k, j + size, j + size < MAX_SIZE_I32)
                        .parent(level),
                );
                true
            };

            // Left, right and diagonal neighbors.
            neighbors.push(
                CellID::from_face_ij_same(face, i - nbr_size, j + k, same_face && i - size >= 0)
                    .parent(level),
            );
            neighbors.push(
                CellID::from_face_ij_same(face, i + size, j + k, same_face && i + size < MAX_SIZE_I32)
                    .parent(level),
            );

            if k >= size {
                break;
            }
            k += nbr_size;
        }

        neighbors
    }

    /// range_min returns the minimum CellID that is contained within this cell.
    pub fn range_min(&self) -> Self {
        CellID(self.0.wrapping_sub(self.lsb().wrapping_sub(1)))
    }

    /// range_max returns the maximum CellID that is contained within this cell.
    pub fn range_max(&self) -> Self {
        CellID(self.0.wrapping_add(self.lsb().wrapping_sub(1)))
    }

    /// contains returns true iff the CellID contains other.
    pub fn contains(&self, other: &CellID) -> bool {
        self.range_min() <= *other && *other <= self.range_max()
    }

    /// intersects returns true iff the CellID intersects other.
    pub fn intersects(&self, other: &CellID) -> bool {
        other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
    }

    /// face_siti returns the Face/Si/Ti coordinates of the center of the cell.
    fn face_siti(&self) -> (u8, i32, i32) {
        let (face, i, j, _) = self.face_ij_orientation();
        let delta = if self.is_leaf() {
            1
        } else if (i ^ (self.0 as i32 >> 2)) & 1 != 0 {
            2
        } else {
            0
        };
        (face, 2 * i + delta, 2 * j + delta)
    }

    /// raw_point returns the unnormalized direction of the cell center.
    pub(crate) fn raw_point(&self) -> Vector {
        let (face, si, ti) = self.face_siti();
        face_uv_to_xyz(
            face,
            st_to_uv(siti_to_st(si as u64)),
            st_to_uv(siti_to_st(ti as u64)),
        )
    }

    /// child_begin returns the first child in a traversal of the children of this cell, in Hilbert curve order.
    pub fn child_begin(&self) -> Self {
        let ol = self.lsb();
        CellID(self.0 - ol + (ol >> 2))
    }

    /// child_begin_at_level returns the first cell in a traversal of children a given level deeper than this cell, in
    /// Hilbert curve order. The given level must be no smaller than the cell's level.
    pub fn child_begin_at_level(&self, level: u64) -> Self {
        debug_assert!(self.level() <= level);
        CellID(self.0 - self.lsb() + lsb_for_level(level))
    }

    /// child_end returns the first cell after a traversal of the children of this cell in Hilbert curve order.
    /// The returned cell may be invalid.
    pub fn child_end(&self) -> Self {
        let ol = self.lsb();
        CellID(self.0.wrapping_add(ol + (ol >> 2)))
    }

    /// child_end_at_level returns the first cell after the last child in a traversal of children a given level deeper
    /// than this cell, in Hilbert curve order.
    /// The given level must be no smaller than the cell's level.
    /// The returned cell may be invalid.
    pub fn child_end_at_level(&self, level: u64) -> Self {
        debug_assert!(self.level() <= level);
        CellID(self.0.wrapping_add(self.lsb() + lsb_for_level(level)))
    }

    /// next returns the next cell along the Hilbert curve.
    /// This is expected to be used with child_begin and child_end,
    /// or child_begin_at_level and child_end_at_level.
    pub fn next(&self) -> Self {
        CellID(self.0.wrapping_add(self.lsb() << 1))
    }

    /// prev returns the previous cell along the Hilbert curve.
    pub fn prev(&self) -> Self {
        CellID(self.0.wrapping_sub(self.lsb() << 1))
    }

    /// max_tile returns the largest cell with the same range_min such that
    /// range_max < limit.range_min. It returns limit if no such cell exists.
    /// Tiling the half-open leaf range [start, limit) with the fewest cells is
    /// then a walk of `id = id.next().max_tile(limit)` from `start.max_tile(limit)`
    /// until `id == limit`.
    pub fn max_tile(&self, limit: &Self) -> Self {
        let mut s = *self;
        let start = s.range_min();
        if start >= limit.range_min() {
            return *limit;
        }

        if s.range_max() >= *limit {
            // The cell is too large, shrink it.
            loop {
                s = s.children()[0];
                if s.range_max() < *limit {
                    return s;
                }
            }
        }

        // The cell may be too small, grow it while the range still fits.
        while !s.is_face() {
            let parent = s.immediate_parent();
            if parent.range_min() != start || parent.range_max() >= *limit {
                break;
            }
            s = parent;
        }
        s
    }

    pub fn child_iter(&self) -> CellIDIter {
        CellIDIter {
            cur: self.child_begin(),
            end: self.child_end(),
        }
    }

    /// child_iter_at_level iterates the descendants of this cell at the
    /// given level, in Hilbert curve order.
    pub fn child_iter_at_level(&self, level: u64) -> CellIDIter {
        CellIDIter {
            cur: self.child_begin_at_level(level),
            end: self.child_end_at_level(level),
        }
    }
}

/// ij_to_stmin converts the i- or j-index of a leaf cell to the minimum corresponding
/// s- or t-value contained by that cell. The argument must be in the range
/// [0..2**30], i.e. up to one position beyond the normal range of valid leaf
/// cell indices.
fn ij_to_stmin(i: i32) -> f64 {
    (i as f64) / MAX_SIZE_F64
}

/// st_to_ij converts value in ST coordinates to a value in IJ coordinates.
fn st_to_ij(s: f64) -> i32 {
    clamp((MAX_SIZE_F64 * s).floor() as i32, 0, MAX_SIZE_I32 - 1)
}

impl fmt::Debug for CellID {
    /// formats the face followed by the child position at each level, e.g. "5/31200".
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Invalid({:#x})", self.0);
        }
        write!(f, "{}/", self.face())?;
        for level in 1..=self.level() {
            write!(f, "{}", self.child_position(level))?;
        }
        Ok(())
    }
}

impl fmt::Display for CellID {
    /// formats the raw 64-bit value in decimal, the form FromStr accepts.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CellID {
    type Err = Error;

    /// parses the decimal string form of the 64-bit id. The value is not
    /// checked for validity.
    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u64>().map(CellID).map_err(|source| Error::ParseCellId {
            value: s.to_string(),
            source,
        })
    }
}

impl From<u64> for CellID {
    fn from(v: u64) -> Self {
        CellID(v)
    }
}

impl From<CellID> for Point {
    /// returns the center of the s2 cell on the sphere as a Point.
    fn from(id: CellID) -> Self {
        Point::from(&id)
    }
}
impl<'a> From<&'a CellID> for Point {
    fn from(id: &'a CellID) -> Self {
        Point(id.raw_point().normalize())
    }
}

impl From<CellID> for LatLng {
    /// returns the center of the s2 cell on the sphere as a LatLng.
    fn from(id: CellID) -> Self {
        LatLng::from(&id)
    }
}
impl<'a> From<&'a CellID> for LatLng {
    fn from(id: &'a CellID) -> Self {
        LatLng::from(Point::from(id))
    }
}

impl From<LatLng> for CellID {
    fn from(ll: LatLng) -> Self {
        let p: Point = ll.into();
        Self::from(p)
    }
}

impl<'a> From<&'a Point> for CellID {
    /// returns the leaf cell containing p. Points on a cell boundary map
    /// deterministically to one of the adjacent cells.
    fn from(p: &'a Point) -> Self {
        let (f, u, v) = xyz_to_face_uv(&p.0);
        let i = st_to_ij(uv_to_st(u));
        let j = st_to_ij(uv_to_st(v));
        CellID::from_face_ij(f, i, j)
    }
}
impl From<Point> for CellID {
    fn from(p: Point) -> Self {
        CellID::from(&p)
    }
}

/// CellIDIter walks cells of one level along the Hilbert curve, stopping at
/// an exclusive end cell.
pub struct CellIDIter {
    cur: CellID,
    end: CellID,
}

impl Iterator for CellIDIter {
    type Item = CellID;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.end {
            None
        } else {
            let res = self.cur;
            self.cur = self.cur.next();
            Some(res)
        }
    }
}

const POS_TO_IJ: [[u8; 4]; 4] = [[0, 1, 3, 2], [0, 2, 3, 1], [3, 2, 0, 1], [3, 1, 0, 2]];
const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];

/// Lookup maps 4-level chunks of (i,j) to Hilbert positions and back, for
/// every starting orientation.
struct Lookup {
    pos: Vec<u64>,
    ij: Vec<u64>,
}

lazy_static! {
    static ref LOOKUP: Lookup = {
        let size = 1 << (2 * LOOKUP_BITS + 2);
        let mut lookup = Lookup {
            pos: vec![0; size],
            ij: vec![0; size],
        };
        for &orientation in &[0, SWAP_MASK, INVERT_MASK, SWAP_MASK | INVERT_MASK] {
            init_lookup_cell(0, 0, 0, orientation, 0, orientation, &mut lookup);
        }
        lookup
    };
}

fn init_lookup_cell(
    level: u64,
    i: i32,
    j: i32,
    orig_orientation: u8,
    pos: usize,
    orientation: u8,
    lookup: &mut Lookup,
) {
    if level == LOOKUP_BITS {
        let ij = ((i << LOOKUP_BITS) + j) as usize;
        lookup.pos[(ij << 2) + orig_orientation as usize] = (pos << 2) as u64 + orientation as u64;
        lookup.ij[(pos << 2) + orig_orientation as usize] = (ij << 2) as u64 + orientation as u64;
        return;
    }

    let r = &POS_TO_IJ[orientation as usize];
    for (idx, &sub) in r.iter().enumerate() {
        init_lookup_cell(
            level + 1,
            (i << 1) + (sub >> 1) as i32,
            (j << 1) + (sub & 1) as i32,
            orig_orientation,
            (pos << 2) + idx,
            orientation ^ POS_TO_ORIENTATION[idx],
            lookup,
        )
    }
}

/// ij_level_to_bound_uv returns the bounds in (u,v)-space for the cell at the given
/// level containing the leaf cell with the given (i,j)-coordinates.
pub fn ij_level_to_bound_uv(i: i32, j: i32, level: u64) -> r2::rect::Rect {
    let cell_size = size_ij(level) as i32;
    let x_lo = i & -cell_size;
    let y_lo = j & -cell_size;

    r2::rect::Rect {
        x: r1::interval::Interval {
            lo: st_to_uv(ij_to_stmin(x_lo)),
            hi: st_to_uv(ij_to_stmin(x_lo + cell_size)),
        },
        y: r1::interval::Interval {
            lo: st_to_uv(ij_to_stmin(y_lo)),
            hi: st_to_uv(ij_to_stmin(y_lo + cell_size)),
        },
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::s1::angle::{Angle, Deg};
    use crate::s2::random;
    use rand::Rng;

    #[test]
    fn test_cellid_from_face() {
        for face in 0..6 {
            let fpl = CellID::from_face_pos_level(face, 0, 0);
            let f = CellID::from_face(face);
            assert_eq!(fpl, f);
            assert!(f.is_face());
            assert_eq!(f.level(), 0);
        }
    }

    #[test]
    fn test_cellid_parent_child_relationships() {
        let ci = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);
        assert!(ci.is_valid());
        assert_eq!(ci.face(), 3);
        assert_eq!(ci.pos(), 0x12345700);
        assert_eq!(ci.level(), 26);
        assert!(!ci.is_leaf());

        assert_eq!(ci.child_begin_at_level(ci.level() + 2).pos(), 0x12345610);
        assert_eq!(ci.child_begin().pos(), 0x12345640);
        assert_eq!(ci.children()[0].pos(), 0x12345640);
        assert_eq!(ci.immediate_parent().pos(), 0x12345400);
        assert_eq!(ci.parent(ci.level() - 2).pos(), 0x12345000);

        assert!(ci.child_begin() < ci);
        assert!(ci.child_end() > ci);
        assert_eq!(ci.child_end(), ci.child_begin().next().next().next().next());
        assert_eq!(ci.child_begin().next().prev(), ci.child_begin());

        assert_eq!(ci.range_min(), ci.child_begin_at_level(MAX_LEVEL));
        assert_eq!(ci.range_max().next(), ci.child_end_at_level(MAX_LEVEL));
        assert_eq!(ci.child_iter().collect::<Vec<_>>(), ci.children().to_vec());
        assert_eq!(ci.child_iter_at_level(ci.level() + 2).count(), 16);
    }

    fn test_cellid_containment_case(
        x: &CellID,
        y: &CellID,
        x_contains_y: bool,
        y_contains_x: bool,
        x_intersects_y: bool,
    ) {
        assert_eq!(x.contains(y), x_contains_y);
        assert_eq!(y.contains(x), y_contains_x);
        assert_eq!(x.intersects(y), x_intersects_y);
        assert_eq!(y.intersects(x), x_intersects_y);
    }

    #[test]
    fn test_cellid_containment() {
        let a = CellID(0x80855c0000000000); // Pittsburg
        let b = CellID(0x80855d0000000000); // child of a
        let c = CellID(0x80855dc000000000); // child of b
        let d = CellID(0x8085630000000000); // part of Pittsburg disjoint from a

        test_cellid_containment_case(&a, &a, true, true, true);
        test_cellid_containment_case(&a, &b, true, false, true);
        test_cellid_containment_case(&a, &c, true, false, true);
        test_cellid_containment_case(&a, &d, false, false, false);
        test_cellid_containment_case(&b, &c, true, false, true);
        test_cellid_containment_case(&b, &d, false, false, false);
        test_cellid_containment_case(&c, &d, false, false, false);

        // Adjacent siblings touch along the curve but do not intersect.
        let kids = a.children();
        test_cellid_containment_case(&kids[0], &kids[1], false, false, false);
        assert_eq!(kids[0].range_max().next(), kids[1].range_min());
    }

    #[test]
    fn test_cellid_debug_string() {
        let ci = CellID(0xbb04000000000000);
        assert_eq!(format!("{:?}", ci), "5/31200");
        assert_eq!(format!("{:?}", CellID(0)), "Invalid(0x0)");
    }

    fn test_cellid_latlng_case(ci: CellID, lat: f64, lng: f64) {
        let ll = LatLng::new(Deg(lat).into(), Deg(lng).into());
        let l2: LatLng = ci.into();

        let distance = ll.distance(&l2);
        assert!(distance < Angle::from(Deg(1.0e-9)));

        let ci2: CellID = ll.into();
        assert_eq!(ci, ci2);
    }

    #[test]
    fn test_cellid_latlng() {
        test_cellid_latlng_case(CellID(0x47a1cbd595522b39), 49.703498679, 11.770681595);
        test_cellid_latlng_case(CellID(0x46525318b63be0f9), 55.685376759, 12.588490937);
        test_cellid_latlng_case(CellID(0x52b30b71698e729d), 45.486546517, -93.449700022);
        test_cellid_latlng_case(CellID(0x3663f18a24cbe857), 34.364439040, 108.330699969);
        test_cellid_latlng_case(CellID(0x10a06c0a948cf5d), -30.694551352, -30.048758753);
        test_cellid_latlng_case(CellID(0xb09dff882a7809e1), -75.000000031, 0.000000133);
        test_cellid_latlng_case(CellID(0x94daa3d000000001), -24.694439215, -47.537363213);
        test_cellid_latlng_case(CellID(0xb112966aaaaaaaab), -69.219262171, 49.670072392);
    }

    #[test]
    fn test_cellid_same_level_neighbors() {
        // Away from face edges the eight same-level neighbors are the
        // surrounding cells of the (i,j) grid.
        let mut rng = random::rng();
        for _ in 0..200 {
            let level = rng.gen_range(2..=MAX_LEVEL);
            let id = random::cellid_for_level(&mut rng, level);
            let (f, i, j, _) = id.face_ij_orientation();
            let size = size_ij(level) as i32;
            let (i, j) = (i & -size, j & -size);
            if i < size || j < size || i + 2 * size > MAX_SIZE_I32 || j + 2 * size > MAX_SIZE_I32 {
                continue;
            }

            let mut want = Vec::new();
            for di in -1..=1 {
                for dj in -1..=1 {
                    if di != 0 || dj != 0 {
                        want.push(CellID::from_face_ij(f, i + di * size, j + dj * size).parent(level));
                    }
                }
            }
            let mut got = id.all_neighbors(level);
            got.sort();
            got.dedup();
            want.sort();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_cellid_face_neighbors() {
        // A face touches the four faces other than itself and its opposite.
        for face in 0..6u64 {
            let mut got: Vec<u8> = CellID::from_face(face)
                .all_neighbors(0)
                .iter()
                .map(|c| {
                    assert!(c.is_face());
                    c.face()
                })
                .collect();
            got.sort();
            got.dedup();
            let want: Vec<u8> = (0..6u8)
                .filter(|&f| f as u64 != face && f as u64 != (face + 3) % 6)
                .collect();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_cellid_finer_neighbors_touch() {
        let mut rng = random::rng();
        for _ in 0..50 {
            let start = rng.gen_range(0..20);
            let id = random::cellid_for_level(&mut rng, start);
            let level = id.level() + rng.gen_range(0..4);
            for nbr in id.all_neighbors(level) {
                assert_eq!(nbr.level(), level);
                assert!(!id.intersects(&nbr));
            }
        }
    }

    fn test_cellid_tokens_case(s: &str, id: CellID) {
        assert_eq!(CellID::from_token(s), id);
        assert_eq!(CellID::try_from_token(s), Ok(id));
        assert_eq!(s, id.to_token());
    }

    #[test]
    fn test_cellid_tokens_nominal() {
        test_cellid_tokens_case("1", CellID(0x1000000000000000));
        test_cellid_tokens_case("3", CellID(0x3000000000000000));
        test_cellid_tokens_case("094", CellID(0x0940000000000000));
        test_cellid_tokens_case("3fec", CellID(0x3fec000000000000));
        test_cellid_tokens_case("52b8c", CellID(0x52b8c00000000000));
        test_cellid_tokens_case("2a724f", CellID(0x2a724f0000000000));
        test_cellid_tokens_case("b675785", CellID(0xb675785000000000));
        test_cellid_tokens_case("40cd6124", CellID(0x40cd612400000000));
        test_cellid_tokens_case("08f569b5c", CellID(0x08f569b5c0000000));
        test_cellid_tokens_case("96f48d8c39", CellID(0x96f48d8c39000000));
        test_cellid_tokens_case("0bca3c7f74c", CellID(0x0bca3c7f74c00000));
        test_cellid_tokens_case("4e7887ec1801", CellID(0x4e7887ec18010000));
        test_cellid_tokens_case("90aba04afe0c5", CellID(0x90aba04afe0c5000));
        test_cellid_tokens_case("6fa47550938183", CellID(0x6fa4755093818300));
        test_cellid_tokens_case("aa80a565df5e7fc", CellID(0xaa80a565df5e7fc0));
        test_cellid_tokens_case("48a23db9c2963e5b", CellID(0x48a23db9c2963e5b));
    }

    #[test]
    fn test_cellid_tokens_error_case() {
        assert_eq!("X", CellID(0).to_token());
        assert_eq!(CellID(0), CellID::from_token("X"));

        assert_eq!(CellID(0), CellID::from_token("876b e99"));
        assert_eq!(CellID(0), CellID::from_token("876bee99\n"));
        assert_eq!(CellID(0), CellID::from_token("876[ee99"));
        assert_eq!(CellID(0), CellID::from_token(" 876bee99"));

        for bad in &["", "X", "+1", "876b e99", "1234567890abcdef0"] {
            assert_eq!(
                CellID::try_from_token(bad),
                Err(Error::InvalidToken(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_cellid_from_str() {
        let id = CellID::from_face(2).child_begin_at_level(10);
        assert_eq!(id.to_string().parse::<CellID>().unwrap(), id);
        assert_eq!("3458764513820540928".parse::<CellID>().unwrap(), CellID::from_face(1));
        assert!(matches!(
            "12a".parse::<CellID>(),
            Err(Error::ParseCellId { ref value, .. }) if value == "12a"
        ));
        assert!("-1".parse::<CellID>().is_err());
        assert!("18446744073709551616".parse::<CellID>().is_err());
    }

    #[test]
    fn test_cellid_max_tile() {
        let mut rng = random::rng();
        for _ in 0..200 {
            let level = rng.gen_range(0..=25);
            let id = random::cellid_for_level(&mut rng, level);

            // Limit is the start of the next cell: the cell itself is the tile.
            assert_eq!(id.max_tile(&id.range_max().next()), id);
            assert_eq!(id.child_begin_at_level(MAX_LEVEL).max_tile(&id.range_max().next()), id);

            // A limit just before the end forces the first child or deeper.
            let limit = id.range_max();
            let tile = id.max_tile(&limit);
            assert_eq!(tile.range_min(), id.range_min());
            assert!(tile.range_max() < limit);
            assert!(id.contains(&tile));

            // A limit at or before the start yields the limit.
            assert_eq!(id.max_tile(&id.range_min()), id.range_min());
        }
    }

    fn test_approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-14);
    }

    macro_rules! P {
        ($x: expr, $y: expr) => {
            r2::point::Point::new($x as f64, $y as f64)
        };
    }

    fn test_ij_level_to_bound_uv_case(i: i32, j: i32, level: u64, points: &[r2::point::Point]) {
        let uv = ij_level_to_bound_uv(i, j, level);
        let want = r2::rect::Rect::from_points(points);

        test_approx_eq(uv.x.lo, want.x.lo);
        test_approx_eq(uv.x.hi, want.x.hi);
        test_approx_eq(uv.y.lo, want.y.lo);
        test_approx_eq(uv.y.hi, want.y.hi);
    }

    const MAX_IJ: i32 = MAX_SIZE_I32 - 1;

    #[test]
    fn test_ij_level_to_bound_uv() {
        test_ij_level_to_bound_uv_case(0, 0, 0, &[P!(-1., -1.), P!(1., 1.)]);
        test_ij_level_to_bound_uv_case(
            0,
            0,
            MAX_LEVEL / 2,
            &[P!(-1, -1), P!(-0.999918621033430099, -0.999918621033430099)],
        );
        test_ij_level_to_bound_uv_case(
            1,
            1,
            MAX_LEVEL,
            &[
                P!(-0.9999999975164731, -0.9999999975164731),
                P!(-0.9999999950329462, -0.9999999950329462),
            ],
        );
        test_ij_level_to_bound_uv_case(
            MAX_IJ / 2,
            MAX_IJ / 2,
            MAX_LEVEL / 2,
            &[P!(-0.000040691345930099, -0.000040691345930099), P!(0., 0.)],
        );
        test_ij_level_to_bound_uv_case(
            MAX_IJ,
            MAX_IJ,
            MAX_LEVEL,
            &[P!(0.999999997516473060, 0.999999997516473060), P!(1., 1.)],
        );
    }
}
