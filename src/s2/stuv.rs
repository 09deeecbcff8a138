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

//! Conversions between the coordinate systems of the cube-face decomposition:
//! (x,y,z) on the sphere, (face,u,v) on the cube, (face,s,t) after the
//! quadratic area-equalizing transform, and integer (si,ti) along each face.

use crate::r3::vector::{Axis, Vector};
use crate::s2::cellid::MAX_LEVEL;
use crate::s2::point::Point;

/// SWAP_MASK marks a Hilbert curve orientation where i and j are swapped.
pub const SWAP_MASK: u8 = 0x01;

/// MAX_SITI is the largest (si,ti) coordinate, one past the last leaf-cell
/// boundary: 2^(MAX_LEVEL + 1).
pub const MAX_SITI: u64 = 1 << (MAX_LEVEL + 1);

/// FACE_UVW_AXES holds the u, v and w (normal) axes of each cube face.
const FACE_UVW_AXES: [[Vector; 3]; 6] = [
    [
        Vector { x: 0., y: 1., z: 0. },
        Vector { x: 0., y: 0., z: 1. },
        Vector { x: 1., y: 0., z: 0. },
    ],
    [
        Vector { x: -1., y: 0., z: 0. },
        Vector { x: 0., y: 0., z: 1. },
        Vector { x: 0., y: 1., z: 0. },
    ],
    [
        Vector { x: -1., y: 0., z: 0. },
        Vector { x: 0., y: -1., z: 0. },
        Vector { x: 0., y: 0., z: 1. },
    ],
    [
        Vector { x: 0., y: 0., z: -1. },
        Vector { x: 0., y: -1., z: 0. },
        Vector { x: -1., y: 0., z: 0. },
    ],
    [
        Vector { x: 0., y: 0., z: -1. },
        Vector { x: 1., y: 0., z: 0. },
        Vector { x: 0., y: -1., z: 0. },
    ],
    [
        Vector { x: 0., y: 1., z: 0. },
        Vector { x: 1., y: 0., z: 0. },
        Vector { x: 0., y: 0., z: -1. },
    ],
];

/// st_to_uv converts an s or t value to the corresponding u or v value with
/// the quadratic projection.
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1. / 3.) * (4. * s * s - 1.)
    } else {
        (1. / 3.) * (1. - 4. * (1. - s) * (1. - s))
    }
}

/// uv_to_st is the inverse of st_to_uv.
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0. {
        0.5 * (1. + 3. * u).sqrt()
    } else {
        1. - 0.5 * (1. - 3. * u).sqrt()
    }
}

/// face returns the face containing the given direction vector; for points
/// on a boundary between faces the result is arbitrary but repeatable.
pub fn face(r: &Vector) -> u8 {
    let (f, negative) = match r.largest_component() {
        Axis::X => (0, r.x < 0.),
        Axis::Y => (1, r.y < 0.),
        Axis::Z => (2, r.z < 0.),
    };
    if negative {
        f + 3
    } else {
        f
    }
}

/// valid_face_xyz_to_uv projects r onto the given face, which must be the
/// face r actually lies on (or on its boundary).
pub fn valid_face_xyz_to_uv(face: u8, r: &Vector) -> (f64, f64) {
    match face {
        0 => (r.y / r.x, r.z / r.x),
        1 => (-r.x / r.y, r.z / r.y),
        2 => (-r.x / r.z, -r.y / r.z),
        3 => (r.z / r.x, r.y / r.x),
        4 => (r.z / r.y, -r.x / r.y),
        _ => (-r.y / r.z, -r.x / r.z),
    }
}

/// xyz_to_face_uv converts a direction vector (not necessarily unit length)
/// to (face, u, v) coordinates.
pub fn xyz_to_face_uv(r: &Vector) -> (u8, f64, f64) {
    let f = face(r);
    let (u, v) = valid_face_xyz_to_uv(f, r);
    (f, u, v)
}

/// face_uv_to_xyz turns face and uv coordinates into an unnormalized 3 vector.
pub fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Vector {
    match face {
        0 => Vector::xyz(1., u, v),
        1 => Vector::xyz(-u, 1., v),
        2 => Vector::xyz(-u, -v, 1.),
        3 => Vector::xyz(-1., -v, -u),
        4 => Vector::xyz(v, -1., -u),
        _ => Vector::xyz(v, u, -1.),
    }
}

/// face_xyz_to_uv returns the (u,v) coordinates of p projected onto the
/// given face, or None when p is on the far side of the sphere from it.
pub fn face_xyz_to_uv(face: u8, p: &Point) -> Option<(f64, f64)> {
    let r = &p.0;
    let behind = match face {
        0 => r.x <= 0.,
        1 => r.y <= 0.,
        2 => r.z <= 0.,
        3 => r.x >= 0.,
        4 => r.y >= 0.,
        _ => r.z >= 0.,
    };
    if behind {
        None
    } else {
        Some(valid_face_xyz_to_uv(face, r))
    }
}

/// siti_to_st converts an si- or ti-value to the corresponding s- or t-value.
/// Values beyond MAX_SITI are clamped to 1.
pub fn siti_to_st(si: u64) -> f64 {
    if si > MAX_SITI {
        1.
    } else {
        (si as f64) / (MAX_SITI as f64)
    }
}

/// u_axis returns the u-axis of the given face.
pub fn u_axis(face: u8) -> Point {
    Point(FACE_UVW_AXES[face as usize][0])
}

/// v_axis returns the v-axis of the given face.
pub fn v_axis(face: u8) -> Point {
    Point(FACE_UVW_AXES[face as usize][1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{f64_eq, f64_near};

    #[test]
    fn test_st_uv_round_trip() {
        assert_eq!(st_to_uv(0.5), 0.);
        assert!(f64_eq(st_to_uv(1.), 1.));
        assert!(f64_eq(st_to_uv(0.), -1.));
        for &x in &[0., 0.1, 0.25, 0.5, 0.75, 0.99, 1.] {
            assert!(f64_near(uv_to_st(st_to_uv(x)), x, 1e-15));
        }
        for &u in &[-1., -0.4, 0., 0.3, 1.] {
            assert!(f64_near(st_to_uv(uv_to_st(u)), u, 1e-15));
        }
    }

    #[test]
    fn test_face_uv_xyz_round_trip() {
        for f in 0..6u8 {
            let center = face_uv_to_xyz(f, 0., 0.);
            assert_eq!(face(&center), f);
            for &(u, v) in &[(0.2, -0.7), (-0.99, 0.99), (0.5, 0.5)] {
                let p = face_uv_to_xyz(f, u, v);
                let (g, pu, pv) = xyz_to_face_uv(&p);
                assert_eq!(g, f);
                assert!(f64_eq(pu, u));
                assert!(f64_eq(pv, v));
                let q = Point(p.normalize());
                let (qu, qv) = face_xyz_to_uv(f, &q).unwrap();
                assert!(f64_eq(qu, u));
                assert!(f64_eq(qv, v));
                assert!(face_xyz_to_uv((f + 3) % 6, &q).is_none());
            }
        }
    }

    #[test]
    fn test_axes_are_right_handed() {
        for f in 0..6u8 {
            let u = u_axis(f).0;
            let v = v_axis(f).0;
            assert_eq!(u.cross(&v), face_uv_to_xyz(f, 0., 0.));
            assert_eq!(face_uv_to_xyz(f, 1., 0.) - face_uv_to_xyz(f, 0., 0.), u);
            assert_eq!(face_uv_to_xyz(f, 0., 1.) - face_uv_to_xyz(f, 0., 0.), v);
        }
    }

    #[test]
    fn test_siti_to_st() {
        assert_eq!(siti_to_st(0), 0.);
        assert_eq!(siti_to_st(MAX_SITI / 2), 0.5);
        assert_eq!(siti_to_st(MAX_SITI), 1.);
        assert_eq!(siti_to_st(MAX_SITI + 7), 1.);
    }
}
