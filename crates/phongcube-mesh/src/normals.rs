//! Vertex-normal smoothing.
//!
//! Face-built meshes duplicate every shared corner once per face, each copy
//! carrying its own face normal. Averaging merges the copies so that lighting
//! varies smoothly across edges instead of stepping per face.

use crate::mesh::Mesh;
use crate::vertex::FLOATS_PER_VERTEX;

const POSITION: usize = 0;
const NORMAL: usize = 3;

/// Averages normals across records that share a position, in place.
///
/// `vertices` is a flat buffer of stride [`FLOATS_PER_VERTEX`]
/// (position, normal, color). Every record whose position compares equal
/// (`==` on all three components, no tolerance) to another record receives
/// the sum of the group's original normals, scaled to unit length. Records
/// without a match are still renormalized.
///
/// A group whose normals sum to zero ends up with non-finite normals; convex
/// meshes with consistent face normals never hit that case.
///
/// A trailing partial record is ignored.
pub fn average_normals(vertices: &mut [f32]) {
    debug_assert!(
        vertices.len() % FLOATS_PER_VERTEX == 0,
        "vertex buffer length {} is not a multiple of {FLOATS_PER_VERTEX}",
        vertices.len()
    );

    let count = vertices.len() / FLOATS_PER_VERTEX;

    for i in 0..count {
        let pos = read3(vertices, i, POSITION);

        // Already written when the first record of this group was visited.
        if (0..i).any(|j| read3(vertices, j, POSITION) == pos) {
            continue;
        }

        let mut sum = read3(vertices, i, NORMAL);
        for j in (i + 1)..count {
            if read3(vertices, j, POSITION) == pos {
                let n = read3(vertices, j, NORMAL);
                sum[0] += n[0];
                sum[1] += n[1];
                sum[2] += n[2];
            }
        }

        let len = (sum[0] * sum[0] + sum[1] * sum[1] + sum[2] * sum[2]).sqrt();
        let unit = sum.map(|c| c / len);

        // A NaN position never compares equal, not even to itself.
        write3(vertices, i, NORMAL, unit);
        for j in (i + 1)..count {
            if read3(vertices, j, POSITION) == pos {
                write3(vertices, j, NORMAL, unit);
            }
        }
    }
}

#[inline]
fn read3(buf: &[f32], record: usize, field: usize) -> [f32; 3] {
    let at = record * FLOATS_PER_VERTEX + field;
    [buf[at], buf[at + 1], buf[at + 2]]
}

#[inline]
fn write3(buf: &mut [f32], record: usize, field: usize, v: [f32; 3]) {
    let at = record * FLOATS_PER_VERTEX + field;
    buf[at..at + 3].copy_from_slice(&v);
}

/// How vertex normals are prepared before upload.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum NormalMode {
    /// Merge normals at shared positions ([`average_normals`]).
    #[default]
    Smooth,
    /// Keep the per-face normals the mesh was built with.
    Flat,
}

impl NormalMode {
    pub fn apply(self, mesh: &mut Mesh) {
        match self {
            NormalMode::Smooth => average_normals(mesh.as_floats_mut()),
            NormalMode::Flat => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::unit_cube;
    use crate::vertex::Vertex;

    const EPS: f32 = 1e-6;

    fn flat(records: &[Vertex]) -> Vec<f32> {
        bytemuck::cast_slice(records).to_vec()
    }

    fn normals(buf: &[f32]) -> Vec<[f32; 3]> {
        (0..buf.len() / FLOATS_PER_VERTEX)
            .map(|i| read3(buf, i, NORMAL))
            .collect()
    }

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= EPS)
    }

    fn length(n: [f32; 3]) -> f32 {
        (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
    }

    // ── shared positions ──────────────────────────────────────────────────

    #[test]
    fn two_records_sharing_position_meet_halfway() {
        let p = [0.5, 0.5, 0.5];
        let mut buf = flat(&[
            Vertex::new(p, [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            Vertex::new(p, [0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
        ]);
        average_normals(&mut buf);

        let h = std::f32::consts::FRAC_1_SQRT_2;
        for n in normals(&buf) {
            assert!(approx(n, [h, h, 0.0]), "got {n:?}");
        }
    }

    #[test]
    fn opposing_normals_are_non_finite() {
        let p = [0.0, 0.0, 0.0];
        let mut buf = flat(&[
            Vertex::new(p, [0.0, 0.0, -1.0], [1.0; 3]),
            Vertex::new(p, [0.0, 0.0, 1.0], [1.0; 3]),
        ]);
        average_normals(&mut buf);

        for n in normals(&buf) {
            assert!(n.iter().all(|c| !c.is_finite()), "got {n:?}");
        }
    }

    #[test]
    fn colors_and_positions_are_untouched() {
        let mut buf = flat(&[
            Vertex::new([1.0, 2.0, 3.0], [0.0, 3.0, 4.0], [0.1, 0.2, 0.3]),
            Vertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 5.0], [0.4, 0.5, 0.6]),
        ]);
        average_normals(&mut buf);

        let out: &[Vertex] = bytemuck::cast_slice(&buf);
        assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(out[0].color, [0.1, 0.2, 0.3]);
        assert_eq!(out[1].color, [0.4, 0.5, 0.6]);
    }

    #[test]
    fn unshared_record_is_renormalized() {
        let mut buf = flat(&[Vertex::new([0.0; 3], [0.0, 3.0, 4.0], [1.0; 3])]);
        average_normals(&mut buf);
        assert!(approx(normals(&buf)[0], [0.0, 0.6, 0.8]));
    }

    #[test]
    fn nan_position_record_is_still_renormalized() {
        let mut buf = flat(&[
            Vertex::new([f32::NAN, 0.0, 0.0], [0.0, 3.0, 4.0], [1.0; 3]),
            Vertex::new([f32::NAN, 0.0, 0.0], [4.0, 0.0, 3.0], [1.0; 3]),
        ]);
        average_normals(&mut buf);

        let ns = normals(&buf);
        assert!(approx(ns[0], [0.0, 0.6, 0.8]), "got {:?}", ns[0]);
        assert!(approx(ns[1], [0.8, 0.0, 0.6]), "got {:?}", ns[1]);
    }

    #[test]
    fn positions_one_ulp_apart_are_not_merged() {
        let a = 0.5f32;
        let b = f32::from_bits(a.to_bits() + 1);
        let mut buf = flat(&[
            Vertex::new([a, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0; 3]),
            Vertex::new([b, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0; 3]),
        ]);
        average_normals(&mut buf);

        let ns = normals(&buf);
        assert_eq!(ns[0], [1.0, 0.0, 0.0]);
        assert_eq!(ns[1], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn group_members_need_not_be_adjacent() {
        let p = [1.0, 1.0, 1.0];
        let mut buf = flat(&[
            Vertex::new(p, [1.0, 0.0, 0.0], [1.0; 3]),
            Vertex::new([9.0, 9.0, 9.0], [0.0, 0.0, 1.0], [1.0; 3]),
            Vertex::new(p, [0.0, 1.0, 0.0], [1.0; 3]),
            Vertex::new(p, [0.0, 0.0, 1.0], [1.0; 3]),
        ]);
        average_normals(&mut buf);

        let ns = normals(&buf);
        let t = 1.0 / 3f32.sqrt();
        assert!(approx(ns[0], [t, t, t]));
        assert_eq!(ns[0], ns[2]);
        assert_eq!(ns[0], ns[3]);
        assert_eq!(ns[1], [0.0, 0.0, 1.0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a multiple")]
    fn trailing_partial_record_asserts_in_debug() {
        let mut buf = vec![0.0f32; FLOATS_PER_VERTEX + 2];
        average_normals(&mut buf);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn trailing_partial_record_is_ignored() {
        let mut buf = flat(&[Vertex::new([0.0; 3], [0.0, 0.0, 2.0], [1.0; 3])]);
        buf.extend_from_slice(&[7.0, 7.0]);
        average_normals(&mut buf);
        assert_eq!(&buf[9..], &[7.0, 7.0]);
        assert_eq!(normals(&buf[..9])[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut buf: Vec<f32> = Vec::new();
        average_normals(&mut buf);
        assert!(buf.is_empty());
    }

    // ── cube ──────────────────────────────────────────────────────────────

    #[test]
    fn smoothed_cube_normals_are_unit_length() {
        let mut mesh = unit_cube();
        average_normals(mesh.as_floats_mut());
        for v in mesh.vertices() {
            assert!((v.normal_length() - 1.0).abs() <= EPS);
        }
    }

    #[test]
    fn smoothed_cube_corners_point_outward() {
        let mut mesh = unit_cube();
        NormalMode::Smooth.apply(&mut mesh);

        let t = 1.0 / 3f32.sqrt();
        for v in mesh.vertices() {
            let expected = v.position.map(|c| c.signum() * t);
            assert!(approx(v.normal, expected), "{v:?}");
        }
    }

    #[test]
    fn smoothed_cube_corner_copies_agree() {
        let mut mesh = unit_cube();
        NormalMode::Smooth.apply(&mut mesh);

        let vs = mesh.vertices();
        // Record 0 sits at (-h, -h, -h), shared with the bottom and left faces.
        assert_eq!(vs[0].position, vs[8].position);
        assert_eq!(vs[0].position, vs[16].position);
        assert_eq!(vs[0].normal, vs[8].normal);
        assert_eq!(vs[0].normal, vs[16].normal);
    }

    #[test]
    fn flat_cube_keeps_face_normals() {
        let mut mesh = unit_cube();
        NormalMode::Flat.apply(&mut mesh);
        assert_eq!(mesh.vertices()[0].normal, [0.0, 0.0, -1.0]);
        assert_eq!(mesh.vertices()[23].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn single_face_is_a_no_op() {
        let mesh = unit_cube();
        let mut buf = flat(&mesh.vertices()[..4]);
        average_normals(&mut buf);
        for n in normals(&buf) {
            assert_eq!(n, [0.0, 0.0, -1.0]);
        }
    }

    #[test]
    fn second_pass_reproduces_first() {
        let mut mesh = unit_cube();
        average_normals(mesh.as_floats_mut());
        let once = normals(mesh.as_floats());

        average_normals(mesh.as_floats_mut());
        let twice = normals(mesh.as_floats());

        for (a, b) in once.iter().zip(twice.iter()) {
            assert!(approx(*a, *b), "{a:?} != {b:?}");
            assert!((length(*b) - 1.0).abs() <= EPS);
        }
    }
}
