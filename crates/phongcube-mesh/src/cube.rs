use crate::mesh::Mesh;
use crate::vertex::Face;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

/// The six faces of an axis-aligned cube centred at the origin.
///
/// Order: back (-Z), front (+Z), bottom (-Y), top (+Y), left (-X), right (+X).
/// Every corner position is repeated once per adjacent face.
pub fn cube_faces(half_extent: f32) -> [Face; 6] {
    let h = half_extent;
    [
        Face {
            corners: [[-h, -h, -h], [h, -h, -h], [h, h, -h], [-h, h, -h]],
            normal: [0.0, 0.0, -1.0],
            color: RED,
        },
        Face {
            corners: [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
            normal: [0.0, 0.0, 1.0],
            color: GREEN,
        },
        Face {
            corners: [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
            normal: [0.0, -1.0, 0.0],
            color: BLUE,
        },
        Face {
            corners: [[-h, h, -h], [h, h, -h], [h, h, h], [-h, h, h]],
            normal: [0.0, 1.0, 0.0],
            color: YELLOW,
        },
        Face {
            corners: [[-h, -h, -h], [-h, h, -h], [-h, h, h], [-h, -h, h]],
            normal: [-1.0, 0.0, 0.0],
            color: CYAN,
        },
        Face {
            corners: [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]],
            normal: [1.0, 0.0, 0.0],
            color: MAGENTA,
        },
    ]
}

/// Builds a cube with the given half extent (24 records, 36 indices).
pub fn cube(half_extent: f32) -> Mesh {
    Mesh::from_faces(&cube_faces(half_extent))
}

/// Unit cube spanning `[-0.5, 0.5]` on every axis.
pub fn unit_cube() -> Mesh {
    cube(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_counts() {
        let mesh = unit_cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.as_floats().len(), 216);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn first_record_layout() {
        let mesh = unit_cube();
        assert_eq!(
            &mesh.as_floats()[..9],
            &[-0.5, -0.5, -0.5, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn indices_follow_face_pattern() {
        let mesh = unit_cube();
        let idx = mesh.indices();
        assert_eq!(&idx[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&idx[30..], &[20, 21, 22, 22, 23, 20]);
    }

    #[test]
    fn eight_distinct_corners_each_used_three_times() {
        let mesh = unit_cube();
        let vs = mesh.vertices();
        for v in vs {
            let copies = vs.iter().filter(|o| o.position == v.position).count();
            assert_eq!(copies, 3, "{:?}", v.position);
        }
    }

    #[test]
    fn face_normals_point_away_from_centre() {
        for face in cube_faces(1.0) {
            for corner in face.corners {
                let dot: f32 = corner.iter().zip(face.normal.iter()).map(|(a, b)| a * b).sum();
                assert_eq!(dot, 1.0);
            }
        }
    }

    #[test]
    fn half_extent_scales_positions() {
        let mesh = cube(2.0);
        assert!(mesh
            .vertices()
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() == 2.0)));
    }
}
