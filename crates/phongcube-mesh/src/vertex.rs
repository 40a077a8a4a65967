use bytemuck::{Pod, Zeroable};

/// Number of `f32` fields in one vertex record.
pub const FLOATS_PER_VERTEX: usize = 9;

/// One interleaved vertex record: position, normal, color.
///
/// `#[repr(C)]` with three `[f32; 3]` fields, so a `[Vertex]` slice is
/// byte-identical to a flat `[f32]` buffer of stride [`FLOATS_PER_VERTEX`].
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, normal, color }
    }

    /// Euclidean length of the normal.
    #[inline]
    pub fn normal_length(&self) -> f32 {
        let [x, y, z] = self.normal;
        (x * x + y * y + z * z).sqrt()
    }
}

/// A quad made of four corners sharing one normal and one color.
///
/// Corners are listed in winding order; the quad is split into the triangles
/// `(0, 1, 2)` and `(2, 3, 0)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Face {
    pub corners: [[f32; 3]; 4],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Face {
    pub const VERTEX_COUNT: usize = 4;
    pub const INDEX_COUNT: usize = 6;

    /// Expands the face into its four vertex records.
    pub fn vertices(&self) -> [Vertex; 4] {
        self.corners.map(|p| Vertex::new(p, self.normal, self.color))
    }

    /// Triangle-list indices for a face whose first record sits at `base`.
    #[inline]
    pub const fn indices(base: u32) -> [u32; 6] {
        let (a, b, c, d) = (base, base + 1, base + 2, base + 3);
        [a, b, c, c, d, a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_nine_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), FLOATS_PER_VERTEX * 4);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn vertex_field_order_matches_flat_layout() {
        let v = Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]);
        let flat: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn face_indices_split_quad() {
        assert_eq!(Face::indices(0), [0, 1, 2, 2, 3, 0]);
        assert_eq!(Face::indices(20), [20, 21, 22, 22, 23, 20]);
    }

    #[test]
    fn face_vertices_share_normal_and_color() {
        let face = Face {
            corners: [[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            normal: [0.0, 0.0, 1.0],
            color: [0.2, 0.4, 0.6],
        };
        let vs = face.vertices();
        assert_eq!(vs[2].position, [1.0, 1.0, 0.0]);
        assert!(vs.iter().all(|v| v.normal == face.normal && v.color == face.color));
    }
}
