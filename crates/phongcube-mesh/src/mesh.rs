use crate::error::MeshError;
use crate::vertex::{Face, Vertex, FLOATS_PER_VERTEX};

/// Indexed triangle mesh with interleaved vertex records.
///
/// Owns its buffers; the renderer borrows them for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh from quads, four records and six indices per face.
    pub fn from_faces(faces: &[Face]) -> Self {
        let mut vertices = Vec::with_capacity(faces.len() * Face::VERTEX_COUNT);
        let mut indices = Vec::with_capacity(faces.len() * Face::INDEX_COUNT);

        for face in faces {
            let base = vertices.len() as u32;
            vertices.extend_from_slice(&face.vertices());
            indices.extend_from_slice(&Face::indices(base));
        }

        Self { vertices, indices }
    }

    /// Builds a mesh from a flat stride-9 float buffer and a triangle list.
    pub fn from_floats(floats: &[f32], indices: Vec<u32>) -> Result<Self, MeshError> {
        let vertices: &[Vertex] =
            bytemuck::try_cast_slice(floats).map_err(|_| MeshError::StrideMismatch {
                floats: floats.len(),
                stride: FLOATS_PER_VERTEX,
            })?;

        let mesh = Self {
            vertices: vertices.to_vec(),
            indices,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that the index list forms whole triangles over existing records.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                indices: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Flat view of the vertex records (stride [`FLOATS_PER_VERTEX`]).
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Mutable flat view, used for in-place passes such as normal averaging.
    #[inline]
    pub fn as_floats_mut(&mut self) -> &mut [f32] {
        bytemuck::cast_slice_mut(&mut self.vertices)
    }
}
