use std::fmt;

/// A structural problem with a vertex/index buffer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The float count is not a multiple of the vertex stride.
    StrideMismatch { floats: usize, stride: usize },
    /// An index references a vertex record past the end of the buffer.
    IndexOutOfRange { position: usize, index: u32, vertex_count: usize },
    /// The index count does not describe whole triangles.
    IncompleteTriangle { indices: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideMismatch { floats, stride } => write!(
                f,
                "mesh error: {floats} floats is not a multiple of the vertex stride {stride}"
            ),
            Self::IndexOutOfRange { position, index, vertex_count } => write!(
                f,
                "mesh error: index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            Self::IncompleteTriangle { indices } => write!(
                f,
                "mesh error: {indices} indices do not form whole triangles"
            ),
        }
    }
}

impl std::error::Error for MeshError {}
