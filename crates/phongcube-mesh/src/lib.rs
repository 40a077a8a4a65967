//! Geometry for the **phongcube** demo.
//!
//! This crate only depends on `bytemuck`, so the mesh and the normal
//! averaging pass can be tested without a GPU or a window.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`vertex`] | `Vertex` record, `Face` quad, `FLOATS_PER_VERTEX` |
//! | [`mesh`] | `Mesh` container with flat float views |
//! | [`cube`] | `cube`, `unit_cube`, `cube_faces` |
//! | [`normals`] | `average_normals`, `NormalMode` |
//! | [`error`] | `MeshError` |
//!
//! # Quick start
//!
//! ```rust
//! use phongcube_mesh::{unit_cube, NormalMode};
//!
//! let mut mesh = unit_cube();
//! NormalMode::Smooth.apply(&mut mesh);
//!
//! let n = mesh.vertices()[0].normal;
//! assert!((n[0] - n[2]).abs() < 1e-6);
//! ```

pub mod cube;
pub mod error;
pub mod mesh;
pub mod normals;
pub mod vertex;

pub use cube::{cube, unit_cube};
pub use error::MeshError;
pub use mesh::Mesh;
pub use normals::{average_normals, NormalMode};
pub use vertex::{Face, Vertex, FLOATS_PER_VERTEX};
