/// OBJVIEW Core Library - mesh ingestion and derived geometry
///
/// This library parses a restricted OBJ text dialect into an in-memory mesh
/// aggregate and derives the data a renderer needs: descriptive statistics,
/// bounding extents, a packed non-indexed vertex buffer, and camera
/// framing/orbit parameters.

pub mod error;
pub mod obj;
pub mod geometry;
pub mod transform;
pub mod projection;

// Re-export commonly used types
pub use error::{MeshError, MeshResult};
pub use geometry::{Extents, Face, Mesh, MeshStatistics, RenderBuffer};
pub use transform::{OrbitState, Transform};
pub use projection::{initial_distance, Camera};
