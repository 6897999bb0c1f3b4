/// Mesh aggregate and derived geometry
use nalgebra::{Point3, Vector2, Vector3};

use crate::error::{MeshError, MeshResult};

/// Floats per packed buffer corner: position (3) followed by normal (3).
pub const FLOATS_PER_CORNER: usize = 6;

/// A triangle referencing three vertices by index, each corner optionally
/// also referencing a texture coordinate and a normal.
///
/// All indices are zero-based; `None` means the OBJ record left the
/// corresponding sub-field empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertex_indices: [usize; 3],
    pub texture_coordinate_indices: [Option<usize>; 3],
    pub normal_indices: [Option<usize>; 3],
}

/// Read-only snapshot of the aggregate's collection sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStatistics {
    pub vertices: usize,
    pub normals: usize,
    pub texture_coordinates: usize,
    pub faces: usize,
}

/// Axis-aligned bounding box of a mesh's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Extents {
    pub fn dimensions(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }
}

impl Default for Extents {
    /// Zero-size box at the origin; what `Mesh::extents` reports for a
    /// mesh with no vertices.
    fn default() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }
}

/// Flattened, non-indexed per-corner attribute stream ready for GPU upload.
///
/// Each corner is `FLOATS_PER_CORNER` floats, in face-then-corner order;
/// corners shared between faces are duplicated. Ownership moves to the
/// caller, who releases it after the upload that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    data: Vec<f32>,
    vertex_count: usize,
}

impl RenderBuffer {
    /// Logical vertex count: 3 per packed face.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// In-memory mesh aggregate, collections kept in file-insertion order.
///
/// Usage contract: the parser populates the aggregate through the `add_*`
/// methods, after which callers only query it. The ordering is not
/// enforced, but querying a half-built mesh yields snapshots of whatever
/// has been added so far.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    texture_coordinates: Vec<Vector2<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Point3<f32>) {
        self.vertices.push(vertex);
    }

    pub fn add_normal(&mut self, normal: Vector3<f32>) {
        self.normals.push(normal);
    }

    pub fn add_texture_coordinate(&mut self, texture_coordinate: Vector2<f32>) {
        self.texture_coordinates.push(texture_coordinate);
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn texture_coordinates(&self) -> &[Vector2<f32>] {
        &self.texture_coordinates
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn statistics(&self) -> MeshStatistics {
        MeshStatistics {
            vertices: self.vertices.len(),
            normals: self.normals.len(),
            texture_coordinates: self.texture_coordinates.len(),
            faces: self.faces.len(),
        }
    }

    /// Componentwise min/max over all vertices in a single pass.
    ///
    /// The running bounds start at +/-infinity so the first vertex
    /// establishes both sides regardless of sign. A mesh with no vertices
    /// reports `Extents::default()`.
    pub fn extents(&self) -> Extents {
        if self.vertices.is_empty() {
            return Extents::default();
        }

        let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        Extents { min, max }
    }

    /// Packs every face corner as position then normal, 18 floats per
    /// triangle, in face-then-corner order.
    ///
    /// Fails with `IndexOutOfRange` when a face references a vertex or
    /// normal outside the current collections, or when a corner carries no
    /// normal index at all: the fixed corner layout requires one, so a
    /// mesh parsed without `vn` records is not renderable through this
    /// path.
    pub fn buffer_data(&self) -> MeshResult<RenderBuffer> {
        let mut data = Vec::with_capacity(self.faces.len() * 3 * FLOATS_PER_CORNER);

        for (face_number, face) in self.faces.iter().enumerate() {
            for corner in 0..3 {
                let vertex_index = face.vertex_indices[corner];
                let vertex = self.vertices.get(vertex_index).ok_or_else(|| {
                    MeshError::IndexOutOfRange {
                        face: face_number,
                        description: format!(
                            "vertex index {} out of range ({} vertices)",
                            vertex_index,
                            self.vertices.len()
                        ),
                    }
                })?;

                let normal_index =
                    face.normal_indices[corner].ok_or_else(|| MeshError::IndexOutOfRange {
                        face: face_number,
                        description: format!("corner {} has no normal index", corner),
                    })?;
                let normal = self.normals.get(normal_index).ok_or_else(|| {
                    MeshError::IndexOutOfRange {
                        face: face_number,
                        description: format!(
                            "normal index {} out of range ({} normals)",
                            normal_index,
                            self.normals.len()
                        ),
                    }
                })?;

                data.extend_from_slice(&[vertex.x, vertex.y, vertex.z]);
                data.extend_from_slice(&[normal.x, normal.y, normal.z]);
            }
        }

        Ok(RenderBuffer {
            data,
            vertex_count: self.faces.len() * 3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(vertex_indices: [usize; 3], normal_indices: [Option<usize>; 3]) -> Face {
        Face {
            vertex_indices,
            texture_coordinate_indices: [None; 3],
            normal_indices,
        }
    }

    #[test]
    fn test_statistics_counts() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_normal(Vector3::new(0.0, 1.0, 0.0));
        mesh.add_texture_coordinate(Vector2::new(0.5, 0.5));

        let statistics = mesh.statistics();
        assert_eq!(statistics.vertices, 2);
        assert_eq!(statistics.normals, 1);
        assert_eq!(statistics.texture_coordinates, 1);
        assert_eq!(statistics.faces, 0);
    }

    #[test]
    fn test_extents_mixed_signs() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(-1.0, 0.0, 2.0));
        mesh.add_vertex(Point3::new(3.0, -4.0, 5.0));
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));

        let extents = mesh.extents();
        assert_eq!(extents.min, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(extents.max, Point3::new(3.0, 0.0, 5.0));
    }

    #[test]
    fn test_extents_all_positive() {
        // Would have broken the smallest-positive-float initialization
        // this port replaced.
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(2.0, 3.0, 4.0));
        mesh.add_vertex(Point3::new(5.0, 6.0, 7.0));

        let extents = mesh.extents();
        assert_eq!(extents.min, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(extents.max, Point3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_extents_empty_mesh() {
        let mesh = Mesh::new();
        assert_eq!(mesh.extents(), Extents::default());
        assert_eq!(mesh.extents().dimensions(), Vector3::zeros());
    }

    #[test]
    fn test_extents_center() {
        let extents = Extents {
            min: Point3::new(-2.0, 0.0, 2.0),
            max: Point3::new(2.0, 4.0, 6.0),
        };
        assert_eq!(extents.center(), Point3::new(0.0, 2.0, 4.0));
        assert_eq!(extents.dimensions(), Vector3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_buffer_single_face() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(face([0, 1, 2], [Some(0); 3]));

        let buffer = mesh.buffer_data().unwrap();
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.as_floats().len(), 18);
        assert_eq!(buffer.byte_len(), 18 * 4);

        // Every corner repeats the single normal after its position.
        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(buffer.as_floats(), &expected);
    }

    #[test]
    fn test_buffer_bytes_view() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(face([0, 0, 0], [Some(0); 3]));

        let buffer = mesh.buffer_data().unwrap();
        assert_eq!(buffer.as_bytes().len(), buffer.byte_len());
    }

    #[test]
    fn test_buffer_vertex_index_out_of_range() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(face([0, 1, 0], [Some(0); 3]));

        assert!(matches!(
            mesh.buffer_data(),
            Err(MeshError::IndexOutOfRange { face: 0, .. })
        ));
    }

    #[test]
    fn test_buffer_normal_index_out_of_range() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(face([0, 0, 0], [Some(5); 3]));

        assert!(matches!(
            mesh.buffer_data(),
            Err(MeshError::IndexOutOfRange { face: 0, .. })
        ));
    }

    #[test]
    fn test_buffer_missing_normals() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(face([0, 1, 2], [None; 3]));

        assert!(matches!(
            mesh.buffer_data(),
            Err(MeshError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_buffer_empty_mesh() {
        let mesh = Mesh::new();
        let buffer = mesh.buffer_data().unwrap();
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.byte_len(), 0);
    }
}
