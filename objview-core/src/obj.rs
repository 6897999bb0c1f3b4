/// Parser for a restricted OBJ text dialect
use std::path::Path;

use nalgebra::{Point3, Vector2, Vector3};
use nom::{
    character::complete::{char, u32 as raw_index},
    combinator::{all_consuming, opt},
    sequence::preceded,
    IResult,
};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face, Mesh};

/// Split one line into whitespace-delimited tokens, dropping everything
/// from the first `#` onward. Blank and fully-commented lines yield no
/// tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    let uncommented = match line.find('#') {
        Some(position) => &line[..position],
        None => line,
    };
    uncommented.split_whitespace().collect()
}

/// Parse an OBJ document into a mesh aggregate.
///
/// Recognized directives are `v`, `vn`, `vt` and `f` (triangles only);
/// any other directive is logged at warn level and skipped. A malformed
/// record aborts the whole parse, so no partial mesh ever escapes.
///
/// Face indices are converted from the file's 1-based convention to
/// 0-based and are NOT range-checked here; `Mesh::buffer_data` performs
/// the checked resolution.
pub fn parse_obj(source: &str) -> MeshResult<Mesh> {
    let mut mesh = Mesh::new();

    for line in source.lines() {
        let tokens = tokenize(line);
        let Some((&directive, arguments)) = tokens.split_first() else {
            continue;
        };

        match directive {
            "v" => mesh.add_vertex(Point3::from(parse_scalars::<3>("v", arguments, line)?)),
            "vn" => mesh.add_normal(Vector3::from(parse_scalars::<3>("vn", arguments, line)?)),
            "vt" => {
                mesh.add_texture_coordinate(Vector2::from(parse_scalars::<2>("vt", arguments, line)?))
            }
            "f" => mesh.add_face(parse_face(arguments, line)?),
            other => log::warn!("ignoring unsupported directive {:?}: {}", other, line.trim()),
        }
    }

    Ok(mesh)
}

/// Read a whole file and parse it. I/O failures surface as `MeshError::Io`.
pub fn load_obj_file<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let source = std::fs::read_to_string(path)?;
    let mesh = parse_obj(&source)?;

    let statistics = mesh.statistics();
    log::debug!(
        "loaded mesh: {} vertices, {} normals, {} texture coordinates, {} faces",
        statistics.vertices,
        statistics.normals,
        statistics.texture_coordinates,
        statistics.faces
    );

    Ok(mesh)
}

fn malformed(directive: &'static str, line: &str) -> MeshError {
    MeshError::MalformedRecord {
        directive,
        line: line.trim().to_owned(),
    }
}

/// Exactly N numeric arguments, each consuming its whole token.
fn parse_scalars<const N: usize>(
    directive: &'static str,
    arguments: &[&str],
    line: &str,
) -> MeshResult<[f32; N]> {
    if arguments.len() != N {
        return Err(malformed(directive, line));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(arguments) {
        *value = token.parse().map_err(|_| malformed(directive, line))?;
    }
    Ok(values)
}

/// Exactly 3 corner tokens; anything else (points, lines, quads) is fatal.
fn parse_face(arguments: &[&str], line: &str) -> MeshResult<Face> {
    if arguments.len() != 3 {
        return Err(malformed("f", line));
    }

    let mut face = Face {
        vertex_indices: [0; 3],
        texture_coordinate_indices: [None; 3],
        normal_indices: [None; 3],
    };

    for (corner, token) in arguments.iter().enumerate() {
        let (_, (vertex, texture, normal)) =
            all_consuming(index_triple)(token).map_err(|_| malformed("f", line))?;

        face.vertex_indices[corner] = to_zero_based(vertex).ok_or_else(|| malformed("f", line))?;
        face.texture_coordinate_indices[corner] = match texture.flatten() {
            Some(index) => Some(to_zero_based(index).ok_or_else(|| malformed("f", line))?),
            None => None,
        };
        face.normal_indices[corner] = match normal.flatten() {
            Some(index) => Some(to_zero_based(index).ok_or_else(|| malformed("f", line))?),
            None => None,
        };
    }

    Ok(face)
}

/// One face corner: `v`, `v/vt`, `v//vn` or `v/vt/vn`. An empty field
/// between slashes stands for an absent reference.
fn index_triple(input: &str) -> IResult<&str, (u32, Option<Option<u32>>, Option<Option<u32>>)> {
    let (input, vertex) = raw_index(input)?;
    let (input, texture) = opt(preceded(char('/'), opt(raw_index)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(raw_index)))(input)?;
    Ok((input, (vertex, texture, normal)))
}

/// OBJ indices are 1-based; `0` has no zero-based counterpart.
fn to_zero_based(index: u32) -> Option<usize> {
    (index as usize).checked_sub(1)
}
