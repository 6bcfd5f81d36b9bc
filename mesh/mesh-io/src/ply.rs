//! PLY (Polygon File Format) support.
//!
//! PLY is a flexible format for storing 3D data, supporting both ASCII and binary variants.
//! It's commonly used in 3D scanning and computer graphics.
//!
//! # Supported Properties
//!
//! - Vertex positions (x, y, z) as `float` or `double` - required
//! - Face vertex indices (`vertex_indices` or `vertex_index`) - required for faces
//!
//! Other elements and properties are read and ignored.
//!
//! # Format Variants
//!
//! - **ASCII** - Human-readable, larger files
//! - **Binary Little Endian** - Compact, fast to read/write
//! - **Binary Big Endian** - Compact, for big-endian systems (load only)
//!
//! Saved files hold `3 * ntriangles` vertices and face `i` is
//! `(3i, 3i + 1, 3i + 2)`.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use mesh_types::{Mesh, Real, Vector3};
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::{open, push_polygon};

/// Load a mesh from a PLY file.
///
/// Supports ASCII, binary little-endian, and binary big-endian formats.
/// Polygonal faces are fan triangulated.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not valid PLY format
/// - A vertex lacks one of x, y, z
/// - A face refers to a vertex that does not exist
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_ply;
///
/// let mesh = load_ply::<f64>("model.ply").unwrap();
/// println!("Loaded {} triangles", mesh.ntriangles());
/// ```
pub fn load_ply<T: Real>(path: impl AsRef<Path>) -> IoResult<Mesh<T>> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let mesh = read_ply(&mut reader)?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        "loaded PLY"
    );
    Ok(mesh)
}

fn read_ply<T: Real, R: BufRead>(reader: &mut R) -> IoResult<Mesh<T>> {
    // Use generic DefaultElement parser - works for all element types
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut points = Vec::new();
    if let Some(vertex_elements) = payload.get("vertex") {
        points.reserve(vertex_elements.len());
        for (i, element) in vertex_elements.iter().enumerate() {
            points.push(Vector3::new(
                get_coordinate(element, "x", i)?,
                get_coordinate(element, "y", i)?,
                get_coordinate(element, "z", i)?,
            ));
        }
    }

    let mut mesh = Mesh::new();
    if let Some(face_elements) = payload.get("face") {
        mesh.reserve(face_elements.len());
        for (i, element) in face_elements.iter().enumerate() {
            let indices = get_index_list(element, i, points.len())?;
            push_polygon(&mut mesh, &points, &indices)?;
        }
    }

    Ok(mesh)
}

/// Extract a coordinate of vertex `index`.
fn get_coordinate(element: &DefaultElement, key: &str, index: usize) -> IoResult<f64> {
    match element.get(key) {
        Some(Property::Float(v)) => Ok(f64::from(*v)),
        Some(Property::Double(v)) => Ok(*v),
        Some(_) => Err(IoError::invalid_content(format!(
            "vertex {index}: property {key} is not a float"
        ))),
        None => Err(IoError::invalid_content(format!(
            "vertex {index}: missing property {key}"
        ))),
    }
}

/// Extract the vertex index list of face `index`.
fn get_index_list(element: &DefaultElement, index: usize, nvertices: usize) -> IoResult<Vec<usize>> {
    // Try common property names for face indices
    for key in ["vertex_indices", "vertex_index"] {
        let Some(prop) = element.get(key) else {
            continue;
        };
        let raw: Vec<i64> = match prop {
            Property::ListChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
            Property::ListUChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
            Property::ListShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
            Property::ListUShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
            Property::ListInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
            Property::ListUInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
            _ => {
                return Err(IoError::invalid_content(format!(
                    "face {index}: {key} is not an integer list"
                )));
            }
        };
        return raw
            .into_iter()
            .map(|i| {
                usize::try_from(i).map_err(|_| IoError::IndexOutOfRange {
                    index: i,
                    count: nvertices,
                })
            })
            .collect();
    }
    Err(IoError::invalid_content(format!(
        "face {index}: missing vertex_indices"
    )))
}

/// Save a mesh to a PLY file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary little-endian; if false, save as ASCII
///
/// Coordinates are stored as 32-bit floats in both encodings.
///
/// # Errors
///
/// Returns an error if the file cannot be written, or if the mesh has more
/// vertices than a 32-bit index can address.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_ply, save_ply};
///
/// let mesh = load_ply::<f64>("input.ply").unwrap();
/// save_ply(&mesh, "output.ply", true).unwrap(); // Binary
/// save_ply(&mesh, "output_ascii.ply", false).unwrap(); // ASCII
/// ```
pub fn save_ply<T: Real>(mesh: &Mesh<T>, path: impl AsRef<Path>, binary: bool) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if binary {
        save_ply_binary(mesh, &mut writer)?;
    } else {
        save_ply_ascii(mesh, &mut writer)?;
    }
    writer.flush()?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        binary,
        "saved PLY"
    );
    Ok(())
}

/// Index of the first vertex of each triangle, as stored in the file.
fn face_bases<T: Real>(mesh: &Mesh<T>) -> IoResult<impl Iterator<Item = i32>> {
    let nvertices = i32::try_from(mesh.nvertices()).map_err(|_| {
        IoError::invalid_content(format!(
            "{} vertices exceed the PLY index range",
            mesh.nvertices()
        ))
    })?;
    Ok((0..nvertices).step_by(3))
}

/// Save mesh as binary PLY (little-endian).
///
/// Note: We implement this manually because ply-rs has a bug with binary list
/// property writing where it uses element count instead of list length.
fn save_ply_binary<T: Real, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> IoResult<()> {
    let bases = face_bases(mesh)?;

    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "comment Generated by plantgeom mesh-io")?;
    writeln!(writer, "element vertex {}", mesh.nvertices())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "element face {}", mesh.ntriangles())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in mesh.vertices() {
        writer.write_all(&v.x.as_f32().to_le_bytes())?;
        writer.write_all(&v.y.as_f32().to_le_bytes())?;
        writer.write_all(&v.z.as_f32().to_le_bytes())?;
    }

    for base in bases {
        // List count (3 vertices per face)
        writer.write_all(&[3u8])?;
        for i in base..base + 3 {
            writer.write_all(&i.to_le_bytes())?;
        }
    }

    Ok(())
}

/// Save mesh as ASCII PLY using ply-rs.
fn save_ply_ascii<T: Real, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> IoResult<()> {
    let bases = face_bases(mesh)?;

    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push("Generated by plantgeom mesh-io".to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    vertex_def.count = mesh.nvertices();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    face_def.count = mesh.ntriangles();
    ply.header.elements.add(face_def);

    let vertex_elements = mesh
        .vertices()
        .iter()
        .map(|v| {
            let mut element = DefaultElement::new();
            element.insert("x".to_string(), Property::Float(v.x.as_f32()));
            element.insert("y".to_string(), Property::Float(v.y.as_f32()));
            element.insert("z".to_string(), Property::Float(v.z.as_f32()));
            element
        })
        .collect();
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let face_elements = bases
        .map(|base| {
            let mut element = DefaultElement::new();
            element.insert(
                "vertex_indices".to_string(),
                Property::ListInt(vec![base, base + 1, base + 2]),
            );
            element
        })
        .collect();
    ply.payload.insert("face".to_string(), face_elements);

    let ply_writer = Writer::new();
    ply_writer
        .write_ply(writer, &mut ply)
        .map_err(|e| IoError::invalid_content(format!("failed to write PLY: {e}")))?;

    Ok(())
}
