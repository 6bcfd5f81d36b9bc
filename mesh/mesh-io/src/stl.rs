//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats.
//!
//! # Format Detection
//!
//! The loader automatically detects whether a file is ASCII or binary:
//! - A file whose size is exactly `84 + 50 * face_count` is binary, whatever
//!   its header says
//! - Otherwise ASCII files start with "solid" (after optional whitespace)
//!   and carry no NUL byte in the first 84 bytes
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! Normals stored in a file are ignored on load. On save, cached mesh
//! normals are written when present; otherwise each face normal is computed.

use std::fs::File;
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::Path;

use mesh_types::{Mesh, Real, Vector3, face_normal};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::open;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file.
///
/// Automatically detects ASCII vs binary format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content is not valid STL
/// - A binary file holds fewer triangles than its header declares
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl::<f32>("model.stl").unwrap();
/// println!("Loaded {} triangles", mesh.ntriangles());
/// ```
pub fn load_stl<T: Real>(path: impl AsRef<Path>) -> IoResult<Mesh<T>> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let mut header = Vec::with_capacity(HEADER_SIZE + 4);
    reader
        .by_ref()
        .take((HEADER_SIZE + 4) as u64)
        .read_to_end(&mut header)?;

    if header.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let file_len = std::fs::metadata(path).ok().map(|m| m.len());
    let mesh = if is_ascii(&header, file_len) {
        // Rewind by chaining the consumed header back in front
        load_stl_ascii(header.as_slice().chain(reader))?
    } else {
        load_stl_binary_from_header(&header, reader)?
    };
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        "loaded STL"
    );
    Ok(mesh)
}

/// "solid" prefix and no NUL byte in the header means ASCII, unless the
/// file size matches the binary layout declared by the face count.
///
/// Many exporters write binary headers starting with "solid"; some pad them
/// with spaces instead of NULs.
fn is_ascii(header: &[u8], file_len: Option<u64>) -> bool {
    if let (Some(count), Some(len)) = (binary_face_count(header), file_len) {
        if (HEADER_SIZE + 4) as u64 + TRIANGLE_SIZE as u64 * u64::from(count) == len {
            return false;
        }
    }
    let head = &header[..header.len().min(HEADER_SIZE)];
    let text = String::from_utf8_lossy(head);
    text.trim_start().starts_with("solid") && !head.contains(&0)
}

/// The little-endian face count after the 80-byte header, if present.
fn binary_face_count(header: &[u8]) -> Option<u32> {
    let bytes = header.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Load a binary STL given the already-read header.
fn load_stl_binary_from_header<T: Real, R: Read>(header: &[u8], mut reader: R) -> IoResult<Mesh<T>> {
    if header.len() < HEADER_SIZE + 4 {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: header.len(),
        });
    }

    // Face count is stored after the 80-byte header
    let face_count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    // The header count is untrusted; cap the pre-allocation
    let hint = (face_count as usize).min(1 << 20);
    let mut mesh = Mesh::with_capacity(hint, 3 * hint);

    let mut triangle_buf = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        if let Err(e) = reader.read_exact(&mut triangle_buf) {
            return Err(if e.kind() == std::io::ErrorKind::UnexpectedEof {
                IoError::InvalidFaceCount {
                    expected: face_count,
                    got: i,
                }
            } else {
                IoError::Io(e)
            });
        }

        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        mesh.push_triangle(
            read_vertex(&triangle_buf[12..24]),
            read_vertex(&triangle_buf[24..36]),
            read_vertex(&triangle_buf[36..48]),
        );
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex<T: Real>(buf: &[u8]) -> Vector3<T> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(
        T::from_float(f64::from(x)),
        T::from_float(f64::from(y)),
        T::from_float(f64::from(z)),
    )
}

/// Load an ASCII STL file.
fn load_stl_ascii<T: Real, R: BufRead>(reader: R) -> IoResult<Mesh<T>> {
    let mut mesh = Mesh::new();
    let mut in_loop = false;
    let mut vertices_in_face: Vec<Vector3<T>> = Vec::with_capacity(3);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "facet" => {
                // Normal follows but we ignore it
                vertices_in_face.clear();
            }
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    vertices_in_face.clear();
                }
            }
            "vertex" => {
                if !in_loop || parts.len() < 4 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: malformed vertex record",
                        line_no + 1
                    )));
                }
                let x: f64 = parts[1].parse()?;
                let y: f64 = parts[2].parse()?;
                let z: f64 = parts[3].parse()?;
                vertices_in_face.push(Vector3::new(x, y, z).map(T::from_float));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                let [v0, v1, v2] = vertices_in_face[..] else {
                    return Err(IoError::invalid_content(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        vertices_in_face.len()
                    )));
                };
                mesh.push_triangle(v0, v1, v2);
                vertices_in_face.clear();
            }
            "endsolid" => {
                // End of solid
                break;
            }
            _ => {
                // Ignore unknown lines
            }
        }
    }

    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, save as ASCII
///
/// Binary output stores 32-bit floats whatever the mesh precision. ASCII
/// output prints coordinates at the mesh precision.
///
/// # Errors
///
/// Returns an error if the file cannot be written, or if a binary file would
/// hold more than `u32::MAX` triangles.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl};
///
/// let mesh = load_stl::<f64>("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", true).unwrap(); // Binary
/// save_stl(&mesh, "output_ascii.stl", false).unwrap(); // ASCII
/// ```
pub fn save_stl<T: Real>(mesh: &Mesh<T>, path: impl AsRef<Path>, binary: bool) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if binary {
        save_stl_binary(mesh, &mut writer)?;
    } else {
        save_stl_ascii(mesh, &mut writer)?;
    }
    writer.flush()?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        binary,
        "saved STL"
    );
    Ok(())
}

/// Cached normal of triangle `i`, or the computed face normal.
fn normal_of<T: Real>(mesh: &Mesh<T>, i: usize, [v0, v1, v2]: &[Vector3<T>; 3]) -> Vector3<T> {
    mesh.normal(i).unwrap_or_else(|| face_normal(v0, v1, v2))
}

/// Save mesh as binary STL.
fn save_stl_binary<T: Real, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> IoResult<()> {
    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by plantgeom mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let face_count = u32::try_from(mesh.ntriangles()).map_err(|_| {
        IoError::invalid_content(format!(
            "{} triangles exceed the binary STL limit",
            mesh.ntriangles()
        ))
    })?;
    writer.write_all(&face_count.to_le_bytes())?;

    for (i, triangle) in mesh.triangles().enumerate() {
        write_vector_binary(writer, &normal_of(mesh, i, &triangle))?;
        for v in &triangle {
            write_vector_binary(writer, v)?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write a vector as 3 f32s in little-endian.
fn write_vector_binary<T: Real, W: Write>(writer: &mut W, v: &Vector3<T>) -> IoResult<()> {
    writer.write_all(&v.x.as_f32().to_le_bytes())?;
    writer.write_all(&v.y.as_f32().to_le_bytes())?;
    writer.write_all(&v.z.as_f32().to_le_bytes())?;
    Ok(())
}

/// Save mesh as ASCII STL.
fn save_stl_ascii<T: Real, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for (i, triangle) in mesh.triangles().enumerate() {
        let n = normal_of(mesh, i, &triangle);
        writeln!(writer, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &triangle {
            writeln!(writer, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;

    Ok(())
}
