//! Wavefront OBJ support.
//!
//! Only geometry is read: `v` records give vertex positions and `f` records
//! give polygons, fan triangulated on load. Face references may use any of
//! the `v`, `v/vt`, `v//vn`, or `v/vt/vn` forms; texture and normal indices
//! are ignored. Negative indices count back from the last vertex read so
//! far. Every other record (`vn`, `vt`, `o`, `g`, `usemtl`, ...) is skipped.
//!
//! On save every vertex is written in order followed by one `f i i+1 i+2`
//! record per triangle (1-based).

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use mesh_types::{Mesh, Real, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::{open, push_polygon};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A `v` record has fewer than three coordinates or a bad number
/// - A face index is zero, malformed, or refers to a missing vertex
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj::<f64>("model.obj").unwrap();
/// println!("Loaded {} triangles", mesh.ntriangles());
/// ```
pub fn load_obj<T: Real>(path: impl AsRef<Path>) -> IoResult<Mesh<T>> {
    let path = path.as_ref();
    let mesh = read_obj(open(path)?)?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        "loaded OBJ"
    );
    Ok(mesh)
}

fn read_obj<T: Real, R: BufRead>(reader: R) -> IoResult<Mesh<T>> {
    let mut points: Vec<Vector3<f64>> = Vec::new();
    // Raw indices plus the number of vertices read before the face
    let mut faces: Vec<(Vec<i64>, usize)> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        // Strip trailing comments
        let content = line.split('#').next().unwrap_or_default();
        let mut parts = content.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<&str> = parts.take(3).collect();
                let [x, y, z] = coords[..] else {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs 3 coordinates",
                        line_no + 1
                    )));
                };
                points.push(Vector3::new(x.parse()?, y.parse()?, z.parse()?));
            }
            Some("f") => {
                let raw = parts
                    .map(|token| token.split('/').next().unwrap_or_default().parse())
                    .collect::<Result<Vec<i64>, _>>()?;
                faces.push((raw, points.len()));
            }
            _ => {
                // Ignore other records
            }
        }
    }

    let ntriangles = faces.iter().map(|(f, _)| f.len().saturating_sub(2)).sum();
    let mut mesh = Mesh::with_capacity(ntriangles, 3 * ntriangles);
    for (raw, nread) in &faces {
        let polygon = raw
            .iter()
            .map(|&i| resolve_index(i, *nread, points.len()))
            .collect::<IoResult<Vec<_>>>()?;
        push_polygon(&mut mesh, &points, &polygon)?;
    }
    Ok(mesh)
}

/// Turn a 1-based or negative face index into a 0-based vertex index.
///
/// `nread` is the number of vertices read before the face, which anchors
/// negative indices; `total` is the number of vertices in the file.
fn resolve_index(raw: i64, nread: usize, total: usize) -> IoResult<usize> {
    let resolved = match raw {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => usize::try_from(i.unsigned_abs())
            .ok()
            .and_then(|back| nread.checked_sub(back)),
    };
    resolved
        .filter(|&i| i < total)
        .ok_or(IoError::IndexOutOfRange {
            index: raw,
            count: total,
        })
}

/// Save a mesh to an OBJ file.
///
/// Coordinates are printed at the mesh precision, so a save and load at the
/// same precision restores every vertex.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_obj, save_obj};
///
/// let mesh = load_obj::<f32>("input.obj").unwrap();
/// save_obj(&mesh, "output.obj").unwrap();
/// ```
pub fn save_obj<T: Real>(mesh: &Mesh<T>, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        "saved OBJ"
    );
    Ok(())
}

fn write_obj<T: Real, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "# Generated by plantgeom mesh-io")?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for i in (1..=mesh.nvertices()).step_by(3) {
        writeln!(writer, "f {} {} {}", i, i + 1, i + 2)?;
    }
    Ok(())
}
