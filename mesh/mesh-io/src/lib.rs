//! Mesh file I/O for triangle soups.
//!
//! This crate provides loading and saving of [`Mesh`] in common formats:
//!
//! - **STL** (Stereolithography) - Binary and ASCII, load and save
//! - **PLY** (Polygon File Format) - Binary and ASCII, load and save
//! - **OBJ** (Wavefront) - ASCII, load and save
//! - **MSH** (Gmsh) - ASCII versions 2 and 4, load only
//!
//! Loaders return a mesh at the precision requested by the caller,
//! converting from whatever the file stores. Polygons with more than three
//! vertices are fan triangulated from their first vertex. Savers re-emit the
//! three vertices of every triangle without welding duplicates.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh, SaveFormat};
//! use mesh_types::Mesh;
//!
//! // Format detected from the .ply extension, loaded in single precision
//! let mesh: Mesh<f32> = load_mesh("leaf.ply").unwrap();
//!
//! // Save it back as binary STL
//! save_mesh(&mesh, "leaf.stl", SaveFormat::StlBinary).unwrap();
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod msh;
mod obj;
mod ply;
mod stl;

pub use error::{IoError, IoResult};
pub use msh::load_msh;
pub use obj::{load_obj, save_obj};
pub use ply::{load_ply, save_ply};
pub use stl::{load_stl, save_stl};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mesh_types::{Mesh, Real, Vector3};

/// Mesh file formats that can be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Supports binary and ASCII variants.
    Stl,
    /// PLY (Polygon File Format).
    /// Supports binary and ASCII variants.
    Ply,
    /// OBJ (Wavefront) format.
    /// ASCII only, supports vertices and faces.
    Obj,
    /// Gmsh mesh format, ASCII only.
    Msh,
}

impl MeshFormat {
    /// Detect format from file extension, ignoring case.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "ply" => Some(Self::Ply),
            "obj" => Some(Self::Obj),
            "msh" => Some(Self::Msh),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Ply => "ply",
            Self::Obj => "obj",
            Self::Msh => "msh",
        }
    }
}

/// Output encodings accepted by [`save_mesh`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SaveFormat {
    /// Binary STL.
    #[default]
    StlBinary,
    /// ASCII STL.
    StlAscii,
    /// Binary little-endian PLY.
    PlyBinary,
    /// ASCII PLY.
    PlyAscii,
    /// Wavefront OBJ.
    Obj,
}

impl SaveFormat {
    /// Container format written by this encoding.
    #[must_use]
    pub const fn mesh_format(&self) -> MeshFormat {
        match self {
            Self::StlBinary | Self::StlAscii => MeshFormat::Stl,
            Self::PlyBinary | Self::PlyAscii => MeshFormat::Ply,
            Self::Obj => MeshFormat::Obj,
        }
    }

    /// Whether the encoding is binary.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::StlBinary | Self::PlyBinary)
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// The precision of the returned mesh is chosen by the caller, e.g.
/// `load_mesh::<f32>(path)`.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_mesh;
///
/// let mesh = load_mesh::<f64>("model.obj").unwrap();
/// println!("{} triangles", mesh.ntriangles());
/// ```
pub fn load_mesh<T: Real>(path: impl AsRef<Path>) -> IoResult<Mesh<T>> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Ply => load_ply(path),
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Msh => load_msh(path),
    }
}

/// Save a mesh in the given encoding.
///
/// The extension of `path` is not checked against `format`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_mesh, save_mesh, SaveFormat};
///
/// let mesh = load_mesh::<f64>("input.stl").unwrap();
/// save_mesh(&mesh, "output.ply", SaveFormat::PlyAscii).unwrap();
/// ```
pub fn save_mesh<T: Real>(mesh: &Mesh<T>, path: impl AsRef<Path>, format: SaveFormat) -> IoResult<()> {
    match format {
        SaveFormat::StlBinary => save_stl(mesh, path, true),
        SaveFormat::StlAscii => save_stl(mesh, path, false),
        SaveFormat::PlyBinary => save_ply(mesh, path, true),
        SaveFormat::PlyAscii => save_ply(mesh, path, false),
        SaveFormat::Obj => save_obj(mesh, path),
    }
}

/// Open a file for buffered reading, reporting a missing file by path.
pub(crate) fn open(path: &Path) -> IoResult<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    Ok(BufReader::new(file))
}

/// Append the fan triangulation of an indexed polygon.
///
/// Polygons with fewer than three vertices add nothing. Every index is
/// checked against `points` before any triangle is pushed.
pub(crate) fn push_polygon<T: Real>(
    mesh: &mut Mesh<T>,
    points: &[Vector3<f64>],
    polygon: &[usize],
) -> IoResult<()> {
    if let Some(&bad) = polygon.iter().find(|&&i| i >= points.len()) {
        return Err(IoError::IndexOutOfRange {
            index: i64::try_from(bad).unwrap_or(i64::MAX),
            count: points.len(),
        });
    }
    if polygon.len() < 3 {
        return Ok(());
    }
    let p0 = points[polygon[0]].map(T::from_float);
    for pair in polygon[1..].windows(2) {
        mesh.push_triangle(
            p0,
            points[pair[0]].map(T::from_float),
            points[pair[1]].map(T::from_float),
        );
    }
    Ok(())
}
