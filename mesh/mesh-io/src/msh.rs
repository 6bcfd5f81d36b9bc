//! Gmsh MSH support (ASCII, load only).
//!
//! Reads the `$MeshFormat`, `$Nodes`, and `$Elements` sections of version
//! 2.x, 4.0, and 4.1 files. Triangles (element type 2) are kept as-is and
//! quadrangles (type 3) are fan triangulated; every other element type
//! (points, lines, volume cells, ...) is skipped. Unknown sections such as
//! `$PhysicalNames` or `$Entities` are skipped too.
//!
//! ```text
//! $MeshFormat
//! 2.2 0 8
//! $EndMeshFormat
//! $Nodes
//! 3
//! 1 0 0 0
//! 2 1 0 0
//! 3 0 1 0
//! $EndNodes
//! $Elements
//! 1
//! 1 2 2 0 1 1 2 3
//! $EndElements
//! ```

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use hashbrown::HashMap;
use mesh_types::{Mesh, Real, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::{open, push_polygon};

/// Gmsh element type of a 3-node triangle.
const TRIANGLE: u32 = 2;
/// Gmsh element type of a 4-node quadrangle.
const QUADRANGLE: u32 = 3;

/// File layout versions with distinct section syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Version {
    V2,
    V40,
    V41,
}

/// Load a mesh from an ASCII Gmsh file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - `$MeshFormat` is missing, names an unsupported version, or declares
///   a binary file
/// - A section is truncated or holds a malformed number
/// - An element refers to an undefined node
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_msh;
///
/// let mesh = load_msh::<f64>("leaf.msh").unwrap();
/// println!("Loaded {} triangles", mesh.ntriangles());
/// ```
pub fn load_msh<T: Real>(path: impl AsRef<Path>) -> IoResult<Mesh<T>> {
    let path = path.as_ref();
    let mut text = String::new();
    open(path)?.read_to_string(&mut text).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            IoError::invalid_content("MSH file is not UTF-8 text (binary MSH is not supported)")
        } else {
            IoError::Io(e)
        }
    })?;
    let mesh = parse_msh(&text)?;
    debug!(
        path = %path.display(),
        ntriangles = mesh.ntriangles(),
        "loaded MSH"
    );
    Ok(mesh)
}

/// Non-blank lines with their 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    line_no: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        for (i, line) in self.inner.by_ref() {
            let line = line.trim();
            if !line.is_empty() {
                self.line_no = i + 1;
                return Some(line);
            }
        }
        None
    }

    fn expect_line(&mut self, section: &str) -> IoResult<&'a str> {
        self.next_line().ok_or_else(|| {
            IoError::invalid_content(format!("unexpected end of file in ${section}"))
        })
    }

    /// Parse every whitespace-separated token of the next line.
    fn numbers<N>(&mut self, section: &str) -> IoResult<Vec<N>>
    where
        N: FromStr,
        IoError: From<N::Err>,
    {
        self.expect_line(section)?
            .split_whitespace()
            .map(|t| t.parse::<N>().map_err(IoError::from))
            .collect()
    }

    /// Parse the next line, requiring at least `min` tokens.
    fn fields<N>(&mut self, section: &str, min: usize) -> IoResult<Vec<N>>
    where
        N: FromStr,
        IoError: From<N::Err>,
    {
        let values = self.numbers(section)?;
        if values.len() < min {
            return Err(self.error(format!(
                "expected at least {min} fields, got {}",
                values.len()
            )));
        }
        Ok(values)
    }

    fn expect_end(&mut self, section: &str) -> IoResult<()> {
        let line = self.expect_line(section)?;
        if line == format!("$End{section}") {
            Ok(())
        } else {
            Err(self.error(format!("expected $End{section}, got {line:?}")))
        }
    }

    fn skip_section(&mut self, section: &str) -> IoResult<()> {
        let end = format!("$End{section}");
        while let Some(line) = self.next_line() {
            if line == end {
                return Ok(());
            }
        }
        Err(IoError::invalid_content(format!(
            "unexpected end of file in ${section}"
        )))
    }

    fn error(&self, message: impl std::fmt::Display) -> IoError {
        IoError::invalid_content(format!("line {}: {message}", self.line_no))
    }
}

/// Mesh data collected before node references are resolved.
#[derive(Default)]
struct Collected {
    points: Vec<Vector3<f64>>,
    index_of_tag: HashMap<u64, usize>,
    /// Node tags of every kept element.
    elements: Vec<Vec<u64>>,
}

impl Collected {
    fn push_node(&mut self, tag: u64, coords: &[f64]) {
        self.index_of_tag.insert(tag, self.points.len());
        self.points.push(Vector3::new(coords[0], coords[1], coords[2]));
    }

    /// Keep the corner nodes of surface elements, drop the rest.
    fn push_element(&mut self, element_type: u32, nodes: &[u64], lines: &Lines<'_>) -> IoResult<()> {
        let corners = match element_type {
            TRIANGLE => 3,
            QUADRANGLE => 4,
            _ => return Ok(()),
        };
        let Some(corner_tags) = nodes.get(..corners) else {
            return Err(lines.error(format!(
                "element of type {element_type} needs {corners} nodes, got {}",
                nodes.len()
            )));
        };
        self.elements.push(corner_tags.to_vec());
        Ok(())
    }

    fn into_mesh<T: Real>(self) -> IoResult<Mesh<T>> {
        let ntriangles = self.elements.iter().map(|e| e.len() - 2).sum();
        let mut mesh = Mesh::with_capacity(ntriangles, 3 * ntriangles);
        for tags in &self.elements {
            let polygon = tags
                .iter()
                .map(|tag| {
                    self.index_of_tag
                        .get(tag)
                        .copied()
                        .ok_or(IoError::IndexOutOfRange {
                            index: i64::try_from(*tag).unwrap_or(i64::MAX),
                            count: self.points.len(),
                        })
                })
                .collect::<IoResult<Vec<_>>>()?;
            push_polygon(&mut mesh, &self.points, &polygon)?;
        }
        Ok(mesh)
    }
}

fn parse_msh<T: Real>(text: &str) -> IoResult<Mesh<T>> {
    let mut lines = Lines::new(text);
    let mut version = None;
    let mut collected = Collected::default();

    while let Some(line) = lines.next_line() {
        match line {
            "$MeshFormat" => version = Some(read_format(&mut lines)?),
            "$Nodes" => {
                let version = version.ok_or_else(|| lines.error("$Nodes before $MeshFormat"))?;
                read_nodes(&mut lines, version, &mut collected)?;
            }
            "$Elements" => {
                let version =
                    version.ok_or_else(|| lines.error("$Elements before $MeshFormat"))?;
                read_elements(&mut lines, version, &mut collected)?;
            }
            section if section.starts_with('$') => lines.skip_section(&section[1..])?,
            other => return Err(lines.error(format!("unexpected content {other:?}"))),
        }
    }

    if version.is_none() {
        return Err(IoError::invalid_content("missing $MeshFormat section"));
    }
    collected.into_mesh()
}

fn read_format(lines: &mut Lines<'_>) -> IoResult<Version> {
    const SECTION: &str = "MeshFormat";
    let line = lines.expect_line(SECTION)?;
    let mut fields = line.split_whitespace();
    let version = fields.next().unwrap_or_default();
    let file_type = fields.next().unwrap_or_default();

    if file_type != "0" {
        return Err(lines.error(format!(
            "only ASCII MSH is supported (file type {file_type:?})"
        )));
    }
    let version = match version.split('.').collect::<Vec<_>>()[..] {
        ["2", _] | ["2"] => Version::V2,
        ["4", "0"] | ["4"] => Version::V40,
        ["4", "1"] => Version::V41,
        _ => return Err(lines.error(format!("unsupported MSH version {version:?}"))),
    };
    lines.expect_end(SECTION)?;
    Ok(version)
}

/// Convert a count field to `usize`.
fn count(value: u64, lines: &Lines<'_>) -> IoResult<usize> {
    usize::try_from(value).map_err(|_| lines.error(format!("count {value} is too large")))
}

fn read_nodes(lines: &mut Lines<'_>, version: Version, out: &mut Collected) -> IoResult<()> {
    const SECTION: &str = "Nodes";
    match version {
        Version::V2 => {
            let header: Vec<u64> = lines.fields(SECTION, 1)?;
            for _ in 0..count(header[0], lines)? {
                let line = lines.expect_line(SECTION)?;
                let mut fields = line.split_whitespace();
                let tag: u64 = fields.next().unwrap_or_default().parse()?;
                let coords = fields.map(str::parse).collect::<Result<Vec<f64>, _>>()?;
                if coords.len() < 3 {
                    return Err(lines.error("node needs 3 coordinates"));
                }
                out.push_node(tag, &coords);
            }
        }
        Version::V40 => {
            let header: Vec<u64> = lines.fields(SECTION, 2)?;
            for _ in 0..count(header[0], lines)? {
                // entityTag entityDim parametric numNodes
                let block: Vec<u64> = lines.fields(SECTION, 4)?;
                for _ in 0..count(block[3], lines)? {
                    let line = lines.expect_line(SECTION)?;
                    let mut fields = line.split_whitespace();
                    let tag: u64 = fields.next().unwrap_or_default().parse()?;
                    let coords = fields.map(str::parse).collect::<Result<Vec<f64>, _>>()?;
                    if coords.len() < 3 {
                        return Err(lines.error("node needs 3 coordinates"));
                    }
                    out.push_node(tag, &coords);
                }
            }
        }
        Version::V41 => {
            let header: Vec<u64> = lines.fields(SECTION, 4)?;
            for _ in 0..count(header[0], lines)? {
                // entityDim entityTag parametric numNodesInBlock
                let block: Vec<u64> = lines.fields(SECTION, 4)?;
                // The block count is untrusted; tags grow as they are read
                let mut tags = Vec::new();
                for _ in 0..count(block[3], lines)? {
                    let tag: Vec<u64> = lines.fields(SECTION, 1)?;
                    tags.push(tag[0]);
                }
                for tag in tags {
                    let coords: Vec<f64> = lines.fields(SECTION, 3)?;
                    out.push_node(tag, &coords);
                }
            }
        }
    }
    lines.expect_end(SECTION)
}

fn read_elements(lines: &mut Lines<'_>, version: Version, out: &mut Collected) -> IoResult<()> {
    const SECTION: &str = "Elements";
    match version {
        Version::V2 => {
            let header: Vec<u64> = lines.fields(SECTION, 1)?;
            for _ in 0..count(header[0], lines)? {
                // tag type ntags tag... node...
                let fields: Vec<u64> = lines.fields(SECTION, 3)?;
                let ntags = count(fields[2], lines)?;
                let nodes = 3usize
                    .checked_add(ntags)
                    .and_then(|start| fields.get(start..))
                    .ok_or_else(|| lines.error("element tag list is truncated"))?;
                out.push_element(element_type(fields[1], lines)?, nodes, lines)?;
            }
        }
        Version::V40 | Version::V41 => {
            let min_header = if version == Version::V41 { 4 } else { 2 };
            let header: Vec<u64> = lines.fields(SECTION, min_header)?;
            for _ in 0..count(header[0], lines)? {
                // Both layouts keep the element type third
                let block: Vec<u64> = lines.fields(SECTION, 4)?;
                let kind = element_type(block[2], lines)?;
                for _ in 0..count(block[3], lines)? {
                    let fields: Vec<u64> = lines.fields(SECTION, 1)?;
                    out.push_element(kind, &fields[1..], lines)?;
                }
            }
        }
    }
    lines.expect_end(SECTION)
}

fn element_type(value: u64, lines: &Lines<'_>) -> IoResult<u32> {
    u32::try_from(value).map_err(|_| lines.error(format!("invalid element type {value}")))
}
