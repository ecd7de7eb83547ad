//! Well-known text output for cell boundaries.
//!
//! A successful cell is written as
//! `POLYHEDRALSURFACE(((x1 y1 z1, x2 y2 z2, x3 y3 z3, x1 y1 z1)), ((...)))`,
//! one polygon per ring. A cell that could not be built has no record at all
//! (`None`), which keeps it apart from any string, the empty one included.

use std::fmt::{self, Write};

use crate::error::TopologyError;
use crate::faces::{extract_rings, FaceStyle, Ring};
use crate::halfedge::HalfEdgeCell;

const PREFIX: &str = "POLYHEDRALSURFACE(";

/// Writes the rings of one cell as a polyhedral surface.
pub fn write_polyhedral_surface<W: Write>(out: &mut W, rings: &[Ring]) -> fmt::Result {
    out.write_str(PREFIX)?;
    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        out.write_str("((")?;
        for (j, point) in ring.iter().enumerate() {
            if j > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{}", point)?;
        }
        out.write_str("))")?;
    }
    out.write_str(")")
}

/// Display adapter for the rings of one cell.
pub struct PolyhedralSurface<'a>(pub &'a [Ring]);

impl fmt::Display for PolyhedralSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_polyhedral_surface(f, self.0)
    }
}

/// Renders the rings of one cell as a polyhedral surface string.
pub fn polyhedral_surface(rings: &[Ring]) -> String {
    PolyhedralSurface(rings).to_string()
}

/// Extracts and renders the faces of one cell.
pub fn cell_record<C: HalfEdgeCell + ?Sized>(cell: &C, style: FaceStyle) -> Result<String, TopologyError> {
    let rings = extract_rings(cell, style)?;
    Ok(polyhedral_surface(&rings))
}
