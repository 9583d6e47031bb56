//! Geometry assembly and ellipsoidal measurement.
//!
//! Coordinates are geographic (EPSG:4326, `x = lon`, `y = lat`), so every
//! measurement goes through the WGS84 geodesic routines of `geo` rather than
//! planar formulas on raw degrees.

use std::collections::HashMap;

use geo::{Coord, Geodesic, GeodesicArea, Length, LineString, Polygon};

use crate::data::osm::{Node, OsmId};
use crate::data::water::Shape;
use crate::errors::{Error, Result};

pub const MIN_LINE_VERTICES: usize = 2;
pub const MIN_POLYGON_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum WaterGeometry {
    Line(LineString<f64>),
    /// Single exterior ring, no holes.
    Polygon(Polygon<f64>),
}

impl WaterGeometry {
    /// Geodesic length in meters for lines, absolute geodesic area in square
    /// meters for polygons. Not rounded.
    pub fn measure(&self) -> f64 {
        match self {
            WaterGeometry::Line(line) => Geodesic.length(line),
            // Signed area follows the ring's winding; waterbodies never span half the globe.
            WaterGeometry::Polygon(polygon) => polygon.geodesic_area_signed().abs(),
        }
    }

    /// Vertices of the line, or of the exterior ring (closed) for polygons.
    pub fn vertices(&self) -> &[Coord<f64>] {
        match self {
            WaterGeometry::Line(line) => &line.0,
            WaterGeometry::Polygon(polygon) => &polygon.exterior().0,
        }
    }
}

/// Looks up every referenced node in order, keeping duplicates such as the
/// closing node of a ring.
pub fn resolve_coords(
    way_id: OsmId,
    node_ids: &[OsmId],
    nodes: &HashMap<OsmId, Node>,
) -> Result<Vec<Coord<f64>>> {
    node_ids
        .iter()
        .map(|node_id| {
            nodes
                .get(node_id)
                .map(|node| Coord {
                    x: node.lon,
                    y: node.lat,
                })
                .ok_or(Error::DanglingReference {
                    way_id,
                    node_id: *node_id,
                })
        })
        .collect()
}

pub fn assemble(way_id: OsmId, shape: Shape, coords: Vec<Coord<f64>>) -> Result<WaterGeometry> {
    let (required, found) = match shape {
        Shape::Linear => (MIN_LINE_VERTICES, coords.len()),
        // The closing node of a ring repeats the first and is not a vertex of its own.
        Shape::Areal => {
            let closed = coords.len() > 1 && coords.first() == coords.last();
            (MIN_POLYGON_VERTICES, coords.len() - usize::from(closed))
        }
    };
    if found < required {
        return Err(Error::InsufficientVertices {
            way_id,
            shape,
            found,
        });
    }

    let ring = LineString::new(coords);
    Ok(match shape {
        Shape::Linear => WaterGeometry::Line(ring),
        // `Polygon::new` closes the ring if the way left it open.
        Shape::Areal => WaterGeometry::Polygon(Polygon::new(ring, vec![])),
    })
}
