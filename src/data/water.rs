use std::fmt;

use geo::Coord;

use crate::data::osm::OsmId;
use crate::errors::Result;
use crate::geometry::{self, WaterGeometry};

pub const UNKNOWN_NAME: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Open polyline, measured by length.
    Linear,
    /// Closed ring, measured by area.
    Areal,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Linear => write!(f, "line"),
            Shape::Areal => write!(f, "polygon"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WaterbodyKind {
    Stream,
    River,
    Canal,
    Lake,
    Pond,
    Reservoir,
}

impl WaterbodyKind {
    pub fn shape(self) -> Shape {
        match self {
            WaterbodyKind::Stream | WaterbodyKind::River | WaterbodyKind::Canal => Shape::Linear,
            WaterbodyKind::Lake | WaterbodyKind::Pond | WaterbodyKind::Reservoir => Shape::Areal,
        }
    }

    /// Value of the `TYPE` attribute on export.
    pub fn label(self) -> &'static str {
        match self {
            WaterbodyKind::Stream => "Stream",
            WaterbodyKind::River => "River",
            WaterbodyKind::Canal => "Canal",
            WaterbodyKind::Lake => "Lake",
            WaterbodyKind::Pond => "Pond",
            WaterbodyKind::Reservoir => "Reservoir",
        }
    }
}

impl fmt::Display for WaterbodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TypeRule {
    pub tag_key: &'static str,
    pub tag_value: &'static str,
    pub kind: WaterbodyKind,
}

/// Evaluation order matters: the first matching rule wins.
pub static TYPE_RULES: [TypeRule; 6] = [
    TypeRule { tag_key: "waterway", tag_value: "stream", kind: WaterbodyKind::Stream },
    TypeRule { tag_key: "waterway", tag_value: "river", kind: WaterbodyKind::River },
    TypeRule { tag_key: "waterway", tag_value: "canal", kind: WaterbodyKind::Canal },
    TypeRule { tag_key: "water", tag_value: "lake", kind: WaterbodyKind::Lake },
    TypeRule { tag_key: "water", tag_value: "pond", kind: WaterbodyKind::Pond },
    TypeRule { tag_key: "water", tag_value: "reservoir", kind: WaterbodyKind::Reservoir },
];

/// A classified waterbody. The measurement is derived from the geometry when
/// the value is built and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Waterbody {
    way_id: OsmId,
    name: String,
    kind: WaterbodyKind,
    geometry: WaterGeometry,
    measurement: f64,
}

impl Waterbody {
    pub fn new(
        way_id: OsmId,
        kind: WaterbodyKind,
        name: Option<&str>,
        coords: Vec<Coord<f64>>,
    ) -> Result<Self> {
        let geometry = geometry::assemble(way_id, kind.shape(), coords)?;
        let measurement = geometry.measure();
        Ok(Waterbody {
            way_id,
            name: name.unwrap_or(UNKNOWN_NAME).to_string(),
            kind,
            geometry,
            measurement,
        })
    }

    pub fn way_id(&self) -> OsmId {
        self.way_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> WaterbodyKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.kind.shape()
    }

    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn geometry(&self) -> &WaterGeometry {
        &self.geometry
    }

    /// Length in meters or area in square meters, depending on the shape.
    pub fn measurement(&self) -> f64 {
        self.measurement
    }
}

impl fmt::Display for Waterbody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.shape() {
            Shape::Linear => "m",
            Shape::Areal => "m²",
        };
        write!(f, "{} {} {:.2} {}", self.kind, self.name, self.measurement, unit)
    }
}

/// Output buckets handed to the export stage, in classification order.
#[derive(Debug, Default, Clone)]
pub struct Partitioned {
    pub linear: Vec<Waterbody>,
    pub areal: Vec<Waterbody>,
}

impl Partitioned {
    pub fn push(&mut self, waterbody: Waterbody) {
        match waterbody.shape() {
            Shape::Linear => self.linear.push(waterbody),
            Shape::Areal => self.areal.push(waterbody),
        }
    }

    pub fn len(&self) -> usize {
        self.linear.len() + self.areal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<Waterbody> for Partitioned {
    fn extend<T: IntoIterator<Item = Waterbody>>(&mut self, iter: T) {
        for waterbody in iter {
            self.push(waterbody);
        }
    }
}
