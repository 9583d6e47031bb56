//! Export of classified waterbodies.
//!
//! A sink receives one feature per waterbody (name, type label, measurement
//! and geometry) and writes them out when finished. The measurement is rounded
//! to two decimals here and nowhere earlier.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

use crate::data::water::{Shape, Waterbody};
use crate::errors::{Error, Result};
use crate::geometry::WaterGeometry;

pub trait FeatureSink {
    fn add_feature(&mut self, waterbody: &Waterbody) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

pub fn round_measurement(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn geojson_value(geometry: &WaterGeometry) -> Value {
    let positions: Vec<Vec<f64>> = geometry.vertices().iter().map(|c| vec![c.x, c.y]).collect();
    match geometry {
        WaterGeometry::Line(_) => Value::LineString(positions),
        WaterGeometry::Polygon(_) => Value::Polygon(vec![positions]),
    }
}

fn crs_member() -> JsonValue {
    json!({
        "type": "name",
        "properties": { "name": "urn:ogc:def:crs:EPSG::4326" }
    })
}

/// Writes one layer (linear or areal) as a GeoJSON `FeatureCollection` in EPSG:4326.
pub struct GeoJsonSink {
    path: PathBuf,
    shape: Shape,
    collection: FeatureCollection,
}

impl GeoJsonSink {
    pub fn new(path: &Path, shape: Shape) -> Self {
        let mut foreign_members = JsonObject::new();
        foreign_members.insert("name".to_string(), Self::layer_name_for(shape).into());
        foreign_members.insert("crs".to_string(), crs_member());
        GeoJsonSink {
            path: path.to_path_buf(),
            shape,
            collection: FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: Some(foreign_members),
            },
        }
    }

    fn layer_name_for(shape: Shape) -> &'static str {
        match shape {
            Shape::Linear => "Linear Features",
            Shape::Areal => "Areal Features",
        }
    }

    pub fn layer_name(&self) -> &'static str {
        Self::layer_name_for(self.shape)
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }

    fn write_to(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.collection)
            .map_err(|err| Error::Export(format!("{}: {err}", self.path.display())))
    }
}

impl FeatureSink for GeoJsonSink {
    fn add_feature(&mut self, waterbody: &Waterbody) -> Result<()> {
        if waterbody.shape() != self.shape {
            return Err(format!(
                "{} layer cannot hold {} {}",
                self.layer_name(),
                waterbody.type_label(),
                waterbody.way_id()
            )
            .into());
        }

        let measure_field = match self.shape {
            Shape::Linear => "LENGTH",
            Shape::Areal => "AREA",
        };
        let mut properties = JsonObject::new();
        properties.insert("NAME".to_string(), waterbody.name().into());
        properties.insert("TYPE".to_string(), waterbody.type_label().into());
        properties.insert(
            measure_field.to_string(),
            round_measurement(waterbody.measurement()).into(),
        );
        self.collection.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson_value(waterbody.geometry()))),
            id: Some(Id::Number(waterbody.way_id().into())),
            properties: Some(properties),
            foreign_members: None,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
