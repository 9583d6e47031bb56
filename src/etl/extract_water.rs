use std::fs;

use log::{info, warn};

use crate::config::UserConfig;
use crate::data::water::{Partitioned, Shape};
use crate::data::OsmMapData;
use crate::errors::{Error, Result};
use crate::etl::classify::classify_way;
use crate::sink::{FeatureSink, GeoJsonSink};

use super::Etl;

pub const ETL_NAME: &str = "extract_water";

/// Per-run counters. Every way in the input lands in exactly one of
/// `linear`, `areal`, `unmatched`, `dangling` or `degenerate`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionReport {
    pub ways: usize,
    pub linear: usize,
    pub areal: usize,
    pub unmatched: usize,
    pub dangling: usize,
    pub degenerate: usize,
}

impl ExtractionReport {
    pub fn skipped(&self) -> usize {
        self.dangling + self.degenerate
    }
}

/// Classifies every way in input order and routes the results into the
/// linear and areal buckets. Way-level failures skip that way only.
pub fn extract_waterbodies(data: &OsmMapData) -> Result<(Partitioned, ExtractionReport)> {
    let mut buckets = Partitioned::default();
    let mut report = ExtractionReport::default();

    for way in data.ways_in_order() {
        report.ways += 1;
        match classify_way(way, &data.nodes) {
            Ok(Some(waterbody)) => buckets.push(waterbody),
            Ok(None) => report.unmatched += 1,
            Err(err) if err.is_way_level() => {
                match &err {
                    Error::DanglingReference { .. } => report.dangling += 1,
                    _ => report.degenerate += 1,
                }
                let message = err.to_string();
                warn!(way_id = way.id, category = err.category(), err = message.as_str(); "Skipping way");
            }
            Err(err) => return Err(err),
        }
    }

    report.linear = buckets.linear.len();
    report.areal = buckets.areal.len();
    Ok((buckets, report))
}

pub struct WaterbodyEtl<'a> {
    config: &'a UserConfig,
    report: Option<ExtractionReport>,
}

impl WaterbodyEtl<'_> {
    pub fn new(config: &UserConfig) -> WaterbodyEtl {
        WaterbodyEtl {
            config,
            report: None,
        }
    }

    /// Counters of the last transform, if one ran.
    pub fn report(&self) -> Option<ExtractionReport> {
        self.report
    }

    fn write_layer(&self, shape: Shape, buckets: &Partitioned) -> Result<()> {
        let (path, waterbodies) = match shape {
            Shape::Linear => (&self.config.linear_output_path, &buckets.linear),
            Shape::Areal => (&self.config.areal_output_path, &buckets.areal),
        };
        let mut sink = GeoJsonSink::new(path, shape);
        for waterbody in waterbodies {
            sink.add_feature(waterbody)?;
        }
        sink.finish()?;
        let path = path.display().to_string();
        info!(
            etl_name = ETL_NAME,
            layer = sink.layer_name(),
            features = sink.len(),
            path = path.as_str();
            "Wrote layer"
        );
        Ok(())
    }
}

/// Runs the extraction for `config`. Existing outputs are only replaced once
/// the new layers are ready to be written; `None` means they were kept.
pub fn run_extraction(config: &UserConfig) -> Result<Option<ExtractionReport>> {
    let mut etl = WaterbodyEtl::new(config);
    if !etl.process()? {
        return Ok(None);
    }
    Ok(etl.report())
}

impl Etl for WaterbodyEtl<'_> {
    type Input = OsmMapData;
    type Output = Partitioned;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self) -> Result<bool> {
        if self.config.overwrite {
            return Ok(false);
        }
        Ok(self.config.linear_output_path.try_exists()?
            && self.config.areal_output_path.try_exists()?)
    }

    fn clean(&self) -> Result<()> {
        for path in [&self.config.linear_output_path, &self.config.areal_output_path] {
            if path.try_exists()? {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn extract(&mut self) -> Result<Self::Input> {
        let data = OsmMapData::from_path(&self.config.input_path)?;
        info!(etl_name = ETL_NAME, nodes = data.nodes.len(), ways = data.ways.len(); "Indexed input");
        Ok(data)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let (buckets, report) = extract_waterbodies(&input)?;
        info!(
            etl_name = ETL_NAME,
            ways = report.ways,
            linear = report.linear,
            areal = report.areal,
            unmatched = report.unmatched,
            skipped = report.skipped();
            "Classified ways"
        );
        self.report = Some(report);
        Ok(buckets)
    }

    fn load(&mut self, output: Self::Output) -> Result<()> {
        self.write_layer(Shape::Linear, &output)?;
        self.write_layer(Shape::Areal, &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::water::WaterbodyKind;

    const DOC: &str = r#"{"elements": [
        {"type": "node", "id": 10, "lat": 0.0, "lon": 0.0},
        {"type": "node", "id": 11, "lat": 0.001, "lon": 0.0},
        {"type": "node", "id": 12, "lat": 0.001, "lon": 0.001},
        {"type": "way", "id": 1, "nodes": [10, 11], "tags": {"waterway": "stream", "name": "Mill Brook"}},
        {"type": "way", "id": 2, "nodes": [10, 99], "tags": {"waterway": "river"}},
        {"type": "way", "id": 3, "nodes": [10, 11, 12, 10], "tags": {"water": "pond"}},
        {"type": "way", "id": 4, "nodes": [10, 11], "tags": {"highway": "path"}},
        {"type": "way", "id": 5, "nodes": [10, 11], "tags": {"water": "reservoir"}},
        {"type": "way", "id": 6, "nodes": [11, 10], "tags": {"waterway": "canal", "water": "lake"}}
    ]}"#;

    #[test]
    fn bad_ways_are_skipped_and_counted() {
        let data = OsmMapData::from_reader(DOC.as_bytes()).unwrap();
        let (buckets, report) = extract_waterbodies(&data).unwrap();

        assert_eq!(
            report,
            ExtractionReport {
                ways: 6,
                linear: 2,
                areal: 1,
                unmatched: 1,
                dangling: 1,
                degenerate: 1,
            }
        );
        assert_eq!(report.skipped(), 2);

        let linear: Vec<(WaterbodyKind, &str)> = buckets
            .linear
            .iter()
            .map(|w| (w.kind(), w.name()))
            .collect();
        assert_eq!(
            linear,
            vec![(WaterbodyKind::Stream, "Mill Brook"), (WaterbodyKind::Canal, "unknown")]
        );
        assert_eq!(buckets.areal[0].kind(), WaterbodyKind::Pond);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let data = OsmMapData::from_reader(r#"{"elements": []}"#.as_bytes()).unwrap();
        let (buckets, report) = extract_waterbodies(&data).unwrap();
        assert!(buckets.is_empty());
        assert_eq!(report, ExtractionReport::default());
    }
}
