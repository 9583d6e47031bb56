//! Extraction of waterbodies from OpenStreetMap JSON exports.
//!
//! Ways tagged `waterway=stream|river|canal` become linear features measured
//! by geodesic length; ways tagged `water=lake|pond|reservoir` become areal
//! features measured by geodesic area on WGS84. The two kinds are exported
//! as separate layers.

pub mod config;
pub mod data;
pub mod errors;
pub mod etl;
pub mod geometry;
pub mod sink;

pub use config::UserConfig;
pub use data::water::{Partitioned, Shape, Waterbody, WaterbodyKind};
pub use data::OsmMapData;
pub use errors::{Error, Result};
pub use etl::extract_water::{extract_waterbodies, run_extraction, ExtractionReport, WaterbodyEtl};
pub use etl::Etl;
