use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::Result;

use self::osm::{Element, Node, OsmDocument, OsmId, RawElement, Way};

pub mod osm;
pub mod water;

/// Map data as found in the input document, split by element kind. Relations
/// and anything else that is neither a node nor a way are discarded.
///
/// Read-only once built; classification borrows it for every way.
#[derive(Debug, Default, Clone)]
pub struct OsmMapData {
    pub nodes: HashMap<OsmId, Node>,
    pub ways: HashMap<OsmId, Way>,
    way_order: Vec<OsmId>,
}

impl OsmMapData {
    pub fn from_elements(elements: impl IntoIterator<Item = RawElement>) -> Result<Self> {
        let mut data = OsmMapData::default();
        for raw in elements {
            match Element::try_from(raw)? {
                Element::Node(node) => {
                    data.nodes.insert(node.id, node);
                }
                Element::Way(way) => {
                    // A repeated id replaces the record but keeps its first position.
                    let id = way.id;
                    if data.ways.insert(id, way).is_none() {
                        data.way_order.push(id);
                    }
                }
                Element::Other => (),
            }
        }
        Ok(data)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let document: OsmDocument = serde_json::from_reader(reader)?;
        Self::from_elements(document.elements)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Ways in the order they first appeared in the input.
    pub fn ways_in_order(&self) -> impl Iterator<Item = &Way> + '_ {
        self.way_order.iter().filter_map(|id| self.ways.get(id))
    }
}
