use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::{Error, Result};

pub type OsmId = i64;
pub type Tags = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: OsmId,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    pub id: OsmId,
    pub nodes: Vec<OsmId>,
    pub tags: Tags,
}

impl Way {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn has_kv_pair(&self, key: &str, value: &str) -> bool {
        self.tag(key) == Some(value)
    }
}

/// One entry of the `elements` array, as found in Overpass-style JSON exports.
///
/// Every field is optional here so that missing data can be reported as a
/// malformed-input error naming the element, instead of a bare serde message.
#[derive(Deserialize, Debug)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub element_type: Option<String>,
    pub id: Option<OsmId>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub nodes: Option<Vec<OsmId>>,
    pub tags: Option<Tags>,
}

#[derive(Deserialize, Debug)]
pub struct OsmDocument {
    pub elements: Vec<RawElement>,
}

/// A validated element. Relations and other kinds are dropped during conversion.
#[derive(Debug)]
pub enum Element {
    Node(Node),
    Way(Way),
    Other,
}

impl TryFrom<RawElement> for Element {
    type Error = Error;

    fn try_from(raw: RawElement) -> Result<Self> {
        let element_type = raw
            .element_type
            .ok_or_else(|| Error::malformed("element without a `type` field"))?;
        let id = raw.id.ok_or_else(|| {
            Error::malformed(format!("{element_type} element without an `id` field"))
        })?;

        match element_type.as_str() {
            "node" => {
                let (Some(lat), Some(lon)) = (raw.lat, raw.lon) else {
                    return Err(Error::malformed(format!("node {id} lacks lat/lon")));
                };
                Ok(Element::Node(Node { id, lon, lat }))
            }
            "way" => {
                let nodes = raw
                    .nodes
                    .ok_or_else(|| Error::malformed(format!("way {id} lacks a `nodes` array")))?;
                Ok(Element::Way(Way {
                    id,
                    nodes,
                    tags: raw.tags.unwrap_or_default(),
                }))
            }
            _ => Ok(Element::Other),
        }
    }
}
