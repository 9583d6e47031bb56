use std::collections::HashMap;

use crate::data::osm::{Node, OsmId, Way};
use crate::data::water::{TypeRule, Waterbody, TYPE_RULES};
use crate::errors::Result;
use crate::geometry;

/// First rule whose key carries exactly the expected value.
pub fn match_rule(way: &Way) -> Option<&'static TypeRule> {
    TYPE_RULES
        .iter()
        .find(|rule| way.has_kv_pair(rule.tag_key, rule.tag_value))
}

/// Classifies a single way.
///
/// `Ok(None)` means no rule matched, which is the common case and not an
/// error. Missing nodes and degenerate geometries are reported as way-level
/// errors for the caller to skip.
pub fn classify_way(way: &Way, nodes: &HashMap<OsmId, Node>) -> Result<Option<Waterbody>> {
    let Some(rule) = match_rule(way) else {
        return Ok(None);
    };
    let coords = geometry::resolve_coords(way.id, &way.nodes, nodes)?;
    Waterbody::new(way.id, rule.kind, way.tag("name"), coords).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::water::{Shape, WaterbodyKind};
    use crate::errors::Error;

    fn way(id: OsmId, tags: &[(&str, &str)], nodes: Vec<OsmId>) -> Way {
        Way {
            id,
            nodes,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn nodes() -> HashMap<OsmId, Node> {
        [
            (10, 0.0, 0.0),
            (11, 0.0, 0.001),
            (20, 10.0, 50.0),
            (21, 10.001, 50.0),
            (22, 10.001, 50.001),
            (23, 10.0, 50.001),
        ]
        .into_iter()
        .map(|(id, lon, lat)| (id, Node { id, lon, lat }))
        .collect()
    }

    #[test]
    fn every_rule_classifies_its_tag() {
        for rule in &TYPE_RULES {
            let node_ids = match rule.kind.shape() {
                Shape::Linear => vec![10, 11],
                Shape::Areal => vec![20, 21, 22, 23, 20],
            };
            let way = way(1, &[(rule.tag_key, rule.tag_value)], node_ids);
            let waterbody = classify_way(&way, &nodes()).unwrap().unwrap();
            assert_eq!(waterbody.kind(), rule.kind);
        }
    }

    #[test]
    fn named_stream() {
        let way = way(1, &[("waterway", "stream"), ("name", "Mill Brook")], vec![10, 11]);
        let stream = classify_way(&way, &nodes()).unwrap().unwrap();

        assert_eq!(stream.kind(), WaterbodyKind::Stream);
        assert_eq!(stream.shape(), Shape::Linear);
        assert_eq!(stream.name(), "Mill Brook");
        assert!((stream.measurement() - 111.2).abs() < 1.0);
    }

    #[test]
    fn unnamed_pond() {
        let way = way(2, &[("water", "pond")], vec![20, 21, 22, 23, 20]);
        let pond = classify_way(&way, &nodes()).unwrap().unwrap();

        assert_eq!(pond.kind(), WaterbodyKind::Pond);
        assert_eq!(pond.shape(), Shape::Areal);
        assert_eq!(pond.name(), "unknown");
        assert!(pond.measurement() > 0.0);
    }

    #[test]
    fn unmatched_way_yields_nothing() {
        let ways = [
            way(3, &[("highway", "residential")], vec![10, 11]),
            way(4, &[("waterway", "ditch")], vec![10, 11]),
            way(5, &[("natural", "water")], vec![20, 21, 22, 20]),
            way(6, &[], vec![10, 11]),
        ];
        for way in &ways {
            assert!(classify_way(way, &nodes()).unwrap().is_none(), "way {}", way.id);
        }
    }

    #[test]
    fn unmatched_way_is_not_resolved() {
        // Nodes are only looked up once a rule matched.
        let way = way(7, &[("highway", "path")], vec![999]);
        assert!(classify_way(&way, &nodes()).unwrap().is_none());
    }

    #[test]
    fn first_rule_wins() {
        let way = way(8, &[("waterway", "river"), ("water", "lake")], vec![10, 11]);
        let river = classify_way(&way, &nodes()).unwrap().unwrap();
        assert_eq!(river.kind(), WaterbodyKind::River);

        let mut both = way.clone();
        both.tags.insert("waterway".to_string(), "stream".to_string());
        assert_eq!(match_rule(&both).map(|rule| rule.kind), Some(WaterbodyKind::Stream));
    }

    #[test]
    fn dangling_reference() {
        let way = way(9, &[("waterway", "canal")], vec![10, 12]);
        let err = classify_way(&way, &nodes()).unwrap_err();
        assert!(matches!(err, Error::DanglingReference { way_id: 9, node_id: 12 }));
        assert!(err.is_way_level());
    }

    #[test]
    fn degenerate_lake() {
        let way = way(10, &[("water", "lake")], vec![20, 21]);
        let err = classify_way(&way, &nodes()).unwrap_err();
        assert!(matches!(err, Error::InsufficientVertices { way_id: 10, found: 2, .. }));
    }
}
