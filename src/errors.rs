use std::io;

use crate::data::osm::OsmId;
use crate::data::water::Shape;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document could not be read as an OSM element list.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A way references a node that is not in the node index.
    #[error("way {way_id} references missing node {node_id}")]
    DanglingReference { way_id: OsmId, node_id: OsmId },

    #[error("way {way_id} has {found} vertices, too few for a {shape}")]
    InsufficientVertices {
        way_id: OsmId,
        shape: Shape,
        found: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Way-level errors only skip the offending way; everything else aborts the run.
    pub fn is_way_level(&self) -> bool {
        matches!(
            self,
            Error::DanglingReference { .. } | Error::InsufficientVertices { .. }
        )
    }

    pub fn category(&self) -> &'static str {
        match self {
            Error::MalformedInput { .. } => "MalformedInputError",
            Error::DanglingReference { .. } => "DanglingReferenceError",
            Error::InsufficientVertices { .. } => "InsufficientVerticesError",
            Error::Config(_) => "ConfigError",
            Error::Export(_) => "ExportError",
            Error::Io(_) => "IoError",
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::MalformedInput {
            reason: value.to_string(),
        }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Export(value.to_string())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Export(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn way_level_errors_are_recoverable() {
        let dangling = Error::DanglingReference {
            way_id: 1,
            node_id: 2,
        };
        let degenerate = Error::InsufficientVertices {
            way_id: 1,
            shape: Shape::Areal,
            found: 2,
        };
        assert!(dangling.is_way_level());
        assert!(degenerate.is_way_level());
        assert!(!Error::malformed("no elements").is_way_level());
    }

    #[test]
    fn json_errors_become_malformed_input() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.category(), "MalformedInputError");
    }

    #[test]
    fn messages_name_the_offending_ids() {
        let err = Error::DanglingReference {
            way_id: 7,
            node_id: 99,
        };
        assert_eq!(err.to_string(), "way 7 references missing node 99");
    }
}
