use thiserror::Error;

use crate::edge::{Corner, EdgeSide};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown edge side: {0}")]
    UnknownEdge(String),
    #[error("duplicate edge side: {0}")]
    DuplicateEdge(EdgeSide),
    #[error("unknown corner: {0}")]
    UnknownCorner(String),
    #[error("duplicate corner: {0}")]
    DuplicateCorner(Corner),
    #[error("unknown face: {0}")]
    UnknownFace(String),
    #[error("unknown groove target: {0}")]
    UnknownGrooveTarget(String),
    #[error("unknown hole kind: {0}")]
    UnknownHoleKind(String),
    #[error("unknown service family: {0}")]
    UnknownFamily(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
