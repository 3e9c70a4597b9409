use thiserror::Error;

/// Top-level error type for the buffer engine.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to geometric computations and input validation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("at least {expected} points are required, got {actual}")]
    TooFewPoints { expected: usize, actual: usize },

    #[error("ring is not closed")]
    RingNotClosed,

    #[error("zero-length segment at ({x}, {y})")]
    ZeroLengthSegment { x: f64, y: f64 },
}

/// Errors raised while resolving the planar topology of noded offset curves.
///
/// These indicate that the noded curve arrangement is inconsistent (usually
/// due to floating-point rounding) and trigger the precision-reduction retry
/// in the top-level buffer operation.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("depth mismatch at ({x}, {y})")]
    DepthMismatch { x: f64, y: f64 },

    #[error("no edge with assigned depths at node ({x}, {y})")]
    UnlabelledNode { x: f64, y: f64 },

    #[error("no outgoing result edge at node ({x}, {y})")]
    NoOutgoingEdge { x: f64, y: f64 },

    #[error("directed edge visited twice during ring building at ({x}, {y})")]
    EdgeVisitedTwice { x: f64, y: f64 },

    #[error("result ring is not closed")]
    RingNotClosed,

    #[error("found two shells in one minimal ring set")]
    MultipleShells,

    #[error("unable to assign hole to a shell")]
    UnassignedHole,

    #[error("inconsistency in rightmost edge search")]
    RightmostInconsistency,
}

/// Convenience type alias for results using [`BufferError`].
pub type Result<T> = std::result::Result<T, BufferError>;
