use thiserror::Error;

/// Invariant violations raised when building or refreshing a shape.
///
/// These indicate a programming error on the caller's side. Degenerate geometry is never reported here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex count is fixed at {expected}, got {found}")]
    VertexCountMismatch { expected: usize, found: usize },
}
