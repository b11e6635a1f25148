use thiserror::Error;

/// Structural defects the engine detects while sorting, addressing, or merging.
///
/// These are never returned from tree operations. The engine's contract is
/// "log and degrade": the offending operation emits the diagnostic through
/// `tracing` and falls back to a conservative result (unchanged tree, `None`
/// address, `0` count) so a single malformed subgraph cannot take down an
/// otherwise-working run session.
#[derive(Error, Debug, Clone)]
pub enum StructuralError {
    #[error("graph has no start node; returning steps unsorted")]
    MissingStartNode,

    #[error("location {0:?} does not resolve to a step")]
    LocationNotFound(Vec<usize>),

    #[error("no step in the tree matches identity '{identity}'; insert skipped")]
    IdentityNotFound { identity: String },

    #[error("run nesting exceeds the maximum of {max} levels; tree left unchanged")]
    NestingTooDeep { max: usize },
}

/// Returned when a step shape that a run cannot start from is promoted to a root.
#[derive(Error, Debug, Clone)]
#[error(
    "a run must start from a directory, a multi-step routine, or a single routine, but got a '{kind}' step"
)]
pub struct InvalidRootStep {
    pub kind: &'static str,
}

/// Failure reported by the external run API when persisting progress.
///
/// The engine performs no retry or backoff; the error is handed straight back
/// to the caller.
#[derive(Error, Debug, Clone)]
#[error("run progress API call failed: {0}")]
pub struct ApiError(pub String);
