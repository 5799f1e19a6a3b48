//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`EngineError`] covers all failure modes described
//! in the error-handling design: recipe/compile errors, resource-planning
//! errors, barrier-planning errors, and runtime errors. Frame-transient
//! conditions (unhandled pass, barrier fallback) are *not* represented
//! here — they are counted in [`crate::telemetry`] rather than raised,
//! since a single bad pass must not abort a frame.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, EngineError>`.

use thiserror::Error;

/// Severity attached to an [`EngineError`], used by the frame executor to
/// decide whether to abort the frame, degrade with a warning, or continue
/// using the previous valid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

/// The main error type for the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    // ========================================================================
    // Recipe / compile-time errors
    // ========================================================================
    /// The recipe references a `PassId` with no entry in the contract registry.
    #[error("unknown pass id: {0:?}")]
    UnknownPassId(crate::render_path::pass_id::PassId),

    /// A pass id appears more than once in a recipe's pass chain.
    #[error("duplicate pass id in chain: {0:?}")]
    DuplicatePassId(crate::render_path::pass_id::PassId),

    /// A required pass is not eligible on the active backend.
    #[error("required pass {0:?} is not supported on backend {1}")]
    PassNotSupportedOnBackend(crate::render_path::pass_id::PassId, String),

    /// A required pass named in the recipe never appears in the compiled chain.
    #[error("required pass {0:?} is missing from the compiled plan")]
    RequiredPassMissing(crate::render_path::pass_id::PassId),

    /// A compiled pass declares an input semantic with no earlier producer.
    #[error("pass {0:?} requires semantic {1:?} with no preceding producer")]
    UnresolvedInputSemantic(
        crate::render_path::pass_id::PassId,
        crate::render_path::semantic::PassSemantic,
    ),

    // ========================================================================
    // Resource-planning errors
    // ========================================================================
    /// A consumer binding has no producing resource for its input semantic.
    #[error("no producer resource for pass {0:?} input {1:?}")]
    MissingProducer(
        crate::render_path::pass_id::PassId,
        crate::render_path::semantic::PassSemantic,
    ),

    /// Two resources were grouped into the same alias class but their
    /// allocation descriptors disagree.
    #[error("alias conflict between resources {0} and {1}: allocation descriptors differ")]
    AliasingConflict(usize, usize),

    // ========================================================================
    // Barrier-planning errors
    // ========================================================================
    /// No path exists in the compiled chain connecting a producer to a consumer.
    #[error("no reachable producer -> consumer path for semantic {0:?}")]
    UnreachablePath(crate::render_path::semantic::PassSemantic),

    /// Two passes make conflicting access demands on the same semantic at
    /// the same point in the chain.
    #[error("conflicting access demands on semantic {0:?} between passes {1:?} and {2:?}")]
    ConflictingAccess(
        crate::render_path::semantic::PassSemantic,
        crate::render_path::pass_id::PassId,
        crate::render_path::pass_id::PassId,
    ),

    // ========================================================================
    // Runtime errors
    // ========================================================================
    /// GPU backend initialization failed; this is fatal.
    #[error("backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// A requested swapchain feature is unsupported; the caller should
    /// degrade (e.g. disable history copy) rather than abort.
    #[error("unsupported swapchain feature: {0}")]
    UnsupportedSwapchainFeature(String),

    // ========================================================================
    // Serialization / telemetry
    // ========================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Classifies this error for the executor's propagation policy.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::BackendInitFailed(_) => Severity::Fatal,
            EngineError::UnsupportedSwapchainFeature(_) => Severity::Warning,
            EngineError::Json(_) | EngineError::Io(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Alias for `Result<T, EngineError>`.
pub type Result<T> = std::result::Result<T, EngineError>;
