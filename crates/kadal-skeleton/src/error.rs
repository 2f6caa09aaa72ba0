use thiserror::Error;

use crate::types::SegmentId;

/// Construction errors for skeletons and limb chains
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkeletonError {
    #[error("segment length must be positive and finite, got {0}")]
    NonPositiveLength(f32),

    #[error("segment stiffness must be finite and at least 1, got {0}")]
    InvalidStiffness(f32),

    #[error("segment range must be finite and non-negative, got {0}")]
    InvalidRange(f32),

    #[error("segment rest angle must be finite, got {0}")]
    InvalidAngle(f32),

    #[error("limb speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    #[error("{0} does not belong to this skeleton")]
    UnknownSegment(SegmentId),
}

/// Errors raised while driving a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("simulation has been disposed")]
    Disposed,
}
