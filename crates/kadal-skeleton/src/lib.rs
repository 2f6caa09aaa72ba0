//! Procedural 2D creature skeleton for kadal
//!
//! This crate implements:
//! - An arena of spring-jointed bones rooted at a mobile body
//! - Limb chains that reach toward a target at a bounded speed
//! - A stance/swing footstep cycle for legs
//! - Body dynamics that chase a pointer and drag the skeleton along
//! - A host-driven simulation with a fixed tick interval

pub mod angle;
pub mod canvas;
pub mod creature;
pub mod error;
pub mod footstep;
pub mod input;
pub mod limb;
pub mod lizard;
pub mod rng;
pub mod segment;
pub mod simulation;
pub mod skeleton;
pub mod types;

// Re-export main types for convenience
pub use canvas::{Canvas, LineRecorder};
pub use creature::{BodyDynamics, Creature, MotionParams};
pub use error::{SimulationError, SkeletonError};
pub use footstep::{FootstepController, Step};
pub use input::{InputSnapshot, PointerTracker};
pub use limb::{LimbKind, LimbSystem};
pub use lizard::{build_lizard, LizardConfig};
pub use rng::StepRng;
pub use segment::{Segment, SegmentParams};
pub use simulation::{Simulation, TICK_INTERVAL};
pub use skeleton::Skeleton;
pub use types::{Anchor, Pose, SegmentId};
