//! Stance/swing footstep cycle for legs
//!
//! The controller only tracks the foothold; moving the leg chain toward it
//! is [`crate::LimbSystem::move_to`]'s job. Each leg runs its own cycle:
//! - Stance: the foot holds its goal until the body drags it more than
//!   [`STEP_TOLERANCE`] away, then a new goal is picked inside the reach arc
//! - Swing: the foot chases the goal until its forward progress relative
//!   to the hip stalls, then the goal is committed to where the foot is

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::angle::wrap_angle;
use crate::rng::StepRng;
use crate::types::Pose;

/// Foot drift that breaks a stance
pub const STEP_TOLERANCE: f32 = 1.0;

/// Squared forwardness change under which a swing settles
pub const SETTLE_THRESHOLD: f32 = 1.0;

/// Stride length as a fraction of the hip-to-foot rest distance
pub const REACH_FACTOR: f32 = 0.9;

/// Largest random offset of a new foothold, as a fraction of reach
pub const JITTER_FACTOR: f32 = 0.5;

/// Footstep phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Step {
    /// Foot planted on its goal
    #[default]
    Stance = 0,
    /// Foot reaching for a new goal
    Swing = 1,
}

impl Step {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Per-leg footstep state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootstepController {
    goal: Vec2,
    step: Step,
    forwardness: f32,
    reach: f32,
    swing: f32,
    swing_offset: f32,
}

impl FootstepController {
    /// Derive the stride from the leg's rest pose.
    ///
    /// `foot` and `hip` are the end-effector position and hip pose at build
    /// time; `body_angle` is the creature heading at build time.
    pub fn new(foot: Vec2, hip: Pose, body_angle: f32) -> Self {
        let to_foot = foot - hip.position;
        let reach = REACH_FACTOR * to_foot.length();

        let bearing = wrap_angle(body_angle - to_foot.y.atan2(to_foot.x));
        let side = if bearing < 0.0 { 1.0 } else { -1.0 };
        let swing = -bearing + side * FRAC_PI_2;

        Self {
            goal: foot,
            step: Step::Stance,
            forwardness: 0.0,
            reach,
            swing,
            swing_offset: body_angle - hip.angle,
        }
    }

    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_planted(&self) -> bool {
        self.step == Step::Stance
    }

    pub fn forwardness(&self) -> f32 {
        self.forwardness
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    pub fn swing(&self) -> f32 {
        self.swing
    }

    pub fn swing_offset(&self) -> f32 {
        self.swing_offset
    }

    /// Advance the cycle given where the foot ended up this tick.
    ///
    /// Returns the new phase when a transition happened.
    pub fn advance<R: StepRng + ?Sized>(&mut self, foot: Vec2, hip: Pose, rng: &mut R) -> Option<Step> {
        match self.step {
            Step::Stance => {
                if foot.distance(self.goal) > STEP_TOLERANCE {
                    self.goal = self.pick_goal(hip, rng);
                    self.step = Step::Swing;
                    return Some(Step::Swing);
                }
            }
            Step::Swing => {
                let forwardness = Self::measure_forwardness(foot, hip);
                let delta = self.forwardness - forwardness;
                self.forwardness = forwardness;
                if delta * delta < SETTLE_THRESHOLD {
                    self.goal = foot;
                    self.step = Step::Stance;
                    return Some(Step::Stance);
                }
            }
        }
        None
    }

    /// New foothold: `reach` ahead along the swing bearing plus a random
    /// offset of at most `reach * JITTER_FACTOR`.
    pub fn pick_goal<R: StepRng + ?Sized>(&self, hip: Pose, rng: &mut R) -> Vec2 {
        let bearing = self.swing + hip.angle + self.swing_offset;
        let max_jitter = self.reach * JITTER_FACTOR;
        let jitter = Vec2::new(rng.signed_unit(), rng.signed_unit()) * max_jitter;
        hip.position + Vec2::from_angle(bearing) * self.reach + jitter.clamp_length_max(max_jitter)
    }

    /// Foot position projected onto the hip's forward axis
    pub fn measure_forwardness(foot: Vec2, hip: Pose) -> f32 {
        let offset = foot - hip.position;
        let theta = offset.y.atan2(offset.x) - hip.angle;
        offset.length() * theta.cos()
    }
}
