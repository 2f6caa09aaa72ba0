//! Creature body: pose dynamics and skeleton root
//!
//! The body accelerates toward a target, turns to face it and drags its
//! skeleton along. Bones trail behind the direction of travel, so the
//! skeleton sees the body heading flipped by PI while it is propagated.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, PI, SQRT_2};

use crate::angle::wrap_angle;
use crate::canvas::Canvas;
use crate::error::SkeletonError;
use crate::limb::LimbSystem;
use crate::rng::StepRng;
use crate::segment::SegmentParams;
use crate::skeleton::Skeleton;
use crate::types::{Anchor, Pose, SegmentId};

/// Radius of the drawn head outline
pub const HEAD_RADIUS: f32 = 4.0;

/// Line strokes used to approximate the head arc
const HEAD_ARC_STEPS: usize = 12;

/// Accelerate/resist/friction parameters for one degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionParams {
    /// Speed added per tick while the target is outside the threshold
    pub accel: f32,
    /// Speed removed per tick after resistance
    pub friction: f32,
    /// Fraction of speed lost per tick
    pub resistance: f32,
    /// Dead band below which no acceleration is applied
    pub threshold: f32,
}

impl MotionParams {
    pub fn new(accel: f32, friction: f32, resistance: f32, threshold: f32) -> Self {
        Self {
            accel,
            friction,
            resistance,
            threshold,
        }
    }
}

/// Forward and rotational dynamics of a creature body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyDynamics {
    pub forward: MotionParams,
    pub rotation: MotionParams,
}

impl BodyDynamics {
    /// Dynamics tuned for the lizard at the given body scale
    pub fn lizard(scale: f32) -> Self {
        Self {
            forward: MotionParams::new(scale * 10.0, scale * 2.0, 0.5, 16.0),
            rotation: MotionParams::new(0.5, 0.085, 0.5, 0.3),
        }
    }
}

/// Root body owning the skeleton and its limbs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    skeleton: Skeleton,
    limbs: Vec<LimbSystem>,
    dynamics: BodyDynamics,
    forward_speed: f32,
    speed: f32,
    rotation_speed: f32,
}

impl Creature {
    pub fn new(position: Vec2, angle: f32, dynamics: BodyDynamics) -> Self {
        Self {
            skeleton: Skeleton::new(Pose::new(position, angle)),
            limbs: Vec::new(),
            dynamics,
            forward_speed: 0.0,
            speed: 0.0,
            rotation_speed: 0.0,
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn limbs(&self) -> &[LimbSystem] {
        &self.limbs
    }

    pub fn dynamics(&self) -> &BodyDynamics {
        &self.dynamics
    }

    pub fn pose(&self) -> Pose {
        self.skeleton.root()
    }

    pub fn position(&self) -> Vec2 {
        self.skeleton.root().position
    }

    pub fn angle(&self) -> f32 {
        self.skeleton.root().angle
    }

    /// Accumulated forward speed before friction
    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    /// Distance covered on the last tick
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn add_segment(
        &mut self,
        parent: Anchor,
        params: SegmentParams,
    ) -> Result<SegmentId, SkeletonError> {
        self.skeleton.add_segment(parent, params)
    }

    /// Attach a pointer-chasing limb ending at `end`; returns its index
    pub fn attach_limb(
        &mut self,
        end: SegmentId,
        length: usize,
        speed: f32,
    ) -> Result<usize, SkeletonError> {
        let limb = LimbSystem::new(&self.skeleton, end, length, speed)?;
        self.limbs.push(limb);
        Ok(self.limbs.len() - 1)
    }

    /// Attach a walking leg ending at `end`; returns its index
    pub fn attach_leg(
        &mut self,
        end: SegmentId,
        length: usize,
        speed: f32,
    ) -> Result<usize, SkeletonError> {
        let leg = LimbSystem::leg(&self.skeleton, end, length, speed, self.angle())?;
        self.limbs.push(leg);
        Ok(self.limbs.len() - 1)
    }

    pub fn leg_count(&self) -> usize {
        self.limbs.iter().filter(|limb| limb.is_leg()).count()
    }

    /// Fraction of legs currently planted, or `None` without legs
    pub fn planted_fraction(&self) -> Option<f32> {
        let legs = self.leg_count();
        if legs == 0 {
            return None;
        }
        let planted = self
            .limbs
            .iter()
            .filter_map(|limb| limb.footstep())
            .filter(|footstep| footstep.is_planted())
            .count();
        Some(planted as f32 / legs as f32)
    }

    /// Advance one tick toward `target`.
    pub fn follow<R: StepRng + ?Sized>(&mut self, target: Vec2, rng: &mut R) {
        let pose = self.skeleton.root();
        let forward = self.dynamics.forward;
        let rotation = self.dynamics.rotation;

        let to_target = target - pose.position;
        let dist = to_target.length();
        let bearing = to_target.y.atan2(to_target.x);

        // Forward speed, throttled by how many legs are planted
        let accel = forward.accel * self.planted_fraction().unwrap_or(1.0);
        if dist > forward.threshold {
            self.forward_speed += accel;
        }
        self.forward_speed *= 1.0 - forward.resistance;
        self.speed = (self.forward_speed - forward.friction).max(0.0);

        // Turn toward the target while still far from it
        let diff = wrap_angle(pose.angle - bearing);
        if diff.abs() > rotation.threshold && dist > forward.threshold {
            self.rotation_speed -= rotation.accel * diff.signum();
        }
        self.rotation_speed *= 1.0 - rotation.resistance;
        if self.rotation_speed.abs() > rotation.friction {
            self.rotation_speed -= rotation.friction * self.rotation_speed.signum();
        } else {
            self.rotation_speed = 0.0;
        }

        let angle = wrap_angle(pose.angle + self.rotation_speed);
        let position = pose.position + Vec2::from_angle(angle) * self.speed;

        // Bones trail the body: propagate with the heading reversed
        self.skeleton.set_root(Pose::new(position, angle + PI));
        for index in 0..self.skeleton.roots().len() {
            let id = self.skeleton.roots()[index];
            self.skeleton.follow(id, true);
        }
        for limb in &mut self.limbs {
            limb.update(&mut self.skeleton, target, rng);
        }
        self.skeleton.set_root(Pose::new(position, angle));
    }

    /// Stroke the head outline and every bone
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_head(canvas);
        self.skeleton.draw_all(canvas);
    }

    fn draw_head(&self, canvas: &mut dyn Canvas) {
        let pose = self.pose();
        let point = |angle: f32| pose.position + Vec2::from_angle(angle) * HEAD_RADIUS;

        let start = pose.angle + FRAC_PI_4;
        let sweep = 3.0 * PI / 2.0;
        let mut previous = point(start);
        for step in 1..=HEAD_ARC_STEPS {
            let next = point(start + sweep * step as f32 / HEAD_ARC_STEPS as f32);
            canvas.stroke_line(previous, next);
            previous = next;
        }

        let snout = pose.ahead(HEAD_RADIUS * SQRT_2);
        canvas.stroke_line(previous, snout);
        canvas.stroke_line(snout, point(start));
    }
}
