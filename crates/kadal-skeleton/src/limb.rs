//! Limb chains that reach toward a target
//!
//! A limb is a run of segments ending at an end-effector. Each tick the chain
//! is relaxed to its spring pose, then swept once from the end back to the
//! hip so the end closes in on the target by at most `speed` units. The result
//! is a lagged chase rather than an exact inverse-kinematics solve.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SkeletonError;
use crate::footstep::{FootstepController, Step};
use crate::rng::StepRng;
use crate::skeleton::Skeleton;
use crate::types::{Anchor, SegmentId};

/// What drives a limb's target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LimbKind {
    /// Reaches for the pointer every tick
    Pointer,
    /// Walks through a stance/swing footstep cycle
    Leg(FootstepController),
}

/// A chain of segments driven as one appendage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimbSystem {
    end: SegmentId,
    nodes: Vec<SegmentId>,
    hip: Anchor,
    speed: f32,
    requested_length: usize,
    kind: LimbKind,
}

impl LimbSystem {
    /// Limb that reaches for the pointer.
    ///
    /// Walks `length` segments up from `end`. If the body is reached first
    /// the chain is shorter than asked; see [`LimbSystem::is_truncated`].
    pub fn new(
        skeleton: &Skeleton,
        end: SegmentId,
        length: usize,
        speed: f32,
    ) -> Result<Self, SkeletonError> {
        if !skeleton.contains(end) {
            return Err(SkeletonError::UnknownSegment(end));
        }
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(SkeletonError::InvalidSpeed(speed));
        }

        let requested_length = length.max(1);
        let mut nodes: Vec<SegmentId> = std::iter::once(end)
            .chain(skeleton.ancestors(end))
            .take(requested_length)
            .collect();
        nodes.reverse();

        if nodes.len() < requested_length {
            log::warn!(
                "Limb ending at {} reached the body after {} of {} segments",
                end,
                nodes.len(),
                requested_length
            );
        }

        let hip = skeleton.segment(nodes[0]).parent();

        Ok(Self {
            end,
            nodes,
            hip,
            speed,
            requested_length,
            kind: LimbKind::Pointer,
        })
    }

    /// Limb that walks: a chain plus a footstep controller seeded from its
    /// current rest pose.
    pub fn leg(
        skeleton: &Skeleton,
        end: SegmentId,
        length: usize,
        speed: f32,
        body_angle: f32,
    ) -> Result<Self, SkeletonError> {
        let mut limb = Self::new(skeleton, end, length, speed)?;
        let foot = skeleton.segment(end).position();
        let hip = skeleton.anchor_pose(limb.hip);
        limb.kind = LimbKind::Leg(FootstepController::new(foot, hip, body_angle));
        Ok(limb)
    }

    pub fn end(&self) -> SegmentId {
        self.end
    }

    /// Chain members from the hip side to the end-effector
    pub fn nodes(&self) -> &[SegmentId] {
        &self.nodes
    }

    pub fn hip(&self) -> Anchor {
        self.hip
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Number of segments actually in the chain
    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    pub fn requested_length(&self) -> usize {
        self.requested_length
    }

    /// True when the chain hit the body before reaching the requested length
    pub fn is_truncated(&self) -> bool {
        self.nodes.len() < self.requested_length
    }

    pub fn kind(&self) -> &LimbKind {
        &self.kind
    }

    pub fn footstep(&self) -> Option<&FootstepController> {
        match &self.kind {
            LimbKind::Leg(footstep) => Some(footstep),
            LimbKind::Pointer => None,
        }
    }

    pub fn is_leg(&self) -> bool {
        matches!(self.kind, LimbKind::Leg(_))
    }

    /// Footstep phase, if this limb is a leg
    pub fn step(&self) -> Option<Step> {
        self.footstep().map(|footstep| footstep.step())
    }

    /// Pull the chain so the end-effector closes in on `target`.
    pub fn move_to(&self, skeleton: &mut Skeleton, target: Vec2) {
        skeleton.update_relative(self.nodes[0], true, true);

        // Backward sweep: end first, each node lands on the ray from the
        // running anchor toward where it used to be
        let end = skeleton.segment(self.end).position();
        let mut len = (target.distance(end) - self.speed).max(0.0);
        let mut anchor = target;
        for &id in self.nodes.iter().rev() {
            let segment = skeleton.segment_mut(id);
            let away = segment.position() - anchor;
            let direction = away.try_normalize().unwrap_or(Vec2::X);
            let placed = anchor + direction * len;
            segment.set_position(placed);
            anchor = placed;
            len = segment.size();
        }

        // Forward pass: angles from the new positions, lengths restored,
        // side branches carried along without flex
        for &id in &self.nodes {
            let parent = skeleton.anchor_pose(skeleton.segment(id).parent());
            skeleton.segment_mut(id).seat(parent);

            for index in 0..skeleton.segment(id).children().len() {
                let child = skeleton.segment(id).children()[index];
                if !self.nodes.contains(&child) {
                    skeleton.update_relative(child, true, false);
                }
            }
        }
    }

    /// Run one tick. Pointer limbs chase `pointer`; legs chase their
    /// foothold and then advance their footstep cycle.
    pub fn update<R: StepRng + ?Sized>(&mut self, skeleton: &mut Skeleton, pointer: Vec2, rng: &mut R) {
        let target = match &self.kind {
            LimbKind::Pointer => pointer,
            LimbKind::Leg(footstep) => footstep.goal(),
        };
        self.move_to(skeleton, target);

        if let LimbKind::Leg(footstep) = &mut self.kind {
            let foot = skeleton.segment(self.end).position();
            let hip = skeleton.anchor_pose(self.hip);
            footstep.advance(foot, hip, rng);
        }
    }
}
