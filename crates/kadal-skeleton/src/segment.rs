//! Rigid bones with an angular spring toward a rest angle
//!
//! A segment only knows its own parameters and cached pose. Every update
//! takes the parent's pose explicitly; walking the tree is the
//! [`crate::Skeleton`]'s job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle::wrap_around;
use crate::error::SkeletonError;
use crate::types::{Anchor, Pose, SegmentId};

/// Below this squared distance a segment is treated as sitting on its parent
const COINCIDENT_EPSILON_SQ: f32 = 1e-12;

/// Build-time parameters of a bone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentParams {
    /// Bone length
    pub size: f32,
    /// Rest angle relative to the parent heading
    pub angle: f32,
    /// Total allowed swing around the rest angle
    pub range: f32,
    /// Spring divisor (1 = snaps to rest, larger = lazier)
    pub stiffness: f32,
}

impl SegmentParams {
    pub fn new(size: f32, angle: f32, range: f32, stiffness: f32) -> Self {
        Self {
            size,
            angle,
            range,
            stiffness,
        }
    }

    pub fn validate(&self) -> Result<(), SkeletonError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(SkeletonError::NonPositiveLength(self.size));
        }
        if !(self.stiffness.is_finite() && self.stiffness >= 1.0) {
            return Err(SkeletonError::InvalidStiffness(self.stiffness));
        }
        if !(self.range.is_finite() && self.range >= 0.0) {
            return Err(SkeletonError::InvalidRange(self.range));
        }
        if !self.angle.is_finite() {
            return Err(SkeletonError::InvalidAngle(self.angle));
        }
        Ok(())
    }
}

/// A single bone in the skeleton tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    parent: Anchor,
    children: Vec<SegmentId>,
    size: f32,
    rel_angle: f32,
    def_angle: f32,
    abs_angle: f32,
    range: f32,
    stiffness: f32,
    position: Vec2,
}

impl Segment {
    /// Create a bone at rest under `parent`, already posed and relaxed.
    ///
    /// Parameters must have been validated.
    pub(crate) fn new(parent: Anchor, params: SegmentParams, parent_pose: Pose) -> Self {
        let mut segment = Self {
            parent,
            children: Vec::new(),
            size: params.size,
            rel_angle: params.angle,
            def_angle: params.angle,
            abs_angle: parent_pose.angle + params.angle,
            range: params.range,
            stiffness: params.stiffness,
            position: parent_pose.position,
        };
        segment.relax(parent_pose, true);
        segment
    }

    pub fn parent(&self) -> Anchor {
        self.parent
    }

    pub fn children(&self) -> &[SegmentId] {
        &self.children
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn rel_angle(&self) -> f32 {
        self.rel_angle
    }

    pub fn def_angle(&self) -> f32 {
        self.def_angle
    }

    pub fn abs_angle(&self) -> f32 {
        self.abs_angle
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.abs_angle)
    }

    /// Lowest and highest relative angle the spring clamp allows
    pub fn limits(&self) -> (f32, f32) {
        let half = self.range / 2.0;
        (self.def_angle - half, self.def_angle + half)
    }

    pub(crate) fn push_child(&mut self, child: SegmentId) {
        self.children.push(child);
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Re-derive the pose from `rel_angle` and the parent's pose.
    ///
    /// With `flex` the bone also springs a `1/stiffness` step back toward its
    /// rest angle and is clamped into its range.
    pub(crate) fn relax(&mut self, parent: Pose, flex: bool) {
        self.rel_angle = wrap_around(self.rel_angle, self.def_angle);
        if flex {
            let (min, max) = self.limits();
            let sprung = (self.rel_angle - self.def_angle) / self.stiffness + self.def_angle;
            self.rel_angle = sprung.clamp(min, max);
        }
        self.abs_angle = parent.angle + self.rel_angle;
        self.position = parent.position + Vec2::from_angle(self.abs_angle) * self.size;
    }

    /// Drag the bone behind its parent's new position, then relax with flex.
    ///
    /// The bone keeps pointing from the parent toward where it was; if it sits
    /// exactly on the parent, its previous relative angle is kept.
    pub(crate) fn drag(&mut self, parent: Pose) {
        let offset = self.position - parent.position;
        if offset.length_squared() > COINCIDENT_EPSILON_SQ {
            self.abs_angle = offset.y.atan2(offset.x);
            self.rel_angle = self.abs_angle - parent.angle;
        }
        self.relax(parent, true);
    }

    /// Derive the angles from the current position and put the bone back at
    /// exactly `size` from the parent along that heading. No spring is applied.
    pub(crate) fn seat(&mut self, parent: Pose) {
        let offset = self.position - parent.position;
        let raw = if offset.length_squared() > COINCIDENT_EPSILON_SQ {
            offset.y.atan2(offset.x) - parent.angle
        } else {
            self.rel_angle
        };
        self.rel_angle = wrap_around(raw, self.def_angle);
        self.abs_angle = parent.angle + self.rel_angle;
        self.position = parent.position + Vec2::from_angle(self.abs_angle) * self.size;
    }
}
