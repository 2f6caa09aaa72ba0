//! Handles and poses shared across the skeleton

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a segment inside a [`crate::Skeleton`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
    /// Position of the segment in its arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Segment({})", self.0)
    }
}

/// What a segment hangs from: the creature body or another segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Body,
    Segment(SegmentId),
}

impl Anchor {
    pub fn segment(&self) -> Option<SegmentId> {
        match self {
            Anchor::Body => None,
            Anchor::Segment(id) => Some(*id),
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, Anchor::Body)
    }
}

impl From<SegmentId> for Anchor {
    fn from(id: SegmentId) -> Self {
        Anchor::Segment(id)
    }
}

/// World-space position plus heading (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

impl Pose {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Unit vector along the heading
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Point `distance` units ahead along the heading
    pub fn ahead(&self, distance: f32) -> Vec2 {
        self.position + self.heading() * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_segment_accessor() {
        assert_eq!(Anchor::Body.segment(), None);
        assert_eq!(Anchor::Segment(SegmentId(3)).segment(), Some(SegmentId(3)));
        assert!(Anchor::Body.is_body());
        assert_eq!(Anchor::from(SegmentId(1)), Anchor::Segment(SegmentId(1)));
    }

    #[test]
    fn test_pose_ahead() {
        let pose = Pose::new(Vec2::new(1.0, 2.0), std::f32::consts::FRAC_PI_2);
        let point = pose.ahead(3.0);
        assert!((point - Vec2::new(1.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_segment_id_display() {
        assert_eq!(SegmentId(7).to_string(), "Segment(7)");
    }
}
