//! Arena-backed bone tree
//!
//! Segments live in a flat `Vec` and refer to each other by [`SegmentId`].
//! The body root is not a segment: its pose is stored on the skeleton and
//! segments anchored to it use [`Anchor::Body`].

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::SkeletonError;
use crate::segment::{Segment, SegmentParams};
use crate::types::{Anchor, Pose, SegmentId};

/// Fixed-topology tree of segments hanging off a body pose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    root: Pose,
    roots: Vec<SegmentId>,
    segments: Vec<Segment>,
}

impl Skeleton {
    pub fn new(root: Pose) -> Self {
        Self {
            root,
            roots: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Pose of the body every root segment hangs from
    pub fn root(&self) -> Pose {
        self.root
    }

    pub fn set_root(&mut self, root: Pose) {
        self.root = root;
    }

    /// Segments attached directly to the body
    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        id.0 < self.segments.len()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    /// Segment by handle.
    ///
    /// # Panics
    /// If `id` was not issued by this skeleton.
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub(crate) fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| (SegmentId(index), segment))
    }

    /// Children of the body or of a segment
    pub fn children(&self, anchor: Anchor) -> &[SegmentId] {
        match anchor {
            Anchor::Body => &self.roots,
            Anchor::Segment(id) => self.segment(id).children(),
        }
    }

    /// Current pose of whatever `anchor` points at
    pub fn anchor_pose(&self, anchor: Anchor) -> Pose {
        match anchor {
            Anchor::Body => self.root,
            Anchor::Segment(id) => self.segment(id).pose(),
        }
    }

    /// Attach a new bone under `parent`, posed at rest.
    pub fn add_segment(
        &mut self,
        parent: Anchor,
        params: SegmentParams,
    ) -> Result<SegmentId, SkeletonError> {
        params.validate()?;
        if let Anchor::Segment(parent_id) = parent {
            if !self.contains(parent_id) {
                return Err(SkeletonError::UnknownSegment(parent_id));
            }
        }

        let id = SegmentId(self.segments.len());
        let segment = Segment::new(parent, params, self.anchor_pose(parent));
        self.segments.push(segment);

        match parent {
            Anchor::Body => self.roots.push(id),
            Anchor::Segment(parent_id) => self.segments[parent_id.0].push_child(id),
        }

        Ok(id)
    }

    /// Re-derive `id`'s pose from its relative angle, optionally springing
    /// toward rest (`flex`) and optionally for its whole subtree (`iterate`).
    pub fn update_relative(&mut self, id: SegmentId, iterate: bool, flex: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent = self.anchor_pose(self.segments[current.0].parent());
            let segment = &mut self.segments[current.0];
            segment.relax(parent, flex);
            if iterate {
                stack.extend(segment.children().iter().rev().copied());
            }
        }
    }

    /// Drag `id` behind its parent's current position, optionally for its
    /// whole subtree.
    pub fn follow(&mut self, id: SegmentId, iterate: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent = self.anchor_pose(self.segments[current.0].parent());
            let segment = &mut self.segments[current.0];
            segment.drag(parent);
            if iterate {
                stack.extend(segment.children().iter().rev().copied());
            }
        }
    }

    /// Stroke `id` from its parent's position to its own, optionally for
    /// its whole subtree.
    pub fn draw(&self, id: SegmentId, iterate: bool, canvas: &mut dyn Canvas) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let segment = self.segment(current);
            let from = self.anchor_pose(segment.parent()).position;
            canvas.stroke_line(from, segment.position());
            if iterate {
                stack.extend(segment.children().iter().rev().copied());
            }
        }
    }

    /// Stroke every segment reachable from the body
    pub fn draw_all(&self, canvas: &mut dyn Canvas) {
        for &id in &self.roots {
            self.draw(id, true, canvas);
        }
    }

    /// Walk from `id` up to the body, nearest ancestor first
    pub fn ancestors(&self, id: SegmentId) -> impl Iterator<Item = SegmentId> + '_ {
        let mut next = self.segment(id).parent();
        std::iter::from_fn(move || {
            let current = next.segment()?;
            next = self.segment(current).parent();
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::LineRecorder;
    use glam::Vec2;
    use std::f32::consts::PI;

    fn chain(count: usize) -> (Skeleton, Vec<SegmentId>) {
        let mut skeleton = Skeleton::new(Pose::default());
        let mut parent = Anchor::Body;
        let mut ids = Vec::new();
        for _ in 0..count {
            let id = skeleton
                .add_segment(parent, SegmentParams::new(2.0, 0.0, PI, 1.5))
                .unwrap();
            ids.push(id);
            parent = Anchor::Segment(id);
        }
        (skeleton, ids)
    }

    fn assert_lengths(skeleton: &Skeleton) {
        for (_, segment) in skeleton.iter() {
            let parent = skeleton.anchor_pose(segment.parent()).position;
            let dist = segment.position().distance(parent);
            assert!((dist - segment.size()).abs() < 1e-3, "{dist} vs {}", segment.size());
        }
    }

    #[test]
    fn test_add_segment_builds_tree() {
        let (skeleton, ids) = chain(3);
        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.roots(), &[ids[0]]);
        assert_eq!(skeleton.children(Anchor::Segment(ids[0])), &[ids[1]]);
        assert_eq!(skeleton.segment(ids[2]).parent(), Anchor::Segment(ids[1]));

        // Straight chain along +x
        assert!((skeleton.segment(ids[2]).position() - Vec2::new(6.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_add_segment_rejects_unknown_parent() {
        let (mut skeleton, _) = chain(1);
        let result = skeleton.add_segment(
            Anchor::Segment(SegmentId(42)),
            SegmentParams::new(1.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(result, Err(SkeletonError::UnknownSegment(SegmentId(42))));
        assert_eq!(skeleton.len(), 1);
    }

    #[test]
    fn test_add_segment_rejects_bad_length() {
        let mut skeleton = Skeleton::new(Pose::default());
        let result = skeleton.add_segment(Anchor::Body, SegmentParams::new(0.0, 0.0, 0.0, 1.0));
        assert!(matches!(result, Err(SkeletonError::NonPositiveLength(_))));
        assert!(skeleton.is_empty());
    }

    #[test]
    fn test_update_relative_propagates_root_rotation() {
        let (mut skeleton, ids) = chain(3);
        skeleton.set_root(Pose::new(Vec2::new(1.0, 1.0), PI / 2.0));
        skeleton.update_relative(ids[0], true, false);

        let tip = skeleton.segment(ids[2]);
        assert!((tip.position() - Vec2::new(1.0, 7.0)).length() < 1e-4);
        assert!((tip.abs_angle() - PI / 2.0).abs() < 1e-5);
        assert_lengths(&skeleton);
    }

    #[test]
    fn test_update_relative_without_iterate_leaves_children() {
        let (mut skeleton, ids) = chain(2);
        let before = skeleton.segment(ids[1]).position();
        skeleton.set_root(Pose::new(Vec2::new(0.0, 5.0), 0.0));
        skeleton.update_relative(ids[0], false, false);

        assert_eq!(skeleton.segment(ids[1]).position(), before);
    }

    #[test]
    fn test_follow_keeps_lengths_and_absolute_angles() {
        let (mut skeleton, ids) = chain(4);
        for step in 0..30 {
            let angle = step as f32 * 0.2;
            skeleton.set_root(Pose::new(Vec2::new(step as f32 * 1.5, (angle * 2.0).sin() * 5.0), angle));
            skeleton.follow(ids[0], true);
            assert_lengths(&skeleton);

            for &id in &ids {
                let segment = skeleton.segment(id);
                let parent = skeleton.anchor_pose(segment.parent());
                assert!((segment.abs_angle() - (parent.angle + segment.rel_angle())).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_draw_strokes_every_bone() {
        let (mut skeleton, ids) = chain(2);
        skeleton
            .add_segment(Anchor::Segment(ids[0]), SegmentParams::new(1.0, 1.0, 0.0, 1.0))
            .unwrap();

        let mut canvas = LineRecorder::new();
        skeleton.draw_all(&mut canvas);
        assert_eq!(canvas.line_count(), 3);
        assert_eq!(canvas.lines[0].0, Vec2::ZERO);

        let mut single = LineRecorder::new();
        skeleton.draw(ids[0], false, &mut single);
        assert_eq!(single.line_count(), 1);
    }

    #[test]
    fn test_ancestors_walk_to_body() {
        let (skeleton, ids) = chain(3);
        let ancestors: Vec<_> = skeleton.ancestors(ids[2]).collect();
        assert_eq!(ancestors, vec![ids[1], ids[0]]);
        assert_eq!(skeleton.ancestors(ids[0]).count(), 0);
    }
}
