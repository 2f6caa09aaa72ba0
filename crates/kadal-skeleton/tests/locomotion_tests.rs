//! Integration tests for lizard locomotion
//!
//! These drive a full lizard through the public simulation API and check the
//! skeleton and footstep invariants hold tick after tick.

use std::collections::HashSet;
use std::time::Duration;

use glam::Vec2;
use kadal_skeleton::{
    build_lizard, Anchor, Creature, InputSnapshot, LimbSystem, LineRecorder, LizardConfig,
    SegmentId, SegmentParams, Simulation, SimulationError, Skeleton, Step, Pose, TICK_INTERVAL,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn circle_pointer(step: u64) -> Vec2 {
    let t = step as f32 * 0.02;
    Vec2::new(400.0, 300.0) + Vec2::new(t.cos(), t.sin()) * 220.0
}

fn chain_members(creature: &Creature) -> HashSet<SegmentId> {
    creature
        .limbs()
        .iter()
        .flat_map(|limb| limb.nodes().iter().copied())
        .collect()
}

fn assert_lengths(skeleton: &Skeleton) {
    for (id, segment) in skeleton.iter() {
        let parent = skeleton.anchor_pose(segment.parent()).position;
        let dist = segment.position().distance(parent);
        assert!(
            (dist - segment.size()).abs() < 1e-2,
            "{} drifted: {} vs {}",
            id,
            dist,
            segment.size()
        );
    }
}

// ============================================================================
// Skeleton invariants
// ============================================================================

#[test]
fn test_lizard_keeps_bone_lengths_while_walking() {
    let mut sim = Simulation::lizard(&LizardConfig::default(), Vec2::new(400.0, 300.0), 11).unwrap();

    for step in 0..600 {
        sim.step(&InputSnapshot::new(circle_pointer(step))).unwrap();
        let creature = sim.creature().unwrap();
        assert_lengths(creature.skeleton());
        assert!(creature.position().is_finite());
    }
}

#[test]
fn test_free_bones_stay_within_their_range() {
    let mut sim = Simulation::lizard(&LizardConfig::new(2.0, 3, 12), Vec2::new(400.0, 300.0), 5).unwrap();
    let chains = chain_members(sim.creature().unwrap());

    for step in 0..400 {
        sim.step(&InputSnapshot::new(circle_pointer(step))).unwrap();
        let skeleton = sim.creature().unwrap().skeleton();
        for (id, segment) in skeleton.iter() {
            if chains.contains(&id) {
                continue;
            }
            let (min, max) = segment.limits();
            let rel = segment.rel_angle();
            assert!(
                rel >= min - 1e-4 && rel <= max + 1e-4,
                "{} at {} outside [{}, {}]",
                id,
                rel,
                min,
                max
            );
        }
    }
}

// ============================================================================
// Footstep cycle
// ============================================================================

#[test]
fn test_new_footholds_stay_within_reach() {
    let mut sim = Simulation::lizard(&LizardConfig::default(), Vec2::new(400.0, 300.0), 3).unwrap();
    let mut previous: Vec<Option<Step>> = sim.creature().unwrap().limbs().iter().map(LimbSystem::step).collect();
    let mut swings = 0;

    for step in 0..600 {
        sim.step(&InputSnapshot::new(circle_pointer(step))).unwrap();
        let creature = sim.creature().unwrap();

        for (index, limb) in creature.limbs().iter().enumerate() {
            let footstep = limb.footstep().unwrap();
            let now = footstep.step();
            assert!(now.as_u8() <= 1);

            if previous[index] == Some(Step::Stance) && now == Step::Swing {
                swings += 1;
                let hip = creature.skeleton().anchor_pose(limb.hip()).position;
                assert!(footstep.goal().distance(hip) <= footstep.reach() * 1.5 + 1e-2);
            }
            previous[index] = Some(now);
        }
    }

    assert!(swings > 0, "legs never stepped");
}

#[test]
fn test_idle_lizard_stays_put() {
    let origin = Vec2::new(200.0, 200.0);
    let mut sim = Simulation::lizard(&LizardConfig::default(), origin, 9).unwrap();
    let input = InputSnapshot::new(origin);

    for _ in 0..200 {
        sim.step(&input).unwrap();
    }

    let creature = sim.creature().unwrap();
    assert_eq!(creature.speed(), 0.0);
    assert_eq!(creature.rotation_speed(), 0.0);
    assert!(creature.position().distance(origin) < 1e-3);
    assert_lengths(creature.skeleton());
}

// ============================================================================
// Topology
// ============================================================================

#[test]
fn test_limb_on_shallow_skeleton_is_truncated() {
    let mut skeleton = Skeleton::new(Pose::default());
    let first = skeleton
        .add_segment(Anchor::Body, SegmentParams::new(5.0, 0.0, 1.0, 1.0))
        .unwrap();
    let second = skeleton
        .add_segment(first.into(), SegmentParams::new(5.0, 0.0, 1.0, 1.0))
        .unwrap();

    let limb = LimbSystem::new(&skeleton, second, 3, 1.0).unwrap();
    assert_eq!(limb.length(), 2);
    assert_eq!(limb.nodes(), &[first, second]);
    assert_eq!(limb.hip(), Anchor::Body);
    assert!(limb.is_truncated());
}

// ============================================================================
// Snapshots and lifecycle
// ============================================================================

#[test]
fn test_snapshot_resumes_identically() {
    let mut creature = build_lizard(&LizardConfig::new(2.0, 2, 8), Vec2::new(300.0, 300.0)).unwrap();
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    for step in 0..120 {
        creature.follow(circle_pointer(step), &mut rng);
    }

    let text = ron::to_string(&creature).unwrap();
    let mut restored: Creature = ron::from_str(&text).unwrap();
    let mut restored_rng = rng.clone();

    for step in 120..240 {
        creature.follow(circle_pointer(step), &mut rng);
        restored.follow(circle_pointer(step), &mut restored_rng);
    }

    assert!(creature.position().distance(restored.position()) < 1e-2);
    for ((_, a), (_, b)) in creature.skeleton().iter().zip(restored.skeleton().iter()) {
        assert!(a.position().distance(b.position()) < 1e-1);
    }
}

#[test]
fn test_host_clock_and_dispose() {
    let mut sim = Simulation::lizard(&LizardConfig::default(), Vec2::new(100.0, 100.0), 1).unwrap();
    let input = InputSnapshot::new(Vec2::new(500.0, 100.0));

    let mut ran = 0;
    for _ in 0..30 {
        ran += sim.tick(Duration::from_millis(16), &input).unwrap();
    }
    assert_eq!(ran as u64, sim.steps());
    assert_eq!(ran as u128, 30 * 16 / TICK_INTERVAL.as_millis());

    let mut canvas = LineRecorder::new();
    sim.render(&mut canvas).unwrap();
    assert!(canvas.line_count() > 0);

    let creature = sim.dispose().unwrap();
    assert!(creature.position().x > 100.0);
    assert_eq!(sim.tick(TICK_INTERVAL, &input), Err(SimulationError::Disposed));
}
