//! Lizard body plan
//!
//! Builds the skeleton as a chain of spine bones: a whiskered neck, one
//! torso block per leg pair (ribs plus two walking legs), then a tapering
//! whiskered tail.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::creature::{BodyDynamics, Creature};
use crate::error::SkeletonError;
use crate::rng::StepRng;
use crate::segment::SegmentParams;
use crate::types::{Anchor, SegmentId};

const NECK_BONES: usize = 6;
const TORSO_BONES: usize = 6;
const RIB_BONES: usize = 3;
const WHISKER_BONES: usize = 3;
const TOES: usize = 4;
const LEG_CHAIN: usize = 3;
const MAX_LEG_PAIRS: usize = 12;

/// Build-time shape of a lizard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LizardConfig {
    /// Overall body scale factor
    pub scale: f32,
    /// Number of leg pairs along the torso
    pub leg_pairs: usize,
    /// Number of tail bones
    pub tail: usize,
}

impl Default for LizardConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            leg_pairs: 4,
            tail: 20,
        }
    }
}

impl LizardConfig {
    pub fn new(scale: f32, leg_pairs: usize, tail: usize) -> Self {
        Self {
            scale,
            leg_pairs,
            tail,
        }
    }

    /// Random lizard: 1-12 leg pairs, smaller with more legs, tail growing
    /// with the leg count
    pub fn random<R: StepRng + ?Sized>(rng: &mut R) -> Self {
        let leg_pairs = ((rng.unit_f32() * MAX_LEG_PAIRS as f32) as usize + 1).min(MAX_LEG_PAIRS);
        let tail = (4.0 + rng.unit_f32() * leg_pairs as f32 * 8.0) as usize;
        Self {
            scale: 8.0 / (leg_pairs as f32).sqrt(),
            leg_pairs,
            tail,
        }
    }

    /// Segment count the built skeleton will have
    pub fn segment_count(&self) -> usize {
        let whiskered = 1 + 2 * (1 + WHISKER_BONES);
        let torso = TORSO_BONES * (1 + 2 * (1 + RIB_BONES));
        let legs = 2 * (LEG_CHAIN + TOES);
        NECK_BONES * whiskered
            + self.leg_pairs.saturating_sub(1) * torso
            + self.leg_pairs * legs
            + self.tail * whiskered
    }
}

/// Build a lizard facing +x with its body at `origin`.
pub fn build_lizard(config: &LizardConfig, origin: Vec2) -> Result<Creature, SkeletonError> {
    let s = config.scale;
    let mut creature = Creature::new(origin, 0.0, BodyDynamics::lizard(s));
    let mut spine = Anchor::Body;

    for _ in 0..NECK_BONES {
        spine = creature
            .add_segment(spine, SegmentParams::new(s * 4.0, 0.0, TAU / 3.0, 1.1))?
            .into();
        add_whiskers(&mut creature, spine, s * 3.0, s * 0.1)?;
    }

    for pair in 0..config.leg_pairs {
        if pair > 0 {
            for _ in 0..TORSO_BONES {
                spine = creature
                    .add_segment(spine, SegmentParams::new(s * 4.0, 0.0, FRAC_PI_2, 1.5))?
                    .into();
                add_ribs(&mut creature, spine, s)?;
            }
        }
        for side in [-1.0, 1.0] {
            add_leg(&mut creature, spine, side, s)?;
        }
    }

    for bone in 0..config.tail {
        spine = creature
            .add_segment(spine, SegmentParams::new(s * 4.0, 0.0, TAU / 3.0, 1.1))?
            .into();
        let taper = (config.tail - bone) as f32 / config.tail as f32;
        add_whiskers(&mut creature, spine, s * 3.0, s * 3.0 * taper)?;
    }

    log::debug!(
        "Built lizard: {} segments, {} legs, scale {:.2}",
        creature.skeleton().len(),
        creature.leg_count(),
        s
    );

    Ok(creature)
}

/// Two side whiskers, each a stalk plus a short curled tip chain
fn add_whiskers(
    creature: &mut Creature,
    spine: Anchor,
    stalk: f32,
    tip: f32,
) -> Result<(), SkeletonError> {
    for side in [-1.0, 1.0] {
        let mut node = creature.add_segment(spine, SegmentParams::new(stalk, side, 0.1, 2.0))?;
        for _ in 0..WHISKER_BONES {
            node = creature.add_segment(node.into(), SegmentParams::new(tip, -side * 0.1, 0.1, 2.0))?;
        }
    }
    Ok(())
}

/// Two ribs sticking out sideways from a torso bone
fn add_ribs(creature: &mut Creature, spine: Anchor, s: f32) -> Result<(), SkeletonError> {
    for side in [-1.0, 1.0] {
        let mut node =
            creature.add_segment(spine, SegmentParams::new(s * 3.0, side * FRAC_PI_2, 0.1, 1.5))?;
        for _ in 0..RIB_BONES {
            node = creature.add_segment(node.into(), SegmentParams::new(s * 3.0, -side * 0.3, 0.1, 2.0))?;
        }
    }
    Ok(())
}

/// Hip, thigh and shin with four toes, driven as a walking leg
fn add_leg(
    creature: &mut Creature,
    spine: Anchor,
    side: f32,
    s: f32,
) -> Result<SegmentId, SkeletonError> {
    let hip = creature.add_segment(spine, SegmentParams::new(s * 12.0, side * FRAC_PI_4, 0.0, 8.0))?;
    let thigh = creature.add_segment(hip.into(), SegmentParams::new(s * 16.0, -side * FRAC_PI_4, TAU, 1.0))?;
    let shin = creature.add_segment(thigh.into(), SegmentParams::new(s * 16.0, side * FRAC_PI_2, PI, 2.0))?;
    for toe in 0..TOES {
        let spread = (toe as f32 / (TOES - 1) as f32 - 0.5) * FRAC_PI_2;
        creature.add_segment(shin.into(), SegmentParams::new(s * 4.0, spread, 0.1, 4.0))?;
    }
    creature.attach_leg(shin, LEG_CHAIN, s * 12.0)?;
    Ok(shin)
}
