//! Host-driven simulation loop
//!
//! The host decides when time passes: feed wall-clock deltas to
//! [`Simulation::tick`] and the creature advances in fixed
//! [`TICK_INTERVAL`] steps, or call [`Simulation::step`] directly to
//! single-step. [`Simulation::dispose`] releases the creature; any later
//! tick fails.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::canvas::Canvas;
use crate::creature::Creature;
use crate::error::{SimulationError, SkeletonError};
use crate::input::InputSnapshot;
use crate::lizard::{build_lizard, LizardConfig};

/// Fixed step between creature updates (~30 Hz)
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Most steps a single `tick` call may run before dropping backlog
pub const MAX_STEPS_PER_TICK: u32 = 8;

/// A creature plus the clock and random source that drive it
pub struct Simulation {
    creature: Option<Creature>,
    rng: Xoshiro256StarStar,
    interval: Duration,
    accumulator: Duration,
    steps: u64,
}

impl Simulation {
    pub fn new(creature: Creature, seed: u64) -> Self {
        Self {
            creature: Some(creature),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            interval: TICK_INTERVAL,
            accumulator: Duration::ZERO,
            steps: 0,
        }
    }

    /// Simulation of a freshly built lizard
    pub fn lizard(config: &LizardConfig, origin: Vec2, seed: u64) -> Result<Self, SkeletonError> {
        let creature = build_lizard(config, origin)?;
        log::info!(
            "Lizard simulation ready: {} leg pairs, tail {}, seed {}",
            config.leg_pairs,
            config.tail,
            seed
        );
        Ok(Self::new(creature, seed))
    }

    /// Use a step interval other than [`TICK_INTERVAL`]; zero is ignored
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.interval = interval;
        }
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Steps run since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.creature.is_none()
    }

    /// Let `dt` of host time pass; returns how many steps ran.
    pub fn tick(&mut self, dt: Duration, input: &InputSnapshot) -> Result<u32, SimulationError> {
        if self.creature.is_none() {
            return Err(SimulationError::Disposed);
        }

        self.accumulator += dt;
        let mut ran = 0;
        while self.accumulator >= self.interval {
            if ran == MAX_STEPS_PER_TICK {
                log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.interval;
            self.step(input)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Advance the creature exactly one step toward the pointer
    pub fn step(&mut self, input: &InputSnapshot) -> Result<(), SimulationError> {
        let creature = self.creature.as_mut().ok_or(SimulationError::Disposed)?;
        creature.follow(input.pointer, &mut self.rng);
        self.steps += 1;
        Ok(())
    }

    /// Clear `canvas` and draw the creature onto it
    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<(), SimulationError> {
        let creature = self.creature.as_ref().ok_or(SimulationError::Disposed)?;
        canvas.clear();
        creature.draw(canvas);
        Ok(())
    }

    /// Stop the simulation and hand back the creature. Idempotent.
    pub fn dispose(&mut self) -> Option<Creature> {
        let creature = self.creature.take();
        if creature.is_some() {
            log::info!("Simulation disposed after {} steps", self.steps);
        }
        self.accumulator = Duration::ZERO;
        creature
    }
}
