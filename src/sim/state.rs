//! Shared motion state
//!
//! Everything the logic thread and the render thread both touch lives here.
//! Each scalar is its own atomic; there are no locks. Readers may see the two
//! position axes from different ticks, which is invisible at 60 Hz.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use glam::Vec2;
use rand::Rng;

/// Only single-word visibility is required between the two threads
const ORDER: Ordering = Ordering::Relaxed;

/// Lock-free `f32` cell stored as raw bits
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    pub fn store(&self, value: f32, order: Ordering) {
        self.0.store(value.to_bits(), order);
    }

    /// Adds `delta` and returns the previous value
    pub fn fetch_add(&self, delta: f32, order: Ordering) -> f32 {
        let prev = self
            .0
            .fetch_update(order, order, |bits| {
                Some((f32::from_bits(bits) + delta).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        f32::from_bits(prev)
    }
}

/// Plain copy of the motion state at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Position and velocity of the logo, one atomic per component
#[derive(Debug, Default)]
pub struct MotionState {
    pos_x: AtomicF32,
    pos_y: AtomicF32,
    vel_x: AtomicF32,
    vel_y: AtomicF32,
}

impl MotionState {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            pos_x: AtomicF32::new(position.x),
            pos_y: AtomicF32::new(position.y),
            vel_x: AtomicF32::new(velocity.x),
            vel_y: AtomicF32::new(velocity.y),
        }
    }

    /// Start at the origin with each velocity axis drawn independently
    pub fn launch<R: Rng>(rng: &mut R, speed: RangeInclusive<f32>) -> Self {
        let velocity = Vec2::new(
            rng.random_range(speed.clone()),
            rng.random_range(speed),
        );
        Self::new(Vec2::ZERO, velocity)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos_x.load(ORDER), self.pos_y.load(ORDER))
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vel_x.load(ORDER), self.vel_y.load(ORDER))
    }

    pub fn snapshot(&self) -> Motion {
        Motion {
            position: self.position(),
            velocity: self.velocity(),
        }
    }

    /// Move by velocity * dt, each axis on its own; returns the new position
    pub fn advance(&self, dt: f32) -> Vec2 {
        let vel = self.velocity();
        self.pos_x.fetch_add(vel.x * dt, ORDER);
        self.pos_y.fetch_add(vel.y * dt, ORDER);
        self.position()
    }

    /// Negate the selected velocity components
    pub fn reflect(&self, flip_x: bool, flip_y: bool) {
        if flip_x {
            self.vel_x.store(-self.vel_x.load(ORDER), ORDER);
        }
        if flip_y {
            self.vel_y.store(-self.vel_y.load(ORDER), ORDER);
        }
    }
}

/// Collision notifications from the logic thread to the render thread
///
/// Level-set: the logic thread only ever raises them, the render thread
/// clears them when it reacts.
#[derive(Debug, Default)]
pub struct EventFlags {
    collided: AtomicBool,
    corner: AtomicBool,
}

impl EventFlags {
    pub fn raise(&self, corner: bool) {
        self.collided.store(true, ORDER);
        if corner {
            self.corner.store(true, ORDER);
        }
    }

    pub fn is_collided(&self) -> bool {
        self.collided.load(ORDER)
    }

    pub fn is_corner(&self) -> bool {
        self.corner.load(ORDER)
    }

    /// Clear the corner flag, returning whether it was set
    pub fn take_corner(&self) -> bool {
        self.corner.swap(false, ORDER)
    }

    /// Clear the collision flag, returning whether it was set
    pub fn take_collided(&self) -> bool {
        self.collided.swap(false, ORDER)
    }
}

/// Handle shared by the logic thread, the render loop and the orchestrator
#[derive(Debug)]
pub struct SharedState {
    pub motion: MotionState,
    pub flags: EventFlags,
    running: AtomicBool,
}

impl SharedState {
    pub fn new(motion: MotionState) -> Self {
        Self {
            motion,
            flags: EventFlags::default(),
            running: AtomicBool::new(true),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(ORDER)
    }

    /// Ask the logic thread to finish its current tick and exit
    pub fn stop(&self) {
        self.running.store(false, ORDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_atomic_f32_fetch_add() {
        let cell = AtomicF32::new(0.5);
        let prev = cell.fetch_add(0.25, Ordering::Relaxed);
        assert_eq!(prev, 0.5);
        assert_eq!(cell.load(Ordering::Relaxed), 0.75);
    }

    #[test]
    fn test_advance_moves_both_axes() {
        let motion = MotionState::new(Vec2::new(0.1, -0.1), Vec2::new(0.4, -0.2));
        let pos = motion.advance(0.5);
        assert!((pos.x - 0.3).abs() < 1e-6);
        assert!((pos.y + 0.2).abs() < 1e-6);
        assert_eq!(motion.velocity(), Vec2::new(0.4, -0.2));
    }

    #[test]
    fn test_reflect_only_selected_axes() {
        let motion = MotionState::new(Vec2::ZERO, Vec2::new(0.4, 0.5));
        motion.reflect(true, false);
        assert_eq!(motion.velocity(), Vec2::new(-0.4, 0.5));
        motion.reflect(true, true);
        assert_eq!(motion.velocity(), Vec2::new(0.4, -0.5));
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let motion = MotionState::new(Vec2::new(0.3, 0.7), Vec2::new(0.5, 0.35));
        let first = motion.snapshot();
        let second = motion.snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_flags_start_clear() {
        let shared = SharedState::new(MotionState::default());
        assert!(shared.is_running());
        assert!(!shared.flags.is_collided());
        assert!(!shared.flags.is_corner());
    }

    #[test]
    fn test_raise_and_take_flags() {
        let flags = EventFlags::default();
        flags.raise(false);
        assert!(flags.is_collided());
        assert!(!flags.is_corner());

        flags.raise(true);
        assert!(flags.take_corner());
        assert!(!flags.take_corner());
        assert!(flags.take_collided());
        assert!(!flags.is_collided());
    }

    #[test]
    fn test_stop_clears_running() {
        let shared = SharedState::new(MotionState::default());
        shared.stop();
        assert!(!shared.is_running());
    }

    proptest! {
        #[test]
        fn launch_starts_at_origin_within_speed_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let motion = MotionState::launch(&mut rng, 0.3..=0.6);
            let snap = motion.snapshot();
            prop_assert_eq!(snap.position, Vec2::ZERO);
            prop_assert!((0.3..=0.6).contains(&snap.velocity.x));
            prop_assert!((0.3..=0.6).contains(&snap.velocity.y));
        }
    }
}
