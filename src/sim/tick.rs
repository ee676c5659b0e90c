//! Logic thread
//!
//! Advances the shared motion state at its own cadence, independent of the
//! render loop and vsync. Each tick: integrate, test the walls, reflect
//! (subject to the debounce window), raise the event flags, sleep.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::collision::{CollisionRule, WallHit};
use super::state::SharedState;
use crate::clock::Clock;
use crate::consts::{DEBOUNCE_SECS, TICK_INTERVAL_MS};

/// Logic thread tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicConfig {
    /// Sleep after every tick
    pub tick_interval: Duration,
    /// Reflections closer together than this are suppressed (seconds)
    pub debounce: f64,
    pub rule: CollisionRule,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            debounce: DEBOUNCE_SECS,
            rule: CollisionRule::default(),
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Raw wall contact, before debouncing
    pub hit: WallHit,
    pub flipped_x: bool,
    pub flipped_y: bool,
}

impl TickOutcome {
    pub fn reflected(&self) -> bool {
        self.flipped_x || self.flipped_y
    }
}

/// Counters reported when the logic thread exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub reflections: u64,
    pub corners: u64,
}

/// Per-thread simulation state; the debounce timer is never shared
#[derive(Debug)]
pub struct LogicLoop {
    config: LogicConfig,
    last_collision: f64,
    stats: LoopStats,
}

impl LogicLoop {
    pub fn new(config: LogicConfig) -> Self {
        Self {
            config,
            // First contact always reflects
            last_collision: f64::NEG_INFINITY,
            stats: LoopStats::default(),
        }
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Advance the shared state by one tick at time `now`
    pub fn step(&mut self, shared: &SharedState, now: f64, dt: f32) -> TickOutcome {
        self.stats.ticks += 1;

        let position = shared.motion.advance(dt);
        let hit = self.config.rule.check(position);
        let mut outcome = TickOutcome {
            hit,
            ..Default::default()
        };

        if !hit.any() || now - self.last_collision <= self.config.debounce {
            return outcome;
        }

        outcome.flipped_x = hit.horizontal;
        outcome.flipped_y = hit.vertical;
        shared.motion.reflect(outcome.flipped_x, outcome.flipped_y);

        self.last_collision = now;
        shared.flags.raise(hit.is_corner());

        self.stats.reflections += 1;
        if hit.is_corner() {
            self.stats.corners += 1;
            log::debug!("Corner hit at {:?}", position);
        }

        outcome
    }

    /// Tick until the stop signal is observed
    pub fn run<C: Clock + ?Sized>(&mut self, shared: &SharedState, clock: &C) -> LoopStats {
        let mut prev = clock.now();
        while shared.is_running() {
            let now = clock.now();
            let dt = (now - prev) as f32;
            prev = now;

            self.step(shared, now, dt);
            thread::sleep(self.config.tick_interval);
        }
        self.stats
    }
}

/// The spawned logic thread and the handle used to stop it
pub struct LogicThread {
    shared: Arc<SharedState>,
    handle: JoinHandle<LoopStats>,
}

impl LogicThread {
    pub fn spawn<C>(
        shared: Arc<SharedState>,
        clock: C,
        config: LogicConfig,
    ) -> std::io::Result<Self>
    where
        C: Clock + 'static,
    {
        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("logic".into())
            .spawn(move || {
                log::info!("Logic thread started ({:?} per tick)", config.tick_interval);
                LogicLoop::new(config).run(&thread_shared, &clock)
            })?;

        Ok(Self { shared, handle })
    }

    /// Raise the stop signal and wait for the thread to exit
    ///
    /// Returns `None` if the thread panicked.
    pub fn stop(self) -> Option<LoopStats> {
        self.shared.stop();
        match self.handle.join() {
            Ok(stats) => {
                log::info!(
                    "Logic thread stopped after {} ticks ({} reflections, {} corners)",
                    stats.ticks,
                    stats.reflections,
                    stats.corners
                );
                Some(stats)
            }
            Err(_) => {
                log::error!("Logic thread panicked");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};
    use crate::sim::state::MotionState;
    use glam::Vec2;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn shared_at(position: Vec2, velocity: Vec2) -> SharedState {
        SharedState::new(MotionState::new(position, velocity))
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_edge_hit_flips_one_axis() {
        let shared = shared_at(Vec2::new(0.85, 0.0), Vec2::new(0.4, 0.4));
        let mut logic = LogicLoop::new(LogicConfig::default());

        let outcome = logic.step(&shared, 1.0, 0.5);

        assert!(approx(shared.motion.position(), Vec2::new(1.05, 0.2)));
        assert!(outcome.hit.horizontal);
        assert!(!outcome.hit.vertical);
        assert_eq!(shared.motion.velocity(), Vec2::new(-0.4, 0.4));
        assert!(shared.flags.is_collided());
        assert!(!shared.flags.is_corner());
    }

    #[test]
    fn test_corner_hit_flips_both_axes() {
        let shared = shared_at(Vec2::new(0.85, 0.85), Vec2::new(0.4, 0.4));
        let mut logic = LogicLoop::new(LogicConfig::default());

        let outcome = logic.step(&shared, 1.0, 0.5);

        assert!(approx(shared.motion.position(), Vec2::new(1.05, 1.05)));
        assert!(outcome.hit.is_corner());
        assert_eq!(shared.motion.velocity(), Vec2::new(-0.4, -0.4));
        assert!(shared.flags.is_collided());
        assert!(shared.flags.is_corner());
        assert_eq!(logic.stats().corners, 1);
    }

    #[test]
    fn test_debounce_suppresses_second_flip() {
        let shared = shared_at(Vec2::new(0.85, 0.0), Vec2::new(0.4, 0.0));
        let mut logic = LogicLoop::new(LogicConfig::default());

        let first = logic.step(&shared, 2.0, 0.01);
        assert!(first.flipped_x);
        assert_eq!(shared.motion.velocity().x, -0.4);

        // Still touching the wall one tick later
        let second = logic.step(&shared, 2.01, 0.01);
        assert!(second.hit.horizontal);
        assert!(!second.reflected());
        assert_eq!(shared.motion.velocity().x, -0.4);
        assert_eq!(logic.stats().reflections, 1);
    }

    #[test]
    fn test_debounce_expires() {
        let shared = shared_at(Vec2::new(0.9, 0.0), Vec2::new(0.0, 0.0));
        let mut logic = LogicLoop::new(LogicConfig::default());

        assert!(logic.step(&shared, 1.0, 0.0).flipped_x);
        assert!(!logic.step(&shared, 1.05, 0.0).flipped_x);
        assert!(logic.step(&shared, 1.2, 0.0).flipped_x);
    }

    #[test]
    fn test_suppressed_tick_leaves_flags_alone() {
        let shared = shared_at(Vec2::new(0.9, 0.0), Vec2::new(0.1, 0.0));
        let mut logic = LogicLoop::new(LogicConfig::default());

        logic.step(&shared, 1.0, 0.01);
        assert!(shared.flags.take_collided());

        logic.step(&shared, 1.05, 0.01);
        assert!(!shared.flags.is_collided());
    }

    #[test]
    fn test_free_flight_raises_nothing() {
        let shared = shared_at(Vec2::ZERO, Vec2::new(0.4, 0.3));
        let mut logic = LogicLoop::new(LogicConfig::default());

        for i in 0..10 {
            let outcome = logic.step(&shared, i as f64 * 0.016, 0.016);
            assert!(!outcome.reflected());
        }
        assert!(!shared.flags.is_collided());
        assert_eq!(logic.stats().ticks, 10);
    }

    #[test]
    fn test_run_exits_when_already_stopped() {
        let shared = shared_at(Vec2::ZERO, Vec2::new(0.4, 0.4));
        shared.stop();
        let clock = ManualClock::new(0.0);

        let stats = LogicLoop::new(LogicConfig::default()).run(&shared, &clock);

        assert_eq!(stats.ticks, 0);
        assert_eq!(shared.motion.position(), Vec2::ZERO);
    }

    /// Moves time forward on every read and stops the loop after `stop_after` reads
    struct SteppingClock<'a> {
        inner: ManualClock,
        step: f64,
        reads: AtomicU32,
        stop_after: u32,
        shared: &'a SharedState,
    }

    impl Clock for SteppingClock<'_> {
        fn now(&self) -> f64 {
            let read = self.reads.fetch_add(1, Ordering::Relaxed);
            if read >= self.stop_after {
                self.shared.stop();
            }
            self.inner.advance(self.step);
            self.inner.now()
        }
    }

    #[test]
    fn test_run_reflects_off_wall_and_raises_flag() {
        let shared = shared_at(Vec2::new(0.75, 0.0), Vec2::new(0.4, 0.0));
        let clock = SteppingClock {
            inner: ManualClock::new(0.0),
            step: 0.05,
            reads: AtomicU32::new(0),
            stop_after: 20,
            shared: &shared,
        };
        let config = LogicConfig {
            tick_interval: Duration::from_millis(1),
            ..Default::default()
        };

        // 0.02 per tick: the right edge reaches the wall on the third tick
        let stats = LogicLoop::new(config).run(&shared, &clock);

        assert!(!shared.is_running());
        assert_eq!(stats.ticks, 20);
        assert_eq!(stats.reflections, 1);
        assert_eq!(stats.corners, 0);
        assert!(shared.flags.is_collided());
        assert!(!shared.flags.is_corner());
        assert_eq!(shared.motion.velocity(), Vec2::new(-0.4, 0.0));
        assert!(shared.motion.position().x < 0.75);
    }

    #[test]
    fn test_manual_clock_drives_dt() {
        let shared = shared_at(Vec2::ZERO, Vec2::new(0.5, 0.0));
        let clock = ManualClock::new(10.0);
        let mut logic = LogicLoop::new(LogicConfig::default());

        let prev = clock.now();
        clock.advance(0.2);
        let dt = clock.delta(prev) as f32;
        logic.step(&shared, clock.now(), dt);

        assert!((shared.motion.position().x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_thread_stops_and_writes_cease() {
        let shared = Arc::new(shared_at(Vec2::ZERO, Vec2::new(0.5, 0.4)));
        let config = LogicConfig {
            tick_interval: Duration::from_millis(2),
            ..Default::default()
        };
        let logic = LogicThread::spawn(Arc::clone(&shared), SystemClock::new(), config)
            .expect("spawn logic thread");

        thread::sleep(Duration::from_millis(40));
        let started = Instant::now();
        let stats = logic.stop().expect("logic thread should not panic");

        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(stats.ticks > 0);
        assert!(!shared.is_running());

        let frozen = shared.motion.snapshot();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(shared.motion.snapshot(), frozen);
    }
}
