//! Simulation module
//!
//! Motion state shared between threads, the wall collision rule and the
//! logic thread that drives them. No rendering or windowing dependencies.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionRule, WallHit};
pub use state::{AtomicF32, EventFlags, Motion, MotionState, SharedState};
pub use tick::{LogicConfig, LogicLoop, LogicThread, LoopStats, TickOutcome};
