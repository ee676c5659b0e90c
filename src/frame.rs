//! Per-frame reaction to collision events
//!
//! Runs on the render thread. Each frame looks at the event flags raised by
//! the logic thread, picks the logo color, and draws the logo once at the
//! current position.
//!
//! Corner hits win over plain collisions. A corner reaction clears only the
//! corner flag, so the collision flag it was raised with is consumed on the
//! following frame and the fixed corner color is immediately replaced by a
//! random one.

use glam::Vec3;
use rand::Rng;

use crate::sim::{EventFlags, SharedState};

/// The drawing capability the render loop needs
pub trait QuadRenderer {
    type Error;

    /// Draw the logo centred at `position` (NDC) tinted with `color`
    fn draw_quad(&mut self, position: glam::Vec2, color: Vec3) -> Result<(), Self::Error>;
}

/// Logo colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Shown when a corner is hit
    pub corner_color: Vec3,
    /// Lowest value a random channel may take; keeps the logo visible
    pub channel_floor: f32,
}

impl Palette {
    pub fn random_color<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let floor = self.channel_floor.clamp(0.0, 1.0);
        Vec3::new(
            rng.random_range(floor..=1.0),
            rng.random_range(floor..=1.0),
            rng.random_range(floor..=1.0),
        )
    }
}

/// What the render loop did with the flags this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing pending, color unchanged
    Idle,
    /// Corner color applied, corner flag cleared
    Corner,
    /// Random color applied, collision flag cleared
    Collision,
}

/// Render-thread state: the current color and the RNG behind it
#[derive(Debug)]
pub struct FrameDriver<R> {
    rng: R,
    palette: Palette,
    color: Vec3,
    frames: u64,
}

impl<R: Rng> FrameDriver<R> {
    pub fn new(rng: R, palette: Palette, initial_color: Vec3) -> Self {
        Self {
            rng,
            palette,
            color: initial_color,
            frames: 0,
        }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Consume pending flags and update the color
    pub fn react(&mut self, flags: &EventFlags) -> Reaction {
        if flags.take_corner() {
            self.color = self.palette.corner_color;
            log::debug!("Corner reaction");
            return Reaction::Corner;
        }

        if flags.take_collided() {
            self.color = self.palette.random_color(&mut self.rng);
            log::debug!("Collision reaction, new color {:?}", self.color);
            return Reaction::Collision;
        }

        Reaction::Idle
    }

    /// One render-loop iteration: react, then draw at the current position
    pub fn frame<Q: QuadRenderer>(
        &mut self,
        shared: &SharedState,
        renderer: &mut Q,
    ) -> Result<Reaction, Q::Error> {
        let reaction = self.react(&shared.flags);
        let position = shared.motion.position();
        renderer.draw_quad(position, self.color)?;
        self.frames += 1;
        Ok(reaction)
    }
}
