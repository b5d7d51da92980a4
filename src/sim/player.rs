//! Player entity
//!
//! The body (position, velocity, death flag) is the only state shared with
//! the input thread. It sits behind a single mutex and is reachable from
//! outside the simulation only through [`JumpHandle`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::IVec2;

use crate::consts::PLAYER_FRAMES;

/// Fixed player tuning for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Spawn and reset position
    pub start: IVec2,
    /// Sprite/collision box size
    pub size: IVec2,
    /// Added to velocity every tick
    pub gravity: i32,
    /// Velocity set by a jump
    pub jump_impulse: i32,
    /// The player dies when y leaves `0..=playfield_height`
    pub playfield_height: i32,
}

/// Mutex-guarded physical state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Body {
    pos: IVec2,
    velocity: i32,
    dead: bool,
}

/// Copy of the player taken under the lock, for collision and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub pos: IVec2,
    pub size: IVec2,
    pub velocity: i32,
    pub dead: bool,
    pub frame: u8,
}

fn lock(body: &Mutex<Body>) -> MutexGuard<'_, Body> {
    // Poisoned bodies are still consistent (updates are plain integer stores)
    body.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable jump trigger for the input thread
#[derive(Debug, Clone)]
pub struct JumpHandle {
    body: Arc<Mutex<Body>>,
    impulse: i32,
}

impl JumpHandle {
    /// Overwrite the current velocity with the jump impulse
    pub fn jump(&self) {
        lock(&self.body).velocity = self.impulse;
    }
}

/// The player-controlled sprite
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    body: Arc<Mutex<Body>>,
    /// Animation frame, touched only by the loop thread
    frame: u8,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            body: Arc::new(Mutex::new(Body {
                pos: config.start,
                velocity: 0,
                dead: false,
            })),
            frame: 0,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Advance one tick: animate, move with the current velocity, then fall
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % PLAYER_FRAMES;

        let mut body = lock(&self.body);
        body.pos.y = body.pos.y.saturating_add(body.velocity);
        body.velocity = body.velocity.saturating_add(self.config.gravity);
        if body.pos.y < 0 || body.pos.y > self.config.playfield_height {
            body.dead = true;
        }
    }

    /// Apply the jump impulse (not additive)
    pub fn jump(&self) {
        lock(&self.body).velocity = self.config.jump_impulse;
    }

    /// Handle for delivering jumps from another thread
    pub fn jump_handle(&self) -> JumpHandle {
        JumpHandle {
            body: Arc::clone(&self.body),
            impulse: self.config.jump_impulse,
        }
    }

    pub fn mark_dead(&self) {
        lock(&self.body).dead = true;
    }

    pub fn is_dead(&self) -> bool {
        lock(&self.body).dead
    }

    /// Back to the start position, alive. Velocity carries over.
    pub fn reset(&self) {
        let mut body = lock(&self.body);
        body.pos = self.config.start;
        body.dead = false;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let body = *lock(&self.body);
        PlayerSnapshot {
            pos: body.pos,
            size: self.config.size,
            velocity: body.velocity,
            dead: body.dead,
            frame: self.frame,
        }
    }

    #[cfg(test)]
    fn place(&self, y: i32, velocity: i32) {
        let mut body = lock(&self.body);
        body.pos.y = y;
        body.velocity = velocity;
    }
}
