//! Flappy Gap - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacles, scoring, reset)
//! - `scene`: Binds a session to a canvas and drives the fixed-rate loop
//! - `renderer`: Presentation adapter (terminal and recording canvases)
//! - `input`: Terminal event classification
//! - `settings`: Data-driven game tuning

pub mod highscores;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use scene::Scene;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const PLAYFIELD_WIDTH: i32 = 800;
    pub const PLAYFIELD_HEIGHT: i32 = 600;

    /// Simulation ticks per second
    pub const DEFAULT_FPS: u32 = 20;

    /// Player defaults
    pub const PLAYER_START_X: i32 = 20;
    pub const PLAYER_SIZE: i32 = 50;
    pub const GRAVITY: i32 = 5;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: i32 = -20;
    /// Number of animation frames in the player sprite cycle
    pub const PLAYER_FRAMES: u8 = 4;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: i32 = 52;
    pub const OBSTACLE_SPEED: i32 = 10;
    pub const OBSTACLE_MIN_HEIGHT: i32 = 40;
    /// Gap pairs generated per field
    pub const PAIR_COUNT: usize = 100;
    /// Horizontal slot between pairs, in obstacle widths
    pub const GAP_SLOTS: i32 = 5;
    /// Vertical gap range between the two obstacles of a pair
    pub const GAP_MIN: i32 = 150;
    pub const GAP_MAX: i32 = 250;

    /// Background scroll wraps at this offset
    pub const BACKGROUND_WRAP: i32 = 2000;
    /// Pause after a death before play resumes
    pub const RESET_PAUSE_MS: u64 = 500;
}
