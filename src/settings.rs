//! Game settings and tuning
//!
//! Defaults reproduce the classic tuning. An optional `flappy.json` in the
//! working directory overrides any subset of fields.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{FieldLayout, PlayerConfig};

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file exists but could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// Settings file is not valid JSON for [`Settings`]
    Parse(serde_json::Error),
    /// A value is out of its usable range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: i32,
    pub playfield_height: i32,
    /// Loop rate (ticks and frames per second)
    pub fps: u32,

    // === Player ===
    pub gravity: i32,
    pub jump_impulse: i32,
    pub player_start_x: i32,
    pub player_size: i32,

    // === Obstacles ===
    pub obstacle_width: i32,
    pub obstacle_speed: i32,
    pub obstacle_min_height: i32,
    pub pair_count: usize,
    pub gap_slots: i32,
    pub gap_min: i32,
    pub gap_max: i32,

    // === Pacing ===
    pub background_wrap: i32,
    pub reset_pause_ms: u64,

    /// Fixed RNG seed (None = seeded from entropy at startup)
    pub seed: Option<u64>,
    /// Directory holding the sprite PNGs
    pub resource_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            fps: DEFAULT_FPS,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            player_start_x: PLAYER_START_X,
            player_size: PLAYER_SIZE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            pair_count: PAIR_COUNT,
            gap_slots: GAP_SLOTS,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,

            background_wrap: BACKGROUND_WRAP,
            reset_pause_ms: RESET_PAUSE_MS,

            seed: None,
            resource_dir: PathBuf::from("resources"),
        }
    }
}

impl Settings {
    /// File consulted by [`Settings::load`]
    const FILE_NAME: &'static str = "flappy.json";

    /// Load settings from `flappy.json` in the working directory, or defaults
    pub fn load() -> Result<Self, SettingsError> {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("No {} found, using default settings", Self::FILE_NAME);
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load and validate settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.fps == 0 {
            return invalid("fps must be positive".into());
        }
        if self.playfield_width <= 0 || self.playfield_height <= 0 {
            return invalid(format!(
                "playfield {}x{} is empty",
                self.playfield_width, self.playfield_height
            ));
        }
        if self.player_size <= 0 || self.player_size >= self.playfield_height {
            return invalid(format!("player size {} does not fit", self.player_size));
        }
        if self.obstacle_width <= 0 || self.gap_slots <= 0 {
            return invalid("obstacle width and gap slots must be positive".into());
        }
        if self.obstacle_min_height < 0 || self.gap_min <= 0 || self.gap_min > self.gap_max {
            return invalid(format!(
                "gap range {}..={} (min obstacle {}) is empty",
                self.gap_min, self.gap_max, self.obstacle_min_height
            ));
        }
        // Both obstacles of the tallest-gap pair must still fit
        let stacked = self
            .obstacle_min_height
            .checked_mul(2)
            .and_then(|m| m.checked_add(self.gap_max));
        if stacked.is_none_or(|total| total >= self.playfield_height) {
            return invalid(format!(
                "gap {} plus two {} obstacles exceeds playfield height {}",
                self.gap_max, self.obstacle_min_height, self.playfield_height
            ));
        }
        if self.background_wrap <= 0 {
            return invalid("background wrap must be positive".into());
        }
        if self.player_start_x < 0 || self.player_start_x > self.playfield_width - self.player_size
        {
            return invalid(format!(
                "player start x {} is outside the playfield",
                self.player_start_x
            ));
        }
        if !(0..=self.playfield_width).contains(&self.obstacle_speed) {
            return invalid(format!(
                "obstacle speed {} must be within 0..={}",
                self.obstacle_speed, self.playfield_width
            ));
        }
        let max_speed = self.playfield_height.unsigned_abs();
        if self.gravity.unsigned_abs() > max_speed || self.jump_impulse.unsigned_abs() > max_speed {
            return invalid("gravity and jump impulse must not exceed the playfield height".into());
        }
        if self.field_extent().is_none() {
            return invalid(format!(
                "{} pairs of width {} with {} slots do not fit in i32 coordinates",
                self.pair_count, self.obstacle_width, self.gap_slots
            ));
        }
        Ok(())
    }

    /// Right edge of the farthest obstacle generation can place, if representable
    fn field_extent(&self) -> Option<i32> {
        let slots = i32::try_from(self.pair_count).ok()?.checked_add(2)?;
        let gap_width = self.obstacle_width.checked_mul(self.gap_slots)?;
        let jitter = self.obstacle_width.checked_mul(6)?;
        gap_width.checked_mul(slots)?.checked_add(jitter)
    }

    /// Playfield size as a vector
    pub fn playfield(&self) -> IVec2 {
        IVec2::new(self.playfield_width, self.playfield_height)
    }

    /// Player tuning derived from these settings
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            start: IVec2::new(self.player_start_x, self.playfield_height / 2),
            size: IVec2::splat(self.player_size),
            gravity: self.gravity,
            jump_impulse: self.jump_impulse,
            playfield_height: self.playfield_height,
        }
    }

    /// Obstacle generation tuning derived from these settings
    pub fn field_layout(&self) -> FieldLayout {
        FieldLayout {
            playfield_height: self.playfield_height,
            obstacle_width: self.obstacle_width,
            obstacle_speed: self.obstacle_speed,
            min_height: self.obstacle_min_height,
            pair_count: self.pair_count,
            gap_slots: self.gap_slots,
            gap_min: self.gap_min,
            gap_max: self.gap_max,
            score_line: self.player_start_x,
        }
    }
}
