//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the field
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{player_hits_obstacle, spans_overlap};
pub use field::{Field, FieldLayout, GapPair, generate};
pub use obstacle::{Obstacle, Orientation};
pub use player::{JumpHandle, Player, PlayerConfig, PlayerSnapshot};
pub use state::{GameEvent, Phase, PhaseEvent, Session};
pub use tick::tick;
