//! Obstacle columns

use super::collision::player_hits_obstacle;
use super::player::PlayerSnapshot;

/// Which playfield edge an obstacle is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Anchored at row 0, covers rows `0..=height`
    Bottom,
    /// Anchored at the far edge, covers rows `playfield_height - height..`
    Top,
}

/// A single barrier scrolling toward the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    /// Left edge; decreases every tick
    pub position: i32,
    pub width: i32,
    pub height: i32,
    pub orientation: Orientation,
    /// Leftward distance per tick
    pub speed: i32,
}

impl Obstacle {
    pub fn tick(&mut self) {
        self.position = self.position.saturating_sub(self.speed);
    }

    pub fn collides_with(&self, player: &PlayerSnapshot, playfield_height: i32) -> bool {
        player_hits_obstacle(player, self, playfield_height)
    }
}
