//! Collision detection between the player box and obstacle columns
//!
//! Everything here is axis-aligned integer math in playfield coordinates.

use super::obstacle::{Obstacle, Orientation};
use super::player::PlayerSnapshot;

/// Whether half-open spans `[a, a + a_len)` and `[b, b + b_len)` overlap
#[inline]
pub fn spans_overlap(a: i32, a_len: i32, b: i32, b_len: i32) -> bool {
    !(a.saturating_add(a_len) <= b || a >= b.saturating_add(b_len))
}

/// Check the player against a single obstacle
///
/// Horizontally disjoint boxes never collide. Once the spans overlap, a
/// bottom obstacle covers rows `0..=height` and a top obstacle covers rows
/// `playfield_height - height..=playfield_height`.
pub fn player_hits_obstacle(
    player: &PlayerSnapshot,
    obstacle: &Obstacle,
    playfield_height: i32,
) -> bool {
    if !spans_overlap(player.pos.x, player.size.x, obstacle.position, obstacle.width) {
        return false;
    }

    match obstacle.orientation {
        Orientation::Bottom => player.pos.y <= obstacle.height,
        Orientation::Top => {
            player.pos.y.saturating_add(player.size.y) >= playfield_height - obstacle.height
        }
    }
}
