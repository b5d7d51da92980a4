//! Obstacle field and procedural generation
//!
//! Pairs are generated with a remainder-based split so that
//! `bottom + gap + top == playfield_height` for every pair, which always
//! leaves a traversable gap. Pairs are pushed bottom first, then top.

use rand::Rng;
use rand_pcg::Pcg32;

use super::obstacle::{Obstacle, Orientation};
use super::player::PlayerSnapshot;

/// Generation and scoring tuning for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub playfield_height: i32,
    pub obstacle_width: i32,
    pub obstacle_speed: i32,
    /// Smallest height either obstacle of a pair may get
    pub min_height: i32,
    pub pair_count: usize,
    /// Horizontal slot between pairs, in obstacle widths
    pub gap_slots: i32,
    pub gap_min: i32,
    pub gap_max: i32,
    /// Obstacles left of this x have been passed (the player's start x)
    pub score_line: i32,
}

impl FieldLayout {
    /// Horizontal distance between consecutive pair slots
    pub fn gap_width(&self) -> i32 {
        self.obstacle_width * self.gap_slots
    }
}

/// A bottom/top pair sharing one horizontal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPair {
    pub position: i32,
    pub bottom: i32,
    pub top: i32,
}

impl GapPair {
    /// Vertical opening between the two obstacles
    pub fn gap(&self, playfield_height: i32) -> i32 {
        playfield_height - self.bottom - self.top
    }
}

/// Generate a fresh batch of obstacles
pub fn generate(rng: &mut impl Rng, layout: &FieldLayout) -> Vec<Obstacle> {
    let w = layout.obstacle_width;
    let gap_width = layout.gap_width();
    let mut obstacles = Vec::with_capacity(layout.pair_count * 2);

    for i in 0..layout.pair_count {
        let gap = rng.random_range(layout.gap_min..=layout.gap_max);
        let bottom_max = layout.playfield_height - gap - layout.min_height;
        let bottom = rng.random_range(layout.min_height..=bottom_max);
        let top = layout.playfield_height - gap - bottom;

        // Jitter so pairs are not perfectly periodic
        let mut position = gap_width * (i as i32 + 2) + rng.random_range(0..w * 4) + w / 2;
        if rng.random_range(0..10) > 4 {
            position += w;
        } else {
            position -= w;
        }

        obstacles.push(Obstacle {
            position,
            width: w,
            height: bottom,
            orientation: Orientation::Bottom,
            speed: layout.obstacle_speed,
        });
        obstacles.push(Obstacle {
            position,
            width: w,
            height: top,
            orientation: Orientation::Top,
            speed: layout.obstacle_speed,
        });
    }

    obstacles
}

/// Ordered obstacle collection with its own RNG
#[derive(Debug, Clone)]
pub struct Field {
    layout: FieldLayout,
    rng: Pcg32,
    obstacles: Vec<Obstacle>,
}

impl Field {
    /// Create and populate a field
    pub fn new(layout: FieldLayout, rng: Pcg32) -> Self {
        let mut field = Self {
            layout,
            rng,
            obstacles: Vec::new(),
        };
        field.reset();
        field
    }

    /// Field with a hand-placed batch; later resets generate as usual
    pub fn with_obstacles(layout: FieldLayout, rng: Pcg32, obstacles: Vec<Obstacle>) -> Self {
        Self {
            layout,
            rng,
            obstacles,
        }
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn tick(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.tick();
        }
    }

    /// True on the first obstacle that hits the player
    pub fn any_collision(&self, player: &PlayerSnapshot) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.collides_with(player, self.layout.playfield_height))
    }

    /// Number of obstacles that scrolled past the score line (two per pair)
    pub fn score(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.position < self.layout.score_line)
            .count()
    }

    /// Replace every obstacle with a freshly generated batch
    pub fn reset(&mut self) {
        self.obstacles = generate(&mut self.rng, &self.layout);
        log::debug!("Generated {} gap pairs", self.layout.pair_count);
    }

    /// Pairs in generation order
    pub fn gap_pairs(&self) -> impl Iterator<Item = GapPair> + '_ {
        self.obstacles.chunks_exact(2).map(|pair| GapPair {
            position: pair[0].position,
            bottom: pair[0].height,
            top: pair[1].height,
        })
    }
}
