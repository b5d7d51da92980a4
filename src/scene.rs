//! Scene: a session bound to a canvas
//!
//! Owns the sprites, draws the session, paces the reset pause and runs the
//! fixed-rate loop. The simulation itself lives in [`crate::sim`].

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::consts::PLAYER_FRAMES;
use crate::highscores::{HighScores, Run};
use crate::renderer::{Canvas, Color, Flip, Rect, RenderError, Texture};
use crate::settings::Settings;
use crate::sim::{GameEvent, JumpHandle, Orientation, Phase, Session, tick};

/// Score overlay placement
const SCORE_MARGIN: i32 = 15;
const SCORE_DIGIT_WIDTH: i32 = 30;
const SCORE_HEIGHT: i32 = 60;
const BEST_COLOR: Color = Color::rgb(255, 215, 90);

/// Sprites loaded at startup
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub background: Texture,
    pub player_frames: Vec<Texture>,
    pub obstacle: Texture,
}

impl SceneAssets {
    /// Load `bg.png`, `bird/frame-{1..4}.png` and `pipe.png` from `dir`
    pub fn load(canvas: &mut impl Canvas, dir: &Path) -> Result<Self, RenderError> {
        let background = canvas.load_texture(&dir.join("bg.png"))?;
        let player_frames = (1..=PLAYER_FRAMES)
            .map(|i| canvas.load_texture(&dir.join(format!("bird/frame-{}.png", i))))
            .collect::<Result<Vec<_>, _>>()?;
        let obstacle = canvas.load_texture(&dir.join("pipe.png"))?;
        log::info!("Loaded sprites from {}", dir.display());

        Ok(Self {
            background,
            player_frames,
            obstacle,
        })
    }
}

/// Overlay width for a score: one digit slot per digit, up to three
fn score_width(score: u32) -> i32 {
    let mut width = SCORE_DIGIT_WIDTH;
    if score >= 10 {
        width += SCORE_DIGIT_WIDTH;
    }
    if score >= 100 {
        width += SCORE_DIGIT_WIDTH;
    }
    width
}

pub struct Scene<C: Canvas> {
    session: Session,
    canvas: C,
    assets: SceneAssets,
    high_scores: HighScores,
    reset_pause: Duration,
}

impl<C: Canvas> Scene<C> {
    /// Build a scene, loading sprites through the canvas
    pub fn new(mut canvas: C, settings: &Settings, seed: u64) -> Result<Self, RenderError> {
        let assets = SceneAssets::load(&mut canvas, &settings.resource_dir)?;
        Ok(Self {
            session: Session::new(settings, seed),
            canvas,
            assets,
            high_scores: HighScores::new(),
            reset_pause: Duration::from_millis(settings.reset_pause_ms),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Handle for the input thread
    pub fn jump_handle(&self) -> JumpHandle {
        self.session.jump_handle()
    }

    /// Draw the current state; the session is not touched
    pub fn render(&mut self) -> Result<(), RenderError> {
        let session = &self.session;
        let canvas = &mut self.canvas;
        let pf = session.playfield();

        canvas.clear();

        // Background, two copies side by side
        let src = Rect::new(0, 0, pf.x, pf.y);
        for x in [-session.scroll, pf.x - session.scroll] {
            canvas.draw_image(
                &self.assets.background,
                Some(src),
                Rect::new(x, 0, pf.x, pf.y),
                Flip::None,
            );
        }

        let player = session.player.snapshot();
        if let Some(frame) = self.assets.player_frames.get(player.frame as usize) {
            canvas.draw_image(
                frame,
                None,
                Rect::from_pos_size(player.pos, player.size),
                Flip::None,
            );
        }

        for obstacle in session.field.obstacles() {
            let src = Rect::new(0, 0, obstacle.width, obstacle.height);
            let (y, flip) = match obstacle.orientation {
                Orientation::Bottom => (0, Flip::Vertical),
                Orientation::Top => (pf.y - obstacle.height, Flip::None),
            };
            canvas.draw_image(
                &self.assets.obstacle,
                Some(src),
                Rect::new(obstacle.position, y, obstacle.width, obstacle.height),
                flip,
            );
        }

        let score = session.score();
        let text = canvas.render_text(&score.to_string(), Color::WHITE)?;
        canvas.draw_image(
            &text,
            None,
            Rect::new(SCORE_MARGIN, SCORE_MARGIN, score_width(score), SCORE_HEIGHT),
            Flip::None,
        );

        if let Some(best) = self.high_scores.best() {
            let text = canvas.render_text(&best.to_string(), BEST_COLOR)?;
            let width = score_width(best);
            canvas.draw_image(
                &text,
                None,
                Rect::new(pf.x - SCORE_MARGIN - width, SCORE_MARGIN, width, SCORE_HEIGHT),
                Flip::None,
            );
        }

        canvas.present()
    }

    /// One simulation step including the death pause
    pub fn step(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.session);

        for event in &events {
            if let GameEvent::Died { final_score, ticks } = *event {
                let run = Run {
                    score: final_score,
                    ticks,
                };
                if let Some(place) = self.high_scores.record(run) {
                    log::info!("Score {} placed #{}", final_score, place);
                }
                log::info!(
                    "Final score {} (best {})",
                    final_score,
                    self.high_scores.best().unwrap_or(0)
                );
            }
        }

        if self.session.phase == Phase::Resetting {
            if let Err(e) = self.render() {
                log::warn!("Render failed during reset: {}", e);
            }
            thread::sleep(self.reset_pause);
            self.session.finish_reset();
        }

        events
    }

    /// Tick and draw at a fixed period while `running` is set
    ///
    /// The period is `1000 / fps` ms regardless of how long a frame took. The
    /// flag is checked before each frame, so once this returns no further
    /// frame reaches the canvas.
    pub fn run(mut self, fps: u32, running: &AtomicBool) -> Self {
        let period = Duration::from_millis(1000 / u64::from(fps.max(1)));
        log::info!("Scene loop running at {} fps", fps);
        while running.load(Ordering::Acquire) {
            self.step();
            if let Err(e) = self.render() {
                log::warn!("Render failed: {}", e);
            }
            thread::sleep(period);
        }
        log::info!("Scene loop stopped after {} ticks", self.session.time_ticks);
        self
    }
}
