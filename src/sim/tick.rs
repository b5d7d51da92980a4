//! Fixed timestep simulation tick
//!
//! Core game loop step that advances a session deterministically.

use super::state::{GameEvent, Phase, PhaseEvent, Session};

/// Advance the session by one tick
///
/// Does nothing while the session is Resetting.
pub fn tick(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != Phase::Playing {
        return events;
    }

    session.time_ticks += 1;
    session.run_ticks += 1;

    session.player.tick();
    session.field.tick();

    session.scroll = (session.scroll + 1) % session.background_wrap;
    if session.scroll >= session.playfield.x {
        session.scroll = 0;
    }

    let player = session.player.snapshot();
    if session.field.any_collision(&player) {
        session.player.mark_dead();
    }

    if session.player.is_dead() {
        let final_score = session.score();
        log::info!(
            "Player died after {} ticks with score {}",
            session.run_ticks,
            final_score
        );
        events.push(GameEvent::Died {
            final_score,
            ticks: session.run_ticks,
        });
        session.reset_run();
        session.phase = session.phase.transition(PhaseEvent::Died);
        return events;
    }

    let score = session.score();
    if score > session.passed {
        session.passed = score;
        log::debug!("Passed gap pair, score {}", score);
        events.push(GameEvent::Scored { score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::Settings;
    use crate::sim::{Field, Obstacle, Orientation};

    /// Ticks until the player falls out of the playfield with no jumps
    fn fall_out(session: &mut Session) -> (usize, Vec<GameEvent>) {
        for n in 1..=1000 {
            let events = tick(session);
            if session.phase == Phase::Resetting {
                return (n, events);
            }
        }
        panic!("player never died");
    }

    #[test]
    fn test_first_ticks_follow_update_order() {
        let mut session = Session::new(&Settings::default(), 12345);
        tick(&mut session);
        let p = session.player.snapshot();
        assert_eq!((p.pos.y, p.velocity), (300, 5));

        tick(&mut session);
        let p = session.player.snapshot();
        assert_eq!((p.pos.y, p.velocity), (305, 10));

        session.player.jump();
        tick(&mut session);
        let p = session.player.snapshot();
        assert_eq!((p.pos.y, p.velocity), (285, -15));
    }

    #[test]
    fn test_obstacles_scroll_each_tick() {
        let mut session = Session::new(&Settings::default(), 7);
        let before: Vec<i32> = session.field.obstacles().iter().map(|o| o.position).collect();
        tick(&mut session);
        for (o, start) in session.field.obstacles().iter().zip(before) {
            assert_eq!(o.position, start - 10);
        }
    }

    #[test]
    fn test_background_scroll_wraps_at_playfield_width() {
        let settings = Settings {
            // keep the player alive and the field out of reach
            gravity: 0,
            pair_count: 0,
            ..Settings::default()
        };
        let mut session = Session::new(&settings, 1);
        for _ in 0..799 {
            tick(&mut session);
        }
        assert_eq!(session.scroll, 799);
        tick(&mut session);
        assert_eq!(session.scroll, 0);
        assert_eq!(session.phase, Phase::Playing);
    }

    #[test]
    fn test_falling_out_resets_and_emits_score_once() {
        let mut session = Session::new(&Settings::default(), 12345);
        let (_, events) = fall_out(&mut session);

        let deaths: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Died { .. }))
            .collect();
        assert_eq!(deaths.len(), 1);
        assert!(matches!(deaths[0], GameEvent::Died { final_score: 0, .. }));

        // State was reset in place
        let p = session.player.snapshot();
        assert!(!p.dead);
        assert_eq!(p.pos.y, 300);
        assert_eq!(session.scroll, 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_tick_is_noop_while_resetting() {
        let mut session = Session::new(&Settings::default(), 12345);
        fall_out(&mut session);
        let ticks = session.time_ticks;
        let positions: Vec<i32> = session.field.obstacles().iter().map(|o| o.position).collect();

        assert!(tick(&mut session).is_empty());
        assert_eq!(session.time_ticks, ticks);
        let after: Vec<i32> = session.field.obstacles().iter().map(|o| o.position).collect();
        assert_eq!(positions, after);

        session.finish_reset();
        tick(&mut session);
        assert_eq!(session.time_ticks, ticks + 1);
    }

    #[test]
    fn test_collision_kills_player() {
        let settings = Settings {
            gravity: 0,
            ..Settings::default()
        };
        let mut session = Session::new(&settings, 99);
        let wall = Obstacle {
            position: 80,
            width: 52,
            height: 320,
            orientation: Orientation::Bottom,
            speed: 10,
        };
        session.field = Field::with_obstacles(
            *session.field.layout(),
            Pcg32::seed_from_u64(99),
            vec![wall],
        );

        // x = 70 only touches the player's right edge
        assert!(tick(&mut session).is_empty());
        let events = tick(&mut session);
        assert_eq!(
            events,
            vec![GameEvent::Died {
                final_score: 0,
                ticks: 2
            }]
        );
        assert_eq!(session.phase, Phase::Resetting);
    }

    #[test]
    fn test_scored_events_count_up() {
        let settings = Settings {
            gravity: 0,
            gap_min: 400,
            gap_max: 400,
            obstacle_min_height: 50,
            ..Settings::default()
        };
        let mut session = Session::new(&settings, 3);
        let mut scores = Vec::new();
        for _ in 0..400 {
            for event in tick(&mut session) {
                match event {
                    GameEvent::Scored { score } => scores.push(score),
                    GameEvent::Died { .. } => {}
                }
            }
        }
        assert!(!scores.is_empty());
        for (i, w) in scores.windows(2).enumerate() {
            assert!(w[1] > w[0], "scores must increase at {}", i);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(&Settings::default(), 99999);
        let mut b = Session::new(&Settings::default(), 99999);

        for n in 0..300 {
            if n % 7 == 0 {
                a.player.jump();
                b.player.jump();
            }
            assert_eq!(tick(&mut a), tick(&mut b));
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.snapshot(), b.player.snapshot());
        assert_eq!(a.field.obstacles(), b.field.obstacles());
    }
}
