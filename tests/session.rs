use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use flappy_gap::renderer::{DrawCall, RecordingCanvas};
use flappy_gap::sim::{GameEvent, Phase, Session, tick};
use flappy_gap::{Scene, Settings};

fn settings() -> Settings {
    Settings {
        reset_pause_ms: 0,
        seed: Some(2024),
        ..Settings::default()
    }
}

/// Jump whenever the player sinks below the middle of the next gap
fn autopilot(session: &Session) {
    let player = session.player.snapshot();
    let score_line = session.field.layout().score_line;
    let next = session
        .field
        .gap_pairs()
        .filter(|p| p.position + session.field.layout().obstacle_width >= score_line)
        .min_by_key(|p| p.position);
    let target = match next {
        Some(pair) => pair.bottom + pair.gap(session.playfield().y) / 2,
        None => session.playfield().y / 2,
    };
    if player.pos.y + player.size.y / 2 > target && player.velocity > 0 {
        session.player.jump();
    }
}

#[test]
fn autopilot_scores_before_dying() {
    let settings = Settings {
        gap_min: 220,
        gap_max: 250,
        ..settings()
    };
    let mut session = Session::new(&settings, 2024);
    let mut best = 0;

    for _ in 0..2000 {
        autopilot(&session);
        for event in tick(&mut session) {
            match event {
                GameEvent::Scored { score } => best = best.max(score),
                GameEvent::Died { final_score, .. } => best = best.max(final_score),
            }
        }
        if session.phase == Phase::Resetting {
            session.finish_reset();
        }
    }

    assert!(best >= 3, "autopilot only reached {}", best);
}

#[test]
fn jumps_from_input_thread_reach_the_scene() {
    let mut scene = Scene::new(RecordingCanvas::new(), &settings(), 2024).unwrap();
    scene.step();
    let falling = scene.session().player.snapshot();
    assert!(falling.velocity > 0);

    let handle = scene.jump_handle();
    thread::spawn(move || handle.jump()).join().unwrap();

    scene.step();
    let after = scene.session().player.snapshot();
    assert_eq!(after.pos.y, falling.pos.y - 20);
    assert_eq!(after.velocity, -15);
}

#[test]
fn every_frame_is_cleared_and_presented() {
    let mut scene = Scene::new(RecordingCanvas::new(), &settings(), 2024).unwrap();
    for _ in 0..30 {
        scene.step();
        scene.render().unwrap();
    }
    let calls = scene.canvas().calls();
    let clears = calls.iter().filter(|c| **c == DrawCall::Clear).count();
    assert_eq!(clears, scene.canvas().presents());
    assert!(clears >= 30);
}

#[test]
fn scene_loop_stops_between_frames() {
    let scene = Scene::new(RecordingCanvas::new(), &settings(), 2024).unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let loop_running = Arc::clone(&running);
    let scene_loop = thread::spawn(move || scene.run(100, &loop_running));

    thread::sleep(Duration::from_millis(100));
    running.store(false, Ordering::Release);
    let scene = scene_loop.join().unwrap();

    // Stopped after a whole frame: nothing cleared is left unpresented
    let calls = scene.canvas().calls();
    assert!(scene.session().time_ticks > 0);
    assert_eq!(calls.last(), Some(&DrawCall::Present));
    let clears = calls.iter().filter(|c| **c == DrawCall::Clear).count();
    assert_eq!(clears, scene.canvas().presents());
}
