//! Flappy Gap entry point
//!
//! Sets up the terminal, builds the scene and runs the game loop on its own
//! thread while this thread waits for input.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result, anyhow};
use crossterm::event;

use flappy_gap::input::{Signal, classify};
use flappy_gap::renderer::{TerminalCanvas, TerminalGuard};
use flappy_gap::sim::JumpHandle;
use flappy_gap::{Scene, Settings};

/// Forward jumps until a quit signal arrives
fn read_input(jump: &JumpHandle) -> Result<()> {
    loop {
        let event = event::read().context("Error while reading input")?;
        match classify(&event) {
            Some(Signal::Jump) => jump.jump(),
            Some(Signal::Quit) => return Ok(()),
            None => {}
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::load().context("Error while loading settings")?;
    let seed = settings.seed.unwrap_or_else(rand::random);

    let guard = TerminalGuard::enter().context("Error while initializing terminal")?;
    let canvas =
        TerminalCanvas::stdout(settings.playfield()).context("Error while creating canvas")?;
    let scene = Scene::new(canvas, &settings, seed).context("Error while creating scene")?;
    log::info!("Game initialized with seed: {}", seed);

    let jump = scene.jump_handle();
    let fps = settings.fps;
    let running = Arc::new(AtomicBool::new(true));
    let loop_running = Arc::clone(&running);
    let scene_loop = thread::Builder::new()
        .name("scene".into())
        .spawn(move || scene.run(fps, &loop_running))
        .context("Error while starting scene loop")?;

    let input = read_input(&jump);
    log::info!("Quit requested");

    // The last frame must be out before the primary screen comes back
    running.store(false, Ordering::Release);
    let joined = scene_loop.join();
    drop(guard);

    input?;
    joined.map_err(|_| anyhow!("Scene loop panicked"))?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Gap starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("flappy-gap: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
